//! Date helpers: canonical `YYYY-MM-DD` normalization and human display.

use chrono::{DateTime, NaiveDate};

/// Storage / comparison format.
pub const CANONICAL_FORMAT: &str = "%Y-%m-%d";

/// Human form, e.g. "January 6, 2025".
pub const LONG_FORMAT: &str = "%B %-d, %Y";

/// Zero-padded long form, e.g. "January 06, 2025".
const LONG_PADDED_FORMAT: &str = "%B %d, %Y";

pub fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

/// Strict `YYYY-MM-DD`: the text must be exactly the canonical rendering
/// of the date it parses to, so "2025-1-6" is refused.
pub fn parse_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s, CANONICAL_FORMAT)
        .ok()
        .filter(|d| to_canonical(d) == s)
}

/// Full month name, day, comma, single space, four-digit year. The month
/// name is matched case-insensitively; abbreviations are refused.
fn parse_long(s: &str) -> Option<NaiveDate> {
    let d = NaiveDate::parse_from_str(s, LONG_PADDED_FORMAT).ok()?;
    let matches = [LONG_FORMAT, LONG_PADDED_FORMAT]
        .iter()
        .any(|f| d.format(f).to_string().eq_ignore_ascii_case(s));
    matches.then_some(d)
}

pub fn to_canonical(d: &NaiveDate) -> String {
    d.format(CANONICAL_FORMAT).to_string()
}

/// Convert heterogeneous date text to `YYYY-MM-DD`.
///
/// Formats are tried in order: canonical, long form ("January 6, 2025"),
/// RFC 3339 timestamp. The first one that parses wins. Text that matches
/// none of them is returned unchanged, so callers that need a real date
/// must check the result with [`is_canonical`].
pub fn normalize(raw: &str) -> String {
    if raw.is_empty() {
        return String::new();
    }

    if let Some(d) = parse_date(raw) {
        return to_canonical(&d);
    }

    if let Some(d) = parse_long(raw) {
        return to_canonical(&d);
    }

    // the calendar date is taken in the timestamp's own offset; only the
    // upper-case 'T' separator is accepted
    if raw.get(10..11) == Some("T")
        && let Ok(ts) = DateTime::parse_from_rfc3339(raw)
    {
        return to_canonical(&ts.date_naive());
    }

    raw.to_string()
}

/// Render a canonical date as "January 6, 2025".
/// Empty or unparseable input comes back as-is.
pub fn display(canonical: &str) -> String {
    if canonical.is_empty() {
        return String::new();
    }

    match parse_date(canonical) {
        Some(d) => d.format(LONG_FORMAT).to_string(),
        None => canonical.to_string(),
    }
}

/// True only for the exact canonical rendering of a real calendar day.
pub fn is_canonical(s: &str) -> bool {
    parse_date(s).is_some()
}

fn month_last_day(year: i32, month: u32) -> Option<NaiveDate> {
    let (ny, nm) = if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    };
    NaiveDate::from_ymd_opt(ny, nm, 1)?.pred_opt()
}

/// First and last day of a single period: `YYYY`, `YYYY-MM` or `YYYY-MM-DD`.
pub fn period_bounds(p: &str) -> Option<(NaiveDate, NaiveDate)> {
    let p = p.trim();
    match p.len() {
        4 => {
            let y: i32 = p.parse().ok()?;
            Some((
                NaiveDate::from_ymd_opt(y, 1, 1)?,
                NaiveDate::from_ymd_opt(y, 12, 31)?,
            ))
        }
        7 => {
            let (ys, ms) = p.split_once('-')?;
            let y: i32 = ys.parse().ok()?;
            let m: u32 = ms.parse().ok()?;
            Some((NaiveDate::from_ymd_opt(y, m, 1)?, month_last_day(y, m)?))
        }
        10 => parse_date(p).map(|d| (d, d)),
        _ => None,
    }
}

/// Parse a period or a `START:END` range of periods into inclusive bounds.
pub fn parse_range(r: &str) -> Result<(NaiveDate, NaiveDate), String> {
    let (start, end) = match r.split_once(':') {
        Some((s, e)) => (s, e),
        None => (r, r),
    };

    let (from, _) = period_bounds(start).ok_or_else(|| format!("Invalid period: {}", start))?;
    let (_, to) = period_bounds(end).ok_or_else(|| format!("Invalid period: {}", end))?;

    if from > to {
        return Err(format!("Invalid range: {} is after {}", start, end));
    }

    Ok((from, to))
}
