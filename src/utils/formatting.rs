//! Formatting utilities used for CLI and export outputs.

use crate::core::rolling::RollingWindow;

pub fn bold(s: &str) -> String {
    format!("\x1b[1m{}\x1b[0m", s)
}

/// Plain-text rendering of an optional cell ("" when unset).
pub fn opt_str(value: &Option<String>) -> String {
    value.clone().unwrap_or_default()
}

pub fn opt_num(value: Option<i64>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

/// Cut a cell to `max` chars, marking the cut with "…".
pub fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_string();
    }
    let mut out: String = s.chars().take(max.saturating_sub(1)).collect();
    out.push('…');
    out
}

/// Color used to print a work location: blue when it counts as office.
pub fn describe_location(location: Option<&str>, window: &RollingWindow) -> &'static str {
    match location {
        Some(loc) if window.is_in_office(loc) => "\x1b[34m",
        Some(_) => "\x1b[36m",
        None => "\x1b[90m",
    }
}
