use crate::core::store::AttendanceStore;
use crate::errors::{AppError, AppResult};
use crate::models::attendance::AttendanceRecord;
use crate::ui::messages::{info, success, warning};
use crate::utils::date;
use clap::ValueEnum;
use serde::Serialize;
use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ExportFormat {
    Csv,
    Json,
}

impl ExportFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Json => "json",
        }
    }
}

/// CSV row layout. The first eight columns are exactly what the importer
/// reads back; the rolling count is informational and ignored on import.
#[derive(Serialize, Clone, Debug)]
pub struct AttendanceExport {
    pub date: String,
    pub work_location: Option<String>,
    pub work_city: Option<String>,
    pub day: Option<String>,
    pub year_week: Option<i64>,
    pub notes: Option<String>,
    pub blockers: Option<String>,
    pub in_flight: Option<String>,
    pub rolling_in_office_count: Option<i64>,
}

impl From<&AttendanceRecord> for AttendanceExport {
    fn from(r: &AttendanceRecord) -> Self {
        Self {
            date: r.date.clone(),
            work_location: r.work_location.clone(),
            work_city: r.work_city.clone(),
            day: r.day.clone(),
            year_week: r.year_week,
            notes: r.notes.clone(),
            blockers: r.blockers.clone(),
            in_flight: r.in_flight.clone(),
            rolling_in_office_count: r.rolling_in_office_count,
        }
    }
}

pub struct ExportLogic;

impl ExportLogic {
    /// Export records to `file`.
    ///
    /// - `range`: `None`, `"all"`, or a period / `START:END` range
    ///   (`YYYY`, `YYYY-MM`, `YYYY-MM-DD`)
    /// - `force`: overwrite an existing file without asking
    ///
    /// Returns the number of exported records.
    pub fn export<S: AttendanceStore + ?Sized>(
        store: &S,
        format: ExportFormat,
        file: &Path,
        range: &Option<String>,
        force: bool,
    ) -> AppResult<usize> {
        ensure_writable(file, force)?;

        let records = select_records(store, range)?;

        if records.is_empty() {
            warning("No attendance records found for selected range.");
            return Ok(0);
        }

        match format {
            ExportFormat::Csv => export_csv(&records, file)?,
            ExportFormat::Json => export_json(&records, file)?,
        }

        success(format!(
            "{} export completed: {} ({} records)",
            format.as_str().to_uppercase(),
            file.display(),
            records.len()
        ));

        Ok(records.len())
    }
}

/// All records, or those whose canonical date falls inside `range`.
/// Records stored with an unparsed date only show up in an unbounded export.
pub fn select_records<S: AttendanceStore + ?Sized>(
    store: &S,
    range: &Option<String>,
) -> AppResult<Vec<AttendanceRecord>> {
    let all = store.list_all()?;

    let bounds = match range {
        None => return Ok(all),
        Some(r) if r.eq_ignore_ascii_case("all") => return Ok(all),
        Some(r) => date::parse_range(r).map_err(AppError::InvalidDate)?,
    };

    Ok(all
        .into_iter()
        .filter(|rec| {
            date::parse_date(&rec.date).is_some_and(|d| d >= bounds.0 && d <= bounds.1)
        })
        .collect())
}

/// Refuse to clobber an existing file unless `force` is set or the user agrees.
fn ensure_writable(path: &Path, force: bool) -> AppResult<()> {
    if !path.exists() || force {
        return Ok(());
    }

    warning(format!("The file '{}' already exists.", path.display()));

    print!("Overwrite? [y/N]: ");
    io::stdout().flush().ok();

    let mut answer = String::new();
    io::stdin().read_line(&mut answer)?;
    let ans = answer.trim().to_ascii_lowercase();

    if ans == "y" || ans == "yes" {
        info("Existing file will be overwritten.");
        Ok(())
    } else {
        Err(AppError::Export(
            "Export cancelled: existing file not overwritten".into(),
        ))
    }
}

fn export_csv(records: &[AttendanceRecord], path: &Path) -> AppResult<()> {
    info(format!("Exporting to CSV: {}", path.display()));

    let mut wtr = csv::Writer::from_path(path)
        .map_err(|e| AppError::Export(format!("CSV open error: {e}")))?;

    for rec in records {
        wtr.serialize(AttendanceExport::from(rec))
            .map_err(|e| AppError::Export(format!("CSV write error: {e}")))?;
    }

    wtr.flush()?;
    Ok(())
}

fn export_json(records: &[AttendanceRecord], path: &Path) -> AppResult<()> {
    info(format!("Exporting to JSON: {}", path.display()));

    let json_data = serde_json::to_string_pretty(records)
        .map_err(|e| AppError::Export(format!("JSON serialization error: {e}")))?;

    let mut file = File::create(path)?;
    file.write_all(json_data.as_bytes())?;
    Ok(())
}
