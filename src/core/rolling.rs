use crate::config::Config;
use crate::core::store::AttendanceStore;
use crate::errors::AppResult;

pub const DEFAULT_WINDOW_DAYS: u32 = 90;
pub const DEFAULT_OFFICE_LOCATION: &str = "Office";

/// Store-side definition of the in-office window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RollingWindow {
    /// Calendar days covered, target date included.
    pub days: u32,
    /// Locations that count as "in office" (case-insensitive).
    pub office_locations: Vec<String>,
}

impl Default for RollingWindow {
    fn default() -> Self {
        Self {
            days: DEFAULT_WINDOW_DAYS,
            office_locations: vec![DEFAULT_OFFICE_LOCATION.to_string()],
        }
    }
}

impl RollingWindow {
    pub fn from_config(cfg: &Config) -> Self {
        Self {
            days: cfg.rolling_window_days.max(1),
            office_locations: cfg.office_locations.clone(),
        }
    }

    /// SQLite date modifier for the lower bound, e.g. "-89 days".
    pub fn lower_bound_modifier(&self) -> String {
        format!("-{} days", self.days.saturating_sub(1))
    }

    /// Trimmed office labels, folded with Unicode lowercasing.
    pub fn normalized_locations(&self) -> Vec<String> {
        self.office_locations
            .iter()
            .map(|l| l.trim().to_lowercase())
            .filter(|l| !l.is_empty())
            .collect()
    }

    /// Same folding as [`Self::normalized_locations`], so "BÜRO" matches "Büro".
    pub fn is_in_office(&self, location: &str) -> bool {
        let loc = location.trim().to_lowercase();
        self.normalized_locations().iter().any(|l| *l == loc)
    }
}

pub struct RollingLogic;

impl RollingLogic {
    /// Rolling in-office count for the window ending at `target_date`.
    ///
    /// The same date is handed to the store as both window bounds; the
    /// store owns the width. Errors are passed through untouched.
    pub fn compute<S: AttendanceStore + ?Sized>(store: &S, target_date: &str) -> AppResult<i64> {
        store.count_in_window(target_date, target_date)
    }
}
