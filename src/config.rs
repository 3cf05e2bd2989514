//! Holiday-calendar configuration.
//!
//! The built-in region tables cover the common cases; a YAML file can add
//! regions or extend built-ins:
//!
//! ```yaml
//! regions:
//!   DE:
//!     - "01-01"
//!     - "10-03"
//! ```
//!
//! Discovery is tiered: an explicit path wins, then the project directory
//! (`taskrank/holidays.yaml`), then the user directory
//! (`~/.taskrank/holidays.yaml`).

use anyhow::{Context, Result};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing::warn;

use crate::calendar::Calendar;

/// On-disk shape of the holiday config file.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct HolidaysFile {
    /// Region code to list of `"MM-DD"` dates.
    #[serde(default)]
    pub regions: HashMap<String, Vec<String>>,
}

/// Candidate locations for the holiday config file.
#[derive(Debug, Clone)]
pub struct ConfigPaths {
    /// Project-level config directory
    pub project_dir: Option<PathBuf>,
    /// User-level config directory
    pub user_dir: Option<PathBuf>,
}

impl ConfigPaths {
    /// Discover configuration paths from environment and defaults.
    pub fn discover() -> Self {
        // User dir: TASKRANK_USER_DIR or ~/.taskrank
        let user_dir = std::env::var("TASKRANK_USER_DIR")
            .ok()
            .map(PathBuf::from)
            .or_else(|| dirs::home_dir().map(|h| h.join(".taskrank")));

        // Project dir: TASKRANK_PROJECT_DIR or $CWD/taskrank
        let project_dir = std::env::var("TASKRANK_PROJECT_DIR")
            .ok()
            .map(PathBuf::from)
            .or_else(|| Some(PathBuf::from("taskrank")));

        Self {
            project_dir,
            user_dir,
        }
    }

    /// First existing holidays.yaml among the tiers, project before user.
    pub fn holidays_file(&self) -> Option<PathBuf> {
        for dir in [self.project_dir.as_ref(), self.user_dir.as_ref()]
            .into_iter()
            .flatten()
        {
            let candidate = dir.join("holidays.yaml");
            if candidate.exists() {
                return Some(candidate);
            }
        }
        None
    }
}

impl Default for ConfigPaths {
    fn default() -> Self {
        Self::discover()
    }
}

/// Build the run's calendar: built-in tables, optionally extended from a
/// YAML file. `explicit` (from the CLI) beats discovered locations.
pub fn load_calendar(explicit: Option<&Path>, paths: &ConfigPaths) -> Result<Calendar> {
    let mut calendar = Calendar::with_builtin();

    let file = match explicit {
        Some(path) => Some(path.to_path_buf()),
        None => paths.holidays_file(),
    };

    if let Some(path) = file {
        let text = std::fs::read_to_string(&path)
            .with_context(|| format!("reading holiday config {}", path.display()))?;
        let parsed: HolidaysFile = serde_yaml::from_str(&text)
            .with_context(|| format!("parsing holiday config {}", path.display()))?;
        apply_holidays(&mut calendar, &parsed);
    }

    Ok(calendar)
}

/// Merge parsed holiday entries into the calendar, skipping malformed dates
/// with a warning instead of failing the whole file.
pub fn apply_holidays(calendar: &mut Calendar, file: &HolidaysFile) {
    for (region, dates) in &file.regions {
        let days: Vec<(u32, u32)> = dates
            .iter()
            .filter_map(|entry| match parse_month_day(entry) {
                Some(md) => Some(md),
                None => {
                    warn!(%region, %entry, "skipping malformed holiday date (want MM-DD)");
                    None
                }
            })
            .collect();
        calendar.add_region_days(region, days);
    }
}

fn parse_month_day(entry: &str) -> Option<(u32, u32)> {
    let (month, day) = entry.split_once('-')?;
    let month: u32 = month.parse().ok()?;
    let day: u32 = day.parse().ok()?;
    if (1..=12).contains(&month) && (1..=31).contains(&day) {
        Some((month, day))
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use std::io::Write;

    #[test]
    fn parses_month_day_entries() {
        assert_eq!(parse_month_day("01-26"), Some((1, 26)));
        assert_eq!(parse_month_day("12-25"), Some((12, 25)));
        assert_eq!(parse_month_day("13-01"), None);
        assert_eq!(parse_month_day("junk"), None);
    }

    #[test]
    fn yaml_regions_extend_the_calendar() {
        let file: HolidaysFile =
            serde_yaml::from_str("regions:\n  DE:\n    - \"10-03\"\n    - \"bogus\"\n").unwrap();
        let mut calendar = Calendar::with_builtin();
        apply_holidays(&mut calendar, &file);
        // German Unity Day 2025 falls on a Friday
        let date = NaiveDate::from_ymd_opt(2025, 10, 3).unwrap();
        assert!(!calendar.is_working_day(date, "DE"));
    }

    #[test]
    fn explicit_file_loads_over_discovery() {
        let mut tmp = tempfile::NamedTempFile::new().unwrap();
        writeln!(tmp, "regions:\n  FR:\n    - \"07-14\"").unwrap();

        let paths = ConfigPaths {
            project_dir: None,
            user_dir: None,
        };
        let calendar = load_calendar(Some(tmp.path()), &paths).unwrap();
        // Bastille Day 2025 falls on a Monday
        let date = NaiveDate::from_ymd_opt(2025, 7, 14).unwrap();
        assert!(!calendar.is_working_day(date, "FR"));
    }

    #[test]
    fn missing_config_keeps_builtin_calendar() {
        let paths = ConfigPaths {
            project_dir: Some(PathBuf::from("/nonexistent/taskrank")),
            user_dir: None,
        };
        let calendar = load_calendar(None, &paths).unwrap();
        let republic_day = NaiveDate::from_ymd_opt(2026, 1, 26).unwrap();
        assert!(!calendar.is_working_day(republic_day, "IN"));
    }
}
