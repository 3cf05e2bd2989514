//! Working-day resolver.
//!
//! Weekends are never working days, independent of region. On top of that,
//! each region code selects a set of fixed-date holidays. Unknown region
//! codes fall back to weekends-only.

use chrono::{Datelike, NaiveDate, Weekday};
use std::collections::{BTreeSet, HashMap};
use tracing::debug;

/// Default region when the caller does not supply one.
pub const DEFAULT_REGION: &str = "IN";

/// Fixed-date national holidays, India.
const HOLIDAYS_IN: &[(u32, u32)] = &[
    (1, 26),  // Republic Day
    (5, 1),   // May Day
    (8, 15),  // Independence Day
    (10, 2),  // Gandhi Jayanti
    (12, 25), // Christmas
];

/// Fixed-date national holidays, United States.
const HOLIDAYS_US: &[(u32, u32)] = &[
    (1, 1),   // New Year's Day
    (6, 19),  // Juneteenth
    (7, 4),   // Independence Day
    (11, 11), // Veterans Day
    (12, 25), // Christmas
];

/// Region-keyed holiday tables as (month, day) pairs applied to any year.
#[derive(Debug, Clone)]
pub struct Calendar {
    regions: HashMap<String, BTreeSet<(u32, u32)>>,
}

impl Calendar {
    /// Calendar with only the built-in region tables.
    pub fn with_builtin() -> Self {
        let mut regions = HashMap::new();
        regions.insert("IN".to_string(), HOLIDAYS_IN.iter().copied().collect());
        regions.insert("US".to_string(), HOLIDAYS_US.iter().copied().collect());
        Self { regions }
    }

    /// Calendar with no holiday data at all (weekends-only for every region).
    pub fn empty() -> Self {
        Self {
            regions: HashMap::new(),
        }
    }

    /// Add or extend a region's holiday set. Merging into a built-in region
    /// keeps the built-in dates.
    pub fn add_region_days(
        &mut self,
        region: &str,
        days: impl IntoIterator<Item = (u32, u32)>,
    ) {
        self.regions
            .entry(region.to_uppercase())
            .or_default()
            .extend(days);
    }

    pub fn known_region(&self, region: &str) -> bool {
        self.regions.contains_key(&region.to_uppercase())
    }

    /// True when the date is neither a weekend day nor a regional holiday.
    pub fn is_working_day(&self, date: NaiveDate, region: &str) -> bool {
        if matches!(date.weekday(), Weekday::Sat | Weekday::Sun) {
            return false;
        }
        match self.regions.get(&region.to_uppercase()) {
            Some(holidays) => !holidays.contains(&(date.month(), date.day())),
            None => true,
        }
    }

    /// Working days from `today` to `due`, exclusive of `today` and inclusive
    /// of `due`. A task due today yields 0. A past due date yields the
    /// negated count of working days elapsed in `(due, today]`.
    pub fn working_days_until(&self, today: NaiveDate, due: NaiveDate, region: &str) -> i64 {
        if !self.known_region(region) {
            debug!(region, "unknown calendar region, counting weekends only");
        }
        if due >= today {
            self.count_working_days(today, due, region)
        } else {
            -self.count_working_days(due, today, region)
        }
    }

    /// Working days in `(from, to]`, walking each calendar day.
    fn count_working_days(&self, from: NaiveDate, to: NaiveDate, region: &str) -> i64 {
        let mut count = 0;
        let mut day = from;
        while day < to {
            day = match day.succ_opt() {
                Some(next) => next,
                None => break, // NaiveDate::MAX, out of representable range
            };
            if self.is_working_day(day, region) {
                count += 1;
            }
        }
        count
    }
}

impl Default for Calendar {
    fn default() -> Self {
        Self::with_builtin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn weekends_are_never_working_days() {
        let cal = Calendar::with_builtin();
        // 2026-01-03 is a Saturday, 2026-01-04 a Sunday
        assert!(!cal.is_working_day(date(2026, 1, 3), "IN"));
        assert!(!cal.is_working_day(date(2026, 1, 4), "ZZ"));
        assert!(cal.is_working_day(date(2026, 1, 5), "IN"));
    }

    #[test]
    fn regional_holiday_is_not_a_working_day() {
        let cal = Calendar::with_builtin();
        // Republic Day 2026 falls on a Monday
        assert!(!cal.is_working_day(date(2026, 1, 26), "IN"));
        // Same date is a working day in the US table
        assert!(cal.is_working_day(date(2026, 1, 26), "US"));
    }

    #[test]
    fn friday_to_monday_is_one_working_day() {
        let cal = Calendar::with_builtin();
        let friday = date(2026, 1, 2);
        let monday = date(2026, 1, 5);
        assert_eq!(cal.working_days_until(friday, monday, "IN"), 1);
    }

    #[test]
    fn due_today_counts_zero() {
        let cal = Calendar::with_builtin();
        let today = date(2026, 3, 2);
        assert_eq!(cal.working_days_until(today, today, "IN"), 0);
    }

    #[test]
    fn holiday_is_skipped_in_count() {
        let cal = Calendar::with_builtin();
        // Fri 2026-01-23 to Tue 2026-01-27 spans a weekend plus Republic Day
        let today = date(2026, 1, 23);
        let due = date(2026, 1, 27);
        assert_eq!(cal.working_days_until(today, due, "IN"), 1);
        // Unknown region keeps the Monday
        assert_eq!(cal.working_days_until(today, due, "ZZ"), 2);
    }

    #[test]
    fn overdue_counts_negative() {
        let cal = Calendar::with_builtin();
        // Due Fri 2026-01-02, today Wed 2026-01-07: Mon/Tue/Wed elapsed
        let today = date(2026, 1, 7);
        let due = date(2026, 1, 2);
        assert_eq!(cal.working_days_until(today, due, "IN"), -3);
    }

    #[test]
    fn lowercase_region_matches_builtin_table() {
        let cal = Calendar::with_builtin();
        // Gandhi Jayanti 2026 falls on a Friday
        assert!(!cal.is_working_day(date(2026, 10, 2), "in"));
        assert!(cal.known_region("us"));
    }

    #[test]
    fn added_region_days_extend_the_table() {
        let mut cal = Calendar::with_builtin();
        cal.add_region_days("DE", [(10, 3)]);
        // German Unity Day 2025 falls on a Friday
        assert!(!cal.is_working_day(date(2025, 10, 3), "DE"));
        // Merging into a built-in keeps existing dates
        cal.add_region_days("IN", [(11, 1)]);
        assert!(!cal.is_working_day(date(2026, 1, 26), "IN"));
    }
}
