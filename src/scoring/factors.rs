//! The four factor calculators.
//!
//! Each step table is data, not branching logic: an ordered band list with
//! boundary values, linearly interpolated inside a band. New bands slot in
//! without restructuring control flow.

/// Nominal factor caps.
pub const URGENCY_MAX: f64 = 40.0;
pub const IMPORTANCE_MAX: f64 = 30.0;
pub const EFFORT_MAX: f64 = 15.0;
pub const DEPENDENCY_MAX: f64 = 15.0;

/// Urgency for an overdue task. More-overdue never exceeds this cap.
const URGENCY_OVERDUE: f64 = 40.0;
/// Urgency for a task due today.
const URGENCY_DUE_TODAY: f64 = 38.0;
/// Urgency for a task without a due date.
const URGENCY_NO_DUE_DATE: f64 = 10.0;
/// Floor for far-future due dates. Never reaches zero.
const URGENCY_FLOOR: f64 = 2.0;

/// A band over working days remaining, with linear interpolation between the
/// boundary point values.
struct DayBand {
    lo: i64,
    hi: i64,
    start: f64,
    end: f64,
}

impl DayBand {
    fn value_at(&self, days: i64) -> f64 {
        if self.hi == self.lo {
            return self.start;
        }
        let t = (days - self.lo) as f64 / (self.hi - self.lo) as f64;
        self.start + (self.end - self.start) * t
    }
}

const URGENCY_BANDS: &[DayBand] = &[
    DayBand { lo: 1, hi: 2, start: 35.0, end: 33.0 },
    DayBand { lo: 3, hi: 5, start: 30.0, end: 25.0 },
    DayBand { lo: 6, hi: 10, start: 20.0, end: 15.0 },
    DayBand { lo: 11, hi: 15, start: 15.0, end: 10.0 },
];

/// Urgency (0-40) from working days until due. Monotonically non-increasing
/// as the deadline recedes.
pub fn urgency(working_days_until: Option<i64>) -> (f64, String) {
    let days = match working_days_until {
        None => return (URGENCY_NO_DUE_DATE, "no due date".to_string()),
        Some(d) => d,
    };

    if days < 0 {
        let plural = if days == -1 { "day" } else { "days" };
        return (
            URGENCY_OVERDUE,
            format!("overdue by {} working {plural}", -days),
        );
    }
    if days == 0 {
        return (URGENCY_DUE_TODAY, "due today".to_string());
    }
    for band in URGENCY_BANDS {
        if days >= band.lo && days <= band.hi {
            let plural = if days == 1 { "day" } else { "days" };
            return (
                band.value_at(days),
                format!("due in {days} working {plural}"),
            );
        }
    }
    // Beyond the last band: keep decaying toward a small positive floor.
    let last = URGENCY_BANDS.last().expect("urgency bands are non-empty");
    let points = (last.end - (days - last.hi) as f64 * 0.5).max(URGENCY_FLOOR);
    (points, format!("due in {days} working days (far out)"))
}

/// Neutral default when importance is missing or non-numeric.
const IMPORTANCE_DEFAULT: f64 = 15.0;

/// Importance (0-30): linear scaling of the 1-10 rating, clamped.
pub fn importance(rating: Option<f64>) -> (f64, String) {
    match rating {
        None => (
            IMPORTANCE_DEFAULT,
            "no importance rating, neutral default".to_string(),
        ),
        Some(r) => {
            let clamped = r.clamp(1.0, 10.0);
            (
                clamped / 10.0 * IMPORTANCE_MAX,
                format!("importance {clamped}/10"),
            )
        }
    }
}

/// Neutral default when effort is missing or invalid.
const EFFORT_DEFAULT: f64 = 7.5;

/// Effort bands over hours, lower bound inclusive. `[lo, hi) -> points`.
const EFFORT_BANDS: &[(f64, f64, f64)] = &[
    (0.0, 1.0, 15.0),
    (1.0, 2.0, 12.0),
    (2.0, 4.0, 9.0),
    (4.0, 8.0, 6.0),
];

/// Effort (0-15), inverse relationship: quick wins score highest. Beyond the
/// last band the score decays linearly to a floor of 3.
pub fn effort(hours: Option<f64>) -> (f64, String) {
    let h = match hours {
        None => {
            return (
                EFFORT_DEFAULT,
                "no effort estimate, neutral default".to_string(),
            );
        }
        Some(h) => h,
    };

    for &(lo, hi, points) in EFFORT_BANDS {
        if h >= lo && h < hi {
            let label = if points == EFFORT_MAX {
                format!("quick win, about {h}h")
            } else {
                format!("estimated {h}h")
            };
            return (points, label);
        }
    }
    let points = (6.0 - (h - 8.0) * 0.25).max(3.0);
    (points, format!("large effort, {h}h"))
}

/// Dependency step table: dependent count threshold to points.
const DEPENDENCY_STEPS: &[(usize, f64)] = &[(0, 5.0), (1, 8.0), (2, 11.0)];

/// Dependency (0-15): tasks that block others rank higher, saturating at
/// three or more dependents.
pub fn dependency(dependent_count: usize) -> (f64, String) {
    let points = DEPENDENCY_STEPS
        .iter()
        .find(|(count, _)| *count == dependent_count)
        .map(|(_, points)| *points)
        .unwrap_or(DEPENDENCY_MAX);
    let label = match dependent_count {
        0 => "blocks no other tasks".to_string(),
        1 => "blocks 1 task".to_string(),
        n => format!("blocks {n} tasks"),
    };
    (points, label)
}
