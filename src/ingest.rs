//! Ingestion boundary: alias-tolerant records and batch normalization.
//!
//! Callers send task records under more than one field-naming convention
//! (`due_date` vs `dueDate` vs `deadline`, `importance` vs `priority`, and
//! so on). Everything is normalized to the canonical [`Task`] shape here,
//! before any computation; the scoring logic never performs conditional
//! field lookups.

use chrono::{NaiveDate, NaiveDateTime};
use serde::Deserialize;
use serde_json::Value;
use tracing::warn;

use crate::error::{EngineError, EngineResult};
use crate::types::Task;

/// A task record as received from the caller, before normalization.
///
/// Numeric-ish fields are captured as raw JSON values so that a non-numeric
/// rating degrades to its neutral default instead of failing
/// deserialization of the whole batch.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawTask {
    #[serde(alias = "task_id")]
    pub id: Option<String>,
    #[serde(alias = "title")]
    pub description: Option<String>,
    #[serde(alias = "dueDate", alias = "deadline")]
    pub due_date: Option<Value>,
    #[serde(alias = "priority")]
    pub importance: Option<Value>,
    #[serde(alias = "effortHours", alias = "estimated_hours", alias = "effort")]
    pub effort_hours: Option<Value>,
    #[serde(alias = "depends_on", alias = "deps")]
    pub dependencies: Option<Vec<String>>,
    #[serde(alias = "is_done", alias = "completed")]
    pub done: bool,
}

/// Normalize a raw batch to canonical tasks.
///
/// Aborts on duplicate ids, missing ids, and unparseable due dates. Missing
/// or non-numeric importance/effort degrade to `None` with a warning; the
/// factor calculators substitute the neutral defaults.
pub fn normalize_batch(batch: &[RawTask]) -> EngineResult<Vec<Task>> {
    let mut seen = std::collections::HashSet::new();
    let mut tasks = Vec::with_capacity(batch.len());

    for (index, raw) in batch.iter().enumerate() {
        let id = match &raw.id {
            Some(id) if !id.is_empty() => id.clone(),
            _ => return Err(EngineError::MissingId { index }),
        };
        if !seen.insert(id.clone()) {
            return Err(EngineError::duplicate_id(id));
        }

        tasks.push(Task {
            due_date: parse_due_date(&id, raw.due_date.as_ref())?,
            importance: numeric_or_default(&id, "importance", raw.importance.as_ref()),
            effort_hours: effort_or_default(&id, raw.effort_hours.as_ref()),
            description: raw.description.clone().unwrap_or_default(),
            dependencies: raw.dependencies.clone().unwrap_or_default(),
            done: raw.done,
            id,
        });
    }

    Ok(tasks)
}

/// Parse an optional due date. A present but unparseable value is a
/// validation error; absence is a valid "someday" state.
fn parse_due_date(id: &str, value: Option<&Value>) -> EngineResult<Option<NaiveDate>> {
    let value = match value {
        None | Some(Value::Null) => return Ok(None),
        Some(v) => v,
    };
    let text = value.as_str().ok_or_else(|| {
        EngineError::invalid_field(id, "due_date", format!("expected a date string, got {value}"))
    })?;

    if let Ok(date) = NaiveDate::parse_from_str(text, "%Y-%m-%d") {
        return Ok(Some(date));
    }
    // Tolerate full ISO timestamps by taking the date part.
    if let Ok(dt) = NaiveDateTime::parse_from_str(text, "%Y-%m-%dT%H:%M:%S") {
        return Ok(Some(dt.date()));
    }
    Err(EngineError::invalid_field(
        id,
        "due_date",
        format!("unparseable date: {text:?}"),
    ))
}

/// Extract a number from a raw optional field, degrading to `None` (the
/// calculators' neutral default) when the value is not numeric.
fn numeric_or_default(id: &str, field: &'static str, value: Option<&Value>) -> Option<f64> {
    match value {
        None | Some(Value::Null) => None,
        Some(v) => match v.as_f64() {
            Some(n) => Some(n),
            None => {
                warn!(task = id, field, value = %v, "non-numeric value, using neutral default");
                None
            }
        },
    }
}

/// Effort additionally rejects negative estimates as invalid.
fn effort_or_default(id: &str, value: Option<&Value>) -> Option<f64> {
    match numeric_or_default(id, "effort_hours", value) {
        Some(h) if h < 0.0 => {
            warn!(task = id, hours = h, "negative effort estimate, using neutral default");
            None
        }
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn raw(v: serde_json::Value) -> RawTask {
        serde_json::from_value(v).unwrap()
    }

    #[test]
    fn aliases_map_to_canonical_fields() {
        let task = raw(json!({
            "task_id": "t1",
            "title": "write report",
            "deadline": "2026-03-02",
            "priority": 8,
            "estimated_hours": 2.5,
            "depends_on": ["t0"],
            "is_done": true
        }));
        let tasks = normalize_batch(&[task]).unwrap();
        let t = &tasks[0];
        assert_eq!(t.id, "t1");
        assert_eq!(t.description, "write report");
        assert_eq!(t.due_date, NaiveDate::from_ymd_opt(2026, 3, 2));
        assert_eq!(t.importance, Some(8.0));
        assert_eq!(t.effort_hours, Some(2.5));
        assert_eq!(t.dependencies, vec!["t0"]);
        assert!(t.done);
    }

    #[test]
    fn camel_case_due_date_is_accepted() {
        let task = raw(json!({ "id": "t1", "dueDate": "2026-03-02" }));
        let tasks = normalize_batch(&[task]).unwrap();
        assert!(tasks[0].due_date.is_some());
    }

    #[test]
    fn iso_timestamp_due_date_takes_date_part() {
        let task = raw(json!({ "id": "t1", "due_date": "2026-03-02T09:30:00" }));
        let tasks = normalize_batch(&[task]).unwrap();
        assert_eq!(tasks[0].due_date, NaiveDate::from_ymd_opt(2026, 3, 2));
    }

    #[test]
    fn unparseable_due_date_is_a_validation_error() {
        let task = raw(json!({ "id": "t1", "due_date": "not-a-date" }));
        let err = normalize_batch(&[task]).unwrap_err();
        assert!(matches!(
            err,
            EngineError::InvalidField { field: "due_date", .. }
        ));
    }

    #[test]
    fn duplicate_id_aborts_the_batch() {
        let a = raw(json!({ "id": "t1" }));
        let b = raw(json!({ "id": "t1" }));
        let err = normalize_batch(&[a, b]).unwrap_err();
        assert!(matches!(err, EngineError::DuplicateId { .. }));
    }

    #[test]
    fn missing_id_aborts_the_batch() {
        let task = raw(json!({ "title": "anonymous" }));
        let err = normalize_batch(&[task]).unwrap_err();
        assert!(matches!(err, EngineError::MissingId { index: 0 }));
    }

    #[test]
    fn non_numeric_importance_degrades_to_none() {
        let task = raw(json!({ "id": "t1", "importance": "very" }));
        let tasks = normalize_batch(&[task]).unwrap();
        assert_eq!(tasks[0].importance, None);
    }

    #[test]
    fn negative_effort_degrades_to_none() {
        let task = raw(json!({ "id": "t1", "effort_hours": -2 }));
        let tasks = normalize_batch(&[task]).unwrap();
        assert_eq!(tasks[0].effort_hours, None);
    }

    #[test]
    fn missing_optional_fields_are_not_errors() {
        let task = raw(json!({ "id": "t1" }));
        let tasks = normalize_batch(&[task]).unwrap();
        let t = &tasks[0];
        assert!(t.due_date.is_none());
        assert!(t.importance.is_none());
        assert!(t.effort_hours.is_none());
        assert!(t.dependencies.is_empty());
        assert!(!t.done);
    }
}
