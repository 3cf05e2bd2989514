//! Core types for the taskrank engine.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::scoring::strategy::Strategy;

/// Canonical task shape after ingestion normalization.
///
/// Raw input records arrive under several field-naming conventions; see
/// [`crate::ingest`] for the aliases accepted at the boundary. Everything
/// past normalization works only with this shape.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Task {
    pub id: String,
    /// Free text; never interpreted by the engine.
    pub description: String,
    pub due_date: Option<NaiveDate>,
    /// Nominal domain 1-10. Out-of-range values are clamped at scoring time.
    pub importance: Option<f64>,
    pub effort_hours: Option<f64>,
    /// Ids of tasks that must complete before this one. May reference ids
    /// outside the batch; dangling references are tolerated, not resolved.
    pub dependencies: Vec<String>,
    pub done: bool,
}

/// Which of the four factors a score component belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Factor {
    Urgency,
    Importance,
    Effort,
    Dependency,
}

impl Factor {
    pub fn as_str(&self) -> &'static str {
        match self {
            Factor::Urgency => "urgency",
            Factor::Importance => "importance",
            Factor::Effort => "effort",
            Factor::Dependency => "dependency",
        }
    }
}

/// One factor's contribution: raw band points, strategy-weighted points, and
/// the band rule that produced them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FactorScore {
    pub raw: f64,
    pub weighted: f64,
    pub explanation: String,
}

/// Full per-task score decomposition. Recomputed every run, never persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub urgency: FactorScore,
    pub importance: FactorScore,
    pub effort: FactorScore,
    pub dependency: FactorScore,
    /// Weighted sum clamped to [0, 100]. Clamping applies to the sum only;
    /// individual weighted factors may exceed their nominal caps under
    /// extreme strategy multipliers.
    pub total: f64,
}

impl ScoreBreakdown {
    /// The factor contributing the most weighted points. Ties resolve in
    /// fixed order: urgency, importance, effort, dependency.
    pub fn dominant_factor(&self) -> Factor {
        let mut best = (Factor::Urgency, self.urgency.weighted);
        for (factor, score) in [
            (Factor::Importance, self.importance.weighted),
            (Factor::Effort, self.effort.weighted),
            (Factor::Dependency, self.dependency.weighted),
        ] {
            if score > best.1 {
                best = (factor, score);
            }
        }
        best.0
    }

    pub fn factor(&self, f: Factor) -> &FactorScore {
        match f {
            Factor::Urgency => &self.urgency,
            Factor::Importance => &self.importance,
            Factor::Effort => &self.effort,
            Factor::Dependency => &self.dependency,
        }
    }
}

/// A scored, non-done task in analysis output.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoredTask {
    pub id: String,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<NaiveDate>,
    /// Working days from "today" to the due date; negative when overdue,
    /// absent when the task has no due date.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub working_days_until: Option<i64>,
    pub dependent_count: usize,
    pub score: f64,
    pub breakdown: ScoreBreakdown,
}

/// Dependency-graph diagnostics for one batch.
///
/// Rebuilt from scratch each run; no graph state survives between calls.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GraphReport {
    /// Per-task count of in-batch tasks that depend on it.
    pub dependent_counts: HashMap<String, usize>,
    /// Each detected cycle as the ordered id sequence forming the loop
    /// (closing edge back to the first id is implied). A self-dependency
    /// appears as a single-element cycle.
    pub cycles: Vec<Vec<String>>,
}

impl GraphReport {
    pub fn dependent_count(&self, id: &str) -> usize {
        self.dependent_counts.get(id).copied().unwrap_or(0)
    }

    pub fn has_cycles(&self) -> bool {
        !self.cycles.is_empty()
    }
}

/// Output of the analyze operation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Analysis {
    pub strategy: Strategy,
    pub today: NaiveDate,
    pub total_tasks: usize,
    /// Tasks excluded from scoring because they are marked done.
    pub skipped_done: usize,
    /// Scored tasks, descending by final score.
    pub tasks: Vec<ScoredTask>,
    /// Advisory cycle report for the whole batch. Cycles never block scoring.
    pub graph: GraphReport,
}

/// One ranked suggestion with its dominant-factor rationale.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Suggestion {
    #[serde(flatten)]
    pub task: ScoredTask,
    pub dominant_factor: Factor,
    pub reason: String,
}

/// Output of the suggest operation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Suggestions {
    pub strategy: Strategy,
    pub today: NaiveDate,
    pub suggestions: Vec<Suggestion>,
    pub graph: GraphReport,
}
