//! Scoring orchestration: per-task composite scores, batch analysis, and
//! top-N suggestion ranking.

pub mod factors;
pub mod strategy;

use chrono::NaiveDate;
use tracing::debug;

use crate::calendar::Calendar;
use crate::error::EngineResult;
use crate::graph::analyze_graph;
use crate::ingest::{RawTask, normalize_batch};
use crate::types::{
    Analysis, FactorScore, ScoreBreakdown, ScoredTask, Suggestion, Suggestions, Task,
};
use strategy::Strategy;

/// Default number of suggestions returned by the suggest operation.
pub const DEFAULT_SUGGESTION_COUNT: usize = 3;

/// Inputs shared by every task in one scoring run. "Today" is injected so
/// identical input always produces identical output.
#[derive(Debug, Clone)]
pub struct ScoreOptions {
    pub strategy: Strategy,
    pub region: String,
    pub today: NaiveDate,
    pub calendar: Calendar,
}

impl ScoreOptions {
    pub fn new(strategy: Strategy, region: impl Into<String>, today: NaiveDate) -> Self {
        Self {
            strategy,
            region: region.into(),
            today,
            calendar: Calendar::with_builtin(),
        }
    }

    pub fn with_calendar(mut self, calendar: Calendar) -> Self {
        self.calendar = calendar;
        self
    }
}

/// Score one task. Pure function of the task's fields, the precomputed
/// dependent count, and the strategy weights.
pub fn score_task(
    task: &Task,
    working_days_until: Option<i64>,
    dependent_count: usize,
    strategy: Strategy,
) -> ScoreBreakdown {
    let weights = strategy.weights();

    let (urgency_raw, urgency_why) = factors::urgency(working_days_until);
    let (importance_raw, importance_why) = factors::importance(task.importance);
    let (effort_raw, effort_why) = factors::effort(task.effort_hours);
    let (dependency_raw, dependency_why) = factors::dependency(dependent_count);

    let urgency = FactorScore {
        raw: urgency_raw,
        weighted: urgency_raw * weights.urgency,
        explanation: urgency_why,
    };
    let importance = FactorScore {
        raw: importance_raw,
        weighted: importance_raw * weights.importance,
        explanation: importance_why,
    };
    let effort = FactorScore {
        raw: effort_raw,
        weighted: effort_raw * weights.effort,
        explanation: effort_why,
    };
    let dependency = FactorScore {
        raw: dependency_raw,
        weighted: dependency_raw * weights.dependency,
        explanation: dependency_why,
    };

    // Extreme multipliers can push the sum past 100 or a factor past its
    // nominal cap; only the final sum is clamped.
    let total = (urgency.weighted + importance.weighted + effort.weighted + dependency.weighted)
        .clamp(0.0, 100.0);

    ScoreBreakdown {
        urgency,
        importance,
        effort,
        dependency,
        total,
    }
}

/// Score every non-done task in the batch and attach the batch-wide
/// dependency diagnostics. Cycles are advisory; they never abort the run.
pub fn analyze(batch: &[RawTask], opts: &ScoreOptions) -> EngineResult<Analysis> {
    let tasks = normalize_batch(batch)?;
    let graph = analyze_graph(&tasks);

    debug!(
        total = tasks.len(),
        strategy = opts.strategy.as_str(),
        region = %opts.region,
        "scoring batch"
    );

    let mut scored: Vec<ScoredTask> = tasks
        .iter()
        .filter(|t| !t.done)
        .map(|task| {
            let days = task
                .due_date
                .map(|due| opts.calendar.working_days_until(opts.today, due, &opts.region));
            let dependent_count = graph.dependent_count(&task.id);
            let breakdown = score_task(task, days, dependent_count, opts.strategy);
            ScoredTask {
                id: task.id.clone(),
                description: task.description.clone(),
                due_date: task.due_date,
                working_days_until: days,
                dependent_count,
                score: breakdown.total,
                breakdown,
            }
        })
        .collect();

    let skipped_done = tasks.len() - scored.len();

    // Descending by score; ties go to the more urgent task (fewer working
    // days remaining, overdue being most urgent, no due date least). A
    // stable sort keeps remaining ties in input order.
    scored.sort_by(|a, b| {
        b.score
            .partial_cmp(&a.score)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| tie_break_days(a).cmp(&tie_break_days(b)))
    });

    Ok(Analysis {
        strategy: opts.strategy,
        today: opts.today,
        total_tasks: tasks.len(),
        skipped_done,
        tasks: scored,
        graph,
    })
}

fn tie_break_days(task: &ScoredTask) -> i64 {
    task.working_days_until.unwrap_or(i64::MAX)
}

/// Rank the batch and return the top `top_n` tasks, each annotated with the
/// factor that contributed the most weighted points.
pub fn suggest(batch: &[RawTask], opts: &ScoreOptions, top_n: usize) -> EngineResult<Suggestions> {
    let analysis = analyze(batch, opts)?;

    let suggestions = analysis
        .tasks
        .into_iter()
        .take(top_n)
        .map(|task| {
            let dominant_factor = task.breakdown.dominant_factor();
            let reason = task.breakdown.factor(dominant_factor).explanation.clone();
            Suggestion {
                task,
                dominant_factor,
                reason,
            }
        })
        .collect();

    Ok(Suggestions {
        strategy: opts.strategy,
        today: opts.today,
        suggestions,
        graph: analysis.graph,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bare_task(id: &str) -> Task {
        Task {
            id: id.to_string(),
            description: String::new(),
            due_date: None,
            importance: None,
            effort_hours: None,
            dependencies: Vec::new(),
            done: false,
        }
    }

    #[test]
    fn defaults_only_task_scores_in_range() {
        let breakdown = score_task(&bare_task("t"), None, 0, Strategy::SmartBalance);
        // 10 + 15 + 7.5 + 5
        assert_eq!(breakdown.total, 37.5);
    }

    #[test]
    fn clamp_applies_to_the_sum_not_per_factor() {
        let mut task = bare_task("t");
        task.effort_hours = Some(0.5);
        let breakdown = score_task(&task, Some(0), 3, Strategy::FastestWins);
        // Raw effort 15 doubled to 30, past its nominal 15-point cap.
        assert_eq!(breakdown.effort.weighted, 30.0);
        assert!(breakdown.total <= 100.0);
    }

    #[test]
    fn deadline_driven_can_exceed_and_clamps_at_100() {
        let mut task = bare_task("t");
        task.importance = Some(10.0);
        task.effort_hours = Some(0.5);
        // 40 * 2.5 + 30 + 15 + 15 = 160 before clamping
        let breakdown = score_task(&task, Some(-2), 3, Strategy::DeadlineDriven);
        assert_eq!(breakdown.total, 100.0);
    }

    #[test]
    fn dominant_factor_reports_largest_weighted_share() {
        let mut task = bare_task("t");
        task.importance = Some(10.0);
        let breakdown = score_task(&task, Some(30), 0, Strategy::HighImpact);
        assert_eq!(
            breakdown.dominant_factor(),
            crate::types::Factor::Importance
        );
    }
}
