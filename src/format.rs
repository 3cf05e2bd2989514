//! Output formatting for analyses and suggestions (markdown and JSON).

use anyhow::Result;

use crate::types::{Analysis, ScoredTask, Suggestions};

/// Output format for engine results.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Json,
    Markdown,
}

impl OutputFormat {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "json" => Some(OutputFormat::Json),
            "markdown" | "md" => Some(OutputFormat::Markdown),
            _ => None,
        }
    }
}

/// Render an analysis in the requested format.
pub fn render_analysis(analysis: &Analysis, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(analysis)?),
        OutputFormat::Markdown => Ok(format_analysis_markdown(analysis)),
    }
}

/// Render suggestions in the requested format.
pub fn render_suggestions(suggestions: &Suggestions, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(suggestions)?),
        OutputFormat::Markdown => Ok(format_suggestions_markdown(suggestions)),
    }
}

/// Format a full analysis as markdown.
pub fn format_analysis_markdown(analysis: &Analysis) -> String {
    let mut md = String::new();

    md.push_str(&format!(
        "# Task Analysis ({} scored, strategy: {})\n\n",
        analysis.tasks.len(),
        analysis.strategy.as_str()
    ));

    if analysis.skipped_done > 0 {
        md.push_str(&format!(
            "_{} completed task(s) excluded from ranking._\n\n",
            analysis.skipped_done
        ));
    }

    push_cycle_warning(&mut md, &analysis.graph.cycles);

    for (rank, task) in analysis.tasks.iter().enumerate() {
        md.push_str(&format_task_markdown(rank + 1, task));
    }

    md
}

/// Format a suggestion list as markdown.
pub fn format_suggestions_markdown(suggestions: &Suggestions) -> String {
    let mut md = String::new();

    md.push_str(&format!(
        "# Suggested Tasks (top {}, strategy: {})\n\n",
        suggestions.suggestions.len(),
        suggestions.strategy.as_str()
    ));

    push_cycle_warning(&mut md, &suggestions.graph.cycles);

    for (rank, suggestion) in suggestions.suggestions.iter().enumerate() {
        let task = &suggestion.task;
        md.push_str(&format!(
            "{}. **{}** (`{}`) - {:.1} points\n",
            rank + 1,
            display_title(task),
            task.id,
            task.score
        ));
        md.push_str(&format!(
            "   - why: {} ({})\n",
            suggestion.reason,
            suggestion.dominant_factor.as_str()
        ));
    }

    md
}

fn display_title(task: &ScoredTask) -> &str {
    if task.description.is_empty() {
        &task.id
    } else {
        &task.description
    }
}

fn push_cycle_warning(md: &mut String, cycles: &[Vec<String>]) {
    if cycles.is_empty() {
        return;
    }
    md.push_str("## Warning: circular dependencies\n\n");
    for cycle in cycles {
        let loop_ids: Vec<String> = cycle.iter().map(|id| format!("`{id}`")).collect();
        md.push_str(&format!("- {}\n", loop_ids.join(" -> ")));
    }
    md.push('\n');
}

fn format_task_markdown(rank: usize, task: &ScoredTask) -> String {
    let mut md = String::new();

    md.push_str(&format!(
        "## {}. {} - {:.1}\n",
        rank,
        display_title(task),
        task.score
    ));
    md.push_str(&format!("- **id**: `{}`\n", task.id));
    if let Some(due) = task.due_date {
        let days = task
            .working_days_until
            .map(|d| format!(" ({d} working days)"))
            .unwrap_or_default();
        md.push_str(&format!("- **due**: {due}{days}\n"));
    }

    for factor in [
        &task.breakdown.urgency,
        &task.breakdown.importance,
        &task.breakdown.effort,
        &task.breakdown.dependency,
    ] {
        md.push_str(&format!(
            "- {:.1} pts ({:.1} raw): {}\n",
            factor.weighted, factor.raw, factor.explanation
        ));
    }

    md.push('\n');
    md
}
