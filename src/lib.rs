//! Taskrank: task priority scoring and dependency analysis.
//!
//! The engine maps a batch of task records plus a strategy selector to
//! per-task composite scores (0-100) with explanations, a ranked suggestion
//! list, and dependency-graph diagnostics. It is a synchronous, side-effect
//! free computation over one in-memory snapshot per call.

pub mod calendar;
pub mod cli;
pub mod config;
pub mod error;
pub mod format;
pub mod graph;
pub mod ingest;
pub mod scoring;
pub mod types;

pub use calendar::Calendar;
pub use error::{EngineError, EngineResult};
pub use ingest::RawTask;
pub use scoring::strategy::Strategy;
pub use scoring::{DEFAULT_SUGGESTION_COUNT, ScoreOptions, analyze, suggest};
pub use types::{Analysis, GraphReport, ScoreBreakdown, ScoredTask, Suggestions, Task};
