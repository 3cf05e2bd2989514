//! Fixed strategy presets and their factor multipliers.

use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// One of the four preset scoring strategies. No user-defined strategies.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Strategy {
    #[default]
    SmartBalance,
    FastestWins,
    HighImpact,
    DeadlineDriven,
}

/// Multipliers applied to the four raw factor scores before summation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Weights {
    pub urgency: f64,
    pub importance: f64,
    pub effort: f64,
    pub dependency: f64,
}

impl Strategy {
    /// Parse a strategy name. Unknown names are a validation error rather
    /// than a silent fallback, since the caller explicitly selected one.
    pub fn from_name(name: &str) -> EngineResult<Self> {
        match name.to_lowercase().replace('-', "_").as_str() {
            "smart_balance" => Ok(Strategy::SmartBalance),
            "fastest_wins" => Ok(Strategy::FastestWins),
            "high_impact" => Ok(Strategy::HighImpact),
            "deadline_driven" => Ok(Strategy::DeadlineDriven),
            _ => Err(EngineError::UnknownStrategy(name.to_string())),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Strategy::SmartBalance => "smart_balance",
            Strategy::FastestWins => "fastest_wins",
            Strategy::HighImpact => "high_impact",
            Strategy::DeadlineDriven => "deadline_driven",
        }
    }

    /// The dependency multiplier is 1.0 across all presets; only the other
    /// three factors vary.
    pub fn weights(&self) -> Weights {
        match self {
            Strategy::SmartBalance => Weights {
                urgency: 1.0,
                importance: 1.0,
                effort: 1.0,
                dependency: 1.0,
            },
            Strategy::FastestWins => Weights {
                urgency: 0.5,
                importance: 0.7,
                effort: 2.0,
                dependency: 1.0,
            },
            Strategy::HighImpact => Weights {
                urgency: 0.6,
                importance: 2.5,
                effort: 0.3,
                dependency: 1.0,
            },
            Strategy::DeadlineDriven => Weights {
                urgency: 2.5,
                importance: 1.0,
                effort: 1.0,
                dependency: 1.0,
            },
        }
    }
}
