use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// Phase
// ---------------------------------------------------------------------------

/// A step of the Red-Green-Refactor workflow. `Planning` is only ever the
/// state of a workflow that has not logged an action yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Phase {
    Planning,
    Red,
    Green,
    Refactor,
}

impl Phase {
    pub fn all() -> &'static [Phase] {
        &[Phase::Planning, Phase::Red, Phase::Green, Phase::Refactor]
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Phase::Planning => "PLANNING",
            Phase::Red => "RED",
            Phase::Green => "GREEN",
            Phase::Refactor => "REFACTOR",
        }
    }

    /// Label used in the markdown reports.
    pub fn label(self) -> &'static str {
        match self {
            Phase::Planning => "📋 PLANNING",
            Phase::Red => "🔴 RED",
            Phase::Green => "🟢 GREEN",
            Phase::Refactor => "🔵 REFACTOR",
        }
    }

    /// The step the cycle normally takes after this one.
    pub fn suggested_next(self) -> Phase {
        match self {
            Phase::Planning => Phase::Red,
            Phase::Red => Phase::Green,
            Phase::Green => Phase::Refactor,
            Phase::Refactor => Phase::Red,
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Phase {
    type Err = crate::error::TddError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "planning" => Ok(Phase::Planning),
            "red" => Ok(Phase::Red),
            "green" => Ok(Phase::Green),
            "refactor" => Ok(Phase::Refactor),
            _ => Err(crate::error::TddError::InvalidPhase(s.to_string())),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
