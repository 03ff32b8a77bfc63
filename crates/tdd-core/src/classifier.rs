use crate::error::{Result, TddError};
use crate::types::Phase;
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Keyword sets
// ---------------------------------------------------------------------------

pub const RED_KEYWORDS: &[&str] = &[
    "failing test",
    "red phase",
    "test first",
    "write test",
    "add test",
    "create test",
    "test for",
    "failing",
];

pub const GREEN_KEYWORDS: &[&str] = &[
    "implement",
    "fix",
    "make pass",
    "green phase",
    "code to pass",
    "minimal code",
    "satisfy test",
];

pub const REFACTOR_KEYWORDS: &[&str] = &[
    "refactor",
    "optimize",
    "clean up",
    "improve",
    "restructure",
    "polish",
    "enhance",
];

/// Keywords that mark an action as belonging to one phase.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeywordRule {
    pub phase: Phase,
    pub keywords: Vec<String>,
}

impl KeywordRule {
    pub fn new<I, S>(phase: Phase, keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            phase,
            keywords: keywords
                .into_iter()
                .map(|k| k.into().trim().to_lowercase())
                .collect(),
        }
    }

    /// First keyword contained in `lowered`, if any.
    fn matched(&self, lowered: &str) -> Option<&str> {
        self.keywords
            .iter()
            .find(|k| !k.is_empty() && lowered.contains(k.as_str()))
            .map(|k| k.as_str())
    }
}

/// Glossary keyword sets in priority order: RED, GREEN, REFACTOR.
pub fn default_rules() -> Vec<KeywordRule> {
    vec![
        KeywordRule::new(Phase::Red, RED_KEYWORDS.iter().copied()),
        KeywordRule::new(Phase::Green, GREEN_KEYWORDS.iter().copied()),
        KeywordRule::new(Phase::Refactor, REFACTOR_KEYWORDS.iter().copied()),
    ]
}

// ---------------------------------------------------------------------------
// Classification (output)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Classification {
    pub phase: Phase,
    /// Keyword that decided the phase; `None` when the fallback was used.
    pub keyword: Option<String>,
}

// ---------------------------------------------------------------------------
// Classifier
// ---------------------------------------------------------------------------

pub struct Classifier {
    rules: Vec<KeywordRule>,
}

impl Default for Classifier {
    fn default() -> Self {
        Self::new(default_rules())
    }
}

impl Classifier {
    /// Rules are evaluated in the order given; the first one with a match wins.
    pub fn new(rules: Vec<KeywordRule>) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> &[KeywordRule] {
        &self.rules
    }

    /// Map an action description to a phase. Text without any known keyword
    /// stays in `fallback`.
    pub fn classify(&self, action: &str, fallback: Phase) -> Result<Phase> {
        Ok(self.explain(action, fallback)?.phase)
    }

    /// Like [`Classifier::classify`] but also reports the deciding keyword.
    pub fn explain(&self, action: &str, fallback: Phase) -> Result<Classification> {
        if action.trim().is_empty() {
            return Err(TddError::EmptyAction);
        }
        let lowered = action.to_lowercase();
        for rule in &self.rules {
            if let Some(keyword) = rule.matched(&lowered) {
                tracing::debug!(phase = %rule.phase, keyword, "classified action");
                return Ok(Classification {
                    phase: rule.phase,
                    keyword: Some(keyword.to_string()),
                });
            }
        }
        tracing::debug!(phase = %fallback, "no keyword matched, keeping phase");
        Ok(Classification {
            phase: fallback,
            keyword: None,
        })
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
