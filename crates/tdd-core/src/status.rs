use crate::types::Phase;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// ActionRecord
// ---------------------------------------------------------------------------

/// One logged action. Never mutated once it is in the history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionRecord {
    pub description: String,
    pub inferred_phase: Phase,
    pub timestamp: DateTime<Utc>,
    /// Roadmap phase the action was logged under, if a roadmap is in use.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub roadmap_phase: Option<String>,
}

impl ActionRecord {
    pub fn new(description: impl Into<String>, inferred_phase: Phase, timestamp: DateTime<Utc>) -> Self {
        Self {
            description: description.into(),
            inferred_phase,
            timestamp,
            roadmap_phase: None,
        }
    }

    pub fn with_roadmap_phase(mut self, slug: Option<String>) -> Self {
        self.roadmap_phase = slug;
        self
    }
}

// ---------------------------------------------------------------------------
// Presentation-only annotations
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoadmapProgress {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_phase: Option<String>,
    #[serde(default)]
    pub milestones_completed: Vec<String>,
}

impl RoadmapProgress {
    /// Record a milestone. Returns false if it was already completed.
    pub fn complete_milestone(&mut self, name: &str) -> bool {
        let name = name.trim();
        if self.milestones_completed.iter().any(|m| m == name) {
            return false;
        }
        self.milestones_completed.push(name.to_string());
        self.milestones_completed.sort();
        true
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TestResults {
    #[serde(default)]
    pub last_run: Option<DateTime<Utc>>,
    #[serde(default)]
    pub passing: u32,
    #[serde(default)]
    pub failing: u32,
    #[serde(default)]
    pub coverage: Option<f64>,
}

// ---------------------------------------------------------------------------
// WorkflowStatus
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkflowStatus {
    pub current_phase: Phase,
    pub action_count: u64,
    pub last_action: Option<ActionRecord>,
    pub history: Vec<ActionRecord>,
    #[serde(default)]
    pub roadmap: RoadmapProgress,
    #[serde(default)]
    pub test_results: TestResults,
}

impl Default for WorkflowStatus {
    fn default() -> Self {
        Self {
            current_phase: Phase::Planning,
            action_count: 0,
            last_action: None,
            history: Vec::new(),
            roadmap: RoadmapProgress::default(),
            test_results: TestResults::default(),
        }
    }
}

impl WorkflowStatus {
    /// Append a new action for `phase`. Pure: persistence is up to the caller.
    pub fn record(self, description: impl Into<String>, phase: Phase, now: DateTime<Utc>) -> Self {
        self.record_action(ActionRecord::new(description, phase, now))
    }

    pub fn record_action(mut self, action: ActionRecord) -> Self {
        self.current_phase = action.inferred_phase;
        self.history.push(action.clone());
        self.action_count = self.history.len() as u64;
        self.last_action = Some(action);
        self
    }

    /// Check the invariants a persisted status must satisfy.
    pub fn check_invariants(&self) -> std::result::Result<(), String> {
        if self.action_count != self.history.len() as u64 {
            return Err(format!(
                "action_count is {} but history has {} entries",
                self.action_count,
                self.history.len()
            ));
        }
        if self.last_action.as_ref() != self.history.last() {
            return Err("last_action does not match the last history entry".to_string());
        }
        let expected = self
            .last_action
            .as_ref()
            .map(|a| a.inferred_phase)
            .unwrap_or(Phase::Planning);
        if self.current_phase != expected {
            return Err(format!(
                "current_phase is {} but the last logged action implies {expected}",
                self.current_phase
            ));
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
