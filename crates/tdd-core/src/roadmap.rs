use crate::error::{Result, TddError};
use crate::paths;
use crate::status::WorkflowStatus;
use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// Priority
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    Critical,
    High,
    #[default]
    Medium,
    Low,
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Priority::Critical => "critical",
            Priority::High => "high",
            Priority::Medium => "medium",
            Priority::Low => "low",
        };
        f.write_str(s)
    }
}

impl std::str::FromStr for Priority {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "critical" => Ok(Priority::Critical),
            "high" => Ok(Priority::High),
            "medium" => Ok(Priority::Medium),
            "low" => Ok(Priority::Low),
            _ => Err(format!("unknown priority '{s}' (critical, high, medium, low)")),
        }
    }
}

// ---------------------------------------------------------------------------
// RoadmapPhase
// ---------------------------------------------------------------------------

/// A stage of the project plan. Purely descriptive: it is shown in reports
/// and attached to logged actions, it never affects the TDD cycle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoadmapPhase {
    pub slug: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<String>,
    #[serde(default)]
    pub priority: Priority,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub objectives: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub deliverables: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub success_metrics: Vec<String>,
}

impl RoadmapPhase {
    pub fn new(slug: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            slug: slug.into(),
            name: name.into(),
            duration: None,
            priority: Priority::default(),
            objectives: Vec::new(),
            deliverables: Vec::new(),
            success_metrics: Vec::new(),
        }
    }
}

// ---------------------------------------------------------------------------
// Roadmap operations
// ---------------------------------------------------------------------------

pub fn find<'a>(roadmap: &'a [RoadmapPhase], slug: &str) -> Option<&'a RoadmapPhase> {
    roadmap.iter().find(|p| p.slug == slug)
}

pub fn add_phase(roadmap: &mut Vec<RoadmapPhase>, phase: RoadmapPhase) -> Result<()> {
    paths::validate_slug(&phase.slug)?;
    if find(roadmap, &phase.slug).is_some() {
        return Err(TddError::RoadmapPhaseExists(phase.slug));
    }
    roadmap.push(phase);
    Ok(())
}

/// Point the status at roadmap phase `slug`, which must be defined.
pub fn set_current(
    roadmap: &[RoadmapPhase],
    mut status: WorkflowStatus,
    slug: &str,
) -> Result<WorkflowStatus> {
    if find(roadmap, slug).is_none() {
        return Err(TddError::RoadmapPhaseNotFound(slug.to_string()));
    }
    status.roadmap.current_phase = Some(slug.to_string());
    Ok(status)
}

/// The roadmap phase the status currently points at, if it is still defined.
pub fn current<'a>(roadmap: &'a [RoadmapPhase], status: &WorkflowStatus) -> Option<&'a RoadmapPhase> {
    status
        .roadmap
        .current_phase
        .as_deref()
        .and_then(|slug| find(roadmap, slug))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
