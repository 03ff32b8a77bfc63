use crate::types::Phase;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TddError {
    #[error("not initialized: run 'tdd init'")]
    NotInitialized,

    #[error("action description is empty")]
    EmptyAction,

    #[error(
        "TDD violation: cannot move from {current} to {proposed} (allowed: {})",
        crate::transition::allowed_list(.current)
    )]
    InvalidTransition { current: Phase, proposed: Phase },

    #[error("corrupt status file {}: {reason}", .path.display())]
    CorruptState { path: PathBuf, reason: String },

    #[error("invalid phase: {0}")]
    InvalidPhase(String),

    #[error("invalid slug '{0}': must be lowercase alphanumeric with hyphens")]
    InvalidSlug(String),

    #[error("roadmap phase not found: {0}")]
    RoadmapPhaseNotFound(String),

    #[error("roadmap phase already exists: {0}")]
    RoadmapPhaseExists(String),

    #[error("failed to lock status store: {0}")]
    Lock(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, TddError>;
