use crate::classifier::Classifier;
use crate::error::{Result, TddError};
use crate::lock::StoreLock;
use crate::paths;
use crate::status::{ActionRecord, WorkflowStatus};
use crate::transition;
use chrono::{DateTime, Utc};
use std::path::{Path, PathBuf};

// ---------------------------------------------------------------------------
// StatusStore
// ---------------------------------------------------------------------------

/// Handle to the persisted [`WorkflowStatus`] of one project root.
#[derive(Debug, Clone)]
pub struct StatusStore {
    root: PathBuf,
}

impl StatusStore {
    pub fn open(root: &Path) -> Self {
        Self {
            root: root.to_path_buf(),
        }
    }

    pub fn path(&self) -> PathBuf {
        paths::status_path(&self.root)
    }

    pub fn exists(&self) -> bool {
        self.path().exists()
    }

    // ---------------------------------------------------------------------------
    // Persistence
    // ---------------------------------------------------------------------------

    /// Persisted status, or the default when nothing has been saved yet.
    /// Unparsable or inconsistent files are reported, never reset.
    pub fn load(&self) -> Result<WorkflowStatus> {
        let path = self.path();
        if !path.exists() {
            return Ok(WorkflowStatus::default());
        }
        let bytes = std::fs::read(&path)?;
        let status: WorkflowStatus =
            serde_json::from_slice(&bytes).map_err(|e| TddError::CorruptState {
                path: path.clone(),
                reason: e.to_string(),
            })?;
        status
            .check_invariants()
            .map_err(|reason| TddError::CorruptState { path, reason })?;
        Ok(status)
    }

    pub fn save(&self, status: &WorkflowStatus) -> Result<()> {
        let mut data = serde_json::to_string_pretty(status)?;
        data.push('\n');
        crate::io::atomic_write(&self.path(), data.as_bytes())?;
        tracing::debug!(
            phase = %status.current_phase,
            actions = status.action_count,
            "saved workflow status"
        );
        Ok(())
    }

    pub fn lock(&self) -> Result<StoreLock> {
        StoreLock::acquire(&paths::lock_path(&self.root))
    }

    /// Run one load-modify-save cycle under the store lock. Nothing is
    /// written when `f` fails.
    pub fn update<F>(&self, f: F) -> Result<WorkflowStatus>
    where
        F: FnOnce(WorkflowStatus) -> Result<WorkflowStatus>,
    {
        self.update_with(f, |_| Ok(()))
    }

    /// [`StatusStore::update`] that also runs `after_save` on the saved status
    /// before the lock is released, so derived files are written in the same
    /// order as the status changes they reflect.
    pub fn update_with<F, A>(&self, f: F, after_save: A) -> Result<WorkflowStatus>
    where
        F: FnOnce(WorkflowStatus) -> Result<WorkflowStatus>,
        A: FnOnce(&WorkflowStatus) -> Result<()>,
    {
        let _lock = self.lock()?;
        let status = self.load()?;
        let updated = f(status)?;
        self.save(&updated)?;
        after_save(&updated)?;
        Ok(updated)
    }

    // ---------------------------------------------------------------------------
    // LogAction
    // ---------------------------------------------------------------------------

    /// Classify `text`, check the move against the current phase, and persist
    /// the new action. On a rejected transition the stored status is untouched.
    pub fn log_action(
        &self,
        classifier: &Classifier,
        text: &str,
        now: DateTime<Utc>,
    ) -> Result<WorkflowStatus> {
        self.log_action_annotated(classifier, text, None, now)
    }

    /// [`StatusStore::log_action`] with a roadmap phase annotation. When
    /// `roadmap_phase` is `None` the status' current roadmap phase is used.
    pub fn log_action_annotated(
        &self,
        classifier: &Classifier,
        text: &str,
        roadmap_phase: Option<String>,
        now: DateTime<Utc>,
    ) -> Result<WorkflowStatus> {
        self.log_action_with(classifier, text, roadmap_phase, now, |_| Ok(()))
    }

    /// [`StatusStore::log_action_annotated`] with a hook that runs under the
    /// lock once the new status is saved. Not called on a rejected action.
    pub fn log_action_with<A>(
        &self,
        classifier: &Classifier,
        text: &str,
        roadmap_phase: Option<String>,
        now: DateTime<Utc>,
        after_save: A,
    ) -> Result<WorkflowStatus>
    where
        A: FnOnce(&WorkflowStatus) -> Result<()>,
    {
        let text = text.trim();
        self.update_with(
            |status| {
                let phase = classifier.classify(text, status.current_phase)?;
                transition::validate(status.current_phase, phase)?;
                let roadmap_phase =
                    roadmap_phase.or_else(|| status.roadmap.current_phase.clone());
                tracing::info!(from = %status.current_phase, to = %phase, "logging action");
                Ok(status.record_action(
                    ActionRecord::new(text, phase, now).with_roadmap_phase(roadmap_phase),
                ))
            },
            after_save,
        )
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
