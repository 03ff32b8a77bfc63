use crate::error::{Result, TddError};
use regex::Regex;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

// ---------------------------------------------------------------------------
// Directory constants
// ---------------------------------------------------------------------------

pub const TDD_DIR: &str = ".tdd";

pub const STATUS_FILE: &str = ".tdd/status.json";
pub const LOCK_FILE: &str = ".tdd/status.lock";
pub const CONFIG_FILE: &str = ".tdd/config.yaml";
pub const SESSION_FILE: &str = ".tdd/session.md";
pub const NEXT_ACTIONS_FILE: &str = ".tdd/next_actions.md";
pub const README_FILE: &str = ".tdd/README.md";

// ---------------------------------------------------------------------------
// Path helpers
// ---------------------------------------------------------------------------

pub fn tdd_dir(root: &Path) -> PathBuf {
    root.join(TDD_DIR)
}

pub fn status_path(root: &Path) -> PathBuf {
    root.join(STATUS_FILE)
}

pub fn lock_path(root: &Path) -> PathBuf {
    root.join(LOCK_FILE)
}

pub fn config_path(root: &Path) -> PathBuf {
    root.join(CONFIG_FILE)
}

pub fn session_path(root: &Path) -> PathBuf {
    root.join(SESSION_FILE)
}

pub fn next_actions_path(root: &Path) -> PathBuf {
    root.join(NEXT_ACTIONS_FILE)
}

pub fn readme_path(root: &Path) -> PathBuf {
    root.join(README_FILE)
}

// ---------------------------------------------------------------------------
// Slug validation
// ---------------------------------------------------------------------------

static SLUG_RE: OnceLock<Regex> = OnceLock::new();

fn slug_re() -> &'static Regex {
    SLUG_RE.get_or_init(|| Regex::new(r"^[a-z0-9][a-z0-9\-]*[a-z0-9]$|^[a-z0-9]$").unwrap())
}

/// Roadmap phases are addressed by slug on the command line.
pub fn validate_slug(slug: &str) -> Result<()> {
    if slug.is_empty() || slug.len() > 64 || !slug_re().is_match(slug) {
        return Err(TddError::InvalidSlug(slug.to_string()));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
