use crate::output::print_json;
use anyhow::Context;
use chrono::Utc;
use std::path::Path;
use tdd_core::{config::Config, report, store::StatusStore, transition};

pub fn run(root: &Path, json: bool) -> anyhow::Result<()> {
    let config = Config::load_or_detect(root).context("failed to load config")?;
    let status = StatusStore::open(root)
        .load()
        .context("failed to load status")?;

    if json {
        let current = status.current_phase;
        return print_json(&serde_json::json!({
            "current_phase": current,
            "suggested_next": current.suggested_next(),
            "allowed": transition::allowed_targets(current),
            "action_count": status.action_count,
            "test_command": config.project.profile.test_command(),
        }));
    }

    print!("{}", report::render_next_actions(&config, &status, Utc::now()));
    Ok(())
}
