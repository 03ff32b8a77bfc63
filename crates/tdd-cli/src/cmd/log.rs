use crate::output::print_json;
use anyhow::Context;
use chrono::Utc;
use std::path::Path;
use tdd_core::{config::Config, report, roadmap, store::StatusStore, TddError};

pub fn run(
    root: &Path,
    words: &[String],
    roadmap_phase: Option<String>,
    json: bool,
) -> anyhow::Result<()> {
    let action = words.join(" ");
    let config = Config::load_or_detect(root).context("failed to load config")?;

    if let Some(ref slug) = roadmap_phase {
        if roadmap::find(&config.roadmap, slug).is_none() {
            return Err(TddError::RoadmapPhaseNotFound(slug.clone()).into());
        }
    }

    let store = StatusStore::open(root);
    let now = Utc::now();
    // Reports are refreshed under the store lock; a refresh failure does not
    // undo the saved action.
    let mut refreshed: tdd_core::Result<()> = Ok(());
    let status = store
        .log_action_with(&config.classifier(), &action, roadmap_phase, now, |s| {
            refreshed = report::refresh(root, &config, s, s.last_action.as_ref(), now);
            Ok(())
        })
        .context("action not logged")?;
    refreshed.context("status saved but reports could not be refreshed")?;

    if json {
        return print_json(&status);
    }

    let phase = status.current_phase;
    println!("✅ TDD action logged: {}", action.trim());
    println!("📊 Current phase: {}", phase.label());
    println!("🔢 Actions logged: {}", status.action_count);
    if let Some(slug) = status.last_action.as_ref().and_then(|a| a.roadmap_phase.as_deref()) {
        println!("🗺  Roadmap phase: {slug}");
    }
    println!("➡  Next: {}", phase.suggested_next().label());
    Ok(())
}
