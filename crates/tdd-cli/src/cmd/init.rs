use crate::output::print_json;
use anyhow::Context;
use chrono::Utc;
use std::path::Path;
use tdd_core::{config::Config, io, paths, report, store::StatusStore};

pub fn run(root: &Path, json: bool) -> anyhow::Result<()> {
    let mut created: Vec<&str> = Vec::new();
    let mut existing: Vec<&str> = Vec::new();

    // 1. Create .tdd directory
    let dir = paths::tdd_dir(root);
    io::ensure_dir(&dir).with_context(|| format!("failed to create {}", dir.display()))?;

    // 2. Write config.yaml if missing
    let config = if paths::config_path(root).exists() {
        existing.push(paths::CONFIG_FILE);
        Config::load(root).context("failed to load config.yaml")?
    } else {
        let cfg = Config::detect(root);
        cfg.save(root).context("failed to write config.yaml")?;
        created.push(paths::CONFIG_FILE);
        cfg
    };

    // 3. Write status.json if missing
    let store = StatusStore::open(root);
    let status = {
        let _lock = store.lock().context("failed to lock status store")?;
        if store.exists() {
            existing.push(paths::STATUS_FILE);
            store.load().context("failed to load status.json")?
        } else {
            let status = store.load()?;
            store.save(&status).context("failed to write status.json")?;
            created.push(paths::STATUS_FILE);
            status
        }
    };

    // 4. Session log, README and next actions
    let now = Utc::now();
    let written = report::write_initial(root, &config, &status, now)
        .context("failed to write context files")?;
    for file in [paths::SESSION_FILE, paths::README_FILE, paths::NEXT_ACTIONS_FILE] {
        if written.contains(&file) {
            created.push(file);
        } else {
            existing.push(file);
        }
    }

    // 5. Keep the lock file out of version control
    io::ensure_gitignore_entry(root, paths::LOCK_FILE).context("failed to update .gitignore")?;

    if json {
        return print_json(&serde_json::json!({
            "root": root.display().to_string(),
            "project": config.project.name,
            "kind": config.project.profile.kind,
            "created": created,
            "existing": existing,
        }));
    }

    println!("Initializing TDD context in: {}", root.display());
    for f in &created {
        println!("  created: {f}");
    }
    for f in &existing {
        println!("  exists:  {f}");
    }
    println!();
    println!("Project type: {}", config.project.profile.kind);
    if !config.project.profile.test_commands.is_empty() {
        println!("Test commands: {}", config.project.profile.test_commands.join(", "));
    }
    println!("Current phase: {}", status.current_phase.label());
    println!("\nNext: write a failing test, then run: tdd log \"wrote failing test for ...\"");
    Ok(())
}
