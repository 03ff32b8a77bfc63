use crate::output::{print_json, print_table, truncate};
use anyhow::Context;
use std::path::Path;
use tdd_core::store::StatusStore;

pub fn run(root: &Path, limit: usize, json: bool) -> anyhow::Result<()> {
    let status = StatusStore::open(root)
        .load()
        .context("failed to load status")?;

    let skip = status.history.len().saturating_sub(limit);
    let shown = &status.history[skip..];

    if json {
        return print_json(&shown);
    }

    if status.history.is_empty() {
        println!("No actions logged yet. Run: tdd log \"wrote failing test for ...\"");
        return Ok(());
    }

    let rows: Vec<Vec<String>> = shown
        .iter()
        .enumerate()
        .map(|(i, a)| {
            vec![
                (skip + i + 1).to_string(),
                a.timestamp.format("%Y-%m-%d %H:%M").to_string(),
                a.inferred_phase.to_string(),
                a.roadmap_phase.clone().unwrap_or_default(),
                truncate(&a.description, 60),
            ]
        })
        .collect();
    print_table(&["#", "WHEN", "PHASE", "ROADMAP", "DESCRIPTION"], rows);

    if skip > 0 {
        println!("\n({skip} earlier actions not shown; use --limit)");
    }
    Ok(())
}
