use crate::output::print_json;
use anyhow::Context;
use std::path::Path;
use tdd_core::{config::Config, roadmap, store::StatusStore};

pub fn run(root: &Path, json: bool) -> anyhow::Result<()> {
    let status = StatusStore::open(root)
        .load()
        .context("failed to load status")?;

    if json {
        return print_json(&status);
    }

    let config = Config::load_or_detect(root).context("failed to load config")?;

    println!("Project: {} ({})", config.project.name, config.project.profile.kind);
    println!("Phase:   {}", status.current_phase.label());
    println!("Actions: {}", status.action_count);

    match &status.last_action {
        Some(a) => println!(
            "Last:    {} — {} ({})",
            a.inferred_phase,
            a.description,
            a.timestamp.format("%Y-%m-%d %H:%M:%S UTC")
        ),
        None => println!("Last:    (none) — run: tdd log \"wrote failing test for ...\""),
    }

    if let Some(ref slug) = status.roadmap.current_phase {
        match roadmap::current(&config.roadmap, &status) {
            Some(phase) => println!("Roadmap: {} [{}] ({})", phase.name, phase.slug, phase.priority),
            None => println!("Roadmap: {slug} (not defined in config.yaml)"),
        }
    }

    if !status.roadmap.milestones_completed.is_empty() {
        println!("\nMilestones completed: {}", status.roadmap.milestones_completed.len());
        for m in &status.roadmap.milestones_completed {
            println!("  ✅ {m}");
        }
    }

    let tests = &status.test_results;
    if let Some(last_run) = tests.last_run {
        print!(
            "\nTests:   {} passing, {} failing",
            tests.passing, tests.failing
        );
        if let Some(c) = tests.coverage {
            print!(", {c:.1}% coverage (target {}%)", config.rules.minimum_coverage);
        }
        println!(" — {}", last_run.format("%Y-%m-%d %H:%M"));
    }

    Ok(())
}
