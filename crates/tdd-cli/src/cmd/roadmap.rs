use crate::output::{print_json, print_table};
use anyhow::Context;
use chrono::Utc;
use clap::Subcommand;
use std::path::Path;
use tdd_core::{
    config::Config,
    report,
    roadmap::{self, Priority, RoadmapPhase},
    store::StatusStore,
    TddError,
};

#[derive(Subcommand)]
pub enum RoadmapSubcommand {
    /// List roadmap phases
    List,
    /// Show a roadmap phase (default: the current one)
    Show { slug: Option<String> },
    /// Make a roadmap phase the current one
    Set { slug: String },
    /// Define a new roadmap phase
    Add {
        slug: String,
        /// Display name
        #[arg(long)]
        name: String,
        /// Free-form duration, e.g. "Week 1-2"
        #[arg(long)]
        duration: Option<String>,
        /// critical | high | medium | low
        #[arg(long, default_value = "medium")]
        priority: Priority,
        /// Objective (repeatable)
        #[arg(long = "objective")]
        objectives: Vec<String>,
        /// Deliverable (repeatable)
        #[arg(long = "deliverable")]
        deliverables: Vec<String>,
        /// Success metric (repeatable)
        #[arg(long = "metric")]
        success_metrics: Vec<String>,
    },
}

pub fn run(root: &Path, subcmd: RoadmapSubcommand, json: bool) -> anyhow::Result<()> {
    match subcmd {
        RoadmapSubcommand::List => list(root, json),
        RoadmapSubcommand::Show { slug } => show(root, slug.as_deref(), json),
        RoadmapSubcommand::Set { slug } => set(root, &slug, json),
        RoadmapSubcommand::Add {
            slug,
            name,
            duration,
            priority,
            objectives,
            deliverables,
            success_metrics,
        } => {
            let phase = RoadmapPhase {
                slug,
                name,
                duration,
                priority,
                objectives,
                deliverables,
                success_metrics,
            };
            add(root, phase, json)
        }
    }
}

// ---------------------------------------------------------------------------
// list
// ---------------------------------------------------------------------------

fn list(root: &Path, json: bool) -> anyhow::Result<()> {
    let config = Config::load_or_detect(root).context("failed to load config")?;
    let status = StatusStore::open(root).load().context("failed to load status")?;
    let current = status.roadmap.current_phase.as_deref();

    if json {
        return print_json(&serde_json::json!({
            "current": current,
            "phases": config.roadmap,
        }));
    }

    if config.roadmap.is_empty() {
        println!("No roadmap phases. Run: tdd roadmap add <slug> --name <name>");
        return Ok(());
    }

    let rows: Vec<Vec<String>> = config
        .roadmap
        .iter()
        .map(|p| {
            vec![
                if current == Some(p.slug.as_str()) { "*".to_string() } else { String::new() },
                p.slug.clone(),
                p.priority.to_string(),
                p.duration.clone().unwrap_or_default(),
                p.name.clone(),
            ]
        })
        .collect();
    print_table(&["", "SLUG", "PRIORITY", "DURATION", "NAME"], rows);
    Ok(())
}

// ---------------------------------------------------------------------------
// show
// ---------------------------------------------------------------------------

fn show(root: &Path, slug: Option<&str>, json: bool) -> anyhow::Result<()> {
    let config = Config::load_or_detect(root).context("failed to load config")?;
    let status = StatusStore::open(root).load().context("failed to load status")?;

    let slug = match slug.or(status.roadmap.current_phase.as_deref()) {
        Some(s) => s.to_string(),
        None => anyhow::bail!("no current roadmap phase; pass a slug or run: tdd roadmap set <slug>"),
    };
    let phase = roadmap::find(&config.roadmap, &slug)
        .ok_or_else(|| TddError::RoadmapPhaseNotFound(slug.clone()))?;

    if json {
        return print_json(phase);
    }

    println!("{} [{}]", phase.name, phase.slug);
    println!("Priority: {}", phase.priority);
    if let Some(ref d) = phase.duration {
        println!("Duration: {d}");
    }
    for (title, items) in [
        ("Objectives", &phase.objectives),
        ("Deliverables", &phase.deliverables),
        ("Success metrics", &phase.success_metrics),
    ] {
        if !items.is_empty() {
            println!("\n{title}:");
            for item in items {
                println!("  • {item}");
            }
        }
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// set
// ---------------------------------------------------------------------------

fn set(root: &Path, slug: &str, json: bool) -> anyhow::Result<()> {
    let config = Config::load_or_detect(root).context("failed to load config")?;
    let store = StatusStore::open(root);
    let status = store
        .update_with(
            |s| roadmap::set_current(&config.roadmap, s, slug),
            |s| report::refresh(root, &config, s, None, Utc::now()),
        )
        .with_context(|| format!("cannot switch to roadmap phase '{slug}'"))?;

    if json {
        return print_json(&status.roadmap);
    }
    if let Some(phase) = roadmap::current(&config.roadmap, &status) {
        println!("Roadmap phase set to: {} ({})", phase.name, phase.priority);
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// add
// ---------------------------------------------------------------------------

fn add(root: &Path, phase: RoadmapPhase, json: bool) -> anyhow::Result<()> {
    let mut config = Config::load_or_detect(root).context("failed to load config")?;
    let slug = phase.slug.clone();
    roadmap::add_phase(&mut config.roadmap, phase)?;
    config.save(root).context("failed to write config.yaml")?;

    if json {
        return print_json(&config.roadmap);
    }
    println!("Added roadmap phase '{slug}' ({} total)", config.roadmap.len());
    Ok(())
}
