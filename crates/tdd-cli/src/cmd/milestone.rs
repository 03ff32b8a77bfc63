use crate::output::print_json;
use anyhow::Context;
use chrono::Utc;
use clap::Subcommand;
use std::path::Path;
use tdd_core::{config::Config, report, store::StatusStore};

#[derive(Subcommand)]
pub enum MilestoneSubcommand {
    /// Mark a milestone as completed
    Complete {
        #[arg(required = true, num_args = 1..)]
        name: Vec<String>,
    },
    /// List completed milestones
    List,
}

pub fn run(root: &Path, subcmd: MilestoneSubcommand, json: bool) -> anyhow::Result<()> {
    match subcmd {
        MilestoneSubcommand::Complete { name } => complete(root, &name.join(" "), json),
        MilestoneSubcommand::List => list(root, json),
    }
}

fn complete(root: &Path, name: &str, json: bool) -> anyhow::Result<()> {
    let name = name.trim();
    if name.is_empty() {
        anyhow::bail!("milestone name is empty");
    }

    let config = Config::load_or_detect(root).context("failed to load config")?;
    let store = StatusStore::open(root);
    let mut added = false;
    let status = store
        .update_with(
            |mut s| {
                added = s.roadmap.complete_milestone(name);
                Ok(s)
            },
            |s| report::refresh(root, &config, s, None, Utc::now()),
        )
        .context("failed to record milestone")?;

    if json {
        return print_json(&serde_json::json!({
            "milestone": name,
            "added": added,
            "milestones_completed": status.roadmap.milestones_completed,
        }));
    }

    if added {
        println!("🏆 Milestone completed: {name}");
    } else {
        println!("Milestone already completed: {name}");
    }
    println!("Total milestones: {}", status.roadmap.milestones_completed.len());
    Ok(())
}

fn list(root: &Path, json: bool) -> anyhow::Result<()> {
    let status = StatusStore::open(root).load().context("failed to load status")?;
    let done = &status.roadmap.milestones_completed;

    if json {
        return print_json(done);
    }
    if done.is_empty() {
        println!("No milestones completed yet.");
        return Ok(());
    }
    for m in done {
        println!("✅ {m}");
    }
    Ok(())
}
