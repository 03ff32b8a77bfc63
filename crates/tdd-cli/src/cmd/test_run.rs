use crate::output::print_json;
use anyhow::Context;
use chrono::Utc;
use std::path::Path;
use tdd_core::{config::Config, report, status::TestResults, store::StatusStore};

pub fn run(
    root: &Path,
    passing: u32,
    failing: u32,
    coverage: Option<f64>,
    json: bool,
) -> anyhow::Result<()> {
    if let Some(c) = coverage {
        if !(0.0..=100.0).contains(&c) {
            anyhow::bail!("coverage must be between 0 and 100, got {c}");
        }
    }

    let config = Config::load_or_detect(root).context("failed to load config")?;
    let store = StatusStore::open(root);
    let now = Utc::now();
    let status = store
        .update_with(
            |mut s| {
                s.test_results = TestResults {
                    last_run: Some(now),
                    passing,
                    failing,
                    coverage,
                };
                Ok(s)
            },
            |s| report::refresh(root, &config, s, None, now),
        )
        .context("failed to record test results")?;

    if json {
        return print_json(&status.test_results);
    }

    println!("Recorded test run: {passing} passing, {failing} failing");
    if let Some(c) = coverage {
        let target = config.rules.minimum_coverage as f64;
        if c < target {
            println!("⚠  Coverage {c:.1}% is below the {target}% target");
        } else {
            println!("Coverage {c:.1}% (target {target}%)");
        }
    }
    Ok(())
}
