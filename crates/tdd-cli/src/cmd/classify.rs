use crate::output::print_json;
use anyhow::Context;
use std::path::Path;
use tdd_core::{config::Config, store::StatusStore, transition};

/// Dry run of `tdd log`: reports the inferred phase and whether the move
/// would be accepted. Never writes.
pub fn run(root: &Path, words: &[String], json: bool) -> anyhow::Result<()> {
    let action = words.join(" ");
    let config = Config::load_or_detect(root).context("failed to load config")?;
    let status = StatusStore::open(root)
        .load()
        .context("failed to load status")?;

    let current = status.current_phase;
    let classification = config
        .classifier()
        .explain(&action, current)
        .context("cannot classify action")?;
    let allowed = transition::is_allowed(current, classification.phase);

    if json {
        return print_json(&serde_json::json!({
            "action": action,
            "current_phase": current,
            "phase": classification.phase,
            "keyword": classification.keyword,
            "allowed": allowed,
        }));
    }

    println!("Action:  {action}");
    match classification.keyword {
        Some(ref k) => println!("Phase:   {} (keyword \"{k}\")", classification.phase),
        None => println!("Phase:   {} (no keyword, stays in current phase)", classification.phase),
    }
    if allowed {
        println!("Move:    {current} → {} allowed", classification.phase);
    } else {
        println!(
            "Move:    {current} → {} NOT allowed (allowed: {})",
            classification.phase,
            transition::allowed_list(&current)
        );
    }
    Ok(())
}
