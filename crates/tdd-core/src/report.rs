//! Markdown views of the workflow status: the session log, the next-actions
//! page and the context README. Rendering is pure; [`refresh`] and
//! [`write_initial`] are the only functions that touch the filesystem.

use crate::config::Config;
use crate::error::Result;
use crate::io;
use crate::paths;
use crate::roadmap;
use crate::status::{ActionRecord, WorkflowStatus};
use crate::transition;
use crate::types::Phase;
use chrono::{DateTime, SecondsFormat, Utc};
use std::fmt::Write as _;
use std::path::Path;

fn ts(t: &DateTime<Utc>) -> String {
    t.to_rfc3339_opts(SecondsFormat::Secs, true)
}

// ---------------------------------------------------------------------------
// Session log
// ---------------------------------------------------------------------------

pub fn session_header(project: &str, now: DateTime<Utc>) -> String {
    format!(
        "# TDD Session Log - {project}\n\nInitialized: {}\n\n## Session Actions\n\n",
        ts(&now)
    )
}

pub fn session_entry(action: &ActionRecord) -> String {
    let mut line = format!(
        "[{}] {}: {}",
        ts(&action.timestamp),
        action.inferred_phase.label(),
        action.description
    );
    if let Some(ref slug) = action.roadmap_phase {
        let _ = write!(line, " ({slug})");
    }
    line.push('\n');
    line
}

// ---------------------------------------------------------------------------
// Next actions
// ---------------------------------------------------------------------------

pub fn phase_instructions(phase: Phase) -> &'static str {
    match phase {
        Phase::Planning => {
            "### 📋 PLANNING - Ready to Start
1. Review the requirements
2. Pick the first behavior to implement
3. Plan the first failing test"
        }
        Phase::Red => {
            "### 🔴 RED - Write a Failing Test
1. Pick the next behavior to implement
2. Write a test that describes it
3. Run the tests and confirm the new one fails for the right reason

Example: `tdd log \"wrote failing test for login validation\"`"
        }
        Phase::Green => {
            "### 🟢 GREEN - Make the Test Pass
1. Write the minimal code that makes the failing test pass
2. No extra features or optimizations
3. Run the tests and confirm they pass

Example: `tdd log \"implemented login validation to pass test\"`"
        }
        Phase::Refactor => {
            "### 🔵 REFACTOR - Improve the Code
1. Clean up while keeping every test green
2. Remove duplication, improve names and structure
3. Run the tests after each change

Example: `tdd log \"refactored login validation error handling\"`"
        }
    }
}

fn bullet_list(items: &[String]) -> String {
    items.iter().map(|i| format!("- {i}\n")).collect()
}

pub fn render_next_actions(config: &Config, status: &WorkflowStatus, now: DateTime<Utc>) -> String {
    let project = &config.project;
    let current = status.current_phase;
    let mut out = String::new();

    let _ = writeln!(out, "# TDD Next Actions - {}\n", project.name);

    let _ = writeln!(out, "## Project Information");
    let _ = writeln!(out, "- **Type**: {}", project.profile.kind);
    let _ = writeln!(out, "- **Test Commands**: {}", project.profile.test_commands.join(", "));
    let _ = writeln!(out, "- **Build Commands**: {}\n", project.profile.build_commands.join(", "));

    let _ = writeln!(out, "## Last Action Completed");
    match &status.last_action {
        Some(a) => {
            let _ = writeln!(out, "✅ **{}**: {}", a.inferred_phase.label(), a.description);
            let _ = writeln!(out, "📅 **Timestamp**: {}\n", ts(&a.timestamp));
        }
        None => {
            let _ = writeln!(out, "Nothing logged yet.\n");
        }
    }

    let _ = writeln!(out, "## Current TDD Cycle");
    let _ = writeln!(out, "**Current Phase**: {}", current.label());
    let _ = writeln!(out, "**Next Phase**: {}", current.suggested_next().label());
    let allowed: Vec<&str> = transition::allowed_targets(current)
        .iter()
        .map(|p| p.label())
        .collect();
    let _ = writeln!(out, "**Allowed Next**: {}", allowed.join(", "));
    let _ = writeln!(out, "**Actions Logged**: {}\n", status.action_count);

    let _ = writeln!(out, "## Next Steps");
    let _ = writeln!(out, "{}\n", phase_instructions(current.suggested_next()));

    if let Some(phase) = roadmap::current(&config.roadmap, status) {
        let _ = writeln!(out, "## Roadmap Phase: {}", phase.name);
        let _ = writeln!(out, "- **Priority**: {}", phase.priority);
        if let Some(ref d) = phase.duration {
            let _ = writeln!(out, "- **Duration**: {d}");
        }
        if !phase.objectives.is_empty() {
            let _ = writeln!(out, "\n### Objectives\n{}", bullet_list(&phase.objectives));
        }
        if !phase.deliverables.is_empty() {
            let _ = writeln!(out, "### Deliverables\n{}", bullet_list(&phase.deliverables));
        }
        if !phase.success_metrics.is_empty() {
            let _ = writeln!(out, "### Success Metrics\n{}", bullet_list(&phase.success_metrics));
        }
    }

    if !status.roadmap.milestones_completed.is_empty() {
        let _ = writeln!(out, "## Completed Milestones");
        for m in &status.roadmap.milestones_completed {
            let _ = writeln!(out, "- ✅ {m}");
        }
        out.push('\n');
    }

    let tests = &status.test_results;
    let _ = writeln!(out, "## Test Status");
    let _ = writeln!(
        out,
        "- **Last Run**: {}",
        tests.last_run.as_ref().map(ts).unwrap_or_else(|| "Never".to_string())
    );
    let _ = writeln!(out, "- **Passing**: {}", tests.passing);
    let _ = writeln!(out, "- **Failing**: {}", tests.failing);
    match tests.coverage {
        Some(c) => {
            let _ = writeln!(out, "- **Coverage**: {c:.1}% (target {}%)\n", config.rules.minimum_coverage);
        }
        None => {
            let _ = writeln!(out, "- **Coverage**: unknown (target {}%)\n", config.rules.minimum_coverage);
        }
    }

    let _ = writeln!(out, "## Commands");
    let _ = writeln!(out, "```bash");
    let _ = writeln!(out, "tdd log \"what you just did\"");
    let _ = writeln!(out, "{}", project.profile.test_command());
    let _ = writeln!(out, "```\n");

    let _ = writeln!(out, "## Last Updated");
    let _ = writeln!(out, "{}", ts(&now));
    out
}

// ---------------------------------------------------------------------------
// README
// ---------------------------------------------------------------------------

fn quoted(words: &[String]) -> String {
    words
        .iter()
        .map(|w| format!("\"{w}\""))
        .collect::<Vec<_>>()
        .join(", ")
}

/// One bullet per rule of the configured classifier, in evaluation order.
fn keyword_lines(config: &Config) -> String {
    config
        .classifier()
        .rules()
        .iter()
        .map(|r| format!("- **{}**: {}\n", r.phase, quoted(&r.keywords)))
        .collect()
}

pub fn render_readme(config: &Config) -> String {
    let name = &config.project.name;
    let test_cmd = config.project.profile.test_command();
    format!(
        "# TDD Context - {name}

## Essential Commands
```bash
# Log every action (required after each change)
tdd log \"description of what you just did\"

# Run tests
{test_cmd}

# What to do next
tdd next
```

## Workflow
1. **🔴 RED**: write a failing test
2. **🟢 GREEN**: write the minimal code to make it pass
3. **🔵 REFACTOR**: improve the code with all tests green
4. Repeat

Allowed moves: PLANNING → RED, RED → RED | GREEN, GREEN → GREEN | REFACTOR,
REFACTOR → REFACTOR | RED. Anything else is rejected and nothing is recorded.

## Phase Keywords
The phase of an action is inferred from its description (checked in this order).
An action without any keyword stays in the current phase.

{keywords}
Keywords can be overridden under `keywords:` in `.tdd/config.yaml`.

## Context Files
- `next_actions.md`: what to do next (check this first)
- `status.json`: current phase and action history
- `session.md`: chronological session log
- `config.yaml`: project configuration

## Coverage Target
{coverage}%
",
        keywords = keyword_lines(config),
        coverage = config.rules.minimum_coverage,
    )
}

// ---------------------------------------------------------------------------
// File refresh
// ---------------------------------------------------------------------------

/// Create the session log and README if missing and write next_actions.md.
/// Returns the files that were created.
pub fn write_initial(root: &Path, config: &Config, status: &WorkflowStatus, now: DateTime<Utc>) -> Result<Vec<&'static str>> {
    let mut created = Vec::new();
    if io::write_if_missing(&paths::session_path(root), session_header(&config.project.name, now).as_bytes())? {
        created.push(paths::SESSION_FILE);
    }
    if io::write_if_missing(&paths::readme_path(root), render_readme(config).as_bytes())? {
        created.push(paths::README_FILE);
    }
    if io::write_if_missing(
        &paths::next_actions_path(root),
        render_next_actions(config, status, now).as_bytes(),
    )? {
        created.push(paths::NEXT_ACTIONS_FILE);
    }
    Ok(created)
}

/// Bring the markdown files up to date after a status change. `logged` is the
/// action that was just recorded, if any; it is appended to the session log.
pub fn refresh(
    root: &Path,
    config: &Config,
    status: &WorkflowStatus,
    logged: Option<&ActionRecord>,
    now: DateTime<Utc>,
) -> Result<()> {
    let session = paths::session_path(root);
    if !session.exists() {
        io::atomic_write(&session, session_header(&config.project.name, now).as_bytes())?;
    }
    if let Some(action) = logged {
        io::append_text(&session, &session_entry(action))?;
    }
    io::atomic_write(
        &paths::next_actions_path(root),
        render_next_actions(config, status, now).as_bytes(),
    )?;
    tracing::debug!(root = %root.display(), "refreshed reports");
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
