#![allow(deprecated)]
use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn tdd(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("tdd").unwrap();
    cmd.current_dir(dir.path())
        .env("TDD_ROOT", dir.path())
        .env_remove("RUST_LOG");
    cmd
}

fn init_project(dir: &TempDir) {
    tdd(dir).arg("init").assert().success();
}

fn log(dir: &TempDir, action: &str) -> assert_cmd::assert::Assert {
    tdd(dir).args(["log", action]).assert()
}

fn status_json(dir: &TempDir) -> serde_json::Value {
    let out = tdd(dir).args(["status", "--json"]).output().unwrap();
    assert!(out.status.success());
    serde_json::from_slice(&out.stdout).unwrap()
}

fn read(dir: &TempDir, rel: &str) -> String {
    std::fs::read_to_string(dir.path().join(rel)).unwrap()
}

// ---------------------------------------------------------------------------
// tdd init
// ---------------------------------------------------------------------------

#[test]
fn init_creates_context_files() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("Cargo.toml"), "[package]\nname = \"x\"\n").unwrap();
    tdd(&dir)
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("created: .tdd/config.yaml"))
        .stdout(predicate::str::contains("Project type: rust"));

    for f in [
        ".tdd/config.yaml",
        ".tdd/status.json",
        ".tdd/session.md",
        ".tdd/README.md",
        ".tdd/next_actions.md",
    ] {
        assert!(dir.path().join(f).exists(), "missing {f}");
    }
    assert!(read(&dir, ".gitignore").contains(".tdd/status.lock"));
    assert!(read(&dir, ".tdd/config.yaml").contains("kind: rust"));
}

#[test]
fn init_is_idempotent() {
    let dir = TempDir::new().unwrap();
    init_project(&dir);
    log(&dir, "wrote failing test for login").success();

    tdd(&dir)
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("exists:  .tdd/status.json"));

    // Re-running init must not reset the workflow.
    assert_eq!(status_json(&dir)["action_count"], 1);
}

#[test]
fn fresh_status_is_planning() {
    let dir = TempDir::new().unwrap();
    init_project(&dir);
    let status = status_json(&dir);
    assert_eq!(status["current_phase"], "PLANNING");
    assert_eq!(status["action_count"], 0);
    assert!(status["last_action"].is_null());
    assert_eq!(status["history"].as_array().unwrap().len(), 0);
}

// ---------------------------------------------------------------------------
// tdd log
// ---------------------------------------------------------------------------

#[test]
fn first_failing_test_moves_to_red() {
    let dir = TempDir::new().unwrap();
    init_project(&dir);

    log(&dir, "wrote failing test for login")
        .success()
        .stdout(predicate::str::contains("RED"));

    let status = status_json(&dir);
    assert_eq!(status["current_phase"], "RED");
    assert_eq!(status["action_count"], 1);
    assert_eq!(status["last_action"]["description"], "wrote failing test for login");
    assert_eq!(status["last_action"]["inferred_phase"], "RED");
}

#[test]
fn log_joins_words() {
    let dir = TempDir::new().unwrap();
    tdd(&dir)
        .args(["log", "add", "test", "for", "parser"])
        .assert()
        .success();
    assert_eq!(status_json(&dir)["last_action"]["description"], "add test for parser");
}

#[test]
fn log_works_without_init() {
    let dir = TempDir::new().unwrap();
    log(&dir, "add test for cache").success();
    assert!(dir.path().join(".tdd/status.json").exists());
    assert!(dir.path().join(".tdd/next_actions.md").exists());
}

#[test]
fn red_to_refactor_is_rejected_and_nothing_changes() {
    let dir = TempDir::new().unwrap();
    init_project(&dir);
    log(&dir, "wrote failing test for login").success();

    let status_before = read(&dir, ".tdd/status.json");
    let session_before = read(&dir, ".tdd/session.md");

    log(&dir, "refactored helper")
        .failure()
        .stderr(predicate::str::contains("TDD violation"))
        .stderr(predicate::str::contains("RED"))
        .stderr(predicate::str::contains("REFACTOR"));

    assert_eq!(read(&dir, ".tdd/status.json"), status_before);
    assert_eq!(read(&dir, ".tdd/session.md"), session_before);
}

#[test]
fn planning_to_green_is_rejected() {
    let dir = TempDir::new().unwrap();
    init_project(&dir);
    log(&dir, "implemented login")
        .failure()
        .stderr(predicate::str::contains("allowed: RED"));
    assert_eq!(status_json(&dir)["action_count"], 0);
}

#[test]
fn repeat_green_is_allowed() {
    let dir = TempDir::new().unwrap();
    init_project(&dir);
    log(&dir, "add test for cache").success();
    log(&dir, "implemented cache").success();
    log(&dir, "implemented cache fix").success();

    let status = status_json(&dir);
    assert_eq!(status["current_phase"], "GREEN");
    assert_eq!(status["action_count"], 3);
}

#[test]
fn green_must_refactor_before_next_red() {
    let dir = TempDir::new().unwrap();
    init_project(&dir);
    log(&dir, "add test for a").success();
    log(&dir, "implement a").success();
    log(&dir, "write test for b").failure();
    log(&dir, "polish a").success();
    log(&dir, "write test for b").success();
    assert_eq!(status_json(&dir)["action_count"], 4);
}

#[test]
fn unclassified_action_keeps_phase() {
    let dir = TempDir::new().unwrap();
    init_project(&dir);
    log(&dir, "add test for a").success();
    log(&dir, "update readme").success();
    let status = status_json(&dir);
    assert_eq!(status["current_phase"], "RED");
    assert_eq!(status["action_count"], 2);
}

#[test]
fn empty_action_fails() {
    let dir = TempDir::new().unwrap();
    init_project(&dir);
    log(&dir, "   ")
        .failure()
        .stderr(predicate::str::contains("empty"));
}

#[test]
fn corrupt_status_is_reported_and_preserved() {
    let dir = TempDir::new().unwrap();
    init_project(&dir);
    std::fs::write(dir.path().join(".tdd/status.json"), "{\"current_phase\": 7").unwrap();

    log(&dir, "add test for x")
        .failure()
        .stderr(predicate::str::contains("corrupt status file"));
    assert_eq!(read(&dir, ".tdd/status.json"), "{\"current_phase\": 7");
}

#[test]
fn json_log_output_is_status() {
    let dir = TempDir::new().unwrap();
    let out = tdd(&dir)
        .args(["log", "--json", "add test for json"])
        .output()
        .unwrap();
    assert!(out.status.success());
    let v: serde_json::Value = serde_json::from_slice(&out.stdout).unwrap();
    assert_eq!(v["current_phase"], "RED");
    assert_eq!(v["history"][0]["description"], "add test for json");
}

// ---------------------------------------------------------------------------
// Reports
// ---------------------------------------------------------------------------

#[test]
fn session_log_and_next_actions_follow_the_cycle() {
    let dir = TempDir::new().unwrap();
    init_project(&dir);
    log(&dir, "add test for streaks").success();
    log(&dir, "implement streaks").success();

    let session = read(&dir, ".tdd/session.md");
    assert!(session.contains("🔴 RED: add test for streaks"));
    assert!(session.contains("🟢 GREEN: implement streaks"));

    let next = read(&dir, ".tdd/next_actions.md");
    assert!(next.contains("**Current Phase**: 🟢 GREEN"));
    assert!(next.contains("**Next Phase**: 🔵 REFACTOR"));

    tdd(&dir)
        .arg("next")
        .assert()
        .success()
        .stdout(predicate::str::contains("REFACTOR - Improve the Code"));
}

#[test]
fn next_json_lists_allowed_moves() {
    let dir = TempDir::new().unwrap();
    init_project(&dir);
    log(&dir, "add test for x").success();

    let out = tdd(&dir).args(["next", "--json"]).output().unwrap();
    let v: serde_json::Value = serde_json::from_slice(&out.stdout).unwrap();
    assert_eq!(v["current_phase"], "RED");
    assert_eq!(v["suggested_next"], "GREEN");
    assert_eq!(v["allowed"], serde_json::json!(["RED", "GREEN"]));
}

#[test]
fn history_lists_actions() {
    let dir = TempDir::new().unwrap();
    init_project(&dir);
    log(&dir, "add test for a").success();
    log(&dir, "implement a").success();
    log(&dir, "refactor a").success();

    tdd(&dir)
        .arg("history")
        .assert()
        .success()
        .stdout(predicate::str::contains("add test for a"))
        .stdout(predicate::str::contains("REFACTOR"));

    let out = tdd(&dir)
        .args(["history", "--limit", "1", "--json"])
        .output()
        .unwrap();
    let v: serde_json::Value = serde_json::from_slice(&out.stdout).unwrap();
    assert_eq!(v.as_array().unwrap().len(), 1);
    assert_eq!(v[0]["description"], "refactor a");
}

#[test]
fn history_limit_zero_still_counts_actions() {
    let dir = TempDir::new().unwrap();
    init_project(&dir);
    log(&dir, "add test for a").success();
    log(&dir, "implement a").success();

    tdd(&dir)
        .args(["history", "--limit", "0"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No actions logged yet").not())
        .stdout(predicate::str::contains("2 earlier actions not shown"));
}

#[test]
fn classify_is_a_dry_run() {
    let dir = TempDir::new().unwrap();
    init_project(&dir);
    let before = read(&dir, ".tdd/status.json");

    tdd(&dir)
        .args(["classify", "write a failing test then fix it"])
        .assert()
        .success()
        .stdout(predicate::str::contains("RED"))
        .stdout(predicate::str::contains("allowed"));

    let out = tdd(&dir)
        .args(["classify", "--json", "implement login"])
        .output()
        .unwrap();
    let v: serde_json::Value = serde_json::from_slice(&out.stdout).unwrap();
    assert_eq!(v["phase"], "GREEN");
    assert_eq!(v["keyword"], "implement");
    assert_eq!(v["allowed"], false);

    assert_eq!(read(&dir, ".tdd/status.json"), before);
}

// ---------------------------------------------------------------------------
// Roadmap, milestones, tests
// ---------------------------------------------------------------------------

#[test]
fn roadmap_phase_annotates_actions() {
    let dir = TempDir::new().unwrap();
    init_project(&dir);

    tdd(&dir)
        .args([
            "roadmap",
            "add",
            "foundation",
            "--name",
            "Foundation Stabilization",
            "--priority",
            "critical",
            "--objective",
            "100% test pass rate",
        ])
        .assert()
        .success();
    tdd(&dir).args(["roadmap", "set", "foundation"]).assert().success();

    tdd(&dir)
        .args(["roadmap", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("foundation"))
        .stdout(predicate::str::contains("critical"));

    log(&dir, "add test for streaks").success();
    let status = status_json(&dir);
    assert_eq!(status["last_action"]["roadmap_phase"], "foundation");
    assert_eq!(status["roadmap"]["current_phase"], "foundation");

    assert!(read(&dir, ".tdd/next_actions.md").contains("## Roadmap Phase: Foundation Stabilization"));
}

#[test]
fn roadmap_set_unknown_fails() {
    let dir = TempDir::new().unwrap();
    init_project(&dir);
    tdd(&dir)
        .args(["roadmap", "set", "nowhere"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("roadmap phase not found"));
}

#[test]
fn roadmap_add_duplicate_fails() {
    let dir = TempDir::new().unwrap();
    init_project(&dir);
    tdd(&dir)
        .args(["roadmap", "add", "scale", "--name", "Scale"])
        .assert()
        .success();
    tdd(&dir)
        .args(["roadmap", "add", "scale", "--name", "Again"])
        .assert()
        .failure();
}

#[test]
fn milestone_complete_is_idempotent() {
    let dir = TempDir::new().unwrap();
    init_project(&dir);
    tdd(&dir)
        .args(["milestone", "complete", "streak", "counter"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Milestone completed: streak counter"));
    tdd(&dir)
        .args(["milestone", "complete", "streak counter"])
        .assert()
        .success()
        .stdout(predicate::str::contains("already completed"));

    let status = status_json(&dir);
    assert_eq!(
        status["roadmap"]["milestones_completed"],
        serde_json::json!(["streak counter"])
    );
    // Milestones never count as actions.
    assert_eq!(status["action_count"], 0);
}

#[test]
fn tests_command_records_results() {
    let dir = TempDir::new().unwrap();
    init_project(&dir);
    tdd(&dir)
        .args(["tests", "--passing", "87", "--failing", "4", "--coverage", "95.5"])
        .assert()
        .success();

    let status = status_json(&dir);
    assert_eq!(status["test_results"]["passing"], 87);
    assert_eq!(status["test_results"]["failing"], 4);
    assert!(read(&dir, ".tdd/next_actions.md").contains("- **Failing**: 4"));

    tdd(&dir)
        .args(["tests", "--passing", "1", "--failing", "0", "--coverage", "150"])
        .assert()
        .failure();
}

// ---------------------------------------------------------------------------
// tdd config
// ---------------------------------------------------------------------------

#[test]
fn config_validate_clean() {
    let dir = TempDir::new().unwrap();
    init_project(&dir);
    tdd(&dir)
        .args(["config", "validate"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Config is valid"));
}

#[test]
fn config_validate_reports_errors() {
    let dir = TempDir::new().unwrap();
    init_project(&dir);
    std::fs::write(
        dir.path().join(".tdd/config.yaml"),
        "project:\n  name: demo\n  kind: unknown\nrules:\n  minimum_coverage: 140\n",
    )
    .unwrap();
    tdd(&dir)
        .args(["config", "validate"])
        .assert()
        .failure()
        .stdout(predicate::str::contains("[error]"));
}

#[test]
fn custom_keywords_change_classification() {
    let dir = TempDir::new().unwrap();
    init_project(&dir);
    std::fs::write(
        dir.path().join(".tdd/config.yaml"),
        "project:\n  name: demo\n  kind: unknown\nkeywords:\n  red: [scenario]\n",
    )
    .unwrap();

    log(&dir, "wrote scenario for parser").success();
    assert_eq!(status_json(&dir)["current_phase"], "RED");
}
