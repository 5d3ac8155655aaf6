use std::fs;
use std::path::Path;
use std::process::{Command, Output};

use predicates::prelude::*;
use serde_json::Value;
use tempfile::tempdir;

fn tick(dir: &Path) -> assert_cmd::Command {
    let mut cmd = assert_cmd::Command::new(assert_cmd::cargo::cargo_bin!("tick"));
    cmd.current_dir(dir)
        .env("NO_COLOR", "1")
        .env_remove("TICK_FILE")
        .env_remove("RUST_LOG")
        .args(["--file", "todos.json"]);
    cmd
}

fn run_tick(dir: &Path, args: &[&str]) -> Output {
    let binary = assert_cmd::cargo::cargo_bin!("tick");
    let mut cmd = Command::new(binary);
    cmd.current_dir(dir)
        .env("NO_COLOR", "1")
        .env_remove("TICK_FILE")
        .args(["--file", "todos.json"])
        .args(args);
    cmd.output().expect("tick command executes")
}

fn run_tick_json(dir: &Path, args: &[&str]) -> Value {
    let mut full = vec!["--format", "json"];
    full.extend_from_slice(args);
    let output = run_tick(dir, &full);
    assert!(
        output.status.success(),
        "tick {:?} failed:\nstdout:\n{}\nstderr:\n{}",
        args,
        String::from_utf8_lossy(&output.stdout),
        String::from_utf8_lossy(&output.stderr)
    );
    serde_json::from_slice(&output.stdout).expect("valid json stdout")
}

fn listed_descriptions(dir: &Path) -> Vec<String> {
    run_tick_json(dir, &["list"])
        .as_array()
        .expect("list output is an array")
        .iter()
        .map(|e| e["description"].as_str().unwrap_or_default().to_string())
        .collect()
}

#[test]
fn add_then_list_sorts_by_priority() {
    let dir = tempdir().unwrap();
    run_tick_json(dir.path(), &["add", "later", "--priority", "low"]);
    run_tick_json(dir.path(), &["add", "now", "-p", "High", "--tags", "work,urgent"]);
    run_tick_json(dir.path(), &["add", "soon"]);

    let list = run_tick_json(dir.path(), &["list"]);
    let rows: Vec<(u64, u64, &str)> = list
        .as_array()
        .unwrap()
        .iter()
        .map(|e| {
            (
                e["index"].as_u64().unwrap(),
                e["position"].as_u64().unwrap(),
                e["description"].as_str().unwrap(),
            )
        })
        .collect();
    assert_eq!(rows, vec![(0, 1, "now"), (1, 2, "soon"), (2, 0, "later")]);
    assert_eq!(list[0]["tags"], serde_json::json!(["work", "urgent"]));
    assert_eq!(list[0]["priority"], "High");
}

#[test]
fn pretty_list_shows_display_indices() {
    let dir = tempdir().unwrap();
    tick(dir.path())
        .args(["list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No tasks yet!"));

    tick(dir.path()).args(["add", "b", "-p", "low"]).assert().success();
    tick(dir.path()).args(["add", "a", "-p", "high"]).assert().success();
    tick(dir.path())
        .args(["list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("○ 0: a (High)"))
        .stdout(predicate::str::contains("○ 1: b (Low)"));
}

#[test]
fn complete_addresses_display_index() {
    let dir = tempdir().unwrap();
    run_tick_json(dir.path(), &["add", "low one", "-p", "low"]);
    run_tick_json(dir.path(), &["add", "high one", "-p", "high"]);

    let done = run_tick_json(dir.path(), &["complete", "0"]);
    assert_eq!(done["description"], "high one");
    assert_eq!(done["completed"], true);

    // Setting again is a no-op, --toggle flips
    let again = run_tick_json(dir.path(), &["complete", "0"]);
    assert_eq!(again["completed"], true);
    let reopened = run_tick_json(dir.path(), &["complete", "0", "--toggle"]);
    assert_eq!(reopened["completed"], false);

    let stored: Value =
        serde_json::from_str(&fs::read_to_string(dir.path().join("todos.json")).unwrap()).unwrap();
    assert_eq!(stored[0]["completed"], false);
    assert_eq!(stored[1]["description"], "high one");
}

#[test]
fn edit_updates_only_given_fields() {
    let dir = tempdir().unwrap();
    run_tick_json(dir.path(), &["add", "draft", "-p", "low", "-t", "a,b"]);

    let edited = run_tick_json(dir.path(), &["edit", "0", "--description", "final"]);
    assert_eq!(edited["description"], "final");
    assert_eq!(edited["priority"], "Low");
    assert_eq!(edited["tags"], serde_json::json!(["a", "b"]));

    let cleared = run_tick_json(dir.path(), &["edit", "0", "--tags", ""]);
    assert_eq!(cleared["tags"], serde_json::json!([]));
    assert_eq!(cleared["description"], "final");
}

#[test]
fn remove_with_tag_filter() {
    let dir = tempdir().unwrap();
    run_tick_json(dir.path(), &["add", "home chore", "-t", "home"]);
    run_tick_json(dir.path(), &["add", "work item", "-t", "work"]);

    let removed = run_tick_json(dir.path(), &["remove", "0", "--tag", "work"]);
    assert_eq!(removed["description"], "work item");
    assert_eq!(listed_descriptions(dir.path()), vec!["home chore"]);
}

#[test]
fn errors_use_json_envelope_and_exit_one() {
    let dir = tempdir().unwrap();
    run_tick_json(dir.path(), &["add", "only"]);

    for (args, code) in [
        (vec!["remove", "3"], "index_out_of_range"),
        (vec!["complete", "-1"], "index_out_of_range"),
        (vec!["add", "x", "--priority", "urgent"], "invalid_priority"),
        (vec!["add", "   "], "empty_description"),
        (vec!["import", "csv", "missing.csv"], "malformed_import_source"),
    ] {
        let mut full = vec!["--json"];
        full.extend(args.iter().copied());
        let output = run_tick(dir.path(), &full);
        assert_eq!(output.status.code(), Some(1), "{args:?}");
        let err: Value = serde_json::from_slice(&output.stderr).expect("json error on stderr");
        assert_eq!(err["error"], code, "{args:?}");
        assert!(err["message"].is_string());
    }

    assert_eq!(listed_descriptions(dir.path()), vec!["only"]);
}

#[test]
fn pretty_errors_are_plain_text() {
    let dir = tempdir().unwrap();
    tick(dir.path())
        .args(["remove", "0"])
        .assert()
        .code(1)
        .stderr(predicate::str::starts_with("error: "));
}

#[test]
fn clear_reports_removed_count() {
    let dir = tempdir().unwrap();
    run_tick_json(dir.path(), &["add", "a"]);
    run_tick_json(dir.path(), &["add", "b"]);

    let cleared = run_tick_json(dir.path(), &["clear"]);
    assert_eq!(cleared["removed"], 2);
    assert!(listed_descriptions(dir.path()).is_empty());

    tick(dir.path())
        .args(["clear"])
        .assert()
        .success()
        .stdout(predicate::str::contains("All tasks have been cleared"));
}

#[test]
fn stats_summarize_completion() {
    let dir = tempdir().unwrap();
    run_tick_json(dir.path(), &["add", "a", "-p", "high", "-t", "x"]);
    run_tick_json(dir.path(), &["add", "b", "-t", "x,y"]);
    run_tick_json(dir.path(), &["complete", "0"]);

    let stats = run_tick_json(dir.path(), &["stats"]);
    assert_eq!(stats["total"], 2);
    assert_eq!(stats["completed"], 1);
    assert_eq!(stats["percentage"], 50.0);
    assert_eq!(stats["pending_by_priority"]["medium"], 1);
    assert_eq!(stats["top_tags"][0]["tag"], "x");
    assert_eq!(stats["top_tags"][0]["count"], 2);
}

#[test]
fn legacy_file_is_migrated_on_first_run() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("todos.json");
    fs::write(&path, r#"["first", "second"]"#).unwrap();

    tick(dir.path())
        .args(["list"])
        .assert()
        .success()
        .stderr(predicate::str::contains("upgraded 2 tasks"));

    let stored: Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(stored[0]["description"], "first");
    assert_eq!(stored[1]["priority"], "Medium");
}

#[test]
fn corrupt_file_warns_and_backs_up() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("todos.json"), "[{oops").unwrap();

    tick(dir.path())
        .args(["list"])
        .assert()
        .success()
        .stderr(predicate::str::contains("could not be read"));
    assert_eq!(
        fs::read_to_string(dir.path().join("todos.json.backup")).unwrap(),
        "[{oops"
    );
}

#[test]
fn export_and_import_markdown() {
    let dir = tempdir().unwrap();
    run_tick_json(dir.path(), &["add", "write docs", "-p", "high"]);
    run_tick_json(dir.path(), &["add", "dentist", "--due", "2024-01-01"]);

    let exported = run_tick_json(dir.path(), &["export", "markdown"]);
    assert_eq!(exported["exported"], 2);
    assert_eq!(exported["path"], "todos.md");
    let md = fs::read_to_string(dir.path().join("todos.md")).unwrap();
    assert!(md.starts_with("# Tasks\n"));
    assert!(md.contains("- [ ] write docs  _(priority: High)_"));
    assert!(md.contains("  - Due: 2024-01-01"));

    let imported = run_tick_json(dir.path(), &["import", "md", "todos.md"]);
    assert_eq!(imported["imported"], 2);
    assert_eq!(
        listed_descriptions(dir.path()),
        vec!["write docs", "write docs", "dentist", "dentist"]
    );
}

#[test]
fn export_csv_to_explicit_path() {
    let dir = tempdir().unwrap();
    run_tick_json(dir.path(), &["add", "say \"hi\", loudly"]);

    tick(dir.path())
        .args(["export", "csv", "out.csv"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Exported 1 tasks"));

    let csv = fs::read_to_string(dir.path().join("out.csv")).unwrap();
    let mut lines = csv.lines();
    assert_eq!(lines.next(), Some("text,priority,completed,created_at,due"));
    assert!(
        lines
            .next()
            .unwrap()
            .starts_with(r#""say ""hi"", loudly","Medium","false","#)
    );
}

#[test]
fn export_ics_counts_events() {
    let dir = tempdir().unwrap();
    run_tick_json(dir.path(), &["add", "no date"]);
    run_tick_json(dir.path(), &["add", "meeting", "--due", "2024-01-01T10:00:00Z"]);

    let exported = run_tick_json(dir.path(), &["export", "ics"]);
    assert_eq!(exported["exported"], 1);
    let ics = fs::read_to_string(dir.path().join("todos.ics")).unwrap();
    assert!(ics.contains("\r\nDTSTART:20240101T100000Z\r\n"));
    assert_eq!(ics.matches("BEGIN:VEVENT").count(), 1);
}

#[test]
fn empty_import_leaves_store_untouched() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("empty.md"), "# Nothing here\n").unwrap();

    let result = run_tick_json(dir.path(), &["import", "md", "empty.md"]);
    assert_eq!(result["imported"], 0);
    assert!(!dir.path().join("todos.json").exists());
}

#[test]
fn csv_without_description_column_is_rejected() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("bad.csv"), "foo,bar\n1,2\n").unwrap();

    let output = run_tick(dir.path(), &["--json", "import", "csv", "bad.csv"]);
    assert_eq!(output.status.code(), Some(1));
    let err: Value = serde_json::from_slice(&output.stderr).unwrap();
    assert_eq!(err["error"], "malformed_import_source");
}

#[test]
fn store_path_from_env_and_config() {
    let dir = tempdir().unwrap();
    let binary = assert_cmd::cargo::cargo_bin!("tick");

    assert_cmd::Command::new(binary)
        .current_dir(dir.path())
        .env("NO_COLOR", "1")
        .env("TICK_FILE", "from_env.json")
        .args(["add", "env task"])
        .assert()
        .success();
    assert!(dir.path().join("from_env.json").exists());

    fs::write(dir.path().join("cfg.yml"), "store_path: from_config.json\n").unwrap();
    assert_cmd::Command::new(binary)
        .current_dir(dir.path())
        .env("NO_COLOR", "1")
        .env_remove("TICK_FILE")
        .args(["--config", "cfg.yml", "add", "config task"])
        .assert()
        .success();
    assert!(dir.path().join("from_config.json").exists());
}
