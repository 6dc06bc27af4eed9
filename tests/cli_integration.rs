//! Integration tests for the `dw` CLI.
//!
//! Each test creates a temp directory, runs `dw -C <tmp>/data` as a
//! subprocess, and verifies stdout and/or the stored files.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

use pretty_assertions::assert_eq;

/// Get the path to the built `dw` binary.
fn dw_bin() -> PathBuf {
    // cargo test builds to target/debug/
    let mut path = std::env::current_exe().unwrap();
    path.pop(); // remove test binary name
    path.pop(); // remove deps/
    path.push("dw");
    path
}

fn data_dir(root: &Path) -> PathBuf {
    root.join("data")
}

/// Run `dw` against `<dir>/data` with `dir` as the working directory,
/// returning (stdout, stderr, success).
fn run_dw(dir: &Path, args: &[&str]) -> (String, String, bool) {
    let data = data_dir(dir);
    let output = Command::new(dw_bin())
        .arg("-C")
        .arg(&data)
        .args(args)
        .current_dir(dir)
        .output()
        .expect("failed to run dw");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    (stdout, stderr, output.status.success())
}

/// Run `dw` expecting success, return stdout.
fn run_dw_ok(dir: &Path, args: &[&str]) -> String {
    let (stdout, stderr, success) = run_dw(dir, args);
    if !success {
        panic!(
            "dw {:?} failed:\nstdout: {}\nstderr: {}",
            args, stdout, stderr
        );
    }
    stdout
}

/// Run `dw` expecting failure, return stderr.
fn run_dw_err(dir: &Path, args: &[&str]) -> String {
    let (stdout, stderr, success) = run_dw(dir, args);
    if success {
        panic!("dw {:?} unexpectedly succeeded:\nstdout: {}", args, stdout);
    }
    stderr
}

fn titles(dir: &Path) -> Vec<String> {
    let out = run_dw_ok(dir, &["lists", "--json"]);
    let value: serde_json::Value = serde_json::from_str(&out).unwrap();
    value
        .as_array()
        .unwrap()
        .iter()
        .map(|l| l["title"].as_str().unwrap().to_string())
        .collect()
}

fn items(dir: &Path, list: &str) -> Vec<String> {
    let out = run_dw_ok(dir, &["show", list, "--json"]);
    let value: serde_json::Value = serde_json::from_str(&out).unwrap();
    value["items"]
        .as_array()
        .unwrap()
        .iter()
        .map(|i| i.as_str().unwrap().to_string())
        .collect()
}

// ---------------------------------------------------------------------------
// Read commands
// ---------------------------------------------------------------------------

#[test]
fn test_lists_empty() {
    let tmp = tempfile::TempDir::new().unwrap();
    let out = run_dw_ok(tmp.path(), &["lists"]);
    assert_eq!(out.trim(), "No lists yet");
}

#[test]
fn test_new_then_show() {
    let tmp = tempfile::TempDir::new().unwrap();
    let out = run_dw_ok(tmp.path(), &["new", "Team", "Ali", "  ", "Sara"]);
    assert!(out.starts_with("List created ["));

    let out = run_dw_ok(tmp.path(), &["show", "1"]);
    assert_eq!(out, "Team\n  1. Ali\n  2. Sara\n");

    let out = run_dw_ok(tmp.path(), &["lists"]);
    assert!(out.starts_with("1. Team  (2 items)  ["));
}

#[test]
fn test_new_trims_padded_items() {
    let tmp = tempfile::TempDir::new().unwrap();
    run_dw_ok(tmp.path(), &["new", "Team", "  Ali  ", "   ", "Sara "]);
    let out = run_dw_ok(tmp.path(), &["show", "1", "--json"]);
    let value: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(value["items"], serde_json::json!(["Ali", "Sara"]));
}

#[test]
fn test_new_blank_title_fails_without_writing() {
    let tmp = tempfile::TempDir::new().unwrap();
    let err = run_dw_err(tmp.path(), &["new", "   "]);
    assert!(err.contains("error: title cannot be empty"));
    assert!(!data_dir(tmp.path()).join("dawatLists").exists());
}

#[test]
fn test_lists_filter() {
    let tmp = tempfile::TempDir::new().unwrap();
    run_dw_ok(tmp.path(), &["new", "Ali's Crew"]);
    run_dw_ok(tmp.path(), &["new", "Bravo", "Sara"]);

    let out = run_dw_ok(tmp.path(), &["lists", "ALI"]);
    assert!(out.contains("Ali's Crew"));
    assert!(!out.contains("Bravo"));

    // Items match too, and positions stay those of the full order
    let out = run_dw_ok(tmp.path(), &["lists", "sara"]);
    assert!(out.starts_with("2. Bravo"));

    let out = run_dw_ok(tmp.path(), &["lists", "zzz"]);
    assert_eq!(out.trim(), "No lists match \"zzz\"");
}

#[test]
fn test_show_not_found() {
    let tmp = tempfile::TempDir::new().unwrap();
    run_dw_ok(tmp.path(), &["new", "Team"]);
    let err = run_dw_err(tmp.path(), &["show", "xyz"]);
    assert!(err.contains("error: list not found: xyz"));
}

#[test]
fn test_show_by_id_prefix() {
    let tmp = tempfile::TempDir::new().unwrap();
    run_dw_ok(tmp.path(), &["new", "Team"]);
    let out = run_dw_ok(tmp.path(), &["lists", "--json"]);
    let value: serde_json::Value = serde_json::from_str(&out).unwrap();
    let id = value[0]["id"].as_str().unwrap().to_string();

    let out = run_dw_ok(tmp.path(), &["show", &id[..6]]);
    assert!(out.starts_with("Team"));
}

// ---------------------------------------------------------------------------
// Write commands
// ---------------------------------------------------------------------------

#[test]
fn test_item_lifecycle() {
    let tmp = tempfile::TempDir::new().unwrap();
    run_dw_ok(tmp.path(), &["new", "Team", "Ali"]);

    assert_eq!(run_dw_ok(tmp.path(), &["add", "1", "Sara"]).trim(), "Name added");
    assert_eq!(items(tmp.path(), "1"), vec!["Ali", "Sara"]);

    assert_eq!(
        run_dw_ok(tmp.path(), &["edit", "1", "1", "Aliya"]).trim(),
        "Name updated"
    );
    assert_eq!(run_dw_ok(tmp.path(), &["edit", "1", "1", "Aliya"]).trim(), "No change");
    assert_eq!(run_dw_ok(tmp.path(), &["edit", "1", "1", "  "]).trim(), "No change");

    assert_eq!(run_dw_ok(tmp.path(), &["rm", "1", "1"]).trim(), "Name deleted");
    assert_eq!(items(tmp.path(), "1"), vec!["Sara"]);

    let err = run_dw_err(tmp.path(), &["rm", "1", "5"]);
    assert!(err.contains("no item 5 (list has 1)"));
}

#[test]
fn test_rm_leaves_other_lists_alone() {
    let tmp = tempfile::TempDir::new().unwrap();
    run_dw_ok(tmp.path(), &["new", "A", "x", "y"]);
    run_dw_ok(tmp.path(), &["new", "B", "x", "y"]);
    run_dw_ok(tmp.path(), &["rm", "1", "1"]);
    assert_eq!(items(tmp.path(), "1"), vec!["y"]);
    assert_eq!(items(tmp.path(), "2"), vec!["x", "y"]);
}

#[test]
fn test_title() {
    let tmp = tempfile::TempDir::new().unwrap();
    run_dw_ok(tmp.path(), &["new", "Team"]);
    assert_eq!(
        run_dw_ok(tmp.path(), &["title", "1", "Team Alpha"]).trim(),
        "Title updated"
    );
    // Blank title keeps the old one
    assert_eq!(run_dw_ok(tmp.path(), &["title", "1", " "]).trim(), "No change");
    assert_eq!(titles(tmp.path()), vec!["Team Alpha"]);
}

#[test]
fn test_mv() {
    let tmp = tempfile::TempDir::new().unwrap();
    for t in ["A", "B", "C"] {
        run_dw_ok(tmp.path(), &["new", t]);
    }
    assert_eq!(run_dw_ok(tmp.path(), &["mv", "1", "2"]).trim(), "Order updated");
    assert_eq!(titles(tmp.path()), vec!["B", "A", "C"]);

    // Past the end clamps
    run_dw_ok(tmp.path(), &["mv", "1", "99"]);
    assert_eq!(titles(tmp.path()), vec!["A", "C", "B"]);

    assert_eq!(run_dw_ok(tmp.path(), &["mv", "1", "1"]).trim(), "No change");
    run_dw_err(tmp.path(), &["mv", "1", "0"]);
}

#[test]
fn test_delete_requires_yes() {
    let tmp = tempfile::TempDir::new().unwrap();
    run_dw_ok(tmp.path(), &["new", "Team"]);
    run_dw_ok(tmp.path(), &["new", "Bravo"]);

    let err = run_dw_err(tmp.path(), &["delete", "1"]);
    assert!(err.contains("without --yes"));
    assert_eq!(titles(tmp.path()), vec!["Team", "Bravo"]);

    assert_eq!(
        run_dw_ok(tmp.path(), &["delete", "1", "--yes"]).trim(),
        "List removed"
    );
    assert_eq!(titles(tmp.path()), vec!["Bravo"]);
}

#[test]
fn test_clear_requires_yes() {
    let tmp = tempfile::TempDir::new().unwrap();
    run_dw_ok(tmp.path(), &["new", "Team"]);
    run_dw_err(tmp.path(), &["clear"]);
    assert!(data_dir(tmp.path()).join("dawatLists").exists());

    assert_eq!(
        run_dw_ok(tmp.path(), &["clear", "--yes"]).trim(),
        "All lists cleared"
    );
    assert!(!data_dir(tmp.path()).join("dawatLists").exists());
    assert_eq!(run_dw_ok(tmp.path(), &["lists"]).trim(), "No lists yet");
}

// ---------------------------------------------------------------------------
// Storage
// ---------------------------------------------------------------------------

#[test]
fn test_stored_format() {
    let tmp = tempfile::TempDir::new().unwrap();
    run_dw_ok(tmp.path(), &["new", "Team", "Ali"]);
    let raw = fs::read_to_string(data_dir(tmp.path()).join("dawatLists")).unwrap();
    let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
    let list = &value["lists"][0];
    assert_eq!(list["title"], "Team");
    assert_eq!(list["items"][0], "Ali");
    assert!(list["id"].is_string());
    assert!(list["createdAt"].is_string());
}

#[test]
fn test_corrupt_store_reads_as_empty() {
    let tmp = tempfile::TempDir::new().unwrap();
    let data = data_dir(tmp.path());
    fs::create_dir_all(&data).unwrap();
    fs::write(data.join("dawatLists"), "{not json").unwrap();

    assert_eq!(run_dw_ok(tmp.path(), &["lists"]).trim(), "No lists yet");
    // The next write replaces the corrupt data
    run_dw_ok(tmp.path(), &["new", "Team"]);
    assert_eq!(titles(tmp.path()), vec!["Team"]);
}

#[test]
fn test_malformed_config_is_an_error() {
    let tmp = tempfile::TempDir::new().unwrap();
    let data = data_dir(tmp.path());
    fs::create_dir_all(&data).unwrap();
    fs::write(data.join("config.toml"), "[ui\nbroken").unwrap();
    let err = run_dw_err(tmp.path(), &["lists"]);
    assert!(err.contains("could not parse"));
}

// ---------------------------------------------------------------------------
// Export and theme
// ---------------------------------------------------------------------------

#[test]
fn test_export_to_stdout() {
    let tmp = tempfile::TempDir::new().unwrap();
    run_dw_ok(tmp.path(), &["new", "Team", "Ali", "Sara"]);
    let out = run_dw_ok(tmp.path(), &["export", "-o", "-"]);
    let lines: Vec<&str> = out.lines().collect();
    assert_eq!(lines[0], "Dawat-E-Mehnat Lists");
    assert!(lines[1].starts_with("Exported: "));
    assert_eq!(&lines[2..], &["", "1. Team", "  1) Ali", "  2) Sara", ""]);
}

#[test]
fn test_export_default_file() {
    let tmp = tempfile::TempDir::new().unwrap();
    run_dw_ok(tmp.path(), &["new", "Team"]);
    let out = run_dw_ok(tmp.path(), &["export"]);
    assert!(out.starts_with("Lists exported to "));

    let exported: Vec<_> = fs::read_dir(tmp.path())
        .unwrap()
        .filter_map(|e| e.ok())
        .map(|e| e.file_name().to_string_lossy().into_owned())
        .filter(|n| n.starts_with("Dawat_E_Mehnat_Lists_") && n.ends_with(".txt"))
        .collect();
    assert_eq!(exported.len(), 1);
}

#[test]
fn test_theme() {
    let tmp = tempfile::TempDir::new().unwrap();
    assert_eq!(run_dw_ok(tmp.path(), &["theme"]).trim(), "Theme: light");
    assert_eq!(run_dw_ok(tmp.path(), &["theme", "dark"]).trim(), "Theme: dark");
    assert_eq!(
        fs::read_to_string(data_dir(tmp.path()).join("dawatTheme")).unwrap(),
        "dark"
    );
    let out = run_dw_ok(tmp.path(), &["theme", "--json"]);
    let value: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(value["theme"], "dark");

    let err = run_dw_err(tmp.path(), &["theme", "blue"]);
    assert!(err.contains("unknown theme 'blue'"));
}
