//! End-to-end runs of the `tgrid` binary

use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use pretty_assertions::assert_eq;

fn tgrid_bin() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_tgrid"))
}

fn tgrid(store: &Path, args: &[&str]) -> Output {
    Command::new(tgrid_bin())
        .env_remove("RUST_LOG")
        .env_remove("TGRID_LOG")
        .env("TGRID_STORE", store)
        .args(args)
        .output()
        .unwrap_or_else(|e| panic!("failed to run tgrid: {e}"))
}

fn stdout(output: &Output) -> String {
    assert!(
        output.status.success(),
        "tgrid failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    String::from_utf8(output.stdout.clone()).unwrap()
}

#[test]
fn test_new_edit_render() {
    let dir = tempfile::tempdir().unwrap();
    let store = dir.path().join("store");
    let sheet = dir.path().join("sheet.json");
    let sheet_arg = sheet.to_str().unwrap();

    stdout(&tgrid(&store, &["new", sheet_arg, "--rows", "2", "--cols", "2"]));
    stdout(&tgrid(
        &store,
        &["edit", sheet_arg, "merge-right@A1", "set@A1=<b>Total</b>", "set@B2=7"],
    ));

    let drawn = stdout(&tgrid(&store, &["render", sheet_arg]));
    let expected = "\
+-------+
|Total  |
+---+---+
|   |7  |
+---+---+
";
    assert_eq!(drawn, expected);

    let info = stdout(&tgrid(&store, &["info", sheet_arg]));
    assert!(info.contains("Size: 2 rows x 2 columns"), "{}", info);
    assert!(info.contains("A1:B1 (1x2) \"Total\""), "{}", info);
}

#[test]
fn test_edit_rejects_bad_command_without_writing() {
    let dir = tempfile::tempdir().unwrap();
    let store = dir.path().join("store");
    let sheet = dir.path().join("sheet.json");
    let sheet_arg = sheet.to_str().unwrap();

    stdout(&tgrid(&store, &["new", sheet_arg]));
    let before = std::fs::read_to_string(&sheet).unwrap();

    let output = tgrid(&store, &["edit", sheet_arg, "merge-right@A1", "merge-up@A1"]);
    assert!(!output.status.success());
    assert_eq!(std::fs::read_to_string(&sheet).unwrap(), before);
}

#[test]
fn test_store_save_list_show_remove() {
    let dir = tempfile::tempdir().unwrap();
    let store = dir.path().join("store");
    let sheet = dir.path().join("sheet.json");
    let sheet_arg = sheet.to_str().unwrap();

    stdout(&tgrid(&store, &["new", sheet_arg, "--rows", "1", "--cols", "1"]));
    let id = stdout(&tgrid(
        &store,
        &["store", "save", sheet_arg, "--name", "Weekly", "--kind", "report"],
    ));
    assert_eq!(id.trim(), "1");

    let listed = stdout(&tgrid(&store, &["store", "list", "--kind", "report"]));
    assert_eq!(listed, "1\treport\tprivate\ttemplate\tWeekly\n");
    let none = stdout(&tgrid(&store, &["store", "list", "--kind", "feedback"]));
    assert_eq!(none, "");

    let drawn = stdout(&tgrid(&store, &["store", "show", "1", "--render"]));
    assert_eq!(drawn, "+---+\n|   |\n+---+\n");

    stdout(&tgrid(&store, &["store", "remove", "1"]));
    assert!(!tgrid(&store, &["store", "show", "1"]).status.success());
}

#[test]
fn test_store_show_keeps_damaged_entries() {
    let dir = tempfile::tempdir().unwrap();
    let store = dir.path().join("store");
    std::fs::create_dir_all(&store).unwrap();
    let record = r#"{
  "id": 7,
  "name": "Hand edited",
  "description": "",
  "isTemplate": true,
  "visibility": "private",
  "kind": "feedback",
  "sheet": {
    "rows": 1,
    "cols": 2,
    "cells": [
      { "r": 0, "c": 0, "content": "Kept" },
      { "r": 0, "c": 5, "content": "Stray" }
    ]
  },
  "createdAt": "2026-01-01T00:00:00Z",
  "updatedAt": "2026-01-01T00:00:00Z"
}"#;
    std::fs::write(store.join("7.json"), record).unwrap();

    let json = stdout(&tgrid(&store, &["store", "show", "7"]));
    assert!(json.contains("\"Stray\""), "{}", json);
    assert!(json.contains("\"c\": 5"), "{}", json);

    let output = tgrid(&store, &["store", "show", "7", "--render"]);
    let drawn = stdout(&output);
    assert!(drawn.contains("Kept"), "{}", drawn);
    assert!(!drawn.contains("Stray"), "{}", drawn);
    let warning = String::from_utf8_lossy(&output.stderr);
    assert!(warning.contains("1 entries skipped"), "{}", warning);
}
