// SPDX-License-Identifier: GPL-3.0-only
// Copyright (C) 2025 Brian Hetro <whee@smaertness.net>

//! End-to-end tests for the trello2md binary.

use std::fs;
use std::path::Path;
use std::process::{Command, Output};
use tempfile::TempDir;

const BOARD_JSON: &str = r#"{
    "name": "Board",
    "shortUrl": "https://trello.com/b/abc",
    "dateLastActivity": "2024-03-01T10:00:00.000Z",
    "lists": [{ "id": "l1", "name": "Todo", "closed": false }],
    "cards": [{
        "id": "c1",
        "name": "Write spec",
        "desc": "",
        "closed": false,
        "idList": "l1",
        "labels": [{ "name": "Urgent", "color": "red" }],
        "attachments": [{ "name": "doc", "url": "http://x/y" }]
    }]
}"#;

const EXPECTED: &str = "# Todo #\n\n## Write spec ##\n\n\n[doc](http://x/y)\n\n\n\n";

fn run(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_trello2md"))
        .args(args)
        .output()
        .expect("Failed to run trello2md")
}

fn write_board(dir: &Path, name: &str) -> String {
    let path = dir.join(name);
    fs::write(&path, BOARD_JSON).expect("Failed to write board");
    path.to_string_lossy().into_owned()
}

#[test]
fn writes_markdown_next_to_input() {
    let dir = TempDir::new().unwrap();
    let input = write_board(dir.path(), "board.json");

    let output = run(&[input.as_str()]);

    assert!(output.status.success());
    let markdown = fs::read_to_string(dir.path().join("board.md")).unwrap();
    assert_eq!(markdown, EXPECTED);
}

#[test]
fn prints_to_stdout() {
    let dir = TempDir::new().unwrap();
    let input = write_board(dir.path(), "board.json");

    let output = run(&["-o", "-", "--labels", input.as_str()]);

    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.starts_with("# Todo #\n\n## Write spec (_Urgent_) ##\n"));
}

#[test]
fn writes_directory_inputs_to_output_directory() {
    let dir = TempDir::new().unwrap();
    let boards = dir.path().join("boards");
    fs::create_dir(&boards).unwrap();
    write_board(&boards, "one.json");
    write_board(&boards, "two.json");
    fs::write(boards.join("notes.txt"), "ignored").unwrap();
    let out = dir.path().join("out");

    let output = run(&["-q", "-o", out.to_str().unwrap(), boards.to_str().unwrap()]);

    assert!(output.status.success());
    assert!(output.stderr.is_empty(), "Quiet mode should print nothing");
    assert_eq!(fs::read_to_string(out.join("one.md")).unwrap(), EXPECTED);
    assert_eq!(fs::read_to_string(out.join("two.md")).unwrap(), EXPECTED);
    assert!(!out.join("notes.md").exists());
}

#[test]
fn skips_existing_output_without_force() {
    let dir = TempDir::new().unwrap();
    let input = write_board(dir.path(), "board.json");
    let target = dir.path().join("board.md");
    fs::write(&target, "keep me").unwrap();

    let skipped = run(&[input.as_str()]);
    assert!(skipped.status.success());
    assert_eq!(fs::read_to_string(&target).unwrap(), "keep me");
    assert!(String::from_utf8_lossy(&skipped.stderr).contains("Skipping"));

    let forced = run(&["--force", input.as_str()]);
    assert!(forced.status.success());
    assert_eq!(fs::read_to_string(&target).unwrap(), EXPECTED);
}

#[test]
fn dry_run_writes_nothing() {
    let dir = TempDir::new().unwrap();
    let input = write_board(dir.path(), "board.json");

    let output = run(&["--dry-run", input.as_str()]);

    assert!(output.status.success());
    assert!(!dir.path().join("board.md").exists());
    assert!(String::from_utf8_lossy(&output.stderr).contains("Would write"));
}

#[test]
fn warns_that_card_links_are_ignored() {
    let dir = TempDir::new().unwrap();
    let input = write_board(dir.path(), "board.json");

    let output = run(&["--card-links", "-o", "-", input.as_str()]);

    assert!(output.status.success());
    assert_eq!(String::from_utf8(output.stdout).unwrap(), EXPECTED);
    assert!(String::from_utf8_lossy(&output.stderr).contains("--card-links"));
}

#[test]
fn fails_on_malformed_board() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("broken.json");
    fs::write(&input, r#"{"name": "B", "cards": [{"id": "c1"}]}"#).unwrap();

    let output = run(&[input.to_str().unwrap()]);

    assert!(!output.status.success());
    assert!(!dir.path().join("broken.md").exists());
}

#[test]
fn reports_missing_inputs_for_empty_directory() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("notes.txt"), "ignored").unwrap();

    let output = run(&["-o", "-", dir.path().to_str().unwrap()]);

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("NoInputFiles"));
    assert!(!stderr.contains("MultipleFilesToStdout"));
}
