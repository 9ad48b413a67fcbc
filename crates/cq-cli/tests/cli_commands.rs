//! Integration tests for the cq CLI commands.
#![allow(deprecated)] // Command::cargo_bin – macro replacement not yet stable

use std::fs;
use std::path::PathBuf;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

const LIBRARY: &str = r#"{
    "scripts": {
        "greeting": {
            "conversations": [
                { "id": 0, "dialogues": [
                    { "id": 0, "speaker": "Guide", "subtitles": [
                        { "id": 0, "text": "Hi", "duration": 1.0, "voice": "guide" },
                        { "id": 1, "text": "Yes?", "has_question": true }
                    ] }
                ] }
            ],
            "questions": [
                { "label": "Again", "option": 1, "conversation": 0, "dialogue": 0, "subtitle": 1, "target": 0 }
            ]
        }
    },
    "placements": [
        { "kind": "conversation", "name": "guide", "script": "greeting" },
        { "kind": "item", "info": {
            "interactable_id": 7, "name": "Crystal", "description": "Rest here?",
            "item_type": "save", "has_question": true
        } }
    ]
}"#;

/// Write a library (and optional input script) into a temp directory.
fn workspace(library: &str, input: Option<&str>) -> (TempDir, PathBuf, PathBuf) {
    let dir = TempDir::new().unwrap();
    let lib = dir.path().join("library.json");
    let inp = dir.path().join("input.txt");
    fs::write(&lib, library).unwrap();
    if let Some(text) = input {
        fs::write(&inp, text).unwrap();
    }
    (dir, lib, inp)
}

fn colloquy() -> Command {
    let mut cmd = Command::cargo_bin("colloquy").unwrap();
    cmd.env("NO_COLOR", "1");
    cmd
}

// ---------------------------------------------------------------------------
// check
// ---------------------------------------------------------------------------

#[test]
fn check_passes_valid_library() {
    let (_dir, lib, _) = workspace(LIBRARY, None);
    colloquy()
        .args(["check", lib.to_str().unwrap()])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("All checks passed")
                .and(predicate::str::contains("1 scripts, 2 lines, 2 placements")),
        );
}

#[test]
fn check_fails_on_dangling_question() {
    let broken = LIBRARY.replace(r#""subtitle": 1, "target": 0"#, r#""subtitle": 4, "target": 0"#);
    let (_dir, lib, _) = workspace(&broken, None);
    colloquy()
        .args(["check", lib.to_str().unwrap()])
        .assert()
        .failure()
        .stderr(
            predicate::str::contains("missing subtitle (0, 0, 4)")
                .and(predicate::str::contains("error: ")),
        );
}

#[test]
fn check_strict_fails_on_warnings() {
    let warned = LIBRARY.replace(r#""option": 1"#, r#""option": 0"#);
    let (_dir, lib, _) = workspace(&warned, None);

    colloquy()
        .args(["check", lib.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("1 warning"));

    colloquy()
        .args(["check", "--strict", lib.to_str().unwrap()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("0 errors, 1 warning"));
}

#[test]
fn check_reports_unreadable_file() {
    colloquy()
        .args(["check", "/definitely/not/here.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("cannot load"));
}

#[test]
fn check_reports_malformed_json() {
    let (_dir, lib, _) = workspace("{ not json", None);
    colloquy()
        .args(["check", lib.to_str().unwrap()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("error:"));
}

// ---------------------------------------------------------------------------
// outline
// ---------------------------------------------------------------------------

#[test]
fn outline_lists_lines_questions_and_placements() {
    let (_dir, lib, _) = workspace(LIBRARY, None);
    colloquy()
        .args(["outline", lib.to_str().unwrap()])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("greeting")
                .and(predicate::str::contains("Yes?"))
                .and(predicate::str::contains("Again"))
                .and(predicate::str::contains("Crystal"))
                .and(predicate::str::contains("save item")),
        );
}

#[test]
fn outline_script_filter_is_fuzzy() {
    let (_dir, lib, _) = workspace(LIBRARY, None);
    colloquy()
        .args(["outline", lib.to_str().unwrap(), "--script", "greetng"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("Hi").and(predicate::str::contains("Placements").not()),
        );

    colloquy()
        .args(["outline", lib.to_str().unwrap(), "--script", "zzz"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("no script named 'zzz'"));
}

// ---------------------------------------------------------------------------
// play
// ---------------------------------------------------------------------------

#[test]
fn play_greeting_loops_back() {
    let (_dir, lib, input) = workspace(
        LIBRARY,
        Some("enter guide\npress\nwait 1.0\npress\noption 1\n"),
    );
    colloquy()
        .args([
            "play",
            lib.to_str().unwrap(),
            "--input",
            input.to_str().unwrap(),
        ])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("Guide: Hi\n")
                .and(predicate::str::contains("Guide: Yes?\n"))
                .and(predicate::str::contains("  - Again"))
                .and(predicate::str::contains("(0, 0, 0)"))
                .and(predicate::str::contains("2 voice cues")),
        );
}

#[test]
fn play_save_item_with_fuzzy_name() {
    let (_dir, lib, input) = workspace(
        LIBRARY,
        Some("# the crystal by the door\nenter Cristal\npress\npress\noption 1\nrelease\n"),
    );
    colloquy()
        .args([
            "play",
            lib.to_str().unwrap(),
            "-i",
            input.to_str().unwrap(),
            "--verbose",
        ])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("[Crystal]")
                .and(predicate::str::contains("Rest here?"))
                .and(predicate::str::contains("  > yes"))
                .and(predicate::str::contains("save requested")),
        );
}

#[test]
fn play_skip_audio_once() {
    let (_dir, lib, input) = workspace(LIBRARY, Some("enter guide\npress\npress\n"));
    colloquy()
        .args([
            "play",
            lib.to_str().unwrap(),
            "--input",
            input.to_str().unwrap(),
            "--skip-audio",
            "once",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains(" 1 voice cue\n"));
}

#[test]
fn play_rejects_bad_input_line() {
    let (_dir, lib, input) = workspace(LIBRARY, Some("enter guide\ndance\n"));
    colloquy()
        .args([
            "play",
            lib.to_str().unwrap(),
            "--input",
            input.to_str().unwrap(),
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("line 2: unknown command 'dance'"));
}

#[test]
fn play_rejects_unknown_instance() {
    let (_dir, lib, input) = workspace(LIBRARY, Some("enter nobody-at-all\n"));
    colloquy()
        .args([
            "play",
            lib.to_str().unwrap(),
            "--input",
            input.to_str().unwrap(),
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("no instance named 'nobody-at-all'"));
}

#[test]
fn play_rejects_unknown_focus_policy() {
    let (_dir, lib, input) = workspace(LIBRARY, Some("press\n"));
    colloquy()
        .args([
            "play",
            lib.to_str().unwrap(),
            "--input",
            input.to_str().unwrap(),
            "--focus",
            "random",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown focus policy"));
}
