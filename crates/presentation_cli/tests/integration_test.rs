//! Integration tests for the vocabforge binary
//!
//! Only paths that finish before any service is contacted are exercised.

use std::process::{Command, Output};

fn vocabforge(args: &[&str]) -> Output {
    let dir = tempfile::tempdir().unwrap();
    Command::new(env!("CARGO_BIN_EXE_vocabforge"))
        .args(args)
        .current_dir(dir.path())
        .env_remove("VOCABFORGE_LAUNCHER__MAX_ATTEMPTS")
        .output()
        .unwrap()
}

#[test]
fn help_lists_options() {
    let output = vocabforge(&["--help"]);
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success());
    assert!(stdout.contains("--yes"));
    assert!(stdout.contains("--lite"));
    assert!(stdout.contains("[WORDS]"));
}

#[test]
fn missing_words_lists_languages_and_fails() {
    let output = vocabforge(&[]);
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert_eq!(output.status.code(), Some(1));
    assert!(stdout.contains("Available languages"));
    assert!(stdout.contains("Anglais (en)"));
    assert!(stdout.contains("Chinois (zh-cn)"));
}

#[test]
fn missing_config_file_fails() {
    let output = vocabforge(&["hello", "--config", "/nonexistent/vocabforge.toml"]);
    assert!(!output.status.success());
}

#[test]
fn invalid_config_fails_before_processing() {
    let dir = tempfile::tempdir().unwrap();
    let output = Command::new(env!("CARGO_BIN_EXE_vocabforge"))
        .args(["hello", "-y"])
        .current_dir(dir.path())
        .env("VOCABFORGE_LAUNCHER__MAX_ATTEMPTS", "0")
        .output()
        .unwrap();

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(!output.status.success());
    assert!(stderr.contains("max_attempts"));
}

#[test]
fn unknown_flag_is_rejected() {
    let output = vocabforge(&["hello", "--frobnicate"]);
    assert_eq!(output.status.code(), Some(2));
}
