//! `aw-analyzer reset` specs.

use crate::prelude::*;
use std::fs;

#[test]
fn reset_on_missing_state_file_succeeds() {
    let sandbox = Sandbox::new();
    sandbox.cli().args(&["reset"]).passes().stdout_has("state cleared");
    assert!(!sandbox.state_path().exists() || fs::read_to_string(sandbox.state_path()).unwrap() == "{}");
}

#[test]
fn reset_clears_existing_markers() {
    let sandbox = Sandbox::new();
    if let Some(parent) = sandbox.state_path().parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(sandbox.state_path(), r#"{"cooldown:daily-summary":"2026-07-01T00:00:00Z"}"#).unwrap();

    sandbox.cli().args(&["reset"]).passes();

    let contents = fs::read_to_string(sandbox.state_path()).unwrap();
    assert_eq!(contents, "{}");
}
