//! CLI help and version output specs.

use crate::prelude::*;

#[test]
fn no_args_shows_usage_and_exits_nonzero() {
    cli().fails().stdout_has("Usage:");
}

#[test]
fn help_flag_shows_usage() {
    cli().args(&["--help"]).passes().stdout_has("Usage:");
}

#[test]
fn version_flag_shows_version() {
    cli().args(&["--version"]).passes().stdout_has("0.1");
}

#[test]
fn tick_help_shows_usage() {
    cli().args(&["tick", "--help"]).passes().stdout_has("Usage:");
}

#[test]
fn weekly_report_help_shows_days_flag() {
    cli().args(&["weekly-report", "--help"]).passes().stdout_has("--days");
}

#[test]
fn reset_help_shows_usage() {
    cli().args(&["reset", "--help"]).passes().stdout_has("Usage:");
}

#[test]
fn install_help_shows_interval_flag() {
    cli().args(&["install", "--help"]).passes().stdout_has("--interval");
}

#[test]
fn uninstall_help_shows_dry_run_flag() {
    cli().args(&["uninstall", "--help"]).passes().stdout_has("--dry-run");
}
