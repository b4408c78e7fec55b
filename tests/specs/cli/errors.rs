//! CLI argument error specs.

use crate::prelude::*;

#[test]
fn unknown_subcommand_fails_with_usage_error() {
    cli().args(&["bogus"]).fails().stderr_has("error");
}

#[test]
fn verbose_and_quiet_conflict() {
    cli().args(&["--verbose", "--quiet", "reset"]).fails().stderr_has("cannot be used with");
}

#[test]
fn weekly_report_rejects_non_numeric_days() {
    cli().args(&["weekly-report", "--days", "not-a-number"]).fails().stderr_has("error");
}

#[test]
fn invalid_tz_offset_env_is_a_config_error() {
    cli()
        .env("AW_ANALYZER_TZ_OFFSET_MINUTES", "not-a-number")
        .args(&["reset"])
        .fails()
        .stderr_has("AW_ANALYZER_TZ_OFFSET_MINUTES");
}
