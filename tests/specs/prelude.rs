//! Test helpers for black-box aw-analyzer specs.
//!
//! Provides a fluent DSL for invoking the compiled binary with an isolated
//! state directory and home directory, so tests never touch the real
//! `~/.aw-analyzer` state or installer targets.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic, dead_code)]

use std::path::{Path, PathBuf};
use std::process::{Command, Output};

/// Returns the path to the aw-analyzer binary, checking llvm-cov target
/// directory first, then falling back to resolving relative to the test
/// binary itself when `CARGO_MANIFEST_DIR` is stale.
fn binary_path() -> PathBuf {
    let manifest_dir = Path::new(env!("CARGO_MANIFEST_DIR"));

    let llvm_cov_path = manifest_dir.join("target/llvm-cov-target/debug/aw-analyzer");
    if llvm_cov_path.exists() {
        return llvm_cov_path;
    }

    let standard = manifest_dir.join("target/debug/aw-analyzer");
    if standard.exists() {
        return standard;
    }

    if let Ok(exe) = std::env::current_exe() {
        if let Some(debug_dir) = exe.parent().and_then(|d| d.parent()) {
            let fallback = debug_dir.join("aw-analyzer");
            if fallback.exists() {
                return fallback;
            }
        }
    }

    standard
}

/// Create a CLI builder for aw-analyzer commands.
pub fn cli() -> CliBuilder {
    CliBuilder::new()
}

/// Fluent builder for a single `aw-analyzer` invocation.
pub struct CliBuilder {
    args: Vec<String>,
    dir: Option<PathBuf>,
    envs: Vec<(String, String)>,
}

impl CliBuilder {
    fn new() -> Self {
        Self { args: Vec::new(), dir: None, envs: Vec::new() }
    }

    pub fn args(mut self, args: &[&str]) -> Self {
        self.args.extend(args.iter().map(|s| s.to_string()));
        self
    }

    pub fn pwd(mut self, path: impl Into<PathBuf>) -> Self {
        self.dir = Some(path.into());
        self
    }

    pub fn env(mut self, key: &str, value: impl AsRef<str>) -> Self {
        self.envs.push((key.to_string(), value.as_ref().to_string()));
        self
    }

    pub fn command(self) -> Command {
        let mut cmd = Command::new(binary_path());
        cmd.args(&self.args);

        if let Some(dir) = self.dir {
            cmd.current_dir(dir);
        }

        // Prevent ambient AW_ANALYZER_* from the test runner's own
        // environment from leaking into a test that didn't ask for it.
        for key in [
            "AW_ANALYZER_LLM_API_KEY",
            "AW_ANALYZER_LLM_MODEL",
            "AW_ANALYZER_CHAT_WEBHOOK_URL",
            "AW_ANALYZER_CHAT_BOT_TOKEN",
            "AW_ANALYZER_CHAT_CHANNEL_ID",
            "AW_ANALYZER_ACTIVITY_BASE_URL",
            "AW_ANALYZER_STATE_PATH",
            "AW_ANALYZER_DASHBOARD_BASE_URL",
            "AW_ANALYZER_LOG_LEVEL",
            "AW_ANALYZER_TZ_OFFSET_MINUTES",
        ] {
            cmd.env_remove(key);
        }

        for (key, value) in self.envs {
            cmd.env(key, value);
        }

        cmd
    }

    pub fn passes(self) -> RunAssert {
        let mut cmd = self.command();
        let output = cmd.output().expect("command should run");
        assert!(
            output.status.success(),
            "expected command to pass, got exit code {:?}\nstdout: {}\nstderr: {}",
            output.status.code(),
            String::from_utf8_lossy(&output.stdout),
            String::from_utf8_lossy(&output.stderr)
        );
        RunAssert { output }
    }

    pub fn fails(self) -> RunAssert {
        let mut cmd = self.command();
        let output = cmd.output().expect("command should run");
        assert!(
            !output.status.success(),
            "expected command to fail, but it passed\nstdout: {}\nstderr: {}",
            String::from_utf8_lossy(&output.stdout),
            String::from_utf8_lossy(&output.stderr)
        );
        RunAssert { output }
    }
}

/// Result of a CLI run, for chaining assertions.
pub struct RunAssert {
    output: Output,
}

impl RunAssert {
    pub fn stdout(&self) -> String {
        String::from_utf8_lossy(&self.output.stdout).into_owned()
    }

    pub fn stderr(&self) -> String {
        String::from_utf8_lossy(&self.output.stderr).into_owned()
    }

    pub fn stdout_has(self, expected: &str) -> Self {
        let stdout = self.stdout();
        assert!(stdout.contains(expected), "stdout does not contain '{expected}'\nstdout: {stdout}");
        self
    }

    pub fn stdout_lacks(self, unexpected: &str) -> Self {
        let stdout = self.stdout();
        assert!(!stdout.contains(unexpected), "stdout should not contain '{unexpected}'\nstdout: {stdout}");
        self
    }

    pub fn stderr_has(self, expected: &str) -> Self {
        let stderr = self.stderr();
        assert!(stderr.contains(expected), "stderr does not contain '{expected}'\nstderr: {stderr}");
        self
    }
}

/// An isolated home + state directory pair, so `install`/`uninstall`/`reset`
/// never touch the real filesystem outside the test.
pub struct Sandbox {
    home: tempfile::TempDir,
    state_dir: tempfile::TempDir,
}

impl Sandbox {
    pub fn new() -> Self {
        Self { home: tempfile::tempdir().unwrap(), state_dir: tempfile::tempdir().unwrap() }
    }

    pub fn state_path(&self) -> PathBuf {
        self.state_dir.path().join("state.json")
    }

    /// Run aw-analyzer with this sandbox's isolated state path and a home
    /// directory override so the installer never reaches real dotfiles.
    pub fn cli(&self) -> CliBuilder {
        cli()
            .env("HOME", self.home.path().to_string_lossy())
            .env("AW_ANALYZER_STATE_PATH", self.state_path().to_string_lossy())
    }
}
