// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Writes and removes the OS-level auto-start descriptor that invokes
//! `tick` on a cadence: a launchd plist on macOS, a systemd user
//! timer+service pair on Linux. `--dry-run` prints the descriptor with
//! secrets redacted and makes no filesystem changes.

use std::path::PathBuf;
use thiserror::Error;
use tracing::info;

const LABEL: &str = "com.aw-analyzer.tick";
const REDACTED_KEYS: &[&str] = &["AW_ANALYZER_LLM_API_KEY", "AW_ANALYZER_CHAT_BOT_TOKEN"];

#[derive(Debug, Error)]
pub enum InstallError {
    #[error("unsupported platform for auto-start installation")]
    UnsupportedPlatform,
    #[error("could not determine a home directory")]
    NoHomeDir,
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to run {utility}: {message}")]
    ControlUtility { utility: &'static str, message: String },
}

/// Everything the descriptor needs: the executable to invoke, its
/// arguments, how often to run it, where to send its own output, and the
/// environment it should inherit (redacted before being printed anywhere).
#[derive(Debug, Clone)]
pub struct InstallDescriptor {
    pub executable_path: PathBuf,
    pub args: Vec<String>,
    pub interval_seconds: u32,
    pub stdout_log_path: PathBuf,
    pub stderr_log_path: PathBuf,
    pub env: Vec<(String, String)>,
}

impl InstallDescriptor {
    pub fn for_tick(executable_path: PathBuf, interval_minutes: u32, log_dir: PathBuf, env: Vec<(String, String)>) -> Self {
        let interval_minutes = interval_minutes.max(1);
        Self {
            executable_path,
            args: vec!["tick".to_string()],
            interval_seconds: interval_minutes * 60,
            stdout_log_path: log_dir.join("tick.out.log"),
            stderr_log_path: log_dir.join("tick.err.log"),
            env,
        }
    }

    fn redacted_env(&self) -> Vec<(String, String)> {
        self.env
            .iter()
            .map(|(k, v)| {
                if REDACTED_KEYS.contains(&k.as_str()) {
                    (k.clone(), "<redacted>".to_string())
                } else {
                    (k.clone(), v.clone())
                }
            })
            .collect()
    }
}

pub fn render_launchd_plist(descriptor: &InstallDescriptor) -> String {
    let args = std::iter::once(path_to_string(&descriptor.executable_path))
        .chain(descriptor.args.iter().cloned())
        .map(|arg| format!("        <string>{}</string>", xml_escape(&arg)))
        .collect::<Vec<_>>()
        .join("\n");

    let env_entries = descriptor
        .redacted_env()
        .iter()
        .map(|(k, v)| format!("        <key>{}</key>\n        <string>{}</string>", xml_escape(k), xml_escape(v)))
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<!DOCTYPE plist PUBLIC "-//Apple//DTD PLIST 1.0//EN" "http://www.apple.com/DTDs/PropertyList-1.0.dtd">
<plist version="1.0">
<dict>
    <key>Label</key>
    <string>{label}</string>
    <key>ProgramArguments</key>
    <array>
{args}
    </array>
    <key>StartInterval</key>
    <integer>{interval}</integer>
    <key>StandardOutPath</key>
    <string>{stdout}</string>
    <key>StandardErrorPath</key>
    <string>{stderr}</string>
    <key>EnvironmentVariables</key>
    <dict>
{env}
    </dict>
</dict>
</plist>
"#,
        label = LABEL,
        args = args,
        interval = descriptor.interval_seconds,
        stdout = xml_escape(&path_to_string(&descriptor.stdout_log_path)),
        stderr = xml_escape(&path_to_string(&descriptor.stderr_log_path)),
        env = env_entries,
    )
}

pub fn render_systemd_units(descriptor: &InstallDescriptor) -> (String, String) {
    let exec_start = std::iter::once(path_to_string(&descriptor.executable_path))
        .chain(descriptor.args.iter().cloned())
        .collect::<Vec<_>>()
        .join(" ");

    let env_lines = descriptor
        .redacted_env()
        .iter()
        .map(|(k, v)| format!("Environment=\"{k}={v}\""))
        .collect::<Vec<_>>()
        .join("\n");

    let service = format!(
        "[Unit]\nDescription=aw-analyzer tick\n\n[Service]\nType=oneshot\nExecStart={exec_start}\nStandardOutput=append:{stdout}\nStandardError=append:{stderr}\n{env}\n",
        exec_start = exec_start,
        stdout = path_to_string(&descriptor.stdout_log_path),
        stderr = path_to_string(&descriptor.stderr_log_path),
        env = env_lines,
    );

    let timer = format!(
        "[Unit]\nDescription=aw-analyzer tick timer\n\n[Timer]\nOnBootSec={interval}\nOnUnitActiveSec={interval}\nAccuracySec=1\n\n[Install]\nWantedBy=timers.target\n",
        interval = descriptor.interval_seconds,
    );

    (service, timer)
}

fn xml_escape(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

fn path_to_string(path: &std::path::Path) -> String {
    path.to_string_lossy().to_string()
}

/// Installs or removes the auto-start descriptor for the current platform.
pub struct Installer {
    home_dir: PathBuf,
}

impl Installer {
    pub fn new() -> Result<Self, InstallError> {
        let home_dir = dirs::home_dir().ok_or(InstallError::NoHomeDir)?;
        Ok(Self { home_dir })
    }

    #[cfg(target_os = "macos")]
    fn descriptor_path(&self) -> PathBuf {
        self.home_dir.join("Library/LaunchAgents").join(format!("{LABEL}.plist"))
    }

    #[cfg(target_os = "linux")]
    fn unit_paths(&self) -> (PathBuf, PathBuf) {
        let dir = self.home_dir.join(".config/systemd/user");
        (dir.join(format!("{LABEL}.service")), dir.join(format!("{LABEL}.timer")))
    }

    pub fn install(&self, descriptor: &InstallDescriptor, dry_run: bool) -> Result<(), InstallError> {
        #[cfg(target_os = "macos")]
        {
            let plist = render_launchd_plist(descriptor);
            if dry_run {
                println!("{plist}");
                return Ok(());
            }
            let path = self.descriptor_path();
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::write(&path, plist)?;
            run_control_utility("launchctl", &["load", "-w", &path_to_string(&path)])?;
            info!(path = %path.display(), "installed launchd agent");
            return Ok(());
        }

        #[cfg(target_os = "linux")]
        {
            let (service, timer) = render_systemd_units(descriptor);
            if dry_run {
                println!("{service}\n---\n{timer}");
                return Ok(());
            }
            let (service_path, timer_path) = self.unit_paths();
            if let Some(parent) = service_path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::write(&service_path, service)?;
            std::fs::write(&timer_path, timer)?;
            run_control_utility("systemctl", &["--user", "daemon-reload"])?;
            run_control_utility("systemctl", &["--user", "enable", "--now", &format!("{LABEL}.timer")])?;
            info!(path = %timer_path.display(), "installed systemd user timer");
            return Ok(());
        }

        #[cfg(not(any(target_os = "macos", target_os = "linux")))]
        {
            let _ = (descriptor, dry_run);
            Err(InstallError::UnsupportedPlatform)
        }
    }

    pub fn uninstall(&self, dry_run: bool) -> Result<(), InstallError> {
        #[cfg(target_os = "macos")]
        {
            let path = self.descriptor_path();
            if dry_run {
                println!("would remove {}", path.display());
                return Ok(());
            }
            run_control_utility("launchctl", &["unload", "-w", &path_to_string(&path)])?;
            if path.exists() {
                std::fs::remove_file(&path)?;
            }
            return Ok(());
        }

        #[cfg(target_os = "linux")]
        {
            let (service_path, timer_path) = self.unit_paths();
            if dry_run {
                println!("would remove {}\nwould remove {}", service_path.display(), timer_path.display());
                return Ok(());
            }
            run_control_utility("systemctl", &["--user", "disable", "--now", &format!("{LABEL}.timer")])?;
            for path in [&service_path, &timer_path] {
                if path.exists() {
                    std::fs::remove_file(path)?;
                }
            }
            return Ok(());
        }

        #[cfg(not(any(target_os = "macos", target_os = "linux")))]
        {
            let _ = dry_run;
            Err(InstallError::UnsupportedPlatform)
        }
    }
}

#[cfg_attr(not(any(target_os = "macos", target_os = "linux")), allow(dead_code))]
fn run_control_utility(utility: &'static str, args: &[&str]) -> Result<(), InstallError> {
    let output = std::process::Command::new(utility)
        .args(args)
        .output()
        .map_err(|e| InstallError::ControlUtility { utility, message: e.to_string() })?;
    if !output.status.success() {
        return Err(InstallError::ControlUtility {
            utility,
            message: String::from_utf8_lossy(&output.stderr).to_string(),
        });
    }
    Ok(())
}

#[cfg(test)]
#[path = "install_tests.rs"]
mod tests;
