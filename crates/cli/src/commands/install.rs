// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `aw-analyzer install` / `uninstall` — write or remove the OS-level
//! scheduler descriptor that invokes `tick` on a cadence.

use anyhow::{Context, Result};
use awa_engine::{Config, InstallDescriptor, Installer};
use clap::Args;
use std::env;
use std::path::{Path, PathBuf};

#[derive(Args, Debug)]
pub struct InstallArgs {
    /// Minutes between scheduled ticks
    #[arg(long, default_value_t = 15)]
    pub interval: u32,
    /// Print the descriptor without writing or loading it
    #[arg(long)]
    pub dry_run: bool,
}

#[derive(Args, Debug)]
pub struct UninstallArgs {
    /// Print what would be removed without touching the filesystem
    #[arg(long)]
    pub dry_run: bool,
}

pub fn install(args: InstallArgs, config: &Config) -> Result<()> {
    let installer = Installer::new().context("resolving home directory for installer")?;
    let executable = env::current_exe().context("resolving current executable path")?;
    let log_dir = config
        .state_path
        .parent()
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from("."));
    let descriptor = InstallDescriptor::for_tick(executable, args.interval, log_dir, install_env(config));
    installer
        .install(&descriptor, args.dry_run)
        .context("installing scheduler descriptor")
}

pub fn uninstall(args: UninstallArgs) -> Result<()> {
    let installer = Installer::new().context("resolving home directory for installer")?;
    installer.uninstall(args.dry_run).context("uninstalling scheduler descriptor")
}

/// Everything the scheduled process needs re-injected; secrets are
/// redacted by `InstallDescriptor`'s renderers before ever being printed.
fn install_env(config: &Config) -> Vec<(String, String)> {
    let mut env = vec![
        ("AW_ANALYZER_ACTIVITY_BASE_URL".to_string(), config.activity_base_url.clone()),
        ("AW_ANALYZER_HOSTNAME".to_string(), config.hostname.clone()),
        ("AW_ANALYZER_STATE_PATH".to_string(), config.state_path.to_string_lossy().into_owned()),
    ];
    if let Some(key) = &config.llm_api_key {
        env.push(("AW_ANALYZER_LLM_API_KEY".to_string(), key.clone()));
    }
    if let Some(model) = &config.llm_model {
        env.push(("AW_ANALYZER_LLM_MODEL".to_string(), model.clone()));
    }
    if let Some(url) = &config.chat_webhook_url {
        env.push(("AW_ANALYZER_CHAT_WEBHOOK_URL".to_string(), url.clone()));
    }
    if let Some(token) = &config.chat_bot_token {
        env.push(("AW_ANALYZER_CHAT_BOT_TOKEN".to_string(), token.clone()));
    }
    if let Some(channel) = &config.chat_channel_id {
        env.push(("AW_ANALYZER_CHAT_CHANNEL_ID".to_string(), channel.clone()));
    }
    if let Some(base_url) = &config.dashboard_base_url {
        env.push(("AW_ANALYZER_DASHBOARD_BASE_URL".to_string(), base_url.clone()));
    }
    env
}
