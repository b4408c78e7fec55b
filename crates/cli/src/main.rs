// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! aw-analyzer - personal activity analytics agent

mod commands;

use anyhow::Result;
use clap::{CommandFactory, FromArgMatches, Parser, Subcommand};
use commands::install::{InstallArgs, UninstallArgs};
use commands::weekly_report::WeeklyReportArgs;

#[derive(Parser)]
#[command(name = "aw-analyzer", version, about = "Personal activity analytics agent")]
struct Cli {
    /// Emit debug-level logs
    #[arg(long, global = true)]
    verbose: bool,
    /// Only emit warnings and errors
    #[arg(long, global = true, conflicts_with = "verbose")]
    quiet: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Evaluate every job once and dispatch due notifications
    Tick,
    /// Generate and deliver the trailing-week report
    WeeklyReport(WeeklyReportArgs),
    /// Clear all persisted cooldown and daily-marker state
    Reset,
    /// Install the OS-level auto-start descriptor
    Install(InstallArgs),
    /// Remove the OS-level auto-start descriptor
    Uninstall(UninstallArgs),
}

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        let msg = format_error(&e);
        if !msg.is_empty() {
            eprintln!("Error: {msg}");
        }
        std::process::exit(1);
    }
}

/// Format an anyhow error, deduplicating the chain.
fn format_error(err: &anyhow::Error) -> String {
    let top = err.to_string();
    let chain_redundant = err.chain().skip(1).all(|cause| top.contains(&cause.to_string()));
    if chain_redundant {
        return top;
    }
    let mut buf = top;
    for (i, cause) in err.chain().skip(1).enumerate() {
        buf.push_str(&format!("\n\nCaused by:\n    {i}: {cause}"));
    }
    buf
}

async fn run() -> Result<()> {
    let matches = match Cli::command().try_get_matches() {
        Ok(m) => m,
        Err(e) => e.exit(),
    };
    let cli = Cli::from_arg_matches(&matches)?;

    let verbosity = awa_engine::Verbosity { verbose: cli.verbose, quiet: cli.quiet };

    let Some(command) = cli.command else {
        Cli::command().print_help()?;
        std::process::exit(1);
    };

    let config = awa_engine::Config::load()?;
    awa_engine::init_logging(&config, verbosity);
    let config = std::sync::Arc::new(config);

    match command {
        Commands::Tick => {
            let now = now_utc();
            commands::tick::run(config, now).await?
        }
        Commands::WeeklyReport(args) => {
            let now = now_utc();
            commands::weekly_report::run(args, config, now).await?
        }
        Commands::Reset => commands::reset::run(&config)?,
        Commands::Install(args) => commands::install::install(args, &config)?,
        Commands::Uninstall(args) => commands::install::uninstall(args)?,
    }

    Ok(())
}

/// The process-wide clock reading for this invocation, taken exactly once
/// so every job in the tick (or every day in the weekly report) sees the
/// same `now`.
fn now_utc() -> chrono::DateTime<chrono::Utc> {
    chrono::Utc::now()
}
