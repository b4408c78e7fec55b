// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Initializes `tracing-subscriber` with an `EnvFilter`. No
//! `tracing_appender` rolling-file sink: this is a short-lived tick
//! process that logs to stderr, so no rotation is needed.

use crate::config::Config;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Verbosity flags that override `RUST_LOG` / the config's resolved
/// level, in priority order: `--verbose` wins, then `--quiet`, then the
/// configured default.
#[derive(Debug, Clone, Copy, Default)]
pub struct Verbosity {
    pub verbose: bool,
    pub quiet: bool,
}

pub fn init(config: &Config, verbosity: Verbosity) {
    let default_level = if verbosity.verbose {
        "debug"
    } else if verbosity.quiet {
        "warn"
    } else {
        config.log_level.as_filter_str()
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr))
        .try_init();
}

#[cfg(test)]
#[path = "logging_tests.rs"]
mod tests;
