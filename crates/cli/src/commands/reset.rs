// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `aw-analyzer reset` — clear all persisted cooldown and daily-marker state.

use anyhow::{Context, Result};
use awa_engine::Config;
use awa_storage::StateStore;

pub fn run(config: &Config) -> Result<()> {
    let mut store = StateStore::open(config.state_path.clone())
        .with_context(|| format!("opening state store at {}", config.state_path.display()))?;
    store.clear().context("clearing state")?;
    println!("state cleared: {}", config.state_path.display());
    Ok(())
}
