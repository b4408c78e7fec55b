// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Injectable side-effect adapters: HTTP transport, local notifications,
//! chat delivery, the activity provider, SVG rasterization, and the AI
//! analyzer (with its deterministic fallback).
//!
//! Every adapter is a small `Send + Sync` trait with one production impl
//! and one fake impl gated behind `test-support`, following the same shape
//! across the board so callers never special-case a particular adapter.

#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

pub mod analyzer;
pub mod chat;
pub mod http;
pub mod notify;
pub mod provider;
pub mod rasterize;
