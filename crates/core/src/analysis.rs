// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Output shape of the analyzer, whether produced by the LLM path or the
//! deterministic fallback. The two paths must be indistinguishable to
//! downstream consumers.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub summary: String,
    pub insights: Vec<String>,
    pub tip: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeeklyAnalysisResult {
    pub title: String,
    pub summary: String,
    pub insights: Vec<String>,
    pub next_action: String,
}
