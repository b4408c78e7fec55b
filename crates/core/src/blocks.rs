// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! A small block-kit-shaped message model, plus a pure validator that
//! enforces the chat platform's structural limits before anything is
//! handed to a transport.

use serde::{Deserialize, Serialize};

pub const MAX_BLOCKS_PER_MESSAGE: usize = 50;
pub const MAX_FIELDS_PER_SECTION: usize = 10;
pub const MAX_FIELD_CHARS: usize = 2000;
pub const MAX_SECTION_TEXT_CHARS: usize = 3000;
pub const MAX_HEADER_CHARS: usize = 150;
pub const MAX_IMAGE_ALT_CHARS: usize = 2000;
pub const MAX_IMAGE_URL_CHARS: usize = 3000;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Block {
    Header { text: String },
    Section { text: Option<String>, fields: Option<Vec<String>> },
    Fields { fields: Vec<String> },
    Divider,
    Context { elements: Vec<String> },
    Image { image_url: Option<String>, slack_file: Option<SlackFileRef>, alt_text: String },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SlackFileRef {
    pub id: Option<String>,
    pub url: Option<String>,
}

/// A complete chat payload: plain-text fallback plus the structured blocks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlockMessage {
    pub text: String,
    pub blocks: Vec<Block>,
}

impl BlockMessage {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            blocks: Vec::new(),
        }
    }

    pub fn push(mut self, block: Block) -> Self {
        self.blocks.push(block);
        self
    }
}

/// One violation found by [`validate`], human-readable and specific enough
/// to act on without re-reading the block tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation(pub String);

impl std::fmt::Display for Violation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Checks `message` against every structural constraint the chat platform
/// enforces. Returns every violation found, not just the first — so a
/// single rejected send reports everything wrong with it at once.
pub fn validate(message: &BlockMessage) -> Vec<Violation> {
    let mut violations = Vec::new();

    if message.blocks.len() > MAX_BLOCKS_PER_MESSAGE {
        violations.push(Violation(format!(
            "message has {} blocks, exceeding the limit of {MAX_BLOCKS_PER_MESSAGE}",
            message.blocks.len()
        )));
    }

    for (idx, block) in message.blocks.iter().enumerate() {
        match block {
            Block::Header { text } => {
                if text.chars().count() > MAX_HEADER_CHARS {
                    violations.push(Violation(format!(
                        "block {idx}: header text exceeds {MAX_HEADER_CHARS} characters"
                    )));
                }
            }
            Block::Section { text, fields } => {
                if let Some(text) = text {
                    if text.chars().count() > MAX_SECTION_TEXT_CHARS {
                        violations.push(Violation(format!(
                            "block {idx}: section text exceeds {MAX_SECTION_TEXT_CHARS} characters"
                        )));
                    }
                }
                if let Some(fields) = fields {
                    validate_fields(idx, fields, &mut violations);
                }
            }
            Block::Fields { fields } => validate_fields(idx, fields, &mut violations),
            Block::Divider => {}
            Block::Context { elements } => {
                if elements.is_empty() {
                    violations.push(Violation(format!("block {idx}: context has no elements")));
                }
            }
            Block::Image { image_url, slack_file, alt_text } => {
                if alt_text.chars().count() > MAX_IMAGE_ALT_CHARS {
                    violations.push(Violation(format!(
                        "block {idx}: image alt_text exceeds {MAX_IMAGE_ALT_CHARS} characters"
                    )));
                }
                match (image_url, slack_file) {
                    (Some(_), Some(_)) => violations.push(Violation(format!(
                        "block {idx}: image block carries both image_url and slack_file, exactly one is required"
                    ))),
                    (None, None) => violations.push(Violation(format!(
                        "block {idx}: image block carries neither image_url nor slack_file"
                    ))),
                    (Some(url), None) => {
                        if url.chars().count() > MAX_IMAGE_URL_CHARS {
                            violations.push(Violation(format!(
                                "block {idx}: image_url exceeds {MAX_IMAGE_URL_CHARS} characters"
                            )));
                        }
                        if !url.starts_with("http://") && !url.starts_with("https://") {
                            violations.push(Violation(format!(
                                "block {idx}: image_url must start with http:// or https://"
                            )));
                        }
                    }
                    (None, Some(_)) => {}
                }
            }
        }
    }

    violations
}

fn validate_fields(idx: usize, fields: &[String], violations: &mut Vec<Violation>) {
    if fields.is_empty() || fields.len() > MAX_FIELDS_PER_SECTION {
        violations.push(Violation(format!(
            "block {idx}: fields length {} is outside 1..={MAX_FIELDS_PER_SECTION}",
            fields.len()
        )));
    }
    for (field_idx, field) in fields.iter().enumerate() {
        if field.chars().count() > MAX_FIELD_CHARS {
            violations.push(Violation(format!(
                "block {idx}: field {field_idx} exceeds {MAX_FIELD_CHARS} characters"
            )));
        }
    }
}

#[cfg(test)]
#[path = "blocks_tests.rs"]
mod tests;
