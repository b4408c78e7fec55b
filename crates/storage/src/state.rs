// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Flat, schema-oblivious key-value state with atomic durable writes.
//!
//! Unlike an event-sourced snapshot, this store holds one small JSON document
//! and rewrites the whole thing on every mutation: correctness, not
//! throughput, is what it optimizes for. The write path still follows the
//! write-tmp / fsync / rename discipline a crash-safe snapshot needs.
//!
//! ## Testability
//!
//! All file operations go through `StateWriter`, so tests can inject a fake
//! to exercise error paths (e.g. a rename failure) without touching disk.

use serde_json::{Map, Value};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StateError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Abstracts the filesystem operations the store depends on, for testability.
pub trait StateWriter: Send + Sync {
    fn read(&self, path: &Path) -> std::io::Result<Option<Vec<u8>>>;
    fn write_tmp(&self, path: &Path, data: &[u8]) -> std::io::Result<()>;
    fn fsync_file(&self, path: &Path) -> std::io::Result<()>;
    fn rename(&self, from: &Path, to: &Path) -> std::io::Result<()>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct FsStateWriter;

impl StateWriter for FsStateWriter {
    fn read(&self, path: &Path) -> std::io::Result<Option<Vec<u8>>> {
        match fs::read(path) {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e),
        }
    }

    fn write_tmp(&self, path: &Path, data: &[u8]) -> std::io::Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let mut file = fs::File::create(path)?;
        file.write_all(data)?;
        Ok(())
    }

    fn fsync_file(&self, path: &Path) -> std::io::Result<()> {
        fs::File::open(path)?.sync_all()
    }

    fn rename(&self, from: &Path, to: &Path) -> std::io::Result<()> {
        fs::rename(from, to)
    }
}

/// A durable key-value document backed by a single JSON file.
pub struct StateStore<W: StateWriter = FsStateWriter> {
    path: PathBuf,
    writer: W,
    cache: Map<String, Value>,
}

impl StateStore<FsStateWriter> {
    /// Load (or initialize empty) the state file at `path`.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StateError> {
        Self::open_with_writer(path, FsStateWriter)
    }
}

impl<W: StateWriter> StateStore<W> {
    pub fn open_with_writer(path: impl Into<PathBuf>, writer: W) -> Result<Self, StateError> {
        let path = path.into();
        let cache = match writer.read(&path)? {
            Some(bytes) if !bytes.is_empty() => {
                serde_json::from_slice::<Value>(&bytes)
                    .ok()
                    .and_then(|v| v.as_object().cloned())
                    .unwrap_or_default()
            }
            _ => Map::new(),
        };
        Ok(Self { path, writer, cache })
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.cache.get(key)
    }

    pub fn set(&mut self, key: &str, value: Value) -> Result<(), StateError> {
        self.cache.insert(key.to_string(), value);
        self.flush()
    }

    /// Returns the epoch-ms timestamp stored at `key`, or `None` if absent
    /// or not numeric.
    pub fn get_time(&self, key: &str) -> Option<i64> {
        self.cache.get(key).and_then(Value::as_i64)
    }

    pub fn set_time(&mut self, key: &str, epoch_ms: i64) -> Result<(), StateError> {
        self.set(key, Value::from(epoch_ms))
    }

    pub fn clear(&mut self) -> Result<(), StateError> {
        self.cache.clear();
        self.flush()
    }

    fn flush(&self) -> Result<(), StateError> {
        let tmp_path = self.path.with_extension("tmp");
        let bytes = serde_json::to_vec_pretty(&Value::Object(self.cache.clone()))?;
        self.writer.write_tmp(&tmp_path, &bytes)?;
        self.writer.fsync_file(&tmp_path)?;
        self.writer.rename(&tmp_path, &self.path)?;
        Ok(())
    }
}

#[cfg(test)]
#[path = "state_tests.rs"]
mod tests;
