// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! SVG to PNG rasterization, kept as a narrow external-collaborator trait.
//! `awa_core::render_heatmap_svg` produces the SVG document; converting it
//! to a raster image for chat upload is wired at the CLI boundary to
//! whichever concrete rasterizer is available in the deployment.

use async_trait::async_trait;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RasterizeError {
    #[error("rasterization is not available in this build: {0}")]
    Unavailable(String),
    #[error("failed to rasterize SVG: {0}")]
    Failed(String),
}

#[async_trait]
pub trait Rasterizer: Send + Sync {
    async fn svg_to_png(&self, svg: &str, width: u32, height: u32) -> Result<Vec<u8>, RasterizeError>;
}

/// Always returns `RasterizeError::Unavailable`. Wired in whenever no
/// rasterizer is configured so the weekly-report job can still post the
/// chat message without an image attachment.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopRasterizer;

#[async_trait]
impl Rasterizer for NoopRasterizer {
    async fn svg_to_png(&self, _svg: &str, _width: u32, _height: u32) -> Result<Vec<u8>, RasterizeError> {
        Err(RasterizeError::Unavailable("no rasterizer configured".into()))
    }
}

#[cfg(any(test, feature = "test-support"))]
pub mod fake {
    use super::*;
    use parking_lot::Mutex;

    /// Returns a fixed byte buffer, or a configured failure, and records
    /// the SVG it was asked to rasterize.
    pub struct FakeRasterizer {
        result: Result<Vec<u8>, String>,
        last_svg: Mutex<Option<String>>,
    }

    impl FakeRasterizer {
        pub fn succeeding(png_bytes: Vec<u8>) -> Self {
            Self { result: Ok(png_bytes), last_svg: Mutex::new(None) }
        }

        pub fn failing(message: impl Into<String>) -> Self {
            Self { result: Err(message.into()), last_svg: Mutex::new(None) }
        }

        pub fn last_svg(&self) -> Option<String> {
            self.last_svg.lock().clone()
        }
    }

    #[async_trait]
    impl Rasterizer for FakeRasterizer {
        async fn svg_to_png(&self, svg: &str, _width: u32, _height: u32) -> Result<Vec<u8>, RasterizeError> {
            *self.last_svg.lock() = Some(svg.to_string());
            self.result.clone().map_err(RasterizeError::Failed)
        }
    }
}

#[cfg(test)]
#[path = "rasterize_tests.rs"]
mod tests;
