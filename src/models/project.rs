// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Source image metadata.

use std::path::{Path, PathBuf};

/// The image currently open for annotation.
///
/// Immutable once loaded; the pixel data itself lives in the display
/// texture, the canvas only needs dimensions and origin.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceImage {
    pub path: PathBuf,
    pub width: u32,
    pub height: u32,
}

impl SourceImage {
    pub fn new(path: impl Into<PathBuf>, width: u32, height: u32) -> Self {
        Self {
            path: path.into(),
            width,
            height,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}
