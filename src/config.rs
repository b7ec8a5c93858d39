// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Application configuration.
//!
//! Defaults cover everything; an optional `segmask.yaml` in the working
//! directory may override individual fields.

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Name of the optional configuration file.
pub const CONFIG_FILE_NAME: &str = "segmask.yaml";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Dataset folder, relative to the working directory unless absolute.
    pub dataset_folder: PathBuf,
    /// Polygon stroke width in screen points.
    pub stroke_width: f32,
    /// Initial window size.
    pub window_size: [f32; 2],
}

impl Default for Config {
    fn default() -> Self {
        Self {
            dataset_folder: PathBuf::from("dataset"),
            stroke_width: 2.0,
            window_size: [1280.0, 720.0],
        }
    }
}

impl Config {
    /// Load `segmask.yaml` from `dir`, falling back to defaults when the
    /// file does not exist.
    pub fn load(dir: &Path) -> Result<Self> {
        let path = dir.join(CONFIG_FILE_NAME);
        if !path.is_file() {
            return Ok(Self::default());
        }

        let yaml = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let config: Config = serde_yaml::from_str(&yaml)
            .with_context(|| format!("Failed to parse {}", path.display()))?;
        config.validate()?;

        log::info!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if !(self.stroke_width > 0.0 && self.stroke_width.is_finite()) {
            bail!("stroke_width must be positive, got {}", self.stroke_width);
        }
        if self.dataset_folder.as_os_str().is_empty() {
            bail!("dataset_folder must not be empty");
        }
        Ok(())
    }

    /// Resolve the dataset directory against the working directory.
    pub fn dataset_dir(&self, cwd: &Path) -> PathBuf {
        if self.dataset_folder.is_absolute() {
            self.dataset_folder.clone()
        } else {
            cwd.join(&self.dataset_folder)
        }
    }
}
