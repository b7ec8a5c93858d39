// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Dataset controller.
//!
//! Connects the canvas to the dataset directory: opening source images,
//! saving (image copy, mask) pairs under a label and keeping the label
//! list in sync with what is on disk. Dialogs are handled by the caller;
//! this layer only receives the chosen path or label.

use crate::io::{dataset, media};
use crate::models::{canvas::AnnotationCanvas, project::SourceImage};
use anyhow::{bail, Context, Result};
use std::fmt;
use std::path::{Path, PathBuf};

/// Reasons a save is refused or fails.
#[derive(Debug)]
pub enum SaveError {
    NoImage,
    InvalidLabel,
    EmptyPolygon,
    Filesystem(anyhow::Error),
}

impl fmt::Display for SaveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SaveError::NoImage => write!(f, "No image loaded."),
            SaveError::InvalidLabel => write!(f, "Invalid object name."),
            SaveError::EmptyPolygon => write!(f, "No annotation drawn."),
            SaveError::Filesystem(e) => write!(f, "Failed to save annotation: {e:#}"),
        }
    }
}

impl std::error::Error for SaveError {}

/// A successfully written dataset entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SavedEntry {
    pub label: String,
    pub image_name: String,
    pub mask_name: String,
}

pub struct DatasetController {
    dataset_dir: PathBuf,
    current_source: Option<PathBuf>,
    labels: Vec<String>,
}

impl DatasetController {
    /// Create a controller for an existing dataset directory.
    pub fn new(dataset_dir: PathBuf) -> Self {
        Self {
            dataset_dir,
            current_source: None,
            labels: Vec::new(),
        }
    }

    pub fn dataset_dir(&self) -> &Path {
        &self.dataset_dir
    }

    pub fn current_source(&self) -> Option<&Path> {
        self.current_source.as_deref()
    }

    /// Distinct labels from the last directory scan.
    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    /// Decode `path`, hand it to the canvas and remember it as the current
    /// source. The decoded pixels are returned for display.
    pub fn open_image(
        &mut self,
        path: PathBuf,
        canvas: &mut AnnotationCanvas,
    ) -> Result<media::LoadedImage> {
        if !media::is_supported_image(&path) {
            bail!("Unsupported image type: {}", path.display());
        }
        let loaded = media::load_image(&path)?;
        canvas.load(SourceImage::new(path.clone(), loaded.width, loaded.height));
        log::info!("Opened {} ({}x{})", path.display(), loaded.width, loaded.height);
        self.current_source = Some(path);
        Ok(loaded)
    }

    /// Rescan the dataset directory for labels.
    pub fn refresh_label_list(&mut self) -> Result<&[String]> {
        self.labels = dataset::list_labels(&self.dataset_dir)?;
        log::debug!("Dataset holds {} labels", self.labels.len());
        Ok(&self.labels)
    }

    /// Save the current polygon under `raw_label`.
    ///
    /// All checks run before anything is written. The image copy and the
    /// mask are first written to hidden staging files and only renamed
    /// into place once both exist, so a failure leaves any earlier entry
    /// for the label untouched. Image copies of the label with another
    /// extension are removed afterwards.
    pub fn save_annotation(
        &mut self,
        canvas: &AnnotationCanvas,
        raw_label: &str,
    ) -> Result<SavedEntry, SaveError> {
        let source = self.current_source.clone().ok_or(SaveError::NoImage)?;
        let label = dataset::normalize_label(raw_label).ok_or(SaveError::InvalidLabel)?;
        if canvas.points().is_empty() {
            return Err(SaveError::EmptyPolygon);
        }

        let paths = dataset::entry_paths(&self.dataset_dir, label, &source);
        if paths.image.exists() || paths.mask.exists() {
            log::warn!("Overwriting existing entry for label '{}'", label);
        }

        let staging = paths.staging();
        if let Err(e) = self.stage_entry(canvas, &source, &paths, &staging) {
            Self::discard_staging(&staging);
            return Err(e);
        }

        if let Err(e) = Self::commit_entry(&paths, &staging) {
            Self::discard_staging(&staging);
            return Err(SaveError::Filesystem(e));
        }

        match dataset::stale_images(&self.dataset_dir, label, &paths.image) {
            Ok(stale) => {
                for path in stale {
                    match std::fs::remove_file(&path) {
                        Ok(()) => log::info!("Removed stale copy {}", path.display()),
                        Err(e) => log::warn!("Failed to remove {}: {}", path.display(), e),
                    }
                }
            }
            Err(e) => log::warn!("Could not check for stale copies: {:#}", e),
        }

        if let Err(e) = self.refresh_label_list() {
            log::warn!("Saved, but label list refresh failed: {:#}", e);
        }

        let (image_name, mask_name) = paths.file_names();
        log::info!("Saved annotation '{}': {}, {}", label, image_name, mask_name);
        Ok(SavedEntry {
            label: label.to_string(),
            image_name,
            mask_name,
        })
    }

    /// Write the image copy and the mask to their staging paths.
    fn stage_entry(
        &self,
        canvas: &AnnotationCanvas,
        source: &Path,
        paths: &dataset::EntryPaths,
        staging: &dataset::EntryPaths,
    ) -> Result<(), SaveError> {
        // Re-saving from the dataset copy itself keeps that file as is
        if !dataset::same_file(source, &paths.image) {
            dataset::copy_source(source, &staging.image).map_err(SaveError::Filesystem)?;
        }

        match canvas.export_mask(&staging.mask) {
            Ok(true) => Ok(()),
            Ok(false) => Err(SaveError::EmptyPolygon),
            Err(e) => Err(SaveError::Filesystem(e)),
        }
    }

    /// Move staged files over the final entry paths.
    fn commit_entry(paths: &dataset::EntryPaths, staging: &dataset::EntryPaths) -> Result<()> {
        std::fs::rename(&staging.mask, &paths.mask)
            .with_context(|| format!("Failed to write {}", paths.mask.display()))?;
        if staging.image.exists() {
            std::fs::rename(&staging.image, &paths.image)
                .with_context(|| format!("Failed to write {}", paths.image.display()))?;
        }
        Ok(())
    }

    fn discard_staging(staging: &dataset::EntryPaths) {
        for path in [&staging.image, &staging.mask] {
            if !path.is_file() {
                continue;
            }
            match std::fs::remove_file(path) {
                Ok(()) => log::info!("Removed staging file {}", path.display()),
                Err(e) => log::error!("Failed to remove staging file {}: {}", path.display(), e),
            }
        }
    }
}
