// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Segmask - freehand segmentation mask annotator
//!
//! A cross-platform desktop application for outlining objects in images
//! and saving (image, binary mask) pairs into a flat dataset directory.

mod app;
mod config;
mod controller;
mod io;
mod models;
mod ui;
mod util;

use anyhow::{Context, Result};
use app::SegmaskApp;
use config::Config;

fn main() -> Result<()> {
    // Initialize logging
    env_logger::init();

    let cwd = std::env::current_dir().context("Failed to read working directory")?;
    let config = Config::load(&cwd)?;

    // The dataset directory is created once and fixed for the process lifetime
    let dataset_dir = config.dataset_dir(&cwd);
    io::dataset::ensure_dataset_dir(&dataset_dir)?;

    // Configure egui options
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size(config.window_size)
            .with_min_inner_size([800.0, 600.0])
            .with_title("Dataset Annotation Tool"),
        ..Default::default()
    };

    let stroke_width = config.stroke_width;

    // Run the application
    eframe::run_native(
        "Segmask",
        options,
        Box::new(move |_cc| Ok(Box::new(SegmaskApp::new(dataset_dir, stroke_width)))),
    )
    .map_err(|e| anyhow::anyhow!("Application error: {}", e))?;

    Ok(())
}
