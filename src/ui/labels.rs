// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Dataset label panel.
//!
//! Lists the distinct labels found in the dataset directory.

use std::path::Path;

/// Display the label list for the dataset at `dataset_dir`.
pub fn show(ui: &mut egui::Ui, dataset_dir: &Path, labels: &[String]) {
    ui.heading("Labels");
    ui.label(
        egui::RichText::new(dataset_dir.display().to_string())
            .small()
            .weak(),
    );
    ui.separator();

    if labels.is_empty() {
        ui.label(egui::RichText::new("No annotations saved yet").italics().weak());
        return;
    }

    ui.label(format!("{} labels", labels.len()));
    egui::ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui| {
            for label in labels {
                ui.label(label);
            }
        });
}
