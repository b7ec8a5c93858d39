// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Toolbar with the main annotation commands.

/// Button pressed in the toolbar this frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolbarAction {
    None,
    LoadImage,
    SaveAnnotation,
    Undo,
    Clear,
}

/// Display the toolbar.
pub fn show(ui: &mut egui::Ui, has_image: bool, has_points: bool) -> ToolbarAction {
    let mut action = ToolbarAction::None;

    ui.horizontal(|ui| {
        ui.spacing_mut().item_spacing.x = 8.0;

        if ui.button("🗁 Load Image").clicked() {
            action = ToolbarAction::LoadImage;
        }

        if ui.button("💾 Save Annotation").clicked() {
            action = ToolbarAction::SaveAnnotation;
        }

        ui.separator();

        if ui
            .add_enabled(has_points, egui::Button::new("⟲ Undo"))
            .clicked()
        {
            action = ToolbarAction::Undo;
        }

        if ui
            .add_enabled(has_points, egui::Button::new("✖ Clear"))
            .clicked()
        {
            action = ToolbarAction::Clear;
        }

        ui.separator();

        let hint = if has_image {
            "Drag with the left button to outline, right-drag to pan, scroll to zoom"
        } else {
            "Load an image to start"
        };
        ui.label(egui::RichText::new(hint).italics().weak());
    });

    action
}
