// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Main application state and egui App implementation.
//!
//! This module owns the canvas and the dataset controller and dispatches
//! menu, toolbar, keyboard and pointer events to them. Everything runs
//! synchronously on the UI thread.

use crate::controller::DatasetController;
use crate::io::media::{LoadedImage, IMAGE_EXTENSIONS};
use crate::models::canvas::AnnotationCanvas;
use crate::ui::{
    canvas::{self, CanvasAction},
    dialogs::{self, Dialog, DialogOutcome},
    labels,
    toolbar::{self, ToolbarAction},
};
use std::path::PathBuf;

/// Main application state.
pub struct SegmaskApp {
    canvas: AnnotationCanvas,
    controller: DatasetController,

    /// Loaded image texture for display
    image_texture: Option<egui::TextureHandle>,

    /// Open modal dialog
    dialog: Dialog,
}

impl SegmaskApp {
    /// Create the application for an already created dataset directory.
    pub fn new(dataset_dir: PathBuf, stroke_width: f32) -> Self {
        let mut controller = DatasetController::new(dataset_dir);
        if let Err(e) = controller.refresh_label_list() {
            log::error!("Failed to scan dataset directory: {:#}", e);
        }

        Self {
            canvas: AnnotationCanvas::new(stroke_width as f64),
            controller,
            image_texture: None,
            dialog: Dialog::None,
        }
    }

    /// Ask for an image file and load it.
    fn open_image(&mut self, ctx: &egui::Context) {
        let Some(path) = rfd::FileDialog::new()
            .set_title("Open Image")
            .add_filter("Images", IMAGE_EXTENSIONS)
            .pick_file()
        else {
            return;
        };

        match self.controller.open_image(path, &mut self.canvas) {
            Ok(loaded) => self.upload_texture(ctx, &loaded),
            Err(e) => {
                log::error!("Failed to load image: {:#}", e);
                self.dialog = Dialog::warning(format!("Failed to load image:\n{e:#}"));
            }
        }
    }

    fn upload_texture(&mut self, ctx: &egui::Context, loaded: &LoadedImage) {
        let size = [loaded.width as usize, loaded.height as usize];
        let color_image = egui::ColorImage::from_rgba_unmultiplied(size, &loaded.pixels);
        self.image_texture = Some(ctx.load_texture(
            "source_image",
            color_image,
            egui::TextureOptions::NEAREST,
        ));
    }

    /// Start the save flow: warn right away without an image, otherwise
    /// ask for the label.
    fn begin_save(&mut self) {
        // The dialog swallows the pointer-up of a drag still in progress
        self.canvas.commit_stroke();
        if self.controller.current_source().is_none() {
            self.dialog = Dialog::warning("No image loaded.");
        } else {
            self.dialog = Dialog::label_entry();
        }
    }

    fn finish_save(&mut self, raw_label: &str) {
        match self.controller.save_annotation(&self.canvas, raw_label) {
            Ok(saved) => {
                log::info!("Dataset entry '{}' written", saved.label);
                self.dialog = Dialog::info(
                    "Saved",
                    format!("Annotation saved:\n{}\n{}", saved.image_name, saved.mask_name),
                );
            }
            Err(e) => {
                log::warn!("Save rejected: {}", e);
                self.dialog = Dialog::warning(e.to_string());
            }
        }
    }

    fn handle_toolbar(&mut self, action: ToolbarAction, ctx: &egui::Context) {
        match action {
            ToolbarAction::LoadImage => self.open_image(ctx),
            ToolbarAction::SaveAnnotation => self.begin_save(),
            ToolbarAction::Undo => self.canvas.undo(),
            ToolbarAction::Clear => self.canvas.clear(),
            ToolbarAction::None => {}
        }
    }

    fn handle_canvas(&mut self, action: CanvasAction) {
        match action {
            CanvasAction::PointerDown(pos) => self.canvas.on_pointer_down(pos),
            CanvasAction::PointerDrag(pos) => self.canvas.on_pointer_drag(pos),
            CanvasAction::PointerUp(pos) => self.canvas.on_pointer_up(pos),
            CanvasAction::Wheel { delta, anchor } => self.canvas.on_wheel(delta, anchor),
            CanvasAction::Pan { dx, dy } => self.canvas.pan(dx, dy),
        }
    }

    fn menu_bar(&mut self, ctx: &egui::Context) -> ToolbarAction {
        let mut action = ToolbarAction::None;

        egui::TopBottomPanel::top("menu_bar").show(ctx, |ui| {
            egui::menu::bar(ui, |ui| {
                ui.menu_button("File", |ui| {
                    if ui.button("Open Image...").clicked() {
                        action = ToolbarAction::LoadImage;
                        ui.close_menu();
                    }
                    if ui.button("Save Annotation... (Ctrl+S)").clicked() {
                        action = ToolbarAction::SaveAnnotation;
                        ui.close_menu();
                    }
                    ui.separator();
                    if ui.button("Quit").clicked() {
                        ctx.send_viewport_cmd(egui::ViewportCommand::Close);
                    }
                });

                ui.menu_button("Edit", |ui| {
                    let has_points = !self.canvas.points().is_empty();
                    if ui
                        .add_enabled(has_points, egui::Button::new("Undo (Ctrl+Z)"))
                        .clicked()
                    {
                        action = ToolbarAction::Undo;
                        ui.close_menu();
                    }
                    if ui
                        .add_enabled(has_points, egui::Button::new("Clear (Esc)"))
                        .clicked()
                    {
                        action = ToolbarAction::Clear;
                        ui.close_menu();
                    }
                });

                ui.menu_button("View", |ui| {
                    if ui.button("Zoom In").clicked() {
                        self.canvas.zoom(1.0);
                        ui.close_menu();
                    }
                    if ui.button("Zoom Out").clicked() {
                        self.canvas.zoom(-1.0);
                        ui.close_menu();
                    }
                    if ui.button("Reset View").clicked() {
                        self.canvas.reset_view();
                        ui.close_menu();
                    }
                });
            });
        });

        action
    }

    fn shortcuts(&self, ctx: &egui::Context) -> ToolbarAction {
        if ctx.wants_keyboard_input() {
            return ToolbarAction::None;
        }

        ctx.input(|i| {
            if i.modifiers.command && i.key_pressed(egui::Key::Z) {
                ToolbarAction::Undo
            } else if i.modifiers.command && i.key_pressed(egui::Key::S) {
                ToolbarAction::SaveAnnotation
            } else if i.key_pressed(egui::Key::Escape) {
                ToolbarAction::Clear
            } else {
                ToolbarAction::None
            }
        })
    }
}

impl eframe::App for SegmaskApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let modal = self.dialog.is_open();

        let menu_action = self.menu_bar(ctx);

        let toolbar_action = egui::TopBottomPanel::top("toolbar")
            .show(ctx, |ui| {
                toolbar::show(
                    ui,
                    self.canvas.image().is_some(),
                    !self.canvas.points().is_empty(),
                )
            })
            .inner;

        egui::SidePanel::right("labels")
            .default_width(200.0)
            .show(ctx, |ui| {
                labels::show(ui, self.controller.dataset_dir(), self.controller.labels());
            });

        let canvas_actions = egui::CentralPanel::default()
            .show(ctx, |ui| canvas::show(ui, &self.canvas, &self.image_texture))
            .inner;

        // Dialogs block every other input source while open
        if modal {
            self.canvas.commit_stroke();
            match dialogs::show(ctx, &mut self.dialog) {
                DialogOutcome::LabelEntered(label) => self.finish_save(&label),
                DialogOutcome::Closed | DialogOutcome::None => {}
            }
            return;
        }

        let shortcut_action = self.shortcuts(ctx);
        for action in [menu_action, toolbar_action, shortcut_action] {
            self.handle_toolbar(action, ctx);
        }

        for action in canvas_actions {
            self.handle_canvas(action);
        }
    }
}
