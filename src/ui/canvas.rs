// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Drawing canvas for image display and freehand polygon tracing.
//!
//! This module paints the loaded image and the canvas's displayed path,
//! and translates raw pointer input into [`CanvasAction`]s. It holds no
//! state of its own; everything lives in
//! [`AnnotationCanvas`](crate::models::canvas::AnnotationCanvas).

use crate::models::{
    annotation::{DrawState, Point, PolygonPath},
    canvas::AnnotationCanvas,
};
use crate::util::geometry;

/// Pointer input translated into canvas events (view coordinates).
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CanvasAction {
    PointerDown(Point),
    PointerDrag(Point),
    PointerUp(Point),
    /// Raw scroll delta; the canvas turns it into notch-sized zoom steps.
    Wheel { delta: f64, anchor: Point },
    Pan { dx: f64, dy: f64 },
}

const PATH_COLOR: egui::Color32 = egui::Color32::RED;

/// Display the canvas area and collect this frame's pointer events.
pub fn show(
    ui: &mut egui::Ui,
    canvas: &AnnotationCanvas,
    image_texture: &Option<egui::TextureHandle>,
) -> Vec<CanvasAction> {
    let mut actions = Vec::new();
    ui.style_mut().visuals.extreme_bg_color = egui::Color32::from_gray(40);

    let available_size = ui.available_size();

    egui::Frame::canvas(ui.style()).show(ui, |ui| {
        ui.set_min_size(available_size);

        let (Some(texture), Some(image)) = (image_texture, canvas.image()) else {
            show_welcome(ui);
            return;
        };

        let (rect, response) =
            ui.allocate_exact_size(ui.available_size(), egui::Sense::click_and_drag());
        let origin = rect.min;
        let painter = ui.painter_at(rect);

        let image_rect =
            geometry::image_screen_rect(image.width, image.height, canvas.view(), origin);
        painter.image(
            texture.id(),
            image_rect,
            egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0)),
            egui::Color32::WHITE,
        );

        if let Some(path) = canvas.displayed_path() {
            draw_path(&painter, path, canvas, origin);
        }

        actions = collect_input(ui, &response, canvas.is_drawing(), origin);
    });

    // Status line
    ui.separator();
    ui.horizontal(|ui| {
        ui.label(format!("Zoom: {:.0}%", canvas.view().scale() * 100.0));
        ui.separator();
        ui.label(format!("Points: {}", canvas.points().len()));
        ui.separator();
        match canvas.image() {
            Some(image) => {
                ui.label(match canvas.state() {
                    DrawState::Drawing => "Drawing",
                    DrawState::Idle => "Ready",
                });
                ui.separator();
                ui.label(format!(
                    "{} ({}x{})",
                    image.path().display(),
                    image.width,
                    image.height
                ));
            }
            None => {
                ui.label("No image loaded");
            }
        }
    });

    actions
}

fn show_welcome(ui: &mut egui::Ui) {
    ui.centered_and_justified(|ui| {
        ui.vertical_centered(|ui| {
            ui.add_space(20.0);
            ui.heading(
                egui::RichText::new("Segmask")
                    .size(32.0)
                    .color(egui::Color32::from_gray(200)),
            );
            ui.label(
                egui::RichText::new("Freehand segmentation mask annotator")
                    .size(14.0)
                    .color(egui::Color32::from_gray(150)),
            );
            ui.add_space(20.0);
            ui.label(
                egui::RichText::new("Load an image, then drag around an object to outline it")
                    .color(egui::Color32::from_gray(180)),
            );
        });
    });
}

/// Translate this frame's pointer state into canvas actions.
fn collect_input(
    ui: &egui::Ui,
    response: &egui::Response,
    drawing: bool,
    origin: egui::Pos2,
) -> Vec<CanvasAction> {
    let mut actions = Vec::new();

    let (pressed, down, released, moving, pointer_pos, scroll) = ui.input(|i| {
        (
            i.pointer.primary_pressed(),
            i.pointer.primary_down(),
            i.pointer.primary_released(),
            i.pointer.is_moving(),
            i.pointer.interact_pos(),
            i.raw_scroll_delta.y,
        )
    });

    if let Some(pos) = pointer_pos {
        let view_pos = geometry::screen_to_view(pos, origin);
        let started = pressed && response.hovered();

        if started {
            actions.push(CanvasAction::PointerDown(view_pos));
        } else if drawing && down && moving {
            actions.push(CanvasAction::PointerDrag(view_pos));
        }

        // A press and release can land in the same frame
        if released && (drawing || started) {
            actions.push(CanvasAction::PointerUp(view_pos));
        }
    }

    if scroll != 0.0 {
        if let Some(hover) = response.hover_pos() {
            actions.push(CanvasAction::Wheel {
                delta: scroll as f64,
                anchor: geometry::screen_to_view(hover, origin),
            });
        }
    }

    if response.dragged_by(egui::PointerButton::Secondary)
        || response.dragged_by(egui::PointerButton::Middle)
    {
        let delta = response.drag_delta();
        actions.push(CanvasAction::Pan {
            dx: delta.x as f64,
            dy: delta.y as f64,
        });
    }

    actions
}

/// Stroke the displayed path at a constant on-screen width.
fn draw_path(
    painter: &egui::Painter,
    path: &PolygonPath,
    canvas: &AnnotationCanvas,
    origin: egui::Pos2,
) {
    let to_screen = |p| geometry::image_to_screen(p, canvas.view(), origin);
    let width = (canvas.stroke_width() * canvas.view().scale()) as f32;
    let stroke = egui::Stroke::new(width, PATH_COLOR);

    for (from, to) in path.segments() {
        painter.line_segment([to_screen(from), to_screen(to)], stroke);
    }
}
