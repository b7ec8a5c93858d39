// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Geometric utility functions.
//!
//! This module converts between egui screen positions and the model's
//! view/image coordinates. View space is screen space relative to the
//! canvas origin.

use crate::models::annotation::Point;
use crate::models::view::ViewTransform;

/// Convert an absolute screen position to view coordinates.
pub fn screen_to_view(pos: egui::Pos2, origin: egui::Pos2) -> Point {
    Point::new((pos.x - origin.x) as f64, (pos.y - origin.y) as f64)
}

/// Convert an image-space point to an absolute screen position.
pub fn image_to_screen(point: Point, view: &ViewTransform, origin: egui::Pos2) -> egui::Pos2 {
    let v = view.to_view(point);
    egui::pos2(origin.x + v.x as f32, origin.y + v.y as f32)
}

/// Screen rectangle covered by an image of the given pixel size.
pub fn image_screen_rect(
    width: u32,
    height: u32,
    view: &ViewTransform,
    origin: egui::Pos2,
) -> egui::Rect {
    egui::Rect::from_min_max(
        image_to_screen(Point::new(0.0, 0.0), view, origin),
        image_to_screen(Point::new(width as f64, height as f64), view, origin),
    )
}
