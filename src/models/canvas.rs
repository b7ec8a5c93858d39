// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Headless annotation canvas.
//!
//! Owns the loaded image metadata, the point sequence, the drawing
//! state and the view transform. Pointer positions arrive in view space
//! (relative to the canvas origin) and are stored in image space. No
//! toolkit types appear here; the egui layer in `ui::canvas` only
//! dispatches events and paints [`AnnotationCanvas::displayed_path`].

use super::annotation::{synthesize_path, DrawState, Point, PolygonPath};
use super::project::SourceImage;
use super::view::{ViewTransform, WheelAccumulator};
use anyhow::Result;
use std::path::Path;

/// Freehand polygon canvas state machine.
#[derive(Debug, Clone)]
pub struct AnnotationCanvas {
    image: Option<SourceImage>,
    points: Vec<Point>,
    state: DrawState,
    path: Option<PolygonPath>,
    view: ViewTransform,
    wheel: WheelAccumulator,
    /// Stroke width in screen points.
    stroke_width: f64,
}

impl AnnotationCanvas {
    pub fn new(stroke_width: f64) -> Self {
        Self {
            image: None,
            points: Vec::new(),
            state: DrawState::Idle,
            path: None,
            view: ViewTransform::identity(),
            wheel: WheelAccumulator::default(),
            stroke_width,
        }
    }

    pub fn image(&self) -> Option<&SourceImage> {
        self.image.as_ref()
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn state(&self) -> DrawState {
        self.state
    }

    pub fn is_drawing(&self) -> bool {
        self.state == DrawState::Drawing
    }

    pub fn view(&self) -> &ViewTransform {
        &self.view
    }

    /// Path currently shown on screen, if any.
    pub fn displayed_path(&self) -> Option<&PolygonPath> {
        self.path.as_ref()
    }

    /// Stroke width in image units, so the on-screen width stays constant
    /// at every zoom level.
    pub fn stroke_width(&self) -> f64 {
        self.stroke_width / self.view.scale()
    }

    fn resynthesize(&mut self) {
        self.path = synthesize_path(&self.points, self.state);
    }

    /// Replace the displayed image. Discards any in-progress polygon and
    /// resets the view.
    pub fn load(&mut self, image: SourceImage) {
        log::info!(
            "Canvas loaded {} ({}x{})",
            image.path.display(),
            image.width,
            image.height
        );
        self.image = Some(image);
        self.points.clear();
        self.state = DrawState::Idle;
        self.path = None;
        self.view = ViewTransform::identity();
    }

    /// Start a new point sequence. Ignored when no image is loaded.
    pub fn on_pointer_down(&mut self, pos: Point) {
        if self.image.is_none() {
            return;
        }
        let point = self.view.to_image(pos);
        self.points.clear();
        self.points.push(point);
        self.state = DrawState::Drawing;
        self.path = None;
        log::debug!("Started polygon at ({:.1}, {:.1})", point.x, point.y);
    }

    /// Append a point while drawing and refresh the preview.
    pub fn on_pointer_drag(&mut self, pos: Point) {
        if !self.is_drawing() {
            return;
        }
        self.points.push(self.view.to_image(pos));
        self.resynthesize();
    }

    /// Finish drawing; the committed path closes back to the first point.
    pub fn on_pointer_up(&mut self, _pos: Point) {
        self.commit_stroke();
    }

    /// End an in-progress stroke without a pointer event, e.g. when a
    /// dialog takes over input mid-drag. No-op when idle.
    pub fn commit_stroke(&mut self) {
        if !self.is_drawing() {
            return;
        }
        self.state = DrawState::Idle;
        self.resynthesize();
        log::info!("Polygon committed with {} points", self.points.len());
    }

    /// Remove the most recent point. No-op on an empty sequence.
    pub fn undo(&mut self) {
        if self.points.pop().is_some() {
            self.resynthesize();
            log::debug!("Undo, {} points remain", self.points.len());
        }
    }

    /// Drop all points and the displayed path, in any state.
    pub fn clear(&mut self) {
        self.points.clear();
        self.path = None;
        log::debug!("Canvas cleared");
    }

    /// One wheel step of zoom around the view origin.
    pub fn zoom(&mut self, delta: f64) {
        if self.view.zoom(delta) {
            log::debug!("Zoom scale now {:.3}", self.view.scale());
        }
    }

    /// One wheel step of zoom keeping the point under `anchor` fixed.
    pub fn zoom_about(&mut self, delta: f64, anchor: Point) {
        if self.view.zoom_about(delta, anchor) {
            log::debug!("Zoom scale now {:.3}", self.view.scale());
        }
    }

    /// Feed a raw scroll delta; zooms one step per full wheel notch.
    pub fn on_wheel(&mut self, delta: f64, anchor: Point) {
        if let Some(direction) = self.wheel.feed(delta) {
            self.zoom_about(direction, anchor);
        }
    }

    pub fn pan(&mut self, dx: f64, dy: f64) {
        self.view.pan(dx, dy);
    }

    pub fn reset_view(&mut self) {
        self.view = ViewTransform::identity();
    }

    /// Rasterize the closed polygon to `destination`.
    ///
    /// Returns `Ok(false)` without writing anything when there is no image
    /// or no polygon has been drawn.
    pub fn export_mask(&self, destination: &Path) -> Result<bool> {
        let Some(image) = &self.image else {
            return Ok(false);
        };
        if self.points.is_empty() {
            return Ok(false);
        }

        crate::io::mask::write_mask(&self.points, image.width, image.height, destination)?;
        Ok(true)
    }
}
