// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Pan/zoom view transform.
//!
//! Maps between image space and view space (screen points relative to
//! the canvas origin): `view = pan + image * scale`.

use super::annotation::Point;

/// Scale multiplier for one zoom-in step.
pub const ZOOM_IN_RATIO: f64 = 1.25;
/// Scale multiplier for one zoom-out step.
pub const ZOOM_OUT_RATIO: f64 = 0.8;
/// Smallest allowed scale.
pub const MIN_SCALE: f64 = 0.01;
/// Largest allowed scale.
pub const MAX_SCALE: f64 = 100.0;
/// Scroll distance in points that counts as one wheel notch.
pub const WHEEL_NOTCH: f64 = 40.0;

/// Cumulative view transform. `scale` always stays within
/// `MIN_SCALE..=MAX_SCALE`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewTransform {
    scale: f64,
    pan: Point,
}

impl Default for ViewTransform {
    fn default() -> Self {
        Self::identity()
    }
}

impl ViewTransform {
    pub fn identity() -> Self {
        Self {
            scale: 1.0,
            pan: Point::new(0.0, 0.0),
        }
    }

    pub fn scale(&self) -> f64 {
        self.scale
    }

    /// Map a view-space position to image space.
    pub fn to_image(&self, view: Point) -> Point {
        Point::new(
            (view.x - self.pan.x) / self.scale,
            (view.y - self.pan.y) / self.scale,
        )
    }

    /// Map an image-space position to view space.
    pub fn to_view(&self, image: Point) -> Point {
        Point::new(
            self.pan.x + image.x * self.scale,
            self.pan.y + image.y * self.scale,
        )
    }

    /// Apply one zoom step keeping the view origin fixed.
    pub fn zoom(&mut self, delta: f64) -> bool {
        self.zoom_about(delta, Point::new(0.0, 0.0))
    }

    /// Apply one zoom step keeping the image point under `anchor` fixed.
    ///
    /// Positive `delta` zooms in, negative zooms out and zero is ignored.
    /// A step that would leave the scale bounds is ignored as well.
    /// Returns whether the scale changed.
    pub fn zoom_about(&mut self, delta: f64, anchor: Point) -> bool {
        let ratio = if delta > 0.0 {
            ZOOM_IN_RATIO
        } else if delta < 0.0 {
            ZOOM_OUT_RATIO
        } else {
            return false;
        };

        let scale = self.scale * ratio;
        if !(MIN_SCALE..=MAX_SCALE).contains(&scale) {
            return false;
        }

        let fixed = self.to_image(anchor);
        self.scale = scale;
        self.pan = Point::new(
            anchor.x - fixed.x * self.scale,
            anchor.y - fixed.y * self.scale,
        );
        true
    }

    /// Translate the view by a view-space offset.
    pub fn pan(&mut self, dx: f64, dy: f64) {
        self.pan.x += dx;
        self.pan.y += dy;
    }
}

/// Turns a stream of scroll deltas into discrete zoom steps.
///
/// Smooth-scrolling devices deliver many small deltas per notch; only a
/// full notch in one direction produces a step.
#[derive(Debug, Clone, Copy, Default)]
pub struct WheelAccumulator {
    pending: f64,
}

impl WheelAccumulator {
    /// Feed one frame's scroll delta. Returns the step direction (`1.0` or
    /// `-1.0`) once a full notch has accumulated.
    pub fn feed(&mut self, delta: f64) -> Option<f64> {
        if delta == 0.0 || !delta.is_finite() {
            return None;
        }
        // Reversing direction starts a new notch
        if self.pending != 0.0 && self.pending.signum() != delta.signum() {
            self.pending = 0.0;
        }

        self.pending += delta;
        if self.pending.abs() >= WHEEL_NOTCH {
            let direction = self.pending.signum();
            self.pending = 0.0;
            Some(direction)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zoom_in_then_out_restores_scale() {
        let mut view = ViewTransform::identity();
        assert!(view.zoom(1.0));
        assert!((view.scale() - 1.25).abs() < 1e-12);
        assert!(view.zoom(-1.0));
        assert!((view.scale() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_zero_delta_is_ignored() {
        let mut view = ViewTransform::identity();
        assert!(!view.zoom(0.0));
        assert_eq!(view, ViewTransform::identity());
    }

    #[test]
    fn test_scale_stays_positive_after_many_zoom_outs() {
        let mut view = ViewTransform::identity();
        for _ in 0..4000 {
            view.zoom(-3.0);
        }
        assert!(view.scale() >= MIN_SCALE);

        let mapped = view.to_image(Point::new(300.0, 200.0));
        assert!(mapped.x.is_finite() && mapped.y.is_finite());
    }

    #[test]
    fn test_zoom_in_is_bounded_and_mapping_stays_finite() {
        let mut view = ViewTransform::identity();
        let anchor = Point::new(300.0, 200.0);
        for _ in 0..3300 {
            view.zoom_about(1.0, anchor);
        }
        assert!(view.scale() <= MAX_SCALE);
        assert!(!view.zoom_about(1.0, anchor));

        let mapped = view.to_image(anchor);
        assert!(mapped.x.is_finite() && mapped.y.is_finite());

        // Still able to come back out
        assert!(view.zoom_about(-1.0, anchor));
        assert!(view.scale() < MAX_SCALE);
    }

    #[test]
    fn test_wheel_accumulator_steps_once_per_notch() {
        let mut wheel = WheelAccumulator::default();
        let steps: Vec<f64> = (0..8).filter_map(|_| wheel.feed(10.0)).collect();
        assert_eq!(steps, vec![1.0, 1.0]);

        assert_eq!(wheel.feed(WHEEL_NOTCH * 3.0), Some(1.0));
        assert_eq!(wheel.feed(-WHEEL_NOTCH), Some(-1.0));
        assert_eq!(wheel.feed(0.0), None);
    }

    #[test]
    fn test_wheel_direction_change_resets_pending() {
        let mut wheel = WheelAccumulator::default();
        assert_eq!(wheel.feed(30.0), None);
        assert_eq!(wheel.feed(-30.0), None);
        assert_eq!(wheel.feed(-10.0), Some(-1.0));
    }

    #[test]
    fn test_zoom_about_keeps_anchor_fixed() {
        let mut view = ViewTransform::identity();
        view.pan(15.0, -4.0);
        let anchor = Point::new(120.0, 80.0);
        let before = view.to_image(anchor);

        view.zoom_about(1.0, anchor);
        view.zoom_about(1.0, anchor);
        let after = view.to_image(anchor);

        assert!((before.x - after.x).abs() < 1e-9);
        assert!((before.y - after.y).abs() < 1e-9);
    }

    #[test]
    fn test_view_image_mapping_roundtrip() {
        let mut view = ViewTransform::identity();
        view.zoom(1.0);
        view.pan(30.0, 12.5);

        let image = Point::new(64.0, 48.0);
        let back = view.to_image(view.to_view(image));
        assert!((back.x - image.x).abs() < 1e-9);
        assert!((back.y - image.y).abs() < 1e-9);
    }
}
