// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Annotation data structures.
//!
//! This module defines the point and path types the canvas works with.
//! All coordinates are in image space (source pixels), independent of
//! the current zoom and pan.

/// A 2D point in image pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    /// Create a new point.
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Drawing state of the canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DrawState {
    #[default]
    Idle,
    Drawing,
}

/// Renderable contour derived from the point sequence.
#[derive(Debug, Clone, PartialEq)]
pub struct PolygonPath {
    pub points: Vec<Point>,
    /// Whether the last point connects back to the first.
    pub closed: bool,
}

impl PolygonPath {
    /// Line segments of the path in drawing order, including the closing
    /// edge when the path is closed.
    pub fn segments(&self) -> Vec<(Point, Point)> {
        let mut segments: Vec<(Point, Point)> = self
            .points
            .windows(2)
            .map(|pair| (pair[0], pair[1]))
            .collect();

        if self.closed {
            if let (Some(&first), Some(&last)) = (self.points.first(), self.points.last()) {
                segments.push((last, first));
            }
        }

        segments
    }
}

/// Build the displayed path for a point sequence.
///
/// Returns `None` when there are fewer than two points (nothing to
/// stroke). The path is closed only once drawing has ended.
pub fn synthesize_path(points: &[Point], state: DrawState) -> Option<PolygonPath> {
    if points.len() < 2 {
        return None;
    }

    Some(PolygonPath {
        points: points.to_vec(),
        closed: state == DrawState::Idle,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square() -> Vec<Point> {
        vec![
            Point::new(10.0, 10.0),
            Point::new(90.0, 10.0),
            Point::new(90.0, 90.0),
            Point::new(10.0, 90.0),
        ]
    }

    #[test]
    fn test_no_path_below_two_points() {
        assert!(synthesize_path(&[], DrawState::Idle).is_none());
        assert!(synthesize_path(&[Point::new(1.0, 1.0)], DrawState::Drawing).is_none());
    }

    #[test]
    fn test_preview_path_is_open() {
        let path = synthesize_path(&square(), DrawState::Drawing).unwrap();
        assert!(!path.closed);
        assert_eq!(path.segments().len(), 3);
    }

    #[test]
    fn test_committed_path_closes_back_to_first() {
        let path = synthesize_path(&square(), DrawState::Idle).unwrap();
        assert!(path.closed);

        let segments = path.segments();
        assert_eq!(segments.len(), 4);
        assert_eq!(segments[3], (Point::new(10.0, 90.0), Point::new(10.0, 10.0)));
    }
}
