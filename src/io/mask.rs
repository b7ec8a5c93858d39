// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Binary mask rasterization.
//!
//! The closed polygon is filled with tiny-skia using the even-odd rule
//! and anti-aliasing disabled, so every pixel is exactly 0 or 255. A
//! pixel belongs to the mask when its center lies inside the polygon.

use crate::models::annotation::Point;
use anyhow::{anyhow, Context, Result};
use image::{GrayImage, ImageFormat};
use std::path::Path;
use tiny_skia::{Color, FillRule, Paint, PathBuilder, Pixmap, Transform};

/// Pixel value for pixels inside the polygon.
pub const MASK_INSIDE: u8 = 255;
/// Pixel value for pixels outside the polygon.
pub const MASK_OUTSIDE: u8 = 0;

/// Build the closed fill path for a point sequence.
fn build_polygon_path(points: &[Point]) -> Option<tiny_skia::Path> {
    let (first, rest) = points.split_first()?;

    let mut pb = PathBuilder::new();
    pb.move_to(first.x as f32, first.y as f32);
    for point in rest {
        pb.line_to(point.x as f32, point.y as f32);
    }
    pb.close();

    // Fewer than two points or a zero-area bounding box yields no path
    pb.finish()
}

/// Rasterize the closed polygon into a single-channel mask of the
/// given dimensions.
pub fn rasterize_mask(points: &[Point], width: u32, height: u32) -> Result<GrayImage> {
    let mut pixmap = Pixmap::new(width, height)
        .ok_or_else(|| anyhow!("Invalid mask dimensions {}x{}", width, height))?;

    if let Some(path) = build_polygon_path(points) {
        let mut paint = Paint::default();
        paint.set_color(Color::WHITE);
        paint.anti_alias = false;

        pixmap.fill_path(&path, &paint, FillRule::EvenOdd, Transform::identity(), None);
    } else {
        log::debug!("Degenerate polygon ({} points), mask left empty", points.len());
    }

    // Background stays transparent black, fill is opaque white, so the
    // red channel alone carries the mask.
    let luma: Vec<u8> = pixmap
        .data()
        .chunks_exact(4)
        .map(|rgba| if rgba[0] > 0 { MASK_INSIDE } else { MASK_OUTSIDE })
        .collect();

    GrayImage::from_raw(width, height, luma)
        .ok_or_else(|| anyhow!("Mask buffer does not match {}x{}", width, height))
}

/// Rasterize the polygon and write it as a grayscale PNG.
pub fn write_mask(points: &[Point], width: u32, height: u32, destination: &Path) -> Result<()> {
    let mask = rasterize_mask(points, width, height)?;
    mask.save_with_format(destination, ImageFormat::Png)
        .with_context(|| format!("Failed to write mask {}", destination.display()))?;

    log::info!("Wrote {}x{} mask to {}", width, height, destination.display());
    Ok(())
}
