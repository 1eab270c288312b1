// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Crop rectangles in image pixel space.

/// A rectangle selected on the source image, in image pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct CropRegion {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl CropRegion {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self { x, y, width, height }
    }

    /// The empty rectangle used when nothing is selected.
    pub fn zero() -> Self {
        Self::default()
    }

    /// Build a region from two drag corners, in any order.
    pub fn from_corners(a: (f32, f32), b: (f32, f32)) -> Self {
        Self::new(
            a.0.min(b.0),
            a.1.min(b.1),
            (a.0 - b.0).abs(),
            (a.1 - b.1).abs(),
        )
    }

    /// A region can only be turned into a task once it has an area.
    pub fn is_committed(&self) -> bool {
        self.width > 0.0 && self.height > 0.0
    }

    /// Clip the region to an image of the given size.
    pub fn clamped(&self, image_width: f32, image_height: f32) -> Self {
        let x0 = self.x.clamp(0.0, image_width);
        let y0 = self.y.clamp(0.0, image_height);
        let x1 = (self.x + self.width).clamp(0.0, image_width);
        let y1 = (self.y + self.height).clamp(0.0, image_height);
        Self::from_corners((x0, y0), (x1, y1))
    }
}
