// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Geometric utility functions.
//!
//! This module provides utilities for fitting the image into the canvas and
//! converting between screen coordinates and image pixel coordinates.

use crate::models::region::CropRegion;
use egui::{Pos2, Rect};

/// Largest rectangle with the image's aspect ratio, centered in `available`.
pub fn fit_image(available: Rect, image_size: (u32, u32)) -> Rect {
    let (img_width, img_height) = image_size;
    if img_width == 0 || img_height == 0 {
        return Rect::from_min_size(available.min, egui::Vec2::ZERO);
    }

    let img_aspect = img_width as f32 / img_height as f32;
    let available_aspect = available.width() / available.height();

    let size = if img_aspect > available_aspect {
        // Image is wider - fit to width
        egui::vec2(available.width(), available.width() / img_aspect)
    } else {
        // Image is taller - fit to height
        egui::vec2(available.height() * img_aspect, available.height())
    };

    Rect::from_center_size(available.center(), size)
}

/// Convert a screen position to image pixel coordinates.
pub fn screen_to_image(pos: Pos2, display: Rect, image_size: (u32, u32)) -> (f32, f32) {
    let scale_x = image_size.0 as f32 / display.width();
    let scale_y = image_size.1 as f32 / display.height();
    (
        (pos.x - display.min.x) * scale_x,
        (pos.y - display.min.y) * scale_y,
    )
}

/// Convert an image-space region to its on-screen rectangle.
pub fn region_to_screen(region: &CropRegion, display: Rect, image_size: (u32, u32)) -> Rect {
    let scale_x = display.width() / image_size.0 as f32;
    let scale_y = display.height() / image_size.1 as f32;
    Rect::from_min_size(
        egui::pos2(
            display.min.x + region.x * scale_x,
            display.min.y + region.y * scale_y,
        ),
        egui::vec2(region.width * scale_x, region.height * scale_y),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f32, b: f32) -> bool {
        (a - b).abs() < 0.0001
    }

    #[test]
    fn test_fit_wide_image() {
        let available = Rect::from_min_size(egui::pos2(0.0, 0.0), egui::vec2(800.0, 800.0));
        let display = fit_image(available, (1600, 800));

        assert!(approx(display.width(), 800.0));
        assert!(approx(display.height(), 400.0));
        assert!(approx(display.min.y, 200.0));
    }

    #[test]
    fn test_fit_tall_image() {
        let available = Rect::from_min_size(egui::pos2(10.0, 10.0), egui::vec2(800.0, 400.0));
        let display = fit_image(available, (500, 1000));

        assert!(approx(display.height(), 400.0));
        assert!(approx(display.width(), 200.0));
        assert!(approx(display.min.x, 310.0));
    }

    #[test]
    fn test_screen_image_roundtrip() {
        let display = Rect::from_min_size(egui::pos2(100.0, 50.0), egui::vec2(960.0, 540.0));
        let image_size = (1920, 1080);

        let (x, y) = screen_to_image(egui::pos2(580.0, 320.0), display, image_size);
        assert!(approx(x, 960.0));
        assert!(approx(y, 540.0));

        let region = CropRegion::new(x, y, 200.0, 100.0);
        let screen = region_to_screen(&region, display, image_size);
        assert!(approx(screen.min.x, 580.0));
        assert!(approx(screen.min.y, 320.0));
        assert!(approx(screen.width(), 100.0));
        assert!(approx(screen.height(), 50.0));
    }

    #[test]
    fn test_corners_map_to_image_bounds() {
        let display = Rect::from_min_size(egui::pos2(0.0, 0.0), egui::vec2(192.0, 108.0));
        let (x0, y0) = screen_to_image(display.min, display, (1920, 1080));
        let (x1, y1) = screen_to_image(display.max, display, (1920, 1080));

        assert_eq!((x0, y0), (0.0, 0.0));
        assert!(approx(x1, 1920.0));
        assert!(approx(y1, 1080.0));
    }
}
