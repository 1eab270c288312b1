// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Cropping canvas.
//!
//! This module shows the loaded image with every task's rectangle on top
//! and lets the user drag out the working crop region.

use crate::models::{editing::EditState, region::CropRegion, session::Session};
use crate::util::geometry;

/// Result of canvas interaction.
pub enum CanvasAction {
    None,
    SetWorkingRegion(CropRegion),
}

/// Display the canvas and handle drag-to-crop.
pub fn show(
    ui: &mut egui::Ui,
    session: &Session,
    image_texture: &Option<egui::TextureHandle>,
) -> CanvasAction {
    let mut action = CanvasAction::None;
    // Set background color
    ui.style_mut().visuals.extreme_bg_color = egui::Color32::from_gray(40);

    let available_size = ui.available_size() - egui::vec2(0.0, 24.0);

    egui::Frame::canvas(ui.style()).show(ui, |ui| {
        ui.set_min_size(available_size);

        let (Some(texture), Some(image)) = (image_texture, session.image()) else {
            show_welcome(ui);
            return;
        };

        let image_size = (image.width, image.height);
        let image_rect = geometry::fit_image(ui.min_rect(), image_size);

        ui.painter().image(
            texture.id(),
            image_rect,
            egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0)),
            egui::Color32::WHITE,
        );

        let response = ui.allocate_rect(image_rect, egui::Sense::drag());
        if response.hovered() {
            ui.ctx().set_cursor_icon(egui::CursorIcon::Crosshair);
        }

        // The drag origin lives in egui memory for the duration of a drag
        let origin_id = response.id.with("crop_origin");
        let pointer = response
            .interact_pointer_pos()
            .map(|pos| geometry::screen_to_image(pos, image_rect, image_size));

        if response.drag_started() {
            if let Some(start) = pointer {
                ui.data_mut(|d| d.insert_temp(origin_id, start));
            }
        }

        if response.dragged() || response.drag_stopped() {
            let origin = ui.data(|d| d.get_temp::<(f32, f32)>(origin_id));
            if let (Some(origin), Some(current)) = (origin, pointer) {
                action = CanvasAction::SetWorkingRegion(CropRegion::from_corners(origin, current));
            }
            if response.drag_stopped() {
                ui.data_mut(|d| d.remove::<(f32, f32)>(origin_id));
            }
        }

        let painter = ui.painter_at(image_rect);

        for task in session.tasks() {
            // The task under edit is shown through the working region instead
            if session.editing_id() == Some(task.id) {
                continue;
            }
            let color = if session.hovered() == Some(task.id) {
                egui::Color32::from_rgb(255, 140, 0)
            } else {
                egui::Color32::YELLOW
            };
            let rect = geometry::region_to_screen(&task.crop, image_rect, image_size);
            painter.rect_stroke(rect, 0.0, egui::Stroke::new(2.0, color));
            painter.text(
                rect.left_top() + egui::vec2(3.0, 2.0),
                egui::Align2::LEFT_TOP,
                format!("#{}", task.id),
                egui::FontId::proportional(12.0),
                color,
            );
        }

        let working = session.working_region();
        if working.is_committed() {
            let rect = geometry::region_to_screen(&working, image_rect, image_size);
            painter.rect_filled(rect, 0.0, egui::Color32::from_rgba_unmultiplied(120, 180, 255, 40));
            painter.rect_stroke(rect, 0.0, egui::Stroke::new(2.0, egui::Color32::LIGHT_BLUE));
        }
    });

    // Working region and mode at the bottom
    ui.separator();
    ui.horizontal(|ui| {
        let working = session.working_region();
        if working.is_committed() {
            ui.label(format!(
                "Selection: {:.0}, {:.0}  {:.0} x {:.0}",
                working.x, working.y, working.width, working.height
            ));
        } else {
            ui.label("No selection");
        }
        ui.separator();
        match session.edit_state() {
            EditState::Editing(id) => ui.label(format!("Editing task #{}", id)),
            EditState::Idle if session.image().is_some() => ui.label("Ready"),
            EditState::Idle => ui.label("No image loaded"),
        };
    });

    action
}

/// Shown until an image is loaded.
fn show_welcome(ui: &mut egui::Ui) {
    ui.centered_and_justified(|ui| {
        ui.vertical_centered(|ui| {
            ui.add_space(20.0);
            ui.heading(
                egui::RichText::new("TaskCrop")
                    .size(32.0)
                    .color(egui::Color32::from_gray(200)),
            );
            ui.label(
                egui::RichText::new("Mark exam tasks for automatic grading")
                    .size(14.0)
                    .color(egui::Color32::from_gray(150)),
            );
            ui.add_space(20.0);
            ui.label(
                egui::RichText::new("Open an exam image to begin")
                    .color(egui::Color32::from_gray(180)),
            );
            ui.add_space(10.0);
            ui.label(
                egui::RichText::new("File → Open Image...")
                    .weak()
                    .color(egui::Color32::from_gray(130)),
            );
        });
    });
}
