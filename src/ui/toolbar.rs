// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Toolbar with the add and submit actions.

use crate::io::submission::SubmissionStatus;
use crate::models::session::Session;

/// Result of toolbar interaction.
pub enum ToolbarAction {
    None,
    OpenImage,
    AddTask,
    Submit,
}

/// Display the toolbar.
pub fn show(
    ui: &mut egui::Ui,
    session: &Session,
    status: SubmissionStatus,
    endpoint: &str,
) -> ToolbarAction {
    let mut action = ToolbarAction::None;

    ui.horizontal(|ui| {
        ui.spacing_mut().item_spacing.x = 8.0;

        if ui.button("🖼 Open Image").clicked() {
            action = ToolbarAction::OpenImage;
        }

        ui.separator();

        // Add is disabled while a task's crop is being edited
        if ui
            .add_enabled(session.can_add(), egui::Button::new("➕ Add"))
            .clicked()
        {
            action = ToolbarAction::AddTask;
        }

        if ui
            .add_enabled(session.can_submit(), egui::Button::new("⬆ Submit"))
            .on_hover_text(format!("Send all tasks to {}", endpoint))
            .clicked()
        {
            action = ToolbarAction::Submit;
        }

        ui.label(format!("{} tasks", session.task_list().len()));

        if status == SubmissionStatus::Pending {
            ui.spinner();
        }
        ui.label(status.message());

        ui.separator();

        let hint = if session.image().is_none() {
            "Open an image to start"
        } else if session.editing_id().is_some() {
            "Drag a new region, then save or cancel the edit"
        } else {
            "Drag on the image to select a region, then press Add"
        };
        ui.label(egui::RichText::new(hint).italics().weak());
    });

    action
}
