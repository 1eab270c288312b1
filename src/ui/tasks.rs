// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Task list panel.
//!
//! One entry per task with its type, expected answer and crop controls.
//! The panel only reads the session; every change is returned as an action.

use crate::models::{
    session::Session,
    task::{AnnotationTask, TaskId, TaskType},
};

/// Changes requested from the task list.
pub enum TaskAction {
    LoadCrop(TaskId),
    SaveCrop,
    CancelEdit,
    Delete(TaskId),
    SetType(TaskId, TaskType),
    SetExpected(TaskId, String),
    Hover(Option<TaskId>),
}

/// Display the task list panel.
pub fn show(ui: &mut egui::Ui, session: &Session) -> Vec<TaskAction> {
    let mut actions = Vec::new();
    let mut hovered = None;

    ui.heading("Tasks");
    ui.separator();

    if session.tasks().is_empty() {
        ui.label(egui::RichText::new("Drag on the image, then press Add").weak());
    }

    egui::ScrollArea::vertical().show(ui, |ui| {
        for task in session.tasks() {
            let response = ui
                .group(|ui| show_task(ui, session, task, &mut actions))
                .response;
            if response.contains_pointer() {
                hovered = Some(task.id);
            }
        }
    });

    if hovered != session.hovered() {
        actions.push(TaskAction::Hover(hovered));
    }

    actions
}

fn show_task(
    ui: &mut egui::Ui,
    session: &Session,
    task: &AnnotationTask,
    actions: &mut Vec<TaskAction>,
) {
    let editing = session.editing_id();

    ui.horizontal(|ui| {
        ui.strong(format!("#{}", task.id));
        ui.label(
            egui::RichText::new(format!(
                "{:.0}, {:.0}  {:.0} x {:.0}",
                task.crop.x, task.crop.y, task.crop.width, task.crop.height
            ))
            .weak(),
        );
    });

    egui::ComboBox::from_id_source(("task_type", task.id))
        .selected_text(task.task_type.label())
        .show_ui(ui, |ui| {
            for task_type in TaskType::all() {
                if ui
                    .selectable_label(task.task_type == *task_type, task_type.label())
                    .clicked()
                    && task.task_type != *task_type
                {
                    actions.push(TaskAction::SetType(task.id, *task_type));
                }
            }
        });

    ui.horizontal(|ui| {
        ui.label("Expected:");
        let mut expected = task.expected.clone();
        if ui.text_edit_singleline(&mut expected).changed() {
            actions.push(TaskAction::SetExpected(task.id, expected));
        }
    });

    ui.horizontal(|ui| {
        if editing == Some(task.id) {
            if ui
                .add_enabled(session.can_save_edit(), egui::Button::new("Save crop"))
                .clicked()
            {
                actions.push(TaskAction::SaveCrop);
            }
            if ui.button("Cancel").clicked() {
                actions.push(TaskAction::CancelEdit);
            }
        } else if ui
            .add_enabled(editing.is_none(), egui::Button::new("Load crop"))
            .on_hover_text("Adjust this task's region on the image")
            .clicked()
        {
            actions.push(TaskAction::LoadCrop(task.id));
        }

        if ui.button("🗑").on_hover_text("Delete task").clicked() {
            actions.push(TaskAction::Delete(task.id));
        }
    });
}
