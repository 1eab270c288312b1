// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Main application state and egui App implementation.
//!
//! This module owns the session and the submission client. The panels in
//! `ui` only read the session and report what the user did; the handlers
//! here apply those actions, so every change has a single path in.

use crate::config::AppConfig;
use crate::io::media::{self, LoadedImage};
use crate::io::submission::{SubmissionClient, SubmissionStatus};
use crate::models::session::Session;
use crate::ui::{canvas, tasks, toolbar};
use std::sync::mpsc::{channel, Receiver};

/// Keyboard shortcuts acting on the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Shortcut {
    /// Enter: add the working region, or save it into the task under edit
    Commit,
    /// Escape: leave edit mode
    CancelEdit,
}

/// Pick the shortcut for this frame's keys. Keys pressed while a widget held
/// focus at the end of the previous frame belong to that widget, even if the
/// same key press makes it give up focus during this frame.
fn shortcut_for(focused_last_frame: bool, enter: bool, escape: bool) -> Option<Shortcut> {
    if focused_last_frame {
        None
    } else if escape {
        Some(Shortcut::CancelEdit)
    } else if enter {
        Some(Shortcut::Commit)
    } else {
        None
    }
}

fn run_shortcut(session: &mut Session, shortcut: Shortcut) {
    match shortcut {
        Shortcut::Commit => {
            if session.editing_id().is_some() {
                session.save_edit();
            } else {
                session.add_task();
            }
        }
        Shortcut::CancelEdit => session.cancel_edit(),
    }
}

/// Main application state.
pub struct TaskCropApp {
    /// Image, tasks, working region and edit mode
    session: Session,

    /// Posts the task list to the grading backend
    submission: SubmissionClient,

    /// Loaded image texture for display
    image_texture: Option<egui::TextureHandle>,

    /// Receiver for background image loading
    image_loader: Option<Receiver<Result<LoadedImage, String>>>,

    /// Loading state message
    loading_message: Option<String>,

    /// Whether a widget had keyboard focus when the last frame ended
    focused_last_frame: bool,
}

impl TaskCropApp {
    /// Create a new application instance.
    pub fn new(cc: &eframe::CreationContext<'_>, config: &AppConfig) -> Self {
        Self {
            session: Session::new(config.default_task_type),
            submission: SubmissionClient::new(config.backend_url.clone())
                .with_repaint(cc.egui_ctx.clone()),
            image_texture: None,
            image_loader: None,
            loading_message: None,
            focused_last_frame: false,
        }
    }

    /// Load an image file in the background.
    fn load_image_file(&mut self, path: std::path::PathBuf, ctx: &egui::Context) {
        let (sender, receiver) = channel();
        self.image_loader = Some(receiver);
        self.loading_message = Some("Loading image...".to_string());

        let ctx = ctx.clone();
        std::thread::spawn(move || {
            let result = media::load_image(&path).map_err(|e| format!("{:#}", e));
            let _ = sender.send(result);
            ctx.request_repaint();
        });
    }

    fn open_image_dialog(&mut self, ctx: &egui::Context) {
        if let Some(path) = rfd::FileDialog::new()
            .add_filter("Images", &["jpg", "jpeg", "png", "bmp", "tiff", "tif", "webp"])
            .pick_file()
        {
            self.load_image_file(path, ctx);
        }
    }

    /// Check for a finished background image load.
    fn poll_image_loader(&mut self, ctx: &egui::Context) {
        let Some(ref receiver) = self.image_loader else {
            return;
        };
        let Ok(result) = receiver.try_recv() else {
            return;
        };
        self.image_loader = None;
        self.loading_message = None;

        match result {
            Ok(loaded) => {
                let size = [loaded.source.width as usize, loaded.source.height as usize];
                let color_image = egui::ColorImage::from_rgba_unmultiplied(size, &loaded.pixels);
                self.image_texture = Some(ctx.load_texture(
                    "source_image",
                    color_image,
                    egui::TextureOptions::LINEAR,
                ));
                self.session.set_image(loaded.source);
            }
            Err(e) => {
                log::error!("Failed to load image: {}", e);
            }
        }
    }

    fn submit(&mut self) {
        if !self.session.can_submit() {
            return;
        }
        if self.submission.status() == SubmissionStatus::Pending {
            log::info!("Previous submission still pending, its result will be ignored");
        }
        if let Some(image) = self.session.image() {
            self.submission.submit(self.session.tasks(), &image.data_url);
        }
    }

    fn apply_toolbar_action(&mut self, action: toolbar::ToolbarAction, ctx: &egui::Context) {
        match action {
            toolbar::ToolbarAction::OpenImage => self.open_image_dialog(ctx),
            toolbar::ToolbarAction::AddTask => {
                self.session.add_task();
            }
            toolbar::ToolbarAction::Submit => self.submit(),
            toolbar::ToolbarAction::None => {}
        }
    }

    fn apply_task_action(&mut self, action: tasks::TaskAction) {
        let result = match action {
            tasks::TaskAction::LoadCrop(id) => {
                self.session.load_crop(id);
                Ok(())
            }
            tasks::TaskAction::SaveCrop => {
                self.session.save_edit();
                Ok(())
            }
            tasks::TaskAction::CancelEdit => {
                self.session.cancel_edit();
                Ok(())
            }
            tasks::TaskAction::Delete(id) => {
                self.session.delete_task(id);
                Ok(())
            }
            tasks::TaskAction::SetType(id, task_type) => self.session.set_task_type(id, task_type),
            tasks::TaskAction::SetExpected(id, expected) => self.session.set_expected(id, expected),
            tasks::TaskAction::Hover(id) => {
                self.session.set_hovered(id);
                Ok(())
            }
        };

        if let Err(e) = result {
            log::warn!("Task change ignored: {}", e);
        }
    }
}

impl eframe::App for TaskCropApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.poll_image_loader(ctx);
        self.submission.poll();

        // Read shortcuts before any panel can move focus this frame
        let shortcut = ctx.input(|i| {
            shortcut_for(
                self.focused_last_frame,
                i.key_pressed(egui::Key::Enter),
                i.key_pressed(egui::Key::Escape),
            )
        });
        if let Some(shortcut) = shortcut {
            run_shortcut(&mut self.session, shortcut);
        }

        // Request repaint if still loading (to update spinner)
        if self.loading_message.is_some() {
            ctx.request_repaint();
        }

        // Top menu bar
        egui::TopBottomPanel::top("menu_bar").show(ctx, |ui| {
            egui::menu::bar(ui, |ui| {
                ui.menu_button("File", |ui| {
                    if ui.button("Open Image...").clicked() {
                        self.open_image_dialog(ctx);
                        ui.close_menu();
                    }
                    ui.separator();
                    if ui.button("Quit").clicked() {
                        ctx.send_viewport_cmd(egui::ViewportCommand::Close);
                    }
                });
            });
        });

        // Toolbar
        let toolbar_action = egui::TopBottomPanel::top("toolbar")
            .show(ctx, |ui| {
                toolbar::show(
                    ui,
                    &self.session,
                    self.submission.status(),
                    self.submission.endpoint(),
                )
            })
            .inner;
        self.apply_toolbar_action(toolbar_action, ctx);

        // Task list (right side)
        let task_actions = egui::SidePanel::right("tasks")
            .default_width(280.0)
            .show(ctx, |ui| tasks::show(ui, &self.session))
            .inner;
        for action in task_actions {
            self.apply_task_action(action);
        }

        // Main canvas (center)
        let canvas_action = egui::CentralPanel::default()
            .show(ctx, |ui| {
                if let Some(ref message) = self.loading_message {
                    ui.centered_and_justified(|ui| {
                        ui.vertical_centered(|ui| {
                            ui.add_space(20.0);
                            ui.spinner();
                            ui.add_space(10.0);
                            ui.label(
                                egui::RichText::new(message)
                                    .size(16.0)
                                    .color(egui::Color32::from_gray(200)),
                            );
                        });
                    });
                    canvas::CanvasAction::None
                } else {
                    canvas::show(ui, &self.session, &self.image_texture)
                }
            })
            .inner;

        match canvas_action {
            canvas::CanvasAction::SetWorkingRegion(region) => {
                self.session.set_working_region(region);
            }
            canvas::CanvasAction::None => {}
        }

        self.focused_last_frame = ctx.memory(|m| m.focused().is_some());
    }
}
