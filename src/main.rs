// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! TaskCrop - exam task annotation
//!
//! A desktop application for marking the answer regions of an exam image,
//! tagging each with the kind of answer to look for, and sending the result
//! to a grading backend.

mod app;
mod config;
mod io;
mod models;
mod ui;
mod util;

use anyhow::Result;
use app::TaskCropApp;
use config::AppConfig;

fn main() -> Result<()> {
    let config_path = AppConfig::default_path();
    let config = AppConfig::load_or_default(&config_path)?;

    // Initialize logging, RUST_LOG wins over the config file
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(config.log_level.as_filter()),
    )
    .init();

    log::info!("Submissions go to {}", config.backend_url);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([config.window_width, config.window_height])
            .with_min_inner_size([800.0, 600.0])
            .with_title("TaskCrop - Exam Task Annotation"),
        ..Default::default()
    };

    eframe::run_native(
        "TaskCrop",
        options,
        Box::new(move |cc| Ok(Box::new(TaskCropApp::new(cc, &config)))),
    )
    .map_err(|e| anyhow::anyhow!("Application error: {}", e))?;

    Ok(())
}
