// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! UI components for the TaskCrop application.

pub mod canvas;
pub mod tasks;
pub mod toolbar;
