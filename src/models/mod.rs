// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Data model for crop-region annotation tasks.

pub mod editing;
pub mod region;
pub mod session;
pub mod task;
pub mod task_list;
