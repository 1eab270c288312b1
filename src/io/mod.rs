// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! I/O operations: image files in, task submissions out.

pub mod media;
pub mod submission;
