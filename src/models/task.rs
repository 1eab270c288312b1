// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Annotation task data structures.
//!
//! A task pairs a crop region with the kind of answer the grading backend
//! should look for there and the answer it should expect.

use super::region::CropRegion;
use serde::{Deserialize, Serialize};

/// Client-local task identity. Issued by the task list, never sent.
pub type TaskId = u64;

/// Kind of answer expected inside a crop region.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskType {
    SingleChoice,
    MultipleChoice,
    Number,
    #[default]
    Text,
    TextNoNumbers,
    Shape,
}

impl TaskType {
    /// All task types in display order.
    pub fn all() -> &'static [TaskType] {
        &[
            TaskType::SingleChoice,
            TaskType::MultipleChoice,
            TaskType::Number,
            TaskType::Text,
            TaskType::TextNoNumbers,
            TaskType::Shape,
        ]
    }

    /// Human-readable label for the task list.
    pub fn label(&self) -> &'static str {
        match self {
            TaskType::SingleChoice => "Single choice",
            TaskType::MultipleChoice => "Multiple choice",
            TaskType::Number => "Number",
            TaskType::Text => "Text",
            TaskType::TextNoNumbers => "Text (no numbers)",
            TaskType::Shape => "Shape",
        }
    }
}

/// One user-created annotation.
#[derive(Debug, Clone, PartialEq)]
pub struct AnnotationTask {
    pub id: TaskId,
    pub crop: CropRegion,
    pub task_type: TaskType,
    pub expected: String,
}

impl AnnotationTask {
    pub fn new(id: TaskId, crop: CropRegion, task_type: TaskType) -> Self {
        Self {
            id,
            crop,
            task_type,
            expected: String::new(),
        }
    }
}
