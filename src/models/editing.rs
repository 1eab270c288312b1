// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Single-task edit mode.
//!
//! While a task's crop is being redrawn the working region belongs to that
//! task, and no new task may be created until the edit is saved or
//! cancelled.

use super::task::TaskId;

/// Where a committed working region goes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EditState {
    /// Committing creates a new task
    #[default]
    Idle,
    /// Committing replaces the crop of this task
    Editing(TaskId),
}

#[derive(Debug, Clone, Default)]
pub struct EditingCoordinator {
    state: EditState,
}

impl EditingCoordinator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> EditState {
        self.state
    }

    pub fn editing_id(&self) -> Option<TaskId> {
        match self.state {
            EditState::Idle => None,
            EditState::Editing(id) => Some(id),
        }
    }

    pub fn is_idle(&self) -> bool {
        self.state == EditState::Idle
    }

    /// Enter edit mode for `id`. Refused while another edit is active.
    pub fn begin(&mut self, id: TaskId) -> bool {
        match self.state {
            EditState::Idle => {
                self.state = EditState::Editing(id);
                true
            }
            EditState::Editing(current) => {
                log::debug!("Task {} is already being edited, ignoring {}", current, id);
                false
            }
        }
    }

    /// Leave edit mode, returning the task that was being edited.
    pub fn finish(&mut self) -> Option<TaskId> {
        let id = self.editing_id();
        self.state = EditState::Idle;
        id
    }
}
