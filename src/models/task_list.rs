// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Ordered task collection with stable identities.
//!
//! The store is the only place tasks are created, changed or removed.
//! Identities come from a counter that only moves forward, so a deleted
//! task's id is never handed out again.

use super::region::CropRegion;
use super::task::{AnnotationTask, TaskId, TaskType};
use thiserror::Error;

/// Errors reported by task list mutations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TaskError {
    #[error("no task with id {0}")]
    NotFound(TaskId),
}

/// Owns the annotation tasks of the current session.
#[derive(Debug, Clone)]
pub struct TaskListStore {
    tasks: Vec<AnnotationTask>,
    next_id: TaskId,
    default_type: TaskType,
}

impl Default for TaskListStore {
    fn default() -> Self {
        Self::new(TaskType::default())
    }
}

impl TaskListStore {
    /// Create an empty store whose new tasks get `default_type`.
    pub fn new(default_type: TaskType) -> Self {
        Self {
            tasks: Vec::new(),
            next_id: 0,
            default_type,
        }
    }

    /// Append a task for `region`. Zero-area regions are refused.
    pub fn add(&mut self, region: CropRegion) -> Option<AnnotationTask> {
        if !region.is_committed() {
            log::debug!("Refusing to add zero-area region {:?}", region);
            return None;
        }

        let task = AnnotationTask::new(self.next_id, region, self.default_type);
        self.next_id += 1;
        self.tasks.push(task.clone());
        log::info!("Added task {}, total: {}", task.id, self.tasks.len());
        Some(task)
    }

    /// Replace the crop of task `id`, leaving its other fields alone.
    pub fn update(&mut self, id: TaskId, region: CropRegion) -> Result<(), TaskError> {
        let task = self.get_mut(id)?;
        task.crop = region;
        log::info!("Updated crop of task {}", id);
        Ok(())
    }

    /// Remove task `id`. Returns whether anything was removed.
    pub fn delete(&mut self, id: TaskId) -> bool {
        let before = self.tasks.len();
        self.tasks.retain(|task| task.id != id);
        let removed = self.tasks.len() != before;
        if removed {
            log::info!("Deleted task {}, total: {}", id, self.tasks.len());
        }
        removed
    }

    /// Tasks in creation order.
    pub fn list(&self) -> &[AnnotationTask] {
        &self.tasks
    }

    pub fn get(&self, id: TaskId) -> Option<&AnnotationTask> {
        self.tasks.iter().find(|task| task.id == id)
    }

    pub fn set_task_type(&mut self, id: TaskId, task_type: TaskType) -> Result<(), TaskError> {
        self.get_mut(id)?.task_type = task_type;
        Ok(())
    }

    pub fn set_expected(&mut self, id: TaskId, expected: String) -> Result<(), TaskError> {
        self.get_mut(id)?.expected = expected;
        Ok(())
    }

    /// The id the next successful `add` will issue.
    #[cfg(test)]
    pub fn next_id(&self) -> TaskId {
        self.next_id
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    fn get_mut(&mut self, id: TaskId) -> Result<&mut AnnotationTask, TaskError> {
        self.tasks
            .iter_mut()
            .find(|task| task.id == id)
            .ok_or(TaskError::NotFound(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn region(x: f32, y: f32, w: f32, h: f32) -> CropRegion {
        CropRegion::new(x, y, w, h)
    }

    #[test]
    fn test_add_assigns_sequential_ids() {
        let mut store = TaskListStore::default();
        let task = store.add(region(10.0, 10.0, 50.0, 50.0)).unwrap();

        assert_eq!(task.id, 0);
        assert_eq!(task.task_type, TaskType::Text);
        assert_eq!(task.expected, "");
        assert_eq!(store.list(), &[task]);
        assert_eq!(store.next_id(), 1);
    }

    #[test]
    fn test_ids_unique_and_below_next_id() {
        let mut store = TaskListStore::default();
        let mut issued = HashSet::new();
        let mut added = 0;
        for i in 1..=30 {
            let task = store.add(region(0.0, 0.0, i as f32, i as f32)).unwrap();
            assert!(issued.insert(task.id), "id {} issued twice", task.id);
            added += 1;
            // Drop every third task, alternating between oldest and newest
            if i % 3 == 0 {
                let victim = if i % 2 == 0 {
                    store.list()[0].id
                } else {
                    task.id
                };
                assert!(store.delete(victim));
                added -= 1;
            }
        }

        assert_eq!(store.len(), added);
        let ids: HashSet<TaskId> = store.list().iter().map(|t| t.id).collect();
        assert_eq!(ids.len(), store.len());
        assert!(ids.iter().all(|&id| id < store.next_id()));
        assert!(issued.iter().all(|&id| id < store.next_id()));
    }

    #[test]
    fn test_zero_area_add_is_refused() {
        let mut store = TaskListStore::default();
        assert!(store.add(region(5.0, 5.0, 0.0, 10.0)).is_none());
        assert!(store.add(region(5.0, 5.0, 10.0, 0.0)).is_none());
        assert!(store.add(CropRegion::zero()).is_none());
        assert!(store.is_empty());
        assert_eq!(store.next_id(), 0);
    }

    #[test]
    fn test_update_replaces_only_crop() {
        let mut store = TaskListStore::default();
        store.add(region(10.0, 10.0, 50.0, 50.0)).unwrap();
        store.add(region(100.0, 100.0, 5.0, 5.0)).unwrap();
        store.set_task_type(0, TaskType::Number).unwrap();
        store.set_expected(0, "42".to_string()).unwrap();
        let untouched = store.list()[1].clone();

        store.update(0, region(20.0, 20.0, 60.0, 60.0)).unwrap();

        let task = store.get(0).unwrap();
        assert_eq!(task.crop, region(20.0, 20.0, 60.0, 60.0));
        assert_eq!(task.task_type, TaskType::Number);
        assert_eq!(task.expected, "42");
        assert_eq!(store.list()[0].id, 0);
        assert_eq!(store.list()[1], untouched);
    }

    #[test]
    fn test_update_unknown_id_reports_not_found() {
        let mut store = TaskListStore::default();
        store.add(region(10.0, 10.0, 50.0, 50.0)).unwrap();
        let before = store.list().to_vec();

        let result = store.update(7, region(0.0, 0.0, 1.0, 1.0));

        assert_eq!(result, Err(TaskError::NotFound(7)));
        assert_eq!(store.list(), before.as_slice());
    }

    #[test]
    fn test_delete_unknown_id_is_noop() {
        let mut store = TaskListStore::default();
        store.add(region(10.0, 10.0, 50.0, 50.0)).unwrap();
        let before = store.list().to_vec();

        assert!(!store.delete(99));
        assert_eq!(store.list(), before.as_slice());
    }

    #[test]
    fn test_delete_keeps_remaining_ids() {
        let mut store = TaskListStore::default();
        for _ in 0..3 {
            store.add(region(0.0, 0.0, 10.0, 10.0)).unwrap();
        }

        assert!(store.delete(1));
        let ids: Vec<TaskId> = store.list().iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![0, 2]);
    }

    #[test]
    fn test_delete_then_add_never_reuses_id() {
        let mut store = TaskListStore::default();
        store.add(region(10.0, 10.0, 50.0, 50.0)).unwrap();
        store.update(0, region(20.0, 20.0, 60.0, 60.0)).unwrap();
        assert!(store.delete(0));
        assert!(store.is_empty());

        let task = store.add(region(1.0, 1.0, 2.0, 2.0)).unwrap();
        assert_eq!(task.id, 1);
    }

    #[test]
    fn test_configured_default_type() {
        let mut store = TaskListStore::new(TaskType::SingleChoice);
        let task = store.add(region(0.0, 0.0, 3.0, 3.0)).unwrap();
        assert_eq!(task.task_type, TaskType::SingleChoice);
    }

    #[test]
    fn test_field_setters_reject_unknown_id() {
        let mut store = TaskListStore::default();
        assert_eq!(
            store.set_task_type(4, TaskType::Shape),
            Err(TaskError::NotFound(4))
        );
        assert_eq!(
            store.set_expected(4, "x".to_string()),
            Err(TaskError::NotFound(4))
        );
    }
}
