// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Session state management.
//!
//! `Session` is the single source of truth for everything the user is
//! working on: the loaded image, the working crop region, the task list and
//! the edit mode. The UI reads it and reports actions; all changes go
//! through the methods below.

use super::editing::{EditState, EditingCoordinator};
use super::region::CropRegion;
use super::task::{AnnotationTask, TaskId, TaskType};
use super::task_list::{TaskError, TaskListStore};

/// The image being annotated.
#[derive(Debug, Clone, PartialEq)]
pub struct SourceImage {
    /// File name shown in the UI
    pub name: String,
    /// `data:<mime>;base64,...` encoding of the original file
    pub data_url: String,
    pub width: u32,
    pub height: u32,
}

#[derive(Debug, Clone)]
pub struct Session {
    tasks: TaskListStore,
    editing: EditingCoordinator,
    working: CropRegion,
    image: Option<SourceImage>,
    hovered: Option<TaskId>,
}

impl Session {
    /// Create an empty session whose new tasks get `default_type`.
    pub fn new(default_type: TaskType) -> Self {
        Self {
            tasks: TaskListStore::new(default_type),
            editing: EditingCoordinator::new(),
            working: CropRegion::zero(),
            image: None,
            hovered: None,
        }
    }

    pub fn tasks(&self) -> &[AnnotationTask] {
        self.tasks.list()
    }

    pub fn task_list(&self) -> &TaskListStore {
        &self.tasks
    }

    pub fn image(&self) -> Option<&SourceImage> {
        self.image.as_ref()
    }

    pub fn working_region(&self) -> CropRegion {
        self.working
    }

    pub fn edit_state(&self) -> EditState {
        self.editing.state()
    }

    pub fn editing_id(&self) -> Option<TaskId> {
        self.editing.editing_id()
    }

    pub fn hovered(&self) -> Option<TaskId> {
        self.hovered
    }

    /// Swap in a new image. Tasks are kept, the working region is not.
    pub fn set_image(&mut self, image: SourceImage) {
        log::info!(
            "Using image {} ({}x{})",
            image.name,
            image.width,
            image.height
        );
        self.image = Some(image);
        self.working = CropRegion::zero();
    }

    /// Accept a new working region from the cropping canvas.
    pub fn set_working_region(&mut self, region: CropRegion) {
        self.working = match &self.image {
            Some(image) => region.clamped(image.width as f32, image.height as f32),
            None => region,
        };
    }

    pub fn set_hovered(&mut self, id: Option<TaskId>) {
        self.hovered = id;
    }

    /// Whether the "add" action is currently allowed.
    pub fn can_add(&self) -> bool {
        self.working.is_committed() && self.editing.is_idle()
    }

    /// Turn the working region into a new task.
    pub fn add_task(&mut self) -> Option<AnnotationTask> {
        if !self.editing.is_idle() {
            log::debug!("Add ignored while task {:?} is being edited", self.editing_id());
            return None;
        }
        let task = self.tasks.add(self.working)?;
        self.working = CropRegion::zero();
        Some(task)
    }

    /// Start re-cropping task `id`, loading its crop as the working region.
    pub fn load_crop(&mut self, id: TaskId) -> bool {
        let Some(crop) = self.tasks.get(id).map(|task| task.crop) else {
            log::debug!("Cannot load crop of unknown task {}", id);
            return false;
        };
        if !self.editing.begin(id) {
            return false;
        }
        self.working = crop;
        log::info!("Editing crop of task {}", id);
        true
    }

    /// Whether the task under edit can take the working region.
    pub fn can_save_edit(&self) -> bool {
        !self.editing.is_idle() && self.working.is_committed()
    }

    /// Store the working region in the task under edit and leave edit mode.
    pub fn save_edit(&mut self) -> bool {
        if !self.can_save_edit() {
            return false;
        }
        let Some(id) = self.editing.finish() else {
            return false;
        };
        let saved = match self.tasks.update(id, self.working) {
            Ok(()) => true,
            Err(e) => {
                log::warn!("Could not save crop: {}", e);
                false
            }
        };
        self.working = CropRegion::zero();
        saved
    }

    /// Leave edit mode without touching the task.
    pub fn cancel_edit(&mut self) {
        if let Some(id) = self.editing.finish() {
            log::info!("Cancelled editing of task {}", id);
            self.working = CropRegion::zero();
        }
    }

    /// Remove task `id`, ending its edit if it was being edited.
    pub fn delete_task(&mut self, id: TaskId) -> bool {
        if self.editing.editing_id() == Some(id) {
            self.cancel_edit();
        }
        if self.hovered == Some(id) {
            self.hovered = None;
        }
        self.tasks.delete(id)
    }

    pub fn set_task_type(&mut self, id: TaskId, task_type: TaskType) -> Result<(), TaskError> {
        self.tasks.set_task_type(id, task_type)
    }

    pub fn set_expected(&mut self, id: TaskId, expected: String) -> Result<(), TaskError> {
        self.tasks.set_expected(id, expected)
    }

    /// Submission needs an image and at least one task.
    pub fn can_submit(&self) -> bool {
        self.image.is_some() && !self.tasks.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn image(width: u32, height: u32) -> SourceImage {
        SourceImage {
            name: "exam.png".to_string(),
            data_url: "data:image/png;base64,AAAA".to_string(),
            width,
            height,
        }
    }

    fn session_with_image() -> Session {
        let mut session = Session::new(TaskType::Text);
        session.set_image(image(200, 200));
        session
    }

    #[test]
    fn test_add_clears_working_region() {
        let mut session = session_with_image();
        session.set_working_region(CropRegion::new(10.0, 10.0, 50.0, 50.0));
        assert!(session.can_add());

        let task = session.add_task().unwrap();

        assert_eq!(task.id, 0);
        assert_eq!(task.crop, CropRegion::new(10.0, 10.0, 50.0, 50.0));
        assert_eq!(session.working_region(), CropRegion::zero());
        assert!(!session.can_add());
    }

    #[test]
    fn test_add_refused_while_editing() {
        let mut session = session_with_image();
        session.set_working_region(CropRegion::new(10.0, 10.0, 50.0, 50.0));
        session.add_task().unwrap();

        assert!(session.load_crop(0));
        session.set_working_region(CropRegion::new(30.0, 30.0, 10.0, 10.0));

        assert!(!session.can_add());
        assert!(session.add_task().is_none());
        assert_eq!(session.tasks().len(), 1);
        assert_eq!(session.task_list().next_id(), 1);
    }

    #[test]
    fn test_edit_lifecycle_updates_only_crop() {
        let mut session = session_with_image();
        session.set_working_region(CropRegion::new(10.0, 10.0, 50.0, 50.0));
        session.add_task().unwrap();
        session.set_expected(0, "B".to_string()).unwrap();

        assert!(session.load_crop(0));
        assert_eq!(session.working_region(), CropRegion::new(10.0, 10.0, 50.0, 50.0));
        assert_eq!(session.editing_id(), Some(0));

        session.set_working_region(CropRegion::new(20.0, 20.0, 60.0, 60.0));
        assert!(session.save_edit());

        assert_eq!(session.editing_id(), None);
        assert_eq!(session.working_region(), CropRegion::zero());
        let task = &session.tasks()[0];
        assert_eq!(task.crop, CropRegion::new(20.0, 20.0, 60.0, 60.0));
        assert_eq!(task.expected, "B");
        assert_eq!(task.task_type, TaskType::Text);
    }

    #[test]
    fn test_save_edit_refuses_zero_area() {
        let mut session = session_with_image();
        session.set_working_region(CropRegion::new(10.0, 10.0, 50.0, 50.0));
        session.add_task().unwrap();
        session.load_crop(0);

        session.set_working_region(CropRegion::zero());

        assert!(!session.save_edit());
        assert_eq!(session.editing_id(), Some(0));
        assert_eq!(session.tasks()[0].crop, CropRegion::new(10.0, 10.0, 50.0, 50.0));
    }

    #[test]
    fn test_cancel_edit_keeps_task() {
        let mut session = session_with_image();
        session.set_working_region(CropRegion::new(10.0, 10.0, 50.0, 50.0));
        session.add_task().unwrap();
        session.load_crop(0);
        session.set_working_region(CropRegion::new(1.0, 1.0, 5.0, 5.0));

        session.cancel_edit();

        assert_eq!(session.editing_id(), None);
        assert_eq!(session.working_region(), CropRegion::zero());
        assert_eq!(session.tasks()[0].crop, CropRegion::new(10.0, 10.0, 50.0, 50.0));
    }

    #[test]
    fn test_second_load_refused_during_edit() {
        let mut session = session_with_image();
        for _ in 0..2 {
            session.set_working_region(CropRegion::new(10.0, 10.0, 50.0, 50.0));
            session.add_task().unwrap();
        }

        assert!(session.load_crop(0));
        assert!(!session.load_crop(1));
        assert_eq!(session.editing_id(), Some(0));
        assert!(!session.load_crop(42));
    }

    #[test]
    fn test_deleting_edited_task_returns_to_idle() {
        let mut session = session_with_image();
        session.set_working_region(CropRegion::new(10.0, 10.0, 50.0, 50.0));
        session.add_task().unwrap();
        session.load_crop(0);
        session.set_hovered(Some(0));

        assert!(session.delete_task(0));

        assert_eq!(session.editing_id(), None);
        assert_eq!(session.hovered(), None);
        assert!(session.tasks().is_empty());
    }

    #[test]
    fn test_working_region_clamped_to_image() {
        let mut session = session_with_image();
        session.set_working_region(CropRegion::new(150.0, 150.0, 100.0, 100.0));
        assert_eq!(session.working_region(), CropRegion::new(150.0, 150.0, 50.0, 50.0));
    }

    #[test]
    fn test_new_image_keeps_tasks() {
        let mut session = session_with_image();
        session.set_working_region(CropRegion::new(10.0, 10.0, 50.0, 50.0));
        session.add_task().unwrap();
        session.set_working_region(CropRegion::new(1.0, 1.0, 5.0, 5.0));

        session.set_image(image(400, 300));

        assert_eq!(session.tasks().len(), 1);
        assert_eq!(session.working_region(), CropRegion::zero());
        assert_eq!(session.image().map(|i| i.width), Some(400));
    }

    #[test]
    fn test_can_submit_needs_image_and_tasks() {
        let mut session = Session::new(TaskType::Text);
        assert!(!session.can_submit());

        session.set_image(image(100, 100));
        assert!(!session.can_submit());

        session.set_working_region(CropRegion::new(0.0, 0.0, 5.0, 5.0));
        session.add_task().unwrap();
        assert!(session.can_submit());
    }
}
