// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Sending the annotated image to the grading backend.
//!
//! A submission is a single JSON POST containing the image as a data URL and
//! one entry per task. The request runs off the UI thread; its outcome comes
//! back through a channel that the app polls every frame. Each submission is
//! tagged with a generation number and only the newest one may change the
//! visible status, so a slow earlier response cannot overwrite a later one.

use crate::models::task::{AnnotationTask, TaskType};
use serde::Serialize;
use std::sync::mpsc::{channel, Receiver, Sender};

/// Wire form of one task. The task id stays on the client.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TaskPayload {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    #[serde(rename = "type")]
    pub task_type: TaskType,
    pub expected: String,
}

/// Request body posted to the backend.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SubmitPayload {
    pub tasks: Vec<TaskPayload>,
    pub img: String,
}

impl SubmitPayload {
    pub fn new(tasks: &[AnnotationTask], image: &str) -> Self {
        Self {
            tasks: tasks
                .iter()
                .map(|task| TaskPayload {
                    x: task.crop.x,
                    y: task.crop.y,
                    width: task.crop.width,
                    height: task.crop.height,
                    task_type: task.task_type,
                    expected: task.expected.clone(),
                })
                .collect(),
            img: image.to_string(),
        }
    }
}

/// How a submission ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// 2xx response
    Success,
    /// The backend answered with a non-2xx status
    ServerRejected,
    /// The request never got an answer
    TransportFailure,
}

impl SubmitOutcome {
    pub fn from_status(status: u16) -> Self {
        if (200..300).contains(&status) {
            SubmitOutcome::Success
        } else {
            SubmitOutcome::ServerRejected
        }
    }

    fn from_result(result: &ehttp::Result<ehttp::Response>) -> Self {
        match result {
            Ok(response) => {
                let outcome = Self::from_status(response.status);
                match outcome {
                    SubmitOutcome::Success => log::debug!(
                        "Backend accepted submission: {}",
                        response.text().unwrap_or("<binary body>")
                    ),
                    _ => log::warn!(
                        "Backend responded {} {}",
                        response.status,
                        response.status_text
                    ),
                }
                outcome
            }
            Err(e) => {
                log::error!("Something went wrong while sending to backend: {}", e);
                SubmitOutcome::TransportFailure
            }
        }
    }

    /// Fixed user-facing message.
    pub fn message(&self) -> &'static str {
        match self {
            SubmitOutcome::Success => "Successful",
            SubmitOutcome::ServerRejected => "The backend rejected the submission",
            SubmitOutcome::TransportFailure => "Failed to reach the backend",
        }
    }
}

/// What the status line shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SubmissionStatus {
    #[default]
    Idle,
    Pending,
    Finished(SubmitOutcome),
}

impl SubmissionStatus {
    pub fn message(&self) -> &'static str {
        match self {
            SubmissionStatus::Idle => "",
            SubmissionStatus::Pending => "Submitting...",
            SubmissionStatus::Finished(outcome) => outcome.message(),
        }
    }
}

pub struct SubmissionClient {
    endpoint: String,
    generation: u64,
    status: SubmissionStatus,
    sender: Sender<(u64, SubmitOutcome)>,
    receiver: Receiver<(u64, SubmitOutcome)>,
    repaint: Option<egui::Context>,
}

impl SubmissionClient {
    pub fn new(endpoint: impl Into<String>) -> Self {
        let (sender, receiver) = channel();
        Self {
            endpoint: endpoint.into(),
            generation: 0,
            status: SubmissionStatus::Idle,
            sender,
            receiver,
            repaint: None,
        }
    }

    /// Wake the UI when an outcome arrives.
    pub fn with_repaint(mut self, ctx: egui::Context) -> Self {
        self.repaint = Some(ctx);
        self
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn status(&self) -> SubmissionStatus {
        self.status
    }

    /// Post `tasks` and `image` to the backend. Returns immediately with the
    /// generation number of the new submission.
    pub fn submit(&mut self, tasks: &[AnnotationTask], image: &str) -> u64 {
        self.generation += 1;
        let generation = self.generation;

        let body = match serde_json::to_vec(&SubmitPayload::new(tasks, image)) {
            Ok(body) => body,
            Err(e) => {
                log::error!("Failed to encode submission: {}", e);
                self.status = SubmissionStatus::Finished(SubmitOutcome::TransportFailure);
                return generation;
            }
        };

        let mut request = ehttp::Request::post(&self.endpoint, body);
        request.headers = ehttp::Headers::new(&[
            ("Accept", "application/json"),
            ("Content-Type", "application/json"),
        ]);

        self.status = SubmissionStatus::Pending;
        log::info!(
            "Submitting {} tasks to {} (submission {})",
            tasks.len(),
            self.endpoint,
            generation
        );

        let sender = self.sender.clone();
        let repaint = self.repaint.clone();
        ehttp::fetch(request, move |result| {
            let outcome = SubmitOutcome::from_result(&result);
            // The receiver only goes away with the app
            let _ = sender.send((generation, outcome));
            if let Some(ctx) = repaint {
                ctx.request_repaint();
            }
        });

        generation
    }

    /// Collect finished submissions. Returns the newest submission's
    /// outcome if it arrived since the last poll.
    pub fn poll(&mut self) -> Option<SubmitOutcome> {
        let mut latest = None;
        while let Ok((generation, outcome)) = self.receiver.try_recv() {
            if generation == self.generation {
                log::info!("Submission {} finished: {:?}", generation, outcome);
                self.status = SubmissionStatus::Finished(outcome);
                latest = Some(outcome);
            } else {
                log::debug!(
                    "Discarding {:?} from superseded submission {}",
                    outcome,
                    generation
                );
            }
        }
        latest
    }
}
