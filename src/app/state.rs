use crate::upload::{ItemStatus, PendingFile, SessionEvent, UploadOutcome, UploadedFile};
use std::collections::VecDeque;
use std::sync::mpsc::{Receiver, TryRecvError};
use tracing::debug;

/// The four mutually exclusive panels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum View {
    #[default]
    Default,
    Progress,
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FileRow {
    pub name: String,
    pub size: u64,
    pub status: ItemStatus,
}

#[derive(Default)]
pub struct UploadState {
    pub view: View,
    pub title: String,
    pub rows: Vec<FileRow>,
    pub uploaded_files: Vec<UploadedFile>,
    /// Modal messages, shown one at a time
    pub alerts: VecDeque<String>,
    pub error_message: Option<String>,
    pub event_receiver: Option<Receiver<SessionEvent>>,
}

impl UploadState {
    /// Switch to the progress panel with every file waiting
    pub fn begin(&mut self, files: &[PendingFile], receiver: Receiver<SessionEvent>) {
        self.rows = files
            .iter()
            .map(|f| FileRow {
                name: f.name.clone(),
                size: f.size,
                status: ItemStatus::Waiting,
            })
            .collect();
        self.title = format!("Uploading 1/{}", files.len());
        self.uploaded_files.clear();
        self.error_message = None;
        self.event_receiver = Some(receiver);
        self.set_view(View::Progress);
    }

    pub fn is_busy(&self) -> bool {
        self.event_receiver.is_some()
    }

    pub fn set_view(&mut self, view: View) {
        debug!(from = ?self.view, to = ?view, "View change");
        self.view = view;
    }

    /// "Upload another" / "Try again"
    pub fn return_to_default(&mut self) {
        self.rows.clear();
        self.uploaded_files.clear();
        self.error_message = None;
        self.set_view(View::Default);
    }

    /// Show the worker as failed
    pub fn fail(&mut self, message: impl Into<String>) {
        self.event_receiver = None;
        self.error_message = Some(message.into());
        self.set_view(View::Error);
    }

    /// Drain pending events. Returns true if anything changed.
    pub fn poll(&mut self) -> bool {
        let mut changed = false;
        loop {
            let next = match &self.event_receiver {
                Some(receiver) => receiver.try_recv(),
                None => break,
            };
            match next {
                Ok(event) => {
                    self.apply_event(event);
                    changed = true;
                }
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    self.fail("The upload stopped unexpectedly. Please try again.");
                    changed = true;
                    break;
                }
            }
        }
        changed
    }

    pub fn apply_event(&mut self, event: SessionEvent) {
        match event {
            SessionEvent::SessionStarted { total, .. } => {
                self.title = format!("Uploading 1/{}", total);
            }
            SessionEvent::ItemStarted { index, total, .. } => {
                self.title = format!("Uploading {}/{}", index + 1, total);
            }
            SessionEvent::ItemProgress { index, status } => {
                if let Some(row) = self.rows.get_mut(index) {
                    row.status = status;
                }
            }
            SessionEvent::ShortenFallback { reason, alert, .. } => {
                if alert {
                    self.alerts.push_back(format!(
                        "Shortener Failed!\nReason: {}\n\n(Don't worry, using long link instead)",
                        reason
                    ));
                }
            }
            SessionEvent::ItemSettled { index, outcome } => {
                if let UploadOutcome::Failure { reason, .. } = &outcome {
                    self.alerts.push_back(format!("Upload Failed: {}", reason));
                }
                if let Some(row) = self.rows.get_mut(index) {
                    row.status = match outcome {
                        UploadOutcome::Success { .. } => ItemStatus::Complete,
                        UploadOutcome::Failure { reason, .. } => ItemStatus::Failed(reason),
                    };
                }
            }
            SessionEvent::SessionFinished { result } => {
                self.event_receiver = None;
                if result.has_success() {
                    self.uploaded_files = result.successes();
                    self.set_view(View::Success);
                } else {
                    self.alerts.push_back("All file uploads failed.".to_string());
                    self.return_to_default();
                }
            }
        }
    }

    /// Fraction of files settled so far
    pub fn overall_progress(&self) -> f32 {
        if self.rows.is_empty() {
            return 0.0;
        }
        let settled = self
            .rows
            .iter()
            .filter(|r| matches!(r.status, ItemStatus::Complete | ItemStatus::Failed(_)))
            .count();
        settled as f32 / self.rows.len() as f32
    }
}
