//! Sequential upload queue.
//!
//! A session takes ownership of the selected files and drains them one at a
//! time: encode, store, shorten, record. The next file is not touched until
//! the current one has been recorded, so at most one store/shorten pair is in
//! flight. A store failure only fails its own item; a shorten failure only
//! costs the short link.
//!
//! The app builds a fresh orchestrator for every session. `run_session` may
//! still be called again on a finished instance; it starts from an empty
//! result list.

use crate::error::UploadError;
use crate::upload::encoder;
use crate::upload::shortener::Shortener;
use crate::upload::store::StoreClient;
use crate::upload::types::{
    ItemStatus, PendingFile, SessionEvent, SessionResult, SessionState, UploadOutcome,
};
use std::collections::VecDeque;
use std::sync::mpsc::Sender;
use tracing::{debug, info, warn};

/// Receives status changes as a session drains
pub trait SessionObserver {
    fn notify(&self, event: SessionEvent);
}

impl SessionObserver for Sender<SessionEvent> {
    fn notify(&self, event: SessionEvent) {
        if self.send(event).is_err() {
            debug!("Session observer hung up");
        }
    }
}

pub struct QueueOrchestrator<S, H> {
    store: S,
    shortener: H,
    queue: VecDeque<PendingFile>,
    results: SessionResult,
    state: SessionState,
}

impl<S: StoreClient, H: Shortener> QueueOrchestrator<S, H> {
    pub fn new(store: S, shortener: H) -> Self {
        Self {
            store,
            shortener,
            queue: VecDeque::new(),
            results: SessionResult::default(),
            state: SessionState::Idle,
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Drain `files` in order and return every outcome.
    ///
    /// An empty selection does nothing. Otherwise the previous results are
    /// discarded and the session runs to completion; there is no way to stop
    /// it halfway.
    pub async fn run_session<O>(&mut self, files: Vec<PendingFile>, observer: &O) -> SessionResult
    where
        O: SessionObserver + ?Sized,
    {
        if files.is_empty() {
            return SessionResult::default();
        }

        self.queue = files.into();
        self.results = SessionResult::default();
        self.state = SessionState::Draining;

        let total = self.queue.len();
        info!(total, "Starting upload session");
        observer.notify(SessionEvent::SessionStarted {
            total,
            names: self.queue.iter().map(|f| f.name.clone()).collect(),
        });

        let mut index = 0;
        while let Some(file) = self.queue.front() {
            observer.notify(SessionEvent::ItemStarted {
                index,
                total,
                name: file.name.clone(),
            });
            let outcome = self.process_one(index, file, observer).await;

            self.results.record(outcome.clone());
            observer.notify(SessionEvent::ItemSettled { index, outcome });
            self.queue.pop_front();
            index += 1;
        }

        self.state = SessionState::Finished;
        info!(
            total,
            successful = self.results.success_count(),
            "Upload session finished"
        );
        observer.notify(SessionEvent::SessionFinished {
            result: self.results.clone(),
        });

        if !self.results.has_success() {
            self.state = SessionState::Idle;
        }
        self.results.clone()
    }

    async fn process_one<O>(&self, index: usize, file: &PendingFile, observer: &O) -> UploadOutcome
    where
        O: SessionObserver + ?Sized,
    {
        observer.notify(SessionEvent::ItemProgress {
            index,
            status: ItemStatus::Processing,
        });

        let long_url = match self.store_file(file).await {
            Ok(url) => url,
            Err(e) => {
                let reason = e.to_string();
                warn!(file = %file.name, error = %reason, "Upload failed");
                observer.notify(SessionEvent::ItemProgress {
                    index,
                    status: ItemStatus::Failed(reason.clone()),
                });
                return UploadOutcome::Failure {
                    name: file.name.clone(),
                    reason,
                };
            }
        };

        observer.notify(SessionEvent::ItemProgress {
            index,
            status: ItemStatus::Shortening,
        });

        let resolved_url = match self.shortener.shorten(&long_url).await {
            Ok(short_url) => short_url,
            Err(e) => {
                warn!(file = %file.name, error = %e, "Shortener failed, keeping long link");
                observer.notify(SessionEvent::ShortenFallback {
                    index,
                    name: file.name.clone(),
                    reason: e.to_string(),
                    alert: e.is_alertable(),
                });
                long_url
            }
        };

        observer.notify(SessionEvent::ItemProgress {
            index,
            status: ItemStatus::Complete,
        });
        info!(file = %file.name, url = %resolved_url, "Upload complete");

        UploadOutcome::Success {
            name: file.name.clone(),
            resolved_url,
        }
    }

    async fn store_file(&self, file: &PendingFile) -> Result<String, UploadError> {
        let encoded = encoder::encode(file).await?;
        self.store
            .store(&file.name, &file.mime_type, encoded.payload())
            .await
    }
}
