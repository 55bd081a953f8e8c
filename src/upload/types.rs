use std::path::PathBuf;

/// A file waiting in the upload queue. Never changes after selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingFile {
    pub path: PathBuf,
    pub name: String,
    /// Declared content type; empty when the type is unknown
    pub mime_type: String,
    pub size: u64,
}

/// Result of processing one pending file
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UploadOutcome {
    Success { name: String, resolved_url: String },
    Failure { name: String, reason: String },
}

impl UploadOutcome {
    pub fn name(&self) -> &str {
        match self {
            UploadOutcome::Success { name, .. } | UploadOutcome::Failure { name, .. } => name,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, UploadOutcome::Success { .. })
    }
}

/// A successfully uploaded file as listed in the final view
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadedFile {
    pub name: String,
    pub url: String,
}

/// Every outcome of one session, in queue order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionResult {
    outcomes: Vec<UploadOutcome>,
}

impl SessionResult {
    pub(crate) fn record(&mut self, outcome: UploadOutcome) {
        self.outcomes.push(outcome);
    }

    pub fn outcomes(&self) -> &[UploadOutcome] {
        &self.outcomes
    }

    pub fn len(&self) -> usize {
        self.outcomes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.outcomes.is_empty()
    }

    /// Download links, failed items omitted
    pub fn successes(&self) -> Vec<UploadedFile> {
        self.outcomes
            .iter()
            .filter_map(|outcome| match outcome {
                UploadOutcome::Success { name, resolved_url } => Some(UploadedFile {
                    name: name.clone(),
                    url: resolved_url.clone(),
                }),
                UploadOutcome::Failure { .. } => None,
            })
            .collect()
    }

    pub fn failures(&self) -> impl Iterator<Item = &UploadOutcome> {
        self.outcomes.iter().filter(|outcome| !outcome.is_success())
    }

    pub fn success_count(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_success()).count()
    }

    pub fn has_success(&self) -> bool {
        self.outcomes.iter().any(UploadOutcome::is_success)
    }
}

/// Where the orchestrator is in its lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionState {
    #[default]
    Idle,
    Draining,
    Finished,
}

/// Per-item status shown next to each file
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ItemStatus {
    Waiting,
    Processing,
    Shortening,
    Complete,
    Failed(String),
}

impl ItemStatus {
    pub fn label(&self) -> &'static str {
        match self {
            ItemStatus::Waiting => "Waiting...",
            ItemStatus::Processing => "Processing...",
            ItemStatus::Shortening => "Shortening...",
            ItemStatus::Complete => "Complete",
            ItemStatus::Failed(_) => "Failed",
        }
    }

    /// Fraction of the per-item bar to fill
    pub fn progress(&self) -> f32 {
        match self {
            ItemStatus::Waiting | ItemStatus::Processing | ItemStatus::Failed(_) => 0.0,
            ItemStatus::Shortening => 0.5,
            ItemStatus::Complete => 1.0,
        }
    }
}

/// Status changes published while a session drains
#[derive(Debug, Clone, PartialEq)]
pub enum SessionEvent {
    SessionStarted {
        total: usize,
        names: Vec<String>,
    },
    ItemStarted {
        index: usize,
        total: usize,
        name: String,
    },
    ItemProgress {
        index: usize,
        status: ItemStatus,
    },
    /// Shortening failed; the long link is kept
    ShortenFallback {
        index: usize,
        name: String,
        reason: String,
        alert: bool,
    },
    ItemSettled {
        index: usize,
        outcome: UploadOutcome,
    },
    SessionFinished {
        result: SessionResult,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    fn success(name: &str, url: &str) -> UploadOutcome {
        UploadOutcome::Success {
            name: name.to_string(),
            resolved_url: url.to_string(),
        }
    }

    fn failure(name: &str, reason: &str) -> UploadOutcome {
        UploadOutcome::Failure {
            name: name.to_string(),
            reason: reason.to_string(),
        }
    }

    #[test]
    fn test_successes_skip_failures() {
        let mut result = SessionResult::default();
        result.record(failure("a.txt", "quota exceeded"));
        result.record(success("b.txt", "https://s.example/b"));

        assert_eq!(result.len(), 2);
        assert_eq!(result.success_count(), 1);
        assert!(result.has_success());
        assert_eq!(
            result.successes(),
            vec![UploadedFile {
                name: "b.txt".to_string(),
                url: "https://s.example/b".to_string(),
            }]
        );
        assert_eq!(result.failures().count(), 1);
    }

    #[test]
    fn test_empty_result_has_no_success() {
        let result = SessionResult::default();
        assert!(result.is_empty());
        assert!(!result.has_success());
        assert!(result.successes().is_empty());
    }

    #[test]
    fn test_status_labels_and_progress() {
        assert_eq!(ItemStatus::Waiting.label(), "Waiting...");
        assert_eq!(ItemStatus::Shortening.progress(), 0.5);
        assert_eq!(ItemStatus::Complete.progress(), 1.0);
        assert_eq!(ItemStatus::Failed("x".into()).label(), "Failed");
    }
}
