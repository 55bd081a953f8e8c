mod state;
mod ui;

use crate::config::Config;
use crate::upload::selection::collect_pending;
use crate::upload::{
    PendingFile, QueueOrchestrator, ReqwestShortener, ReqwestStoreClient, SessionEvent,
};
use anyhow::Context;
use eframe::{egui, App};
pub use state::{FileRow, UploadState, View};
use std::path::PathBuf;
use std::sync::mpsc::{self, Sender};
use tokio::runtime::Runtime;
use tracing::{error, info, warn};

pub struct DriveDropApp {
    config: Config,
    state: UploadState,
}

impl DriveDropApp {
    pub fn new(_cc: &eframe::CreationContext<'_>, config: Config) -> Self {
        info!("Initializing Drive Drop uploader");
        Self {
            config,
            state: UploadState::default(),
        }
    }

    /// Start a session for the chosen paths. Ignored while one is running.
    pub fn start_upload(&mut self, paths: Vec<PathBuf>) {
        if self.state.is_busy() {
            warn!("Upload already in progress, ignoring new selection");
            return;
        }

        let files = collect_pending(&paths);
        if files.is_empty() {
            info!("Nothing to upload in selection");
            return;
        }

        start_session(&mut self.state, &self.config, files);
    }

    pub fn update_state(&mut self, ctx: &egui::Context) {
        if self.state.poll() {
            ctx.request_repaint();
        }
        if self.state.is_busy() {
            // keep polling the worker
            ctx.request_repaint_after(std::time::Duration::from_millis(100));
        }

        let dropped: Vec<PathBuf> = ctx.input(|i| {
            i.raw
                .dropped_files
                .iter()
                .filter_map(|f| f.path.clone())
                .collect()
        });
        if !dropped.is_empty() && self.state.view == View::Default {
            self.start_upload(dropped);
        }
    }
}

/// Everything a session thread needs, built up front so that setup failures
/// reach the error panel with their real reason.
pub struct SessionWorker {
    runtime: Runtime,
    store: ReqwestStoreClient,
    shortener: ReqwestShortener,
}

impl SessionWorker {
    pub fn new(config: &Config) -> anyhow::Result<Self> {
        reqwest::Url::parse(&config.store_url)
            .with_context(|| format!("Invalid store_url '{}'", config.store_url))?;
        reqwest::Url::parse(&config.shortener_url)
            .with_context(|| format!("Invalid shortener_url '{}'", config.shortener_url))?;

        let runtime = Runtime::new().context("Failed to build async runtime")?;
        let (store, shortener) = build_clients(config).context("Failed to build HTTP client")?;

        Ok(Self {
            runtime,
            store,
            shortener,
        })
    }

    /// One runtime, one orchestrator, one session.
    fn run(self, files: Vec<PendingFile>, sender: Sender<SessionEvent>) {
        let Self {
            runtime,
            store,
            shortener,
        } = self;
        runtime.block_on(async {
            let mut orchestrator = QueueOrchestrator::new(store, shortener);
            orchestrator.run_session(files, &sender).await;
        });
    }
}

/// Prepare the worker, switch to the progress panel and hand the files to a
/// background thread. Setup failures go straight to the error panel.
pub fn start_session(state: &mut UploadState, config: &Config, files: Vec<PendingFile>) {
    let worker = match SessionWorker::new(config) {
        Ok(worker) => worker,
        Err(e) => {
            error!(error = %format!("{:#}", e), "Failed to prepare upload session");
            state.fail(format!("Could not start the upload: {:#}", e));
            return;
        }
    };

    let (sender, receiver) = mpsc::channel();
    state.begin(&files, receiver);

    let spawned = std::thread::Builder::new()
        .name("upload-session".to_string())
        .spawn(move || worker.run(files, sender));

    if let Err(e) = spawned {
        error!(error = %e, "Failed to start upload worker");
        state.fail(format!("Could not start the upload: {}", e));
    }
}

/// Both remote clients share one connection pool. No timeout unless the
/// config asks for one.
pub fn build_clients(config: &Config) -> reqwest::Result<(ReqwestStoreClient, ReqwestShortener)> {
    let mut builder = reqwest::Client::builder();
    if let Some(timeout) = config.request_timeout() {
        builder = builder.timeout(timeout);
    }
    let client = builder.build()?;

    Ok((
        ReqwestStoreClient::new(client.clone(), config.store_url.clone()),
        ReqwestShortener::new(client, config.shortener_url.clone()),
    ))
}

impl App for DriveDropApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.update_state(ctx);
        self.render(ctx);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pending(name: &str) -> PendingFile {
        PendingFile {
            path: PathBuf::from(name),
            name: name.to_string(),
            mime_type: String::new(),
            size: 1,
        }
    }

    #[test]
    fn test_worker_builds_from_default_config() {
        assert!(SessionWorker::new(&Config::default()).is_ok());
    }

    #[test]
    fn test_bad_store_url_reaches_error_panel() {
        let config = Config {
            store_url: "not a url".to_string(),
            ..Config::default()
        };
        let mut state = UploadState::default();

        start_session(&mut state, &config, vec![pending("a.txt")]);

        assert_eq!(state.view, View::Error);
        assert!(!state.is_busy());
        let message = state.error_message.unwrap();
        assert!(message.contains("Invalid store_url 'not a url'"), "{}", message);
    }

    #[test]
    fn test_bad_shortener_url_reaches_error_panel() {
        let config = Config {
            shortener_url: "::".to_string(),
            ..Config::default()
        };
        let mut state = UploadState::default();

        start_session(&mut state, &config, vec![pending("a.txt")]);

        assert_eq!(state.view, View::Error);
        assert!(state
            .error_message
            .as_deref()
            .unwrap_or_default()
            .contains("Invalid shortener_url"));
    }
}
