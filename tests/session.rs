use async_trait::async_trait;
use drive_drop::app::build_clients;
use drive_drop::upload::selection::collect_pending;
use drive_drop::upload::{
    QueueOrchestrator, SessionEvent, SessionState, Shortener, StoreClient, UploadOutcome,
};
use drive_drop::{Config, ShortenError, UploadError};
use parking_lot::Mutex;
use std::sync::mpsc::channel;
use std::sync::Arc;

/// Store fake that hands out sequential ids and remembers every payload
#[derive(Clone, Default)]
struct CountingStore {
    payloads: Arc<Mutex<Vec<(String, String, String)>>>,
}

#[async_trait]
impl StoreClient for CountingStore {
    async fn store(
        &self,
        name: &str,
        mime_type: &str,
        encoded_content: &str,
    ) -> Result<String, UploadError> {
        let mut payloads = self.payloads.lock();
        payloads.push((
            name.to_string(),
            mime_type.to_string(),
            encoded_content.to_string(),
        ));
        Ok(format!("https://drive.example/uc?id={}", payloads.len()))
    }
}

struct DownShortener;

#[async_trait]
impl Shortener for DownShortener {
    async fn shorten(&self, _long_url: &str) -> Result<String, ShortenError> {
        Err(ShortenError::Malformed("connection reset".to_string()))
    }
}

#[tokio::test]
async fn test_dropped_folder_drains_in_order_with_long_links() {
    let dir = tempfile::tempdir().unwrap();
    let single = dir.path().join("notes.txt");
    std::fs::write(&single, b"hello").unwrap();
    let folder = dir.path().join("photos");
    std::fs::create_dir(&folder).unwrap();
    std::fs::write(folder.join("cat.png"), [0x89u8, b'P', b'N', b'G']).unwrap();

    let files = collect_pending(&[single, folder]);
    assert_eq!(files.len(), 2);

    let store = CountingStore::default();
    let mut orchestrator = QueueOrchestrator::new(store.clone(), DownShortener);
    let (tx, rx) = channel();

    let result = orchestrator.run_session(files, &tx).await;

    assert_eq!(
        result.outcomes(),
        &[
            UploadOutcome::Success {
                name: "notes.txt".into(),
                resolved_url: "https://drive.example/uc?id=1".into(),
            },
            UploadOutcome::Success {
                name: "cat.png".into(),
                resolved_url: "https://drive.example/uc?id=2".into(),
            },
        ]
    );
    assert_eq!(orchestrator.state(), SessionState::Finished);

    let payloads = store.payloads.lock().clone();
    assert_eq!(payloads[0], ("notes.txt".into(), "text/plain".into(), "aGVsbG8=".into()));
    assert_eq!(payloads[1].1, "image/png");

    drop(tx);
    let events: Vec<_> = rx.iter().collect();
    let fallbacks = events
        .iter()
        .filter(|e| matches!(e, SessionEvent::ShortenFallback { alert: true, .. }))
        .count();
    assert_eq!(fallbacks, 2);
}

#[test]
fn test_clients_build_from_config() {
    let config = Config {
        request_timeout_secs: Some(5),
        ..Config::default()
    };
    assert!(build_clients(&config).is_ok());
    assert!(build_clients(&Config::default()).is_ok());
}
