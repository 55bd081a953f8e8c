pub mod encoder;
pub mod orchestrator;
pub mod selection;
pub mod shortener;
pub mod store;
#[cfg(test)]
mod test_server;
mod types;

pub use orchestrator::{QueueOrchestrator, SessionObserver};
pub use shortener::{ReqwestShortener, Shortener};
pub use store::{ReqwestStoreClient, StoreClient};
pub use types::{
    ItemStatus, PendingFile, SessionEvent, SessionResult, SessionState, UploadOutcome,
    UploadedFile,
};
