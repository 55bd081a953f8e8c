//! Drag-and-drop file uploader.
//!
//! - `upload`: the sequential queue (encode, store, shorten) and its events
//! - `app`: the eframe front end that renders those events
//! - `config` / `logging`: endpoint addresses and tracing setup
pub mod app;
pub mod config;
pub mod error;
pub mod logging;
pub mod upload;
pub mod utils;

pub use config::Config;
pub use error::{ShortenError, UploadError};
