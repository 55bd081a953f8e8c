use serde::Deserialize;
use std::path::Path;
use std::time::Duration;

/// Storage script that receives the encoded file and answers with a Drive link
pub const DEFAULT_STORE_URL: &str = "https://script.google.com/macros/s/AKfycbzcecvS-yi7CwCWnqIxXRcJKkXU9E7y_-h6L3ZOT7HjbRh4KdIbI0CbhjmCYmxXwynz/exec";

/// Link shortener backend
pub const DEFAULT_SHORTENER_URL: &str = "https://skypcode.pythonanywhere.com/api/shorten";

/// Config file looked up in the working directory
pub const CONFIG_FILE: &str = "drive_drop.toml";

/// Runtime configuration for the uploader
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct Config {
    /// Storage endpoint (step one of every upload)
    #[serde(default = "default_store_url")]
    pub store_url: String,
    /// Shortening endpoint (step two, soft-fail)
    #[serde(default = "default_shortener_url")]
    pub shortener_url: String,
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,
    /// Per-request timeout. Unset means remote calls may wait forever.
    #[serde(default)]
    pub request_timeout_secs: Option<u64>,
}

fn default_store_url() -> String {
    DEFAULT_STORE_URL.to_string()
}

fn default_shortener_url() -> String {
    DEFAULT_SHORTENER_URL.to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            store_url: default_store_url(),
            shortener_url: default_shortener_url(),
            log_level: default_log_level(),
            request_timeout_secs: None,
        }
    }
}

impl Config {
    /// Load configuration from `drive_drop.toml` (if present) and the
    /// environment.
    pub fn load() -> anyhow::Result<Self> {
        Self::load_from(Path::new(CONFIG_FILE))
    }

    /// Load configuration with an explicit file path. A missing file is fine.
    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        let config = config::Config::builder()
            .set_default("store_url", DEFAULT_STORE_URL)?
            .set_default("shortener_url", DEFAULT_SHORTENER_URL)?
            .set_default("log_level", "info")?
            .add_source(config::File::from(path).required(false))
            // DRIVE_DROP__STORE_URL -> store_url
            .add_source(
                config::Environment::with_prefix("DRIVE_DROP")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize().map_err(Into::into)
    }

    /// Request timeout as Duration, if one is configured
    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs.map(Duration::from_secs)
    }
}
