use crate::error::UploadError;
use crate::upload::types::PendingFile;
use base64::{engine::general_purpose::STANDARD, Engine as _};

const FALLBACK_MIME: &str = "application/octet-stream";

/// A file's full contents as a base64 data URL
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedFile {
    data_url: String,
}

impl EncodedFile {
    pub fn from_bytes(mime_type: &str, bytes: &[u8]) -> Self {
        let mime = if mime_type.is_empty() {
            FALLBACK_MIME
        } else {
            mime_type
        };
        Self {
            data_url: format!("data:{};base64,{}", mime, STANDARD.encode(bytes)),
        }
    }

    pub fn data_url(&self) -> &str {
        &self.data_url
    }

    /// The base64 segment after the `,` separator, as the store endpoint
    /// expects it.
    pub fn payload(&self) -> &str {
        self.data_url
            .split_once(',')
            .map(|(_, payload)| payload)
            .unwrap_or_default()
    }
}

/// Read a pending file and encode it. One read, no retry.
pub async fn encode(file: &PendingFile) -> Result<EncodedFile, UploadError> {
    let bytes = tokio::fs::read(&file.path).await?;
    tracing::debug!(file = %file.name, bytes = bytes.len(), "Encoded file");
    Ok(EncodedFile::from_bytes(&file.mime_type, &bytes))
}
