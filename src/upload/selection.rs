use crate::upload::types::PendingFile;
use ignore::Walk;
use std::path::{Path, PathBuf};
use tracing::warn;

/// Turn picked or dropped paths into queue entries, keeping the user's order.
/// Folders expand to the files inside them, honouring `.gitignore`.
pub fn collect_pending(paths: &[PathBuf]) -> Vec<PendingFile> {
    let mut files = Vec::new();

    for path in paths {
        if path.is_dir() {
            for entry in Walk::new(path) {
                match entry {
                    Ok(entry) if entry.path().is_file() => {
                        if let Some(file) = pending_file(entry.path()) {
                            files.push(file);
                        }
                    }
                    Ok(_) => {}
                    Err(e) => warn!(error = %e, "Error walking directory"),
                }
            }
        } else if let Some(file) = pending_file(path) {
            files.push(file);
        }
    }

    files
}

/// Build a queue entry for one file. The content type is guessed from the
/// extension; unknown types stay empty.
pub fn pending_file(path: &Path) -> Option<PendingFile> {
    let name = match path.file_name() {
        Some(name) => name.to_string_lossy().to_string(),
        None => {
            warn!(path = %path.display(), "Skipping path without a file name");
            return None;
        }
    };

    let size = match std::fs::metadata(path) {
        Ok(metadata) => metadata.len(),
        Err(e) => {
            warn!(path = %path.display(), error = %e, "Skipping unreadable file");
            return None;
        }
    };

    let mime_type = mime_guess::from_path(path)
        .first_raw()
        .unwrap_or_default()
        .to_string();

    Some(PendingFile {
        path: path.to_path_buf(),
        name,
        mime_type,
        size,
    })
}
