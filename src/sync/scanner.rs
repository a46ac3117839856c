//! Initial directory scan.

use std::path::Path;

use walkdir::WalkDir;

use crate::registry::{endpoint_for_path, ContentRegistry};
use crate::sync::SyncError;

/// Load every regular file under `root` into `registry`.
///
/// Unreadable files and entries are logged and skipped. Only a failure to
/// read `root` itself aborts the scan. Returns the number of files loaded.
pub fn scan_directory(root: &Path, registry: &ContentRegistry) -> Result<usize, SyncError> {
    let mut loaded = 0;

    for entry in WalkDir::new(root) {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) if err.depth() == 0 => {
                return Err(SyncError::Scan {
                    path: root.to_path_buf(),
                    source: err,
                });
            }
            Err(err) => {
                tracing::warn!(error = %err, "Skipping unreadable directory entry");
                continue;
            }
        };

        let path = entry.path();
        let is_file = entry.file_type().is_file() || (entry.path_is_symlink() && path.is_file());
        if !is_file {
            continue;
        }

        let Some(endpoint) = endpoint_for_path(path) else {
            tracing::warn!(path = %path.display(), "Skipping file with non UTF-8 name");
            continue;
        };

        match std::fs::read(path) {
            Ok(content) => {
                tracing::debug!(path = %path.display(), endpoint = %endpoint, "Loaded file");
                registry.upsert(endpoint, content);
                loaded += 1;
            }
            Err(err) => {
                tracing::error!(path = %path.display(), error = %err, "Error reading file");
            }
        }
    }

    Ok(loaded)
}
