//! Directory traversal.
//!
//! The walk keeps an explicit stack of pending directories, so the depth of
//! the tree does not grow the call stack.

use std::path::{Path, PathBuf};
use tracing::debug;

/// Collects every regular file below `root`.
///
/// `exclude` names a subtree that is neither listed nor descended into; paths
/// equal to it or below it are never returned. Directories that cannot be
/// listed are skipped. Symlinks and special files are ignored. The order of
/// the returned paths is unspecified.
pub async fn walk(root: &Path, exclude: Option<&Path>) -> Vec<PathBuf> {
    let mut files = Vec::new();
    let mut frontier = vec![root.to_path_buf()];

    while let Some(dir) = frontier.pop() {
        if exclude.is_some_and(|skip| dir == skip) {
            continue;
        }

        let mut entries = match tokio::fs::read_dir(&dir).await {
            Ok(entries) => entries,
            Err(e) => {
                debug!(dir = %dir.display(), error = %e, "Skipping unreadable directory");
                continue;
            }
        };

        loop {
            let entry = match entries.next_entry().await {
                Ok(Some(entry)) => entry,
                Ok(None) => break,
                Err(e) => {
                    debug!(dir = %dir.display(), error = %e, "Stopped listing directory");
                    break;
                }
            };

            let path = entry.path();
            if exclude.is_some_and(|skip| path.starts_with(skip)) {
                continue;
            }

            // file_type() does not follow symlinks.
            let file_type = match entry.file_type().await {
                Ok(ft) => ft,
                Err(e) => {
                    debug!(path = %path.display(), error = %e, "Skipping entry");
                    continue;
                }
            };

            if file_type.is_dir() {
                frontier.push(path);
            } else if file_type.is_file() {
                files.push(path);
            }
        }
    }

    files
}
