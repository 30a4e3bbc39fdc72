//! Source file classification by extension.

use once_cell::sync::Lazy;
use std::collections::HashSet;
use std::path::Path;

/// Extensions accepted as conversion sources, lowercase with leading dot.
pub static SUPPORTED_EXTENSIONS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        ".png", ".jpg", ".jpeg", ".webp", ".tif", ".tiff", ".bmp", ".gif", ".heic", ".heif",
        ".avif", ".jfif",
    ]
    .into_iter()
    .collect()
});

/// Whether `path` has a supported image extension, ignoring case.
///
/// Only the file name is inspected; the file is never opened.
pub fn is_convertible(path: &Path) -> bool {
    match path.extension().and_then(|e| e.to_str()) {
        Some(ext) => SUPPORTED_EXTENSIONS.contains(format!(".{}", ext.to_lowercase()).as_str()),
        None => false,
    }
}
