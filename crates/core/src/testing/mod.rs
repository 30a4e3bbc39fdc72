//! Testing utilities and mock implementations.
//!
//! The mock encoder lets the whole traversal-and-dispatch flow run in tests
//! without any image tool installed.
//!
//! # Example
//!
//! ```rust,ignore
//! use webpbatch_core::testing::{fixtures, MockEncoder};
//!
//! let tree = fixtures::image_tree(&["a.png", "nested/b.JPG", "notes.txt"]);
//! let encoder = MockEncoder::new();
//! ```

mod mock_encoder;

pub use mock_encoder::{MockEncoder, RecordedEncode, MOCK_OUTPUT};

/// Test fixtures and helper functions.
pub mod fixtures {
    use std::path::Path;
    use tempfile::TempDir;

    /// Create a temp directory containing the given relative files.
    ///
    /// Intermediate directories are created; every file holds a few bytes.
    pub fn image_tree(files: &[&str]) -> TempDir {
        let dir = TempDir::new().expect("Failed to create temp dir");
        for file in files {
            write_file(dir.path(), file);
        }
        dir
    }

    /// Create `relative` below `root`, with its parent directories.
    pub fn write_file(root: &Path, relative: &str) {
        let path = root.join(relative);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create fixture dir");
        }
        std::fs::write(&path, b"not really an image").expect("Failed to write fixture");
    }
}
