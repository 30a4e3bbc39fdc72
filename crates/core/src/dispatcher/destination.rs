//! Source-to-destination path mapping.

use std::path::{Path, PathBuf};

use crate::encoder::{EncoderError, TARGET_EXTENSION};

/// Mirrors `source` from `input_root` into `output_root` with a `.webp` extension.
///
/// Only the file name's extension is replaced (everything after its last
/// dot); a name without an extension gets `.webp` appended. Directory
/// components are copied verbatim.
pub fn destination_for(
    input_root: &Path,
    output_root: &Path,
    source: &Path,
) -> Result<PathBuf, EncoderError> {
    let relative = source
        .strip_prefix(input_root)
        .map_err(|_| EncoderError::OutsideInputRoot {
            path: source.to_path_buf(),
        })?;

    if relative.file_name().is_none() {
        return Err(EncoderError::OutsideInputRoot {
            path: source.to_path_buf(),
        });
    }

    Ok(output_root.join(relative).with_extension(TARGET_EXTENSION))
}
