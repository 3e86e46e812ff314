//! Output file naming
//!
//! Outputs are flat: every entry lands directly in the output directory under
//! the final segment of its input path, whatever the input's depth.

use std::ffi::OsStr;
use std::path::{Path, PathBuf};

use crate::error::{AgentError, Result};

/// Final path segment of an input entry
///
/// Fails for paths with no usable final segment (`/`, `..`, the empty path).
pub fn output_file_name(entry: &Path) -> Result<&OsStr> {
    entry.file_name().ok_or_else(|| {
        AgentError::unusable_input(entry, "path has no final segment to name the output file")
    })
}

/// `<output_dir>/<final segment of entry>`
pub fn output_path_for(output_dir: &Path, entry: &Path) -> Result<PathBuf> {
    Ok(output_dir.join(output_file_name(entry)?))
}
