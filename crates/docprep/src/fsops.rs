//! Filesystem collaborator for the copy pipeline.
//!
//! Mechanical byte copies only; overwrite and skip policy lives in the
//! dispatcher.

use std::fs;
use std::io;
use std::path::Path;

/// Copy `src` to `dest` byte for byte, creating any missing destination
/// parent directories. Fails when the source cannot be read; an existing
/// destination is replaced.
pub fn copy_file(src: &Path, dest: &Path) -> io::Result<()> {
    if let Some(parent) = dest.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::copy(src, dest)?;
    Ok(())
}
