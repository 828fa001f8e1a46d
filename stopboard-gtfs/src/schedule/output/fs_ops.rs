use std::{io::Write, path::Path};

use tempfile::NamedTempFile;

use crate::schedule::ScheduleError;

/// writes the contents to a temporary file next to `path` and renames it over
/// `path` once fully written. on any failure the previous file at `path` is left
/// untouched and the temporary file is removed.
pub fn write_atomically(path: &Path, contents: &[u8]) -> Result<(), ScheduleError> {
    let write_error = |message: String| ScheduleError::Write {
        path: path.to_path_buf(),
        message,
    };
    let parent = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    std::fs::create_dir_all(parent)
        .map_err(|e| write_error(format!("unable to create output directory: {e}")))?;
    let mut tmp = NamedTempFile::new_in(parent)
        .map_err(|e| write_error(format!("unable to create temporary file: {e}")))?;
    tmp.write_all(contents)
        .and_then(|_| tmp.as_file().sync_all())
        .map_err(|e| write_error(format!("unable to write temporary file: {e}")))?;
    tmp.persist(path)
        .map_err(|e| write_error(format!("unable to replace file: {}", e.error)))?;
    log::debug!("wrote {} bytes to {}", contents.len(), path.display());
    Ok(())
}
