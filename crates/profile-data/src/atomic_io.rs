//! Atomic export writes.
//!
//! Bytes land in a hidden sibling file first and are renamed over the
//! target once flushed, so a reader never observes a half-written export.

use std::io::{self, Write};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

use camino::{Utf8Component, Utf8Path};
use cap_std::ambient_authority;
use cap_std::fs::{Dir, OpenOptions};

use crate::error::ExportError;

static TEMP_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Writes `bytes` to `path`, replacing any existing file atomically.
///
/// The parent directory must already exist.
///
/// # Errors
///
/// Returns [`ExportError::WriteError`] if the path has no file name, the
/// parent directory cannot be opened, or any write step fails.
pub fn write_export(path: &Utf8Path, bytes: &[u8]) -> Result<(), ExportError> {
    let write_error = |message: String| ExportError::WriteError {
        path: path.to_path_buf(),
        message,
    };

    let Some(file_name) = path.file_name() else {
        return Err(write_error("export path must name a file".to_owned()));
    };
    let parent = match path.parent() {
        Some(parent) if !parent.as_str().is_empty() => parent,
        _ => Utf8Path::new("."),
    };
    let dir = Dir::open_ambient_dir(parent, ambient_authority())
        .map_err(|err| write_error(err.to_string()))?;

    write_in_dir(&dir, Utf8Path::new(file_name), bytes)
        .map_err(|err| write_error(err.to_string()))
}

/// Writes `bytes` to the single-component `name` inside `dir`.
fn write_in_dir(dir: &Dir, name: &Utf8Path, bytes: &[u8]) -> io::Result<()> {
    let mut components = name.components();
    let (Some(Utf8Component::Normal(file_name)), None) = (components.next(), components.next())
    else {
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            "export path must be a single file name",
        ));
    };

    let tmp_name = temp_name(file_name);
    let result = fill_temp(dir, &tmp_name, bytes)
        .and_then(|()| replace_target(dir, &tmp_name, file_name));
    if result.is_err() && dir.remove_file(&tmp_name).is_err() {
        // The temp file may never have been created.
    }
    result?;

    if dir.open(".").and_then(|handle| handle.sync_all()).is_err() {
        // Directory sync is best effort.
    }
    Ok(())
}

fn temp_name(file_name: &str) -> String {
    let counter = TEMP_COUNTER.fetch_add(1, Ordering::Relaxed);
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |elapsed| elapsed.as_nanos());
    format!(
        ".{file_name}.partial.{}.{nanos}.{counter}",
        std::process::id()
    )
}

fn fill_temp(dir: &Dir, tmp_name: &str, bytes: &[u8]) -> io::Result<()> {
    let mut options = OpenOptions::new();
    options.write(true).create_new(true);
    let mut file = dir.open_with(tmp_name, &options)?;
    file.write_all(bytes)?;
    file.sync_all()
}

#[cfg(windows)]
fn replace_target(dir: &Dir, tmp_name: &str, target_name: &str) -> io::Result<()> {
    match dir.remove_file(target_name) {
        Ok(()) => {}
        Err(err) if err.kind() == io::ErrorKind::NotFound => {}
        Err(err) => return Err(err),
    }
    dir.rename(tmp_name, dir, target_name)
}

#[cfg(not(windows))]
fn replace_target(dir: &Dir, tmp_name: &str, target_name: &str) -> io::Result<()> {
    dir.rename(tmp_name, dir, target_name)
}
