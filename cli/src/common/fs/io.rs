//! # Tutor Filesystem I/O Operations
//!
//! File: cli/src/common/fs/io.rs
//!
//! ## Overview
//!
//! Thin wrappers around `std::fs` used by module generation and the publish
//! workflow. Each adds path context to the error and logs what it did.
//!
//! - **`ensure_dir_exists`**: `mkdir -p`, rejecting a path that exists as a file.
//! - **`remove_dir_if_exists`**: `rm -rf` for a directory; a missing path is not an error.
//! - **`read_file_to_string`** / **`write_string_to_file`**: whole-file reads and
//!   writes, creating parent directories on write.
//!
//! ## Usage
//!
//! ```rust
//! use crate::common::fs::io;
//!
//! io::remove_dir_if_exists(&output)?;
//! io::ensure_dir_exists(&output)?;
//! io::write_string_to_file(&output.join("index.html"), &html)?;
//! ```
//!
use crate::core::error::{Result, TutorError};
use anyhow::Context;
use std::fs;
use std::path::Path;
use tracing::{debug, info};

/// Ensures that a directory exists at the specified path.
///
/// Creates the directory and any missing parents. If the path already exists
/// but is not a directory, a `TutorError::FileSystem` is returned.
pub fn ensure_dir_exists(path: &Path) -> Result<()> {
    if !path.exists() {
        fs::create_dir_all(path)
            .with_context(|| format!("Failed to create directory {:?}", path))?;
        info!("Created directory: {:?}", path);
    } else if !path.is_dir() {
        anyhow::bail!(TutorError::FileSystem(format!(
            "Path exists but is not a directory: {:?}",
            path
        )));
    } else {
        debug!("Directory already exists: {:?}", path);
    }
    Ok(())
}

/// Recursively deletes a directory tree. Deleting a path that does not exist
/// succeeds without doing anything.
pub fn remove_dir_if_exists(path: &Path) -> Result<()> {
    match fs::remove_dir_all(path) {
        Ok(()) => {
            info!("Removed directory: {:?}", path);
            Ok(())
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            debug!("Nothing to remove at {:?}", path);
            Ok(())
        }
        Err(e) => Err(anyhow::Error::new(e)
            .context(format!("Failed to remove directory {:?}", path))),
    }
}

/// Reads the entire content of a file into a string.
pub fn read_file_to_string(path: &Path) -> Result<String> {
    fs::read_to_string(path).with_context(|| format!("Failed to read file {:?}", path))
}

/// Writes string content to a file, creating its parent directory first and
/// overwriting any existing file.
pub fn write_string_to_file(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        ensure_dir_exists(parent)?;
    }
    fs::write(path, content).with_context(|| format!("Failed to write to file {:?}", path))?;
    debug!("Wrote content to file: {:?}", path);
    Ok(())
}
