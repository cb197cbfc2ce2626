//! # Tutor Filesystem Copy Operations
//!
//! File: cli/src/common/fs/copy.rs
//!
//! ## Overview
//!
//! Recursive directory copies used when publishing: each module copies its
//! generated html into its own output subdirectory, and the coordinator copies
//! the shared stylesheet directory to `<output>/css`.
//!
//! `copy_directory_contents` delegates to `fs_extra::dir::copy` with
//! `overwrite` and `content_only` set, so it behaves like
//! `cp -r source/. target/`.
//!
//! ## Usage
//!
//! ```rust
//! use crate::common::fs::copy;
//!
//! copy::copy_directory_contents(&gen_html, &tutorial_output.join("en/1.0.0"))?;
//! ```
//!
use crate::common::fs::io;
use crate::core::error::{Result, TutorError};
use std::path::Path;
use tracing::{debug, info};

/// Copies the contents of `source` recursively into `target`, creating
/// `target` if needed. Existing files at the destination are overwritten.
pub fn copy_directory_contents(source: &Path, target: &Path) -> Result<()> {
    if !source.is_dir() {
        anyhow::bail!(TutorError::FileSystem(format!(
            "Source directory does not exist: {:?}",
            source
        )));
    }
    io::ensure_dir_exists(target)?;
    info!("Copying contents of {:?} to {:?}", source, target);

    let mut options = fs_extra::dir::CopyOptions::new();
    options.overwrite = true;
    options.content_only = true;

    let bytes = fs_extra::dir::copy(source, target, &options).map_err(|e| {
        anyhow::anyhow!(e).context(format!(
            "Failed to copy contents of {:?} to {:?}",
            source, target
        ))
    })?;
    debug!("Copied {} bytes from {:?}", bytes, source);
    Ok(())
}
