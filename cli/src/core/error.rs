//! # Tutor Error Types
//!
//! File: cli/src/core/error.rs
//!
//! ## Overview
//!
//! This module defines the error taxonomy used throughout `tutor`. Every
//! fallible function returns [`Result`], an alias for `anyhow::Result`, so
//! errors can carry `.context(...)` on their way up. Where a caller needs to
//! tell failures apart, the relevant [`TutorError`] variant is either the error
//! itself or attached as context, and can be recovered with
//! `err.downcast_ref::<TutorError>()`.
//!
//! ## Architecture
//!
//! - `Config`: the tutorial root or a configuration value is invalid. Fatal at
//!   construction time.
//! - `Discovery`: the language/version scan could not read a directory.
//! - `ModuleOperation`: a module's generate/delete/publish call failed. Attached
//!   as context around the module's own error by the broadcast.
//! - `VersionControl`: a non-tolerated git step failed during publish. Attached
//!   as context around the shell error.
//! - `FileSystem`, `Template`, `ExternalCommand`: lower-level failures raised by
//!   the helpers in `common` and `core::templating`.
//!
//! ## Examples
//!
//! ```rust
//! match tutorial.publish() {
//!     Ok(()) => println!("Published."),
//!     Err(e) if matches!(e.downcast_ref::<TutorError>(), Some(TutorError::VersionControl { .. })) => {
//!         eprintln!("Output generated but git failed: {:#}", e);
//!     }
//!     Err(e) => return Err(e),
//! }
//! ```
//!
use std::path::PathBuf;
use thiserror::Error;

/// Custom error type for the tutor application.
#[derive(Error, Debug)]
pub enum TutorError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Failed to scan tutorial directory '{}': {source}", path.display())]
    Discovery {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Module '{module}' failed to {operation}")]
    ModuleOperation { module: String, operation: String },

    #[error("Version control step '{step}' failed")]
    VersionControl { step: String },

    #[error("Filesystem error: {0}")]
    FileSystem(String),

    #[error("Template rendering error: {source}")]
    Template {
        #[from]
        source: tera::Error,
    },

    #[error("External command failed: {cmd}, Status: {status}")]
    ExternalCommand { cmd: String, status: String },
}

/// Type alias for Result using anyhow::Error for broad compatibility.
pub type Result<T> = anyhow::Result<T>;
