//! # Tutor Filesystem Utilities (`common::fs`)
//!
//! File: cli/src/common/fs/mod.rs
//!
//! ## Overview
//!
//! Filesystem helpers shared by the module generator and the publish workflow.
//!
//! - **`copy`**: recursive directory copies via `fs_extra`.
//! - **`io`**: directory creation/removal and whole-file reads and writes.
//!
//! Import the submodule you need, e.g. `use crate::common::fs::io;`.
//!

/// Recursive directory copies (`copy_directory_contents`).
pub mod copy;
/// Basic file I/O (`ensure_dir_exists`, `remove_dir_if_exists`, `write_string_to_file`, ...).
pub mod io;
