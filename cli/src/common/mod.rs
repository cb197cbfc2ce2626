//! # Tutor Common Utilities (`common`)
//!
//! File: cli/src/common/mod.rs
//!
//! ## Overview
//!
//! Shared utilities used by the tutorial coordinator and the command handlers,
//! kept apart from command-specific logic (`commands::`) and core
//! infrastructure (`core::`).
//!
//! - **`fs`**: directory creation/removal, whole-file I/O and recursive copies.
//! - **`process`**: the `Shell` seam and the `SystemShell` that runs git.
//!

/// Utilities for filesystem operations (copying, I/O).
pub mod fs;
/// External command execution for the publish workflow.
pub mod process;
