//! # Tutor Core Infrastructure
//!
//! File: cli/src/core/mod.rs
//!
//! ## Overview
//!
//! Foundational pieces shared by every command:
//! - `config`: configuration loading, merging and validation
//! - `error`: the `TutorError` taxonomy and the `Result` alias
//! - `templating`: page templates wrapped around generated chapters
//!
//! ```rust
//! use crate::core::config;
//! use crate::core::error::{Result, TutorError};
//! use crate::core::templating::PageRenderer;
//! ```
//!
pub mod config;
pub mod error;
pub mod templating;
