//! # Tutorial Model (`tutorial`)
//!
//! File: cli/src/tutorial/mod.rs
//!
//! ## Overview
//!
//! Everything that knows what a tutorial *is*:
//!
//! - **`scanner`**: finds the `<language>/<version>` directories under the root.
//! - **`module_set`**: the `ModuleSet` trait the coordinator broadcasts to.
//! - **`coordinator`**: `Tutorial`, which owns the module list and runs
//!   generate, clean, list and publish across all modules.
//! - **`markdown_module`** / **`chapter`**: the shipped `ModuleSet` that turns
//!   `source/*.md` chapters into HTML and Markdown.
//!
pub mod chapter;
pub mod coordinator;
pub mod markdown_module;
pub mod module_set;
pub mod scanner;

pub use coordinator::{Tutorial, TutorialOptions};
pub use markdown_module::MarkdownModule;
pub use module_set::{ModuleSet, ModuleSetFactory};
