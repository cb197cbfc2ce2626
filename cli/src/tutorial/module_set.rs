//! # Module Capability Interface
//!
//! File: cli/src/tutorial/module_set.rs
//!
//! The coordinator only ever talks to modules through [`ModuleSet`]. Each
//! discovered `<language>/<version>` directory gets one implementation,
//! created by a [`ModuleSetFactory`] from its [`ModuleSetArgs`].
//!
use crate::core::error::Result;
use std::path::{Path, PathBuf};

/// Everything a module needs to know about where it lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleSetArgs {
    pub tutorial_root: PathBuf,
    /// Always `tutorial_root/language/version`.
    pub module_root: PathBuf,
    pub language: String,
    pub version: String,
}

/// Operations every tutorial module supports.
pub trait ModuleSet {
    /// Human-readable module name, used in listings and error messages.
    fn name(&self) -> &str;

    fn generate_html(&self) -> Result<()>;

    fn generate_markdown(&self) -> Result<()>;

    /// Removes this module's generated output. Succeeds when there is none.
    fn delete_generated(&self) -> Result<()>;

    /// Description lines for `tutor list`. Must not touch the filesystem
    /// beyond reading.
    fn list_contents(&self) -> Result<Vec<String>>;

    /// Writes this module's published pages under `output_root`, into a
    /// subdirectory no other module writes to.
    fn publish(&self, output_root: &Path) -> Result<()>;
}

/// Builds the module collaborator for one discovered module.
pub type ModuleSetFactory = Box<dyn Fn(&ModuleSetArgs) -> Result<Box<dyn ModuleSet>>>;
