//! # Tutor Command Modules
//!
//! File: cli/src/commands/mod.rs
//!
//! ## Overview
//!
//! One submodule per top-level command:
//!
//! - `generate`: `tutor generate <html|markdown>`
//! - `clean`: `tutor clean`
//! - `list`: `tutor list`
//! - `publish`: `tutor publish [--skip-vcs]`
//!
//! Each defines its `clap` args struct and a `handle_*` function. They all
//! start from [`open_tutorial`], which merges configuration with the global
//! `--root` flag and discovers the modules.
//!
use crate::common::process::SystemShell;
use crate::core::config::{self, Config};
use crate::core::error::Result;
use crate::core::templating::PageRenderer;
use crate::tutorial::module_set::ModuleSetArgs;
use crate::tutorial::{MarkdownModule, ModuleSet, ModuleSetFactory, Tutorial, TutorialOptions};
use anyhow::Context;
use std::path::{Path, PathBuf};
use std::rc::Rc;
use tracing::debug;

pub mod clean;
pub mod generate;
pub mod list;
pub mod publish;

/// Loads configuration and discovers the tutorial's modules.
///
/// `root` (from `--root` / `TUTOR_ROOT`) wins over `tutorial.root` in the
/// configuration. `skip_vcs` can only turn version control off, never back on.
pub fn open_tutorial(root: Option<&Path>, skip_vcs: bool) -> Result<Tutorial> {
    let cfg = config::load_config().context("Failed to load tutor configuration")?;
    open_tutorial_with(cfg, root, skip_vcs)
}

fn open_tutorial_with(cfg: Config, root: Option<&Path>, skip_vcs: bool) -> Result<Tutorial> {
    let tutorial_root = root
        .map(Path::to_path_buf)
        .or_else(|| cfg.tutorial.root.as_ref().map(PathBuf::from));
    debug!("Using tutorial root {:?}", tutorial_root);

    let renderer = Rc::new(PageRenderer::new(&cfg.tutorial.site_title)?);
    let factory: ModuleSetFactory = Box::new(move |args: &ModuleSetArgs| {
        Ok(Box::new(MarkdownModule::new(args, Rc::clone(&renderer))) as Box<dyn ModuleSet>)
    });

    let options = TutorialOptions {
        tutorial_root,
        skip_version_control: skip_vcs || cfg.publish.skip_version_control,
        publish: cfg.publish,
    };
    Tutorial::new(options, factory, Box::new(SystemShell))
}
