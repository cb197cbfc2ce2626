//! # Tutor Clean Command
//!
//! File: cli/src/commands/clean.rs
//!
//! `tutor clean` deletes every module's `gen/` directory. Modules that have
//! nothing generated are skipped silently, so running it twice is harmless.
//!
use crate::core::error::Result;
use clap::Parser;
use std::path::Path;
use tracing::info;

#[derive(Parser, Debug)]
pub struct CleanArgs {}

pub fn handle_clean(_args: CleanArgs, root: Option<&Path>) -> Result<()> {
    info!("Handling clean command...");
    let tutorial = super::open_tutorial(root, false)?;
    tutorial.delete_generated()?;
    println!(
        "Deleted generated output for {} module(s).",
        tutorial.modules().len()
    );
    Ok(())
}
