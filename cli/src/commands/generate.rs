//! # Tutor Generate Command
//!
//! File: cli/src/commands/generate.rs
//!
//! ## Overview
//!
//! `tutor generate <html|markdown>` regenerates every module's output:
//!
//! - `html`: one page per chapter plus an index, in each module's `gen/html/`.
//! - `markdown`: chapters with code samples inlined, in each module's `gen/markdown/`.
//!
//! Modules are processed in discovery order; the first failure stops the run.
//!
//! ```bash
//! tutor generate html
//! tutor --root ./tutorial/modules generate markdown
//! ```
//!
use crate::core::error::Result;
use clap::{Parser, ValueEnum};
use std::path::Path;
use tracing::info;

#[derive(Parser, Debug)]
pub struct GenerateArgs {
    /// Output format to generate.
    #[arg(value_enum)]
    pub format: OutputFormat,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Html,
    Markdown,
}

pub fn handle_generate(args: GenerateArgs, root: Option<&Path>) -> Result<()> {
    info!("Handling generate command ({:?})...", args.format);
    let tutorial = super::open_tutorial(root, false)?;

    match args.format {
        OutputFormat::Html => tutorial.generate_html()?,
        OutputFormat::Markdown => tutorial.generate_markdown()?,
    }

    println!(
        "Generated {} for {} module(s).",
        match args.format {
            OutputFormat::Html => "HTML",
            OutputFormat::Markdown => "Markdown",
        },
        tutorial.modules().len()
    );
    Ok(())
}
