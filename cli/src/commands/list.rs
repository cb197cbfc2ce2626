//! # Tutor List Command
//!
//! File: cli/src/commands/list.rs
//!
//! ## Overview
//!
//! `tutor list` prints every module followed by its chapters. It only reads
//! the tutorial tree.
//!
//! ```text
//! :: en/1.0.0
//!   01_setup.md - Setup
//!   02_find_elements.md - Finding elements
//! :: ko/1.0.0
//!   01_setup.md - 설정
//! ```
//!
use crate::core::error::Result;
use clap::Parser;
use std::path::Path;
use tracing::info;

#[derive(Parser, Debug)]
pub struct ListArgs {}

pub fn handle_list(_args: ListArgs, root: Option<&Path>) -> Result<()> {
    info!("Handling list command...");
    let tutorial = super::open_tutorial(root, false)?;

    if tutorial.modules().is_empty() {
        println!(
            "No modules found in '{}'. Expected <language>/<version>/ directories.",
            tutorial.tutorial_root().display()
        );
        return Ok(());
    }

    for line in tutorial.list_contents()? {
        println!("{}", line);
    }
    println!(
        "\nFound {} module(s) in {} language(s).",
        tutorial.modules().len(),
        tutorial.languages().len()
    );
    Ok(())
}
