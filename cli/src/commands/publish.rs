//! # Tutor Publish Command
//!
//! File: cli/src/commands/publish.rs
//!
//! ## Overview
//!
//! `tutor publish` rebuilds the published tree and pushes it:
//!
//! 1. Delete and recreate `<root>/../../tutorials/`.
//! 2. Regenerate each module's HTML and copy it to `tutorials/<language>/<version>/`.
//! 3. Copy the shared `css/` directory (a sibling of the root) to `tutorials/css/`.
//! 4. In `tutorials/`: `git add --all .`, `git commit -am <message>` (allowed to
//!    fail when there is nothing to commit), `git pull --rebase <remote> <branch>`,
//!    `git push`, `git checkout <primary branch>`.
//!
//! `--skip-vcs` (or `publish.skip_version_control = true`) stops after step 3.
//!
use crate::core::error::Result;
use clap::Parser;
use std::path::Path;
use tracing::info;

#[derive(Parser, Debug)]
pub struct PublishArgs {
    /// Build the output tree but do not run any git commands.
    #[arg(long)]
    pub skip_vcs: bool,
}

pub fn handle_publish(args: PublishArgs, root: Option<&Path>) -> Result<()> {
    info!("Handling publish command (skip_vcs: {})...", args.skip_vcs);
    let mut tutorial = super::open_tutorial(root, args.skip_vcs)?;

    tutorial.publish()?;

    println!(
        "Published {} module(s) to '{}'.",
        tutorial.modules().len(),
        tutorial.tutorial_path().display()
    );
    if tutorial.skip_version_control() {
        println!("Version control skipped.");
    }
    Ok(())
}
