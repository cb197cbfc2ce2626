//! # Tutor Main Entry Point
//!
//! File: cli/src/main.rs
//!
//! ## Overview
//!
//! `tutor` manages a tutorial written as versioned, per-language modules:
//!
//! ```text
//! tutorial/
//! ├── css/                 <- shared stylesheets, published to tutorials/css
//! └── modules/             <- tutorial root
//!     ├── en/1.0.0/source/
//!     ├── en/1.2.0/source/
//!     └── ko/1.0.0/source/
//! tutorials/               <- publish output (sibling of tutorial/)
//! ```
//!
//! This file handles:
//! - Command-line argument parsing using Clap
//! - Setting up logging based on verbosity flags
//! - Routing execution to the command handlers
//!
//! ## Examples
//!
//! ```bash
//! tutor --root tutorial/modules list
//! tutor generate html
//! tutor -v publish --skip-vcs
//! ```
//!
use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::{fmt, EnvFilter};

mod commands; // Handlers for each subcommand.
mod common; // Shared utilities (fs, process).
mod core; // Configuration, errors, templating.
mod tutorial; // Module discovery and the tutorial coordinator.

/// Top-level command-line arguments.
#[derive(Parser, Debug)]
#[command(
    name = "tutor",
    about = "Generate and publish versioned, multi-language tutorials",
    long_about = "Discovers <language>/<version> tutorial modules under a tutorial root,\n\
                  generates HTML or Markdown for each, and publishes the result.",
    propagate_version = true,
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
    /// Tutorial root containing <language>/<version>/ directories.
    #[arg(long, env = "TUTOR_ROOT", global = true)]
    root: Option<PathBuf>,
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
}

/// All available top-level commands.
#[derive(Parser, Debug)]
enum Commands {
    /// Generate HTML or Markdown for every module
    #[command(alias = "g")]
    Generate(commands::generate::GenerateArgs),
    /// Delete every module's generated output
    #[command(alias = "delete-gen")]
    Clean(commands::clean::CleanArgs),
    /// List every module and its chapters
    #[command(alias = "ls")]
    List(commands::list::ListArgs),
    /// Rebuild the published tree and commit it
    Publish(commands::publish::PublishArgs),
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let log_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));
    fmt::Subscriber::builder()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .init();

    tracing::debug!("Parsed CLI arguments: {:?}", cli);

    let root = cli.root.as_deref();
    let command_result = match cli.command {
        Commands::Generate(args) => commands::generate::handle_generate(args, root),
        Commands::Clean(args) => commands::clean::handle_clean(args, root),
        Commands::List(args) => commands::list::handle_list(args, root),
        Commands::Publish(args) => commands::publish::handle_publish(args, root),
    };

    if let Err(e) = command_result {
        tracing::error!("Command execution failed: {:?}", e);
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }

    Ok(())
}
