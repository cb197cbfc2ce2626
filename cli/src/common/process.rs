//! # Tutor Process Execution Utilities (`common::process`)
//!
//! File: cli/src/common/process.rs
//!
//! ## Overview
//!
//! The publish workflow drives git through this module. It defines the
//! [`Shell`] seam the coordinator depends on, the [`ShellCommand`] value it
//! passes across that seam, and [`SystemShell`], the implementation that
//! actually spawns processes.
//!
//! ## Architecture
//!
//! - `Shell::run` fails loudly: a spawn error or a non-zero exit becomes a
//!   `TutorError::ExternalCommand`.
//! - `Shell::run_ignoring_failure` never fails the caller. It reports whether
//!   the command succeeded and logs a warning otherwise. The publish workflow
//!   uses it for `git commit`, which exits non-zero when there is nothing to
//!   commit.
//! - Child processes inherit stdio so the user sees git's own output.
//!
//! Tests substitute a recording implementation of `Shell`; nothing outside this
//! file touches `std::process` directly.
//!
use crate::core::error::{Result, TutorError};
use anyhow::{anyhow, Context};
use std::fmt;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use tracing::{debug, error, info, warn};

/// A program, its arguments and the directory to run it in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShellCommand {
    pub program: String,
    pub args: Vec<String>,
    pub cwd: PathBuf,
}

impl ShellCommand {
    pub fn new<I, S>(program: &str, args: I, cwd: &Path) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            program: program.to_string(),
            args: args.into_iter().map(Into::into).collect(),
            cwd: cwd.to_path_buf(),
        }
    }
}

/// Renders the command the way a user would type it, quoting arguments that
/// contain whitespace.
impl fmt::Display for ShellCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program)?;
        for arg in &self.args {
            if arg.chars().any(char::is_whitespace) {
                write!(f, " \"{}\"", arg)?;
            } else {
                write!(f, " {}", arg)?;
            }
        }
        Ok(())
    }
}

/// Runs external commands on behalf of the publish workflow.
pub trait Shell {
    /// Runs `command`, failing on spawn errors and non-zero exit codes.
    fn run(&self, command: &ShellCommand) -> Result<()>;

    /// Runs `command` and reports whether it succeeded. Never fails.
    fn run_ignoring_failure(&self, command: &ShellCommand) -> bool;
}

/// [`Shell`] backed by `std::process::Command`.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemShell;

impl Shell for SystemShell {
    fn run(&self, command: &ShellCommand) -> Result<()> {
        info!("Executing command: {} (in {})", command, command.cwd.display());
        let status = Command::new(&command.program)
            .args(&command.args)
            .current_dir(&command.cwd)
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status()
            .with_context(|| {
                format!(
                    "Failed to execute command '{}'. Is it installed and in PATH?",
                    command.program
                )
            })?;

        if !status.success() {
            let exit_code = status.code().map_or("?".to_string(), |c| c.to_string());
            error!("Command '{}' failed with exit code {}", command, exit_code);
            return Err(anyhow!(TutorError::ExternalCommand {
                cmd: command.to_string(),
                status: exit_code,
            }));
        }

        debug!("Command '{}' completed successfully.", command);
        Ok(())
    }

    fn run_ignoring_failure(&self, command: &ShellCommand) -> bool {
        match self.run(command) {
            Ok(()) => true,
            Err(e) => {
                warn!("Ignoring failure of '{}': {:#}", command, e);
                false
            }
        }
    }
}
