//! # Tutor CLI Integration Test Common Helpers
//!
//! File: cli/tests/common.rs
//!
//! ## Overview
//!
//! Shared helpers for the integration tests in `cli/tests/`: a command builder
//! for the compiled `tutor` binary that is isolated from the developer's own
//! configuration, and a small tutorial tree to run it against.
//!

// Different test files use different helpers.
#![allow(dead_code)]

pub use assert_cmd::Command;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// A `tutor` command running inside `workdir`, with HOME and the XDG config
/// directory pointed there so no user configuration leaks in.
pub fn tutor_cmd(workdir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("tutor").expect("Failed to find tutor binary for testing");
    cmd.current_dir(workdir)
        .env_remove("TUTOR_ROOT")
        .env_remove("RUST_LOG")
        .env("HOME", workdir)
        .env("XDG_CONFIG_HOME", workdir.join(".config"));
    cmd
}

fn write(path: &Path, content: &str) {
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

/// Builds:
///
/// ```text
/// <temp>/project/tutorial/css/style.css
/// <temp>/project/tutorial/modules/en/1.0.0/source/{01_setup.md, 02_find.md, code/find.rb}
/// <temp>/project/tutorial/modules/en/1.2.0/source/01_setup.md
/// <temp>/project/tutorial/modules/ko/1.0.0/source/01_setup.md
/// <temp>/project/tutorial/modules/README.txt
/// ```
///
/// Returns the temp dir and the tutorial root (`.../modules`).
pub fn tutorial_fixture() -> (TempDir, PathBuf) {
    let temp = tempfile::tempdir().expect("Failed to create temp dir");
    let tutorial = temp.path().join("project/tutorial");
    let root = tutorial.join("modules");

    write(&tutorial.join("css/style.css"), "body { font-family: sans-serif; }");
    write(
        &root.join("en/1.0.0/source/01_setup.md"),
        "# Setup\n\nInstall the server.\n",
    );
    write(
        &root.join("en/1.0.0/source/02_find.md"),
        "# Finding elements\n\n::include code/find.rb\n",
    );
    write(
        &root.join("en/1.0.0/source/code/find.rb"),
        "find_element(:id, :login)\n",
    );
    write(
        &root.join("en/1.2.0/source/01_setup.md"),
        "# Setup 1.2\n",
    );
    write(&root.join("ko/1.0.0/source/01_setup.md"), "# 설정\n");
    write(&root.join("README.txt"), "not a language");

    (temp, root)
}

/// The directory `tutor publish` writes to for a fixture root.
pub fn output_dir(root: &Path) -> PathBuf {
    root.parent().unwrap().parent().unwrap().join("tutorials")
}
