//! # Tutor CLI Publish Integration Tests
//!
//! File: cli/tests/publish.rs
//!
//! Runs `tutor publish --skip-vcs` against a fixture tree. The git half of the
//! workflow is covered by the coordinator unit tests with a recording shell.
//!

mod common;
use common::*;
use predicates::prelude::*;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Relative path → raw bytes for every file under `dir`.
fn tree(dir: &Path) -> BTreeMap<PathBuf, Vec<u8>> {
    WalkDir::new(dir)
        .sort_by_file_name()
        .into_iter()
        .map(|e| e.unwrap())
        .filter(|e| e.file_type().is_file())
        .map(|e| {
            let bytes = fs::read(e.path()).unwrap();
            (e.path().strip_prefix(dir).unwrap().to_path_buf(), bytes)
        })
        .collect()
}

fn publish(temp: &Path, root: &Path) -> assert_cmd::assert::Assert {
    tutor_cmd(temp)
        .args(["publish", "--skip-vcs", "--root"])
        .arg(root)
        .assert()
}

#[test]
fn test_publish_builds_output_tree() {
    let (temp, root) = tutorial_fixture();

    publish(temp.path(), &root)
        .success()
        .stdout(predicate::str::contains("Published 3 module(s)").and(
            predicate::str::contains("Version control skipped."),
        ));

    let out = output_dir(&root);
    assert!(out.join("en/1.0.0/01_setup.html").is_file());
    assert!(out.join("en/1.0.0/02_find.html").is_file());
    assert!(out.join("en/1.2.0/index.html").is_file());
    assert!(out.join("ko/1.0.0/index.html").is_file());
    assert_eq!(
        fs::read_to_string(out.join("css/style.css")).unwrap(),
        "body { font-family: sans-serif; }"
    );
}

#[test]
fn test_publish_twice_gives_same_tree() {
    let (temp, root) = tutorial_fixture();
    let out = output_dir(&root);

    publish(temp.path(), &root).success();
    let first = tree(&out);
    publish(temp.path(), &root).success();
    let second = tree(&out);

    assert!(!first.is_empty());
    assert_eq!(first, second);
}

#[test]
fn test_publish_clears_stale_output() {
    let (temp, root) = tutorial_fixture();
    let out = output_dir(&root);
    fs::create_dir_all(out.join("fr/0.9.0")).unwrap();
    fs::write(out.join("fr/0.9.0/index.html"), "old").unwrap();

    publish(temp.path(), &root).success();

    assert!(!out.join("fr").exists());
}

#[test]
fn test_publish_without_css_fails() {
    let (temp, root) = tutorial_fixture();
    fs::remove_dir_all(root.parent().unwrap().join("css")).unwrap();

    publish(temp.path(), &root)
        .failure()
        .stderr(predicate::str::contains("Failed to copy shared assets"));
}

#[test]
fn test_publish_refuses_output_that_contains_sources() {
    let temp = tempfile::tempdir().unwrap();
    let root = temp.path().join("tutorials/modules");
    let chapter = root.join("en/1.0.0/source/01_setup.md");
    fs::create_dir_all(chapter.parent().unwrap()).unwrap();
    fs::write(&chapter, "# Setup\n").unwrap();

    publish(temp.path(), &root)
        .failure()
        .stderr(predicate::str::contains("Configuration error"));

    assert!(chapter.is_file());
}
