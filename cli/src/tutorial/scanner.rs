//! # Tutorial Directory Scanner
//!
//! File: cli/src/tutorial/scanner.rs
//!
//! ## Overview
//!
//! Discovers which languages and versions a tutorial contains by reading two
//! levels of directories under the tutorial root:
//!
//! ```text
//! modules/            <- tutorial root
//! ├── en/             <- language
//! │   ├── 1.0.0/      <- version
//! │   └── 1.2.0/
//! ├── ko/
//! │   └── 1.0.0/
//! └── README.txt      <- not a directory, ignored
//! ```
//!
//! Only directories count. Files and hidden entries (names starting with `.`)
//! are skipped at both levels, and nothing below the version level is read.
//! A language with no version directories does not appear in the result.
//!
//! Languages and versions are sorted by name so every command visits modules
//! in the same order regardless of how the filesystem lists them. The sort is
//! lexicographic, not semantic: `1.10.0` sorts before `1.2.0`.
//!
use crate::core::error::{Result, TutorError};
use anyhow::anyhow;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Language code → versions available for that language, both sorted.
pub type LanguageVersions = BTreeMap<String, Vec<String>>;

/// Scans `root` for `<language>/<version>` directories.
///
/// # Errors
///
/// Returns a `TutorError::Discovery` if `root` or one of its language
/// directories cannot be read.
pub fn scan_languages(root: &Path) -> Result<LanguageVersions> {
    let mut languages = LanguageVersions::new();

    for (language, language_path) in subdirectories(root)? {
        for (version, _) in subdirectories(&language_path)? {
            languages.entry(language.clone()).or_default().push(version);
        }
    }

    for versions in languages.values_mut() {
        versions.sort();
    }
    debug!("Scanned {}: {:?}", root.display(), languages);
    Ok(languages)
}

/// Lists the visible, UTF-8 named subdirectories of `dir`, sorted by name.
fn subdirectories(dir: &Path) -> Result<Vec<(String, PathBuf)>> {
    let discovery_error = |source: std::io::Error| {
        anyhow!(TutorError::Discovery {
            path: dir.to_path_buf(),
            source,
        })
    };

    let mut found = Vec::new();
    for entry in fs::read_dir(dir).map_err(discovery_error)? {
        let entry = entry.map_err(discovery_error)?;
        let path = entry.path();
        if !path.is_dir() {
            debug!("Skipping non-directory entry: {}", path.display());
            continue;
        }
        let name = match entry.file_name().into_string() {
            Ok(name) => name,
            Err(raw) => {
                warn!("Skipping directory with a non UTF-8 name: {:?}", raw);
                continue;
            }
        };
        if name.starts_with('.') {
            debug!("Skipping hidden directory: {}", path.display());
            continue;
        }
        found.push((name, path));
    }
    found.sort_by(|a, b| a.0.cmp(&b.0));
    Ok(found)
}
