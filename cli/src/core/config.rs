//! # Tutor Configuration System
//!
//! File: cli/src/core/config.rs
//!
//! ## Overview
//!
//! This module loads, merges and validates the tutor configuration. It decides
//! where the tutorial root lives when `--root` is not given, what the site is
//! called, and how the publish workflow talks to git.
//!
//! ## Architecture
//!
//! Configuration sources (in order of precedence):
//! 1. Command-line flags (applied by the command handlers, not here)
//! 2. Project-specific `.tutor.toml` in the current directory or its ancestors
//! 3. User-specific `config.toml` in the platform config directory
//! 4. Default values defined in the code
//!
//! A relative `tutorial.root` in a project file is resolved against the
//! directory containing that file, so a checked-in `.tutor.toml` works from
//! any subdirectory. `~` is expanded everywhere.
//!
//! ## Examples
//!
//! ```toml
//! [tutorial]
//! root = "modules"
//! site_title = "Appium Tutorial"
//!
//! [publish]
//! remote = "origin"
//! branch = "gh-pages"
//! primary_branch = "master"
//! ```
//!
//! ```rust
//! let cfg = config::load_config()?;
//! let remote = &cfg.publish.remote;
//! ```
//!
use crate::core::error::{Result, TutorError};
use anyhow::{anyhow, Context};
use directories::ProjectDirs;
use serde::Deserialize;
use std::{
    fs,
    path::{Path, PathBuf},
};
use tracing::{debug, info, warn};

/// Represents the main configuration structure, loaded from TOML files.
#[derive(Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub tutorial: TutorialConfig,
    #[serde(default)]
    pub publish: PublishConfig,
}

/// Where the tutorial lives and how generated pages are titled.
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct TutorialConfig {
    /// Tutorial root (the directory holding `<language>/<version>/`). Can use ~.
    #[serde(default)]
    pub root: Option<String>,
    /// Title shown in every generated page.
    #[serde(default = "default_site_title")]
    pub site_title: String,
}

impl Default for TutorialConfig {
    fn default() -> Self {
        Self {
            root: None,
            site_title: default_site_title(),
        }
    }
}

/// Settings for `tutor publish`.
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct PublishConfig {
    /// Name of the output directory, created next to the tutorial root's parent.
    #[serde(default = "default_output_dir")]
    pub output_dir: String,
    /// Name of the shared assets directory, a sibling of the tutorial root.
    #[serde(default = "default_assets_dir")]
    pub assets_dir: String,
    #[serde(default = "default_remote")]
    pub remote: String,
    /// Branch pulled with `--rebase` before pushing.
    #[serde(default = "default_branch")]
    pub branch: String,
    /// Branch checked out once the push is done.
    #[serde(default = "default_branch")]
    pub primary_branch: String,
    #[serde(default = "default_commit_message")]
    pub commit_message: String,
    /// Generate and copy the output tree but leave git alone.
    #[serde(default)]
    pub skip_version_control: bool,
}

impl Default for PublishConfig {
    fn default() -> Self {
        Self {
            output_dir: default_output_dir(),
            assets_dir: default_assets_dir(),
            remote: default_remote(),
            branch: default_branch(),
            primary_branch: default_branch(),
            commit_message: default_commit_message(),
            skip_version_control: false,
        }
    }
}

fn default_site_title() -> String {
    "Tutorial".to_string()
}
fn default_output_dir() -> String {
    "tutorials".to_string()
}
fn default_assets_dir() -> String {
    "css".to_string()
}
fn default_remote() -> String {
    "origin".to_string()
}
fn default_branch() -> String {
    "master".to_string()
}
fn default_commit_message() -> String {
    "Update tutorial".to_string()
}

const PROJECT_CONFIG_FILENAME: &str = ".tutor.toml";

/// Loads the merged configuration for the current working directory.
pub fn load_config() -> Result<Config> {
    let current_dir = std::env::current_dir().context("Failed to get current directory")?;
    load_config_from(&current_dir)
}

/// Loads the merged configuration as if `tutor` had been started in `start_dir`.
pub fn load_config_from(start_dir: &Path) -> Result<Config> {
    let user_config = load_user_config()?;
    let project_config = load_project_config(start_dir)?;
    let mut merged_config = merge_configs(user_config.unwrap_or_default(), project_config);
    expand_config_paths(&mut merged_config).context("Failed to expand paths in configuration")?;
    validate_config(&merged_config).context("Configuration validation failed")?;
    debug!("Final loaded configuration: {:?}", merged_config);
    Ok(merged_config)
}

fn load_user_config() -> Result<Option<Config>> {
    if let Some(proj_dirs) = ProjectDirs::from("com", "Tutor", "tutor") {
        let config_path = proj_dirs.config_dir().join("config.toml");
        if config_path.exists() {
            info!("Loading user configuration from: {}", config_path.display());
            load_config_from_path(&config_path).map(Some)
        } else {
            debug!(
                "User configuration file not found at {}",
                config_path.display()
            );
            Ok(None)
        }
    } else {
        warn!("Could not determine user config directory.");
        Ok(None)
    }
}

fn load_project_config(start_dir: &Path) -> Result<Option<Config>> {
    let Some(project_config_path) = find_project_config_path(start_dir) else {
        debug!("No project configuration file (.tutor.toml) found in current directory or ancestors.");
        return Ok(None);
    };
    info!(
        "Loading project configuration from: {}",
        project_config_path.display()
    );
    let mut cfg = load_config_from_path(&project_config_path)?;
    if let Some(base_dir) = project_config_path.parent() {
        resolve_relative_root(&mut cfg, base_dir);
    }
    Ok(Some(cfg))
}

/// Walks up from `start_dir` looking for `.tutor.toml`, stopping at the first
/// directory that contains `.git`.
fn find_project_config_path(start_dir: &Path) -> Option<PathBuf> {
    let mut path = start_dir;
    loop {
        let project_config = path.join(PROJECT_CONFIG_FILENAME);
        if project_config.is_file() {
            return Some(project_config);
        }
        if path.join(".git").is_dir() {
            debug!(
                "Found .git directory at {}, stopping project config search.",
                path.display()
            );
            return None;
        }
        path = path.parent()?;
    }
}

fn load_config_from_path(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read configuration file: {}", path.display()))?;
    toml::from_str(&content)
        .with_context(|| format!("Failed to parse TOML from file: {}", path.display()))
}

fn resolve_relative_root(config: &mut Config, base_dir: &Path) {
    if let Some(root) = config.tutorial.root.as_mut() {
        let expanded = shellexpand::tilde(root.as_str()).into_owned();
        let path = Path::new(&expanded);
        if path.is_relative() {
            *root = base_dir.join(path).to_string_lossy().into_owned();
            debug!("Resolved relative tutorial root to {}", root);
        }
    }
}

/// Project values win wherever they differ from the built-in defaults.
fn merge_configs(user: Config, project: Option<Config>) -> Config {
    let project_cfg = match project {
        Some(p) => p,
        None => return user,
    };
    let pick = |project: String, user: String, default: String| {
        if project != default {
            project
        } else {
            user
        }
    };

    Config {
        tutorial: TutorialConfig {
            root: project_cfg.tutorial.root.or(user.tutorial.root),
            site_title: pick(
                project_cfg.tutorial.site_title,
                user.tutorial.site_title,
                default_site_title(),
            ),
        },
        publish: PublishConfig {
            output_dir: pick(
                project_cfg.publish.output_dir,
                user.publish.output_dir,
                default_output_dir(),
            ),
            assets_dir: pick(
                project_cfg.publish.assets_dir,
                user.publish.assets_dir,
                default_assets_dir(),
            ),
            remote: pick(
                project_cfg.publish.remote,
                user.publish.remote,
                default_remote(),
            ),
            branch: pick(
                project_cfg.publish.branch,
                user.publish.branch,
                default_branch(),
            ),
            primary_branch: pick(
                project_cfg.publish.primary_branch,
                user.publish.primary_branch,
                default_branch(),
            ),
            commit_message: pick(
                project_cfg.publish.commit_message,
                user.publish.commit_message,
                default_commit_message(),
            ),
            skip_version_control: project_cfg.publish.skip_version_control
                || user.publish.skip_version_control,
        },
    }
}

fn expand_config_paths(config: &mut Config) -> Result<()> {
    if let Some(root) = config.tutorial.root.as_mut() {
        *root = shellexpand::tilde(root.as_str()).into_owned();
        debug!("Expanded tutorial root: {}", root);
    }
    Ok(())
}

fn validate_config(config: &Config) -> Result<()> {
    debug!("Validating final configuration...");
    let publish = &config.publish;
    let required = [
        ("publish.output_dir", &publish.output_dir),
        ("publish.assets_dir", &publish.assets_dir),
        ("publish.remote", &publish.remote),
        ("publish.branch", &publish.branch),
        ("publish.primary_branch", &publish.primary_branch),
    ];
    for (key, value) in required {
        if value.trim().is_empty() {
            return Err(anyhow!(TutorError::Config(format!(
                "'{}' cannot be empty.",
                key
            ))));
        }
    }
    for (key, value) in [
        ("publish.output_dir", &publish.output_dir),
        ("publish.assets_dir", &publish.assets_dir),
    ] {
        if value.contains('/') || value.contains('\\') || value == ".." || value == "." {
            return Err(anyhow!(TutorError::Config(format!(
                "'{}' must be a plain directory name, got '{}'.",
                key, value
            ))));
        }
    }
    if let Some(root) = &config.tutorial.root {
        if root.trim().is_empty() {
            return Err(anyhow!(TutorError::Config(
                "'tutorial.root' cannot be empty.".to_string()
            )));
        }
    }
    debug!("Configuration validation successful.");
    Ok(())
}
