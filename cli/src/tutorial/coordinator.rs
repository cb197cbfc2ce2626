//! # Tutorial Coordinator
//!
//! File: cli/src/tutorial/coordinator.rs
//!
//! ## Overview
//!
//! [`Tutorial`] is the whole-tutorial view: it validates the tutorial root,
//! discovers every `<language>/<version>` module below it, and runs each
//! command against all of them.
//!
//! ## Architecture
//!
//! - **Construction** validates the root, derives the output path
//!   (`<root>/../../tutorials`), scans languages and versions, and builds one
//!   [`TutorialModule`] per pair through the injected [`ModuleSetFactory`].
//!   Any failure aborts construction, so a `Tutorial` always has a complete
//!   module list.
//! - **Broadcast** (`for_each_module`) runs one [`ModuleOperation`] on every
//!   module in order. The first failure stops the loop and is returned with
//!   `TutorError::ModuleOperation` context. Modules already processed are not
//!   rolled back.
//! - **Publish** clears and recreates the output tree, publishes each module
//!   into it, copies the shared stylesheets, and then (unless skipped) runs
//!   the git sequence through the injected [`Shell`]. Progress is tracked as a
//!   [`PublishStage`].
//!
//! Everything runs sequentially on the calling thread.
//!
//! ## Examples
//!
//! ```rust
//! let mut tutorial = Tutorial::new(options, factory, Box::new(SystemShell))?;
//! tutorial.generate_html()?;
//! tutorial.publish()?;
//! ```
//!
use super::module_set::{ModuleSet, ModuleSetArgs, ModuleSetFactory};
use super::scanner::{self, LanguageVersions};
use crate::common::fs::{copy, io};
use crate::common::process::{Shell, ShellCommand};
use crate::core::config::PublishConfig;
use crate::core::error::{Result, TutorError};
use anyhow::{anyhow, Context};
use std::fmt;
use std::fs;
use std::path::{Component, Path, PathBuf};
use tracing::{debug, error, info};

/// Published assets always land here inside the output tree, matching the
/// stylesheet links in the page templates.
const PUBLISHED_ASSETS_DIR: &str = "css";

/// Options accepted by [`Tutorial::new`].
#[derive(Debug, Clone, Default)]
pub struct TutorialOptions {
    /// Directory containing `<language>/<version>/`. Required.
    pub tutorial_root: Option<PathBuf>,
    /// Leave git alone during publish.
    pub skip_version_control: bool,
    pub publish: PublishConfig,
}

impl TutorialOptions {
    #[allow(dead_code)] // Only used by tests for now.
    pub fn new(tutorial_root: impl Into<PathBuf>) -> Self {
        Self {
            tutorial_root: Some(tutorial_root.into()),
            ..Default::default()
        }
    }
}

/// The operations that can be broadcast to every module.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModuleOperation<'a> {
    GenerateHtml,
    GenerateMarkdown,
    DeleteGenerated,
    Publish { output_root: &'a Path },
}

impl fmt::Display for ModuleOperation<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ModuleOperation::GenerateHtml => write!(f, "generate HTML"),
            ModuleOperation::GenerateMarkdown => write!(f, "generate Markdown"),
            ModuleOperation::DeleteGenerated => write!(f, "delete generated output"),
            ModuleOperation::Publish { output_root } => {
                write!(f, "publish into {}", output_root.display())
            }
        }
    }
}

/// Where a publish run currently is, or where it stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PublishStage {
    Idle,
    Clearing,
    Generating,
    AssetCopying,
    VersionControlling,
    Done,
    Failed,
}

/// One discovered `<language>/<version>` module.
pub struct TutorialModule {
    language: String,
    version: String,
    module_root: PathBuf,
    module_set: Box<dyn ModuleSet>,
}

impl TutorialModule {
    #[allow(dead_code)] // Only used by tests for now.
    pub fn language(&self) -> &str {
        &self.language
    }

    #[allow(dead_code)] // Only used by tests for now.
    pub fn version(&self) -> &str {
        &self.version
    }

    #[allow(dead_code)] // Only used by tests for now.
    pub fn module_root(&self) -> &Path {
        &self.module_root
    }

    pub fn name(&self) -> &str {
        self.module_set.name()
    }
}

/// A tutorial root and every module discovered below it.
pub struct Tutorial {
    tutorial_root: PathBuf,
    tutorial_path: PathBuf,
    languages: LanguageVersions,
    modules: Vec<TutorialModule>,
    publish_config: PublishConfig,
    skip_version_control: bool,
    publish_stage: PublishStage,
    factory: ModuleSetFactory,
    shell: Box<dyn Shell>,
}

impl Tutorial {
    /// Validates the tutorial root and discovers its modules.
    ///
    /// # Errors
    ///
    /// - `TutorError::Config` if the root is missing, empty, not a directory,
    ///   has no grandparent to hold the output directory, or if the output
    ///   directory would contain the tutorial root or the shared assets.
    /// - `TutorError::Discovery` if the root cannot be scanned.
    /// - Any error returned by `factory`.
    pub fn new(
        options: TutorialOptions,
        factory: ModuleSetFactory,
        shell: Box<dyn Shell>,
    ) -> Result<Self> {
        let tutorial_root = resolve_tutorial_root(options.tutorial_root.as_deref())?;
        let tutorial_path = derive_output_path(&tutorial_root, &options.publish.output_dir)?;
        ensure_output_outside_sources(&tutorial_root, &tutorial_path, &options.publish.assets_dir)?;
        debug!(
            "Tutorial root {}, output {}",
            tutorial_root.display(),
            tutorial_path.display()
        );

        let mut tutorial = Self {
            tutorial_root,
            tutorial_path,
            languages: LanguageVersions::new(),
            modules: Vec::new(),
            publish_config: options.publish,
            skip_version_control: options.skip_version_control,
            publish_stage: PublishStage::Idle,
            factory,
            shell,
        };
        tutorial.refresh_modules()?;
        Ok(tutorial)
    }

    /// Re-scans the tutorial root and rebuilds the module list. On failure the
    /// previous module list is kept.
    pub fn refresh_modules(&mut self) -> Result<()> {
        let languages = scanner::scan_languages(&self.tutorial_root)?;

        let mut modules = Vec::new();
        for (language, versions) in &languages {
            for version in versions {
                let module_root = self.tutorial_root.join(language).join(version);
                let args = ModuleSetArgs {
                    tutorial_root: self.tutorial_root.clone(),
                    module_root: module_root.clone(),
                    language: language.clone(),
                    version: version.clone(),
                };
                let module_set = (self.factory)(&args).with_context(|| {
                    format!("Failed to set up module {}/{}", language, version)
                })?;
                modules.push(TutorialModule {
                    language: language.clone(),
                    version: version.clone(),
                    module_root,
                    module_set,
                });
            }
        }

        info!(
            "Discovered {} module(s) across {} language(s) in {}",
            modules.len(),
            languages.len(),
            self.tutorial_root.display()
        );
        self.languages = languages;
        self.modules = modules;
        Ok(())
    }

    pub fn tutorial_root(&self) -> &Path {
        &self.tutorial_root
    }

    /// Directory `publish` writes to.
    pub fn tutorial_path(&self) -> &Path {
        &self.tutorial_path
    }

    pub fn languages(&self) -> &LanguageVersions {
        &self.languages
    }

    pub fn modules(&self) -> &[TutorialModule] {
        &self.modules
    }

    pub fn skip_version_control(&self) -> bool {
        self.skip_version_control
    }

    #[allow(dead_code)] // Only used by tests for now.
    pub fn set_skip_version_control(&mut self, skip: bool) {
        self.skip_version_control = skip;
    }

    #[allow(dead_code)] // Only used by tests for now.
    pub fn publish_stage(&self) -> PublishStage {
        self.publish_stage
    }

    /// Shared stylesheet directory, a sibling of the tutorial root.
    pub fn assets_path(&self) -> PathBuf {
        self.tutorial_root
            .parent()
            .unwrap_or(&self.tutorial_root)
            .join(&self.publish_config.assets_dir)
    }

    /// Runs `operation` on every module in order, stopping at the first failure.
    pub fn for_each_module(&self, operation: ModuleOperation<'_>) -> Result<()> {
        for module in &self.modules {
            debug!("{}: {}", module.name(), operation);
            let set = &module.module_set;
            let result = match operation {
                ModuleOperation::GenerateHtml => set.generate_html(),
                ModuleOperation::GenerateMarkdown => set.generate_markdown(),
                ModuleOperation::DeleteGenerated => set.delete_generated(),
                ModuleOperation::Publish { output_root } => set.publish(output_root),
            };
            result.with_context(|| TutorError::ModuleOperation {
                module: module.name().to_string(),
                operation: operation.to_string(),
            })?;
        }
        Ok(())
    }

    pub fn generate_html(&self) -> Result<()> {
        self.for_each_module(ModuleOperation::GenerateHtml)
    }

    pub fn generate_markdown(&self) -> Result<()> {
        self.for_each_module(ModuleOperation::GenerateMarkdown)
    }

    pub fn delete_generated(&self) -> Result<()> {
        self.for_each_module(ModuleOperation::DeleteGenerated)
    }

    /// A `:: <module>` header followed by that module's own listing, for every
    /// module in order.
    pub fn list_contents(&self) -> Result<Vec<String>> {
        let mut lines = Vec::new();
        for module in &self.modules {
            lines.push(format!(":: {}", module.name()));
            let contents = module.module_set.list_contents().with_context(|| {
                TutorError::ModuleOperation {
                    module: module.name().to_string(),
                    operation: "list contents".to_string(),
                }
            })?;
            lines.extend(contents);
        }
        Ok(lines)
    }

    /// Rebuilds the output tree from scratch and, unless skipped, commits and
    /// pushes it.
    ///
    /// A failure leaves the output tree as the last completed step left it and
    /// sets the stage to `PublishStage::Failed`.
    pub fn publish(&mut self) -> Result<()> {
        self.publish_stage = PublishStage::Idle;
        let result = self.run_publish();
        if let Err(e) = &result {
            error!(
                "Publish failed during {:?}: {:#}",
                self.publish_stage, e
            );
            self.publish_stage = PublishStage::Failed;
        }
        result
    }

    fn run_publish(&mut self) -> Result<()> {
        let output = self.tutorial_path.clone();

        self.enter_stage(PublishStage::Clearing);
        io::remove_dir_if_exists(&output)?;
        io::ensure_dir_exists(&output)?;

        self.enter_stage(PublishStage::Generating);
        self.for_each_module(ModuleOperation::Publish {
            output_root: &output,
        })?;

        self.enter_stage(PublishStage::AssetCopying);
        let assets = self.assets_path();
        copy::copy_directory_contents(&assets, &output.join(PUBLISHED_ASSETS_DIR))
            .with_context(|| format!("Failed to copy shared assets from {}", assets.display()))?;

        if self.skip_version_control {
            info!("Skipping version control for {}", output.display());
        } else {
            self.enter_stage(PublishStage::VersionControlling);
            self.commit_and_push(&output)?;
        }

        self.enter_stage(PublishStage::Done);
        info!(
            "Published {} module(s) to {}",
            self.modules.len(),
            output.display()
        );
        Ok(())
    }

    fn enter_stage(&mut self, stage: PublishStage) {
        debug!("Publish stage: {:?} -> {:?}", self.publish_stage, stage);
        self.publish_stage = stage;
    }

    fn commit_and_push(&self, output: &Path) -> Result<()> {
        let cfg = &self.publish_config;

        self.run_vcs(ShellCommand::new("git", ["add", "--all", "."], output))?;

        // `git commit` exits non-zero when there is nothing to commit.
        let commit = ShellCommand::new("git", ["commit", "-am", cfg.commit_message.as_str()], output);
        if !self.shell.run_ignoring_failure(&commit) {
            info!("Nothing committed; continuing with pull and push.");
        }

        self.run_vcs(ShellCommand::new(
            "git",
            ["pull", "--rebase", cfg.remote.as_str(), cfg.branch.as_str()],
            output,
        ))?;
        self.run_vcs(ShellCommand::new("git", ["push"], output))?;
        self.run_vcs(ShellCommand::new(
            "git",
            ["checkout", cfg.primary_branch.as_str()],
            output,
        ))
    }

    fn run_vcs(&self, command: ShellCommand) -> Result<()> {
        self.shell
            .run(&command)
            .with_context(|| TutorError::VersionControl {
                step: command.to_string(),
            })
    }
}

fn resolve_tutorial_root(root: Option<&Path>) -> Result<PathBuf> {
    let root = match root {
        Some(path) if !path.as_os_str().is_empty() => path,
        _ => {
            return Err(anyhow!(TutorError::Config(
                "Tutorial root directory must be set. Use --root, TUTOR_ROOT or tutorial.root in .tutor.toml."
                    .to_string()
            )))
        }
    };
    if !root.is_dir() {
        return Err(anyhow!(TutorError::Config(format!(
            "Tutorial root directory must be an existing directory. Invalid value: {}",
            root.display()
        ))));
    }
    fs::canonicalize(root).map_err(|e| {
        anyhow!(TutorError::Config(format!(
            "Could not resolve tutorial root {}: {}",
            root.display(),
            e
        )))
    })
}

/// `<root>/../../<output_dir>`: outside the module tree, so generated sources
/// and published output can be tracked separately.
fn derive_output_path(tutorial_root: &Path, output_dir: &str) -> Result<PathBuf> {
    tutorial_root
        .parent()
        .and_then(Path::parent)
        .map(|grandparent| grandparent.join(output_dir))
        .ok_or_else(|| {
            anyhow!(TutorError::Config(format!(
                "Tutorial root {} needs two parent directories to hold the output directory",
                tutorial_root.display()
            )))
        })
}

/// Publishing clears the output tree, so it must not hold anything publish
/// reads from.
fn ensure_output_outside_sources(
    tutorial_root: &Path,
    tutorial_path: &Path,
    assets_dir: &str,
) -> Result<()> {
    let assets = normalize(&tutorial_root.parent().unwrap_or(tutorial_root).join(assets_dir));
    for (what, path) in [
        ("tutorial root", tutorial_root),
        ("assets directory", assets.as_path()),
    ] {
        if path.starts_with(tutorial_path) {
            return Err(anyhow!(TutorError::Config(format!(
                "Output directory {} would contain the {} {}; choose another publish.output_dir",
                tutorial_path.display(),
                what,
                path.display()
            ))));
        }
    }
    Ok(())
}

/// Resolves `.` and `..` without touching the filesystem.
fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                out.pop();
            }
            other => out.push(other),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;
    use tempfile::{tempdir, TempDir};
    use walkdir::WalkDir;

    type Log = Rc<RefCell<Vec<String>>>;

    /// Records every call and fails the configured operation for one module.
    struct RecordingModule {
        name: String,
        language: String,
        version: String,
        log: Log,
        fail: Option<(&'static str, String)>,
    }

    impl RecordingModule {
        fn record(&self, op: &'static str) -> Result<()> {
            self.log.borrow_mut().push(format!("{}:{}", self.name, op));
            match &self.fail {
                Some((fail_op, module)) if *fail_op == op && *module == self.name => {
                    Err(anyhow!("{} exploded", op))
                }
                _ => Ok(()),
            }
        }
    }

    impl ModuleSet for RecordingModule {
        fn name(&self) -> &str {
            &self.name
        }
        fn generate_html(&self) -> Result<()> {
            self.record("generate_html")
        }
        fn generate_markdown(&self) -> Result<()> {
            self.record("generate_markdown")
        }
        fn delete_generated(&self) -> Result<()> {
            self.record("delete_generated")
        }
        fn list_contents(&self) -> Result<Vec<String>> {
            Ok(vec![format!("  chapter of {}", self.name)])
        }
        fn publish(&self, output_root: &Path) -> Result<()> {
            self.record("publish")?;
            io::write_string_to_file(
                &output_root
                    .join(&self.language)
                    .join(&self.version)
                    .join("index.html"),
                &format!("<h1>{}</h1>", self.name),
            )
        }
    }

    /// Records every command; `run` fails for commands whose text contains `fail_on`.
    #[derive(Clone, Default)]
    struct RecordingShell {
        log: Rc<RefCell<Vec<(String, PathBuf)>>>,
        fail_on: Vec<&'static str>,
    }

    impl RecordingShell {
        fn failing(fail_on: &[&'static str]) -> Self {
            Self {
                fail_on: fail_on.to_vec(),
                ..Default::default()
            }
        }

        fn commands(&self) -> Vec<String> {
            self.log.borrow().iter().map(|(c, _)| c.clone()).collect()
        }
    }

    impl Shell for RecordingShell {
        fn run(&self, command: &ShellCommand) -> Result<()> {
            let text = command.to_string();
            self.log
                .borrow_mut()
                .push((text.clone(), command.cwd.clone()));
            if self.fail_on.iter().any(|f| text.contains(f)) {
                return Err(anyhow!(TutorError::ExternalCommand {
                    cmd: text,
                    status: "1".into(),
                }));
            }
            Ok(())
        }

        fn run_ignoring_failure(&self, command: &ShellCommand) -> bool {
            self.run(command).is_ok()
        }
    }

    /// `<temp>/project/tutorial/modules/{en/1.0.0,en/1.2.0,ko/1.0.0}` plus the
    /// shared `<temp>/project/tutorial/css/`.
    fn fixture() -> (TempDir, PathBuf) {
        let temp = tempdir().unwrap();
        let root = temp.path().join("project/tutorial/modules");
        for dir in ["en/1.0.0", "en/1.2.0", "ko/1.0.0"] {
            fs::create_dir_all(root.join(dir)).unwrap();
        }
        fs::write(root.join("README.txt"), "not a language").unwrap();
        io::write_string_to_file(
            &temp.path().join("project/tutorial/css/style.css"),
            "body { margin: 0 }",
        )
        .unwrap();
        (temp, root)
    }

    fn recording_factory(log: &Log, fail: Option<(&'static str, &str)>) -> ModuleSetFactory {
        let log = Rc::clone(log);
        let fail = fail.map(|(op, module)| (op, module.to_string()));
        Box::new(move |args: &ModuleSetArgs| {
            Ok(Box::new(RecordingModule {
                name: format!("{}/{}", args.language, args.version),
                language: args.language.clone(),
                version: args.version.clone(),
                log: Rc::clone(&log),
                fail: fail.clone(),
            }) as Box<dyn ModuleSet>)
        })
    }

    fn tutorial_with(
        root: &Path,
        log: &Log,
        fail: Option<(&'static str, &str)>,
        shell: RecordingShell,
    ) -> Result<Tutorial> {
        Tutorial::new(
            TutorialOptions::new(root),
            recording_factory(log, fail),
            Box::new(shell),
        )
    }

    fn snapshot(dir: &Path) -> Vec<(PathBuf, Vec<u8>)> {
        WalkDir::new(dir)
            .sort_by_file_name()
            .into_iter()
            .map(|e| e.unwrap())
            .map(|e| {
                let bytes = if e.file_type().is_file() {
                    fs::read(e.path()).unwrap()
                } else {
                    Vec::new()
                };
                (e.path().strip_prefix(dir).unwrap().to_path_buf(), bytes)
            })
            .collect()
    }

    #[test]
    fn test_discovers_one_module_per_language_version() -> Result<()> {
        let (_temp, root) = fixture();
        let log = Log::default();

        let tutorial = tutorial_with(&root, &log, None, RecordingShell::default())?;

        let modules = tutorial.modules();
        assert_eq!(modules.len(), 3);
        let names: Vec<_> = modules.iter().map(|m| m.name()).collect();
        assert_eq!(names, vec!["en/1.0.0", "en/1.2.0", "ko/1.0.0"]);
        for module in modules {
            assert_eq!(
                module.module_root(),
                tutorial
                    .tutorial_root()
                    .join(module.language())
                    .join(module.version())
            );
        }
        assert!(!tutorial.languages().contains_key("README.txt"));
        Ok(())
    }

    #[test]
    fn test_output_path_is_beside_grandparent() -> Result<()> {
        let (temp, root) = fixture();
        let tutorial = tutorial_with(&root, &Log::default(), None, RecordingShell::default())?;

        let expected = fs::canonicalize(temp.path().join("project"))?.join("tutorials");
        assert_eq!(tutorial.tutorial_path(), expected);
        assert_eq!(
            tutorial.assets_path(),
            fs::canonicalize(temp.path().join("project/tutorial"))?.join("css")
        );
        Ok(())
    }

    #[test]
    fn test_invalid_roots_are_configuration_errors() {
        let temp = tempdir().unwrap();
        let file = temp.path().join("a/b/file.txt");
        io::write_string_to_file(&file, "x").unwrap();

        let roots = [
            None,
            Some(PathBuf::new()),
            Some(temp.path().join("missing")),
            Some(file),
        ];
        for root in roots {
            let log = Log::default();
            let options = TutorialOptions {
                tutorial_root: root.clone(),
                ..Default::default()
            };
            let result = Tutorial::new(
                options,
                recording_factory(&log, None),
                Box::new(RecordingShell::default()),
            );
            let err = result.err().expect("construction should fail");
            assert!(
                matches!(err.downcast_ref::<TutorError>(), Some(TutorError::Config(_))),
                "root {:?} gave {:#}",
                root,
                err
            );
        }
    }

    #[test]
    fn test_output_containing_root_is_rejected_before_anything_is_deleted() {
        let temp = tempdir().unwrap();
        let root = temp.path().join("tutorials/modules");
        let chapter = root.join("en/1.0.0/source/01_setup.md");
        io::write_string_to_file(&chapter, "# Setup").unwrap();

        let result = tutorial_with(&root, &Log::default(), None, RecordingShell::default());

        let err = result.err().expect("construction should fail");
        assert!(matches!(
            err.downcast_ref::<TutorError>(),
            Some(TutorError::Config(_))
        ));
        assert!(chapter.is_file());
    }

    #[test]
    fn test_output_dir_naming_the_tutorial_directory_is_rejected() {
        let (_temp, root) = fixture();
        let options = TutorialOptions {
            tutorial_root: Some(root.clone()),
            skip_version_control: true,
            publish: PublishConfig {
                output_dir: "tutorial".into(),
                ..Default::default()
            },
        };

        let result = Tutorial::new(
            options,
            recording_factory(&Log::default(), None),
            Box::new(RecordingShell::default()),
        );

        let err = result.err().expect("construction should fail");
        assert!(format!("{:#}", err).contains("would contain the tutorial root"));
        assert!(root.join("en/1.0.0").is_dir());
    }

    #[test]
    fn test_assets_inside_output_are_rejected() {
        let temp = tempdir().unwrap();
        let tutorial_root = temp.path().join("project/tutorial/modules");
        let tutorial_path = temp.path().join("project/tutorials");

        let err = ensure_output_outside_sources(&tutorial_root, &tutorial_path, "../tutorials/css")
            .unwrap_err();

        assert!(err.to_string().contains("would contain the assets directory"));
        assert!(ensure_output_outside_sources(&tutorial_root, &tutorial_path, "css").is_ok());
    }

    #[test]
    fn test_generate_html_reaches_every_module_once_in_order() -> Result<()> {
        let (_temp, root) = fixture();
        let log = Log::default();
        let tutorial = tutorial_with(&root, &log, None, RecordingShell::default())?;

        tutorial.generate_html()?;

        assert_eq!(
            *log.borrow(),
            vec![
                "en/1.0.0:generate_html",
                "en/1.2.0:generate_html",
                "ko/1.0.0:generate_html"
            ]
        );
        Ok(())
    }

    #[test]
    fn test_broadcast_stops_at_first_failure() -> Result<()> {
        let (_temp, root) = fixture();
        let log = Log::default();
        let tutorial = tutorial_with(
            &root,
            &log,
            Some(("generate_markdown", "en/1.2.0")),
            RecordingShell::default(),
        )?;

        let err = tutorial.generate_markdown().unwrap_err();

        assert!(matches!(
            err.downcast_ref::<TutorError>(),
            Some(TutorError::ModuleOperation { module, operation })
                if module == "en/1.2.0" && operation == "generate Markdown"
        ));
        assert_eq!(
            *log.borrow(),
            vec!["en/1.0.0:generate_markdown", "en/1.2.0:generate_markdown"]
        );
        Ok(())
    }

    #[test]
    fn test_delete_generated_broadcasts() -> Result<()> {
        let (_temp, root) = fixture();
        let log = Log::default();
        let tutorial = tutorial_with(&root, &log, None, RecordingShell::default())?;

        tutorial.delete_generated()?;

        assert_eq!(log.borrow().len(), 3);
        assert!(log.borrow().iter().all(|l| l.ends_with(":delete_generated")));
        Ok(())
    }

    #[test]
    fn test_list_contents_blocks_in_order_without_mutation() -> Result<()> {
        let (temp, root) = fixture();
        let log = Log::default();
        let tutorial = tutorial_with(&root, &log, None, RecordingShell::default())?;
        let before = snapshot(temp.path());

        let lines = tutorial.list_contents()?;

        assert_eq!(
            lines,
            vec![
                ":: en/1.0.0",
                "  chapter of en/1.0.0",
                ":: en/1.2.0",
                "  chapter of en/1.2.0",
                ":: ko/1.0.0",
                "  chapter of ko/1.0.0",
            ]
        );
        assert_eq!(snapshot(temp.path()), before);
        assert!(log.borrow().is_empty());
        Ok(())
    }

    #[test]
    fn test_publish_builds_output_and_runs_git_sequence() -> Result<()> {
        let (_temp, root) = fixture();
        let log = Log::default();
        let shell = RecordingShell::default();
        let mut tutorial = tutorial_with(&root, &log, None, shell.clone())?;
        let out = tutorial.tutorial_path().to_path_buf();
        io::write_string_to_file(&out.join("stale.html"), "old")?;

        tutorial.publish()?;

        assert!(!out.join("stale.html").exists());
        assert!(out.join("en/1.0.0/index.html").is_file());
        assert!(out.join("ko/1.0.0/index.html").is_file());
        assert_eq!(fs::read_to_string(out.join("css/style.css"))?, "body { margin: 0 }");
        assert_eq!(
            shell.commands(),
            vec![
                "git add --all .",
                "git commit -am \"Update tutorial\"",
                "git pull --rebase origin master",
                "git push",
                "git checkout master",
            ]
        );
        assert!(shell.log.borrow().iter().all(|(_, cwd)| cwd == &out));
        assert_eq!(tutorial.publish_stage(), PublishStage::Done);
        Ok(())
    }

    #[test]
    fn test_publish_twice_without_vcs_is_idempotent() -> Result<()> {
        let (_temp, root) = fixture();
        let shell = RecordingShell::default();
        let mut tutorial = tutorial_with(&root, &Log::default(), None, shell.clone())?;
        tutorial.set_skip_version_control(true);

        tutorial.publish()?;
        let first = snapshot(tutorial.tutorial_path());
        tutorial.publish()?;
        let second = snapshot(tutorial.tutorial_path());

        assert_eq!(first, second);
        assert!(shell.commands().is_empty());
        Ok(())
    }

    #[test]
    fn test_failed_commit_is_tolerated() -> Result<()> {
        let (_temp, root) = fixture();
        let shell = RecordingShell::failing(&["git commit"]);
        let mut tutorial = tutorial_with(&root, &Log::default(), None, shell.clone())?;

        tutorial.publish()?;

        assert_eq!(shell.commands().len(), 5);
        assert_eq!(tutorial.publish_stage(), PublishStage::Done);
        Ok(())
    }

    #[test]
    fn test_failed_push_aborts_with_version_control_error() -> Result<()> {
        let (_temp, root) = fixture();
        let shell = RecordingShell::failing(&["git push"]);
        let mut tutorial = tutorial_with(&root, &Log::default(), None, shell.clone())?;

        let err = tutorial.publish().unwrap_err();

        assert!(matches!(
            err.downcast_ref::<TutorError>(),
            Some(TutorError::VersionControl { step }) if step == "git push"
        ));
        assert_eq!(
            shell.commands().last().map(String::as_str),
            Some("git push"),
            "checkout must not run after a failed push"
        );
        assert_eq!(tutorial.publish_stage(), PublishStage::Failed);
        Ok(())
    }

    #[test]
    fn test_module_failure_during_publish_halts_before_assets() -> Result<()> {
        let (_temp, root) = fixture();
        let log = Log::default();
        let shell = RecordingShell::default();
        let mut tutorial = tutorial_with(&root, &log, Some(("publish", "en/1.2.0")), shell.clone())?;

        let err = tutorial.publish().unwrap_err();

        assert!(matches!(
            err.downcast_ref::<TutorError>(),
            Some(TutorError::ModuleOperation { module, .. }) if module == "en/1.2.0"
        ));
        let out = tutorial.tutorial_path();
        assert!(out.join("en/1.0.0/index.html").is_file(), "no rollback");
        assert!(!out.join("css").exists());
        assert!(shell.commands().is_empty());
        Ok(())
    }

    #[test]
    fn test_missing_assets_fail_publish() -> Result<()> {
        let (temp, root) = fixture();
        fs::remove_dir_all(temp.path().join("project/tutorial/css"))?;
        let mut tutorial =
            tutorial_with(&root, &Log::default(), None, RecordingShell::default())?;

        assert!(tutorial.publish().is_err());
        assert_eq!(tutorial.publish_stage(), PublishStage::Failed);
        Ok(())
    }

    #[test]
    fn test_refresh_modules_picks_up_new_versions() -> Result<()> {
        let (_temp, root) = fixture();
        let mut tutorial =
            tutorial_with(&root, &Log::default(), None, RecordingShell::default())?;
        fs::create_dir_all(root.join("ko/1.2.0"))?;

        tutorial.refresh_modules()?;

        assert_eq!(tutorial.modules().len(), 4);
        assert_eq!(tutorial.languages()["ko"], vec!["1.0.0", "1.2.0"]);
        Ok(())
    }

    #[test]
    fn test_custom_publish_settings_reach_git() -> Result<()> {
        let (_temp, root) = fixture();
        let shell = RecordingShell::default();
        let options = TutorialOptions {
            tutorial_root: Some(root),
            skip_version_control: false,
            publish: PublishConfig {
                remote: "upstream".into(),
                branch: "gh-pages".into(),
                primary_branch: "main".into(),
                commit_message: "Publish docs".into(),
                ..Default::default()
            },
        };
        let mut tutorial = Tutorial::new(
            options,
            recording_factory(&Log::default(), None),
            Box::new(shell.clone()),
        )?;

        tutorial.publish()?;

        let commands = shell.commands();
        assert_eq!(commands[1], "git commit -am \"Publish docs\"");
        assert_eq!(commands[2], "git pull --rebase upstream gh-pages");
        assert_eq!(commands[4], "git checkout main");
        Ok(())
    }
}
