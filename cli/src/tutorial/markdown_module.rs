//! # Markdown Tutorial Module
//!
//! File: cli/src/tutorial/markdown_module.rs
//!
//! ## Overview
//!
//! The [`ModuleSet`] implementation used by the `tutor` binary. A module is a
//! `<language>/<version>` directory laid out as:
//!
//! ```text
//! en/1.0.0/
//! ├── source/              <- chapters (*.md) and code samples
//! │   ├── 01_setup.md
//! │   └── code/hello.rb
//! └── gen/                 <- generated, safe to delete
//!     ├── markdown/        <- chapters with includes expanded
//!     └── html/            <- one page per chapter + index.html
//! ```
//!
//! Publishing regenerates `gen/html/` and copies it to
//! `<output>/<language>/<version>/`.
//!
//! A chapter named `index.md` takes the place of the generated table of
//! contents.
//!
use super::chapter::{self, Chapter};
use super::module_set::{ModuleSet, ModuleSetArgs};
use crate::common::fs::{copy, io};
use crate::core::error::Result;
use crate::core::templating::{ChapterLink, ChapterPage, IndexPage, PageRenderer};
use std::path::{Path, PathBuf};
use std::rc::Rc;
use tracing::{debug, info};

const SOURCE_DIR: &str = "source";
const GEN_DIR: &str = "gen";
const INDEX_STEM: &str = "index";

pub struct MarkdownModule {
    name: String,
    language: String,
    version: String,
    module_root: PathBuf,
    renderer: Rc<PageRenderer>,
}

impl MarkdownModule {
    pub fn new(args: &ModuleSetArgs, renderer: Rc<PageRenderer>) -> Self {
        Self {
            name: format!("{}/{}", args.language, args.version),
            language: args.language.clone(),
            version: args.version.clone(),
            module_root: args.module_root.clone(),
            renderer,
        }
    }

    fn source_dir(&self) -> PathBuf {
        self.module_root.join(SOURCE_DIR)
    }

    fn gen_dir(&self) -> PathBuf {
        self.module_root.join(GEN_DIR)
    }

    fn html_dir(&self) -> PathBuf {
        self.gen_dir().join("html")
    }

    fn markdown_dir(&self) -> PathBuf {
        self.gen_dir().join("markdown")
    }

    fn chapters(&self) -> Result<Vec<Chapter>> {
        chapter::load_chapters(&self.source_dir())
    }
}

impl ModuleSet for MarkdownModule {
    fn name(&self) -> &str {
        &self.name
    }

    fn generate_html(&self) -> Result<()> {
        let chapters = self.chapters()?;
        let html_dir = self.html_dir();
        // Start clean so renamed or deleted chapters leave nothing behind.
        io::remove_dir_if_exists(&html_dir)?;
        io::ensure_dir_exists(&html_dir)?;

        let links: Vec<ChapterLink> = chapters
            .iter()
            .map(|c| ChapterLink {
                title: c.title.clone(),
                href: format!("{}.html", c.stem),
            })
            .collect();

        for (i, chapter) in chapters.iter().enumerate() {
            let content = chapter.to_html();
            let page = ChapterPage {
                language: &self.language,
                version: &self.version,
                title: &chapter.title,
                content: &content,
                previous: i.checked_sub(1).and_then(|p| links.get(p)),
                next: links.get(i + 1),
            };
            let html = self.renderer.render_chapter(&page)?;
            io::write_string_to_file(&html_dir.join(&links[i].href), &html)?;
        }

        if chapters.iter().any(|c| c.stem == INDEX_STEM) {
            debug!("{}: index.md provided, skipping generated index", self.name);
        } else {
            let index = self.renderer.render_index(&IndexPage {
                language: &self.language,
                version: &self.version,
                chapters: &links,
            })?;
            io::write_string_to_file(&html_dir.join("index.html"), &index)?;
        }

        info!(
            "{}: generated {} HTML chapter(s) in {}",
            self.name,
            chapters.len(),
            html_dir.display()
        );
        Ok(())
    }

    fn generate_markdown(&self) -> Result<()> {
        let chapters = self.chapters()?;
        let markdown_dir = self.markdown_dir();
        io::remove_dir_if_exists(&markdown_dir)?;
        io::ensure_dir_exists(&markdown_dir)?;

        for chapter in &chapters {
            io::write_string_to_file(&markdown_dir.join(&chapter.file_name), &chapter.markdown)?;
        }

        info!(
            "{}: generated {} Markdown chapter(s) in {}",
            self.name,
            chapters.len(),
            markdown_dir.display()
        );
        Ok(())
    }

    fn delete_generated(&self) -> Result<()> {
        io::remove_dir_if_exists(&self.gen_dir())
    }

    fn list_contents(&self) -> Result<Vec<String>> {
        let chapters = self.chapters()?;
        if chapters.is_empty() {
            return Ok(vec!["  (no chapters)".to_string()]);
        }
        Ok(chapters
            .iter()
            .map(|c| format!("  {} - {}", c.file_name, c.title))
            .collect())
    }

    fn publish(&self, output_root: &Path) -> Result<()> {
        self.generate_html()?;
        let target = output_root.join(&self.language).join(&self.version);
        copy::copy_directory_contents(&self.html_dir(), &target)?;
        info!("{}: published to {}", self.name, target.display());
        Ok(())
    }
}
