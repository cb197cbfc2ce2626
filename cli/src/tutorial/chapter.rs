//! # Tutorial Chapters
//!
//! File: cli/src/tutorial/chapter.rs
//!
//! ## Overview
//!
//! A chapter is one Markdown file directly inside a module's `source/`
//! directory. Loading a chapter reads the file, expands its code-sample
//! includes and works out its title. Chapters are ordered by file name, so
//! authors number them (`01_setup.md`, `02_find_elements.md`, ...).
//!
//! ## Code-sample includes
//!
//! A line of the form
//!
//! ```text
//! ::include code/find_elements.rb
//! ```
//!
//! is replaced by a fenced code block holding `source/code/find_elements.rb`,
//! tagged with the file extension (`rb`). Include paths are relative to
//! `source/` and may not leave it.
//!
use crate::common::fs::io;
use crate::core::error::{Result, TutorError};
use anyhow::{anyhow, Context};
use pulldown_cmark::{html, Event, HeadingLevel, Options, Parser, Tag, TagEnd};
use std::ops::Range;
use std::path::{Component, Path};
use tracing::debug;
use walkdir::WalkDir;

const INCLUDE_DIRECTIVE: &str = "::include ";

/// One loaded chapter with its includes already expanded.
#[derive(Debug, Clone, PartialEq)]
pub struct Chapter {
    /// File name inside `source/`, e.g. `01_setup.md`.
    pub file_name: String,
    /// File name without the extension, used for the generated page name.
    pub stem: String,
    pub title: String,
    pub markdown: String,
}

impl Chapter {
    /// Converts the chapter body to an HTML fragment.
    pub fn to_html(&self) -> String {
        let mut options = Options::empty();
        options.insert(Options::ENABLE_TABLES);
        options.insert(Options::ENABLE_FOOTNOTES);
        options.insert(Options::ENABLE_STRIKETHROUGH);

        let parser = Parser::new_ext(&self.markdown, options);
        let mut out = String::with_capacity(self.markdown.len() * 3 / 2);
        html::push_html(&mut out, parser);
        out
    }
}

/// Loads every `*.md` file directly inside `source_dir`, sorted by file name.
/// A missing `source_dir` yields no chapters.
pub fn load_chapters(source_dir: &Path) -> Result<Vec<Chapter>> {
    if !source_dir.is_dir() {
        debug!("No source directory at {}", source_dir.display());
        return Ok(Vec::new());
    }

    let mut chapters = Vec::new();
    let walker = WalkDir::new(source_dir)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name();
    for entry in walker {
        let entry = entry
            .with_context(|| format!("Failed to list chapters in {}", source_dir.display()))?;
        let path = entry.path();
        let is_markdown = path.extension().is_some_and(|ext| ext == "md");
        if !entry.file_type().is_file() || !is_markdown {
            continue;
        }
        chapters.push(load_chapter(source_dir, path)?);
    }
    Ok(chapters)
}

fn load_chapter(source_dir: &Path, path: &Path) -> Result<Chapter> {
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| file_name.clone());

    let raw = io::read_file_to_string(path)?;
    let markdown = expand_includes(&raw, source_dir)
        .with_context(|| format!("Failed to expand includes in chapter '{}'", file_name))?;
    let title = extract_title(&markdown).unwrap_or_else(|| stem.clone());

    debug!("Loaded chapter '{}' ({})", file_name, title);
    Ok(Chapter {
        file_name,
        stem,
        title,
        markdown,
    })
}

/// Replaces every `::include <path>` line with a fenced code block. Lines
/// inside code blocks are left alone, so chapters can show the directive.
pub fn expand_includes(markdown: &str, source_dir: &Path) -> Result<String> {
    let code_blocks: Vec<Range<usize>> = Parser::new(markdown)
        .into_offset_iter()
        .filter_map(|(event, range)| match event {
            Event::Start(Tag::CodeBlock(_)) => Some(range),
            _ => None,
        })
        .collect();

    let mut out = String::with_capacity(markdown.len());
    let mut offset = 0;
    for raw in markdown.split_inclusive('\n') {
        let start = offset;
        offset += raw.len();
        let line = raw.strip_suffix('\n').unwrap_or(raw);
        let line = line.strip_suffix('\r').unwrap_or(line);

        let in_code = code_blocks.iter().any(|block| block.contains(&start));
        match line.trim_end().strip_prefix(INCLUDE_DIRECTIVE) {
            Some(target) if !in_code => out.push_str(&include_block(target.trim(), source_dir)?),
            _ => out.push_str(line),
        }
        out.push('\n');
    }
    Ok(out)
}

fn include_block(target: &str, source_dir: &Path) -> Result<String> {
    let relative = Path::new(target);
    let stays_inside = !target.is_empty()
        && relative
            .components()
            .all(|c| matches!(c, Component::Normal(_) | Component::CurDir));
    if !stays_inside {
        return Err(anyhow!(TutorError::FileSystem(format!(
            "Include path '{}' must be relative to the source directory",
            target
        ))));
    }

    let code = io::read_file_to_string(&source_dir.join(relative))
        .with_context(|| format!("Included file '{}' could not be read", target))?;
    let language = relative
        .extension()
        .map(|e| e.to_string_lossy().into_owned())
        .unwrap_or_default();

    // The fence must be longer than any backtick run inside the sample.
    let longest_run = code
        .split(|c| c != '`')
        .map(str::len)
        .max()
        .unwrap_or(0);
    let fence = "`".repeat(longest_run.max(2) + 1);

    Ok(format!(
        "{fence}{language}\n{}\n{fence}",
        code.trim_end_matches('\n')
    ))
}

/// Text of the first level-one heading, if any.
pub fn extract_title(markdown: &str) -> Option<String> {
    let mut in_title = false;
    let mut title = String::new();
    for event in Parser::new(markdown) {
        match event {
            Event::Start(Tag::Heading {
                level: HeadingLevel::H1,
                ..
            }) => in_title = true,
            Event::End(TagEnd::Heading(HeadingLevel::H1)) if in_title => {
                let title = title.trim().to_string();
                return (!title.is_empty()).then_some(title);
            }
            Event::Text(text) | Event::Code(text) if in_title => title.push_str(&text),
            _ => {}
        }
    }
    None
}
