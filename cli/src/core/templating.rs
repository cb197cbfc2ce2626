//! # Tutor Page Templates
//!
//! File: cli/src/core/templating.rs
//!
//! ## Overview
//!
//! Generated HTML chapters are plain fragments produced by the Markdown
//! converter. This module wraps each fragment in a complete page (head, shared
//! stylesheet link, chapter navigation, footer) using the Tera templating
//! engine, and renders the per-module `index.html` that links every chapter.
//!
//! ## Architecture
//!
//! - `PageRenderer` owns a `Tera` instance with two built-in templates,
//!   `chapter.html` and `index.html`, registered once at construction.
//! - `ChapterPage` / `IndexPage` are the serializable contexts handed to Tera.
//!   Chapter HTML is inserted with the `safe` filter since it is already HTML;
//!   every other value is escaped by Tera's autoescape.
//! - Pages depend only on their inputs, so regenerating an unchanged module
//!   gives byte-identical files.
//! - Stylesheets are referenced relative to the page. Published modules live at
//!   `<output>/<language>/<version>/`, so `../../css/` reaches the shared assets.
//!
//! ## Examples
//!
//! ```rust
//! let renderer = PageRenderer::new("Appium Tutorial")?;
//! let html = renderer.render_chapter(&page)?;
//! ```
//!
use crate::core::error::{Result, TutorError};
use anyhow::anyhow;
use serde::Serialize;
use tera::Tera;
use tracing::debug;

const CHAPTER_TEMPLATE: &str = r#"<!DOCTYPE html>
<html lang="{{ language }}">
<head>
  <meta charset="utf-8">
  <title>{{ title }} - {{ site_title }}</title>
  <link rel="stylesheet" href="{{ css_path | safe }}/style.css">
</head>
<body>
  <header><a href="index.html">{{ site_title }}</a> <span class="module">{{ language }} {{ version }}</span></header>
  <main>
{{ content | safe }}
  </main>
  <nav class="chapters">
{%- if previous %}
    <a class="previous" href="{{ previous.href }}">{{ previous.title }}</a>
{%- endif %}
{%- if next %}
    <a class="next" href="{{ next.href }}">{{ next.title }}</a>
{%- endif %}
  </nav>
  <footer>{{ site_title }}</footer>
</body>
</html>
"#;

const INDEX_TEMPLATE: &str = r#"<!DOCTYPE html>
<html lang="{{ language }}">
<head>
  <meta charset="utf-8">
  <title>{{ site_title }} ({{ language }} {{ version }})</title>
  <link rel="stylesheet" href="{{ css_path | safe }}/style.css">
</head>
<body>
  <header>{{ site_title }} <span class="module">{{ language }} {{ version }}</span></header>
  <main>
    <ol class="toc">
{%- for chapter in chapters %}
      <li><a href="{{ chapter.href }}">{{ chapter.title }}</a></li>
{%- endfor %}
    </ol>
  </main>
  <footer>{{ site_title }}</footer>
</body>
</html>
"#;

/// Relative path from a published module page to the shared assets.
pub const MODULE_CSS_PATH: &str = "../../css";

/// A link to one chapter page.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct ChapterLink {
    pub title: String,
    pub href: String,
}

/// Context for a single chapter page.
#[derive(Serialize, Debug, Clone)]
pub struct ChapterPage<'a> {
    pub language: &'a str,
    pub version: &'a str,
    pub title: &'a str,
    /// Chapter body, already converted to HTML.
    pub content: &'a str,
    pub previous: Option<&'a ChapterLink>,
    pub next: Option<&'a ChapterLink>,
}

/// Context for a module's `index.html`.
#[derive(Serialize, Debug, Clone)]
pub struct IndexPage<'a> {
    pub language: &'a str,
    pub version: &'a str,
    pub chapters: &'a [ChapterLink],
}

/// Renders chapter and index pages for one tutorial site.
pub struct PageRenderer {
    tera: Tera,
    site_title: String,
}

impl PageRenderer {
    /// Builds a renderer with the built-in page templates.
    pub fn new(site_title: &str) -> Result<Self> {
        let mut tera = Tera::default();
        tera.add_raw_templates(vec![
            ("chapter.html", CHAPTER_TEMPLATE),
            ("index.html", INDEX_TEMPLATE),
        ])
        .map_err(|e| {
            anyhow!(TutorError::Template { source: e }).context("Failed to load page templates")
        })?;
        Ok(Self {
            tera,
            site_title: site_title.to_string(),
        })
    }

    pub fn render_chapter(&self, page: &ChapterPage<'_>) -> Result<String> {
        debug!("Rendering chapter page '{}'", page.title);
        self.render("chapter.html", page)
    }

    pub fn render_index(&self, page: &IndexPage<'_>) -> Result<String> {
        debug!(
            "Rendering index page for {} {} ({} chapters)",
            page.language,
            page.version,
            page.chapters.len()
        );
        self.render("index.html", page)
    }

    fn render<T: Serialize>(&self, template: &str, page: &T) -> Result<String> {
        let mut context = tera::Context::from_serialize(page).map_err(|e| {
            anyhow!(TutorError::Template { source: e })
                .context(format!("Failed to build context for '{}'", template))
        })?;
        context.insert("site_title", &self.site_title);
        context.insert("css_path", MODULE_CSS_PATH);
        self.tera.render(template, &context).map_err(|e| {
            anyhow!(TutorError::Template { source: e })
                .context(format!("Tera rendering failed for '{}'", template))
        })
    }
}
