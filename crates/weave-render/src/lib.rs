//! Markdown to HTML conversion for Weave.
//!
//! Provides [`MarkdownRenderer`], a thin wrapper over `pulldown-cmark` that
//! converts markdown source into an HTML fragment. Conversion is a pure
//! function of the input text: no filesystem access, no link rewriting.
//!
//! # Example
//!
//! ```
//! use weave_render::MarkdownRenderer;
//!
//! let renderer = MarkdownRenderer::new();
//! let html = renderer.render("# Hello\n\n**Bold** text");
//! assert!(html.contains("<h1>Hello</h1>"));
//! ```

use pulldown_cmark::{Options, Parser, html};

/// Markdown to HTML renderer.
///
/// GitHub Flavored Markdown extensions (tables, strikethrough, task lists)
/// are enabled by default and can be disabled with [`with_gfm`](Self::with_gfm).
#[derive(Clone, Debug)]
pub struct MarkdownRenderer {
    gfm: bool,
}

impl MarkdownRenderer {
    /// Create a new renderer with GFM enabled.
    #[must_use]
    pub fn new() -> Self {
        Self { gfm: true }
    }

    /// Enable or disable GitHub Flavored Markdown features.
    #[must_use]
    pub fn with_gfm(mut self, enabled: bool) -> Self {
        self.gfm = enabled;
        self
    }

    /// Get parser options based on GFM configuration.
    #[must_use]
    pub fn parser_options(&self) -> Options {
        if self.gfm {
            Options::ENABLE_TABLES | Options::ENABLE_STRIKETHROUGH | Options::ENABLE_TASKLISTS
        } else {
            Options::empty()
        }
    }

    /// Render markdown text to an HTML fragment.
    #[must_use]
    pub fn render(&self, markdown: &str) -> String {
        let parser = Parser::new_ext(markdown, self.parser_options());
        let mut output = String::with_capacity(markdown.len() * 2);
        html::push_html(&mut output, parser);
        output
    }
}

impl Default for MarkdownRenderer {
    fn default() -> Self {
        Self::new()
    }
}
