//! Site generation: per-document pages and the global index.
//!
//! [`SiteGenerator`] consumes the built [`SiteIndex`] through a
//! [`QueryContext`] and writes one HTML file per document plus a top-level
//! `index.html`. Page renders fan out across the rayon pool; every page
//! writes to a distinct path and reads the shared index immutably, so no
//! coordination is needed. A single failed render or write fails the run.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use rayon::prelude::*;
use serde::Serialize;
use serde_json::Value;

use crate::context::QueryContext;
use crate::document::Document;
use crate::index::SiteIndex;
use crate::templates::{TemplateError, Templates};

/// Error type for site generation.
#[derive(Debug, thiserror::Error)]
pub enum GenerateError {
    /// An output file or directory could not be written.
    #[error("failed to write {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Template rendering failed.
    #[error(transparent)]
    Template(#[from] TemplateError),
}

/// Summary of a completed generation run.
#[derive(Clone, Copy, Debug)]
pub struct GenerateSummary {
    /// Number of per-document pages written (excludes `index.html`).
    pub pages_written: usize,
}

/// Render locals for one document page.
///
/// Explicit named fields for every computed value, plus the `extra` mapping
/// carrying unrecognized front-matter keys.
#[derive(Serialize)]
struct PageLocals<'a> {
    id: &'a str,
    section: &'a str,
    body: &'a str,
    html: &'a str,
    implements: &'a [String],
    defines: &'a [String],
    /// Platform ids resolved to full platform documents.
    platforms: Vec<&'a Document>,
    /// Documents whose `implements` list names this document.
    implemented_by: Vec<&'a Document>,
    /// Documents whose `defines` list names this document.
    defined_by: Vec<&'a Document>,
    extra: &'a std::collections::BTreeMap<String, Value>,
    available_platforms: &'a [String],
    available_implemented: &'a [String],
}

/// Render locals for the site index page.
#[derive(Serialize)]
struct IndexLocals<'a> {
    /// Full document collection in load order.
    objects: &'a [Document],
    available_platforms: &'a [String],
    available_implemented: &'a [String],
}

/// Writes the rendered site to an output directory.
pub struct SiteGenerator {
    index: Arc<SiteIndex>,
    context: QueryContext,
    templates: Templates,
    output_dir: PathBuf,
}

impl SiteGenerator {
    /// Create a generator for a built index.
    #[must_use]
    pub fn new(index: Arc<SiteIndex>, templates: Templates, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            context: QueryContext::new(Arc::clone(&index)),
            index,
            templates,
            output_dir: output_dir.into(),
        }
    }

    /// Render and write every document page and the site index.
    ///
    /// # Errors
    ///
    /// Returns the first render or write error; in-flight sibling renders
    /// finish but their results are discarded.
    pub fn generate(&self) -> Result<GenerateSummary, GenerateError> {
        self.index
            .documents()
            .par_iter()
            .try_for_each(|doc| self.generate_page(doc))?;

        self.generate_index()?;

        Ok(GenerateSummary {
            pages_written: self.index.documents().len(),
        })
    }

    /// Render one document page to `<output>/<section>/<id>.html`.
    fn generate_page(&self, doc: &Document) -> Result<(), GenerateError> {
        let locals = PageLocals {
            id: &doc.id,
            section: &doc.section,
            body: &doc.body,
            html: &doc.html,
            implements: &doc.implements,
            defines: &doc.defines,
            platforms: self.context.resolve_all(&doc.platforms),
            implemented_by: self.index.implemented_by(&doc.id),
            defined_by: self.index.defined_by(&doc.id),
            extra: &doc.extra,
            available_platforms: self.index.available_platforms(),
            available_implemented: self.index.available_implemented(),
        };

        let html = self.templates.render_page(&locals)?;
        let path = self.output_dir.join(doc.output_path());
        write_file(&path, &html)
    }

    /// Render the site index to `<output>/index.html`.
    fn generate_index(&self) -> Result<(), GenerateError> {
        let locals = IndexLocals {
            objects: self.index.documents(),
            available_platforms: self.index.available_platforms(),
            available_implemented: self.index.available_implemented(),
        };

        let html = self.templates.render_index(&locals)?;
        write_file(&self.output_dir.join("index.html"), &html)
    }
}

/// Write a file, creating parent directories as needed.
fn write_file(path: &Path, content: &str) -> Result<(), GenerateError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|source| GenerateError::Io {
            path: path.to_path_buf(),
            source,
        })?;
    }
    fs::write(path, content).map_err(|source| GenerateError::Io {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;
    use crate::loader::DocumentLoader;

    fn write_source(dir: &Path, relative: &str, content: &str) {
        let path = dir.join(relative);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    fn generate_site(source: &Path, output: &Path, sections: &[&str]) -> GenerateSummary {
        let sections: Vec<String> = sections.iter().map(|s| (*s).to_owned()).collect();
        let docs = DocumentLoader::new(source).load_sections(&sections).unwrap();
        let index = Arc::new(SiteIndex::build(docs));
        let context = QueryContext::new(Arc::clone(&index));
        let templates = Templates::load(None, &context).unwrap();
        SiteGenerator::new(index, templates, output)
            .generate()
            .unwrap()
    }

    #[test]
    fn test_generate_writes_pages_and_index() {
        let source = tempfile::tempdir().unwrap();
        let output = tempfile::tempdir().unwrap();
        write_source(source.path(), "concepts/a.md", "# A\n");
        write_source(source.path(), "platforms/linux.md", "# Linux\n");

        let summary = generate_site(source.path(), output.path(), &["concepts", "platforms"]);

        assert_eq!(summary.pages_written, 2);
        assert!(output.path().join("concepts/a.html").exists());
        assert!(output.path().join("platforms/linux.html").exists());
        assert!(output.path().join("index.html").exists());
    }

    #[test]
    fn test_generate_cross_references_implemented_by() {
        let source = tempfile::tempdir().unwrap();
        let output = tempfile::tempdir().unwrap();
        write_source(
            source.path(),
            "concepts/a.md",
            "---\nimplements: b\n---\n# A\n",
        );
        write_source(source.path(), "concepts/b.md", "# B\n");

        generate_site(source.path(), output.path(), &["concepts"]);

        // b lists a as an implementer; a's own implemented-by set is empty.
        let page_b = fs::read_to_string(output.path().join("concepts/b.html")).unwrap();
        assert!(page_b.contains("Implemented by"));
        assert!(page_b.contains("/concepts/a.html"));

        let page_a = fs::read_to_string(output.path().join("concepts/a.html")).unwrap();
        assert!(!page_a.contains("Implemented by"));
    }

    #[test]
    fn test_generate_resolves_platform_links() {
        let source = tempfile::tempdir().unwrap();
        let output = tempfile::tempdir().unwrap();
        write_source(
            source.path(),
            "concepts/a.md",
            "---\nplatforms: linux\n---\n# A\n",
        );
        write_source(
            source.path(),
            "platforms/linux.md",
            "---\ntitle: Linux\n---\n# Linux\n",
        );

        generate_site(source.path(), output.path(), &["concepts", "platforms"]);

        let page_a = fs::read_to_string(output.path().join("concepts/a.html")).unwrap();
        assert!(page_a.contains("/platforms/linux.html"));
        assert!(page_a.contains("Linux"));
    }

    #[test]
    fn test_generate_dangling_reference_does_not_crash() {
        let source = tempfile::tempdir().unwrap();
        let output = tempfile::tempdir().unwrap();
        write_source(
            source.path(),
            "concepts/a.md",
            "---\nimplements: ghost\n---\n# A\n",
        );

        generate_site(source.path(), output.path(), &["concepts"]);

        // The dangling id still shows up in the index legend, drawn from
        // declared values rather than resolved documents.
        let index_html = fs::read_to_string(output.path().join("index.html")).unwrap();
        assert!(index_html.contains("ghost"));
        assert!(index_html.contains(crate::context::MISSING_URL));
    }

    #[test]
    fn test_generate_index_lists_all_objects() {
        let source = tempfile::tempdir().unwrap();
        let output = tempfile::tempdir().unwrap();
        write_source(source.path(), "concepts/a.md", "---\ntitle: Alpha\n---\n");
        write_source(source.path(), "concepts/b.md", "");

        generate_site(source.path(), output.path(), &["concepts"]);

        let index_html = fs::read_to_string(output.path().join("index.html")).unwrap();
        assert!(index_html.contains("Alpha"));
        assert!(index_html.contains("/concepts/a.html"));
        assert!(index_html.contains("/concepts/b.html"));
    }

    #[test]
    fn test_generate_is_idempotent() {
        let source = tempfile::tempdir().unwrap();
        write_source(
            source.path(),
            "concepts/a.md",
            "---\nimplements: b\nplatforms: [linux]\n---\n# A\n",
        );
        write_source(source.path(), "concepts/b.md", "# B\n");

        let first = tempfile::tempdir().unwrap();
        let second = tempfile::tempdir().unwrap();
        generate_site(source.path(), first.path(), &["concepts"]);
        generate_site(source.path(), second.path(), &["concepts"]);

        for relative in ["concepts/a.html", "concepts/b.html", "index.html"] {
            let a = fs::read_to_string(first.path().join(relative)).unwrap();
            let b = fs::read_to_string(second.path().join(relative)).unwrap();
            assert_eq!(a, b, "output differs for {relative}");
        }
    }

    #[test]
    fn test_generate_html_body_is_not_escaped() {
        let source = tempfile::tempdir().unwrap();
        let output = tempfile::tempdir().unwrap();
        write_source(source.path(), "concepts/a.md", "**bold**\n");

        generate_site(source.path(), output.path(), &["concepts"]);

        let page = fs::read_to_string(output.path().join("concepts/a.html")).unwrap();
        assert!(page.contains("<strong>bold</strong>"));
    }
}
