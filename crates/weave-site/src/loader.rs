//! Document discovery and loading.
//!
//! [`DocumentLoader`] expands glob patterns under a source root, then reads
//! and parses every matched file into a [`Document`]. File loads fan out
//! across the rayon thread pool and join before returning; a single failed
//! read or parse fails the whole batch.
//!
//! Match order is deterministic: patterns are expanded in the given order and
//! the `glob` crate yields paths sorted within each pattern, so repeated runs
//! over unchanged input produce the same document order.

use std::fs;
use std::path::{Path, PathBuf};

use rayon::prelude::*;

use weave_render::MarkdownRenderer;

use crate::document::Document;
use crate::frontmatter::{self, FrontMatterError};

/// Error type for document loading.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    /// A glob pattern failed to compile.
    #[error("invalid glob pattern '{pattern}': {source}")]
    Pattern {
        pattern: String,
        source: glob::PatternError,
    },

    /// Directory traversal failed while expanding a pattern.
    #[error("failed to expand glob pattern: {0}")]
    Glob(#[from] glob::GlobError),

    /// A matched file could not be read.
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// A matched file has malformed front matter.
    #[error("invalid front matter in {path}: {source}")]
    FrontMatter {
        path: PathBuf,
        source: FrontMatterError,
    },
}

/// Loads documents from a source directory.
pub struct DocumentLoader {
    source_dir: PathBuf,
    renderer: MarkdownRenderer,
}

impl DocumentLoader {
    /// Create a loader rooted at `source_dir`.
    #[must_use]
    pub fn new(source_dir: impl Into<PathBuf>) -> Self {
        Self {
            source_dir: source_dir.into(),
            renderer: MarkdownRenderer::new(),
        }
    }

    /// Enable or disable GitHub Flavored Markdown in page bodies.
    #[must_use]
    pub fn with_gfm(mut self, enabled: bool) -> Self {
        self.renderer = self.renderer.with_gfm(enabled);
        self
    }

    /// Load all documents for the given sections.
    ///
    /// Each section maps to the pattern `<source>/<section>/**/*.md`.
    ///
    /// # Errors
    ///
    /// Returns an error if any pattern is invalid or any file fails to read
    /// or parse. Failures are fatal for the whole batch.
    pub fn load_sections(&self, sections: &[String]) -> Result<Vec<Document>, LoadError> {
        let patterns: Vec<String> = sections
            .iter()
            .map(|section| {
                self.source_dir
                    .join(section)
                    .join("**")
                    .join("*.md")
                    .to_string_lossy()
                    .into_owned()
            })
            .collect();
        self.load_patterns(&patterns)
    }

    /// Load all documents matching the given glob patterns.
    ///
    /// # Errors
    ///
    /// Returns an error if any pattern is invalid or any file fails to read
    /// or parse.
    pub fn load_patterns(&self, patterns: &[String]) -> Result<Vec<Document>, LoadError> {
        let mut paths = Vec::new();
        for pattern in patterns {
            let matches = glob::glob(pattern).map_err(|source| LoadError::Pattern {
                pattern: pattern.clone(),
                source,
            })?;
            for entry in matches {
                paths.push(entry?);
            }
        }

        tracing::debug!(files = paths.len(), "discovered source files");

        // Fan out file loads; collect joins and fails fast on the first error.
        paths
            .into_par_iter()
            .map(|path| self.load_file(&path))
            .collect()
    }

    /// Load a single source file into a document.
    fn load_file(&self, path: &Path) -> Result<Document, LoadError> {
        let content = fs::read_to_string(path).map_err(|source| LoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let front = frontmatter::split(&content).map_err(|source| LoadError::FrontMatter {
            path: path.to_path_buf(),
            source,
        })?;

        let html = self.renderer.render(&front.body);
        let section = self.section_for(path);

        Ok(Document::new(path.to_path_buf(), section, front, html))
    }

    /// Derive the section from a file's parent directory, relative to the
    /// source root.
    fn section_for(&self, path: &Path) -> String {
        let parent = path.parent().unwrap_or(Path::new(""));
        let relative = parent.strip_prefix(&self.source_dir).unwrap_or(parent);
        relative
            .components()
            .map(|c| c.as_os_str().to_string_lossy())
            .collect::<Vec<_>>()
            .join("/")
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;

    fn write_file(dir: &Path, relative: &str, content: &str) {
        let path = dir.join(relative);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    fn sections(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| (*s).to_owned()).collect()
    }

    #[test]
    fn test_load_sections_basic() {
        let dir = tempfile::tempdir().unwrap();
        write_file(
            dir.path(),
            "concepts/queue.md",
            "---\ntitle: Queue\n---\n# Queue\n",
        );
        write_file(dir.path(), "platforms/linux.md", "# Linux\n");

        let loader = DocumentLoader::new(dir.path());
        let docs = loader
            .load_sections(&sections(&["concepts", "platforms"]))
            .unwrap();

        assert_eq!(docs.len(), 2);
        assert_eq!(docs[0].id, "queue");
        assert_eq!(docs[0].section, "concepts");
        assert!(docs[0].html.contains("<h1>Queue</h1>"));
        assert_eq!(docs[1].id, "linux");
        assert_eq!(docs[1].section, "platforms");
    }

    #[test]
    fn test_load_sections_order_is_deterministic() {
        let dir = tempfile::tempdir().unwrap();
        write_file(dir.path(), "concepts/b.md", "b");
        write_file(dir.path(), "concepts/a.md", "a");
        write_file(dir.path(), "concepts/c.md", "c");

        let loader = DocumentLoader::new(dir.path());
        let docs = loader.load_sections(&sections(&["concepts"])).unwrap();
        let ids: Vec<_> = docs.iter().map(|d| d.id.as_str()).collect();
        assert_eq!(ids, ["a", "b", "c"]);
    }

    #[test]
    fn test_load_sections_nested_directories() {
        let dir = tempfile::tempdir().unwrap();
        write_file(dir.path(), "concepts/storage/wal.md", "# WAL\n");

        let loader = DocumentLoader::new(dir.path());
        let docs = loader.load_sections(&sections(&["concepts"])).unwrap();

        assert_eq!(docs.len(), 1);
        assert_eq!(docs[0].section, "concepts/storage");
    }

    #[test]
    fn test_load_sections_missing_section_yields_no_documents() {
        let dir = tempfile::tempdir().unwrap();
        let loader = DocumentLoader::new(dir.path());
        let docs = loader.load_sections(&sections(&["concepts"])).unwrap();
        assert!(docs.is_empty());
    }

    #[test]
    fn test_load_malformed_front_matter_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        write_file(dir.path(), "concepts/good.md", "fine");
        write_file(dir.path(), "concepts/bad.md", "---\ntitle: [broken\n---\n");

        let loader = DocumentLoader::new(dir.path());
        let result = loader.load_sections(&sections(&["concepts"]));
        assert!(matches!(result, Err(LoadError::FrontMatter { .. })));
    }

    #[test]
    fn test_load_with_gfm_disabled() {
        let dir = tempfile::tempdir().unwrap();
        write_file(
            dir.path(),
            "concepts/a.md",
            "| a | b |\n|---|---|\n| 1 | 2 |\n",
        );

        let loader = DocumentLoader::new(dir.path()).with_gfm(false);
        let docs = loader.load_sections(&sections(&["concepts"])).unwrap();
        assert!(!docs[0].html.contains("<table>"));
    }

    #[test]
    fn test_load_normalizes_relationships() {
        let dir = tempfile::tempdir().unwrap();
        write_file(
            dir.path(),
            "concepts/a.md",
            "---\nimplements: b\nplatforms:\n  - linux\n---\nbody",
        );

        let loader = DocumentLoader::new(dir.path());
        let docs = loader.load_sections(&sections(&["concepts"])).unwrap();

        assert_eq!(docs[0].implements, vec!["b"]);
        assert_eq!(docs[0].platforms, vec!["linux"]);
        assert!(docs[0].defines.is_empty());
    }
}
