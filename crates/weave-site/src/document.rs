//! Document model and front-matter field normalization.
//!
//! A [`Document`] is the parsed, normalized representation of one source
//! file. The three relationship fields (`platforms`, `defines`,
//! `implements`) are coerced to list-of-string form at construction time, so
//! downstream indexing and rendering can assume list shape unconditionally.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde_json::Value;

use crate::frontmatter::FrontMatter;

/// One source file's parsed, normalized representation.
#[derive(Clone, Debug, Serialize)]
pub struct Document {
    /// Identifier derived from the file name with all extensions stripped.
    pub id: String,
    /// Logical grouping derived from the containing directory.
    pub section: String,
    /// Source file path, kept for diagnostics.
    pub path: PathBuf,
    /// Markdown source with front matter stripped.
    pub body: String,
    /// HTML rendered from `body`.
    pub html: String,
    /// Platform ids this document applies to. Always a list.
    pub platforms: Vec<String>,
    /// Ids of concepts this document defines. Always a list.
    pub defines: Vec<String>,
    /// Ids of concepts this document implements. Always a list.
    pub implements: Vec<String>,
    /// Front-matter keys not covered by the typed fields above.
    pub extra: BTreeMap<String, Value>,
}

impl Document {
    /// Build a document from parsed front matter and rendered HTML.
    ///
    /// The relationship fields are removed from the front-matter mapping and
    /// normalized; every other key is carried through in `extra`.
    #[must_use]
    pub fn new(path: PathBuf, section: String, mut front: FrontMatter, html: String) -> Self {
        let id = id_from_path(&path);
        let platforms = string_list(front.metadata.remove("platforms"));
        let defines = string_list(front.metadata.remove("defines"));
        let implements = string_list(front.metadata.remove("implements"));

        Self {
            id,
            section,
            path,
            body: front.body,
            html,
            platforms,
            defines,
            implements,
            extra: front.metadata,
        }
    }

    /// The canonical output path for this document, relative to the output
    /// root: `<section>/<id>.html`.
    #[must_use]
    pub fn output_path(&self) -> PathBuf {
        Path::new(&self.section).join(format!("{}.html", self.id))
    }
}

/// Derive a document id from a file path.
///
/// Uses the base name with all extensions stripped: `queue.md` and
/// `queue.notes.md` both yield `queue`.
#[must_use]
pub fn id_from_path(path: &Path) -> String {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy())
        .unwrap_or_default();
    match name.split_once('.') {
        Some((stem, _)) => stem.to_owned(),
        None => name.into_owned(),
    }
}

/// Coerce a front-matter value to list-of-string form.
///
/// - absent, `null` or empty string → empty list
/// - any other scalar → single-element list
/// - list → unchanged, element for element (empty strings included)
///
/// The empty-string rule applies to the bare-scalar case only; list inputs
/// are identity-preserving. Nested lists and mappings have no string form
/// and are dropped.
#[must_use]
pub fn string_list(value: Option<Value>) -> Vec<String> {
    match value {
        None | Some(Value::Null) => Vec::new(),
        Some(Value::String(s)) if s.is_empty() => Vec::new(),
        Some(Value::Array(items)) => items.iter().filter_map(scalar_to_string).collect(),
        Some(ref scalar) => scalar_to_string(scalar).into_iter().collect(),
    }
}

/// Render a scalar value as a string, preserving string values unchanged.
fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}
