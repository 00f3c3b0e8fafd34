//! Read-only query facade handed to the render layer.
//!
//! [`QueryContext`] bundles the shared [`SiteIndex`] behind three total
//! operations. Templates may call these speculatively for dangling
//! references, so none of them can fail: unresolvable ids produce a warning
//! and an absent value (or the [`MISSING_URL`] sentinel).

use std::sync::Arc;

use crate::document::Document;
use crate::index::SiteIndex;

/// Sentinel returned by [`QueryContext::url_for`] for unresolvable ids.
/// Non-navigable on purpose.
pub const MISSING_URL: &str = "#missing";

/// Read-only lookup facade over the site index.
///
/// Cheap to clone; render workers share the underlying index.
#[derive(Clone)]
pub struct QueryContext {
    index: Arc<SiteIndex>,
}

impl QueryContext {
    /// Wrap a built index.
    #[must_use]
    pub fn new(index: Arc<SiteIndex>) -> Self {
        Self { index }
    }

    /// The underlying index.
    #[must_use]
    pub fn index(&self) -> &SiteIndex {
        &self.index
    }

    /// Resolve an id to its document.
    ///
    /// Unknown ids warn and return `None`; the build continues.
    #[must_use]
    pub fn resolve(&self, id: &str) -> Option<&Document> {
        let doc = self.index.get(id);
        if doc.is_none() {
            tracing::warn!(id = %id, "missing id");
        }
        doc
    }

    /// Resolve a list of ids, dropping those with no document.
    ///
    /// Order-preserving; each unresolvable id warns once.
    #[must_use]
    pub fn resolve_all<I, S>(&self, ids: I) -> Vec<&Document>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        ids.into_iter()
            .filter_map(|id| self.resolve(id.as_ref()))
            .collect()
    }

    /// Canonical site URL for an id: `/<section>/<id>.html`.
    ///
    /// Unresolvable ids get the [`MISSING_URL`] sentinel, never an error.
    #[must_use]
    pub fn url_for(&self, id: &str) -> String {
        match self.index.get(id) {
            Some(doc) => format!("/{}/{}.html", doc.section, doc.id),
            None => MISSING_URL.to_owned(),
        }
    }
}
