//! Relationship indexing over the document collection.
//!
//! [`SiteIndex`] is built once from the full document list and never mutated
//! afterwards: the render phase shares it read-only across threads.
//!
//! Two inverse indices are derived from the one-directional front-matter
//! references: for every id a document lists under `implements` (resp.
//! `defines`), the document is appended to that id's bucket. Bucket order is
//! document load order. Ids that are referenced but never defined by a
//! document get no placeholder entry.

use std::collections::{BTreeSet, HashMap};

use crate::document::Document;

/// Immutable relationship indices over a document collection.
///
/// Deterministic for a fixed input order: buckets preserve load order and the
/// derived value sets are sorted.
pub struct SiteIndex {
    documents: Vec<Document>,
    by_id: HashMap<String, usize>,
    implemented_by: HashMap<String, Vec<usize>>,
    defined_by: HashMap<String, Vec<usize>>,
    available_platforms: Vec<String>,
    available_implemented: Vec<String>,
}

impl SiteIndex {
    /// Build indices from the full document collection.
    ///
    /// Duplicate ids keep the last-loaded document and emit a warning naming
    /// both source files.
    #[must_use]
    pub fn build(documents: Vec<Document>) -> Self {
        let mut by_id: HashMap<String, usize> = HashMap::with_capacity(documents.len());
        let mut implemented_by: HashMap<String, Vec<usize>> = HashMap::new();
        let mut defined_by: HashMap<String, Vec<usize>> = HashMap::new();
        let mut platforms = BTreeSet::new();
        let mut implemented = BTreeSet::new();

        for (position, doc) in documents.iter().enumerate() {
            if let Some(&previous) = by_id.get(&doc.id) {
                tracing::warn!(
                    id = %doc.id,
                    kept = %doc.path.display(),
                    shadowed = %documents[previous].path.display(),
                    "duplicate document id, last one wins"
                );
            }
            by_id.insert(doc.id.clone(), position);

            for target in &doc.implements {
                implemented_by
                    .entry(target.clone())
                    .or_default()
                    .push(position);
            }
            for target in &doc.defines {
                defined_by.entry(target.clone()).or_default().push(position);
            }

            platforms.extend(doc.platforms.iter().cloned());
            implemented.extend(doc.implements.iter().cloned());
        }

        Self {
            documents,
            by_id,
            implemented_by,
            defined_by,
            available_platforms: platforms.into_iter().collect(),
            available_implemented: implemented.into_iter().collect(),
        }
    }

    /// All documents in load order.
    #[must_use]
    pub fn documents(&self) -> &[Document] {
        &self.documents
    }

    /// Look up a document by id.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&Document> {
        self.by_id.get(id).map(|&position| &self.documents[position])
    }

    /// Documents whose `implements` list names `id`, in load order.
    #[must_use]
    pub fn implemented_by(&self, id: &str) -> Vec<&Document> {
        self.bucket(&self.implemented_by, id)
    }

    /// Documents whose `defines` list names `id`, in load order.
    #[must_use]
    pub fn defined_by(&self, id: &str) -> Vec<&Document> {
        self.bucket(&self.defined_by, id)
    }

    /// Sorted, deduplicated union of all declared platform ids.
    #[must_use]
    pub fn available_platforms(&self) -> &[String] {
        &self.available_platforms
    }

    /// Sorted, deduplicated union of all declared `implements` ids.
    ///
    /// Drawn from declared values, so dangling references appear here even
    /// though they resolve to no document.
    #[must_use]
    pub fn available_implemented(&self) -> &[String] {
        &self.available_implemented
    }

    fn bucket(&self, index: &HashMap<String, Vec<usize>>, id: &str) -> Vec<&Document> {
        index
            .get(id)
            .map(|positions| positions.iter().map(|&p| &self.documents[p]).collect())
            .unwrap_or_default()
    }
}
