//! Document model, relationship indexing and site generation for Weave.
//!
//! This crate provides the core pipeline:
//!
//! - [`DocumentLoader`]: glob discovery plus parallel read/parse of markdown
//!   sources with YAML front matter into [`Document`] records
//! - [`SiteIndex`]: forward and reverse relationship indices built once from
//!   the full collection, immutable afterwards
//! - [`QueryContext`]: total lookup operations (`resolve`, `resolve_all`,
//!   `url_for`) shared with the template layer
//! - [`SiteGenerator`]: parallel page rendering plus the global index page
//!
//! # Quick Start
//!
//! ```no_run
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use std::sync::Arc;
//! use weave_site::{DocumentLoader, QueryContext, SiteGenerator, SiteIndex, Templates};
//!
//! let docs = DocumentLoader::new("docs")
//!     .load_sections(&["concepts".to_owned(), "platforms".to_owned()])?;
//! let index = Arc::new(SiteIndex::build(docs));
//! let context = QueryContext::new(Arc::clone(&index));
//! let templates = Templates::load(None, &context)?;
//! let summary = SiteGenerator::new(index, templates, "dist").generate()?;
//! # Ok(())
//! # }
//! ```

mod context;
mod document;
mod frontmatter;
mod generator;
mod index;
mod loader;
mod templates;

pub use context::{MISSING_URL, QueryContext};
pub use document::{Document, id_from_path, string_list};
pub use frontmatter::{FrontMatter, FrontMatterError, split as split_front_matter};
pub use generator::{GenerateError, GenerateSummary, SiteGenerator};
pub use index::SiteIndex;
pub use loader::{DocumentLoader, LoadError};
pub use templates::{INDEX_TEMPLATE, PAGE_TEMPLATE, TemplateError, Templates};
