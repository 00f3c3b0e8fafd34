//! Template environment for page and index rendering.
//!
//! Wraps a `minijinja` environment holding the two site templates, `page`
//! and `index`. Custom templates are loaded from a templates directory when
//! present; embedded defaults are used otherwise, so a site builds without
//! any template files at all.
//!
//! The query-context operations are registered as template functions
//! (`url_for`, `resolve`, `resolve_all`). All three are total: an
//! unresolvable id yields a sentinel URL or an undefined value, never a
//! render failure, so templates can look up dangling references freely.

use std::fs;
use std::path::{Path, PathBuf};

use minijinja::{AutoEscape, Environment, Value};
use serde::Serialize;

use crate::context::QueryContext;

/// Embedded fallback for the per-document page template.
const DEFAULT_PAGE_TEMPLATE: &str = include_str!("../templates/page.html");

/// Embedded fallback for the site index template.
const DEFAULT_INDEX_TEMPLATE: &str = include_str!("../templates/index.html");

/// Template name for per-document pages.
pub const PAGE_TEMPLATE: &str = "page";

/// Template name for the site index.
pub const INDEX_TEMPLATE: &str = "index";

/// Error type for template loading and rendering.
#[derive(Debug, thiserror::Error)]
pub enum TemplateError {
    /// A template file could not be read.
    #[error("failed to read template {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Template compilation or rendering failed.
    #[error("template error: {0}")]
    Render(#[from] minijinja::Error),
}

/// Compiled site templates with query helpers registered.
pub struct Templates {
    env: Environment<'static>,
}

impl Templates {
    /// Load templates, preferring `page.html` / `index.html` from
    /// `templates_dir` and falling back to the embedded defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if a template file exists but cannot be read, or if
    /// a template fails to compile. Both are fatal for the run.
    pub fn load(
        templates_dir: Option<&Path>,
        context: &QueryContext,
    ) -> Result<Self, TemplateError> {
        let mut env = Environment::new();
        // Template names carry no extension, so opt into HTML escaping here.
        env.set_auto_escape_callback(|_| AutoEscape::Html);

        let page = template_source(templates_dir, "page.html", DEFAULT_PAGE_TEMPLATE)?;
        let index = template_source(templates_dir, "index.html", DEFAULT_INDEX_TEMPLATE)?;
        env.add_template_owned(PAGE_TEMPLATE, page)?;
        env.add_template_owned(INDEX_TEMPLATE, index)?;

        register_query_functions(&mut env, context);

        Ok(Self { env })
    }

    /// Render the per-document page template with the given locals.
    ///
    /// # Errors
    ///
    /// Returns an error if rendering fails; per the fail-fast policy this
    /// aborts the batch.
    pub fn render_page(&self, locals: &impl Serialize) -> Result<String, TemplateError> {
        Ok(self.env.get_template(PAGE_TEMPLATE)?.render(locals)?)
    }

    /// Render the site index template with the given locals.
    ///
    /// # Errors
    ///
    /// Returns an error if rendering fails.
    pub fn render_index(&self, locals: &impl Serialize) -> Result<String, TemplateError> {
        Ok(self.env.get_template(INDEX_TEMPLATE)?.render(locals)?)
    }
}

/// Read a template file if present, falling back to the embedded default.
fn template_source(
    dir: Option<&Path>,
    filename: &str,
    default: &str,
) -> Result<String, TemplateError> {
    let Some(path) = dir.map(|d| d.join(filename)) else {
        return Ok(default.to_owned());
    };
    if !path.exists() {
        return Ok(default.to_owned());
    }
    fs::read_to_string(&path).map_err(|source| TemplateError::Io { path, source })
}

/// Register the query-context operations as template functions.
fn register_query_functions(env: &mut Environment<'static>, context: &QueryContext) {
    let ctx = context.clone();
    env.add_function("url_for", move |id: String| {
        Value::from_safe_string(ctx.url_for(&id))
    });

    let ctx = context.clone();
    env.add_function("resolve", move |id: String| match ctx.resolve(&id) {
        Some(doc) => Value::from_serialize(doc),
        None => Value::UNDEFINED,
    });

    let ctx = context.clone();
    env.add_function("resolve_all", move |ids: Vec<String>| {
        Value::from_serialize(ctx.resolve_all(&ids))
    });
}
