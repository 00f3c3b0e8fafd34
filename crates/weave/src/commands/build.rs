//! `weave build` command.

use std::path::PathBuf;
use std::sync::Arc;

use clap::Args;

use weave_config::{CliSettings, Config};
use weave_site::{DocumentLoader, QueryContext, SiteGenerator, SiteIndex, Templates};

use crate::error::CliError;
use crate::output::Output;

/// Arguments for the `build` command.
#[derive(Args)]
pub(crate) struct BuildArgs {
    /// Source directory containing section directories.
    #[arg(long)]
    source: Option<PathBuf>,

    /// Output directory for the generated site.
    #[arg(long)]
    output: Option<PathBuf>,

    /// Directory with custom page/index templates.
    #[arg(long)]
    templates: Option<PathBuf>,

    /// Section directories to scan (repeatable).
    #[arg(long = "section")]
    sections: Vec<String>,

    /// Path to a weave.toml config file (skips auto-discovery).
    #[arg(long)]
    config: Option<PathBuf>,

    /// Enable verbose logging.
    #[arg(long, short)]
    pub(crate) verbose: bool,
}

impl BuildArgs {
    /// Run the full pipeline: load, index, render, write.
    pub(crate) fn execute(self, output: &Output) -> Result<(), CliError> {
        let settings = CliSettings {
            source_dir: self.source,
            output_dir: self.output,
            templates_dir: self.templates,
            sections: (!self.sections.is_empty()).then_some(self.sections),
        };

        let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
        let config = match &self.config {
            Some(path) => Config::from_file(path, settings)?,
            None => Config::load(&cwd, settings)?,
        };

        tracing::info!(
            source = %config.source_dir.display(),
            output = %config.output_dir.display(),
            sections = ?config.sections,
            "starting build"
        );

        let documents = DocumentLoader::new(&config.source_dir)
            .with_gfm(config.gfm)
            .load_sections(&config.sections)?;
        output.info(&format!("Loaded {} documents", documents.len()));

        let index = Arc::new(SiteIndex::build(documents));
        let context = QueryContext::new(Arc::clone(&index));
        let templates = Templates::load(config.templates_dir.as_deref(), &context)?;

        let summary = SiteGenerator::new(index, templates, &config.output_dir).generate()?;

        output.success(&format!(
            "Wrote {} pages and index.html to {}",
            summary.pages_written,
            config.output_dir.display()
        ));
        Ok(())
    }
}
