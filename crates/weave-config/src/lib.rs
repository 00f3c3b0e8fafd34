//! Configuration management for Weave.
//!
//! Parses `weave.toml` configuration files with serde and provides
//! auto-discovery of config files in parent directories.
//!
//! CLI settings can be applied during load via [`CliSettings`]; they override
//! whatever the config file says. Relative paths in the config file resolve
//! against the directory containing it.

use std::path::{Path, PathBuf};

use serde::Deserialize;

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "weave.toml";

/// CLI settings that override configuration file values.
///
/// All fields are optional. Only non-None values override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override source directory.
    pub source_dir: Option<PathBuf>,
    /// Override output directory.
    pub output_dir: Option<PathBuf>,
    /// Override templates directory.
    pub templates_dir: Option<PathBuf>,
    /// Override section list.
    pub sections: Option<Vec<String>>,
}

/// Error type for configuration loading.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The config file could not be read.
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The config file is not valid TOML.
    #[error("invalid config {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

/// Raw site configuration as parsed from TOML (paths as strings).
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct SiteConfigRaw {
    source_dir: Option<String>,
    output_dir: Option<String>,
    templates_dir: Option<String>,
    sections: Option<Vec<String>>,
    gfm: Option<bool>,
}

/// Raw top-level configuration file.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ConfigRaw {
    site: SiteConfigRaw,
}

/// Resolved application configuration.
#[derive(Clone, Debug)]
pub struct Config {
    /// Root directory containing section directories.
    pub source_dir: PathBuf,
    /// Output root for the generated site.
    pub output_dir: PathBuf,
    /// Directory with custom `page.html` / `index.html` templates, when the
    /// site overrides the built-in ones.
    pub templates_dir: Option<PathBuf>,
    /// Section directories to scan, in order.
    pub sections: Vec<String>,
    /// Whether GitHub Flavored Markdown extensions are enabled.
    pub gfm: bool,
    /// Path to the config file this was loaded from, if any.
    pub config_path: Option<PathBuf>,
}

impl Config {
    /// Load configuration, discovering `weave.toml` from `start_dir` upwards
    /// and applying CLI overrides.
    ///
    /// When no config file exists, defaults apply: source `.`, output
    /// `dist`, sections `concepts` and `platforms`.
    ///
    /// # Errors
    ///
    /// Returns an error if a discovered config file cannot be read or parsed.
    pub fn load(start_dir: &Path, settings: CliSettings) -> Result<Self, ConfigError> {
        let config_path = discover(start_dir);
        let (raw, base_dir) = match &config_path {
            Some(path) => {
                let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
                    path: path.clone(),
                    source,
                })?;
                let raw: ConfigRaw =
                    toml::from_str(&content).map_err(|source| ConfigError::Parse {
                        path: path.clone(),
                        source,
                    })?;
                let base = path.parent().unwrap_or(start_dir).to_path_buf();
                (raw, base)
            }
            None => (ConfigRaw::default(), start_dir.to_path_buf()),
        };

        Ok(Self::resolve(raw, &base_dir, config_path, settings))
    }

    /// Parse configuration from a specific file, applying CLI overrides.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: &Path, settings: CliSettings) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let raw: ConfigRaw = toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        let base_dir = path.parent().unwrap_or(Path::new(".")).to_path_buf();
        Ok(Self::resolve(
            raw,
            &base_dir,
            Some(path.to_path_buf()),
            settings,
        ))
    }

    /// Merge raw config, defaults and CLI settings into a resolved config.
    fn resolve(
        raw: ConfigRaw,
        base_dir: &Path,
        config_path: Option<PathBuf>,
        settings: CliSettings,
    ) -> Self {
        let source_dir = settings.source_dir.unwrap_or_else(|| {
            raw.site
                .source_dir
                .as_deref()
                .map_or_else(|| base_dir.to_path_buf(), |p| resolve_path(base_dir, p))
        });

        let output_dir = settings.output_dir.unwrap_or_else(|| {
            raw.site
                .output_dir
                .as_deref()
                .map_or_else(|| base_dir.join("dist"), |p| resolve_path(base_dir, p))
        });

        let templates_dir = settings.templates_dir.or_else(|| {
            raw.site
                .templates_dir
                .as_deref()
                .map(|p| resolve_path(base_dir, p))
        });

        let sections = settings
            .sections
            .or(raw.site.sections)
            .unwrap_or_else(default_sections);

        Self {
            source_dir,
            output_dir,
            templates_dir,
            sections,
            gfm: raw.site.gfm.unwrap_or(true),
            config_path,
        }
    }
}

/// Resolve a config path against the config file's directory.
fn resolve_path(base_dir: &Path, p: &str) -> PathBuf {
    let path = Path::new(p);
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        base_dir.join(path)
    }
}

/// Default section directories, matching the canonical site layout.
fn default_sections() -> Vec<String> {
    vec!["concepts".to_owned(), "platforms".to_owned()]
}

/// Walk from `start_dir` upwards looking for a config file.
fn discover(start_dir: &Path) -> Option<PathBuf> {
    let mut dir = Some(start_dir);
    while let Some(current) = dir {
        let candidate = current.join(CONFIG_FILENAME);
        if candidate.is_file() {
            return Some(candidate);
        }
        dir = current.parent();
    }
    None
}
