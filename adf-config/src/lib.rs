//! Shared configuration loader for the adf toolchain.
//!
//! `defaults/adf.default.toml` is embedded into every binary so that docs and
//! runtime behavior stay in sync. Applications layer user-specific files on top
//! of those defaults via [`Loader`] before deserializing into [`AdfConfig`].

use adf_babel::formats::markdown::{check_indent_width, parse_bullet_marker};
use adf_babel::formats::{HtmlOptions, MarkdownOptions, TreevizOptions};
use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, File, FileFormat, ValueKind};
use serde::Deserialize;
use std::path::Path;

const DEFAULT_TOML: &str = include_str!("../defaults/adf.default.toml");

/// Top-level configuration consumed by adf applications.
#[derive(Debug, Clone, Deserialize)]
pub struct AdfConfig {
    pub logging: LoggingConfig,
    pub convert: ConvertConfig,
    pub inspect: InspectConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Filter directive used when `RUST_LOG` is unset.
    pub level: String,
}

/// Format-specific conversion knobs.
#[derive(Debug, Clone, Deserialize)]
pub struct ConvertConfig {
    pub markdown: MarkdownConfig,
    pub html: HtmlConfig,
}

/// Mirrors [`MarkdownOptions`].
#[derive(Debug, Clone, Deserialize)]
pub struct MarkdownConfig {
    pub bullet_marker: char,
    pub indent_width: usize,
    pub escape_text: bool,
}

impl TryFrom<&MarkdownConfig> for MarkdownOptions {
    type Error = ConfigError;

    fn try_from(config: &MarkdownConfig) -> Result<Self, Self::Error> {
        let bullet_marker = parse_bullet_marker(&config.bullet_marker.to_string())
            .map_err(|e| ConfigError::Message(format!("convert.markdown.bullet_marker: {e}")))?;
        let indent_width = check_indent_width(config.indent_width)
            .map_err(|e| ConfigError::Message(format!("convert.markdown.indent_width: {e}")))?;
        Ok(MarkdownOptions {
            bullet_marker,
            indent_width,
            escape_text: config.escape_text,
        })
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct HtmlConfig {
    pub standalone: bool,
    pub title: String,
}

impl From<&HtmlConfig> for HtmlOptions {
    fn from(config: &HtmlConfig) -> Self {
        HtmlOptions {
            standalone: config.standalone,
            title: config.title.clone(),
        }
    }
}

/// Controls the inspect transforms.
#[derive(Debug, Clone, Deserialize)]
pub struct InspectConfig {
    pub treeviz: TreevizConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TreevizConfig {
    pub show_attrs: bool,
}

impl From<&TreevizConfig> for TreevizOptions {
    fn from(config: &TreevizConfig) -> Self {
        TreevizOptions {
            show_attrs: config.show_attrs,
        }
    }
}

/// Helper for layering user overrides over the built-in defaults.
#[derive(Debug, Clone)]
pub struct Loader {
    builder: ConfigBuilder<DefaultState>,
}

impl Loader {
    /// Start a loader seeded with the embedded defaults.
    pub fn new() -> Self {
        let builder = Config::builder().add_source(File::from_str(DEFAULT_TOML, FileFormat::Toml));
        Self { builder }
    }

    /// Layer a configuration file. Missing files trigger an error.
    pub fn with_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(true);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Layer an optional configuration file (ignored if the file is absent).
    pub fn with_optional_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(false);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Apply a single key/value override.
    pub fn set_override<I>(mut self, key: &str, value: I) -> Result<Self, ConfigError>
    where
        I: Into<ValueKind>,
    {
        self.builder = self.builder.set_override(key, value)?;
        Ok(self)
    }

    /// Finalize the builder and deserialize the resulting configuration.
    pub fn build(self) -> Result<AdfConfig, ConfigError> {
        self.builder.build()?.try_deserialize()
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

/// Convenience helper for callers that only need the defaults.
pub fn load_defaults() -> Result<AdfConfig, ConfigError> {
    Loader::new().build()
}
