//! Configuration loader for doxyvb.
//!
//! `defaults/doxyvb.default.toml` is embedded into the binary so that the documented
//! defaults and runtime behavior stay in sync. Callers layer user files and CLI overrides
//! on top of those defaults via [`Loader`] before deserializing into [`DoxyvbConfig`].

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, File, FileFormat, ValueKind};
use serde::Deserialize;
use std::path::Path;

pub use config::ConfigError;

const DEFAULT_TOML: &str = include_str!("../defaults/doxyvb.default.toml");

/// Top-level configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct DoxyvbConfig {
    pub filter: FilterConfig,
    pub source: SourceConfig,
    pub output: OutputConfig,
}

/// Knobs of the C# emitter.
#[derive(Debug, Clone, Deserialize)]
pub struct FilterConfig {
    pub indent: String,
    pub map_types: bool,
    pub blank_line_between_members: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SourceConfig {
    /// encoding_rs label used to decode input files
    pub encoding: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    pub format: String,
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

    /// Apply a single key/value override, e.g. from a CLI flag.
    pub fn set_override<I>(mut self, key: &str, value: I) -> Result<Self, ConfigError>
    where
        I: Into<ValueKind>,
    {
        self.builder = self.builder.set_override(key, value)?;
        Ok(self)
    }

    /// Finalize the builder and deserialize the resulting configuration.
    pub fn build(self) -> Result<DoxyvbConfig, ConfigError> {
        self.builder.build()?.try_deserialize()
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

/// Convenience helper for callers that only need the defaults.
pub fn load_defaults() -> Result<DoxyvbConfig, ConfigError> {
    Loader::new().build()
}
