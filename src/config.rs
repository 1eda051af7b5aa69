//! Configuration module for the comment-test transform.
//!
//! This module provides a layered configuration system that supports:
//! - Default values
//! - TOML configuration file
//!
//! The host runner's own transform options are opaque to this crate; these
//! settings only describe how snippets are synthesized and how the compiler
//! backend is invoked.

use crate::backend::{OutputFormat, SourceMapMode};
use crate::error::{TransformError, TransformResult};
use crate::synthesis::Strategy;
use figment::{
    Figment,
    providers::{Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct Settings {
    /// Version of the configuration schema
    #[serde(default = "default_version")]
    pub version: u32,

    /// Compiler backend settings
    #[serde(default)]
    pub backend: BackendConfig,

    /// Test synthesis settings
    #[serde(default)]
    pub synthesis: SynthesisConfig,

    /// Logging settings
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct BackendConfig {
    /// Compiler executable, looked up on PATH when not absolute
    #[serde(default = "default_program")]
    pub program: String,

    /// Runtime target passed to the compiler (e.g. "node20")
    #[serde(default = "default_target")]
    pub target: String,

    /// Platform passed to the compiler
    #[serde(default = "default_platform")]
    pub platform: String,

    /// Module format of the emitted unit
    #[serde(default)]
    pub format: OutputFormat,

    /// Loader used for the entry text; "tsx" accepts every supported dialect
    #[serde(default = "default_loader")]
    pub loader: String,

    /// Source map emission for the combined source
    #[serde(default)]
    pub source_map: SourceMapMode,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct SynthesisConfig {
    /// How snippets are embedded into test bodies
    #[serde(default)]
    pub strategy: Strategy,

    /// Name of the wrapping suite registration
    #[serde(default = "default_suite_name")]
    pub suite_name: String,

    /// Prefix of each test registration name, followed by the snippet index
    #[serde(default = "default_case_prefix")]
    pub case_prefix: String,

    /// Bind a `module` placeholder before isolated snippets
    #[serde(default = "default_true")]
    pub export_placeholder: bool,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct LoggingConfig {
    /// Maximum level: "error", "warn", "info", "debug" or "trace"
    #[serde(default = "default_log_level")]
    pub level: String,
}

// Default value functions
fn default_version() -> u32 {
    1
}
fn default_program() -> String {
    "esbuild".to_string()
}
fn default_target() -> String {
    "node20".to_string()
}
fn default_platform() -> String {
    "node".to_string()
}
fn default_loader() -> String {
    "tsx".to_string()
}
fn default_suite_name() -> String {
    "comment-test-cases".to_string()
}
fn default_case_prefix() -> String {
    "comment-test-case #".to_string()
}
fn default_true() -> bool {
    true
}
fn default_log_level() -> String {
    "warn".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            version: default_version(),
            backend: BackendConfig::default(),
            synthesis: SynthesisConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            program: default_program(),
            target: default_target(),
            platform: default_platform(),
            format: OutputFormat::default(),
            loader: default_loader(),
            source_map: SourceMapMode::default(),
        }
    }
}

impl Default for SynthesisConfig {
    fn default() -> Self {
        Self {
            strategy: Strategy::default(),
            suite_name: default_suite_name(),
            case_prefix: default_case_prefix(),
            export_placeholder: true,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

impl Settings {
    /// Load configuration from a specific file, layered over the defaults
    pub fn load_from(path: impl AsRef<Path>) -> TransformResult<Self> {
        Figment::new()
            .merge(Serialized::defaults(Settings::default()))
            .merge(Toml::file(path))
            .extract()
            .map_err(|e| TransformError::Config(Box::new(e)))
    }

    /// Parse configuration from TOML text, layered over the defaults
    pub fn from_toml_str(text: &str) -> TransformResult<Self> {
        Figment::new()
            .merge(Serialized::defaults(Settings::default()))
            .merge(Toml::string(text))
            .extract()
            .map_err(|e| TransformError::Config(Box::new(e)))
    }

    /// Save current configuration to file
    pub fn save(&self, path: impl AsRef<Path>) -> TransformResult<()> {
        let path = path.as_ref();
        let toml_string = toml::to_string_pretty(self).map_err(|e| TransformError::Io {
            path: path.to_path_buf(),
            source: std::io::Error::new(std::io::ErrorKind::InvalidData, e),
        })?;

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|source| TransformError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }

        std::fs::write(path, toml_string).map_err(|source| TransformError::Io {
            path: path.to_path_buf(),
            source,
        })
    }

    /// The string every synthesized suite starts with
    pub fn suite_marker(&self) -> String {
        crate::synthesis::suite_marker(&self.synthesis.suite_name)
    }
}
