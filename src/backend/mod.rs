//! Compilation backend interface
//!
//! The transform never compiles anything itself. It hands a [`CompileRequest`]
//! to a [`CompilationBackend`] and receives one executable unit back, with an
//! optional source map whose positions refer to the exact request text.
//!
//! [`EsbuildBackend`] drives the esbuild executable. Tests substitute their
//! own implementation.

pub mod diagnostics;
pub mod esbuild;

pub use diagnostics::{Diagnostic, parse_esbuild_stderr};
pub use esbuild::EsbuildBackend;

use crate::config::BackendConfig;
use crate::error::TransformResult;
use serde::{Deserialize, Serialize};

/// Every import target stays external; nothing is bundled in
pub const EXTERNAL_ALL: &[&str] = &["*"];

/// Module format of the compiled unit
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Cjs,
    Esm,
    Iife,
}

impl OutputFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            OutputFormat::Cjs => "cjs",
            OutputFormat::Esm => "esm",
            OutputFormat::Iife => "iife",
        }
    }
}

/// Where the source map ends up
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceMapMode {
    None,
    /// Embedded as a data URL comment in the code
    Inline,
    /// Returned alongside the code only
    External,
    /// Embedded and returned
    #[default]
    Both,
}

impl SourceMapMode {
    /// Whether the backend should hand back a structured map
    pub fn returns_map(&self) -> bool {
        matches!(self, SourceMapMode::External | SourceMapMode::Both)
    }
}

/// Everything a backend needs to compile one text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompileRequest<'a> {
    /// Name reported in diagnostics and source maps
    pub filename: &'a str,
    pub entry_text: &'a str,
    /// Input dialect loader, e.g. "tsx"
    pub loader: &'a str,
    pub target: &'a str,
    pub platform: &'a str,
    pub bundle: bool,
    pub format: OutputFormat,
    /// Import specifiers left unresolved
    pub external: &'a [&'a str],
    pub source_map: SourceMapMode,
}

impl<'a> CompileRequest<'a> {
    pub fn new(config: &'a BackendConfig, filename: &'a str, entry_text: &'a str) -> Self {
        Self {
            filename,
            entry_text,
            loader: &config.loader,
            target: &config.target,
            platform: &config.platform,
            bundle: true,
            format: config.format,
            external: EXTERNAL_ALL,
            source_map: config.source_map,
        }
    }

    pub fn with_source_map(mut self, mode: SourceMapMode) -> Self {
        self.source_map = mode;
        self
    }

    pub fn with_format(mut self, format: OutputFormat) -> Self {
        self.format = format;
        self
    }
}

/// Source map v3
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceMap {
    pub version: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_root: Option<String>,
    #[serde(default)]
    pub sources: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sources_content: Option<Vec<Option<String>>>,
    #[serde(default)]
    pub names: Vec<String>,
    #[serde(default)]
    pub mappings: String,
}

impl SourceMap {
    pub fn from_json(text: &str) -> serde_json::Result<Self> {
        serde_json::from_str(text)
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

/// Output of one compilation
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompiledArtifact {
    pub code: String,
    pub source_map: Option<SourceMap>,
}

/// Compiles an extended-dialect text into one directly executable unit.
///
/// Implementations must not resolve imports other than the unit itself and
/// must report failures as `TransformError::Compilation` with a position.
pub trait CompilationBackend: Send + Sync {
    /// Short name used in logs
    fn name(&self) -> &str;

    fn compile(&self, request: &CompileRequest<'_>) -> TransformResult<CompiledArtifact>;
}

impl<B: CompilationBackend + ?Sized> CompilationBackend for Box<B> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn compile(&self, request: &CompileRequest<'_>) -> TransformResult<CompiledArtifact> {
        (**self).compile(request)
    }
}

impl<B: CompilationBackend + ?Sized> CompilationBackend for std::sync::Arc<B> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn compile(&self, request: &CompileRequest<'_>) -> TransformResult<CompiledArtifact> {
        (**self).compile(request)
    }
}
