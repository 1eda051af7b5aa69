//! Dialect detection
//!
//! Maps a filename to the tree-sitter grammar able to tokenize it. Each
//! grammar understands the full syntax of its dialect (type annotations,
//! JSX, module forms), so comment nodes come straight from the original bytes.

use serde::{Deserialize, Serialize};
use std::path::Path;
use tree_sitter::Language;

/// Source dialects the comment scanner understands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Dialect {
    JavaScript,
    TypeScript,
    Tsx,
}

impl Dialect {
    /// Detect dialect from file extension
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_lowercase().as_str() {
            "js" | "jsx" | "mjs" | "cjs" => Some(Dialect::JavaScript),
            "ts" | "mts" | "cts" => Some(Dialect::TypeScript),
            "tsx" => Some(Dialect::Tsx),
            _ => None,
        }
    }

    /// Detect dialect from a filename, falling back to TSX.
    ///
    /// TSX is the superset grammar and matches the backend's default loader,
    /// so unknown extensions still get a best-effort scan.
    pub fn from_filename(filename: &str) -> Self {
        Path::new(filename)
            .extension()
            .and_then(|ext| ext.to_str())
            .and_then(Self::from_extension)
            .unwrap_or(Dialect::Tsx)
    }

    /// Get default file extensions for this dialect
    pub fn extensions(&self) -> &[&str] {
        match self {
            Dialect::JavaScript => &["js", "jsx", "mjs", "cjs"],
            Dialect::TypeScript => &["ts", "mts", "cts"],
            Dialect::Tsx => &["tsx"],
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Dialect::JavaScript => "JavaScript",
            Dialect::TypeScript => "TypeScript",
            Dialect::Tsx => "TSX",
        }
    }

    /// The tree-sitter grammar for this dialect
    pub fn grammar(&self) -> Language {
        match self {
            Dialect::JavaScript => tree_sitter_javascript::LANGUAGE.into(),
            Dialect::TypeScript => tree_sitter_typescript::LANGUAGE_TYPESCRIPT.into(),
            Dialect::Tsx => tree_sitter_typescript::LANGUAGE_TSX.into(),
        }
    }
}

impl std::fmt::Display for Dialect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
