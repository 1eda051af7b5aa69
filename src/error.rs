//! Error types for the comment-test transform
//!
//! This module provides structured error types using thiserror. Only hard
//! failures live here: malformed doc comments and unterminated fences are
//! handled leniently by their scanners and never surface as errors.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for transform operations
#[derive(Error, Debug)]
pub enum TransformError {
    /// The caller's source could not be tokenized
    #[error("Failed to parse '{file}' at line {line}, column {column}: {reason}")]
    SourceSyntax {
        file: String,
        line: u32,
        column: u32,
        reason: String,
    },

    /// The compilation backend rejected the text it was given
    #[error("Failed to compile '{file}' at line {line}, column {column}: {message}")]
    Compilation {
        file: String,
        line: u32,
        column: u32,
        message: String,
    },

    #[error("Failed to run compiler '{program}': {source}")]
    BackendUnavailable {
        program: String,
        source: std::io::Error,
    },

    #[error("Compiler produced unusable output: {reason}")]
    BackendOutput { reason: String },

    #[error("Failed to initialize {dialect} parser: {reason}")]
    ParserInit { dialect: String, reason: String },

    /// Configuration errors
    #[error("Invalid configuration: {0}")]
    Config(#[from] Box<figment::Error>),

    #[error("I/O error on '{path}': {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

impl TransformError {
    /// Get a stable status code for this error type.
    ///
    /// Host integrations can match on this instead of the display text.
    pub fn status_code(&self) -> String {
        match self {
            Self::SourceSyntax { .. } => "SOURCE_SYNTAX_ERROR",
            Self::Compilation { .. } => "COMPILATION_ERROR",
            Self::BackendUnavailable { .. } => "BACKEND_UNAVAILABLE",
            Self::BackendOutput { .. } => "BACKEND_OUTPUT_ERROR",
            Self::ParserInit { .. } => "PARSER_INIT_ERROR",
            Self::Config(_) => "CONFIG_ERROR",
            Self::Io { .. } => "IO_ERROR",
        }
        .to_string()
    }

    /// Get recovery suggestions for this error
    pub fn recovery_suggestions(&self) -> Vec<&'static str> {
        match self {
            Self::SourceSyntax { .. } => vec![
                "Check the reported position for a syntax error in the source file",
                "Make sure the file extension matches its dialect (.ts, .tsx, .js, .jsx)",
            ],
            Self::Compilation { file, .. } if file.contains("#comment-test-case-") => vec![
                "A fenced example in a documentation comment does not compile",
                "Fix the example or remove the code fence around it",
            ],
            Self::Compilation { .. } => vec!["Fix the reported error in the source file"],
            Self::BackendUnavailable { .. } => vec![
                "Install esbuild and make sure it is on PATH",
                "Or set `backend.program` to the esbuild binary in settings.toml",
            ],
            Self::Config(_) => vec!["Check settings.toml for typos and wrong value types"],
            _ => vec![],
        }
    }

    /// Source position carried by this error, if any (1-based line, column)
    pub fn position(&self) -> Option<(u32, u32)> {
        match self {
            Self::SourceSyntax { line, column, .. } | Self::Compilation { line, column, .. } => {
                Some((*line, *column))
            }
            _ => None,
        }
    }
}

/// Result type alias for transform operations
pub type TransformResult<T> = Result<T, TransformError>;
