//! Compiler diagnostic parsing.
//!
//! esbuild reports errors on stderr as a `[ERROR]` header line followed by an
//! indented `file:line:column:` location. Lines are 1-based, columns 0-based.

use crate::error::TransformError;
use regex::Regex;
use std::sync::LazyLock;

static ERROR_HEADER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*(?:✘|X)?\s*\[ERROR\]\s*(.*?)\s*$").expect("Invalid regex")
});

static LOCATION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s+(\S.*?):(\d+):(\d+):\s*$").expect("Invalid regex"));

/// One error reported by the compiler
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub message: String,
    pub file: Option<String>,
    /// 1-based, 0 when unknown
    pub line: u32,
    /// 1-based, 0 when unknown
    pub column: u32,
}

/// Parse every `[ERROR]` block in esbuild's stderr
pub fn parse_esbuild_stderr(stderr: &str) -> Vec<Diagnostic> {
    let mut diagnostics: Vec<Diagnostic> = Vec::new();

    for line in stderr.lines() {
        if let Some(caps) = ERROR_HEADER.captures(line) {
            diagnostics.push(Diagnostic {
                message: caps[1].to_string(),
                file: None,
                line: 0,
                column: 0,
            });
            continue;
        }

        let Some(current) = diagnostics.last_mut() else {
            continue;
        };
        if current.file.is_some() {
            continue;
        }
        if let Some(caps) = LOCATION.captures(line) {
            current.file = Some(caps[1].to_string());
            current.line = caps[2].parse().unwrap_or(0);
            current.column = caps[3].parse::<u32>().map(|c| c + 1).unwrap_or(0);
        }
    }

    diagnostics
}

/// Build the error for a failed compilation of `filename`.
///
/// The first reported diagnostic wins; remaining ones are appended to the
/// message so nothing is lost.
pub fn compilation_error(filename: &str, stderr: &str) -> TransformError {
    let diagnostics = parse_esbuild_stderr(stderr);

    let Some(first) = diagnostics.first() else {
        let message = stderr.trim();
        return TransformError::Compilation {
            file: filename.to_string(),
            line: 0,
            column: 0,
            message: if message.is_empty() {
                "compiler exited without output".to_string()
            } else {
                message.to_string()
            },
        };
    };

    let mut message = first.message.clone();
    let more = diagnostics.len() - 1;
    if more > 0 {
        message.push_str(&format!(" (and {more} more error(s))"));
    }

    TransformError::Compilation {
        file: first.file.clone().unwrap_or_else(|| filename.to_string()),
        line: first.line,
        column: first.column,
        message,
    }
}
