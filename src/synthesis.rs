//! Test synthesis
//!
//! Turns the ordered snippets of one file into test registrations wrapped in
//! a single suite, as plain text appended to the original source. No suite is
//! emitted for a file without snippets.

use crate::backend::{CompilationBackend, CompileRequest, OutputFormat, SourceMapMode};
use crate::config::{BackendConfig, SynthesisConfig};
use crate::error::TransformResult;
use crate::parsing::{Dialect, snippet_syntax};
use crate::types::CodeSnippet;
use serde::{Deserialize, Serialize};

/// Binding that lets `module.exports = ...` and compiled `export` statements
/// run inside a test body
pub const EXPORT_PLACEHOLDER: &str = "const module = { exports: {} };";

/// Pragmas that keep coverage and lint tooling out of the generated block
pub const TOOLING_PRAGMAS: &str = "/* istanbul ignore next */\n/* eslint-disable */";

/// How a snippet ends up inside its test body
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Strategy {
    /// Paste the snippet text as-is. Breaks on `import`/`export`.
    Inline,
    /// Compile snippets with `import`/`export` as their own module first.
    /// Other snippets are embedded as written.
    #[default]
    Isolated,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SynthesizedTestCase {
    pub id: usize,
    pub body_code: String,
}

/// Opening text of the suite registration for `suite_name`
pub fn suite_marker(suite_name: &str) -> String {
    format!("describe({}", quote(suite_name))
}

fn quote(text: &str) -> String {
    serde_json::to_string(text).unwrap_or_else(|_| format!("\"{text}\""))
}

/// Diagnostic name of an isolated snippet compiled out of `filename`
pub fn snippet_filename(filename: &str, index: usize) -> String {
    format!("{filename}#comment-test-case-{index}")
}

/// Builds test registrations from snippets.
///
/// Borrows the backend only for isolated compilation; nothing is kept past
/// [`TestSynthesizer::synthesize`].
pub struct TestSynthesizer<'a, B: CompilationBackend + ?Sized> {
    config: &'a SynthesisConfig,
    backend_config: &'a BackendConfig,
    backend: &'a B,
}

impl<'a, B: CompilationBackend + ?Sized> TestSynthesizer<'a, B> {
    pub fn new(
        config: &'a SynthesisConfig,
        backend_config: &'a BackendConfig,
        backend: &'a B,
    ) -> Self {
        Self {
            config,
            backend_config,
            backend,
        }
    }

    /// One test case per snippet, in snippet order
    pub fn synthesize(
        &self,
        filename: &str,
        snippets: &[CodeSnippet],
    ) -> TransformResult<Vec<SynthesizedTestCase>> {
        snippets
            .iter()
            .map(|snippet| self.synthesize_one(filename, snippet))
            .collect()
    }

    fn synthesize_one(
        &self,
        filename: &str,
        snippet: &CodeSnippet,
    ) -> TransformResult<SynthesizedTestCase> {
        let body_code = match self.config.strategy {
            Strategy::Inline => snippet.text.clone(),
            Strategy::Isolated => {
                let syntax = snippet_syntax(Dialect::from_filename(filename), &snippet.text)?;
                let code = if syntax.needs_isolation() {
                    let name = snippet_filename(filename, snippet.index);
                    let request = CompileRequest::new(self.backend_config, &name, &snippet.text)
                        .with_format(OutputFormat::Cjs)
                        .with_source_map(SourceMapMode::None);
                    self.backend.compile(&request)?.code
                } else {
                    tracing::trace!(
                        "[synthesis] {filename}: snippet {} embedded as written",
                        snippet.index
                    );
                    snippet.text.clone()
                };

                if self.config.export_placeholder {
                    format!("{EXPORT_PLACEHOLDER}\n{code}")
                } else {
                    code
                }
            }
        };

        Ok(SynthesizedTestCase {
            id: snippet.index,
            body_code,
        })
    }

    pub fn test_case_name(&self, id: usize) -> String {
        format!("{}{id}", self.config.case_prefix)
    }

    /// Text of one test registration
    pub fn render_case(&self, case: &SynthesizedTestCase) -> String {
        format!(
            "test({}, async () => {{\n{}\n}});",
            quote(&self.test_case_name(case.id)),
            case.body_code
        )
    }

    /// Suite wrapping every registration, or `None` when there are none
    pub fn render_suite(&self, cases: &[SynthesizedTestCase]) -> Option<String> {
        if cases.is_empty() {
            return None;
        }

        let registrations = cases
            .iter()
            .map(|case| self.render_case(case))
            .collect::<Vec<_>>()
            .join("\n");

        Some(format!(
            ";{TOOLING_PRAGMAS}\n(() => {{\n{}, () => {{\n{registrations}\n}});\n}})();\n",
            suite_marker(&self.config.suite_name)
        ))
    }
}

/// Original text followed by the suite, if any
pub fn combine(source: &str, suite: Option<&str>) -> String {
    match suite {
        Some(suite) => format!("{source}\n{suite}"),
        None => source.to_string(),
    }
}
