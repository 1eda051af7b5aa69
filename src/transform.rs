//! Transform entrypoint
//!
//! `process` is the one operation a host test runner calls per file:
//!
//! ```text
//! source -> comments -> doc comments -> fenced snippets -> test suite
//!        -> original + suite -> compilation backend -> { code, map }
//! ```
//!
//! Every stage runs synchronously on the calling thread and owns its data
//! for the duration of the call only. Concurrent calls share nothing but the
//! backend, which is borrowed immutably.

use crate::backend::{CompilationBackend, CompileRequest, EsbuildBackend, SourceMap};
use crate::config::Settings;
use crate::error::TransformResult;
use crate::parsing::{
    CommentScanner, TreeSitterScanner, block_comments, extract_code_blocks, parse_doc_comment,
};
use crate::synthesis::{self, TestSynthesizer};
use crate::types::{CodeSnippet, SourceUnit};
use serde::{Deserialize, Serialize};

/// Options the host runner passes along with each file.
///
/// Accepted for interface compatibility and never consulted.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TransformOptions(pub serde_json::Value);

/// What the host runner receives back
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransformOutput {
    pub code: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub map: Option<SourceMap>,
}

/// The comment-test transform, bound to a compilation backend
pub struct Transformer<B: CompilationBackend = EsbuildBackend> {
    backend: B,
    scanner: Box<dyn CommentScanner>,
    settings: Settings,
}

impl Default for Transformer<EsbuildBackend> {
    fn default() -> Self {
        let settings = Settings::default();
        Self::with_settings(EsbuildBackend::from_config(&settings.backend), settings)
    }
}

/// Build the default transformer (esbuild backend, default settings)
pub fn create_transformer() -> Transformer<EsbuildBackend> {
    Transformer::default()
}

impl<B: CompilationBackend> Transformer<B> {
    pub fn new(backend: B) -> Self {
        Self::with_settings(backend, Settings::default())
    }

    pub fn with_settings(backend: B, settings: Settings) -> Self {
        Self {
            backend,
            scanner: Box::new(TreeSitterScanner::new()),
            settings,
        }
    }

    /// Replace the comment tokenizer
    pub fn with_scanner(mut self, scanner: impl CommentScanner + 'static) -> Self {
        self.scanner = Box::new(scanner);
        self
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Snippets of every fenced block in every block comment, in document
    /// order: comments in source order, description before tags, tags in
    /// declaration order, fences in appearance order.
    pub fn extract_snippets(
        &self,
        source_code: &str,
        filename: &str,
    ) -> TransformResult<Vec<CodeSnippet>> {
        let source = SourceUnit::new(filename, source_code);
        let comments = block_comments(self.scanner.as_ref(), &source)?;

        let snippets = comments
            .iter()
            .map(|raw| parse_doc_comment(raw))
            .flat_map(|doc| {
                doc.texts()
                    .flat_map(extract_code_blocks)
                    .collect::<Vec<_>>()
            })
            .enumerate()
            .map(|(index, text)| CodeSnippet { text, index })
            .collect::<Vec<_>>();

        tracing::debug!(
            "[transform] {filename}: {} block comment(s), {} snippet(s)",
            comments.len(),
            snippets.len()
        );
        Ok(snippets)
    }

    /// The text handed to the backend: original source plus the synthesized
    /// suite, or the original source alone when there are no snippets.
    pub fn combine(&self, source_code: &str, filename: &str) -> TransformResult<String> {
        let snippets = self.extract_snippets(source_code, filename)?;
        if snippets.is_empty() {
            return Ok(source_code.to_string());
        }

        let synthesizer = TestSynthesizer::new(
            &self.settings.synthesis,
            &self.settings.backend,
            &self.backend,
        );
        let cases = synthesizer.synthesize(filename, &snippets)?;
        let suite = synthesizer.render_suite(&cases);
        Ok(synthesis::combine(source_code, suite.as_deref()))
    }

    /// Transform one file for the host runner
    pub fn process(
        &self,
        source_code: &str,
        filename: &str,
        _options: &TransformOptions,
    ) -> TransformResult<TransformOutput> {
        let combined = self.combine(source_code, filename)?;

        let request = CompileRequest::new(&self.settings.backend, filename, &combined);
        tracing::debug!(
            "[transform] {filename}: compiling {} bytes with {}",
            combined.len(),
            self.backend.name()
        );
        let artifact = self.backend.compile(&request)?;

        Ok(TransformOutput {
            code: artifact.code,
            map: artifact.source_map,
        })
    }
}
