use comment_tests::{
    CompilationBackend, CompileRequest, CompiledArtifact, OutputFormat, SourceMap, SourceMapMode,
    TransformError, TransformResult,
};
use std::sync::Mutex;

/// One call seen by [`RecordingBackend`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedRequest {
    pub filename: String,
    pub entry_text: String,
    pub format: OutputFormat,
    pub source_map: SourceMapMode,
    pub bundle: bool,
    pub external: Vec<String>,
}

/// Substitute backend that echoes its input and remembers every request.
///
/// Compiled code is the entry text behind a `// compiled: <file>` header,
/// so tests can tell compiled snippets apart from raw ones.
#[derive(Default)]
pub struct RecordingBackend {
    requests: Mutex<Vec<RecordedRequest>>,
    /// Requests whose filename contains this text fail to compile
    fail_on: Option<String>,
}

impl RecordingBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing_on(pattern: &str) -> Self {
        Self {
            requests: Mutex::new(Vec::new()),
            fail_on: Some(pattern.to_string()),
        }
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().expect("requests lock").clone()
    }
}

impl CompilationBackend for RecordingBackend {
    fn name(&self) -> &str {
        "recording"
    }

    fn compile(&self, request: &CompileRequest<'_>) -> TransformResult<CompiledArtifact> {
        self.requests
            .lock()
            .expect("requests lock")
            .push(RecordedRequest {
                filename: request.filename.to_string(),
                entry_text: request.entry_text.to_string(),
                format: request.format,
                source_map: request.source_map,
                bundle: request.bundle,
                external: request.external.iter().map(|e| e.to_string()).collect(),
            });

        if let Some(pattern) = &self.fail_on {
            if request.filename.contains(pattern.as_str()) {
                return Err(TransformError::Compilation {
                    file: request.filename.to_string(),
                    line: 1,
                    column: 1,
                    message: "rejected by test backend".to_string(),
                });
            }
        }

        let source_map = request.source_map.returns_map().then(|| SourceMap {
            version: 3,
            sources: vec![request.filename.to_string()],
            sources_content: Some(vec![Some(request.entry_text.to_string())]),
            ..SourceMap::default()
        });

        Ok(CompiledArtifact {
            code: format!("// compiled: {}\n{}", request.filename, request.entry_text),
            source_map,
        })
    }
}

/// Wrap lines into a `/** ... */` documentation comment
pub fn doc_comment(lines: &[&str]) -> String {
    let mut out = String::from("/**\n");
    for line in lines {
        out.push_str(" * ");
        out.push_str(line);
        out.push('\n');
    }
    out.push_str(" */\n");
    out
}
