//! esbuild process backend.
//!
//! Pipes the entry text to `esbuild` over stdin and lets it write into a
//! private temporary directory. Artifacts are picked up by filename suffix:
//! `.js` is the compiled unit, `.js.map` the paired source map.

use super::{CompilationBackend, CompileRequest, CompiledArtifact, SourceMap, SourceMapMode};
use crate::config::BackendConfig;
use crate::error::{TransformError, TransformResult};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

const OUTFILE: &str = "out.js";
const CODE_SUFFIX: &str = ".js";
const MAP_SUFFIX: &str = ".js.map";

/// Runs the esbuild executable once per compilation
#[derive(Debug, Clone)]
pub struct EsbuildBackend {
    program: String,
}

impl Default for EsbuildBackend {
    fn default() -> Self {
        Self::from_config(&BackendConfig::default())
    }
}

impl EsbuildBackend {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }

    pub fn from_config(config: &BackendConfig) -> Self {
        Self::new(config.program.clone())
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    /// Whether the executable can be run at all
    pub fn is_available(&self) -> bool {
        Command::new(&self.program)
            .arg("--version")
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .map(|status| status.success())
            .unwrap_or(false)
    }

    /// Command-line arguments for one request
    pub fn args(request: &CompileRequest<'_>, outfile: &Path) -> Vec<String> {
        let mut args = Vec::new();
        if request.bundle {
            args.push("--bundle".to_string());
        }
        args.push(format!("--sourcefile={}", request.filename));
        args.push(format!("--loader={}", request.loader));
        args.push(format!("--platform={}", request.platform));
        args.push(format!("--target={}", request.target));
        args.push(format!("--format={}", request.format.as_str()));
        for pattern in request.external {
            args.push(format!("--external:{pattern}"));
        }
        match request.source_map {
            SourceMapMode::None => {}
            SourceMapMode::Inline => args.push("--sourcemap=inline".to_string()),
            SourceMapMode::External => args.push("--sourcemap=external".to_string()),
            SourceMapMode::Both => args.push("--sourcemap=both".to_string()),
        }
        args.push(format!("--outfile={}", outfile.display()));
        args.push("--log-level=error".to_string());
        args.push("--color=false".to_string());
        args
    }

    fn run(&self, request: &CompileRequest<'_>, outfile: &Path) -> TransformResult<()> {
        let args = Self::args(request, outfile);
        tracing::debug!(
            "[esbuild] compiling {} ({} bytes, sourcemap {:?})",
            request.filename,
            request.entry_text.len(),
            request.source_map
        );

        let mut child = Command::new(&self.program)
            .args(&args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|source| TransformError::BackendUnavailable {
                program: self.program.clone(),
                source,
            })?;

        if let Some(mut stdin) = child.stdin.take() {
            stdin
                .write_all(request.entry_text.as_bytes())
                .map_err(|source| TransformError::BackendUnavailable {
                    program: self.program.clone(),
                    source,
                })?;
            // stdin drops here so esbuild sees EOF
        }

        let output = child
            .wait_with_output()
            .map_err(|source| TransformError::BackendUnavailable {
                program: self.program.clone(),
                source,
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(super::diagnostics::compilation_error(
                request.filename,
                &stderr,
            ));
        }
        Ok(())
    }
}

/// Files written by one run, addressable by suffix
struct OutputFiles {
    files: Vec<PathBuf>,
}

impl OutputFiles {
    fn collect(dir: &Path) -> TransformResult<Self> {
        let entries = std::fs::read_dir(dir).map_err(|source| TransformError::Io {
            path: dir.to_path_buf(),
            source,
        })?;

        let mut files = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|source| TransformError::Io {
                path: dir.to_path_buf(),
                source,
            })?;
            files.push(entry.path());
        }
        files.sort();
        Ok(Self { files })
    }

    /// First file whose name ends with `suffix` but not with any of `unless`
    fn by_suffix(&self, suffix: &str, unless: &[&str]) -> Option<&Path> {
        self.files
            .iter()
            .find(|path| {
                let name = path.to_string_lossy();
                name.ends_with(suffix) && !unless.iter().any(|u| name.ends_with(u))
            })
            .map(PathBuf::as_path)
    }

    fn read(path: &Path) -> TransformResult<String> {
        std::fs::read_to_string(path).map_err(|source| TransformError::Io {
            path: path.to_path_buf(),
            source,
        })
    }
}

impl CompilationBackend for EsbuildBackend {
    fn name(&self) -> &str {
        "esbuild"
    }

    fn compile(&self, request: &CompileRequest<'_>) -> TransformResult<CompiledArtifact> {
        let dir = tempfile::tempdir().map_err(|source| TransformError::Io {
            path: std::env::temp_dir(),
            source,
        })?;

        self.run(request, &dir.path().join(OUTFILE))?;

        let outputs = OutputFiles::collect(dir.path())?;
        let code_path = outputs.by_suffix(CODE_SUFFIX, &[MAP_SUFFIX]).ok_or_else(|| {
            TransformError::BackendOutput {
                reason: format!("no {CODE_SUFFIX} output for {}", request.filename),
            }
        })?;
        let code = OutputFiles::read(code_path)?;

        let source_map = if request.source_map.returns_map() {
            let map_path = outputs.by_suffix(MAP_SUFFIX, &[]).ok_or_else(|| {
                TransformError::BackendOutput {
                    reason: format!("no {MAP_SUFFIX} output for {}", request.filename),
                }
            })?;
            let text = OutputFiles::read(map_path)?;
            let map = SourceMap::from_json(&text).map_err(|e| TransformError::BackendOutput {
                reason: format!("malformed source map for {}: {e}", request.filename),
            })?;
            Some(map)
        } else {
            None
        };

        Ok(CompiledArtifact { code, source_map })
    }
}
