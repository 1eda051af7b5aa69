//! Runs the fenced examples in documentation comments as tests.
//!
//! A host test runner hands each source file to [`Transformer::process`]. The
//! transform finds ```` ``` ```` blocks inside block comments, appends one test
//! case per block to the source, and compiles the result into a single
//! executable unit plus a source map.

pub mod backend;
pub mod config;
pub mod error;
pub mod logging;
pub mod parsing;
pub mod synthesis;
pub mod transform;
pub mod types;

// Explicit exports for better API clarity
pub use backend::{
    CompilationBackend, CompileRequest, CompiledArtifact, EsbuildBackend, OutputFormat, SourceMap,
    SourceMapMode,
};
pub use config::Settings;
pub use error::{TransformError, TransformResult};
pub use parsing::{CommentScanner, Dialect, TreeSitterScanner};
pub use synthesis::{Strategy, SynthesizedTestCase, TestSynthesizer};
pub use transform::{TransformOptions, TransformOutput, Transformer, create_transformer};
pub use types::{CodeSnippet, CommentKind, CommentRecord, DocComment, DocTag, Range, SourceUnit};
