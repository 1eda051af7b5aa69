pub mod comments;
pub mod doc_comment;
pub mod fence;
pub mod language;
pub mod module_syntax;

pub use comments::{CommentScanner, TreeSitterScanner, block_comments};
pub use doc_comment::parse_doc_comment;
pub use fence::{FENCE_MARKER, FenceState, Fences, extract_code_blocks};
pub use language::Dialect;
pub use module_syntax::{SnippetSyntax, snippet_syntax};
