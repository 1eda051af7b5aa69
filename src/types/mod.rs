//! Data model shared by the transform stages.
//!
//! Every value here is owned by a single `process` call and dropped when it
//! returns; nothing is cached between calls.

use serde::{Deserialize, Serialize};

/// One file handed to the transform by the host runner
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourceUnit<'a> {
    pub filename: &'a str,
    pub raw_text: &'a str,
}

impl<'a> SourceUnit<'a> {
    pub fn new(filename: &'a str, raw_text: &'a str) -> Self {
        Self { filename, raw_text }
    }
}

/// Position of a comment in the original text.
///
/// Lines and columns are 1-based; byte offsets index `SourceUnit::raw_text`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Range {
    pub start_byte: usize,
    pub end_byte: usize,
    pub start_line: u32,
    pub start_column: u32,
    pub end_line: u32,
    pub end_column: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CommentKind {
    /// `/* ... */`, including `/** ... */`
    Block,
    /// `// ...`
    Line,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommentRecord {
    /// Comment text with its delimiters stripped
    pub raw_value: String,
    pub kind: CommentKind,
    pub range: Range,
}

impl CommentRecord {
    pub fn is_block(&self) -> bool {
        self.kind == CommentKind::Block
    }
}

/// A parsed documentation comment
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocComment {
    pub description: String,
    pub tags: Vec<DocTag>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocTag {
    /// Tag name without the leading `@`
    pub tag_name: Option<String>,
    pub description: String,
}

impl DocComment {
    /// Description texts in document order: block description first, then
    /// each tag's description in declaration order.
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.description.as_str())
            .chain(self.tags.iter().map(|tag| tag.description.as_str()))
    }
}

/// A fenced example lifted out of a documentation comment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeSnippet {
    pub text: String,
    /// 0-based position in document order across the whole file
    pub index: usize,
}
