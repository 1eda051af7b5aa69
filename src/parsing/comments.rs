//! Comment extraction
//!
//! Tokenizes a source file with the grammar of its dialect and lists every
//! comment in source order. Only block comments are handed to the doc-comment
//! parser; line comments are recorded but filtered out by [`block_comments`].
//!
//! tree-sitter recovers from syntax its grammar does not know. The scan only
//! fails when a block comment ends up inside a recovered `ERROR` region.

use crate::error::{TransformError, TransformResult};
use crate::parsing::Dialect;
use crate::types::{CommentKind, CommentRecord, Range, SourceUnit};
use tree_sitter::{Node, Parser};

/// Capability that turns source text into comment tokens.
///
/// The transform only depends on this trait, so the tree-sitter scanner can
/// be swapped for any tokenizer that reports comments in source order.
pub trait CommentScanner: Send + Sync {
    fn scan(&self, source: &SourceUnit<'_>) -> TransformResult<Vec<CommentRecord>>;
}

/// Comment scanner backed by the tree-sitter JavaScript/TypeScript grammars
#[derive(Debug, Default, Clone, Copy)]
pub struct TreeSitterScanner;

impl TreeSitterScanner {
    pub fn new() -> Self {
        Self
    }

    pub(crate) fn parser_for(dialect: Dialect) -> TransformResult<Parser> {
        let mut parser = Parser::new();
        parser
            .set_language(&dialect.grammar())
            .map_err(|e| TransformError::ParserInit {
                dialect: dialect.name().to_string(),
                reason: e.to_string(),
            })?;
        Ok(parser)
    }

    /// Walks the tree in source order. `enclosing_error` is the nearest
    /// `ERROR` ancestor, if any.
    fn collect_comments<'t>(
        node: Node<'t>,
        code: &str,
        enclosing_error: Option<Node<'t>>,
        out: &mut Vec<(CommentRecord, Option<Node<'t>>)>,
    ) {
        if node.kind() == "comment" {
            if let Some(record) = comment_record(node, code) {
                out.push((record, enclosing_error));
            }
            return;
        }

        let enclosing_error = if node.is_error() {
            Some(node)
        } else {
            enclosing_error
        };
        let mut cursor = node.walk();
        for child in node.children(&mut cursor) {
            Self::collect_comments(child, code, enclosing_error, out);
        }
    }

    /// First node the grammar could not make sense of, in source order
    fn first_error(node: Node) -> Option<Node> {
        if node.is_error() || node.is_missing() {
            return Some(node);
        }
        if !node.has_error() {
            return None;
        }

        let mut cursor = node.walk();
        for child in node.children(&mut cursor) {
            if let Some(found) = Self::first_error(child) {
                return Some(found);
            }
        }
        // has_error() was set but no child owns it
        Some(node)
    }
}

fn syntax_error(source: &SourceUnit<'_>, bad: Node) -> TransformError {
    let start = bad.start_position();
    let reason = if bad.is_missing() {
        format!("missing {}", bad.kind())
    } else {
        let snippet: String = source.raw_text[bad.byte_range()]
            .chars()
            .take(40)
            .collect();
        format!("unexpected `{snippet}`")
    };
    TransformError::SourceSyntax {
        file: source.filename.to_string(),
        line: start.row as u32 + 1,
        column: start.column as u32 + 1,
        reason,
    }
}

impl CommentScanner for TreeSitterScanner {
    fn scan(&self, source: &SourceUnit<'_>) -> TransformResult<Vec<CommentRecord>> {
        let dialect = Dialect::from_filename(source.filename);
        let mut parser = Self::parser_for(dialect)?;

        let tree = parser
            .parse(source.raw_text, None)
            .ok_or_else(|| TransformError::SourceSyntax {
                file: source.filename.to_string(),
                line: 1,
                column: 1,
                reason: format!("{dialect} parser produced no syntax tree"),
            })?;

        let root = tree.root_node();
        let mut found = Vec::new();
        Self::collect_comments(root, source.raw_text, None, &mut found);

        // A block comment swallowed by error recovery cannot be trusted.
        // Syntax the grammar merely does not know is left to the backend.
        if let Some(bad) = found
            .iter()
            .filter(|(record, _)| record.is_block())
            .find_map(|(_, error)| *error)
        {
            return Err(syntax_error(source, bad));
        }
        if let Some(bad) = Self::first_error(root) {
            let start = bad.start_position();
            tracing::debug!(
                "[comments] {}: tolerating unrecognized syntax at {}:{}",
                source.filename,
                start.row + 1,
                start.column + 1
            );
        }

        let comments: Vec<_> = found.into_iter().map(|(record, _)| record).collect();

        tracing::trace!(
            "[comments] {} scanned as {dialect}: {} comment(s)",
            source.filename,
            comments.len()
        );

        Ok(comments)
    }
}

fn comment_record(node: Node, code: &str) -> Option<CommentRecord> {
    let text = &code[node.byte_range()];

    let (kind, raw_value) = if let Some(body) = text.strip_prefix("/*") {
        (CommentKind::Block, body.strip_suffix("*/").unwrap_or(body))
    } else if let Some(body) = text.strip_prefix("//") {
        (CommentKind::Line, body)
    } else {
        // Grammar-specific comment forms (e.g. `<!--`) are not ours to handle
        return None;
    };

    let start = node.start_position();
    let end = node.end_position();
    Some(CommentRecord {
        raw_value: raw_value.to_string(),
        kind,
        range: Range {
            start_byte: node.start_byte(),
            end_byte: node.end_byte(),
            start_line: start.row as u32 + 1,
            start_column: start.column as u32 + 1,
            end_line: end.row as u32 + 1,
            end_column: end.column as u32 + 1,
        },
    })
}

/// Raw text of every block comment, in source order
pub fn block_comments(
    scanner: &dyn CommentScanner,
    source: &SourceUnit<'_>,
) -> TransformResult<Vec<String>> {
    Ok(scanner
        .scan(source)?
        .into_iter()
        .filter(CommentRecord::is_block)
        .map(|record| record.raw_value)
        .collect())
}
