//! Module syntax detection for snippets
//!
//! A snippet needs its own compilation only when it uses statements that are
//! legal at module top level alone. Everything else runs as written inside
//! the `async` test body, which keeps top-level `await` working.

use crate::error::TransformResult;
use crate::parsing::{Dialect, TreeSitterScanner};

const MODULE_STATEMENTS: &[&str] = &["import_statement", "export_statement"];

/// How a snippet reads to the grammar of its file's dialect
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SnippetSyntax {
    /// Plain statements, safe to embed in a function body
    Script,
    /// Top-level `import` or `export` statements
    Module,
    /// The grammar could not parse it; let the backend judge
    Unparsed,
}

impl SnippetSyntax {
    /// Whether the snippet has to be compiled on its own
    pub fn needs_isolation(self) -> bool {
        !matches!(self, SnippetSyntax::Script)
    }
}

/// Classify `text` with the grammar of `dialect`
pub fn snippet_syntax(dialect: Dialect, text: &str) -> TransformResult<SnippetSyntax> {
    let mut parser = TreeSitterScanner::parser_for(dialect)?;
    let Some(tree) = parser.parse(text, None) else {
        return Ok(SnippetSyntax::Unparsed);
    };

    let root = tree.root_node();
    if root.has_error() {
        return Ok(SnippetSyntax::Unparsed);
    }

    let mut cursor = root.walk();
    let is_module = root
        .named_children(&mut cursor)
        .any(|child| MODULE_STATEMENTS.contains(&child.kind()));

    Ok(if is_module {
        SnippetSyntax::Module
    } else {
        SnippetSyntax::Script
    })
}
