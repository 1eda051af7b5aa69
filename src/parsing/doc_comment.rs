//! Documentation comment parsing
//!
//! Splits the body of a block comment into a free-text description and
//! `@tag` sections. Spacing is preserved: only the ` * ` line prefix is
//! removed, so indentation inside examples reaches the fence scanner intact.
//!
//! Parsing never fails. Prose comments without tags yield a description and
//! no tags; a bare `@tag` line yields a tag with an empty description.

use crate::types::{DocComment, DocTag};

/// Parse the raw text of one block comment (delimiters already stripped)
pub fn parse_doc_comment(raw: &str) -> DocComment {
    let mut doc = DocComment::default();
    let mut description: Vec<&str> = Vec::new();
    let mut current: Option<(String, Vec<&str>)> = None;

    for line in raw.split('\n') {
        let text = strip_delimiter(line);

        if let Some((name, rest)) = tag_start(text) {
            if let Some((tag_name, lines)) = current.take() {
                doc.tags.push(finish_tag(tag_name, &lines));
            }
            current = Some((name.to_string(), vec![rest]));
            continue;
        }

        match current.as_mut() {
            Some((_, lines)) => lines.push(text),
            None => description.push(text),
        }
    }

    if let Some((tag_name, lines)) = current.take() {
        doc.tags.push(finish_tag(tag_name, &lines));
    }
    doc.description = description.join("\n");
    doc
}

fn finish_tag(tag_name: String, lines: &[&str]) -> DocTag {
    DocTag {
        tag_name: Some(tag_name),
        description: lines.join("\n"),
    }
}

/// Drop the leading whitespace and `*` of a comment line, keeping any
/// indentation past the single space that follows the `*`.
fn strip_delimiter(line: &str) -> &str {
    let line = line.strip_suffix('\r').unwrap_or(line);
    let rest = line.trim_start();

    match rest.strip_prefix('*') {
        Some(after) if !after.starts_with('/') => {
            after
                .strip_prefix(' ')
                .or_else(|| after.strip_prefix('\t'))
                .unwrap_or(after)
        }
        _ => rest,
    }
}

/// `@name rest-of-line` -> (name, rest-of-line)
fn tag_start(text: &str) -> Option<(&str, &str)> {
    let body = text.strip_prefix('@')?;
    let end = body
        .find(|c: char| c.is_whitespace())
        .unwrap_or(body.len());
    let name = &body[..end];
    if name.is_empty() || !name.starts_with(|c: char| c.is_alphabetic()) {
        return None;
    }

    let rest = &body[end..];
    let rest = rest
        .strip_prefix(' ')
        .or_else(|| rest.strip_prefix('\t'))
        .unwrap_or(rest);
    Some((name, rest))
}
