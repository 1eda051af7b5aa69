//! Fenced code block extraction
//!
//! A two-state line scanner over one description text. A line whose trimmed
//! form starts with a triple backtick toggles between [`FenceState::Outside`]
//! and [`FenceState::InsideFence`]; marker lines never belong to a snippet.
//! A block still open when the text ends is dropped without error.

/// Line prefix that opens and closes a fenced block
pub const FENCE_MARKER: &str = "```";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FenceState {
    Outside,
    InsideFence,
}

/// Iterator over the fenced blocks of a text, in appearance order.
///
/// Cloning before iterating gives an independent pass over the same text.
#[derive(Debug, Clone)]
pub struct Fences<'a> {
    lines: std::str::Split<'a, char>,
    state: FenceState,
}

impl<'a> Fences<'a> {
    pub fn new(text: &'a str) -> Self {
        Self {
            lines: text.split('\n'),
            state: FenceState::Outside,
        }
    }

    pub fn state(&self) -> FenceState {
        self.state
    }
}

impl Iterator for Fences<'_> {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        let mut buffer: Vec<&str> = Vec::new();

        for line in self.lines.by_ref() {
            let is_marker = line.trim().starts_with(FENCE_MARKER);

            match (self.state, is_marker) {
                (FenceState::Outside, true) => self.state = FenceState::InsideFence,
                (FenceState::Outside, false) => {}
                (FenceState::InsideFence, true) => {
                    self.state = FenceState::Outside;
                    return Some(buffer.join("\n"));
                }
                (FenceState::InsideFence, false) => buffer.push(line),
            }
        }

        if self.state == FenceState::InsideFence && !buffer.is_empty() {
            tracing::trace!(
                "[fence] dropping unterminated block of {} line(s)",
                buffer.len()
            );
        }
        None
    }
}

impl std::iter::FusedIterator for Fences<'_> {}

/// Every complete fenced block in `text`, in appearance order
pub fn extract_code_blocks(text: &str) -> Vec<String> {
    Fences::new(text).collect()
}
