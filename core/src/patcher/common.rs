//! Offset and indentation helpers shared by the text patchers.

/// Byte offset of the start of the line containing `pos`.
pub(crate) fn line_start(text: &str, pos: usize) -> usize {
    text[..pos].rfind('\n').map(|i| i + 1).unwrap_or(0)
}

/// Byte offset just past the terminator of the line containing `pos`,
/// or the end of `text` when that line is the last one.
pub(crate) fn line_end(text: &str, pos: usize) -> usize {
    text[pos..]
        .find('\n')
        .map(|i| pos + i + 1)
        .unwrap_or(text.len())
}

/// Leading spaces/tabs of `line`.
pub(crate) fn indentation(line: &str) -> &str {
    let trimmed = line.trim_start_matches([' ', '\t']);
    &line[..line.len() - trimmed.len()]
}

/// Prefixes every non-empty line of `block` with `indent`.
pub(crate) fn indent_block(block: &str, indent: &str) -> String {
    block
        .split('\n')
        .map(|l| {
            if l.is_empty() {
                l.to_string()
            } else {
                format!("{}{}", indent, l)
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Tracks whether a line walk is inside a `/** ... */` doc comment.
#[derive(Debug, Default)]
pub(crate) struct DocCommentTracker {
    inside: bool,
}

impl DocCommentTracker {
    /// Feeds one line; returns true when the line belongs to a doc comment.
    pub(crate) fn observe(&mut self, line: &str) -> bool {
        let trimmed = line.trim();
        if trimmed.starts_with("/**") {
            self.inside = true;
        }
        if !self.inside {
            return false;
        }
        if trimmed.contains("*/") {
            self.inside = false;
        }
        true
    }
}
