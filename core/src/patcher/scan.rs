//! Brace-depth scanning over source lines.
//!
//! The scanner is deliberately not a parser: it masks string/char literals and
//! line comments, skips block comments, and counts braces until the depth
//! returns to zero.

/// A half-open range of lines `[start, end)` covering one complete method.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MethodSpan {
    /// First line of the method (its annotation or signature).
    pub start: usize,
    /// Line following the balancing closing brace.
    pub end: usize,
}

/// Masks string literals and truncates line comments so brace counting only
/// sees structural braces.
///
/// One left-to-right pass: a `"` or `'` opens a literal that only the same
/// quote closes, backslash escapes included. Literals collapse to `""` / `''`
/// and an unterminated one masks the rest of the line. The result is never
/// written back.
pub fn normalize_line(line: &str) -> String {
    let mut out = String::with_capacity(line.len());
    let mut chars = line.chars().peekable();
    let mut quote: Option<char> = None;

    while let Some(ch) = chars.next() {
        match quote {
            Some(q) => {
                if ch == '\\' {
                    chars.next();
                } else if ch == q {
                    out.push(q);
                    quote = None;
                }
            }
            None => match ch {
                '"' | '\'' => {
                    out.push(ch);
                    quote = Some(ch);
                }
                '/' if chars.peek() == Some(&'/') => break,
                _ => out.push(ch),
            },
        }
    }
    out
}

/// Transient scanning position. Never leaves `locate_method_end`.
struct ScanCursor {
    line: usize,
    in_block_comment: bool,
}

/// Finds the end of the method whose declaration starts at `start`.
///
/// Returns the index of the line *after* the line where the brace depth first
/// returns to zero, or `None` when the end of input is reached first. `None`
/// means the structure was not recognized and nothing past `start` may be
/// deleted.
pub fn locate_method_end<S: AsRef<str>>(lines: &[S], start: usize) -> Option<usize> {
    let mut cursor = ScanCursor {
        line: start,
        in_block_comment: false,
    };

    // Skip to the line that opens the body.
    while cursor.line < lines.len() && !lines[cursor.line].as_ref().contains('{') {
        cursor.line += 1;
    }

    let mut depth: i64 = 0;
    let mut opened = false;

    while cursor.line < lines.len() {
        let raw = lines[cursor.line].as_ref();
        let trimmed = raw.trim();

        if cursor.in_block_comment {
            if trimmed.contains("*/") {
                cursor.in_block_comment = false;
            }
            cursor.line += 1;
            continue;
        }

        if trimmed.starts_with("/*") {
            cursor.in_block_comment = !trimmed.contains("*/");
            cursor.line += 1;
            continue;
        }

        for ch in normalize_line(raw).chars() {
            match ch {
                '{' => {
                    depth += 1;
                    opened = true;
                }
                '}' => {
                    depth -= 1;
                    if opened && depth == 0 {
                        return Some(cursor.line + 1);
                    }
                }
                _ => {}
            }
        }
        cursor.line += 1;
    }

    None
}
