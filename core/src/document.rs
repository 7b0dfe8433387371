#![deny(missing_docs)]

//! # Source Documents
//!
//! A line-oriented view over a source file that remembers how every line
//! was terminated, so a rewrite only changes the lines it touches.

use std::fmt;

/// Line ending style detected in a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineEnding {
    /// Unix style `\n`.
    Lf,
    /// Windows style `\r\n`.
    CrLf,
}

impl LineEnding {
    /// Detects the style of `text`. Any `\r\n` makes the whole document CRLF.
    pub fn detect(text: &str) -> Self {
        if text.contains("\r\n") {
            LineEnding::CrLf
        } else {
            LineEnding::Lf
        }
    }

    /// The literal separator.
    pub fn as_str(&self) -> &'static str {
        match self {
            LineEnding::Lf => "\n",
            LineEnding::CrLf => "\r\n",
        }
    }

    /// Rewrites every `\n` / `\r\n` in `text` to this style.
    pub fn apply(&self, text: &str) -> String {
        text.split('\n')
            .map(|l| l.strip_suffix('\r').unwrap_or(l))
            .collect::<Vec<_>>()
            .join(self.as_str())
    }
}

impl fmt::Display for LineEnding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An ordered sequence of lines, each remembering its own terminator.
///
/// Serializing an unmodified document reproduces the input byte for byte,
/// mixed line endings included. A trailing line ending shows up as a final
/// empty line. The detected [`LineEnding`] is only used for new text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceDocument {
    lines: Vec<String>,
    // `None` only for the last line, which has no terminator.
    terminators: Vec<Option<LineEnding>>,
    ending: LineEnding,
}

impl SourceDocument {
    /// Splits `text` into lines, detecting its line ending.
    pub fn parse(text: &str) -> Self {
        let mut lines = Vec::new();
        let mut terminators = Vec::new();
        let mut rest = text;
        while let Some(idx) = rest.find('\n') {
            let line = &rest[..idx];
            match line.strip_suffix('\r') {
                Some(stripped) => {
                    lines.push(stripped.to_string());
                    terminators.push(Some(LineEnding::CrLf));
                }
                None => {
                    lines.push(line.to_string());
                    terminators.push(Some(LineEnding::Lf));
                }
            }
            rest = &rest[idx + 1..];
        }
        lines.push(rest.to_string());
        terminators.push(None);

        Self {
            lines,
            terminators,
            ending: LineEnding::detect(text),
        }
    }

    /// The document's lines, without terminators.
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// The detected line ending.
    pub fn ending(&self) -> LineEnding {
        self.ending
    }

    /// Keeps the lines for which `keep(index, line)` returns true.
    ///
    /// Kept lines keep their terminators. When the last line is dropped, the
    /// new last line loses its terminator, as if the text had been joined.
    pub fn retain_lines<F>(&mut self, mut keep: F)
    where
        F: FnMut(usize, &str) -> bool,
    {
        let mut lines = Vec::with_capacity(self.lines.len());
        let mut terminators = Vec::with_capacity(self.lines.len());
        let mut last_kept = true;
        for (idx, (line, term)) in self
            .lines
            .drain(..)
            .zip(self.terminators.drain(..))
            .enumerate()
        {
            last_kept = keep(idx, &line);
            if last_kept {
                lines.push(line);
                terminators.push(term);
            }
        }
        if !last_kept {
            if let Some(term) = terminators.last_mut() {
                *term = None;
            }
        }
        self.lines = lines;
        self.terminators = terminators;
    }

    /// Removes the line at `idx`.
    pub fn remove_line(&mut self, idx: usize) {
        self.retain_lines(|i, _| i != idx);
    }

    /// Joins the lines back together, each with its own terminator.
    pub fn to_text(&self) -> String {
        let mut text = String::new();
        for (line, term) in self.lines.iter().zip(&self.terminators) {
            text.push_str(line);
            if let Some(term) = term {
                text.push_str(term.as_str());
            }
        }
        text
    }
}
