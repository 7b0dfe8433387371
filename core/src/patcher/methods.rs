use crate::document::SourceDocument;
use crate::error::{AppError, AppResult};
use crate::patcher::common::DocCommentTracker;
use crate::patcher::scan::{locate_method_end, MethodSpan};
use crate::patcher::{EditOutcome, Patched};
use regex::Regex;
use std::fmt;

/// Identifies the first line of a method to remove.
#[derive(Debug, Clone)]
pub enum MethodMatcher {
    /// A line whose trimmed text starts with this annotation token (e.g. `@PostMapping`).
    Annotation(String),
    /// A line matching this signature pattern (e.g. `public\s+\S+\s+save\s*\(`).
    Signature(Regex),
}

impl MethodMatcher {
    /// Matches methods carrying `token` as a leading annotation.
    pub fn annotation(token: &str) -> Self {
        MethodMatcher::Annotation(token.to_string())
    }

    /// Matches methods whose declaration line matches `pattern`.
    pub fn signature(pattern: &str) -> AppResult<Self> {
        Regex::new(pattern)
            .map(MethodMatcher::Signature)
            .map_err(|e| AppError::General(format!("Invalid signature pattern: {}", e)))
    }

    fn matches(&self, line: &str) -> bool {
        match self {
            MethodMatcher::Annotation(token) => {
                let trimmed = line.trim_start();
                // `@Put` must not match `@PutMapping`.
                trimmed.strip_prefix(token.as_str()).is_some_and(|rest| {
                    !rest
                        .chars()
                        .next()
                        .is_some_and(|c| c.is_alphanumeric() || c == '_')
                })
            }
            MethodMatcher::Signature(re) => re.is_match(line),
        }
    }
}

impl fmt::Display for MethodMatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MethodMatcher::Annotation(token) => write!(f, "{}", token),
            MethodMatcher::Signature(re) => write!(f, "/{}/", re.as_str()),
        }
    }
}

/// Result of scanning a document for methods to remove.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodScan {
    /// Complete method spans, in document order.
    pub spans: Vec<MethodSpan>,
    /// Line of a matched method whose body never balanced. Scanning stopped there.
    pub malformed_at: Option<usize>,
}

/// Locates every method matched by `matcher`, ignoring lines inside doc comments.
pub fn locate_methods<S: AsRef<str>>(lines: &[S], matcher: &MethodMatcher) -> MethodScan {
    let mut spans = Vec::new();
    let mut docs = DocCommentTracker::default();
    let mut i = 0;

    while i < lines.len() {
        let line = lines[i].as_ref();
        if docs.observe(line) || !matcher.matches(line) {
            i += 1;
            continue;
        }

        match locate_method_end(lines, i) {
            Some(end) => {
                spans.push(MethodSpan { start: i, end });
                i = end;
            }
            None => {
                return MethodScan {
                    spans,
                    malformed_at: Some(i),
                }
            }
        }
    }

    MethodScan {
        spans,
        malformed_at: None,
    }
}

/// Removes every method matched by `matcher` from `source`.
///
/// Doc comments are copied verbatim and never matched, so annotation names in
/// documentation prose are ignored. When a matched method never balances, the
/// rest of the file is kept unchanged and the outcome is `Failed`; methods
/// removed before that point stay removed.
pub fn remove_method(source: &str, matcher: &MethodMatcher) -> Patched {
    let mut doc = SourceDocument::parse(source);
    let scan = locate_methods(doc.lines(), matcher);

    if scan.spans.is_empty() && scan.malformed_at.is_none() {
        return Patched::new(source, EditOutcome::SkippedNoAnchor);
    }

    for span in &scan.spans {
        tracing::debug!(
            "Removed method matching {} (lines {}-{}, {} lines)",
            matcher,
            span.start + 1,
            span.end,
            span.end - span.start
        );
    }
    doc.retain_lines(|idx, _| {
        !scan
            .spans
            .iter()
            .any(|span| span.start <= idx && idx < span.end)
    });

    let outcome = match scan.malformed_at {
        Some(line) => EditOutcome::Failed(
            AppError::Malformed(format!(
                "unbalanced braces after {} at line {}; remainder left untouched",
                matcher,
                line + 1
            ))
            .to_string(),
        ),
        None => EditOutcome::Applied,
    };
    Patched::new(doc.to_text(), outcome)
}
