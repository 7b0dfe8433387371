use crate::document::LineEnding;
use crate::error::{AppError, AppResult};
use crate::patcher::common::{indent_block, indentation, line_end, line_start};
use crate::patcher::{EditOutcome, Patched};
use regex::Regex;

/// Where an insertion goes relative to its anchor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement {
    /// On new lines before the line where the anchor match starts.
    Before,
    /// On new lines after the line where the anchor match ends.
    After,
    /// On new lines after the line where the anchor match starts
    /// (e.g. right below the `/**` of a matched doc comment).
    AfterStartLine,
}

/// A recognizable location used as an insertion point.
#[derive(Debug, Clone)]
pub struct Anchor {
    pattern: Regex,
    placement: Placement,
}

impl Anchor {
    /// Creates an anchor from a regex pattern.
    pub fn new(pattern: &str, placement: Placement) -> AppResult<Self> {
        let pattern = Regex::new(pattern)
            .map_err(|e| AppError::General(format!("Invalid anchor pattern: {}", e)))?;
        Ok(Self { pattern, placement })
    }

    /// Anchor inserting before the matched line.
    pub fn before(pattern: &str) -> AppResult<Self> {
        Self::new(pattern, Placement::Before)
    }

    /// Anchor inserting after the matched line.
    pub fn after(pattern: &str) -> AppResult<Self> {
        Self::new(pattern, Placement::After)
    }

    /// True when the anchor occurs in `source`.
    pub fn is_present(&self, source: &str) -> bool {
        self.pattern.is_match(source)
    }

    /// Byte offset at which an insertion belongs, plus the indentation of the anchor line.
    fn insertion_point<'a>(&self, source: &'a str) -> Option<(usize, &'a str)> {
        let m = self.pattern.find(source)?;
        // Patterns like `^\s*@Entity` may start on a preceding blank line.
        let matched = m.as_str();
        let skipped = matched.len() - matched.trim_start().len();
        let anchor_start = if skipped < matched.len() {
            m.start() + skipped
        } else {
            m.start()
        };
        let anchor_line_start = line_start(source, anchor_start);
        let indent = indentation(&source[anchor_line_start..]);
        let pos = match self.placement {
            Placement::Before => anchor_line_start,
            Placement::After => {
                // A match may swallow its own line terminator.
                let last = if m.end() > m.start() {
                    m.end() - 1
                } else {
                    m.start()
                };
                line_end(source, last)
            }
            Placement::AfterStartLine => line_end(source, anchor_start),
        };
        Some((pos, indent))
    }
}

/// Inserts `insertion` exactly once.
///
/// Does nothing (`SkippedAlreadyPresent`) when `witness` already occurs in
/// `source`. Otherwise the first anchor present decides the position; the
/// insertion is indented like the anchor line and uses the document's line
/// ending. Returns `AppError::NotFound` when no anchor is present, leaving the
/// choice of silent skip or hard failure to the caller.
pub fn insert_once(
    source: &str,
    witness: &str,
    anchors: &[Anchor],
    insertion: &str,
) -> AppResult<Patched> {
    if source.contains(witness) {
        return Ok(Patched::new(source, EditOutcome::SkippedAlreadyPresent));
    }

    let ending = LineEnding::detect(source);

    let (pos, indent) = anchors
        .iter()
        .find_map(|a| a.insertion_point(source))
        .ok_or_else(|| {
            AppError::NotFound(format!("no suitable anchor to insert '{}'", witness))
        })?;

    let block = ending.apply(&indent_block(insertion, indent));
    let mut patch = String::with_capacity(block.len() + 4);
    if pos == source.len() && !source.is_empty() && !source.ends_with('\n') {
        patch.push_str(ending.as_str());
    }
    patch.push_str(&block);
    patch.push_str(ending.as_str());

    let mut new_source = source.to_string();
    new_source.insert_str(pos, &patch);
    Ok(Patched::new(new_source, EditOutcome::Applied))
}

/// Like [`insert_once`], but a missing anchor yields `SkippedNoAnchor` instead of an error.
pub fn insert_once_or_skip(
    source: &str,
    witness: &str,
    anchors: &[Anchor],
    insertion: &str,
) -> AppResult<Patched> {
    match insert_once(source, witness, anchors, insertion) {
        Err(AppError::NotFound(reason)) => {
            tracing::debug!("{}", reason);
            Ok(Patched::new(source, EditOutcome::SkippedNoAnchor))
        }
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_insert_before_keeps_indentation() {
        let code = "package a;\n\n    @Entity\n    class A {}\n";
        let anchors = [Anchor::before(r"(?m)^\s*@Entity\b").unwrap()];
        let res = insert_once(code, "@Immutable", &anchors, "@Immutable").unwrap();
        assert_eq!(res.outcome, EditOutcome::Applied);
        assert_eq!(
            res.source,
            "package a;\n\n    @Immutable\n    @Entity\n    class A {}\n"
        );
    }

    #[test]
    fn test_insert_after_with_fallback_anchor() {
        let code = "import jakarta.persistence.*;\nimport java.io.Serializable;\n";
        let anchors = [
            Anchor::before(r"(?m)^import org\.hibernate\.annotations\.[^;]+;").unwrap(),
            Anchor::after(r"(?m)^import jakarta\.persistence\.\*;").unwrap(),
        ];
        let stmt = "import org.hibernate.annotations.Immutable;";
        let res = insert_once(code, stmt, &anchors, stmt).unwrap();
        assert_eq!(
            res.source,
            "import jakarta.persistence.*;\nimport org.hibernate.annotations.Immutable;\nimport java.io.Serializable;\n"
        );
    }

    #[test]
    fn test_insert_is_idempotent() {
        let code = "@Entity\nclass A {}\n";
        let anchors = [Anchor::before(r"@Entity").unwrap()];
        let once = insert_once(code, "@Immutable", &anchors, "@Immutable").unwrap();
        let twice = insert_once(&once.source, "@Immutable", &anchors, "@Immutable").unwrap();
        assert_eq!(twice.outcome, EditOutcome::SkippedAlreadyPresent);
        assert_eq!(twice.source, once.source);
    }

    #[test]
    fn test_multiline_insertion_uses_crlf() {
        let code = "public interface FooRepository {\r\n}\r\n";
        let anchors = [Anchor::before(r"public interface \w+Repository").unwrap()];
        let res = insert_once(code, "Read-only", &anchors, "/**\n * Read-only\n */").unwrap();
        assert_eq!(
            res.source,
            "/**\r\n * Read-only\r\n */\r\npublic interface FooRepository {\r\n}\r\n"
        );
    }

    #[test]
    fn test_after_match_consuming_newline() {
        let code = "@IntegrationTest\n@AutoConfigureMockMvc\nclass FooIT {}";
        let anchors = [Anchor::after(r"@IntegrationTest\s*[\r\n]+").unwrap()];
        let res = insert_once(code, "@Disabled", &anchors, "@Disabled").unwrap();
        assert_eq!(
            res.source,
            "@IntegrationTest\n@Disabled\n@AutoConfigureMockMvc\nclass FooIT {}"
        );
    }

    #[test]
    fn test_after_start_line_of_multiline_match() {
        let code = "/**\n * Integration tests for Foo.\n */\nclass FooIT {}\n";
        let anchors = [Anchor::new(
            r"(?i)/\*\*\s*[\r\n]+\s*\*\s*Integration tests? for",
            Placement::AfterStartLine,
        )
        .unwrap()];
        let res = insert_once(code, "disabled", &anchors, " * disabled.\n *").unwrap();
        assert_eq!(
            res.source,
            "/**\n * disabled.\n *\n * Integration tests for Foo.\n */\nclass FooIT {}\n"
        );
    }

    #[test]
    fn test_after_last_line_without_newline() {
        let code = "package a;";
        let anchors = [Anchor::after(r"package a;").unwrap()];
        let res = insert_once(code, "import b;", &anchors, "import b;").unwrap();
        assert_eq!(res.source, "package a;\nimport b;\n");
    }

    #[test]
    fn test_missing_anchor_is_error_or_skip() {
        let code = "class A {}";
        let anchors = [Anchor::before(r"@Entity").unwrap()];
        let err = insert_once(code, "@Immutable", &anchors, "@Immutable").unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));

        let res = insert_once_or_skip(code, "@Immutable", &anchors, "@Immutable").unwrap();
        assert_eq!(res.outcome, EditOutcome::SkippedNoAnchor);
        assert_eq!(res.source, code);
    }
}
