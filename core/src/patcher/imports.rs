use crate::document::SourceDocument;
use crate::patcher::{EditOutcome, Patched};
use crate::usage::UsagePatternCache;
use regex::Regex;
use std::sync::OnceLock;

/// Simple class name of an import statement (`import a.b.HeaderUtil;` -> `HeaderUtil`).
fn imported_class_name(import_line: &str) -> Option<&str> {
    static CLASS_RE: OnceLock<Regex> = OnceLock::new();
    let re = CLASS_RE
        .get_or_init(|| Regex::new(r"\.([A-Za-z]+);$").expect("Invalid regex constant"));
    re.captures(import_line.trim())
        .and_then(|c| c.get(1))
        .map(|m| m.as_str())
}

/// Removes each candidate import that is no longer referenced.
///
/// A candidate is tested against the document with that one import line
/// removed, so its own line never counts as a use. Candidates are independent
/// of each other; candidates absent from the document are ignored.
pub fn prune_unused_imports(
    source: &str,
    candidates: &[&str],
    cache: &mut UsagePatternCache,
) -> Patched {
    let mut doc = SourceDocument::parse(source);
    let mut removed = 0;

    for candidate in candidates {
        let candidate = candidate.trim();
        let Some(class_name) = imported_class_name(candidate) else {
            continue;
        };
        let Some(idx) = doc.lines().iter().position(|l| l.trim() == candidate) else {
            continue;
        };

        let without = doc
            .lines()
            .iter()
            .enumerate()
            .filter(|(i, _)| *i != idx)
            .map(|(_, l)| l.as_str())
            .collect::<Vec<_>>()
            .join("\n");

        if !cache.patterns(class_name).is_used_in(&without) {
            tracing::debug!("Removed unused import: {}", class_name);
            doc.remove_line(idx);
            removed += 1;
        }
    }

    if removed == 0 {
        return Patched::new(source, EditOutcome::SkippedNoAnchor);
    }
    Patched::new(doc.to_text(), EditOutcome::Applied)
}
