#![deny(missing_docs)]

//! # Manifest Splicing
//!
//! Registers generated artifacts in aggregating files (the Liquibase master
//! changelog, `application.yml`) exactly once. A fragment is inserted right
//! before a marker line, which stays in place for the next fragment; when no
//! marker exists the fragment is appended at end of file.

use crate::document::{LineEnding, SourceDocument};
use crate::patcher::{EditOutcome, Patched};
use chrono::{Local, NaiveDateTime, TimeDelta};
use regex::Regex;

/// Closing tag of a Liquibase master changelog.
pub const MASTER_CHANGELOG_ANCHOR: &str = "</databaseChangeLog>";

/// Generator needles marking where extra `application.yml` content belongs, in order of preference.
pub const APPLICATION_YAML_NEEDLES: &[&str] = &[
    "# jhipster-needle-application-properties",
    "# jhipster-needle-add-application-yaml-document",
];

/// A self-contained unit of text plus the exact substring that proves it was already inserted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManifestFragment {
    text: String,
    witness: String,
}

impl ManifestFragment {
    /// Creates a fragment. `text` uses `\n` separators; it is converted to the manifest's style.
    pub fn new(text: impl Into<String>, witness: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            witness: witness.into(),
        }
    }

    /// The fragment text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// The idempotency witness.
    pub fn witness(&self) -> &str {
        &self.witness
    }
}

/// Where a fragment landed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SplicePlacement {
    /// Before the line holding this anchor.
    BeforeAnchor(String),
    /// Appended; no anchor was found.
    EndOfFile,
}

/// Result of a splice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Spliced {
    /// Resulting text and outcome.
    pub patched: Patched,
    /// Insertion point, when something was inserted.
    pub placement: Option<SplicePlacement>,
}

/// Inserts `fragment` into `manifest` once.
///
/// The first of `anchors` present wins; the fragment goes on new lines before
/// the anchor's line so the most recently added fragment ends up closest to
/// the anchor. Without any anchor the fragment is appended at end of file and
/// a warning is logged.
pub fn splice_fragment(manifest: &str, fragment: &ManifestFragment, anchors: &[&str]) -> Spliced {
    if manifest.contains(fragment.witness()) {
        return Spliced {
            patched: Patched::new(manifest, EditOutcome::SkippedAlreadyPresent),
            placement: None,
        };
    }

    let ending = LineEnding::detect(manifest);
    let block = ending.apply(fragment.text());

    for anchor in anchors {
        if let Some(pos) = manifest.find(anchor) {
            let line_start = manifest[..pos].rfind('\n').map(|i| i + 1).unwrap_or(0);
            let mut new_manifest = String::with_capacity(manifest.len() + block.len() + 2);
            new_manifest.push_str(&manifest[..line_start]);
            new_manifest.push_str(&block);
            new_manifest.push_str(ending.as_str());
            new_manifest.push_str(&manifest[line_start..]);
            return Spliced {
                patched: Patched::new(new_manifest, EditOutcome::Applied),
                placement: Some(SplicePlacement::BeforeAnchor(anchor.to_string())),
            };
        }
    }

    tracing::warn!(
        "No anchor ({}) found; appending fragment at end of file",
        anchors.join(", ")
    );
    let mut new_manifest = manifest.to_string();
    if !new_manifest.is_empty() && !new_manifest.ends_with('\n') {
        new_manifest.push_str(ending.as_str());
    }
    new_manifest.push_str(block.trim_end_matches(['\r', '\n']));
    new_manifest.push_str(ending.as_str());
    Spliced {
        patched: Patched::new(new_manifest, EditOutcome::Applied),
        placement: Some(SplicePlacement::EndOfFile),
    }
}

/// Builds the master changelog include fragment for `changelog_file`.
pub fn changelog_include(changelog_file: &str) -> ManifestFragment {
    ManifestFragment::new(
        format!(
            "    <include file=\"config/liquibase/changelog/{}\" relativeToChangelogFile=\"false\"/>",
            changelog_file
        ),
        format!("\"config/liquibase/changelog/{}\"", changelog_file),
    )
}

/// Removes includes of the generator's table-definition changelogs for `entity_class`.
///
/// Matches `<14 digits>_added_entity_<Class>.xml` and
/// `<14 digits>_added_entity_constraints_<Class>.xml`.
pub fn remove_table_includes(manifest: &str, entity_class: &str) -> Patched {
    let pattern = format!(
        r#"^\s*<include\s+file="config/liquibase/changelog/\d{{14}}_added_entity_(?:constraints_)?{}\.xml"[^>]*/?>\s*$"#,
        regex::escape(entity_class)
    );
    let re = Regex::new(&pattern).expect("escaped class name yields a valid pattern");

    let mut doc = SourceDocument::parse(manifest);
    let before = doc.lines().len();
    doc.retain_lines(|_, l| !re.is_match(l));

    let removed = before - doc.lines().len();
    if removed == 0 {
        return Patched::new(manifest, EditOutcome::SkippedNoAnchor);
    }
    tracing::debug!(
        "Removed {} table changelog include(s) for {}",
        removed,
        entity_class
    );
    Patched::new(doc.to_text(), EditOutcome::Applied)
}

/// Splices a top-level YAML block into a configuration file.
///
/// The presence of `top_level_key` at column zero makes this a no-op. The
/// block is followed by a blank line when placed before a needle.
pub fn splice_yaml_block(config: &str, top_level_key: &str, block: &str) -> Spliced {
    let key_re = Regex::new(&format!(r"(?m)^{}\s*:", regex::escape(top_level_key)))
        .expect("escaped key yields a valid pattern");
    if key_re.is_match(config) {
        tracing::debug!("'{}' configuration already present", top_level_key);
        return Spliced {
            patched: Patched::new(config, EditOutcome::SkippedAlreadyPresent),
            placement: None,
        };
    }

    let fragment = ManifestFragment::new(format!("{}\n", block.trim_end()), block.trim_end());
    splice_fragment(config, &fragment, APPLICATION_YAML_NEEDLES)
}

/// Produces unique, lexicographically ordered changelog timestamps.
///
/// Format: `YYYYMMDDhhmmss` followed by a three-digit per-run counter, so
/// several entries created within the same second stay distinct and ordered.
/// Every thousand entries carry into the seconds, so a stamp is always 17
/// digits.
#[derive(Debug, Default)]
pub struct TimestampGenerator {
    counter: u32,
}

impl TimestampGenerator {
    /// Creates a generator with the counter at zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Next timestamp from the local wall clock.
    pub fn next_timestamp(&mut self) -> String {
        self.next_at(Local::now().naive_local())
    }

    /// Next timestamp for an explicit instant.
    pub fn next_at(&mut self, at: NaiveDateTime) -> String {
        let carried = at + TimeDelta::seconds(i64::from(self.counter / 1000));
        let stamp = format!(
            "{}{:03}",
            carried.format("%Y%m%d%H%M%S"),
            self.counter % 1000
        );
        self.counter += 1;
        stamp
    }
}
