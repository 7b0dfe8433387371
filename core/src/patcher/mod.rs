#![deny(missing_docs)]

//! # Code Patching
//!
//! Utilities for rewriting generated Java sources as plain text, without
//! building a syntax tree. Every operation locates a region, checks that it
//! has not already been transformed, replaces it, and leaves everything else
//! byte-identical (line endings included).
//!
//! - **scan**: Brace-depth scanning and line normalization.
//! - **methods**: Locating and deleting whole methods.
//! - **files**: Inserting imports, annotations and doc comments exactly once.
//! - **imports**: Pruning imports that became unused.
//! - **workflows**: Read-only recipes for the generated class family.

use std::fmt;

pub(crate) mod common;

/// Brace-depth scanning.
pub mod scan;

/// Method removal by annotation or signature.
pub mod methods;

/// Idempotent single insertions.
pub mod files;

/// Dead import pruning.
pub mod imports;

/// High-level read-only recipes.
pub mod workflows;

pub use files::{insert_once, insert_once_or_skip, Anchor, Placement};
pub use imports::prune_unused_imports;
pub use methods::{remove_method, MethodMatcher};
pub use scan::{locate_method_end, normalize_line, MethodSpan};
pub use workflows::{
    add_immutable_annotation, disable_integration_test, make_resource_read_only,
    make_service_read_only, mark_repository_read_only, RecipeReport,
};

/// What a single mutation did to a document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditOutcome {
    /// The document was changed.
    Applied,
    /// The witness was already present; nothing to do.
    SkippedAlreadyPresent,
    /// No anchor (or no matching target) exists in the document.
    SkippedNoAnchor,
    /// The mutation stopped early; the reason is attached.
    Failed(String),
}

impl EditOutcome {
    /// True when the document was changed.
    pub fn is_applied(&self) -> bool {
        matches!(self, EditOutcome::Applied)
    }
}

impl fmt::Display for EditOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EditOutcome::Applied => write!(f, "applied"),
            EditOutcome::SkippedAlreadyPresent => write!(f, "skipped (already present)"),
            EditOutcome::SkippedNoAnchor => write!(f, "skipped (no anchor)"),
            EditOutcome::Failed(reason) => write!(f, "failed: {}", reason),
        }
    }
}

/// The text produced by a mutation together with its outcome.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Patched {
    /// Resulting source text.
    pub source: String,
    /// What happened.
    pub outcome: EditOutcome,
}

impl Patched {
    pub(crate) fn new(source: impl Into<String>, outcome: EditOutcome) -> Self {
        Self {
            source: source.into(),
            outcome,
        }
    }
}
