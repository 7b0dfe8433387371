#![deny(missing_docs)]

//! # Viewcraft Core
//!
//! Post-processing engine that turns generated CRUD sources for an entity
//! into a read-only, view-backed variant, by text-level structural editing.

/// Shared error types.
pub mod error;

/// Line-oriented documents with preserved line endings.
pub mod document;

/// Code patching utilities.
pub mod patcher;

/// Import usage analysis.
pub mod usage;

/// Idempotent manifest splicing.
pub mod manifest;

/// View SQL resolution.
pub mod view_sql;

/// Liquibase view changelogs.
pub mod changelog;

/// Entity records.
pub mod entity;

/// MyBatis model and mapper generation.
pub mod mybatis;

/// File primitives.
pub mod store;

/// Batch runner.
pub mod pipeline;

pub use document::{LineEnding, SourceDocument};
pub use entity::{EntityRecord, FieldRecord, MapperKind};
pub use error::{AppError, AppResult};
pub use manifest::{splice_fragment, ManifestFragment, SplicePlacement, TimestampGenerator};
pub use mybatis::MyBatisConfig;
pub use patcher::{
    insert_once, locate_method_end, prune_unused_imports, remove_method, EditOutcome,
    MethodMatcher, Patched,
};
pub use pipeline::{Diagnostic, Level, Pipeline, ProjectLayout, RunReport};
pub use store::{FileStore, ProjectFs};
pub use usage::{UsagePatternCache, UsagePatterns};
pub use view_sql::{escape_xml, extract_select_statement, ViewDefinition};
