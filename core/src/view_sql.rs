#![deny(missing_docs)]

//! # View SQL Resolution
//!
//! Resolves the defining query of a database view from inline text or from a
//! file inside the project, strips an optional `CREATE [OR REPLACE] VIEW ... AS`
//! wrapper, and escapes the result for embedding in XML.

use crate::error::{AppError, AppResult};
use crate::store::FileStore;
use regex::Regex;
use std::path::{Component, Path, PathBuf};
use std::sync::OnceLock;

/// Where a view's SQL comes from.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewDefinition {
    /// View (table) name.
    pub name: String,
    /// Inline SQL, if any.
    pub inline_sql: Option<String>,
    /// SQL file path relative to the project root, if any.
    pub sql_file: Option<String>,
}

impl ViewDefinition {
    /// Resolves the raw SQL text: non-empty inline SQL first, then the SQL file.
    ///
    /// Returns `Ok(None)` when neither yields text (a missing file is only a
    /// warning). A file path that tries to leave the project root is a
    /// `Validation` error and nothing is read.
    pub fn resolve<S: FileStore + ?Sized>(&self, store: &S) -> AppResult<Option<String>> {
        if let Some(sql) = self.inline_sql.as_deref().map(str::trim) {
            if !sql.is_empty() {
                return Ok(Some(sql.to_string()));
            }
        }

        let Some(raw) = self.sql_file.as_deref() else {
            return Ok(None);
        };
        let relative = sandboxed_path(store.root(), raw)?;

        if !store.exists(&relative) {
            tracing::warn!("SQL file not found: {}", raw);
            return Ok(None);
        }
        store.read(&relative).map(Some)
    }

    /// Resolves the SQL and reduces it to the bare query.
    pub fn query<S: FileStore + ?Sized>(&self, store: &S) -> AppResult<Option<String>> {
        Ok(self
            .resolve(store)?
            .map(|sql| extract_select_statement(&sql))
            .filter(|sql| !sql.is_empty()))
    }
}

/// Validates `raw` and returns it normalized, relative to `root`.
///
/// Two independent checks, each a `Validation` error: the raw string must not
/// contain a `..` segment or be absolute, and the joined, lexically normalized
/// path must stay inside `root`.
pub fn sandboxed_path(root: &Path, raw: &str) -> AppResult<PathBuf> {
    let has_parent_segment = raw.split(['/', '\\']).any(|seg| seg == "..");
    if has_parent_segment || raw.starts_with('/') || raw.starts_with('\\') {
        tracing::error!("Invalid SQL file path (path traversal detected): {}", raw);
        return Err(AppError::Validation(format!(
            "path traversal detected in SQL file path: {}",
            raw
        )));
    }
    confine_to_root(root, Path::new(raw))
}

/// Joins `candidate` onto `root`, normalizes it lexically and rejects results outside `root`.
pub fn confine_to_root(root: &Path, candidate: &Path) -> AppResult<PathBuf> {
    let root = normalize(root);
    let joined = normalize(&root.join(candidate));
    match joined.strip_prefix(&root) {
        Ok(relative)
            if !relative.as_os_str().is_empty()
                && !relative.components().any(|c| c == Component::ParentDir) =>
        {
            Ok(relative.to_path_buf())
        }
        _ => {
            tracing::error!(
                "SQL file path is outside project directory: {}",
                candidate.display()
            );
            Err(AppError::Validation(format!(
                "path traversal: {} resolves outside the project root",
                candidate.display()
            )))
        }
    }
}

/// Lexical normalization: drops `.`, folds `..` into its parent.
fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                if !out.pop() {
                    out.push(component);
                }
            }
            other => out.push(other),
        }
    }
    out
}

/// Keeps only the body of a `CREATE [OR REPLACE] VIEW <name> AS <body>` statement.
///
/// The name may be schema-qualified and quoted with `"` or `` ` ``; keywords
/// are case-insensitive and the body may span lines. Text that does not match
/// is assumed to already be a bare query and is returned trimmed.
pub fn extract_select_statement(sql: &str) -> String {
    static CREATE_VIEW_RE: OnceLock<Regex> = OnceLock::new();
    let re = CREATE_VIEW_RE.get_or_init(|| {
        Regex::new(
            r#"(?is)CREATE\s+(?:OR\s+REPLACE\s+)?VIEW\s+(?:(?:\w+|"[^"]+"|`[^`]+`)\.)?(?:\w+|"[^"]+"|`[^`]+`)\s+AS\s+(.+)"#,
        )
        .expect("Invalid regex constant")
    });

    match re.captures(sql).and_then(|c| c.get(1)) {
        Some(body) => body.as_str().trim().to_string(),
        None => sql.trim().to_string(),
    }
}

/// Escapes the five reserved XML characters.
pub fn escape_xml(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            other => out.push(other),
        }
    }
    out
}
