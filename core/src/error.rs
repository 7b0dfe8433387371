//! # Error Handling
//!
//! Provides the unified `AppError` enum used across the workspace.
//!
//! The variants mirror how a failure is recovered: a `Validation` error is
//! fatal to one entity's processing, `NotFound` and `Malformed` skip a single
//! mutation, and `Io` skips a single file. None of them abort a batch run.

use derive_more::{Display, From};

/// The Global Error Enum.
///
/// We use `derive_more` for boilerplate.
/// Note: String errors default to `General`.
#[derive(Debug, Display, From)]
pub enum AppError {
    /// Wrapper for standard IO errors.
    #[display("IO Error: {_0}")]
    Io(std::io::Error),

    /// Wrapper for JSON (de)serialization errors (entity records, `.yo-rc.json`).
    #[display("JSON Error: {_0}")]
    Json(serde_json::Error),

    /// A disallowed input, e.g. a SQL file path escaping the project root.
    #[from(ignore)]
    #[display("Validation Error: {_0}")]
    Validation(String),

    /// An expected anchor, file or import is absent.
    #[from(ignore)]
    #[display("Not Found: {_0}")]
    NotFound(String),

    /// Input that does not follow the expected conventions (e.g. unbalanced braces).
    /// Reported as the reason of a failed edit; the rest of the file is kept.
    #[from(ignore)]
    #[display("Malformed Input: {_0}")]
    Malformed(String),

    /// Generic errors.
    #[display("General Error: {_0}")]
    General(String),
}

/// Manual implementation of the standard Error trait.
impl std::error::Error for AppError {}

/// Helper type alias for Result using AppError.
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Error, ErrorKind};

    #[test]
    fn test_io_conversion() {
        let io_err = Error::new(ErrorKind::Other, "test");
        let app_err: AppError = io_err.into();
        assert!(matches!(app_err, AppError::Io(_)));
    }

    #[test]
    fn test_string_conversion() {
        // String must land in General, never in the recovery-specific variants
        let msg = String::from("something wrong");
        let app_err: AppError = msg.into();
        match app_err {
            AppError::General(s) => assert_eq!(s, "something wrong"),
            _ => panic!("String should convert to AppError::General"),
        }
    }

    #[test]
    fn test_validation_display() {
        let app_err = AppError::Validation("path traversal: ../x.sql".into());
        assert_eq!(
            format!("{}", app_err),
            "Validation Error: path traversal: ../x.sql"
        );
    }
}
