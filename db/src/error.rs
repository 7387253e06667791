//! Error types for spec database operations.
//!
//! Provides a unified error type covering all failure modes: I/O,
//! serialization, spec structure checks and bundle hash verification.

use request_schema_core::SpecError;
use thiserror::Error;

/// Errors that can occur during database operations.
#[derive(Debug, Error)]
pub enum DatabaseError {
    /// File I/O failure.
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// JSON parsing or serialization failure.
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// YAML parsing or serialization failure.
    #[error("YAML error: {0}")]
    YamlError(#[from] serde_yaml::Error),

    /// A loaded spec or package failed its structural checks.
    #[error("invalid spec '{name}': {}", first_problem(.problems))]
    InvalidSpec {
        /// Spec or package name.
        name: String,
        /// Every problem found.
        problems: Vec<SpecError>,
    },

    /// Bundle hash mismatch between recorded and computed values.
    #[error("invalid checksum: {0}")]
    InvalidChecksum(String),

    /// File extension is not one of `json`, `yaml`, `yml`.
    #[error("unsupported spec file format: {0}")]
    UnsupportedFormat(String),

    /// All configured loader sources failed.
    #[error("no spec sources available")]
    NoSourcesAvailable,
}

fn first_problem(problems: &[SpecError]) -> String {
    match problems {
        [] => "no details".to_string(),
        [only] => only.to_string(),
        [first, rest @ ..] => format!("{first} (and {} more)", rest.len()),
    }
}

/// Convenience alias for results with [`DatabaseError`].
pub type Result<T> = std::result::Result<T, DatabaseError>;
