//! Error types for form schemas
//!
//! Rule failures are not errors: they are reported as data inside a
//! [`ValidationResult`](crate::engine::ValidationResult). Everything here is a
//! construction, loading or integration defect.

use thiserror::Error;

/// Result type for schema operations
pub type Result<T> = std::result::Result<T, SchemaError>;

/// Schema and form errors
#[derive(Error, Debug)]
pub enum SchemaError {
    #[error("Duplicate field in schema: {0}")]
    DuplicateField(String),

    #[error("Field {field} references undeclared field {other}")]
    UnknownFieldReference { field: String, other: String },

    #[error("Field {0} cannot be compared with itself")]
    SelfReference(String),

    #[error("Field not declared in schema: {0}")]
    UnknownField(String),

    #[error("Snapshot is missing declared fields: {}", .missing.join(", "))]
    IncompleteSnapshot { missing: Vec<String> },

    #[error("Invalid pattern {expression:?}: {source}")]
    InvalidPattern {
        expression: String,
        #[source]
        source: regex::Error,
    },

    #[error("Invalid schema format: {0}")]
    InvalidFormat(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("TOML serialization error: {0}")]
    TomlSer(#[from] toml::ser::Error),
}
