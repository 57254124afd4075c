//! Error types for storage access and preference input.
//!
//! ERROR HANDLING
//! ==============
//! `StorageError` never escapes the store: durable writes are best-effort and
//! failures are logged and dropped. `PreferenceError` is only returned from
//! the string-keyed API and config parsing, where the caller supplied input.

#[cfg(test)]
#[path = "error_test.rs"]
mod error_test;

/// Failures from the durable key-value storage backend.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StorageError {
    /// Storage is disabled or missing (private browsing, blocked by policy).
    #[error("storage unavailable")]
    Unavailable,

    /// A read call was rejected by the backend.
    #[error("storage read failed: {0}")]
    Read(String),

    /// A write or remove call was rejected (e.g. quota exceeded).
    #[error("storage write failed: {0}")]
    Write(String),
}

/// Errors from caller-supplied preference input.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PreferenceError {
    /// The field name is not one the store knows.
    #[error("unknown preference field: {0}")]
    UnknownField(String),

    /// The value is outside the field's domain.
    #[error("invalid value '{value}' for preference '{field}'")]
    InvalidValue { field: &'static str, value: String },

    /// A store configuration could not be parsed or is inconsistent.
    #[error("config parse failed: {0}")]
    Config(String),
}
