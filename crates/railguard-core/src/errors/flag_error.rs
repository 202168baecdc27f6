//! Feature flag errors.

/// Errors that can occur in the feature-flag store.
#[derive(Debug, thiserror::Error)]
pub enum FlagError {
    #[error("Unknown feature flag: {name}")]
    UnknownFlag { name: String },

    #[error("Failed to parse flag file {path}: {message}")]
    ParseError { path: String, message: String },

    #[error("Flag file I/O error: {0}")]
    Io(#[from] std::io::Error),
}
