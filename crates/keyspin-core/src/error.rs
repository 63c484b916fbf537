use thiserror::Error;

/// Validation and contract errors exposed by `keyspin-core`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("identifier yields only {len} usable characters, need {min}")]
    KeyTooShort { len: usize, min: usize },
    #[error("identifier contains invalid character '{ch}' at index {index}")]
    KeyInvalidChar { ch: char, index: usize },

    #[error("provider id cannot be empty")]
    EmptyProviderId,
    #[error("provider endpoint must be an http(s) URL: '{value}'")]
    InvalidEndpoint { value: String },
    #[error("provider '{provider}' maps no label fields")]
    NoLabelFields { provider: String },
    #[error("duplicate provider id '{id}'")]
    DuplicateProviderId { id: String },
}

/// Top-level error type for core operations.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
