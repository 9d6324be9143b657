use thiserror::Error;

/// Core error type shared across nextval crates.
#[derive(Debug, Error)]
pub enum Error {
    /// A callback with the same name is already installed in the pipeline.
    #[error("duplicate callback: {0}")]
    DuplicateCallback(String),
    /// A field setter rejected the value written to it.
    #[error("cannot set field {field}: {reason}")]
    SetField { field: String, reason: String },
    /// A type-erased entity did not match the expected entity type.
    #[error("entity is not an instance of {0}")]
    NotAnInstance(String),
    /// Catch-all error for host-layer failures.
    #[error("other error: {0}")]
    Other(String),
}

/// Convenience alias for results returned by nextval crates.
pub type Result<T> = std::result::Result<T, Error>;
