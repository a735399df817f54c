use thiserror::Error;

/// Errors from message store operations (used by the `MessageStore` port in parley-core).
///
/// Every failure of the durable log is one of these two kinds. Callers must
/// not assume partial success on either.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("chat history read failed: {0}")]
    ReadFailed(String),

    #[error("chat history write failed: {0}")]
    WriteFailed(String),
}

/// Errors raised while resolving configuration at startup.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable {0}")]
    MissingEnv(String),

    #[error("invalid configuration: {0}")]
    Invalid(String),
}
