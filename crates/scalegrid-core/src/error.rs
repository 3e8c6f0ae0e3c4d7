//! Error taxonomy shared by every scaler adapter.

use thiserror::Error;

/// Result type alias for scaler operations.
pub type ScalerResult<T> = Result<T, ScalerError>;

/// Errors surfaced while resolving adapter configuration.
///
/// Always returned synchronously at construction time; an adapter is never
/// created from configuration that fails to resolve, so no poll ever runs
/// against a partially-initialized descriptor.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("missing required metadata key: {0}")]
    MissingField(&'static str),

    #[error("invalid value for {field}: {cause}")]
    InvalidValue { field: &'static str, cause: String },
}

/// Errors surfaced by a single poll against the backing data source.
///
/// One poll is one attempt: adapters never retry internally and never
/// downgrade a failure to a default value. The cause string names the step
/// that failed so the host can log it meaningfully.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ProbeError {
    /// Building the connection target, connecting, or the liveness check failed.
    #[error("connection failed: {0}")]
    ConnectionFailed(String),

    /// Query execution, row scan, or result iteration failed.
    #[error("query failed: {0}")]
    QueryFailed(String),

    /// The caller's context was cancelled before or during the poll.
    #[error("poll cancelled")]
    Cancelled,
}

/// Any error an adapter hands back to the host controller.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ScalerError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Probe(#[from] ProbeError),
}
