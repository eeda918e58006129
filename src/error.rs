//! Error type shared by the simulation and the plan loader

use thiserror::Error;

/// Errors raised by the simulation core and its loaders
#[derive(Debug, Error)]
pub enum Error {
    /// A value failed a shape precondition (negative size, non-finite
    /// coordinate, unknown touch tag). Programmer error, never retried.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// The level plan document could not be decoded
    #[error("malformed level plans: {0}")]
    Json(#[from] serde_json::Error),

    /// The level plan file could not be read
    #[error("failed to read level plans: {0}")]
    Io(#[from] std::io::Error),

    /// The plan document decoded to zero levels
    #[error("level plan list is empty")]
    EmptyPlan,
}

impl Error {
    pub(crate) fn invalid(msg: impl Into<String>) -> Self {
        Error::InvalidArgument(msg.into())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
