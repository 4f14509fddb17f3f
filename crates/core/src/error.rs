//! Errors raised by the domain building blocks.

use thiserror::Error;

pub type DomainResult<T> = Result<T, DomainError>;

/// Misuse of a building block, or input it can not accept.
///
/// Storage failures are [`PersistenceError`](crate::persistence::PersistenceError)s;
/// a `DomainError` crossing the persistence boundary is wrapped, not converted.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Input rejected, e.g. an aggregate without an identifier.
    #[error("validation failed: {0}")]
    Validation(String),

    /// An identifier could not be parsed.
    #[error("invalid identifier: {0}")]
    InvalidId(String),

    #[error("missing argument: {0}")]
    MissingArgument(&'static str),

    /// An offset or capacity does not fit.
    #[error("out of range: {0}")]
    OutOfRange(String),

    /// The operation is not allowed right now (e.g. join records are being
    /// enumerated).
    #[error("invalid state: {0}")]
    InvalidState(String),
}

impl DomainError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn invalid_id(msg: impl Into<String>) -> Self {
        Self::InvalidId(msg.into())
    }

    pub fn missing_argument(name: &'static str) -> Self {
        Self::MissingArgument(name)
    }

    pub fn out_of_range(msg: impl Into<String>) -> Self {
        Self::OutOfRange(msg.into())
    }

    pub fn invalid_state(msg: impl Into<String>) -> Self {
        Self::InvalidState(msg.into())
    }
}
