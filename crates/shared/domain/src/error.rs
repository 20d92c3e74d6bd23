//! Domain-level errors.
//!
//! Raised by entity rules, the verification-code service and the query
//! builders. They carry no transport concerns; the `common` crate maps them
//! onto HTTP statuses.

use thiserror::Error;

/// Domain-specific errors for business rule violations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Malformed or missing input (bad query parameter, invalid body field)
    #[error("Validation error: {0}")]
    Validation(String),

    /// Password-related errors
    #[error("Password error: {0}")]
    Password(String),

    /// A verification or reset code is past its expiry
    #[error("{0} has expired")]
    Expired(String),

    /// Entity not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Entity already exists (conflict)
    #[error("{0} already exists")]
    Conflict(String),

    /// Missing or unusable credentials
    #[error("Unauthorized")]
    Unauthorized,

    /// Authenticated, but the role does not allow the action
    #[error("Forbidden")]
    Forbidden,

    /// Invalid credentials provided
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// Internal domain error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl DomainError {
    pub fn validation(msg: impl Into<String>) -> Self {
        DomainError::Validation(msg.into())
    }

    pub fn password(msg: impl Into<String>) -> Self {
        DomainError::Password(msg.into())
    }

    pub fn expired(what: impl Into<String>) -> Self {
        DomainError::Expired(what.into())
    }

    pub fn not_found(entity: impl Into<String>) -> Self {
        DomainError::NotFound(entity.into())
    }

    pub fn conflict(entity: impl Into<String>) -> Self {
        DomainError::Conflict(entity.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        DomainError::Internal(msg.into())
    }
}

/// Result type alias for domain operations
pub type DomainResult<T> = Result<T, DomainError>;
