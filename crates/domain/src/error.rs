//! Custom error handler for domain (core).

pub type Result<T> = std::result::Result<T, DomainError>;

/// Enum representing custom domain errors.
///
/// Every variant is an invalid-input condition: the offending value never
/// entered the system.
#[derive(Debug, thiserror::Error)]
pub enum DomainError {
    #[error("invalid email formatting")]
    InvalidEmailFormat,
    #[error("username must be between 1 and 80 bytes")]
    InvalidUsername,
    #[error("role name must be between 1 and 80 bytes")]
    InvalidRoleName,
    #[error("password must not be empty")]
    EmptyPassword,
    #[error("password hash is not in PHC format")]
    MalformedPasswordHash,

    #[error("validation failed on {field}: {message}")]
    ValidationFailed { field: String, message: String },
}
