//! Application-level errors.

use domain::error::DomainError;

pub type Result<T> = std::result::Result<T, IdentityError>;

/// Errors that can occur in the application layer.
#[derive(Debug, thiserror::Error)]
pub enum IdentityError {
    /// Invalid input, surfaced from domain validation.
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// A write collided with a store uniqueness constraint.
    #[error("duplicate value for unique field {field}")]
    DuplicateKey { field: &'static str },

    /// No record matched the given identifier.
    #[error("record not found")]
    NotFound,

    /// Credential check failed.
    ///
    /// Deliberately generic: an unknown identifier, an account without a
    /// usable password and a wrong password are indistinguishable here.
    #[error("invalid credentials")]
    AuthFailure,

    /// The store could not be reached in time.
    #[error("identity store unavailable")]
    Unavailable(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// Unexpected failure inside an adapter.
    #[error("internal error")]
    Internal(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl IdentityError {
    pub fn unavailable<E>(err: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Unavailable(Box::new(err))
    }
}

pub trait ToInternal<T> {
    fn catch(self) -> Result<T>;
}

impl<T, E> ToInternal<T> for std::result::Result<T, E>
where
    E: std::error::Error + Send + Sync + 'static,
{
    fn catch(self) -> Result<T> {
        self.map_err(|e| IdentityError::Internal(Box::new(e)))
    }
}
