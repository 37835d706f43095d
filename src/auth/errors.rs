use thiserror::Error;

use super::repo::StoreError;

/// Failures of the identity core.
///
/// `InvalidCredentials` and `Unauthenticated` deliberately carry no detail: the
/// caller must not learn whether an email exists or why a token was refused.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("invalid credentials")]
    InvalidCredentials,

    #[error("invalid token")]
    InvalidToken,

    #[error("unauthenticated")]
    Unauthenticated,

    #[error("email already registered")]
    EmailTaken,

    #[error("user store unavailable: {0}")]
    Unavailable(#[source] StoreError),

    #[error("token signing failed: {0}")]
    Signing(#[from] jsonwebtoken::errors::Error),
}

impl From<StoreError> for AuthError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::Duplicate => AuthError::EmailTaken,
            other => AuthError::Unavailable(other),
        }
    }
}
