use axum::{
    http::{header::WWW_AUTHENTICATE, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::{
    auth::{errors::AuthError, repo::StoreError},
    llm::LlmError,
};

/// Application-level error type.
/// Implements `IntoResponse` so handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("validation error: {0}")]
    Validation(String),

    #[error("not found: {0}")]
    NotFound(String),

    #[error("incorrect email or password")]
    InvalidCredentials,

    #[error("unauthenticated")]
    Unauthenticated,

    #[error("service unavailable: {0}")]
    Unavailable(String),

    #[error("bad upstream response: {0}")]
    BadGateway(String),

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl From<AuthError> for AppError {
    fn from(e: AuthError) -> Self {
        match e {
            AuthError::InvalidInput(msg) => AppError::Validation(msg),
            AuthError::EmailTaken => AppError::Validation("Email already registered".into()),
            AuthError::InvalidCredentials => AppError::InvalidCredentials,
            AuthError::InvalidToken | AuthError::Unauthenticated => AppError::Unauthenticated,
            AuthError::Unavailable(StoreError::Database(e)) => AppError::Database(e),
            AuthError::Unavailable(StoreError::Duplicate) => {
                AppError::Validation("Email already registered".into())
            }
            AuthError::Signing(e) => AppError::Internal(e.into()),
        }
    }
}

impl From<LlmError> for AppError {
    fn from(e: LlmError) -> Self {
        match e {
            LlmError::Parse(e) => AppError::BadGateway(e.to_string()),
            other => AppError::Unavailable(other.to_string()),
        }
    }
}

fn is_connectivity(e: &sqlx::Error) -> bool {
    matches!(
        e,
        sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed | sqlx::Error::Io(_) | sqlx::Error::Tls(_)
    )
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, detail) = match &self {
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg.clone()),
            AppError::InvalidCredentials => (
                StatusCode::UNAUTHORIZED,
                "Incorrect email or password".to_string(),
            ),
            AppError::Unauthenticated => (
                StatusCode::UNAUTHORIZED,
                "Could not validate credentials".to_string(),
            ),
            AppError::Unavailable(msg) => {
                tracing::error!("downstream unavailable: {msg}");
                (
                    StatusCode::SERVICE_UNAVAILABLE,
                    "Service temporarily unavailable".to_string(),
                )
            }
            AppError::BadGateway(msg) => {
                tracing::error!("malformed upstream response: {msg}");
                (
                    StatusCode::BAD_GATEWAY,
                    "Failed to parse the response from the AI model".to_string(),
                )
            }
            AppError::Database(e) if is_connectivity(e) => {
                tracing::error!("database unreachable: {e}");
                (
                    StatusCode::SERVICE_UNAVAILABLE,
                    "Service temporarily unavailable".to_string(),
                )
            }
            AppError::Database(e) => {
                tracing::error!("database error: {e}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "A database error occurred".to_string(),
                )
            }
            AppError::Internal(e) => {
                tracing::error!("internal error: {e:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "An internal server error occurred".to_string(),
                )
            }
        };

        let mut res = (status, Json(json!({ "detail": detail }))).into_response();
        if status == StatusCode::UNAUTHORIZED {
            res.headers_mut()
                .insert(WWW_AUTHENTICATE, HeaderValue::from_static("Bearer"));
        }
        res
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_failures_collapse_to_one_response() {
        let a = AppError::from(AuthError::InvalidToken).into_response();
        let b = AppError::from(AuthError::Unauthenticated).into_response();
        assert_eq!(a.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(b.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(a.headers().get(WWW_AUTHENTICATE).unwrap(), "Bearer");
    }

    #[test]
    fn status_mapping() {
        let cases = [
            (AppError::from(AuthError::InvalidInput("x".into())), StatusCode::BAD_REQUEST),
            (AppError::from(AuthError::EmailTaken), StatusCode::BAD_REQUEST),
            (AppError::from(AuthError::InvalidCredentials), StatusCode::UNAUTHORIZED),
            (
                AppError::from(AuthError::Unavailable(StoreError::Database(
                    sqlx::Error::PoolTimedOut,
                ))),
                StatusCode::SERVICE_UNAVAILABLE,
            ),
            (
                AppError::from(AuthError::Unavailable(StoreError::Database(
                    sqlx::Error::RowNotFound,
                ))),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
            (AppError::from(LlmError::NotConfigured), StatusCode::SERVICE_UNAVAILABLE),
            (AppError::from(LlmError::EmptyContent), StatusCode::SERVICE_UNAVAILABLE),
            (AppError::NotFound("Skill not found".into()), StatusCode::NOT_FOUND),
            (AppError::Database(sqlx::Error::RowNotFound), StatusCode::INTERNAL_SERVER_ERROR),
            (AppError::Database(sqlx::Error::PoolTimedOut), StatusCode::SERVICE_UNAVAILABLE),
        ];
        for (err, status) in cases {
            assert_eq!(err.into_response().status(), status);
        }
    }

    #[test]
    fn malformed_model_json_is_bad_gateway() {
        let parse_err = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
        let res = AppError::from(LlmError::Parse(parse_err)).into_response();
        assert_eq!(res.status(), StatusCode::BAD_GATEWAY);
    }
}
