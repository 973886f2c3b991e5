//! Request-boundary error taxonomy.
//!
//! Every failure a handler can surface is one of these variants; the
//! `IntoResponse` impl translates it to an HTTP status plus a JSON body of
//! the form `{"error": "...", "kind": "..."}`. Store read failures never
//! reach this type (they collapse to defaults inside the file store).

use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde_json::json;
use thiserror::Error;
use tracing::error;

use crate::api::handlers::auth::{CredentialError, VerifyError};

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    Validation(String),
    #[error("Order not found")]
    OrderNotFound,
    #[error("Invalid password")]
    InvalidPassword,
    #[error(transparent)]
    Verify(#[from] VerifyError),
    #[error(transparent)]
    Credential(#[from] CredentialError),
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl ApiError {
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Validation(_) | Self::Credential(CredentialError::EmptyPassword) => "validation",
            Self::OrderNotFound => "not_found",
            Self::InvalidPassword => "invalid_password",
            Self::Verify(VerifyError::NoPendingCode) => "no_pending_code",
            Self::Verify(VerifyError::Expired) => "code_expired",
            Self::Verify(VerifyError::Mismatch) => "code_mismatch",
            Self::Credential(CredentialError::LastCredential) => "last_credential",
            Self::Credential(CredentialError::Store(_)) | Self::Internal(_) => "internal",
        }
    }

    fn status(&self) -> StatusCode {
        match self {
            Self::Validation(_)
            | Self::Credential(CredentialError::EmptyPassword | CredentialError::LastCredential) => {
                StatusCode::BAD_REQUEST
            }
            Self::OrderNotFound => StatusCode::NOT_FOUND,
            Self::InvalidPassword | Self::Verify(_) => StatusCode::UNAUTHORIZED,
            Self::Credential(CredentialError::Store(_)) | Self::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if matches!(
            self,
            Self::Internal(_) | Self::Credential(CredentialError::Store(_))
        ) {
            error!("Request failed: {self:#}");
        }

        let body = Json(json!({
            "error": self.to_string(),
            "kind": self.kind(),
        }));
        (self.status(), body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn auth_failures_answer_401() {
        for err in [
            ApiError::InvalidPassword,
            ApiError::Verify(VerifyError::NoPendingCode),
            ApiError::Verify(VerifyError::Expired),
            ApiError::Verify(VerifyError::Mismatch),
        ] {
            assert_eq!(err.into_response().status(), StatusCode::UNAUTHORIZED);
        }
    }

    #[test]
    fn guarded_removal_answers_400() {
        let response = ApiError::Credential(CredentialError::LastCredential).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn missing_order_answers_404() {
        assert_eq!(
            ApiError::OrderNotFound.into_response().status(),
            StatusCode::NOT_FOUND
        );
    }

    #[test]
    fn save_failures_answer_500() {
        let err = ApiError::Internal(anyhow::anyhow!("disk full"));
        assert_eq!(
            err.into_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn kinds_are_stable() {
        assert_eq!(ApiError::Verify(VerifyError::Expired).kind(), "code_expired");
        assert_eq!(
            ApiError::Credential(CredentialError::LastCredential).kind(),
            "last_credential"
        );
        assert_eq!(ApiError::Validation("x".to_string()).kind(), "validation");
    }
}
