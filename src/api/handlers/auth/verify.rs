//! One-time-code verification endpoint.

use axum::{extract::Extension, Json};
use std::sync::Arc;

use crate::api::error::ApiError;

use super::state::AuthState;
use super::types::{VerifyRequest, VerifyResponse};

/// Consume the pending code for a device.
///
/// Success is single-use: the record is deleted, so replaying the same code
/// answers 401 with kind `no_pending_code`.
#[utoipa::path(
    post,
    path = "/api/auth/verify",
    request_body = VerifyRequest,
    responses(
        (status = 200, description = "Code accepted", body = VerifyResponse),
        (status = 400, description = "Missing payload"),
        (status = 401, description = "No pending, expired, or mismatched code")
    ),
    tag = "auth"
)]
pub async fn verify(
    Extension(auth): Extension<Arc<AuthState>>,
    payload: Option<Json<VerifyRequest>>,
) -> Result<Json<VerifyResponse>, ApiError> {
    let Some(Json(request)) = payload else {
        return Err(ApiError::Validation("Missing payload".to_string()));
    };

    auth.codes()
        .verify(&request.device_id, &request.code)
        .await?;

    Ok(Json(VerifyResponse { success: true }))
}

#[cfg(test)]
mod tests {
    use super::super::allowlist::DeviceAllowlist;
    use super::super::credentials::CredentialStore;
    use super::super::state::{AuthConfig, AuthState};
    use super::*;
    use crate::store::FileStore;
    use anyhow::Result;
    use axum::http::StatusCode;
    use axum::response::IntoResponse;
    use tempfile::TempDir;

    fn auth_state() -> (TempDir, Arc<AuthState>) {
        let dir = tempfile::tempdir().expect("tempdir");
        let state = Arc::new(AuthState::new(
            AuthConfig::new(),
            DeviceAllowlist::new(vec![]),
            CredentialStore::new(FileStore::new(dir.path())),
        ));
        (dir, state)
    }

    #[tokio::test]
    async fn verify_without_pending_code_is_unauthorized() {
        let (_dir, auth) = auth_state();
        let response = verify(
            Extension(auth),
            Some(Json(VerifyRequest {
                code: "123456".to_string(),
                device_id: "printer-a".to_string(),
            })),
        )
        .await
        .into_response();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn issued_code_verifies_exactly_once() -> Result<()> {
        let (_dir, auth) = auth_state();
        let code = auth.codes().issue("printer-a").await;

        let Json(response) = verify(
            Extension(Arc::clone(&auth)),
            Some(Json(VerifyRequest {
                code: code.to_string(),
                device_id: "printer-a".to_string(),
            })),
        )
        .await?;
        assert!(response.success);

        let replay = verify(
            Extension(auth),
            Some(Json(VerifyRequest {
                code: code.to_string(),
                device_id: "printer-a".to_string(),
            })),
        )
        .await
        .into_response();
        assert_eq!(replay.status(), StatusCode::UNAUTHORIZED);
        Ok(())
    }
}
