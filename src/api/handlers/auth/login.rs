//! Password login endpoint.

use axum::{extract::Extension, Json};
use std::sync::Arc;
use tracing::debug;

use crate::api::error::ApiError;
use crate::api::notify::{self, Notification, NotificationSink};

use super::state::AuthState;
use super::types::{LoginRequest, LoginResponse};

/// Check the password and decide whether a second factor is required.
///
/// Trusted devices (identifier prefix on the allowlist) are granted access
/// immediately; everyone else gets a one-time code delivered through the
/// notification sink and must call the verify endpoint with it.
#[utoipa::path(
    post,
    path = "/api/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Password accepted", body = LoginResponse),
        (status = 400, description = "Missing payload"),
        (status = 401, description = "Invalid password")
    ),
    tag = "auth"
)]
pub async fn login(
    Extension(auth): Extension<Arc<AuthState>>,
    Extension(notifier): Extension<Arc<dyn NotificationSink>>,
    payload: Option<Json<LoginRequest>>,
) -> Result<Json<LoginResponse>, ApiError> {
    let Some(Json(request)) = payload else {
        return Err(ApiError::Validation("Missing payload".to_string()));
    };

    if !auth.credentials().contains(&request.password).await {
        return Err(ApiError::InvalidPassword);
    }

    if auth.allowlist().contains(&request.device_id) {
        debug!(device_id = %request.device_id, "Trusted device, skipping second factor");
        return Ok(Json(LoginResponse {
            success: true,
            require_2fa: false,
        }));
    }

    let code = auth.codes().issue(&request.device_id).await;
    notify::dispatch(
        &notifier,
        Notification::new(
            "Printdesk login code",
            format!("Login code {code} for device {}", request.device_id),
        ),
    );

    Ok(Json(LoginResponse {
        success: true,
        require_2fa: true,
    }))
}
