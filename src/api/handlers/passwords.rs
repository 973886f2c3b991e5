//! Admin credential endpoints.
//!
//! These sit under `/api/admin` and manage the password list the login flow
//! checks against. Removal of the sole remaining password is refused so the
//! admins can always still log in.

use axum::{
    extract::{Extension, Path},
    Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::ToSchema;

use crate::api::error::ApiError;

use super::auth::AuthState;

#[derive(ToSchema, Serialize, Deserialize, Debug)]
pub struct AddPasswordRequest {
    #[serde(default)]
    pub password: String,
}

/// List the configured admin passwords.
#[utoipa::path(
    get,
    path = "/api/admin/passwords",
    responses((status = 200, description = "Password list", body = [String])),
    tag = "admin"
)]
pub async fn list_passwords(Extension(auth): Extension<Arc<AuthState>>) -> Json<Vec<String>> {
    Json(auth.credentials().passwords().await)
}

/// Add a password and return the updated list.
#[utoipa::path(
    post,
    path = "/api/admin/passwords",
    request_body = AddPasswordRequest,
    responses(
        (status = 200, description = "Password list after the insert", body = [String]),
        (status = 400, description = "Empty password")
    ),
    tag = "admin"
)]
pub async fn add_password(
    Extension(auth): Extension<Arc<AuthState>>,
    payload: Option<Json<AddPasswordRequest>>,
) -> Result<Json<Vec<String>>, ApiError> {
    let Some(Json(request)) = payload else {
        return Err(ApiError::Validation("Missing payload".to_string()));
    };

    let passwords = auth.credentials().add(&request.password).await?;
    Ok(Json(passwords))
}

/// Remove a password and return the updated list.
#[utoipa::path(
    delete,
    path = "/api/admin/passwords/{password}",
    params(("password" = String, Path, description = "Password to remove")),
    responses(
        (status = 200, description = "Password list after the removal", body = [String]),
        (status = 400, description = "Refusing to remove the last password")
    ),
    tag = "admin"
)]
pub async fn remove_password(
    Extension(auth): Extension<Arc<AuthState>>,
    Path(password): Path<String>,
) -> Result<Json<Vec<String>>, ApiError> {
    let passwords = auth.credentials().remove(&password).await?;
    Ok(Json(passwords))
}

#[cfg(test)]
mod tests {
    use super::super::auth::{AuthConfig, CredentialStore, DeviceAllowlist, SEED_PASSWORD};
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
    async fn listing_shows_the_seed_password() {
        let (_dir, auth) = auth_state();
        let Json(passwords) = list_passwords(Extension(auth)).await;
        assert_eq!(passwords, vec![SEED_PASSWORD.to_string()]);
    }

    #[tokio::test]
    async fn add_then_remove_round_trips() -> Result<()> {
        let (_dir, auth) = auth_state();

        let Json(passwords) = add_password(
            Extension(Arc::clone(&auth)),
            Some(Json(AddPasswordRequest {
                password: "workshop".to_string(),
            })),
        )
        .await?;
        assert_eq!(passwords.len(), 2);

        let Json(passwords) =
            remove_password(Extension(auth), Path("workshop".to_string())).await?;
        assert_eq!(passwords, vec![SEED_PASSWORD.to_string()]);
        Ok(())
    }

    #[tokio::test]
    async fn empty_password_is_rejected() {
        let (_dir, auth) = auth_state();
        let response = add_password(
            Extension(auth),
            Some(Json(AddPasswordRequest {
                password: String::new(),
            })),
        )
        .await
        .into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn removing_the_last_password_is_rejected() {
        let (_dir, auth) = auth_state();
        let response = remove_password(Extension(auth), Path(SEED_PASSWORD.to_string()))
            .await
            .into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
