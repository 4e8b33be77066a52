//! Authentication handlers

use crate::error::ApiError;
use crate::extractors::ApiJson;
use crate::AppState;
use axum::{extract::State, Json};
use partsmart_core::{User, UserLogin};
use serde::Serialize;
use tracing::{info, warn};

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    user: User,
}

pub async fn login(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<UserLogin>,
) -> Result<Json<LoginResponse>, ApiError> {
    info!("Login attempt for: {}", req.username);

    let user = state
        .auth_service
        .login(&req.username, &req.password)
        .await
        .map_err(|e| {
            warn!("Login failed for {}: {}", req.username, e);
            ApiError::from(e)
        })?;

    info!("Login successful for: {}", user.username);
    Ok(Json(LoginResponse { user }))
}
