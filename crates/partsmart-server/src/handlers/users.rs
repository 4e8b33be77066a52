//! User handlers

use crate::error::ApiError;
use crate::extractors::ApiJson;
use crate::AppState;
use axum::{
    extract::{Path, State},
    Json,
};
use partsmart_core::{NewUser, User, UserStore};

pub async fn create(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<NewUser>,
) -> Result<Json<User>, ApiError> {
    let user = state.auth_service.register(req).await?;
    Ok(Json(user))
}

pub async fn get(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<User>, ApiError> {
    state
        .store
        .get_user(&id)
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::not_found("User"))
}
