//! Contact event handlers

use crate::error::ApiError;
use crate::extractors::ApiJson;
use crate::AppState;
use axum::{
    extract::{Path, State},
    Json,
};
use partsmart_core::{validation, Contact, ContactStore, NewContact};

pub async fn create(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<NewContact>,
) -> Result<Json<Contact>, ApiError> {
    validation::new_contact(&req)?;
    Ok(Json(state.store.create_contact(req).await?))
}

pub async fn list(
    State(state): State<AppState>,
    Path(seller_id): Path<String>,
) -> Result<Json<Vec<Contact>>, ApiError> {
    Ok(Json(state.store.list_seller_contacts(&seller_id).await?))
}
