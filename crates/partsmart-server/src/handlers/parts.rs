//! Inventory handlers

use crate::error::ApiError;
use crate::extractors::{ApiQuery, FormOrJson};
use crate::AppState;
use axum::{
    extract::{Path, State},
    Json,
};
use partsmart_core::{validation, MarketError, NewPart, Part, PartStore, PartUpdate, SellerStore};
use serde::{Deserialize, Serialize};
use tracing::info;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PartQuery {
    #[serde(alias = "dealerId")]
    seller_id: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct DeleteResponse {
    message: &'static str,
}

pub async fn list(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<PartQuery>,
) -> Result<Json<Vec<Part>>, ApiError> {
    let parts = match query.seller_id.filter(|id| !id.is_empty()) {
        Some(seller_id) => state.store.list_parts_by_seller(&seller_id).await?,
        None => state.store.list_parts().await?,
    };
    Ok(Json(parts))
}

pub async fn get(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Part>, ApiError> {
    state
        .store
        .get_part(&id)
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::not_found("Part"))
}

pub async fn create(
    State(state): State<AppState>,
    form: FormOrJson<NewPart>,
) -> Result<Json<Part>, ApiError> {
    let FormOrJson { mut data, image } = form;
    validation::new_part(&data)?;

    // Check the owner before any file is written
    if state.store.get_seller(&data.seller_id).await?.is_none() {
        return Err(MarketError::missing("Seller", data.seller_id).into());
    }
    if let Some(image) = image {
        data.image_url = Some(state.uploads.store(image).await?);
    }

    let part = state.store.create_part(data).await?;
    info!("Created part {} for seller {}", part.id, part.seller_id);
    Ok(Json(part))
}

pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    form: FormOrJson<PartUpdate>,
) -> Result<Json<Part>, ApiError> {
    let FormOrJson { mut data, image } = form;
    validation::part_update(&data)?;

    if state.store.get_part(&id).await?.is_none() {
        return Err(ApiError::not_found("Part"));
    }
    if let Some(image) = image {
        data.image_url = Some(state.uploads.store(image).await?);
    }

    state
        .store
        .update_part(&id, data)
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::not_found("Part"))
}

pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<DeleteResponse>, ApiError> {
    if !state.store.delete_part(&id).await? {
        return Err(ApiError::not_found("Part"));
    }
    info!("Deleted part {}", id);
    Ok(Json(DeleteResponse {
        message: "Part deleted successfully",
    }))
}
