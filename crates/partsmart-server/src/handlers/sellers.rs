//! Seller (dealer) handlers

use crate::error::ApiError;
use crate::extractors::{ApiJson, ApiQuery};
use crate::AppState;
use axum::{
    extract::{Path, State},
    Json,
};
use partsmart_core::{
    validation, NewSeller, Seller, SellerStore, SellerUpdate, SellerWithParts,
};
use serde::Deserialize;
use tracing::info;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SellerQuery {
    user_id: Option<String>,
}

pub async fn list(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<SellerQuery>,
) -> Result<Json<Vec<Seller>>, ApiError> {
    let sellers: Vec<Seller> = match query.user_id {
        Some(user_id) => state
            .store
            .get_seller_by_user_id(&user_id)
            .await?
            .into_iter()
            .collect(),
        None => state.store.list_sellers().await?,
    };
    Ok(Json(sellers))
}

pub async fn pending(State(state): State<AppState>) -> Result<Json<Vec<Seller>>, ApiError> {
    Ok(Json(state.store.list_pending_sellers().await?))
}

pub async fn get(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<SellerWithParts>, ApiError> {
    state
        .store
        .get_seller_with_parts(&id)
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::not_found("Seller"))
}

pub async fn create(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<NewSeller>,
) -> Result<Json<Seller>, ApiError> {
    validation::new_seller(&req)?;
    let seller = state.store.create_seller(req).await?;
    info!("Created seller {} ({})", seller.shop_name, seller.id);
    Ok(Json(seller))
}

pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ApiJson(req): ApiJson<SellerUpdate>,
) -> Result<Json<Seller>, ApiError> {
    validation::seller_update(&req)?;
    state
        .store
        .update_seller(&id, req)
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::not_found("Seller"))
}

pub async fn verify(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Seller>, ApiError> {
    let seller = state
        .store
        .verify_seller(&id)
        .await?
        .ok_or_else(|| ApiError::not_found("Seller"))?;
    info!("Verified seller {} ({})", seller.shop_name, seller.id);
    Ok(Json(seller))
}
