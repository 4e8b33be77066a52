//! Review handlers

use crate::error::ApiError;
use crate::extractors::ApiJson;
use crate::AppState;
use axum::{
    extract::{Path, State},
    Json,
};
use partsmart_core::{validation, NewReview, Review, ReviewStore};
use tracing::info;

pub async fn create(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<NewReview>,
) -> Result<Json<Review>, ApiError> {
    let req = validation::new_review(req)?;
    let review = state.store.create_review(req).await?;
    info!("Review {} for seller {}", review.rating, review.seller_id);
    Ok(Json(review))
}

pub async fn list(
    State(state): State<AppState>,
    Path(seller_id): Path<String>,
) -> Result<Json<Vec<Review>>, ApiError> {
    Ok(Json(state.store.list_seller_reviews(&seller_id).await?))
}
