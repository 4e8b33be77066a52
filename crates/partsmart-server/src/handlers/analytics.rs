//! Admin dashboard counters

use crate::error::ApiError;
use crate::AppState;
use axum::{extract::State, Json};
use partsmart_core::{Analytics, AnalyticsStore};

pub async fn get(State(state): State<AppState>) -> Result<Json<Analytics>, ApiError> {
    Ok(Json(state.store.analytics().await?))
}
