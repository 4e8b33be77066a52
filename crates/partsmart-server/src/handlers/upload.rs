//! Standalone image upload for searches by photo

use crate::error::ApiError;
use crate::extractors::form::read_multipart;
use crate::AppState;
use axum::{
    extract::{
        multipart::{Multipart, MultipartRejection},
        State,
    },
    Json,
};
use serde::Serialize;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageResponse {
    image_url: String,
}

pub async fn search_image(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<ImageResponse>, ApiError> {
    let mut multipart = multipart?;
    let (_, image) = read_multipart(&mut multipart).await?;
    let image = image.ok_or_else(|| ApiError::bad_request("No file uploaded"))?;

    let image_url = state.uploads.store(image).await?;
    Ok(Json(ImageResponse { image_url }))
}
