//! Body that is either JSON or `multipart/form-data`
//!
//! The inventory forms post multipart with an optional `image` file, while
//! other clients send plain JSON. Text fields of a multipart body are
//! collected into a JSON object and deserialized the same way.

use crate::error::ApiError;
use crate::services::UploadedFile;
use axum::{
    async_trait,
    extract::{FromRequest, Multipart, Request},
    http::header::CONTENT_TYPE,
    Json,
};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

pub const IMAGE_FIELD: &str = "image";

pub struct FormOrJson<T> {
    pub data: T,
    pub image: Option<UploadedFile>,
}

#[async_trait]
impl<T, S> FromRequest<S> for FormOrJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let is_multipart = req
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(|v| v.starts_with("multipart/form-data"))
            .unwrap_or(false);

        if !is_multipart {
            let Json(data) = Json::<T>::from_request(req, state).await?;
            return Ok(Self { data, image: None });
        }

        let mut multipart = Multipart::from_request(req, state).await?;
        let (fields, image) = read_multipart(&mut multipart).await?;
        let data = serde_json::from_value(Value::Object(fields))
            .map_err(|e| ApiError::bad_request(e.to_string()))?;

        Ok(Self { data, image })
    }
}

/// Text fields plus the `image` file, if one was attached
pub async fn read_multipart(
    multipart: &mut Multipart,
) -> Result<(Map<String, Value>, Option<UploadedFile>), ApiError> {
    let mut fields = Map::new();
    let mut image = None;

    while let Some(field) = multipart.next_field().await? {
        let name = field.name().unwrap_or_default().to_string();

        if field.file_name().is_some() {
            if name != IMAGE_FIELD {
                continue;
            }
            let file_name = field.file_name().map(str::to_string);
            let content_type = field.content_type().map(str::to_string);
            let data = field.bytes().await?;
            // Browsers send an empty file part when nothing was picked
            if !data.is_empty() {
                image = Some(UploadedFile {
                    field: name,
                    file_name,
                    content_type,
                    data,
                });
            }
        } else {
            let text = field.text().await?;
            fields.insert(name, Value::String(text));
        }
    }

    Ok((fields, image))
}
