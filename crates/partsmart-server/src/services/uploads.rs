//! Image uploads
//!
//! Files land in the upload directory as `{field}-{millis}-{random}{.ext}` and
//! are served back under `/uploads`.

use bytes::Bytes;
use partsmart_core::{MarketError, Result};
use rand::Rng;
use std::path::{Path, PathBuf};
use tracing::info;

pub const PUBLIC_PREFIX: &str = "/uploads";

const ALLOWED_TYPES: &[&str] = &["jpeg", "jpg", "png", "gif", "webp"];

/// A file pulled out of a multipart body
#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub field: String,
    pub file_name: Option<String>,
    pub content_type: Option<String>,
    pub data: Bytes,
}

pub struct UploadService {
    dir: PathBuf,
    max_bytes: usize,
}

impl UploadService {
    pub async fn new(dir: impl Into<PathBuf>, max_bytes: usize) -> Result<Self> {
        let dir = dir.into();
        tokio::fs::create_dir_all(&dir).await?;
        info!("Upload directory: {}", dir.display());
        Ok(Self { dir, max_bytes })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn max_bytes(&self) -> usize {
        self.max_bytes
    }

    /// Validate and persist an image, returning its public URL
    pub async fn store(&self, file: UploadedFile) -> Result<String> {
        if file.data.len() > self.max_bytes {
            return Err(MarketError::Upload(format!(
                "File too large (limit is {} bytes)",
                self.max_bytes
            )));
        }

        let extension = file
            .file_name
            .as_deref()
            .and_then(|name| Path::new(name).extension())
            .and_then(|ext| ext.to_str())
            .map(str::to_lowercase);

        let allowed = match (&extension, &file.content_type) {
            (Some(ext), Some(mime)) => is_allowed_extension(ext) && is_allowed_mime(mime),
            _ => false,
        };
        if !allowed {
            return Err(MarketError::Upload("Only image files are allowed".to_string()));
        }

        let file_name = format!(
            "{}-{}-{}.{}",
            file.field,
            chrono::Utc::now().timestamp_millis(),
            rand::thread_rng().gen_range(0..1_000_000_000u32),
            extension.unwrap_or_default()
        );
        tokio::fs::write(self.dir.join(&file_name), &file.data).await?;
        info!("Stored upload {} ({} bytes)", file_name, file.data.len());

        Ok(format!("{}/{}", PUBLIC_PREFIX, file_name))
    }
}

fn is_allowed_extension(ext: &str) -> bool {
    ALLOWED_TYPES.contains(&ext)
}

fn is_allowed_mime(mime: &str) -> bool {
    mime.to_lowercase()
        .strip_prefix("image/")
        .map(|subtype| ALLOWED_TYPES.contains(&subtype))
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_dir(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!(
            "partsmart_{}_{}",
            name,
            std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .unwrap()
                .as_nanos()
        ))
    }

    fn image(name: &str, mime: &str, size: usize) -> UploadedFile {
        UploadedFile {
            field: "image".to_string(),
            file_name: Some(name.to_string()),
            content_type: Some(mime.to_string()),
            data: Bytes::from(vec![0u8; size]),
        }
    }

    #[test]
    fn test_allowed_types() {
        assert!(is_allowed_extension("jpg"));
        assert!(is_allowed_extension("webp"));
        assert!(!is_allowed_extension("pdf"));
        assert!(is_allowed_mime("image/jpeg"));
        assert!(is_allowed_mime("IMAGE/PNG"));
        assert!(!is_allowed_mime("application/pdf"));
        assert!(!is_allowed_mime("image/svg+xml"));
    }

    #[tokio::test]
    async fn test_store_image() {
        let dir = temp_dir("store");
        let uploads = UploadService::new(&dir, 1024).await.unwrap();

        let url = uploads.store(image("Brakes.JPG", "image/jpeg", 16)).await.unwrap();
        assert!(url.starts_with("/uploads/image-"));
        assert!(url.ends_with(".jpg"));

        let file_name = url.trim_start_matches("/uploads/");
        assert_eq!(std::fs::read(dir.join(file_name)).unwrap().len(), 16);

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[tokio::test]
    async fn test_rejects_non_images_and_oversized_files() {
        let dir = temp_dir("reject");
        let uploads = UploadService::new(&dir, 1024).await.unwrap();

        let err = uploads
            .store(image("invoice.pdf", "application/pdf", 16))
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Only image files are allowed");

        // Extension and MIME type must both agree
        assert!(uploads.store(image("photo.png", "text/plain", 16)).await.is_err());

        let err = uploads
            .store(image("big.png", "image/png", 2048))
            .await
            .unwrap_err();
        assert!(matches!(err, MarketError::Upload(_)));

        let _ = std::fs::remove_dir_all(&dir);
    }
}
