//! Storage layer
//!
//! Two interchangeable backends behind `partsmart_core::Storage`: SQLite
//! (embedded) and plain in-memory tables.

pub mod db;
pub mod memory;

pub use db::Database;
pub use memory::MemoryStore;

use crate::config::{Settings, StorageKind};
use anyhow::Result;
use partsmart_core::Storage;
use std::sync::Arc;

/// Open the backend named in the settings
pub async fn open(settings: &Settings) -> Result<Arc<dyn Storage>> {
    match settings.storage {
        StorageKind::Memory => {
            tracing::info!("Using in-memory storage");
            Ok(Arc::new(MemoryStore::new()))
        }
        StorageKind::Sqlite => {
            let path = settings.database_path();
            let db = Database::new(&path).await?;
            tracing::info!("SQLite database initialized at: {}", path);
            Ok(Arc::new(db))
        }
    }
}
