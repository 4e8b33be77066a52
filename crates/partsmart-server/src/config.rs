//! Server configuration
//!
//! Layered with the `config` crate: built-in defaults, then an optional
//! `partsmart.toml` (or the file named by `PARTSMART_CONFIG`), then
//! `PARTSMART_*` environment variables.

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::PathBuf;

pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 5 * 1024 * 1024;

/// Which storage backend to run on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageKind {
    Memory,
    Sqlite,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub bind_address: String,
    pub storage: StorageKind,
    pub data_dir: PathBuf,
    /// Defaults to `<data_dir>/partsmart.db`
    pub database_path: Option<String>,
    pub upload_dir: PathBuf,
    /// Prebuilt client bundle, served with SPA fallback
    pub static_dir: Option<PathBuf>,
    pub seed_demo_data: bool,
    pub log_json: bool,
    pub max_upload_bytes: usize,
}

impl Settings {
    pub fn load() -> Result<Self, ConfigError> {
        let file = std::env::var("PARTSMART_CONFIG").unwrap_or_else(|_| "partsmart".to_string());

        Config::builder()
            .set_default("bind_address", "0.0.0.0:5000")?
            .set_default("storage", "memory")?
            .set_default("data_dir", "data")?
            .set_default("upload_dir", "uploads")?
            .set_default("seed_demo_data", true)?
            .set_default("log_json", false)?
            .set_default("max_upload_bytes", DEFAULT_MAX_UPLOAD_BYTES as u64)?
            .add_source(File::with_name(&file).required(false))
            .add_source(Environment::with_prefix("PARTSMART").try_parsing(true))
            .build()?
            .try_deserialize()
    }

    pub fn database_path(&self) -> String {
        self.database_path.clone().unwrap_or_else(|| {
            self.data_dir
                .join("partsmart.db")
                .to_string_lossy()
                .to_string()
        })
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:5000".to_string(),
            storage: StorageKind::Memory,
            data_dir: PathBuf::from("data"),
            database_path: None,
            upload_dir: PathBuf::from("uploads"),
            static_dir: None,
            seed_demo_data: true,
            log_json: false,
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
        }
    }
}
