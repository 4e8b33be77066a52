//! PartSmart Server
//!
//! Marketplace backend for local vehicle-parts sellers. Runs on in-memory
//! tables or an embedded SQLite file, selected through configuration.

use anyhow::{Context, Result};
use partsmart_server::config::Settings;
use partsmart_server::services::UploadService;
use partsmart_server::{app, seed, storage, AppState};
use std::net::SocketAddr;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    // Set up panic hook to log crashes
    std::panic::set_hook(Box::new(|info| {
        let location = info
            .location()
            .map(|l| format!("{}:{}", l.file(), l.line()));
        let payload = if let Some(s) = info.payload().downcast_ref::<&str>() {
            s.to_string()
        } else if let Some(s) = info.payload().downcast_ref::<String>() {
            s.clone()
        } else {
            "Unknown panic".to_string()
        };
        eprintln!("[PANIC] at {:?}: {}", location, payload);
        tracing::error!("PANIC at {:?}: {}", location, payload);
    }));

    let settings = match Settings::load() {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("[FATAL] Invalid configuration: {}", e);
            std::process::exit(1);
        }
    };

    init_logging(settings.log_json);

    info!("Starting PartSmart Server v{}", env!("CARGO_PKG_VERSION"));

    if let Err(e) = run_server(settings).await {
        error!("Server failed: {:#}", e);
        std::process::exit(1);
    }
}

fn init_logging(json: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,tower_http=info"));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);

    let result = if json {
        builder.json().try_init()
    } else {
        builder.try_init()
    };
    if let Err(e) = result {
        eprintln!("[FATAL] Failed to initialize logging: {}", e);
        std::process::exit(1);
    }
}

async fn run_server(settings: Settings) -> Result<()> {
    info!(
        "Config loaded: bind={}, storage={:?}",
        settings.bind_address, settings.storage
    );

    let store = storage::open(&settings)
        .await
        .context("Failed to open storage")?;

    let uploads = UploadService::new(&settings.upload_dir, settings.max_upload_bytes)
        .await
        .context("Failed to prepare upload directory")?;

    let state = AppState::new(store, uploads);

    if settings.seed_demo_data {
        seed::seed_demo_data(&state)
            .await
            .context("Failed to seed demo data")?;
    }

    if let Some(dir) = &settings.static_dir {
        info!("Static files directory: {}", dir.display());
    }
    let app = app(state, settings.static_dir.as_deref());

    let addr: SocketAddr = settings
        .bind_address
        .parse()
        .context("Failed to parse bind address")?;
    info!("Server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .context("Failed to bind to address")?;

    info!("Server ready to accept connections");
    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}
