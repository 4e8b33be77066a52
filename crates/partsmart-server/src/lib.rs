//! PartSmart Server
//!
//! REST API for the parts marketplace: users, sellers, inventory, search,
//! reviews, contact events, analytics and image uploads.

pub mod config;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod seed;
pub mod services;
pub mod storage;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use partsmart_core::Storage;
use std::path::Path;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::TraceLayer;

use services::{AuthService, UploadService};

/// Multipart framing on top of the file itself
const BODY_OVERHEAD_BYTES: usize = 64 * 1024;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn Storage>,
    pub auth_service: Arc<AuthService>,
    pub uploads: Arc<UploadService>,
}

impl AppState {
    pub fn new(store: Arc<dyn Storage>, uploads: UploadService) -> Self {
        Self {
            auth_service: Arc::new(AuthService::new(store.clone())),
            store,
            uploads: Arc::new(uploads),
        }
    }
}

/// Full router: API, uploaded files and the optional client bundle
pub fn app(state: AppState, static_dir: Option<&Path>) -> Router {
    let body_limit = state.uploads.max_bytes() + BODY_OVERHEAD_BYTES;

    let mut router = Router::new()
        .route("/health", get(handlers::health))
        .nest("/api", api_routes())
        .nest_service("/uploads", ServeDir::new(state.uploads.dir()));

    if let Some(dir) = static_dir {
        // SPA fallback - unknown routes serve index.html
        router = router.fallback_service(
            ServeDir::new(dir).not_found_service(ServeFile::new(dir.join("index.html"))),
        );
    }

    router
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn api_routes() -> Router<AppState> {
    let mut router = Router::new()
        .route("/users", post(handlers::users::create))
        .route("/users/:id", get(handlers::users::get))
        .route("/auth/login", post(handlers::auth::login))
        .route(
            "/parts",
            get(handlers::parts::list).post(handlers::parts::create),
        )
        .route(
            "/parts/:id",
            get(handlers::parts::get)
                .put(handlers::parts::update)
                .delete(handlers::parts::delete),
        )
        .route("/search", post(handlers::search::search))
        .route("/searches/:user_id", get(handlers::search::user_searches))
        .route("/reviews", post(handlers::reviews::create))
        .route("/reviews/:seller_id", get(handlers::reviews::list))
        .route("/contacts", post(handlers::contacts::create))
        .route("/contacts/:seller_id", get(handlers::contacts::list))
        .route("/analytics", get(handlers::analytics::get))
        .route("/upload/search-image", post(handlers::upload::search_image));

    // "dealers" is the older name for sellers; both are served
    for prefix in ["/sellers", "/dealers"] {
        router = router
            .route(
                prefix,
                get(handlers::sellers::list).post(handlers::sellers::create),
            )
            .route(
                &format!("{}/pending/verification", prefix),
                get(handlers::sellers::pending),
            )
            .route(
                &format!("{}/:id", prefix),
                get(handlers::sellers::get).put(handlers::sellers::update),
            )
            .route(
                &format!("{}/:id/verify", prefix),
                post(handlers::sellers::verify),
            );
    }

    router
}
