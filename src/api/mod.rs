pub mod config;
pub mod error;
pub mod extractors;
pub mod handlers;

use anyhow::Result;
use axum::{
    Router,
    extract::DefaultBodyLimit,
    routing::{get, post},
};
use tower::ServiceBuilder;
use tower_http::cors::{AllowHeaders, AllowMethods, CorsLayer};
use tower_http::trace::TraceLayer;

use config::ApiConfig;
use handlers::{
    budget_sync::{manual_sync, upload_file},
    health,
};

use crate::utils::app_config::AppConfig;

/// Browsers only send credentials to a single, explicitly named origin, so
/// methods and headers are mirrored from the preflight instead of `*`.
pub fn cors_layer(api_config: &ApiConfig) -> Result<CorsLayer> {
    let origin = api_config.allowed_origin_header()?;

    Ok(CorsLayer::new()
        .allow_origin(origin)
        .allow_credentials(true)
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request()))
}

pub fn router(app_config: AppConfig, api_config: &ApiConfig) -> Result<Router> {
    let router = Router::new()
        .route("/health", get(health::health))
        .route("/api/upload-file", post(upload_file))
        .route("/api/manual-sync", post(manual_sync))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors_layer(api_config)?)
                .layer(DefaultBodyLimit::max(api_config.max_upload_bytes)),
        )
        .with_state(app_config);

    Ok(router)
}
