//! Route configuration and setup.

mod health;

use crate::constants::{ASSETS_ROUTE_PREFIX, THUMBNAIL_ROUTE_PREFIX};
use crate::handlers::{thumbnail_get, thumbnail_upload, video_upload};
use crate::state::AppState;
use axum::{
    extract::DefaultBodyLimit,
    http::{HeaderValue, Method},
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tubely_core::Config;

/// Setup all application routes
pub fn setup_routes(config: &Config, state: Arc<AppState>) -> Result<Router<()>, anyhow::Error> {
    let cors = setup_cors(config)?;

    let protected_routes = protected_routes().layer(axum::middleware::from_fn_with_state(
        state.jwt.clone(),
        crate::auth::middleware::auth_middleware,
    ));

    let app = public_routes()
        .merge(protected_routes)
        .nest_service(ASSETS_ROUTE_PREFIX, ServeDir::new(config.assets_root()))
        // No request-wide cap: the upload pipeline checks auth and ownership
        // first, then enforces the per-class limit while streaming the part.
        .layer(DefaultBodyLimit::disable())
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    Ok(app)
}

fn public_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/health", get(health::health_check))
        .route(
            &format!("{}/{{key}}", THUMBNAIL_ROUTE_PREFIX),
            get(thumbnail_get::get_thumbnail),
        )
}

fn protected_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route(
            "/api/thumbnail_upload/{video_id}",
            post(thumbnail_upload::upload_thumbnail),
        )
        .route(
            "/api/video_upload/{video_id}",
            post(video_upload::upload_video),
        )
}

fn setup_cors(config: &Config) -> Result<CorsLayer, anyhow::Error> {
    let cors = if config.cors_origins().iter().any(|o| o == "*") {
        tracing::warn!("CORS configured to allow all origins - not recommended for production");
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
            .allow_headers(Any)
    } else {
        let origins = config
            .cors_origins()
            .iter()
            .map(|o| o.parse::<HeaderValue>())
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| anyhow::anyhow!("Invalid CORS origin: {}", e))?;
        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
            .allow_headers(Any)
    };
    Ok(cors)
}
