// src/api/http/router.rs
// HTTP router composition for the classification REST API.

use std::time::Duration;

use axum::{
    Router,
    http::HeaderValue,
    routing::{get, post},
};
use tower_http::{
    cors::{Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};
use tracing::warn;

use super::classify::{batch_classify_handler, classify_handler, insights_handler};
use super::handlers::{categories_handler, health_handler};
use crate::config::CONFIG;
use crate::state::AppState;

/// Main HTTP router: health, taxonomy, and the classification endpoints.
pub fn http_router(app_state: AppState) -> Router {
    Router::new()
        // Health
        .route("/health", get(health_handler))

        // Classification
        .route("/classify", post(classify_handler))
        .route("/insights", post(insights_handler))
        .route("/batch-classify", post(batch_classify_handler))

        // Static taxonomy
        .route("/categories", get(categories_handler))

        .layer(cors_layer())
        .layer(TimeoutLayer::new(Duration::from_secs(CONFIG.request_timeout)))
        .layer(TraceLayer::new_for_http())
        .with_state(app_state)
}

fn cors_layer() -> CorsLayer {
    if CONFIG.cors_origin == "*" {
        return CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any);
    }

    match CONFIG.cors_origin.parse::<HeaderValue>() {
        Ok(origin) => CorsLayer::new()
            .allow_origin(origin)
            .allow_methods(Any)
            .allow_headers(Any),
        Err(_) => {
            warn!("invalid CORS origin '{}', allowing any", CONFIG.cors_origin);
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any)
        }
    }
}
