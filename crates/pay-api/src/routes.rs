//! # Routes
//!
//! Axum router configuration for the front-end API.

use crate::handlers;
use crate::state::{AppConfig, AppState};
use axum::{
    handler::HandlerWithoutStateExt,
    http::HeaderValue,
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    services::ServeDir,
    trace::TraceLayer,
};
use tracing::warn;

/// Create the main application router
///
/// Routes:
/// - GET  /config - Publishable key
/// - GET  /products - Package listing
/// - POST /create-payment-intent - Create payment intent, returns client secret
/// - GET  /test - API liveness message
/// - GET  /health - Health check
///
/// Anything else is served from the static directory; unknown paths and
/// non-GET requests to them get a 404.
pub fn create_router(state: AppState) -> Router {
    let cors = cors_layer(&state.config);
    let static_files = ServeDir::new(&state.config.static_dir)
        .call_fallback_on_method_not_allowed(true)
        .not_found_service(handlers::not_found.into_service());

    Router::new()
        .route("/config", get(handlers::get_config))
        .route("/products", get(handlers::list_products))
        .route("/create-payment-intent", post(handlers::create_payment_intent))
        .route("/test", get(handlers::api_status))
        .route("/health", get(handlers::health))
        // Front-end bundle
        .fallback_service(static_files)
        // Middleware
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        // State
        .with_state(state)
}

/// Any origin unless an explicit allow-list is configured
fn cors_layer(config: &AppConfig) -> CorsLayer {
    let layer = CorsLayer::new().allow_methods(Any).allow_headers(Any);

    if config.cors_allowed_origins.is_empty() {
        return layer.allow_origin(Any);
    }

    let origins: Vec<HeaderValue> = config
        .cors_allowed_origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                warn!("Ignoring invalid CORS origin: {}", origin);
                None
            }
        })
        .collect();

    layer.allow_origin(AllowOrigin::list(origins))
}
