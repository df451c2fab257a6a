//! # Request Handlers
//!
//! Axum request handlers for the front-end API.
//! Error bodies are plain text; upstream failure detail stays in the logs.

use crate::state::AppState;
use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use pay_core::{catalog, intent, Package, PaymentError, PaymentIntentRequest};
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, instrument, warn};

const PRODUCTS_ERROR: &str = "Error fetching products";
const INTENT_ERROR: &str = "Error creating payment intent";
const PRICE_NOT_FOUND: &str = "Price not found or unit_amount is missing";

// =============================================================================
// Request/Response Types
// =============================================================================

/// Public configuration for the front-end
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigResponse {
    pub publishable_key: String,
}

/// Create payment intent response
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePaymentIntentResponse {
    pub client_secret: String,
}

/// Error returned from a handler.
///
/// `context` is the generic message sent to the client for upstream failures.
#[derive(Debug)]
pub struct ApiError {
    pub error: PaymentError,
    pub context: &'static str,
}

impl ApiError {
    pub fn new(error: PaymentError, context: &'static str) -> Self {
        Self { error, context }
    }

    pub fn status(&self) -> StatusCode {
        StatusCode::from_u16(self.error.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }

    /// Message safe to return to the client
    pub fn client_message(&self) -> String {
        match &self.error {
            PaymentError::InvalidRequest(msg) => msg.clone(),
            PaymentError::PriceNotFound { .. } => PRICE_NOT_FOUND.to_string(),
            _ => self.context.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();

        if self.error.is_upstream() {
            error!("{}: {}", self.context, self.error);
        } else {
            warn!("Rejected request ({}): {}", status.as_u16(), self.error);
        }

        (status, self.client_message()).into_response()
    }
}

// =============================================================================
// Handlers
// =============================================================================

/// Health check endpoint
pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "service": "pay-relay",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

/// Liveness check used by the front-end; never touches the provider
pub async fn api_status() -> impl IntoResponse {
    Json(serde_json::json!({ "message": "API is working!" }))
}

/// Unmatched path that is not a static file either
pub async fn not_found() -> impl IntoResponse {
    (StatusCode::NOT_FOUND, "Not found")
}

/// Publishable key for the front-end's own provider client
pub async fn get_config(State(state): State<AppState>) -> Json<ConfigResponse> {
    Json(ConfigResponse {
        publishable_key: state.config.publishable_key.clone(),
    })
}

/// List packages (provider products joined with prices)
#[instrument(skip(state))]
pub async fn list_products(
    State(state): State<AppState>,
) -> Result<Json<Vec<Package>>, ApiError> {
    let packages = catalog::list_packages(state.provider.as_ref())
        .await
        .map_err(|e| ApiError::new(e, PRODUCTS_ERROR))?;

    debug!("Listing {} packages", packages.len());

    Ok(Json(packages))
}

/// Create a payment intent for a package and return its client secret
#[instrument(skip(state, payload))]
pub async fn create_payment_intent(
    State(state): State<AppState>,
    payload: Result<Json<PaymentIntentRequest>, JsonRejection>,
) -> Result<Json<CreatePaymentIntentResponse>, ApiError> {
    let Json(request) = payload.map_err(|rejection| {
        debug!("Unreadable payment intent body: {}", rejection.body_text());
        ApiError::new(
            PaymentError::InvalidRequest("Missing required fields".to_string()),
            INTENT_ERROR,
        )
    })?;

    let intent = intent::create_payment_intent(state.provider.as_ref(), &request)
        .await
        .map_err(|e| ApiError::new(e, INTENT_ERROR))?;

    info!("Payment intent ready: id={}", intent.id);

    Ok(Json(CreatePaymentIntentResponse {
        client_secret: intent.client_secret,
    }))
}
