//! # Payment Intent Orchestration
//!
//! Validates a client request, resolves the package to its default price and
//! asks the provider for a payment intent charging exactly that amount.
//!
//! ```text
//! request ─► validate ─► retrieve_product ─► retrieve_price ─► create_payment_intent
//!               │                                  │
//!              400                                404
//! ```
//!
//! Provider failures at any step surface as upstream errors (500). Nothing is
//! retried; without an idempotency key a client retry creates a new intent.

use crate::error::{PaymentError, PaymentResult};
use crate::provider::PaymentProvider;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

/// Client request to start paying for a package.
///
/// Fields are optional at the type level so that absence is reported as a
/// validation error rather than a deserialization failure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentIntentRequest {
    #[serde(default)]
    pub currency: Option<String>,
    #[serde(default)]
    pub payment_method_type: Option<String>,
    #[serde(default)]
    pub package_id: Option<String>,
    /// Forwarded to the provider when present
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub idempotency_key: Option<String>,
}

impl PaymentIntentRequest {
    pub fn new(
        currency: impl Into<String>,
        payment_method_type: impl Into<String>,
        package_id: impl Into<String>,
    ) -> Self {
        Self {
            currency: Some(currency.into()),
            payment_method_type: Some(payment_method_type.into()),
            package_id: Some(package_id.into()),
            idempotency_key: None,
        }
    }

    /// Builder: set idempotency key
    pub fn with_idempotency_key(mut self, key: impl Into<String>) -> Self {
        self.idempotency_key = Some(key.into());
        self
    }

    /// Check that every required field is present and non-empty.
    pub fn validate(&self) -> PaymentResult<ValidIntentRequest<'_>> {
        let missing: Vec<&str> = [
            ("currency", &self.currency),
            ("paymentMethodType", &self.payment_method_type),
            ("packageId", &self.package_id),
        ]
        .into_iter()
        .filter(|(_, value)| non_empty(value).is_none())
        .map(|(name, _)| name)
        .collect();

        match (
            non_empty(&self.currency),
            non_empty(&self.payment_method_type),
            non_empty(&self.package_id),
        ) {
            (Some(currency), Some(payment_method_type), Some(package_id)) => {
                Ok(ValidIntentRequest {
                    currency,
                    payment_method_type,
                    package_id,
                    idempotency_key: non_empty(&self.idempotency_key),
                })
            }
            _ => Err(PaymentError::InvalidRequest(format!(
                "Missing required fields: {}",
                missing.join(", ")
            ))),
        }
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

/// A request whose required fields are known to be present
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidIntentRequest<'a> {
    pub currency: &'a str,
    pub payment_method_type: &'a str,
    pub package_id: &'a str,
    pub idempotency_key: Option<&'a str>,
}

/// Parameters sent to the provider to create a payment intent
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentIntentParams {
    /// Amount in smallest currency unit
    pub amount: i64,
    pub currency: String,
    pub payment_method_types: Vec<String>,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub idempotency_key: Option<String>,
}

impl PaymentIntentParams {
    /// Build provider parameters for a validated request and resolved amount
    pub fn for_package(request: &ValidIntentRequest<'_>, amount: i64) -> Self {
        Self {
            amount,
            currency: request.currency.to_string(),
            payment_method_types: vec![request.payment_method_type.to_string()],
            description: format!("Payment for package ID: {}", request.package_id),
            idempotency_key: request.idempotency_key.map(String::from),
        }
    }
}

/// A payment intent created by the provider
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentIntent {
    /// Provider's intent ID (pi_...)
    pub id: String,
    /// Secret the front-end uses to confirm the payment
    pub client_secret: String,
    pub amount: i64,
    pub currency: String,
    pub status: String,
}

/// Resolve a package to its price and create a payment intent for it.
#[instrument(
    skip(provider, request),
    fields(provider = provider.provider_name(), package_id = ?request.package_id)
)]
pub async fn create_payment_intent(
    provider: &dyn PaymentProvider,
    request: &PaymentIntentRequest,
) -> PaymentResult<PaymentIntent> {
    let request = request.validate()?;

    let product = provider.retrieve_product(request.package_id).await?;
    let price_id = product
        .default_price
        .as_deref()
        .ok_or_else(|| PaymentError::PriceNotFound {
            package_id: request.package_id.to_string(),
            reason: "product has no default price".to_string(),
        })?;

    let price = provider.retrieve_price(price_id).await?;
    debug!("Resolved price {} for package {}", price.id, request.package_id);

    let amount = price
        .chargeable_amount()
        .ok_or_else(|| PaymentError::PriceNotFound {
            package_id: request.package_id.to_string(),
            reason: format!("price {} has no positive unit_amount", price.id),
        })?;

    let params = PaymentIntentParams::for_package(&request, amount);
    let intent = provider.create_payment_intent(&params).await?;

    info!(
        "Created payment intent: id={}, amount={}, currency={}",
        intent.id, intent.amount, intent.currency
    );

    Ok(intent)
}
