//! # Payment Provider Trait
//!
//! Port trait for the external payment provider.
//! Implementations: Stripe (`pay-stripe`), in-process fakes in tests.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                  PaymentProvider (trait)                    │
//! │  ├── list_products() / list_prices()                        │
//! │  ├── retrieve_product() / retrieve_price()                  │
//! │  ├── create_payment_intent()                                │
//! │  └── provider_name()                                        │
//! └─────────────────────────────────────────────────────────────┘
//!                            ▲
//!              ┌─────────────┴─────────────┐
//!      ┌───────┴───────┐           ┌───────┴───────┐
//!      │StripeProvider │           │  test fakes   │
//!      └───────────────┘           └───────────────┘
//! ```

use crate::error::PaymentResult;
use crate::intent::{PaymentIntent, PaymentIntentParams};
use crate::product::{ProviderPrice, ProviderProduct};
use async_trait::async_trait;
use std::sync::Arc;

/// Operations this service needs from a payment provider.
///
/// Implementations are shared across concurrent requests, so they must be
/// `Send + Sync` and must not hold per-request state.
#[async_trait]
pub trait PaymentProvider: Send + Sync {
    /// List every product, in provider order.
    async fn list_products(&self) -> PaymentResult<Vec<ProviderProduct>>;

    /// List every price, in provider order.
    async fn list_prices(&self) -> PaymentResult<Vec<ProviderPrice>>;

    /// Fetch a single product by ID.
    async fn retrieve_product(&self, product_id: &str) -> PaymentResult<ProviderProduct>;

    /// Fetch a single price by ID.
    async fn retrieve_price(&self, price_id: &str) -> PaymentResult<ProviderPrice>;

    /// Create a payment intent and return the provider's record of it.
    async fn create_payment_intent(
        &self,
        params: &PaymentIntentParams,
    ) -> PaymentResult<PaymentIntent>;

    /// Get the provider name (for logging).
    fn provider_name(&self) -> &'static str;
}

/// Type alias for a shared provider (dynamic dispatch)
pub type BoxedPaymentProvider = Arc<dyn PaymentProvider>;
