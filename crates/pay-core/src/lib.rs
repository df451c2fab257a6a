//! # pay-core
//!
//! Core types and workflows for pay-relay.
//!
//! This crate provides:
//! - `PaymentProvider` trait, the port to the external payment provider
//! - `ProviderProduct`, `ProviderPrice` and the simplified `Package`
//! - `catalog::list_packages`, joining products with prices
//! - `intent::create_payment_intent`, the payment-intent workflow
//! - `PaymentError` for typed error handling
//!
//! ## Example
//!
//! ```rust,ignore
//! use pay_core::{catalog, intent, PaymentIntentRequest};
//!
//! let packages = catalog::list_packages(provider.as_ref()).await?;
//!
//! let request = PaymentIntentRequest::new("usd", "card", &packages[0].id);
//! let intent = intent::create_payment_intent(provider.as_ref(), &request).await?;
//!
//! // Hand intent.client_secret to the front-end
//! ```

pub mod catalog;
pub mod error;
pub mod intent;
pub mod product;
pub mod provider;

#[cfg(test)]
pub(crate) mod fake;

// Re-exports for convenience
pub use error::{PaymentError, PaymentResult};
pub use intent::{PaymentIntent, PaymentIntentParams, PaymentIntentRequest, ValidIntentRequest};
pub use product::{Package, ProviderPrice, ProviderProduct};
pub use provider::{BoxedPaymentProvider, PaymentProvider};
