//! # pay-stripe
//!
//! Stripe implementation of the `pay_core::PaymentProvider` port.
//!
//! - Products and prices are read from `/v1/products` and `/v1/prices`,
//!   following `has_more` pagination to the end of each list
//! - Payment intents are created through `/v1/payment_intents`
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use pay_stripe::StripeProvider;
//! use pay_core::{catalog, PaymentProvider};
//!
//! // Create provider from environment (STRIPE_SECRET_KEY)
//! let provider = StripeProvider::from_env()?;
//!
//! let packages = catalog::list_packages(&provider).await?;
//! ```

pub mod config;
pub mod provider;

// Re-exports
pub use config::StripeConfig;
pub use provider::{StripeProvider, LIST_PAGE_SIZE};
