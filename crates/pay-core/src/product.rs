//! # Product Types
//!
//! Provider-side product and price records, and the simplified `Package`
//! view handed to the front-end.

use serde::{Deserialize, Serialize};

/// Minor units per major unit used for every package price.
pub const MINOR_UNITS_PER_MAJOR: f64 = 100.0;

/// A product record as held by the provider
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderProduct {
    /// Provider product ID (prod_...)
    pub id: String,

    /// Display name
    pub name: String,

    /// Description (providers allow this to be empty)
    #[serde(default)]
    pub description: Option<String>,

    /// ID of the price charged by default
    #[serde(default)]
    pub default_price: Option<String>,
}

impl ProviderProduct {
    /// Create a product with no description or default price
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: None,
            default_price: None,
        }
    }

    /// Builder: set description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Builder: set default price ID
    pub fn with_default_price(mut self, price_id: impl Into<String>) -> Self {
        self.default_price = Some(price_id.into());
        self
    }
}

/// A price record as held by the provider
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderPrice {
    /// Provider price ID (price_...)
    pub id: String,

    /// ID of the product this price belongs to
    pub product: String,

    /// Amount in smallest currency unit; absent for custom-amount prices
    #[serde(default)]
    pub unit_amount: Option<i64>,

    /// ISO 4217 currency code, lowercase
    pub currency: String,
}

impl ProviderPrice {
    pub fn new(
        id: impl Into<String>,
        product: impl Into<String>,
        unit_amount: Option<i64>,
        currency: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            product: product.into(),
            unit_amount,
            currency: currency.into(),
        }
    }

    /// Unit amount if it can actually be charged
    pub fn chargeable_amount(&self) -> Option<i64> {
        self.unit_amount.filter(|amount| *amount > 0)
    }
}

/// Simplified view of a product joined with its price
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Package {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    /// Price in major currency units (dollars, euros, ...)
    pub price: f64,
}

impl Package {
    /// Build a package from a product and its matching price, if any.
    ///
    /// Unmatched products, and prices without a unit amount, are priced at 0.
    pub fn from_product(product: &ProviderProduct, price: Option<&ProviderPrice>) -> Self {
        let price = price
            .and_then(|p| p.unit_amount)
            .map(to_major_units)
            .unwrap_or(0.0);

        Self {
            id: product.id.clone(),
            name: product.name.clone(),
            description: product.description.clone(),
            price,
        }
    }
}

/// Convert a minor-unit amount (cents) to major units
pub fn to_major_units(amount: i64) -> f64 {
    amount as f64 / MINOR_UNITS_PER_MAJOR
}
