//! # Catalog Reader
//!
//! Builds the package listing by joining provider products with provider
//! prices on the product ID.

use crate::error::PaymentResult;
use crate::product::{Package, ProviderPrice, ProviderProduct};
use crate::provider::PaymentProvider;
use tracing::{debug, instrument};

/// Fetch all products and prices and join them into packages.
///
/// Any provider failure fails the whole listing; partial results are never
/// returned.
#[instrument(skip(provider), fields(provider = provider.provider_name()))]
pub async fn list_packages(provider: &dyn PaymentProvider) -> PaymentResult<Vec<Package>> {
    let products = provider.list_products().await?;
    let prices = provider.list_prices().await?;

    debug!(
        "Joining {} products with {} prices",
        products.len(),
        prices.len()
    );

    Ok(join_packages(&products, &prices))
}

/// Join products with prices, one package per product in product order.
///
/// Each product takes the first price that references it.
pub fn join_packages(products: &[ProviderProduct], prices: &[ProviderPrice]) -> Vec<Package> {
    products
        .iter()
        .map(|product| {
            let price = prices.iter().find(|p| p.product == product.id);
            if price.is_none() {
                debug!("No price references product {}, listing at 0", product.id);
            }
            Package::from_product(product, price)
        })
        .collect()
}
