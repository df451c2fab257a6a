//! Shared fixtures for the HTTP tests.

use async_trait::async_trait;
use axum_test::TestServer;
use pay_api::{create_router, AppConfig, AppState};
use pay_core::{
    PaymentError, PaymentIntent, PaymentIntentParams, PaymentProvider, PaymentResult,
    ProviderPrice, ProviderProduct,
};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

pub const PUBLISHABLE_KEY: &str = "pk_test_frontend";
pub const SECRET_KEY: &str = "sk_test_server_only";

/// Provider double that records every call it receives.
#[derive(Default)]
pub struct RecordingProvider {
    products: Vec<ProviderProduct>,
    prices: Vec<ProviderPrice>,
    down: bool,
    calls: AtomicUsize,
    intents: Mutex<Vec<PaymentIntentParams>>,
}

impl RecordingProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Catalog with a priced, an unpriced and a free product
    pub fn with_catalog() -> Self {
        Self::new()
            .with_product(
                ProviderProduct::new("prod_basic", "Basic")
                    .with_description("Basic package")
                    .with_default_price("price_basic"),
            )
            .with_product(ProviderProduct::new("prod_unpriced", "Unpriced"))
            .with_product(
                ProviderProduct::new("prod_free", "Free").with_default_price("price_free"),
            )
            .with_price(ProviderPrice::new("price_basic", "prod_basic", Some(4999), "usd"))
            .with_price(ProviderPrice::new("price_free", "prod_free", Some(0), "usd"))
    }

    pub fn with_product(mut self, product: ProviderProduct) -> Self {
        self.products.push(product);
        self
    }

    pub fn with_price(mut self, price: ProviderPrice) -> Self {
        self.prices.push(price);
        self
    }

    pub fn down(mut self) -> Self {
        self.down = true;
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn intents(&self) -> Vec<PaymentIntentParams> {
        self.intents.lock().unwrap().clone()
    }

    fn enter(&self) -> PaymentResult<()> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.down {
            return Err(PaymentError::NetworkError(
                "connect error: 10.0.0.1:443 refused".into(),
            ));
        }
        Ok(())
    }

    fn missing(kind: &str, id: &str) -> PaymentError {
        PaymentError::ProviderError {
            provider: "recording".into(),
            message: format!("No such {}: '{}'", kind, id),
        }
    }
}

#[async_trait]
impl PaymentProvider for RecordingProvider {
    async fn list_products(&self) -> PaymentResult<Vec<ProviderProduct>> {
        self.enter()?;
        Ok(self.products.clone())
    }

    async fn list_prices(&self) -> PaymentResult<Vec<ProviderPrice>> {
        self.enter()?;
        Ok(self.prices.clone())
    }

    async fn retrieve_product(&self, product_id: &str) -> PaymentResult<ProviderProduct> {
        self.enter()?;
        self.products
            .iter()
            .find(|p| p.id == product_id)
            .cloned()
            .ok_or_else(|| Self::missing("product", product_id))
    }

    async fn retrieve_price(&self, price_id: &str) -> PaymentResult<ProviderPrice> {
        self.enter()?;
        self.prices
            .iter()
            .find(|p| p.id == price_id)
            .cloned()
            .ok_or_else(|| Self::missing("price", price_id))
    }

    async fn create_payment_intent(
        &self,
        params: &PaymentIntentParams,
    ) -> PaymentResult<PaymentIntent> {
        self.enter()?;
        self.intents.lock().unwrap().push(params.clone());

        let id = format!("pi_{}", uuid::Uuid::new_v4().simple());
        Ok(PaymentIntent {
            client_secret: format!("{}_secret_{}", id, uuid::Uuid::new_v4().simple()),
            id,
            amount: params.amount,
            currency: params.currency.clone(),
            status: "requires_payment_method".into(),
        })
    }

    fn provider_name(&self) -> &'static str {
        "recording"
    }
}

pub fn test_config() -> AppConfig {
    AppConfig::default().with_publishable_key(PUBLISHABLE_KEY)
}

/// Start a test server around the real router
pub fn server_with(provider: Arc<RecordingProvider>, config: AppConfig) -> TestServer {
    let state = AppState::new(provider, config);
    TestServer::new(create_router(state)).unwrap()
}

pub fn server(provider: Arc<RecordingProvider>) -> TestServer {
    server_with(provider, test_config())
}
