//! In-memory provider used by the workflow tests.

use crate::error::{PaymentError, PaymentResult};
use crate::intent::{PaymentIntent, PaymentIntentParams};
use crate::product::{ProviderPrice, ProviderProduct};
use crate::provider::PaymentProvider;
use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

#[derive(Default)]
pub struct FakeProvider {
    products: Vec<ProviderProduct>,
    prices: Vec<ProviderPrice>,
    unavailable: bool,
    calls: AtomicUsize,
    intents: Mutex<Vec<PaymentIntentParams>>,
}

impl FakeProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_product(mut self, product: ProviderProduct) -> Self {
        self.products.push(product);
        self
    }

    pub fn with_price(mut self, price: ProviderPrice) -> Self {
        self.prices.push(price);
        self
    }

    /// Every call fails with a network error
    pub fn unavailable(mut self) -> Self {
        self.unavailable = true;
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn created_intents(&self) -> Vec<PaymentIntentParams> {
        self.intents.lock().unwrap().clone()
    }

    fn enter(&self) -> PaymentResult<()> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.unavailable {
            return Err(PaymentError::NetworkError("connection refused".into()));
        }
        Ok(())
    }

    fn not_found(kind: &str, id: &str) -> PaymentError {
        PaymentError::ProviderError {
            provider: "fake".into(),
            message: format!("No such {}: '{}'", kind, id),
        }
    }
}

#[async_trait]
impl PaymentProvider for FakeProvider {
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
            .ok_or_else(|| Self::not_found("product", product_id))
    }

    async fn retrieve_price(&self, price_id: &str) -> PaymentResult<ProviderPrice> {
        self.enter()?;
        self.prices
            .iter()
            .find(|p| p.id == price_id)
            .cloned()
            .ok_or_else(|| Self::not_found("price", price_id))
    }

    async fn create_payment_intent(
        &self,
        params: &PaymentIntentParams,
    ) -> PaymentResult<PaymentIntent> {
        self.enter()?;
        let mut intents = self.intents.lock().unwrap();
        intents.push(params.clone());
        let n = intents.len();
        Ok(PaymentIntent {
            id: format!("pi_fake_{}", n),
            client_secret: format!("pi_fake_{}_secret_{}", n, n),
            amount: params.amount,
            currency: params.currency.clone(),
            status: "requires_payment_method".into(),
        })
    }

    fn provider_name(&self) -> &'static str {
        "fake"
    }
}
