//! # Stripe Provider
//!
//! `PaymentProvider` implementation backed by the Stripe REST API.
//! Products and prices are listed with cursor pagination; payment intents are
//! created with form-encoded parameters the way the Stripe API expects.

use crate::config::StripeConfig;
use async_trait::async_trait;
use pay_core::{
    PaymentError, PaymentIntent, PaymentIntentParams, PaymentProvider, PaymentResult,
    ProviderPrice, ProviderProduct,
};
use reqwest::{Client, RequestBuilder, Url};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::{debug, error, info, instrument};

/// Page size used when listing products and prices (Stripe maximum)
pub const LIST_PAGE_SIZE: u32 = 100;

const PROVIDER: &str = "stripe";

/// Stripe-backed payment provider.
///
/// Wraps a single pooled `reqwest::Client`; one instance is shared by all
/// in-flight requests.
pub struct StripeProvider {
    config: StripeConfig,
    client: Client,
}

impl StripeProvider {
    /// Create a new Stripe provider
    pub fn new(config: StripeConfig) -> PaymentResult<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| {
                PaymentError::Configuration(format!("Failed to create HTTP client: {}", e))
            })?;

        Ok(Self { config, client })
    }

    /// Create from environment variables
    pub fn from_env() -> PaymentResult<Self> {
        Self::new(StripeConfig::from_env()?)
    }

    /// Build an API URL, percent-encoding each path segment
    fn endpoint(&self, segments: &[&str]) -> PaymentResult<Url> {
        let mut url = Url::parse(&self.config.api_base_url).map_err(|e| {
            PaymentError::Configuration(format!(
                "Invalid Stripe API base URL {}: {}",
                self.config.api_base_url, e
            ))
        })?;

        url.path_segments_mut()
            .map_err(|_| {
                PaymentError::Configuration(format!(
                    "Stripe API base URL cannot carry a path: {}",
                    self.config.api_base_url
                ))
            })?
            .pop_if_empty()
            .extend(segments);

        Ok(url)
    }

    /// Send an authenticated request and decode the JSON body
    async fn execute<T: DeserializeOwned>(&self, request: RequestBuilder) -> PaymentResult<T> {
        let response = request
            .header("Authorization", self.config.auth_header())
            .header("Stripe-Version", &self.config.api_version)
            .send()
            .await
            .map_err(|e| PaymentError::NetworkError(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| PaymentError::NetworkError(e.to_string()))?;

        if !status.is_success() {
            error!("Stripe API error: status={}, body={}", status, body);

            if let Ok(error_response) = serde_json::from_str::<StripeErrorResponse>(&body) {
                return Err(PaymentError::ProviderError {
                    provider: PROVIDER.to_string(),
                    message: error_response.error.describe(),
                });
            }

            return Err(PaymentError::ProviderError {
                provider: PROVIDER.to_string(),
                message: format!("HTTP {}: {}", status, body),
            });
        }

        serde_json::from_str(&body).map_err(|e| {
            PaymentError::Serialization(format!("Failed to parse Stripe response: {}", e))
        })
    }

    /// Fetch every page of a list endpoint
    async fn list_all<T>(&self, resource: &str) -> PaymentResult<Vec<T>>
    where
        T: DeserializeOwned + StripeObject,
    {
        let url = self.endpoint(&["v1", resource])?;
        let mut items: Vec<T> = Vec::new();
        let mut starting_after: Option<String> = None;

        loop {
            let mut query = vec![("limit", LIST_PAGE_SIZE.to_string())];
            if let Some(ref cursor) = starting_after {
                query.push(("starting_after", cursor.clone()));
            }

            let page: StripeList<T> = self
                .execute(self.client.get(url.clone()).query(&query))
                .await?;

            debug!(
                "Fetched {} {} (has_more={})",
                page.data.len(),
                resource,
                page.has_more
            );

            let next_cursor = page.data.last().map(|item| item.id().to_string());
            items.extend(page.data);

            match next_cursor {
                Some(cursor) if page.has_more => starting_after = Some(cursor),
                _ => break,
            }
        }

        Ok(items)
    }
}

#[async_trait]
impl PaymentProvider for StripeProvider {
    #[instrument(skip(self))]
    async fn list_products(&self) -> PaymentResult<Vec<ProviderProduct>> {
        let products: Vec<StripeProduct> = self.list_all("products").await?;
        Ok(products.into_iter().map(Into::into).collect())
    }

    #[instrument(skip(self))]
    async fn list_prices(&self) -> PaymentResult<Vec<ProviderPrice>> {
        let prices: Vec<StripePrice> = self.list_all("prices").await?;
        Ok(prices.into_iter().map(Into::into).collect())
    }

    #[instrument(skip(self))]
    async fn retrieve_product(&self, product_id: &str) -> PaymentResult<ProviderProduct> {
        let url = self.endpoint(&["v1", "products", product_id])?;
        let product: StripeProduct = self.execute(self.client.get(url)).await?;
        Ok(product.into())
    }

    #[instrument(skip(self))]
    async fn retrieve_price(&self, price_id: &str) -> PaymentResult<ProviderPrice> {
        let url = self.endpoint(&["v1", "prices", price_id])?;
        let price: StripePrice = self.execute(self.client.get(url)).await?;
        Ok(price.into())
    }

    #[instrument(skip(self, params), fields(amount = params.amount, currency = %params.currency))]
    async fn create_payment_intent(
        &self,
        params: &PaymentIntentParams,
    ) -> PaymentResult<PaymentIntent> {
        let url = self.endpoint(&["v1", "payment_intents"])?;
        let form_params = build_intent_form(params);

        let mut request = self.client.post(url).form(&form_params);
        if let Some(ref key) = params.idempotency_key {
            request = request.header("Idempotency-Key", key);
        }

        let intent: StripePaymentIntent = self.execute(request).await?;

        let client_secret = intent.client_secret.ok_or_else(|| {
            PaymentError::Serialization(format!(
                "Payment intent {} returned without a client_secret",
                intent.id
            ))
        })?;

        info!("Created Stripe payment intent: id={}", intent.id);

        Ok(PaymentIntent {
            id: intent.id,
            client_secret,
            amount: intent.amount,
            currency: intent.currency,
            status: intent.status,
        })
    }

    fn provider_name(&self) -> &'static str {
        PROVIDER
    }
}

/// Form-encode payment intent parameters
fn build_intent_form(params: &PaymentIntentParams) -> Vec<(String, String)> {
    let mut form_params = vec![
        ("amount".to_string(), params.amount.to_string()),
        ("currency".to_string(), params.currency.clone()),
        ("description".to_string(), params.description.clone()),
    ];

    for (i, method) in params.payment_method_types.iter().enumerate() {
        form_params.push((format!("payment_method_types[{}]", i), method.clone()));
    }

    form_params
}

// =============================================================================
// Stripe API Types
// =============================================================================

/// Any Stripe object addressable by ID (used as a pagination cursor)
trait StripeObject {
    fn id(&self) -> &str;
}

#[derive(Debug, Deserialize)]
struct StripeList<T> {
    data: Vec<T>,
    #[serde(default)]
    has_more: bool,
}

#[derive(Debug, Deserialize)]
struct StripeProduct {
    id: String,
    #[serde(default)]
    name: String,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    default_price: Option<String>,
}

impl StripeObject for StripeProduct {
    fn id(&self) -> &str {
        &self.id
    }
}

impl From<StripeProduct> for ProviderProduct {
    fn from(product: StripeProduct) -> Self {
        ProviderProduct {
            id: product.id,
            name: product.name,
            description: product.description,
            default_price: product.default_price,
        }
    }
}

#[derive(Debug, Deserialize)]
struct StripePrice {
    id: String,
    product: String,
    #[serde(default)]
    unit_amount: Option<i64>,
    currency: String,
}

impl StripeObject for StripePrice {
    fn id(&self) -> &str {
        &self.id
    }
}

impl From<StripePrice> for ProviderPrice {
    fn from(price: StripePrice) -> Self {
        ProviderPrice {
            id: price.id,
            product: price.product,
            unit_amount: price.unit_amount,
            currency: price.currency,
        }
    }
}

#[derive(Debug, Deserialize)]
struct StripePaymentIntent {
    id: String,
    #[serde(default)]
    client_secret: Option<String>,
    amount: i64,
    currency: String,
    #[serde(default)]
    status: String,
}

#[derive(Debug, Deserialize)]
struct StripeErrorResponse {
    error: StripeError,
}

#[derive(Debug, Deserialize)]
struct StripeError {
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    code: Option<String>,
    #[serde(rename = "type", default)]
    error_type: Option<String>,
}

impl StripeError {
    fn describe(&self) -> String {
        let message = self.message.as_deref().unwrap_or("unknown error");
        match (&self.error_type, &self.code) {
            (Some(kind), Some(code)) => format!("{} ({}/{})", message, kind, code),
            (Some(kind), None) => format!("{} ({})", message, kind),
            (None, Some(code)) => format!("{} ({})", message, code),
            (None, None) => message.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn provider(base_url: &str) -> StripeProvider {
        StripeProvider::new(StripeConfig::new("sk_test_abc").with_api_base_url(base_url)).unwrap()
    }

    #[test]
    fn test_endpoint_encodes_segments() {
        let url = provider("https://api.stripe.com")
            .endpoint(&["v1", "products", "prod/../x?y"])
            .unwrap();

        assert_eq!(
            url.as_str(),
            "https://api.stripe.com/v1/products/prod%2F..%2Fx%3Fy"
        );
    }

    #[test]
    fn test_endpoint_keeps_base_path() {
        let url = provider("http://localhost:12111/stripe")
            .endpoint(&["v1", "prices"])
            .unwrap();

        assert_eq!(url.as_str(), "http://localhost:12111/stripe/v1/prices");
    }

    #[test]
    fn test_build_intent_form() {
        let params = PaymentIntentParams {
            amount: 1999,
            currency: "usd".into(),
            payment_method_types: vec!["card".into()],
            description: "Payment for package ID: prod_1".into(),
            idempotency_key: None,
        };

        let form = build_intent_form(&params);

        assert!(form.contains(&("amount".to_string(), "1999".to_string())));
        assert!(form.contains(&("currency".to_string(), "usd".to_string())));
        assert!(form.contains(&("payment_method_types[0]".to_string(), "card".to_string())));
        assert!(form.contains(&(
            "description".to_string(),
            "Payment for package ID: prod_1".to_string()
        )));
    }

    #[test]
    fn test_error_description() {
        let body = r#"{"error":{
            "message":"No such product: 'prod_x'",
            "type":"invalid_request_error",
            "code":"resource_missing"
        }}"#;
        let parsed: StripeErrorResponse = serde_json::from_str(body).unwrap();

        assert_eq!(
            parsed.error.describe(),
            "No such product: 'prod_x' (invalid_request_error/resource_missing)"
        );
    }

    #[test]
    fn test_product_conversion_defaults() {
        let product: StripeProduct = serde_json::from_str(
            r#"{"id":"prod_1","object":"product","name":"Starter","description":null}"#,
        )
        .unwrap();
        let product: ProviderProduct = product.into();

        assert_eq!(product, ProviderProduct::new("prod_1", "Starter"));
    }
}
