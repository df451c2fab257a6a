//! # Application State
//!
//! Shared state for the Axum application.
//! Holds the payment provider and the public configuration.

use pay_core::{BoxedPaymentProvider, PaymentError};
use pay_stripe::StripeProvider;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

/// Application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Host to bind to
    pub host: String,
    /// Port to listen on
    pub port: u16,
    /// Publishable key handed to the front-end (empty when unset)
    pub publishable_key: String,
    /// Directory with the front-end bundle
    pub static_dir: PathBuf,
    /// Allowed CORS origins; empty means any origin
    pub cors_allowed_origins: Vec<String>,
    /// Environment (development, staging, production)
    pub environment: String,
}

impl AppConfig {
    /// Load from environment variables
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        Self {
            host: std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: std::env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(3001),
            publishable_key: std::env::var("STRIPE_PUBLISHABLE_KEY").unwrap_or_default(),
            static_dir: std::env::var("STATIC_DIR")
                .unwrap_or_else(|_| "public".to_string())
                .into(),
            cors_allowed_origins: std::env::var("CORS_ALLOWED_ORIGINS")
                .map(|raw| parse_origins(&raw))
                .unwrap_or_default(),
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".to_string()),
        }
    }

    /// Get the socket address to bind to
    pub fn socket_addr(&self) -> Result<SocketAddr, PaymentError> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .map_err(|e| {
                PaymentError::Configuration(format!(
                    "Invalid socket address {}:{}: {}",
                    self.host, self.port, e
                ))
            })
    }

    /// Check if running in production
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    /// Builder: set publishable key
    pub fn with_publishable_key(mut self, key: impl Into<String>) -> Self {
        self.publishable_key = key.into();
        self
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3001,
            publishable_key: String::new(),
            static_dir: PathBuf::from("public"),
            cors_allowed_origins: Vec::new(),
            environment: "development".to_string(),
        }
    }
}

fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|origin| !origin.is_empty())
        .map(String::from)
        .collect()
}

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Payment provider shared by all requests
    pub provider: BoxedPaymentProvider,
    /// Application config
    pub config: Arc<AppConfig>,
}

impl AppState {
    /// Create state from explicit dependencies
    pub fn new(provider: BoxedPaymentProvider, config: AppConfig) -> Self {
        Self {
            provider,
            config: Arc::new(config),
        }
    }

    /// Create state from the environment with the Stripe provider
    pub fn from_env() -> anyhow::Result<Self> {
        let config = AppConfig::from_env();

        let stripe = StripeProvider::from_env()
            .map_err(|e| anyhow::anyhow!("Failed to initialize Stripe: {}", e))?;

        Ok(Self::new(Arc::new(stripe), config))
    }
}
