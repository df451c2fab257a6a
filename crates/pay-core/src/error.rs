//! # Payment Error Types
//!
//! Typed error handling for pay-relay.
//! All provider calls and workflows return `Result<T, PaymentError>`.

use thiserror::Error;

/// Core error type for all payment operations
#[derive(Debug, Error)]
pub enum PaymentError {
    /// Configuration errors (missing keys, invalid config)
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Invalid request data (missing required fields)
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// The package has no usable price to charge
    #[error("Price not found for package {package_id}: {reason}")]
    PriceNotFound { package_id: String, reason: String },

    /// Payment provider API error
    #[error("Provider error [{provider}]: {message}")]
    ProviderError { provider: String, message: String },

    /// Network/HTTP error communicating with provider
    #[error("Network error: {0}")]
    NetworkError(String),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl PaymentError {
    /// Returns the HTTP status code appropriate for this error.
    ///
    /// Everything that originates upstream collapses to 500; callers only
    /// branch on 400 and 404.
    pub fn status_code(&self) -> u16 {
        match self {
            PaymentError::InvalidRequest(_) => 400,
            PaymentError::PriceNotFound { .. } => 404,
            PaymentError::Configuration(_)
            | PaymentError::ProviderError { .. }
            | PaymentError::NetworkError(_)
            | PaymentError::Serialization(_) => 500,
        }
    }

    /// Returns true if the failure happened on the provider side
    pub fn is_upstream(&self) -> bool {
        self.status_code() >= 500
    }
}

/// Result type alias for payment operations
pub type PaymentResult<T> = Result<T, PaymentError>;
