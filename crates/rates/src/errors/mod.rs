//! Error types and retry classification for the rates crate.

mod retry;

pub use retry::RetryClass;

use thiserror::Error;

/// Errors that can occur while fetching exchange rates.
#[derive(Error, Debug)]
pub enum RatesError {
    /// The currency code is not a three-letter ISO 4217 code.
    #[error("Invalid currency code: {0}")]
    InvalidCurrency(String),

    /// The provider does not quote the requested pair.
    #[error("Unsupported currency pair: {base}/{quote}")]
    UnsupportedPair { base: String, quote: String },

    /// The provider rate limited the request (HTTP 429).
    #[error("Rate limited: {provider}")]
    RateLimited { provider: String },

    /// The request to the provider timed out.
    #[error("Timeout: {provider}")]
    Timeout { provider: String },

    /// A provider-specific error occurred.
    #[error("Provider error: {provider} - {message}")]
    ProviderError { provider: String, message: String },

    /// The provider answered with data that makes no sense (zero or negative rate).
    #[error("Validation failed: {message}")]
    ValidationFailed { message: String },

    /// A network error occurred while communicating with a provider.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
}

impl RatesError {
    /// Returns the retry classification for this error.
    ///
    /// ```
    /// use studybudget_rates::errors::{RatesError, RetryClass};
    ///
    /// let error = RatesError::RateLimited { provider: "FRANKFURTER".to_string() };
    /// assert_eq!(error.retry_class(), RetryClass::WithBackoff);
    ///
    /// let error = RatesError::InvalidCurrency("EURO".to_string());
    /// assert_eq!(error.retry_class(), RetryClass::Never);
    /// ```
    pub fn retry_class(&self) -> RetryClass {
        match self {
            Self::InvalidCurrency(_) | Self::ValidationFailed { .. } => RetryClass::Never,

            Self::RateLimited { .. } | Self::Timeout { .. } => RetryClass::WithBackoff,

            Self::UnsupportedPair { .. } | Self::ProviderError { .. } => RetryClass::NextProvider,

            Self::Network(e) if e.is_timeout() => RetryClass::WithBackoff,
            Self::Network(_) => RetryClass::NextProvider,
        }
    }
}
