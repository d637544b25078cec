use studybudget_rates::{RatesError, RetryClass};
use thiserror::Error;

/// Failures of an explicit rate lookup. Normalization itself never returns
/// these; it degrades instead.
#[derive(Error, Debug)]
pub enum FxError {
    #[error("Invalid currency code: {0}")]
    InvalidCurrencyCode(String),

    #[error("Exchange rate not found: {0}")]
    RateNotFound(String),

    #[error("Rate provider failed: {message}")]
    ProviderError { message: String, retryable: bool },

    #[error("Rate cache error: {0}")]
    CacheError(String),
}

impl From<RatesError> for FxError {
    fn from(err: RatesError) -> Self {
        match err {
            RatesError::InvalidCurrency(code) => FxError::InvalidCurrencyCode(code),
            RatesError::UnsupportedPair { base, quote } => {
                FxError::RateNotFound(format!("{}/{}", base, quote))
            }
            other => FxError::ProviderError {
                retryable: other.retry_class() != RetryClass::Never,
                message: other.to_string(),
            },
        }
    }
}

impl From<RatesError> for crate::errors::Error {
    fn from(err: RatesError) -> Self {
        crate::errors::Error::Fx(err.into())
    }
}
