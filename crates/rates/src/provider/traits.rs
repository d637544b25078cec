//! Rate provider trait definition.

use async_trait::async_trait;

use crate::errors::RatesError;
use crate::models::{CurrencyPair, DailyRate};

/// Trait for exchange-rate providers.
///
/// # Example
///
/// ```ignore
/// use async_trait::async_trait;
/// use studybudget_rates::{CurrencyPair, DailyRate, RateProvider, RatesError};
///
/// struct MyProvider;
///
/// #[async_trait]
/// impl RateProvider for MyProvider {
///     fn id(&self) -> &'static str {
///         "MY_PROVIDER"
///     }
///
///     async fn fetch_daily_rate(&self, pair: &CurrencyPair) -> Result<DailyRate, RatesError> {
///         // ... call the upstream service
///     }
/// }
/// ```
#[async_trait]
pub trait RateProvider: Send + Sync {
    /// Unique identifier for this provider, e.g. "FRANKFURTER".
    fn id(&self) -> &'static str;

    /// Lower values = higher priority. Default is 10.
    fn priority(&self) -> u8 {
        10
    }

    /// Fetch the most recent published rate for `pair`.
    ///
    /// The returned rate's `as_of` is the publication date reported by the
    /// provider, which may be earlier than today (weekends, holidays).
    async fn fetch_daily_rate(&self, pair: &CurrencyPair) -> Result<DailyRate, RatesError>;
}
