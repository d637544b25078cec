use async_trait::async_trait;

use super::fx_errors::FxError;
use studybudget_rates::DailyRate;

/// The external currency service: today's rate for one pair.
#[async_trait]
pub trait DailyRateSourceTrait: Send + Sync {
    async fn get_daily_rate(&self, base: &str, quote: &str) -> Result<DailyRate, FxError>;
}
