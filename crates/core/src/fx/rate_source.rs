use std::sync::Arc;

use async_trait::async_trait;
use log::debug;
use studybudget_rates::{CurrencyPair, DailyRate, FrankfurterProvider, RateProvider};

use super::fx_errors::FxError;
use super::fx_traits::DailyRateSourceTrait;
use crate::settings::EngineSettings;

/// Serves daily rates from any [`RateProvider`].
pub struct RateProviderSource {
    provider: Arc<dyn RateProvider>,
}

impl RateProviderSource {
    pub fn new(provider: Arc<dyn RateProvider>) -> Self {
        Self { provider }
    }

    /// The HTTP provider, pointed at `rateProviderUrl` when one is configured.
    pub fn from_settings(settings: &EngineSettings) -> Self {
        let provider = match settings.rate_provider_url.as_deref() {
            Some(url) => FrankfurterProvider::with_base_url(url),
            None => FrankfurterProvider::new(),
        };
        Self::new(Arc::new(provider))
    }
}

#[async_trait]
impl DailyRateSourceTrait for RateProviderSource {
    async fn get_daily_rate(&self, base: &str, quote: &str) -> Result<DailyRate, FxError> {
        let pair = CurrencyPair::new(base, quote)?;
        debug!("Fetching {} from {}", pair, self.provider.id());
        Ok(self.provider.fetch_daily_rate(&pair).await?)
    }
}
