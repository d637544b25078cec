//! Home-currency normalization with a once-a-day rate cache.
//!
//! Lookup order for a foreign currency:
//!
//! 1. a rate already fetched today
//! 2. the rate source
//! 3. the last rate fetched on an earlier day
//! 4. the configured fallback rates (either direction)
//! 5. one to one
//!
//! Steps 3 to 5 attach a warning. Only malformed input is an error.
//! A failed fetch is remembered for the rest of that day, so the source is
//! asked at most once per pair per day.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use chrono::NaiveDate;
use log::{debug, warn};
use rust_decimal::Decimal;
use studybudget_rates::models::normalize_code;
use studybudget_rates::{CurrencyPair, StaticRateProvider};

use super::fx_errors::FxError;
use super::fx_model::{to_home_amount, NormalizedAmount, RateFreshness};
use super::fx_traits::DailyRateSourceTrait;
use crate::errors::{Error, Result};
use crate::settings::EngineSettings;
use crate::utils::validation::ensure_non_negative;

#[derive(Debug, Clone, Copy)]
struct CachedRate {
    rate: Decimal,
    as_of: NaiveDate,
    fetched_on: NaiveDate,
}

#[derive(Debug, Clone)]
struct FailedFetch {
    attempted_on: NaiveDate,
    reason: String,
}

#[derive(Clone)]
pub struct CurrencyNormalizer {
    source: Arc<dyn DailyRateSourceTrait>,
    settings: Arc<EngineSettings>,
    cache: Arc<RwLock<HashMap<CurrencyPair, CachedRate>>>,
    failures: Arc<RwLock<HashMap<CurrencyPair, FailedFetch>>>,
}

struct ResolvedRate {
    rate: Decimal,
    as_of: Option<NaiveDate>,
    freshness: RateFreshness,
    warning: Option<String>,
}

impl CurrencyNormalizer {
    pub fn new(source: Arc<dyn DailyRateSourceTrait>, settings: Arc<EngineSettings>) -> Self {
        Self {
            source,
            settings,
            cache: Arc::new(RwLock::new(HashMap::new())),
            failures: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    pub fn home_currency(&self) -> &str {
        &self.settings.home_currency
    }

    /// Converts `amount` in `currency` into the home currency as of `today`.
    pub async fn normalize(
        &self,
        amount: Decimal,
        currency: &str,
        include_fee: bool,
        today: NaiveDate,
    ) -> Result<NormalizedAmount> {
        ensure_non_negative("amount", amount)?;
        let currency = Self::parse_code(currency)?;
        let home = Self::parse_code(&self.settings.home_currency)?;

        let resolved = if currency == home {
            ResolvedRate {
                rate: Decimal::ONE,
                as_of: Some(today),
                freshness: RateFreshness::Fresh,
                warning: None,
            }
        } else {
            let pair = CurrencyPair {
                base: currency.clone(),
                quote: home.clone(),
            };
            self.resolve_rate(&pair, today).await
        };

        // Same-currency entries never carry a conversion fee.
        let fee_applied = include_fee && currency != home;
        Ok(NormalizedAmount {
            original_amount: amount,
            home_amount: to_home_amount(
                amount,
                resolved.rate,
                fee_applied,
                self.settings.conversion_fee_rate,
            ),
            currency,
            home_currency: home,
            rate: resolved.rate,
            as_of: resolved.as_of,
            fee_applied,
            freshness: resolved.freshness,
            warning: resolved.warning,
        })
    }

    /// The cached rate for a pair, if any was fetched.
    pub fn cached_rate(&self, base: &str, quote: &str) -> Option<(Decimal, NaiveDate)> {
        let pair = CurrencyPair::new(base, quote).ok()?;
        let cache = self.cache.read().ok()?;
        cache.get(&pair).map(|c| (c.rate, c.as_of))
    }

    /// Drops every cached rate and remembered failure, forcing a fetch on
    /// the next conversion.
    pub fn clear_cache(&self) -> std::result::Result<(), FxError> {
        self.cache
            .write()
            .map_err(|e| FxError::CacheError(e.to_string()))?
            .clear();
        self.failures
            .write()
            .map_err(|e| FxError::CacheError(e.to_string()))?
            .clear();
        Ok(())
    }

    fn parse_code(code: &str) -> Result<String> {
        normalize_code(code)
            .map_err(|_| Error::invalid_input(format!("'{}' is not a currency code", code)))
    }

    fn cached(&self, pair: &CurrencyPair) -> Option<CachedRate> {
        match self.cache.read() {
            Ok(cache) => cache.get(pair).copied(),
            Err(e) => {
                warn!("Rate cache unreadable, fetching instead: {}", e);
                None
            }
        }
    }

    fn store(&self, pair: &CurrencyPair, entry: CachedRate) {
        match self.cache.write() {
            Ok(mut cache) => {
                cache.insert(pair.clone(), entry);
            }
            Err(e) => warn!("Rate cache unwritable, {} not cached: {}", pair, e),
        }
    }

    fn failed_today(&self, pair: &CurrencyPair, today: NaiveDate) -> Option<String> {
        let failures = self.failures.read().ok()?;
        failures
            .get(pair)
            .filter(|f| f.attempted_on == today)
            .map(|f| f.reason.clone())
    }

    fn remember_failure(&self, pair: &CurrencyPair, today: NaiveDate, reason: &str) {
        match self.failures.write() {
            Ok(mut failures) => {
                failures.insert(
                    pair.clone(),
                    FailedFetch {
                        attempted_on: today,
                        reason: reason.to_string(),
                    },
                );
            }
            Err(e) => warn!("Rate failure log unwritable for {}: {}", pair, e),
        }
    }

    async fn fetch(
        &self,
        pair: &CurrencyPair,
        today: NaiveDate,
    ) -> std::result::Result<CachedRate, String> {
        if let Some(reason) = self.failed_today(pair, today) {
            debug!("Skipping fetch for {}, already failed on {}", pair, today);
            return Err(reason);
        }

        let failure = match self.source.get_daily_rate(&pair.base, &pair.quote).await {
            Ok(daily) if daily.rate > Decimal::ZERO => {
                debug!("Fetched {} = {} (as of {})", pair, daily.rate, daily.as_of);
                let entry = CachedRate {
                    rate: daily.rate,
                    as_of: daily.as_of,
                    fetched_on: today,
                };
                self.store(pair, entry);
                return Ok(entry);
            }
            Ok(daily) => format!("source returned a non-positive rate {}", daily.rate),
            Err(e) => e.to_string(),
        };
        warn!("Rate fetch for {} failed: {}", pair, failure);
        self.remember_failure(pair, today, &failure);
        Err(failure)
    }

    async fn resolve_rate(&self, pair: &CurrencyPair, today: NaiveDate) -> ResolvedRate {
        let cached = self.cached(pair);
        if let Some(entry) = cached.filter(|c| c.fetched_on == today) {
            return ResolvedRate {
                rate: entry.rate,
                as_of: Some(entry.as_of),
                freshness: RateFreshness::Fresh,
                warning: None,
            };
        }

        let failure = match self.fetch(pair, today).await {
            Ok(entry) => {
                return ResolvedRate {
                    rate: entry.rate,
                    as_of: Some(entry.as_of),
                    freshness: RateFreshness::Fresh,
                    warning: None,
                };
            }
            Err(reason) => reason,
        };

        if let Some(entry) = cached {
            return ResolvedRate {
                rate: entry.rate,
                as_of: Some(entry.as_of),
                freshness: RateFreshness::Cached,
                warning: Some(format!(
                    "Using the {} rate from {} for {}: {}",
                    pair, entry.as_of, today, failure
                )),
            };
        }

        let fallback = StaticRateProvider::from_keyed(&self.settings.fallback_rates, today);
        if let Some(daily) = fallback.lookup(pair) {
            return ResolvedRate {
                rate: daily.rate,
                as_of: None,
                freshness: RateFreshness::Fallback,
                warning: Some(format!(
                    "Using the configured fallback rate for {}: {}",
                    pair, failure
                )),
            };
        }

        ResolvedRate {
            rate: Decimal::ONE,
            as_of: None,
            freshness: RateFreshness::Unavailable,
            warning: Some(format!(
                "No rate available for {}; amount left unconverted: {}",
                pair, failure
            )),
        }
    }
}
