//! A fixed rate table.
//!
//! Serves the configured fallback rates and stands in for a live provider in
//! tests. Inverse pairs are answered from the forward entry.

use async_trait::async_trait;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::collections::HashMap;

use crate::errors::RatesError;
use crate::models::{CurrencyPair, DailyRate};
use crate::provider::RateProvider;

const PROVIDER_ID: &str = "STATIC";

pub struct StaticRateProvider {
    rates: HashMap<CurrencyPair, Decimal>,
    as_of: NaiveDate,
}

impl StaticRateProvider {
    pub fn new(as_of: NaiveDate) -> Self {
        Self {
            rates: HashMap::new(),
            as_of,
        }
    }

    pub fn with_rate(mut self, pair: CurrencyPair, rate: Decimal) -> Self {
        self.rates.insert(pair, rate);
        self
    }

    /// Builds a table from `"EUR/USD" -> rate` entries, skipping malformed keys.
    pub fn from_keyed(entries: &HashMap<String, Decimal>, as_of: NaiveDate) -> Self {
        let rates = entries
            .iter()
            .filter_map(|(key, rate)| CurrencyPair::parse(key).ok().map(|pair| (pair, *rate)))
            .collect();
        Self { rates, as_of }
    }

    pub fn lookup(&self, pair: &CurrencyPair) -> Option<DailyRate> {
        if pair.is_identity() {
            return Some(DailyRate::new(pair.clone(), Decimal::ONE, self.as_of, PROVIDER_ID));
        }
        if let Some(rate) = self.rates.get(pair) {
            return Some(DailyRate::new(pair.clone(), *rate, self.as_of, PROVIDER_ID));
        }
        self.rates
            .get(&pair.inverse())
            .map(|rate| DailyRate::new(pair.inverse(), *rate, self.as_of, PROVIDER_ID))
            .and_then(|forward| forward.inverse())
    }

    pub fn is_empty(&self) -> bool {
        self.rates.is_empty()
    }
}

#[async_trait]
impl RateProvider for StaticRateProvider {
    fn id(&self) -> &'static str {
        PROVIDER_ID
    }

    fn priority(&self) -> u8 {
        50
    }

    async fn fetch_daily_rate(&self, pair: &CurrencyPair) -> Result<DailyRate, RatesError> {
        self.lookup(pair).ok_or_else(|| RatesError::UnsupportedPair {
            base: pair.base.clone(),
            quote: pair.quote.clone(),
        })
    }
}
