//! Rate data models.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::errors::RatesError;

/// A validated base/quote currency pair (ISO 4217 codes, upper case).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrencyPair {
    pub base: String,
    pub quote: String,
}

impl CurrencyPair {
    pub fn new(base: &str, quote: &str) -> Result<Self, RatesError> {
        Ok(Self {
            base: normalize_code(base)?,
            quote: normalize_code(quote)?,
        })
    }

    /// Parses a `"EUR/USD"` style key.
    pub fn parse(key: &str) -> Result<Self, RatesError> {
        let (base, quote) = key
            .split_once('/')
            .ok_or_else(|| RatesError::InvalidCurrency(key.to_string()))?;
        Self::new(base.trim(), quote.trim())
    }

    pub fn inverse(&self) -> Self {
        Self {
            base: self.quote.clone(),
            quote: self.base.clone(),
        }
    }

    pub fn is_identity(&self) -> bool {
        self.base == self.quote
    }
}

impl fmt::Display for CurrencyPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.base, self.quote)
    }
}

/// Upper-cases and validates a three-letter currency code.
pub fn normalize_code(code: &str) -> Result<String, RatesError> {
    let trimmed = code.trim();
    if trimmed.len() != 3 || !trimmed.chars().all(|c| c.is_ascii_alphabetic()) {
        return Err(RatesError::InvalidCurrency(code.to_string()));
    }
    Ok(trimmed.to_ascii_uppercase())
}

/// One exchange rate: `1 base = rate quote`, published for `as_of`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyRate {
    pub pair: CurrencyPair,
    pub rate: Decimal,
    pub as_of: NaiveDate,
    pub provider: String,
}

impl DailyRate {
    pub fn new(pair: CurrencyPair, rate: Decimal, as_of: NaiveDate, provider: &str) -> Self {
        Self {
            pair,
            rate,
            as_of,
            provider: provider.to_string(),
        }
    }

    /// The same quote seen from the other side of the pair.
    /// Returns `None` for a zero rate.
    pub fn inverse(&self) -> Option<Self> {
        if self.rate.is_zero() {
            return None;
        }
        Some(Self {
            pair: self.pair.inverse(),
            rate: Decimal::ONE / self.rate,
            as_of: self.as_of,
            provider: self.provider.clone(),
        })
    }
}
