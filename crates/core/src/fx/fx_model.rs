use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::constants::DECIMAL_PRECISION;

/// `amount * rate`, plus the conversion fee when requested.
///
/// ```
/// use rust_decimal_macros::dec;
/// use studybudget_core::fx::to_home_amount;
///
/// assert_eq!(to_home_amount(dec!(100), dec!(1.1), true, dec!(0.03)), dec!(113.3));
/// assert_eq!(to_home_amount(dec!(100), dec!(1.1), false, dec!(0.03)), dec!(110));
/// ```
pub fn to_home_amount(
    amount: Decimal,
    rate: Decimal,
    include_fee: bool,
    fee_rate: Decimal,
) -> Decimal {
    let converted = amount * rate;
    let converted = if include_fee {
        converted * (Decimal::ONE + fee_rate)
    } else {
        converted
    };
    converted.round_dp(DECIMAL_PRECISION)
}

/// Where the rate behind a conversion came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RateFreshness {
    /// Same currency, or a rate fetched today.
    Fresh,
    /// An earlier day's rate, kept because today's fetch failed.
    Cached,
    /// A configured fallback rate.
    Fallback,
    /// No rate at all; converted one to one.
    Unavailable,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NormalizedAmount {
    pub original_amount: Decimal,
    pub currency: String,
    pub home_currency: String,
    pub home_amount: Decimal,
    pub rate: Decimal,
    pub as_of: Option<NaiveDate>,
    pub fee_applied: bool,
    pub freshness: RateFreshness,
    /// Set whenever the rate is not fresh.
    pub warning: Option<String>,
}

impl NormalizedAmount {
    pub fn is_degraded(&self) -> bool {
        self.freshness != RateFreshness::Fresh
    }
}
