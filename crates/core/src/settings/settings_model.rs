use log::debug;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::str::FromStr;

use crate::errors::{Error, Result};

pub const ENV_HOME_CURRENCY: &str = "SB_HOME_CURRENCY";
pub const ENV_CONVERSION_FEE_RATE: &str = "SB_CONVERSION_FEE_RATE";
pub const ENV_LOW_BALANCE_RATIO: &str = "SB_LOW_BALANCE_RATIO";
pub const ENV_LOW_WEEK_BALANCE_RATIO: &str = "SB_LOW_WEEK_BALANCE_RATIO";
pub const ENV_INCLUDE_WISHLIST: &str = "SB_INCLUDE_WISHLIST";
pub const ENV_RATE_PROVIDER_URL: &str = "SB_RATE_PROVIDER_URL";

/// Tunables for the allocation engine and the currency normalizer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EngineSettings {
    pub home_currency: String,
    /// Surcharge applied when a conversion is made "with fee" (0.03 = 3%).
    pub conversion_fee_rate: Decimal,
    /// Below this share of the limit the budget is "running low".
    pub low_balance_ratio: Decimal,
    /// Below this share of the week's budget the week is "running low".
    pub low_week_balance_ratio: Decimal,
    pub include_wishlist_by_default: bool,
    /// Last-resort rates keyed `"EUR/USD"`, used when nothing was ever fetched.
    pub fallback_rates: HashMap<String, Decimal>,
    pub rate_provider_url: Option<String>,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            home_currency: "USD".to_string(),
            conversion_fee_rate: Decimal::new(3, 2),
            low_balance_ratio: Decimal::new(10, 2),
            low_week_balance_ratio: Decimal::new(20, 2),
            include_wishlist_by_default: false,
            fallback_rates: HashMap::new(),
            rate_provider_url: None,
        }
    }
}

impl EngineSettings {
    pub fn from_json(json: &str) -> Result<Self> {
        let settings: EngineSettings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Reads overrides from `SB_*` environment variables on top of the defaults.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut settings = EngineSettings::default();

        if let Some(value) = lookup(ENV_HOME_CURRENCY) {
            settings.home_currency = value.trim().to_ascii_uppercase();
        }
        if let Some(value) = lookup(ENV_CONVERSION_FEE_RATE) {
            settings.conversion_fee_rate = parse_decimal(ENV_CONVERSION_FEE_RATE, &value)?;
        }
        if let Some(value) = lookup(ENV_LOW_BALANCE_RATIO) {
            settings.low_balance_ratio = parse_decimal(ENV_LOW_BALANCE_RATIO, &value)?;
        }
        if let Some(value) = lookup(ENV_LOW_WEEK_BALANCE_RATIO) {
            settings.low_week_balance_ratio = parse_decimal(ENV_LOW_WEEK_BALANCE_RATIO, &value)?;
        }
        if let Some(value) = lookup(ENV_INCLUDE_WISHLIST) {
            settings.include_wishlist_by_default = value.trim().parse().map_err(|_| {
                Error::InvalidConfigValue(format!("{}='{}' is not a boolean", ENV_INCLUDE_WISHLIST, value))
            })?;
        }
        if let Some(value) = lookup(ENV_RATE_PROVIDER_URL) {
            settings.rate_provider_url = Some(value.trim().to_string());
        }

        settings.validate()?;
        debug!("Loaded engine settings: home currency {}", settings.home_currency);
        Ok(settings)
    }

    pub fn validate(&self) -> Result<()> {
        let code = self.home_currency.as_str();
        if code.len() != 3 || !code.chars().all(|c| c.is_ascii_uppercase()) {
            return Err(Error::InvalidConfigValue(format!(
                "homeCurrency '{}' is not an ISO 4217 code",
                code
            )));
        }

        for (name, ratio) in [
            ("conversionFeeRate", self.conversion_fee_rate),
            ("lowBalanceRatio", self.low_balance_ratio),
            ("lowWeekBalanceRatio", self.low_week_balance_ratio),
        ] {
            if ratio < Decimal::ZERO || ratio > Decimal::ONE {
                return Err(Error::InvalidConfigValue(format!(
                    "{} must be between 0 and 1 (got {})",
                    name, ratio
                )));
            }
        }

        if let Some((key, rate)) = self.fallback_rates.iter().find(|(_, r)| **r <= Decimal::ZERO) {
            return Err(Error::InvalidConfigValue(format!(
                "fallback rate {} must be positive (got {})",
                key, rate
            )));
        }

        Ok(())
    }
}

fn parse_decimal(key: &str, value: &str) -> Result<Decimal> {
    Decimal::from_str(value.trim())
        .map_err(|_| Error::InvalidConfigValue(format!("{}='{}' is not a number", key, value)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_defaults() {
        let settings = EngineSettings::default();
        assert_eq!(settings.home_currency, "USD");
        assert_eq!(settings.conversion_fee_rate, dec!(0.03));
        assert_eq!(settings.low_balance_ratio, dec!(0.10));
        assert_eq!(settings.low_week_balance_ratio, dec!(0.20));
        assert!(!settings.include_wishlist_by_default);
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_from_json_partial() {
        let settings = EngineSettings::from_json(
            r#"{"homeCurrency":"EUR","fallbackRates":{"USD/EUR":0.92}}"#,
        )
        .unwrap();
        assert_eq!(settings.home_currency, "EUR");
        assert_eq!(settings.fallback_rates.get("USD/EUR"), Some(&dec!(0.92)));
        assert_eq!(settings.conversion_fee_rate, dec!(0.03));
    }

    #[test]
    fn test_from_json_rejects_bad_ratio() {
        let result = EngineSettings::from_json(r#"{"lowBalanceRatio":1.5}"#);
        assert!(matches!(result, Err(Error::InvalidConfigValue(_))));
    }

    #[test]
    fn test_from_lookup_overrides() {
        let settings = EngineSettings::from_lookup(|key| match key {
            ENV_HOME_CURRENCY => Some("gbp".to_string()),
            ENV_CONVERSION_FEE_RATE => Some("0.05".to_string()),
            ENV_INCLUDE_WISHLIST => Some("true".to_string()),
            _ => None,
        })
        .unwrap();

        assert_eq!(settings.home_currency, "GBP");
        assert_eq!(settings.conversion_fee_rate, dec!(0.05));
        assert!(settings.include_wishlist_by_default);
    }

    #[test]
    fn test_from_lookup_rejects_garbage() {
        let result = EngineSettings::from_lookup(|key| match key {
            ENV_LOW_WEEK_BALANCE_RATIO => Some("lots".to_string()),
            _ => None,
        });
        assert!(matches!(result, Err(Error::InvalidConfigValue(_))));
    }

    #[test]
    fn test_rejects_bad_home_currency() {
        let settings = EngineSettings {
            home_currency: "DOLLARS".to_string(),
            ..Default::default()
        };
        assert!(settings.validate().is_err());
    }
}
