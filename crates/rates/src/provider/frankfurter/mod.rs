//! Frankfurter provider for daily reference exchange rates.
//!
//! Frankfurter publishes the European Central Bank reference rates once per
//! working day. No API key is required.
//!
//! Request: `GET {base_url}/latest?from=EUR&to=USD`
//!
//! Response: `{"amount":1.0,"base":"EUR","date":"2024-05-31","rates":{"USD":1.0852}}`

use async_trait::async_trait;
use chrono::NaiveDate;
use log::debug;
use reqwest::{Client, StatusCode};
use rust_decimal::Decimal;
use serde::Deserialize;
use std::collections::HashMap;
use std::time::Duration;

use crate::errors::RatesError;
use crate::models::{CurrencyPair, DailyRate};
use crate::provider::RateProvider;

/// Provider ID constant
const PROVIDER_ID: &str = "FRANKFURTER";

/// Public endpoint used when no override is configured.
pub const DEFAULT_BASE_URL: &str = "https://api.frankfurter.app";

/// Default HTTP request timeout
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Deserialize)]
struct LatestResponse {
    #[allow(dead_code)]
    base: String,
    date: String,
    rates: HashMap<String, f64>,
}

/// HTTP provider backed by the Frankfurter API.
pub struct FrankfurterProvider {
    client: Client,
    base_url: String,
}

impl FrankfurterProvider {
    pub fn new() -> Self {
        Self::with_base_url(DEFAULT_BASE_URL)
    }

    /// Points the provider at a self-hosted Frankfurter instance.
    pub fn with_base_url(base_url: &str) -> Self {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .unwrap_or_else(|_| Client::new());

        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    fn latest_url(&self, pair: &CurrencyPair) -> String {
        format!(
            "{}/latest?from={}&to={}",
            self.base_url, pair.base, pair.quote
        )
    }

    fn parse_response(pair: &CurrencyPair, body: LatestResponse) -> Result<DailyRate, RatesError> {
        let raw = body
            .rates
            .get(&pair.quote)
            .copied()
            .ok_or_else(|| RatesError::UnsupportedPair {
                base: pair.base.clone(),
                quote: pair.quote.clone(),
            })?;

        if raw <= 0.0 {
            return Err(RatesError::ValidationFailed {
                message: format!("Non-positive rate {} for {}", raw, pair),
            });
        }

        let rate = Decimal::try_from(raw).map_err(|_| RatesError::ValidationFailed {
            message: "Failed to convert rate to decimal".to_string(),
        })?;

        let as_of = NaiveDate::parse_from_str(&body.date, "%Y-%m-%d").map_err(|e| {
            RatesError::ValidationFailed {
                message: format!("Invalid rate date '{}': {}", body.date, e),
            }
        })?;

        Ok(DailyRate::new(pair.clone(), rate, as_of, PROVIDER_ID))
    }
}

impl Default for FrankfurterProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl RateProvider for FrankfurterProvider {
    fn id(&self) -> &'static str {
        PROVIDER_ID
    }

    fn priority(&self) -> u8 {
        1
    }

    async fn fetch_daily_rate(&self, pair: &CurrencyPair) -> Result<DailyRate, RatesError> {
        let url = self.latest_url(pair);
        debug!("Fetching daily rate for {} from {}", pair, url);

        let response = self.client.get(&url).send().await.map_err(|e| {
            if e.is_timeout() {
                RatesError::Timeout {
                    provider: PROVIDER_ID.to_string(),
                }
            } else {
                RatesError::Network(e)
            }
        })?;

        match response.status() {
            status if status.is_success() => {}
            StatusCode::TOO_MANY_REQUESTS => {
                return Err(RatesError::RateLimited {
                    provider: PROVIDER_ID.to_string(),
                })
            }
            StatusCode::NOT_FOUND | StatusCode::UNPROCESSABLE_ENTITY => {
                return Err(RatesError::UnsupportedPair {
                    base: pair.base.clone(),
                    quote: pair.quote.clone(),
                })
            }
            status => {
                return Err(RatesError::ProviderError {
                    provider: PROVIDER_ID.to_string(),
                    message: format!("HTTP {}", status),
                })
            }
        }

        let body: LatestResponse =
            response
                .json()
                .await
                .map_err(|e| RatesError::ProviderError {
                    provider: PROVIDER_ID.to_string(),
                    message: e.to_string(),
                })?;

        Self::parse_response(pair, body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn eur_usd() -> CurrencyPair {
        CurrencyPair::new("EUR", "USD").unwrap()
    }

    #[test]
    fn test_provider_id() {
        let provider = FrankfurterProvider::new();
        assert_eq!(provider.id(), "FRANKFURTER");
        assert_eq!(provider.priority(), 1);
    }

    #[test]
    fn test_latest_url_strips_trailing_slash() {
        let provider = FrankfurterProvider::with_base_url("http://localhost:8080/");
        assert_eq!(
            provider.latest_url(&eur_usd()),
            "http://localhost:8080/latest?from=EUR&to=USD"
        );
    }

    #[test]
    fn test_parse_response() {
        let body: LatestResponse = serde_json::from_str(
            r#"{"amount":1.0,"base":"EUR","date":"2024-05-31","rates":{"USD":1.0852}}"#,
        )
        .unwrap();

        let rate = FrankfurterProvider::parse_response(&eur_usd(), body).unwrap();
        assert_eq!(rate.as_of, NaiveDate::from_ymd_opt(2024, 5, 31).unwrap());
        assert_eq!(rate.rate, Decimal::try_from(1.0852).unwrap());
        assert_eq!(rate.provider, "FRANKFURTER");
    }

    #[test]
    fn test_parse_response_missing_quote() {
        let body: LatestResponse = serde_json::from_str(
            r#"{"amount":1.0,"base":"EUR","date":"2024-05-31","rates":{"GBP":0.85}}"#,
        )
        .unwrap();

        let err = FrankfurterProvider::parse_response(&eur_usd(), body).unwrap_err();
        assert!(matches!(err, RatesError::UnsupportedPair { .. }));
    }

    #[test]
    fn test_parse_response_rejects_zero_rate() {
        let body: LatestResponse = serde_json::from_str(
            r#"{"amount":1.0,"base":"EUR","date":"2024-05-31","rates":{"USD":0.0}}"#,
        )
        .unwrap();

        let err = FrankfurterProvider::parse_response(&eur_usd(), body).unwrap_err();
        assert!(matches!(err, RatesError::ValidationFailed { .. }));
    }
}
