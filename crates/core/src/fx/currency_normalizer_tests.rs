//! Tests for the currency normalizer.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::*;
use crate::errors::Error;
use crate::settings::EngineSettings;

// ============== Mock rate source ==============

/// Serves scripted answers and counts calls.
struct MockRateSource {
    answers: Mutex<Vec<Result<Decimal, FxError>>>,
    calls: AtomicUsize,
    as_of: NaiveDate,
}

impl MockRateSource {
    fn new(answers: Vec<Result<Decimal, FxError>>) -> Arc<Self> {
        Arc::new(Self {
            answers: Mutex::new(answers),
            calls: AtomicUsize::new(0),
            as_of: day(10),
        })
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl DailyRateSourceTrait for MockRateSource {
    async fn get_daily_rate(&self, base: &str, quote: &str) -> Result<DailyRate, FxError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let next = {
            let mut answers = self.answers.lock().unwrap();
            if answers.is_empty() {
                Err(FxError::ProviderError {
                    message: "offline".to_string(),
                    retryable: true,
                })
            } else {
                answers.remove(0)
            }
        };
        let rate = next?;
        Ok(DailyRate::new(
            CurrencyPair::new(base, quote).unwrap(),
            rate,
            self.as_of,
            "MOCK",
        ))
    }
}

fn offline() -> Result<Decimal, FxError> {
    Err(FxError::ProviderError {
        message: "timeout".to_string(),
        retryable: true,
    })
}

fn day(d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 9, d).unwrap()
}

fn settings() -> EngineSettings {
    EngineSettings {
        home_currency: "USD".to_string(),
        ..EngineSettings::default()
    }
}

fn normalizer(source: Arc<MockRateSource>, settings: EngineSettings) -> CurrencyNormalizer {
    CurrencyNormalizer::new(source, Arc::new(settings))
}

// ============== Tests ==============

#[tokio::test]
async fn test_same_currency_is_identity() {
    let source = MockRateSource::new(vec![]);
    let normalizer = normalizer(source.clone(), settings());

    let result = normalizer.normalize(dec!(42), "usd", true, day(10)).await.unwrap();

    assert_eq!(result.home_amount, dec!(42));
    assert_eq!(result.rate, Decimal::ONE);
    assert!(!result.fee_applied);
    assert_eq!(result.freshness, RateFreshness::Fresh);
    assert_eq!(source.calls(), 0);
}

#[tokio::test]
async fn test_fee_is_applied_on_request() {
    let source = MockRateSource::new(vec![Ok(dec!(1.1)), Ok(dec!(1.1))]);
    let normalizer = normalizer(source, settings());

    let plain = normalizer.normalize(dec!(100), "EUR", false, day(10)).await.unwrap();
    let with_fee = normalizer.normalize(dec!(100), "EUR", true, day(10)).await.unwrap();

    assert_eq!(plain.home_amount, dec!(110));
    assert_eq!(with_fee.home_amount, dec!(113.3));
    assert!(with_fee.warning.is_none());
}

#[tokio::test]
async fn test_rate_is_fetched_once_per_day() {
    let source = MockRateSource::new(vec![Ok(dec!(1.2)), Ok(dec!(1.25))]);
    let normalizer = normalizer(source.clone(), settings());

    normalizer.normalize(dec!(10), "EUR", false, day(10)).await.unwrap();
    normalizer.normalize(dec!(20), "EUR", false, day(10)).await.unwrap();
    assert_eq!(source.calls(), 1);

    let next_day = normalizer.normalize(dec!(10), "EUR", false, day(11)).await.unwrap();
    assert_eq!(source.calls(), 2);
    assert_eq!(next_day.rate, dec!(1.25));
    assert_eq!(normalizer.cached_rate("EUR", "USD"), Some((dec!(1.25), day(10))));
}

#[tokio::test]
async fn test_failed_fetch_uses_stale_cache_with_warning() {
    let source = MockRateSource::new(vec![Ok(dec!(1.2)), offline()]);
    let normalizer = normalizer(source, settings());

    normalizer.normalize(dec!(10), "EUR", false, day(10)).await.unwrap();
    let stale = normalizer.normalize(dec!(10), "EUR", false, day(12)).await.unwrap();

    assert_eq!(stale.freshness, RateFreshness::Cached);
    assert_eq!(stale.home_amount, dec!(12));
    assert!(stale.warning.is_some());
    assert!(stale.is_degraded());
}

#[tokio::test]
async fn test_failed_fetch_is_not_retried_the_same_day() {
    let source = MockRateSource::new(vec![Ok(dec!(1.2))]);
    let normalizer = normalizer(source.clone(), settings());

    normalizer.normalize(dec!(10), "EUR", false, day(10)).await.unwrap();
    let first = normalizer.normalize(dec!(10), "EUR", false, day(12)).await.unwrap();
    for _ in 0..2 {
        let again = normalizer.normalize(dec!(10), "EUR", false, day(12)).await.unwrap();
        assert_eq!(again.freshness, RateFreshness::Cached);
        assert_eq!(again.home_amount, dec!(12));
        assert_eq!(again.warning, first.warning);
    }

    assert_eq!(first.freshness, RateFreshness::Cached);
    assert_eq!(source.calls(), 2);
}

#[tokio::test]
async fn test_failed_fetch_is_retried_the_next_day() {
    let source = MockRateSource::new(vec![offline(), Ok(dec!(0.9))]);
    let normalizer = normalizer(source.clone(), settings());

    let down = normalizer.normalize(dec!(10), "CAD", false, day(10)).await.unwrap();
    let still_down = normalizer.normalize(dec!(10), "CAD", false, day(10)).await.unwrap();
    assert_eq!(down.freshness, RateFreshness::Unavailable);
    assert_eq!(still_down.freshness, RateFreshness::Unavailable);
    assert_eq!(source.calls(), 1);

    let recovered = normalizer.normalize(dec!(10), "CAD", false, day(11)).await.unwrap();
    assert_eq!(recovered.freshness, RateFreshness::Fresh);
    assert_eq!(recovered.home_amount, dec!(9));
    assert_eq!(source.calls(), 2);
}

#[tokio::test]
async fn test_failed_fetch_without_cache_uses_fallback_either_way_round() {
    let mut fallback = HashMap::new();
    fallback.insert("USD/GBP".to_string(), dec!(0.8));
    let configured = EngineSettings {
        fallback_rates: fallback,
        ..settings()
    };
    let source = MockRateSource::new(vec![offline()]);
    let normalizer = normalizer(source, configured);

    let result = normalizer.normalize(dec!(40), "GBP", false, day(10)).await.unwrap();

    assert_eq!(result.freshness, RateFreshness::Fallback);
    assert_eq!(result.rate, dec!(1.25));
    assert_eq!(result.home_amount, dec!(50));
    assert!(result.warning.is_some());
}

#[tokio::test]
async fn test_nothing_available_converts_one_to_one() {
    let source = MockRateSource::new(vec![offline()]);
    let normalizer = normalizer(source, settings());

    let result = normalizer.normalize(dec!(500), "JPY", false, day(10)).await.unwrap();

    assert_eq!(result.freshness, RateFreshness::Unavailable);
    assert_eq!(result.rate, Decimal::ONE);
    assert_eq!(result.home_amount, dec!(500));
    assert!(result.warning.is_some());
}

#[tokio::test]
async fn test_zero_rate_from_source_is_treated_as_failure() {
    let source = MockRateSource::new(vec![Ok(Decimal::ZERO)]);
    let normalizer = normalizer(source, settings());
    let result = normalizer.normalize(dec!(5), "CHF", false, day(10)).await.unwrap();
    assert_eq!(result.freshness, RateFreshness::Unavailable);
    assert_eq!(normalizer.cached_rate("CHF", "USD"), None);
}

#[tokio::test]
async fn test_rejects_bad_input() {
    let source = MockRateSource::new(vec![]);
    let normalizer = normalizer(source.clone(), settings());

    let negative = normalizer.normalize(dec!(-1), "EUR", false, day(10)).await;
    assert!(matches!(negative, Err(Error::Validation(_))));

    let malformed = normalizer.normalize(dec!(1), "EURO", false, day(10)).await;
    assert!(matches!(malformed, Err(Error::Validation(_))));

    assert_eq!(source.calls(), 0);
}

#[tokio::test]
async fn test_clear_cache_forces_refetch() {
    let source = MockRateSource::new(vec![Ok(dec!(1.2)), Ok(dec!(1.3))]);
    let normalizer = normalizer(source.clone(), settings());
    normalizer.normalize(dec!(1), "EUR", false, day(10)).await.unwrap();
    normalizer.clear_cache().unwrap();
    let result = normalizer.normalize(dec!(1), "EUR", false, day(10)).await.unwrap();
    assert_eq!(result.rate, dec!(1.3));
    assert_eq!(source.calls(), 2);
}
