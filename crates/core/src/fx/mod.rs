//! FX module - converts foreign-currency entries into the home currency
//! before they reach the allocation engine.

mod currency_normalizer;
mod fx_errors;
mod fx_model;
mod fx_traits;
mod rate_source;

pub use currency_normalizer::CurrencyNormalizer;
pub use fx_errors::FxError;
pub use fx_model::{to_home_amount, NormalizedAmount, RateFreshness};
pub use fx_traits::DailyRateSourceTrait;
pub use rate_source::RateProviderSource;
pub use studybudget_rates::{CurrencyPair, DailyRate};

#[cfg(test)]
mod currency_normalizer_tests;
