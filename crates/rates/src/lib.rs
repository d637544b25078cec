//! Studybudget Rates Crate
//!
//! Exchange-rate sourcing for the currency normalizer in `studybudget-core`.
//!
//! # Overview
//!
//! The engine never talks to the network. Foreign-currency entries are
//! converted to the home currency before they reach it, using a daily rate
//! that comes from one of the providers in this crate:
//!
//! ```text
//! +--------------------+     +------------------+     +----------------+
//! | CurrencyNormalizer | --> |   RateProvider   | --> |   DailyRate    |
//! |  (core, cached)    |     | (HTTP or static) |     | (rate, as_of)  |
//! +--------------------+     +------------------+     +----------------+
//! ```
//!
//! # Core Types
//!
//! - [`DailyRate`] - One exchange rate for a currency pair on a calendar day
//! - [`CurrencyPair`] - Base/quote pair with ISO 4217 validation
//! - [`RateProvider`] - Trait implemented by every rate source
//! - [`RatesError`] - Provider failures, classified by [`RetryClass`]

pub mod errors;
pub mod models;
pub mod provider;

pub use errors::{RatesError, RetryClass};
pub use models::{CurrencyPair, DailyRate};
pub use provider::frankfurter::FrankfurterProvider;
pub use provider::static_rates::StaticRateProvider;
pub use provider::RateProvider;
