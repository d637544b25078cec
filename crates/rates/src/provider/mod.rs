//! Exchange-rate provider abstractions and implementations.
//!
//! - The `RateProvider` trait every source implements
//! - `FrankfurterProvider`, an HTTP client for the ECB reference rates
//! - `StaticRateProvider`, a fixed table used for fallbacks and tests

mod traits;

pub mod frankfurter;
pub mod static_rates;

pub use traits::RateProvider;
