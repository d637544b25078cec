//! Engine settings - thresholds, home currency and rate configuration.

mod settings_model;

pub use settings_model::*;
