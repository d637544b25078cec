//! Boundary checks shared by the `New*`/`*Update` input models.

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::errors::{Error, Result, ValidationError};

pub fn ensure_not_blank(field: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(Error::Validation(ValidationError::MissingField(
            field.to_string(),
        )));
    }
    Ok(())
}

pub fn ensure_non_negative(field: &'static str, value: Decimal) -> Result<()> {
    if value.is_sign_negative() && !value.is_zero() {
        return Err(Error::Validation(ValidationError::NegativeAmount {
            field,
            value: value.to_string(),
        }));
    }
    Ok(())
}

pub fn ensure_positive(field: &'static str, value: Decimal) -> Result<()> {
    if value <= Decimal::ZERO {
        return Err(Error::invalid_input(format!(
            "'{}' must be greater than zero (got {})",
            field, value
        )));
    }
    Ok(())
}

pub fn ensure_date_range(start: NaiveDate, end: NaiveDate) -> Result<()> {
    if end < start {
        return Err(Error::Validation(ValidationError::DateRange { start, end }));
    }
    Ok(())
}
