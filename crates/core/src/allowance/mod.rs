//! Allowance module - daily and weekly spending allowances and the even
//! weekly split used by the basic weekly dashboard.

mod allowance_calculator;
mod allowance_model;

pub use allowance_calculator::*;
pub use allowance_model::*;
pub use crate::utils::time_utils::each_week_of_interval;
