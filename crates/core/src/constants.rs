/// Decimal precision for internal calculations
pub const DECIMAL_PRECISION: u32 = 6;

/// Decimal precision for display
pub const DISPLAY_DECIMAL_PRECISION: u32 = 2;

/// Category given to the synthetic expense recorded when a balance is lowered
pub const BALANCE_ADJUSTMENT_CATEGORY: &str = "Balance Adjustment";

/// Bucket used when summarising expenses without a category
pub const UNCATEGORIZED: &str = "Uncategorized";

/// Days in a planning week
pub const DAYS_PER_WEEK: i64 = 7;

/// Current trip record schema
pub const TRIP_SCHEMA_VERSION: u32 = 2;
