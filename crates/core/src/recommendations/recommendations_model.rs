use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RecommendationKind {
    OverBudget,
    LowBalance,
    OverBudgetThisWeek,
    LowWeekBalance,
    InsufficientForUpcomingTrips,
    OnTrack,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Severity {
    Info,
    Warning,
    Critical,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recommendation {
    pub kind: RecommendationKind,
    pub severity: Severity,
    pub message: String,
    /// The figure the message is about (overspend, balance, shortfall).
    pub amount: Option<Decimal>,
}

impl Recommendation {
    pub fn new(kind: RecommendationKind, severity: Severity, message: String) -> Self {
        Self {
            kind,
            severity,
            message,
            amount: None,
        }
    }

    pub fn with_amount(mut self, amount: Decimal) -> Self {
        self.amount = Some(amount);
        self
    }
}
