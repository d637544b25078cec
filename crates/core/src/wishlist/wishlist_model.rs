//! Wishlist domain models.

use chrono::{NaiveDateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::errors::Result;
use crate::utils::validation::{ensure_non_negative, ensure_not_blank};

/// Kept for records created before ranking by cost. Not used for ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum WishlistPriority {
    Low,
    Medium,
    High,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WishlistItem {
    pub id: String,
    pub name: String,
    pub location: String,
    pub estimated_cost: Decimal,
    #[serde(default)]
    pub priority: Option<WishlistPriority>,
    pub notes: Option<String>,
    pub created_at: NaiveDateTime,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewWishlistItem {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
    pub location: String,
    pub estimated_cost: Decimal,
    #[serde(default)]
    pub priority: Option<WishlistPriority>,
    pub notes: Option<String>,
}

impl NewWishlistItem {
    pub fn validate(&self) -> Result<()> {
        ensure_not_blank("name", &self.name)?;
        ensure_non_negative("estimatedCost", self.estimated_cost)
    }

    pub fn into_item(self) -> WishlistItem {
        WishlistItem {
            id: self
                .id
                .unwrap_or_else(|| uuid::Uuid::new_v4().to_string()),
            name: self.name.trim().to_string(),
            location: self.location.trim().to_string(),
            estimated_cost: self.estimated_cost,
            priority: self.priority,
            notes: self.notes,
            created_at: Utc::now().naive_utc(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WishlistItemUpdate {
    pub id: String,
    pub name: String,
    pub location: String,
    pub estimated_cost: Decimal,
    #[serde(default)]
    pub priority: Option<WishlistPriority>,
    pub notes: Option<String>,
}

impl WishlistItemUpdate {
    pub fn validate(&self) -> Result<()> {
        ensure_not_blank("id", &self.id)?;
        ensure_not_blank("name", &self.name)?;
        ensure_non_negative("estimatedCost", self.estimated_cost)
    }

    pub fn apply_to(self, existing: &WishlistItem) -> WishlistItem {
        WishlistItem {
            id: existing.id.clone(),
            name: self.name.trim().to_string(),
            location: self.location.trim().to_string(),
            estimated_cost: self.estimated_cost,
            priority: self.priority,
            notes: self.notes,
            created_at: existing.created_at,
        }
    }
}

pub fn wishlist_total(items: &[WishlistItem]) -> Decimal {
    items.iter().map(|i| i.estimated_cost).sum()
}

/// Items whose cost fits within `available`, cheapest first.
pub fn affordable_items(items: &[WishlistItem], available: Decimal) -> Vec<&WishlistItem> {
    let mut affordable: Vec<&WishlistItem> = items
        .iter()
        .filter(|i| i.estimated_cost <= available)
        .collect();
    affordable.sort_by(|a, b| {
        a.estimated_cost
            .cmp(&b.estimated_cost)
            .then_with(|| a.name.cmp(&b.name))
    });
    affordable
}
