use std::sync::Arc;

use async_trait::async_trait;
use log::{debug, info};
use rust_decimal::Decimal;

use super::wishlist_model::{
    affordable_items, wishlist_total, NewWishlistItem, WishlistItem, WishlistItemUpdate,
};
use super::wishlist_traits::WishlistServiceTrait;
use crate::budget::calculate_budget_figures;
use crate::errors::{Error, Result};
use crate::session::SessionState;
use crate::snapshot::{EntityOperation, LedgerWrite, SnapshotRepositoryTrait};

/// Wishlist writes never touch the budget, so they are not revision-guarded.
pub struct WishlistService {
    repository: Arc<dyn SnapshotRepositoryTrait>,
}

impl WishlistService {
    pub fn new(repository: Arc<dyn SnapshotRepositoryTrait>) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl WishlistServiceTrait for WishlistService {
    fn list_items(&self, session: &SessionState) -> Result<Vec<WishlistItem>> {
        let user_id = session.require_user()?;
        let mut items = self.repository.load_snapshot(user_id)?.wishlist;
        items.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        Ok(items)
    }

    async fn create_item(
        &self,
        session: &SessionState,
        new_item: NewWishlistItem,
    ) -> Result<WishlistItem> {
        let user_id = session.require_user()?;
        new_item.validate()?;
        let item = new_item.into_item();
        self.repository
            .commit(
                user_id,
                LedgerWrite::new().push(EntityOperation::UpsertWishlistItem(item.clone())),
            )
            .await?;
        info!("Added wishlist item {} ({})", item.name, item.estimated_cost);
        Ok(item)
    }

    async fn update_item(
        &self,
        session: &SessionState,
        update: WishlistItemUpdate,
    ) -> Result<WishlistItem> {
        let user_id = session.require_user()?;
        update.validate()?;
        let snapshot = self.repository.load_snapshot(user_id)?;
        let existing = snapshot
            .find_wishlist_item(&update.id)
            .ok_or_else(|| Error::not_found("WishlistItem", update.id.clone()))?;
        let item = update.apply_to(existing);
        self.repository
            .commit(
                user_id,
                LedgerWrite::new().push(EntityOperation::UpsertWishlistItem(item.clone())),
            )
            .await?;
        debug!("Updated wishlist item {}", item.id);
        Ok(item)
    }

    async fn delete_item(&self, session: &SessionState, item_id: &str) -> Result<()> {
        let user_id = session.require_user()?;
        let snapshot = self.repository.load_snapshot(user_id)?;
        if snapshot.find_wishlist_item(item_id).is_none() {
            return Err(Error::not_found("WishlistItem", item_id));
        }
        self.repository
            .commit(
                user_id,
                LedgerWrite::new().push(EntityOperation::DeleteWishlistItem(item_id.to_string())),
            )
            .await?;
        debug!("Deleted wishlist item {}", item_id);
        Ok(())
    }

    fn wishlist_total(&self, session: &SessionState) -> Result<Decimal> {
        let user_id = session.require_user()?;
        Ok(wishlist_total(&self.repository.load_snapshot(user_id)?.wishlist))
    }

    fn affordable_items(&self, session: &SessionState) -> Result<Vec<WishlistItem>> {
        let user_id = session.require_user()?;
        let snapshot = self.repository.load_snapshot(user_id)?;
        let figures = calculate_budget_figures(
            snapshot.budget.as_ref(),
            &snapshot.trips,
            &snapshot.expenses,
            &snapshot.wishlist,
            false,
        );
        Ok(affordable_items(&snapshot.wishlist, figures.remaining_after_planned)
            .into_iter()
            .cloned()
            .collect())
    }
}
