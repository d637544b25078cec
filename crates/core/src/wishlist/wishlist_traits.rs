use async_trait::async_trait;
use rust_decimal::Decimal;

use super::wishlist_model::{NewWishlistItem, WishlistItem, WishlistItemUpdate};
use crate::errors::Result;
use crate::session::SessionState;

#[async_trait]
pub trait WishlistServiceTrait: Send + Sync {
    fn list_items(&self, session: &SessionState) -> Result<Vec<WishlistItem>>;

    async fn create_item(
        &self,
        session: &SessionState,
        new_item: NewWishlistItem,
    ) -> Result<WishlistItem>;

    async fn update_item(
        &self,
        session: &SessionState,
        update: WishlistItemUpdate,
    ) -> Result<WishlistItem>;

    async fn delete_item(&self, session: &SessionState, item_id: &str) -> Result<()>;

    fn wishlist_total(&self, session: &SessionState) -> Result<Decimal>;

    /// Items that fit in what is left after planned spending, cheapest first.
    fn affordable_items(&self, session: &SessionState) -> Result<Vec<WishlistItem>>;
}
