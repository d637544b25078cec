//! Wishlist module - aspirational spending that is never committed.

mod wishlist_model;
mod wishlist_service;
mod wishlist_traits;

pub use wishlist_model::*;
pub use wishlist_service::WishlistService;
pub use wishlist_traits::WishlistServiceTrait;
