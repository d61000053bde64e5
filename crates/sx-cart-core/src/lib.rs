//! Cart and wishlist state for the SportX storefront.
//!
//! Aggregates are plain values; [`Storefront`] owns the injected store, applies
//! mutations read-modify-write and fans every change out to mounted views.

pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod config;
pub mod storefront;
pub mod sync;
pub mod wishlist;

pub use cart::{Cart, CartError};
pub use checkout::{CheckoutError, CheckoutSummary, OrderReceipt, SummaryRow};
pub use config::StorefrontConfig;
pub use storefront::{Storefront, StorefrontError};
pub use sync::{CartView, ViewRegistry, WishlistView};
pub use wishlist::Wishlist;
