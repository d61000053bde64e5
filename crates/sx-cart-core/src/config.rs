use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

pub const DEFAULT_CART_KEY: &str = "sportx_cart";
pub const DEFAULT_WISHLIST_KEY: &str = "sportx_wishlist";

/// Storage keys and display settings shared by every view.
///
/// Every field is optional in JSON; missing fields take the defaults below.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorefrontConfig {
    pub cart_key: String,
    pub wishlist_key: String,
    /// Suffix appended to rendered prices.
    pub currency: String,
    /// Page opened after an order is placed.
    pub orders_page: String,
    /// Size used on the product page when no size option is selected.
    pub default_size: String,
    pub default_color: String,
}

impl Default for StorefrontConfig {
    fn default() -> Self {
        Self {
            cart_key: DEFAULT_CART_KEY.to_owned(),
            wishlist_key: DEFAULT_WISHLIST_KEY.to_owned(),
            currency: "₸".to_owned(),
            orders_page: "orders.html".to_owned(),
            default_size: "M".to_owned(),
            default_color: "default".to_owned(),
        }
    }
}

impl StorefrontConfig {
    pub fn from_json(raw: &str) -> Result<Self> {
        serde_json::from_str(raw).context("invalid storefront config")
    }
}
