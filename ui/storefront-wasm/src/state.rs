//! Browser-side storefront handle.
//!
//! The [`Storefront`] lives in a `thread_local!` cell (WASM is single-threaded)
//! so event callbacks can reach it. All cart and wishlist state itself stays in
//! `localStorage`; nothing here caches it.

use anyhow::{Result, anyhow};
use gloo_storage::{LocalStorage, Storage};
use std::cell::RefCell;
use sx_cart_core::{Storefront, StorefrontConfig, StorefrontError};
use sx_storage::KeyValueStore;

/// `window.localStorage` as a [`KeyValueStore`].
#[derive(Clone, Copy, Debug, Default)]
pub struct BrowserStore;

impl KeyValueStore for BrowserStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        LocalStorage::raw()
            .get_item(key)
            .map_err(|e| anyhow!("localStorage get_item failed: {e:?}"))
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        LocalStorage::raw()
            .set_item(key, value)
            .map_err(|e| anyhow!("localStorage set_item failed: {e:?}"))
    }

    fn remove(&self, key: &str) -> Result<()> {
        LocalStorage::delete(key);
        Ok(())
    }
}

pub type BrowserStorefront = Storefront<BrowserStore>;

// ── Thread-local singleton ──

thread_local! {
    static STOREFRONT: RefCell<Option<BrowserStorefront>> = const { RefCell::new(None) };
}

pub fn install(config: StorefrontConfig) {
    STOREFRONT.with(|s| *s.borrow_mut() = Some(Storefront::new(BrowserStore, config)));
}

/// Run a closure with shared access to the storefront.
pub fn with<F, R>(f: F) -> Option<R>
where
    F: FnOnce(&BrowserStorefront) -> R,
{
    STOREFRONT.with(|s| s.borrow().as_ref().map(f))
}

/// Run a closure with mutable access (mounting views).
pub fn with_mut<F, R>(f: F) -> Option<R>
where
    F: FnOnce(&mut BrowserStorefront) -> R,
{
    STOREFRONT.with(|s| s.borrow_mut().as_mut().map(f))
}

/// Run a storefront operation, logging failures to the console.
pub fn run<F, R>(op: &str, f: F) -> Option<R>
where
    F: FnOnce(&BrowserStorefront) -> Result<R, StorefrontError>,
{
    match with(f)? {
        Ok(value) => Some(value),
        Err(err) => {
            gloo_console::warn!(format!("{op} failed: {err}"));
            None
        }
    }
}

pub fn currency() -> String {
    with(|sf| sf.config().currency.clone()).unwrap_or_default()
}

/// Reads the optional `<script id="storefrontConfig" type="application/json">`
/// override, falling back to defaults.
pub fn load_config() -> StorefrontConfig {
    let Some(el) = crate::dom::by_id("storefrontConfig") else {
        return StorefrontConfig::default();
    };
    let raw = el.text_content().unwrap_or_default();
    match StorefrontConfig::from_json(&raw) {
        Ok(config) => config,
        Err(err) => {
            gloo_console::warn!(format!("ignoring storefront config: {err:#}"));
            StorefrontConfig::default()
        }
    }
}
