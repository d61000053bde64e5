//! SportX storefront WASM frontend.
//!
//! Binds the cart drawer, cart page, header badges, checkout summary and
//! wishlist views to the shared [`sx_cart_core::Storefront`], persisted in
//! `localStorage`. Each concern lives in its own module.

pub mod cart_views;
pub mod checkout;
pub mod dom;
pub mod events;
pub mod filters;
pub mod markup;
pub mod product;
pub mod state;
pub mod wishlist;

use wasm_bindgen::prelude::*;

/// WASM entry point – called automatically when the module is instantiated.
#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    // Improve panic messages in the browser console
    console_error_panic_hook::set_once();

    // Route the core crates' tracing events to the devtools console
    if let Err(err) = tracing_wasm::try_set_as_global_default() {
        gloo_console::warn!(format!("tracing subscriber not installed: {err}"));
    }

    init();
    Ok(())
}

/// Mounts every view present on the page, then binds static listeners.
fn init() {
    let config = state::load_config();
    let currency = config.currency.clone();
    state::install(config);

    let els = dom::Elements::bind();

    // Views render once on mount, so counters are correct before any click
    cart_views::mount(&els, &currency);
    checkout::mount(&els, &currency);
    wishlist::mount(&els, &currency);

    events::bind_events(&els);
}
