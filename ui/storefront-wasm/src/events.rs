//! Event binding.
//!
//! Wires the static page listeners. Row buttons inside re-rendered regions are
//! handled by one listener on the region container, bound at mount.

use crate::checkout;
use crate::dom::Elements;
use crate::filters;
use crate::product;
use wasm_bindgen::prelude::*;
use web_sys::{Element, EventTarget};

/// Attach a click handler. The closure lives for the rest of the page.
pub fn on_click<F>(target: &EventTarget, handler: F)
where
    F: FnMut(web_sys::MouseEvent) + 'static,
{
    let cb = Closure::wrap(Box::new(handler) as Box<dyn FnMut(web_sys::MouseEvent)>);
    if let Err(err) = target.add_event_listener_with_callback("click", cb.as_ref().unchecked_ref()) {
        gloo_console::warn!("failed to bind click handler", err);
    }
    cb.forget();
}

/// Attach a handler for any other event type (`change`, `input`).
pub fn on_event<F>(target: &EventTarget, event: &str, handler: F)
where
    F: FnMut(web_sys::Event) + 'static,
{
    let cb = Closure::wrap(Box::new(handler) as Box<dyn FnMut(web_sys::Event)>);
    if let Err(err) = target.add_event_listener_with_callback(event, cb.as_ref().unchecked_ref()) {
        gloo_console::warn!(format!("failed to bind {event} handler"), err);
    }
    cb.forget();
}

/// The element matching `selector` at or above the event target. Used by
/// listeners delegated to a container whose rows are rebuilt on render.
pub fn closest_target(event: &web_sys::Event, selector: &str) -> Option<Element> {
    let target = event.target()?.dyn_into::<Element>().ok()?;
    target.closest(selector).ok()?
}

/// Bind all static UI event listeners. Call once after views are mounted.
pub fn bind_events(els: &Elements) {
    // ── Drawer ──
    for btn in &els.cart_buttons {
        let els2 = els.clone();
        on_click(btn, move |_| els2.open_drawer());
    }
    for btn in &els.drawer_close {
        let els2 = els.clone();
        on_click(btn, move |_| els2.close_drawer());
    }

    // ── Add to cart ──
    product::bind_add_to_cart(els);

    // ── Checkout ──
    checkout::bind_finish_order(els);

    // ── Listing filters ──
    filters::bind_filters(els);
}
