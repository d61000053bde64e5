//! Cart views: slide-out drawer, full cart page and header count badges.
//!
//! Each view clears and rebuilds its region from the cart it is handed. The
//! storefront re-renders all of them after any cart mutation.

use crate::dom::{self, Elements};
use crate::events;
use crate::markup;
use crate::state;
use std::rc::Rc;
use sx_cart_core::catalog::format_price;
use sx_cart_core::{Cart, CartView};
use sx_types::LineKey;
use web_sys::Element;

/// Mount every cart region present on the page.
pub fn mount(els: &Elements, currency: &str) {
    state::with_mut(|sf| {
        if !els.cart_counts.is_empty() {
            sf.mount_cart_view(Rc::new(HeaderBadgeView {
                counters: els.cart_counts.clone(),
            }));
        }

        if let Some(list) = &els.drawer_list {
            wire_qty_buttons(list);
            sf.mount_cart_view(Rc::new(DrawerView {
                list: list.clone(),
                total: els.drawer_total.clone(),
                currency: currency.to_string(),
            }));
        }

        if let Some(items) = &els.cart_items {
            wire_qty_buttons(items);
            sf.mount_cart_view(Rc::new(CartPageView {
                container: items.clone(),
                summary_total: els.cart_summary_total.clone(),
                currency: currency.to_string(),
            }));
        }
    });
}

pub struct HeaderBadgeView {
    counters: Vec<Element>,
}

impl CartView for HeaderBadgeView {
    fn name(&self) -> &str {
        "header-badge"
    }

    fn render_cart(&self, cart: &Cart) {
        let count = cart.total_count().to_string();
        for el in &self.counters {
            dom::set_text(el, &count);
        }
    }
}

pub struct DrawerView {
    list: Element,
    total: Option<Element>,
    currency: String,
}

impl CartView for DrawerView {
    fn name(&self) -> &str {
        "drawer"
    }

    fn render_cart(&self, cart: &Cart) {
        dom::set_inner_html(&self.list, "");

        for line in cart.lines() {
            let Some(div) = dom::create_element("div") else {
                continue;
            };
            dom::add_class(&div, "cart-item");
            dom::set_inner_html(&div, &markup::drawer_item(line, &self.currency));
            let _ = self.list.append_child(&div);
        }

        if let Some(total) = &self.total {
            dom::set_text(total, &format_price(cart.total_price(), &self.currency));
        }
    }
}

pub struct CartPageView {
    container: Element,
    summary_total: Option<Element>,
    currency: String,
}

impl CartView for CartPageView {
    fn name(&self) -> &str {
        "cart-page"
    }

    fn render_cart(&self, cart: &Cart) {
        dom::set_inner_html(&self.container, "");

        for line in cart.lines() {
            let Some(row) = dom::create_element("div") else {
                continue;
            };
            dom::add_class(&row, "cart-item-row");
            dom::set_inner_html(&row, &markup::cart_row(line, &self.currency));
            let _ = self.container.append_child(&row);
        }

        if let Some(total) = &self.summary_total {
            dom::set_text(total, &format_price(cart.total_price(), &self.currency));
        }
    }
}

fn line_key(btn: &Element) -> LineKey {
    LineKey::new(
        dom::attr(btn, "data-name"),
        dom::attr(btn, "data-size"),
        dom::attr(btn, "data-color"),
    )
}

/// Handle the +/- buttons of every row `container` will ever hold.
fn wire_qty_buttons(container: &Element) {
    events::on_click(container, |ev| {
        let Some(btn) = events::closest_target(&ev, ".qty-btn") else {
            return;
        };
        let key = line_key(&btn);
        if dom::has_class(&btn, "minus") {
            state::run("decrement", |sf| sf.decrement(&key));
        } else {
            state::run("increment", |sf| sf.increment(&key));
        }
    });
}
