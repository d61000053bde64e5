//! Checkout page: order summary and the "finish order" action.

use crate::dom::{self, Elements};
use crate::events;
use crate::markup;
use crate::state;
use std::rc::Rc;
use sx_cart_core::catalog::format_price;
use sx_cart_core::{Cart, CartView, CheckoutError, CheckoutSummary, StorefrontError};
use web_sys::Element;

pub fn mount(els: &Elements, currency: &str) {
    let (Some(_), Some(rows), Some(subtotal), Some(total)) = (
        &els.checkout_page,
        &els.cart_summary,
        &els.summary_subtotal,
        &els.summary_total,
    ) else {
        return;
    };

    let view = SummaryView {
        rows: rows.clone(),
        subtotal: subtotal.clone(),
        total: total.clone(),
        currency: currency.to_string(),
    };
    state::with_mut(|sf| sf.mount_cart_view(Rc::new(view)));
}

pub struct SummaryView {
    rows: Element,
    subtotal: Element,
    total: Element,
    currency: String,
}

impl CartView for SummaryView {
    fn name(&self) -> &str {
        "checkout-summary"
    }

    fn render_cart(&self, cart: &Cart) {
        let summary = CheckoutSummary::from_cart(cart);
        let html: String = summary
            .rows
            .iter()
            .map(|row| markup::summary_row(row, &self.currency))
            .collect();

        dom::set_inner_html(&self.rows, &html);
        dom::set_text(&self.subtotal, &format_price(summary.subtotal, &self.currency));
        dom::set_text(&self.total, &format_price(summary.total, &self.currency));
    }
}

/// Only a checkout page places orders.
pub fn bind_finish_order(els: &Elements) {
    let (Some(_), Some(btn)) = (&els.checkout_page, &els.finish_order) else {
        return;
    };

    events::on_click(btn, move |_| {
        let Some(outcome) = state::with(|sf| {
            sf.finish_order()
                .map(|_| sf.config().orders_page.clone())
        }) else {
            return;
        };

        let window = dom::window();
        match outcome {
            Ok(orders_page) => {
                let _ = window.alert_with_message("Your order has been successfully placed!");
                if let Err(err) = window.location().set_href(&orders_page) {
                    gloo_console::warn!("redirect after checkout failed", err);
                }
            }
            Err(StorefrontError::Checkout(CheckoutError::EmptyCart)) => {
                let _ = window.alert_with_message("Your cart is empty.");
            }
            Err(err) => {
                gloo_console::warn!(format!("checkout failed: {err}"));
            }
        }
    });
}
