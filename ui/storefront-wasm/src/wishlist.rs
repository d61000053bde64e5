//! Wishlist views: heart buttons on product cards and the wishlist page grid.

use crate::dom::{self, Elements};
use crate::events;
use crate::markup;
use crate::product::CardProduct;
use crate::state;
use std::rc::Rc;
use sx_cart_core::{Wishlist, WishlistView};
use sx_types::LineId;
use web_sys::Element;

/// Mount the heart buttons and, on the wishlist page, the grid.
pub fn mount(els: &Elements, currency: &str) {
    let hearts = bind_hearts(els);

    state::with_mut(|sf| {
        if !hearts.is_empty() {
            sf.mount_wishlist_view(Rc::new(HeartButtonsView { hearts }));
        }

        if let (Some(_), Some(grid)) = (&els.wishlist_page, &els.wishlist_grid) {
            wire_grid_buttons(grid, els.clone());
            sf.mount_wishlist_view(Rc::new(WishlistGridView {
                grid: grid.clone(),
                empty: els.wishlist_empty.clone(),
                currency: currency.to_string(),
            }));
        }
    });
}

/// Wire each card's heart button to toggle its product by name.
fn bind_hearts(els: &Elements) -> Vec<(String, Element)> {
    let mut hearts = Vec::new();
    for card in &els.product_cards {
        let Some(btn) = dom::query_within(card, ".wishlist-btn") else {
            continue;
        };
        let Some(product) = CardProduct::read(card) else {
            continue;
        };

        hearts.push((product.name.clone(), btn.clone()));
        events::on_click(&btn, move |_| {
            state::run("toggle wishlist", |sf| sf.toggle_wishlist(product.wishlist_entry()));
        });
    }
    hearts
}

pub struct HeartButtonsView {
    hearts: Vec<(String, Element)>,
}

impl WishlistView for HeartButtonsView {
    fn name(&self) -> &str {
        "wishlist-hearts"
    }

    fn render_wishlist(&self, wishlist: &Wishlist) {
        for (name, btn) in &self.hearts {
            dom::set_inner_html(btn, markup::heart(wishlist.contains(name)));
        }
    }
}

pub struct WishlistGridView {
    grid: Element,
    empty: Option<Element>,
    currency: String,
}

impl WishlistView for WishlistGridView {
    fn name(&self) -> &str {
        "wishlist-grid"
    }

    fn render_wishlist(&self, wishlist: &Wishlist) {
        dom::set_inner_html(&self.grid, "");

        if let Some(empty) = &self.empty {
            dom::set_display(empty, wishlist.is_empty(), "block");
        }
        if wishlist.is_empty() {
            return;
        }

        for entry in wishlist.entries() {
            let Some(card) = dom::create_element("div") else {
                continue;
            };
            dom::add_class(&card, "wishlist-card");
            dom::set_inner_html(&card, &markup::wishlist_card(entry, &self.currency));
            let _ = self.grid.append_child(&card);
        }
    }
}

/// Handle the add and remove buttons of every card the grid will ever hold.
fn wire_grid_buttons(grid: &Element, els: Elements) {
    events::on_click(grid, move |ev| {
        if let Some(btn) = events::closest_target(&ev, ".add-from-wish") {
            let name = dom::attr(&btn, "data-name");
            let added = state::run("add from wishlist", |sf| {
                sf.add_from_wishlist(&name, LineId::Timestamp(dom::now_ms()))
            });
            if added.is_some() {
                els.open_drawer();
            }
        } else if let Some(btn) = events::closest_target(&ev, ".remove-wish") {
            let name = dom::attr(&btn, "data-name");
            state::run("remove from wishlist", |sf| sf.remove_from_wishlist(&name));
        }
    });
}
