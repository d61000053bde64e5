//! Reading products out of page markup and adding them to the cart.
//!
//! A product whose title, price or image cannot be found is skipped silently.

use crate::dom::{self, Elements};
use crate::events;
use crate::state;
use sx_cart_core::StorefrontConfig;
use sx_cart_core::catalog::{parse_price_attr, parse_price_text};
use sx_types::{CartLine, LineId, WishlistEntry};
use web_sys::Element;

/// Product data shown on a listing card.
pub struct CardProduct {
    pub id: Option<String>,
    pub name: String,
    pub price: f64,
    pub img: String,
}

impl CardProduct {
    pub fn read(card: &Element) -> Option<Self> {
        let title = dom::query_within(card, ".prod-title")?;
        let price = dom::query_within(card, ".prod-price")?;
        let img = dom::query_within(card, "img")?;

        let id = card.get_attribute("data-id").filter(|id| !id.is_empty());
        Some(Self {
            id,
            name: dom::text(&title),
            price: parse_price_text(&dom::text(&price)),
            img: dom::img_src(&img),
        })
    }

    pub fn cart_line(&self) -> CartLine {
        let id = match &self.id {
            Some(id) => LineId::Card(id.clone()),
            None => LineId::Timestamp(dom::now_ms()),
        };
        CartLine::plain(id, self.name.clone(), self.price, self.img.clone())
    }

    pub fn wishlist_entry(&self) -> WishlistEntry {
        WishlistEntry::new(self.name.clone(), self.price, self.img.clone())
    }
}

/// The product shown on a product detail page, with the selected variant.
pub fn read_product_page(config: &StorefrontConfig) -> Option<CartLine> {
    let title = dom::query(".product-title")?;
    let price_el = dom::query(".product-price")?;
    let main_img = dom::by_id("mainImage").or_else(|| dom::query(".gallery-main img"))?;

    let price = match price_el.get_attribute("data-price").filter(|p| !p.is_empty()) {
        Some(raw) => parse_price_attr(&raw),
        None => parse_price_text(&dom::text(&price_el)),
    };

    let size = dom::query(".size-option.active")
        .map(|el| dom::text(&el))
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| config.default_size.clone());
    let color = dom::query(".color-dot.active")
        .and_then(|el| el.get_attribute("data-color"))
        .filter(|c| !c.is_empty())
        .unwrap_or_else(|| config.default_color.clone());

    Some(CartLine {
        id: LineId::Timestamp(dom::now_ms()),
        name: dom::text(&title),
        price,
        img: dom::img_src(&main_img),
        size,
        color,
        qty: 1,
    })
}

pub fn bind_add_to_cart(els: &Elements) {
    if let Some(btn) = &els.add_to_cart_btn {
        let els2 = els.clone();
        events::on_click(btn, move |_| {
            let Some(config) = state::with(|sf| sf.config().clone()) else {
                return;
            };
            let Some(line) = read_product_page(&config) else {
                gloo_console::debug!("product page is missing title, price or image");
                return;
            };
            if state::run("add to cart", |sf| sf.add_to_cart(line)).is_some() {
                els2.open_drawer();
            }
        });
    }

    for card in &els.product_cards {
        let Some(button) = dom::query_within(card, ".add-to-cart") else {
            continue;
        };
        let card2 = card.clone();
        let els2 = els.clone();
        events::on_click(&button, move |_| {
            let Some(product) = CardProduct::read(&card2) else {
                gloo_console::debug!("product card is missing title, price or image");
                return;
            };
            if state::run("add to cart", |sf| sf.add_to_cart(product.cart_line())).is_some() {
                els2.open_drawer();
            }
        });
    }
}
