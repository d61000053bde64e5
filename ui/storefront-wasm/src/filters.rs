//! Listing page filters (gender, category, max price) and sorting.

use crate::dom::{self, Elements};
use crate::events;
use crate::state;
use std::rc::Rc;
use sx_cart_core::catalog::{self, CatalogFilter, ProductFacets, SortOrder, format_price};
use web_sys::{Element, HtmlInputElement, HtmlSelectElement};

fn facets(card: &Element) -> ProductFacets {
    let gender = card
        .get_attribute("data-gender")
        .filter(|g| !g.is_empty())
        .unwrap_or_else(|| "all".to_string());
    ProductFacets {
        id: dom::attr(card, "data-id").trim().parse().unwrap_or(0),
        gender,
        category: dom::attr(card, "data-category"),
        price: dom::attr(card, "data-price").trim().parse().unwrap_or(0.0),
    }
}

struct Listing {
    grid: Element,
    cards: Vec<Element>,
    gender_buttons: Vec<Element>,
    category_boxes: Vec<HtmlInputElement>,
    price_range: Option<HtmlInputElement>,
}

impl Listing {
    fn current_filter(&self) -> CatalogFilter {
        let gender = self
            .gender_buttons
            .iter()
            .find(|b| dom::has_class(b, "active"))
            .map(|b| dom::attr(b, "data-filter"));
        let categories = self
            .category_boxes
            .iter()
            .filter(|c| c.checked())
            .map(|c| c.value())
            .collect();
        let max_price = self
            .price_range
            .as_ref()
            .and_then(|r| r.value().trim().parse().ok());

        CatalogFilter {
            gender,
            categories,
            max_price,
        }
    }

    fn apply_filters(&self) {
        let filter = self.current_filter();
        for card in &self.cards {
            dom::set_display(card, filter.matches(&facets(card)), "block");
        }
    }

    fn apply_sort(&self, order: SortOrder) {
        let products: Vec<ProductFacets> = self.cards.iter().map(facets).collect();
        for idx in catalog::sorted_order(&products, order) {
            let _ = self.grid.append_child(&self.cards[idx]);
        }
    }
}

pub fn bind_filters(els: &Elements) {
    let Some(grid) = &els.products_grid else {
        return;
    };
    let cards = dom::query_all_within(grid, ".product-card");
    if cards.is_empty() {
        return;
    }

    let listing = Rc::new(Listing {
        grid: grid.clone(),
        cards,
        gender_buttons: els.gender_buttons.clone(),
        category_boxes: els.category_boxes.clone(),
        price_range: els.price_range.clone(),
    });

    for btn in &listing.gender_buttons {
        let clicked = btn.clone();
        let listing2 = listing.clone();
        events::on_click(btn, move |_| {
            for b in &listing2.gender_buttons {
                dom::remove_class(b, "active");
            }
            dom::add_class(&clicked, "active");
            listing2.apply_filters();
        });
    }

    for checkbox in &listing.category_boxes {
        let listing2 = listing.clone();
        events::on_event(checkbox, "change", move |_| listing2.apply_filters());
    }

    if let (Some(range), Some(value)) = (&listing.price_range, &els.price_value) {
        let listing2 = listing.clone();
        let range2 = range.clone();
        let value2 = value.clone();
        let currency = state::currency();
        events::on_event(range, "input", move |_| {
            let shown = format_price(range2.value().trim().parse().unwrap_or(0.0), &currency);
            dom::set_text(&value2, &shown);
            listing2.apply_filters();
        });
    }

    if let Some(select) = &els.sort_select {
        bind_sort(select, listing.clone());
    }

    listing.apply_filters();
}

fn bind_sort(select: &HtmlSelectElement, listing: Rc<Listing>) {
    let select2 = select.clone();
    events::on_event(select, "change", move |_| {
        let order = select2.value().parse().unwrap_or_default();
        listing.apply_sort(order);
    });
}
