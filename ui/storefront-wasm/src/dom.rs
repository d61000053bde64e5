//! DOM helpers and element bindings.
//!
//! Pages differ in which storefront regions they carry, so every binding in
//! [`Elements`] is optional and resolved once at startup.

use gloo_utils::{document, window as gloo_window};
use wasm_bindgen::prelude::*;
use web_sys::{Element, HtmlElement, HtmlInputElement, HtmlSelectElement};

// ── Helpers ──

pub fn by_id(id: &str) -> Option<Element> {
    document().get_element_by_id(id)
}

pub fn by_id_typed<T: JsCast>(id: &str) -> Option<T> {
    by_id(id).and_then(|e| e.dyn_into::<T>().ok())
}

pub fn query(selector: &str) -> Option<Element> {
    document().query_selector(selector).ok()?
}

pub fn query_all(selector: &str) -> Vec<Element> {
    match document().query_selector_all(selector) {
        Ok(nl) => collect_elements(&nl),
        Err(_) => Vec::new(),
    }
}

/// Query within a parent element.
pub fn query_within(parent: &Element, selector: &str) -> Option<Element> {
    parent.query_selector(selector).ok()?
}

pub fn query_all_within(parent: &Element, selector: &str) -> Vec<Element> {
    match parent.query_selector_all(selector) {
        Ok(nl) => collect_elements(&nl),
        Err(_) => Vec::new(),
    }
}

fn collect_elements(nl: &web_sys::NodeList) -> Vec<Element> {
    let mut v = Vec::new();
    for i in 0..nl.length() {
        if let Some(e) = nl.item(i) {
            if let Ok(el) = e.dyn_into::<Element>() {
                v.push(el);
            }
        }
    }
    v
}

pub fn create_element(tag: &str) -> Option<Element> {
    document().create_element(tag).ok()
}

pub fn set_text(el: &Element, text: &str) {
    el.set_text_content(Some(text));
}

pub fn text(el: &Element) -> String {
    el.text_content().unwrap_or_default().trim().to_string()
}

pub fn set_inner_html(el: &Element, html: &str) {
    el.set_inner_html(html);
}

pub fn attr(el: &Element, name: &str) -> String {
    el.get_attribute(name).unwrap_or_default()
}

pub fn add_class(el: &Element, cls: &str) {
    let _ = el.class_list().add_1(cls);
}

pub fn remove_class(el: &Element, cls: &str) {
    let _ = el.class_list().remove_1(cls);
}

pub fn has_class(el: &Element, cls: &str) -> bool {
    el.class_list().contains(cls)
}

pub fn set_display(el: &Element, visible: bool, shown: &str) {
    if let Some(html) = el.dyn_ref::<HtmlElement>() {
        let _ = html
            .style()
            .set_property("display", if visible { shown } else { "none" });
    }
}

/// `src` of an `<img>`, resolved to an absolute URL by the browser.
pub fn img_src(el: &Element) -> String {
    match el.dyn_ref::<web_sys::HtmlImageElement>() {
        Some(img) => img.src(),
        None => attr(el, "src"),
    }
}

pub fn window() -> web_sys::Window {
    gloo_window()
}

pub fn now_ms() -> u64 {
    js_sys::Date::now() as u64
}

// ── Elements struct ──

/// Storefront regions present on the current page.
/// Clone-friendly (all inner types are reference-counted via JS GC).
#[derive(Clone)]
pub struct Elements {
    // Header
    pub cart_buttons: Vec<Element>,
    pub cart_counts: Vec<Element>,

    // Drawer
    pub cart_drawer: Option<Element>,
    pub drawer_close: Vec<Element>,
    pub drawer_list: Option<Element>,
    pub drawer_total: Option<Element>,

    // Cart page
    pub cart_page: Option<Element>,
    pub cart_items: Option<Element>,
    pub cart_summary_total: Option<Element>,

    // Product page
    pub add_to_cart_btn: Option<HtmlElement>,

    // Product cards (listing, home, wishlist suggestions)
    pub product_cards: Vec<Element>,

    // Checkout
    pub checkout_page: Option<Element>,
    pub finish_order: Option<HtmlElement>,
    pub summary_subtotal: Option<Element>,
    pub summary_total: Option<Element>,
    pub cart_summary: Option<Element>,

    // Wishlist page
    pub wishlist_page: Option<Element>,
    pub wishlist_grid: Option<Element>,
    pub wishlist_empty: Option<Element>,

    // Listing filters
    pub products_grid: Option<Element>,
    pub gender_buttons: Vec<Element>,
    pub category_boxes: Vec<HtmlInputElement>,
    pub price_range: Option<HtmlInputElement>,
    pub price_value: Option<Element>,
    pub sort_select: Option<HtmlSelectElement>,
}

impl Elements {
    /// Resolve all DOM references. Call once after DOMContentLoaded.
    pub fn bind() -> Elements {
        let cart_drawer = by_id("cartDrawer");
        let drawer_close = cart_drawer
            .as_ref()
            .map(|d| query_all_within(d, ".cart-close"))
            .unwrap_or_default();
        let drawer_list = cart_drawer.as_ref().and_then(|d| query_within(d, ".cart-list"));
        let drawer_total = cart_drawer.as_ref().and_then(|d| query_within(d, ".cart-total"));

        let products_grid = query(".products-grid");

        Elements {
            cart_buttons: query_all(".cart-btn"),
            cart_counts: query_all(".cart-count"),

            cart_drawer,
            drawer_close,
            drawer_list,
            drawer_total,

            cart_page: query(".cart-page"),
            cart_items: query(".cart-items"),
            cart_summary_total: by_id("cartSummaryTotal"),

            add_to_cart_btn: by_id_typed("addToCartBtn"),

            product_cards: query_all(".product-card"),

            checkout_page: query(".checkout-page"),
            finish_order: by_id_typed("finishOrder"),
            summary_subtotal: by_id("summarySubtotal"),
            summary_total: by_id("summaryTotal"),
            cart_summary: by_id("cartSummary"),

            wishlist_page: query(".wishlist-page"),
            wishlist_grid: query(".wishlist-grid"),
            wishlist_empty: query(".wishlist-empty"),

            products_grid,
            gender_buttons: query_all("[data-filter]"),
            category_boxes: query_all(".flt-cat")
                .into_iter()
                .filter_map(|e| e.dyn_into::<HtmlInputElement>().ok())
                .collect(),
            price_range: by_id_typed("priceRange"),
            price_value: by_id("priceValue"),
            sort_select: by_id_typed::<HtmlSelectElement>("sortSelect").or_else(|| {
                query(".sort-select").and_then(|e| e.dyn_into::<HtmlSelectElement>().ok())
            }),
        }
    }

    pub fn open_drawer(&self) {
        if let Some(drawer) = &self.cart_drawer {
            add_class(drawer, "open");
        }
    }

    pub fn close_drawer(&self) {
        if let Some(drawer) = &self.cart_drawer {
            remove_class(drawer, "open");
        }
    }
}
