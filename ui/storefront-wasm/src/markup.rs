//! HTML fragments for the cart and wishlist regions.
//!
//! Rows carry their line identity in `data-name` / `data-size` / `data-color`
//! so click handlers address the variant, not a position.

use sx_cart_core::SummaryRow;
use sx_cart_core::catalog::format_price;
use sx_types::{CartLine, LineKey, NO_OPTION, WishlistEntry};

pub fn escape_html(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

fn or_dash(value: &str) -> &str {
    if value.is_empty() { NO_OPTION } else { value }
}

pub fn key_attrs(key: &LineKey) -> String {
    format!(
        r#"data-name="{}" data-size="{}" data-color="{}""#,
        escape_html(&key.name),
        escape_html(&key.size),
        escape_html(&key.color)
    )
}

fn qty_box(line: &CartLine) -> String {
    let attrs = key_attrs(&line.key());
    format!(
        r#"<div class="qty-box">
                <button class="qty-btn minus" {attrs}>-</button>
                <span>{}</span>
                <button class="qty-btn plus" {attrs}>+</button>
            </div>"#,
        line.qty
    )
}

/// One line inside the slide-out drawer.
pub fn drawer_item(line: &CartLine, currency: &str) -> String {
    format!(
        r#"<img src="{}" class="cart-item-img" alt="">
            <div class="cart-item-info">
                <h4>{}</h4>
                <span>Size: {}</span>
                <span>Color: {}</span>
                {}
            </div>
            <strong class="cart-price">{}</strong>"#,
        escape_html(&line.img),
        escape_html(&line.name),
        escape_html(or_dash(&line.size)),
        escape_html(or_dash(&line.color)),
        qty_box(line),
        format_price(line.line_total(), currency),
    )
}

/// One row of the full cart page.
pub fn cart_row(line: &CartLine, currency: &str) -> String {
    format!(
        r#"<img src="{}" alt="">
            <div class="cart-item-info">
                <h4>{}</h4>
                <span>Size: {}</span>
                <span>Color: {}</span>
            </div>
            <div>
                {}
            </div>
            <div>
                <strong>{}</strong>
            </div>"#,
        escape_html(&line.img),
        escape_html(&line.name),
        escape_html(or_dash(&line.size)),
        escape_html(or_dash(&line.color)),
        qty_box(line),
        format_price(line.line_total(), currency),
    )
}

pub fn summary_row(row: &SummaryRow, currency: &str) -> String {
    format!(
        r#"<div class="summary-row">
                <span>{} × {}</span>
                <span>{}</span>
            </div>"#,
        escape_html(&row.name),
        row.qty,
        format_price(row.line_total, currency),
    )
}

pub fn wishlist_card(entry: &WishlistEntry, currency: &str) -> String {
    let name = escape_html(&entry.name);
    format!(
        r#"<img src="{}" alt="">
            <h4>{name}</h4>
            <div class="price">{}</div>
            <div class="wishlist-actions">
                <button class="btn small-btn add-from-wish" data-name="{name}">Add to cart</button>
                <button class="remove-wish" data-name="{name}">×</button>
            </div>"#,
        escape_html(&entry.img),
        format_price(entry.price, currency),
    )
}

pub fn heart(liked: bool) -> &'static str {
    if liked { "❤️" } else { "♡" }
}
