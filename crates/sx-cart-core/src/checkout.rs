use crate::cart::Cart;
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CheckoutError {
    #[error("cart is empty")]
    EmptyCart,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryRow {
    pub name: String,
    pub qty: u32,
    pub line_total: f64,
}

/// Order summary shown next to the checkout form.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CheckoutSummary {
    pub rows: Vec<SummaryRow>,
    pub subtotal: f64,
    pub total: f64,
}

impl CheckoutSummary {
    pub fn from_cart(cart: &Cart) -> Self {
        let rows: Vec<SummaryRow> = cart
            .lines()
            .iter()
            .map(|line| SummaryRow {
                name: line.name.clone(),
                qty: line.qty,
                line_total: line.line_total(),
            })
            .collect();
        let subtotal = rows.iter().map(|row| row.line_total).sum();

        // no shipping or tax yet
        Self {
            rows,
            subtotal,
            total: subtotal,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OrderReceipt {
    pub lines: usize,
    pub items: u64,
    pub total: f64,
}

impl OrderReceipt {
    pub fn for_cart(cart: &Cart) -> Result<Self, CheckoutError> {
        if cart.is_empty() {
            return Err(CheckoutError::EmptyCart);
        }

        Ok(Self {
            lines: cart.len(),
            items: cart.total_count(),
            total: cart.total_price(),
        })
    }
}
