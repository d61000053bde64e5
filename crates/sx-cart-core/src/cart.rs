use serde::{Deserialize, Serialize};
use sx_types::{CartLine, LineKey};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CartError {
    #[error("cart index {index} is out of range for {len} lines")]
    IndexOutOfRange { index: usize, len: usize },
    #[error("no cart line for {0}")]
    LineNotFound(LineKey),
}

/// Ordered cart lines, at most one per (name, size, color).
///
/// Serializes as a bare JSON array. Loading merges duplicate variants and
/// lifts zero quantities to one.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "Vec<CartLine>", into = "Vec<CartLine>")]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn position(&self, key: &LineKey) -> Option<usize> {
        self.lines.iter().position(|line| line.matches(key))
    }

    pub fn get(&self, key: &LineKey) -> Option<&CartLine> {
        self.lines.iter().find(|line| line.matches(key))
    }

    /// Merges `line` into an existing line of the same variant, or appends it.
    ///
    /// A zero quantity counts as one. Returns the index of the affected line.
    pub fn add_or_merge(&mut self, mut line: CartLine) -> usize {
        let qty = line.qty.max(1);
        let key = line.key();

        if let Some(idx) = self.position(&key) {
            let existing = &mut self.lines[idx];
            existing.qty = existing.qty.saturating_add(qty);
            return idx;
        }

        line.qty = qty;
        self.lines.push(line);
        self.lines.len() - 1
    }

    /// Returns the new quantity.
    pub fn increment_at(&mut self, index: usize) -> Result<u32, CartError> {
        let len = self.lines.len();
        let line = self
            .lines
            .get_mut(index)
            .ok_or(CartError::IndexOutOfRange { index, len })?;
        line.qty = line.qty.saturating_add(1);
        Ok(line.qty)
    }

    /// Returns the new quantity, or `None` when the line was removed.
    pub fn decrement_at(&mut self, index: usize) -> Result<Option<u32>, CartError> {
        let len = self.lines.len();
        let line = self
            .lines
            .get_mut(index)
            .ok_or(CartError::IndexOutOfRange { index, len })?;

        if line.qty > 1 {
            line.qty -= 1;
            Ok(Some(line.qty))
        } else {
            self.lines.remove(index);
            Ok(None)
        }
    }

    pub fn increment(&mut self, key: &LineKey) -> Result<u32, CartError> {
        let index = self.require(key)?;
        self.increment_at(index)
    }

    pub fn decrement(&mut self, key: &LineKey) -> Result<Option<u32>, CartError> {
        let index = self.require(key)?;
        self.decrement_at(index)
    }

    pub fn remove(&mut self, key: &LineKey) -> Result<CartLine, CartError> {
        let index = self.require(key)?;
        Ok(self.lines.remove(index))
    }

    pub fn total_count(&self) -> u64 {
        self.lines.iter().map(|line| u64::from(line.qty)).sum()
    }

    pub fn total_price(&self) -> f64 {
        self.lines.iter().map(CartLine::line_total).sum()
    }

    pub fn clear(&mut self) {
        self.lines.clear();
    }

    fn require(&self, key: &LineKey) -> Result<usize, CartError> {
        self.position(key)
            .ok_or_else(|| CartError::LineNotFound(key.clone()))
    }
}

impl From<Vec<CartLine>> for Cart {
    fn from(lines: Vec<CartLine>) -> Self {
        let mut cart = Cart::new();
        for line in lines {
            cart.add_or_merge(line);
        }
        cart
    }
}

impl From<Cart> for Vec<CartLine> {
    fn from(cart: Cart) -> Self {
        cart.lines
    }
}
