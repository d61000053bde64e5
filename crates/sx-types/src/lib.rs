use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Placeholder stored for a size or color the product does not offer.
pub const NO_OPTION: &str = "-";

fn no_option() -> String {
    NO_OPTION.to_owned()
}

fn one() -> u32 {
    1
}

/// A price usable in cart totals: finite and not negative.
pub fn is_valid_price(price: f64) -> bool {
    price.is_finite() && price >= 0.0
}

// `null` is what a NaN price serializes to; it loads as zero instead of
// failing the whole collection.
fn lenient_price<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let price = Option::<f64>::deserialize(deserializer)?;
    Ok(price.filter(|p| is_valid_price(*p)).unwrap_or_default())
}

/// Opaque cart line identifier: a creation timestamp in milliseconds or an id
/// supplied by the product card markup.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(untagged)]
pub enum LineId {
    Timestamp(u64),
    Card(String),
}

impl fmt::Display for LineId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LineId::Timestamp(ms) => write!(f, "{ms}"),
            LineId::Card(id) => f.write_str(id),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CartLine {
    pub id: LineId,
    pub name: String,
    #[serde(default, deserialize_with = "lenient_price")]
    pub price: f64,
    #[serde(default)]
    pub img: String,
    #[serde(default = "no_option")]
    pub size: String,
    #[serde(default = "no_option")]
    pub color: String,
    #[serde(default = "one")]
    pub qty: u32,
}

impl CartLine {
    /// A single unit of a product without size or color options.
    pub fn plain(id: LineId, name: impl Into<String>, price: f64, img: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            price,
            img: img.into(),
            size: no_option(),
            color: no_option(),
            qty: 1,
        }
    }

    pub fn key(&self) -> LineKey {
        LineKey {
            name: self.name.clone(),
            size: self.size.clone(),
            color: self.color.clone(),
        }
    }

    pub fn matches(&self, key: &LineKey) -> bool {
        self.name == key.name && self.size == key.size && self.color == key.color
    }

    pub fn line_total(&self) -> f64 {
        self.price * f64::from(self.qty)
    }
}

/// Identity of a cart line: one product variant.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct LineKey {
    pub name: String,
    pub size: String,
    pub color: String,
}

impl LineKey {
    pub fn new(name: impl Into<String>, size: impl Into<String>, color: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            size: size.into(),
            color: color.into(),
        }
    }
}

impl fmt::Display for LineKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}/{})", self.name, self.size, self.color)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WishlistEntry {
    pub name: String,
    #[serde(default, deserialize_with = "lenient_price")]
    pub price: f64,
    #[serde(default)]
    pub img: String,
}

impl WishlistEntry {
    pub fn new(name: impl Into<String>, price: f64, img: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            price,
            img: img.into(),
        }
    }

    /// Cart line for this saved product, as added from the wishlist grid.
    pub fn to_cart_line(&self, id: LineId) -> CartLine {
        CartLine::plain(id, self.name.clone(), self.price, self.img.clone())
    }
}
