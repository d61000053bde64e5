//! Product price helpers and the catalog filter/sort used on listing pages.

use std::str::FromStr;
use sx_types::is_valid_price;

/// Keeps the ASCII digits of a rendered price ("49,900 ₸" -> 49900).
/// Text without digits parses as zero.
pub fn parse_price_text(text: &str) -> f64 {
    let digits: String = text.chars().filter(char::is_ascii_digit).collect();
    digits.parse().unwrap_or(0.0)
}

/// Reads a machine-readable `data-price` value. Anything that is not a finite,
/// non-negative number falls back to the digits in the text.
pub fn parse_price_attr(raw: &str) -> f64 {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|price| is_valid_price(*price))
        .unwrap_or_else(|| parse_price_text(raw))
}

pub fn format_price(amount: f64, currency: &str) -> String {
    format!("{amount} {currency}")
}

/// Filterable attributes of one product card.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductFacets {
    pub id: u64,
    pub gender: String,
    pub category: String,
    pub price: f64,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CatalogFilter {
    /// `None` and `"all"` accept every gender.
    pub gender: Option<String>,
    /// Empty accepts every category.
    pub categories: Vec<String>,
    pub max_price: Option<f64>,
}

impl CatalogFilter {
    pub fn matches(&self, product: &ProductFacets) -> bool {
        let gender_ok = match self.gender.as_deref() {
            None | Some("all") => true,
            Some(gender) => product.gender == gender,
        };
        let category_ok =
            self.categories.is_empty() || self.categories.iter().any(|c| *c == product.category);
        let price_ok = self.max_price.is_none_or(|max| product.price <= max);

        gender_ok && category_ok && price_ok
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortOrder {
    #[default]
    Featured,
    PriceLow,
    PriceHigh,
    Newest,
}

impl FromStr for SortOrder {
    type Err = std::convert::Infallible;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Ok(match value {
            "low" => SortOrder::PriceLow,
            "high" => SortOrder::PriceHigh,
            "new" => SortOrder::Newest,
            _ => SortOrder::Featured,
        })
    }
}

/// Display order of `products` as indices into the slice. Ties keep source order.
pub fn sorted_order(products: &[ProductFacets], order: SortOrder) -> Vec<usize> {
    let mut indices: Vec<usize> = (0..products.len()).collect();
    match order {
        SortOrder::Featured => {}
        SortOrder::PriceLow => {
            indices.sort_by(|&a, &b| products[a].price.total_cmp(&products[b].price));
        }
        SortOrder::PriceHigh => {
            indices.sort_by(|&a, &b| products[b].price.total_cmp(&products[a].price));
        }
        SortOrder::Newest => {
            indices.sort_by(|&a, &b| products[b].id.cmp(&products[a].id));
        }
    }
    indices
}
