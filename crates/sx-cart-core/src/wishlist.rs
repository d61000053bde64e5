use serde::{Deserialize, Serialize};
use sx_types::WishlistEntry;

/// Saved products, unique by name, in the order they were liked.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "Vec<WishlistEntry>", into = "Vec<WishlistEntry>")]
pub struct Wishlist {
    entries: Vec<WishlistEntry>,
}

impl Wishlist {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> &[WishlistEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.iter().any(|entry| entry.name == name)
    }

    pub fn get(&self, name: &str) -> Option<&WishlistEntry> {
        self.entries.iter().find(|entry| entry.name == name)
    }

    /// Removes the entry named like `entry` if present, otherwise appends it.
    /// Returns whether the product is liked afterwards.
    pub fn toggle(&mut self, entry: WishlistEntry) -> bool {
        if self.remove(&entry.name) {
            false
        } else {
            self.entries.push(entry);
            true
        }
    }

    pub fn remove(&mut self, name: &str) -> bool {
        let before = self.entries.len();
        self.entries.retain(|entry| entry.name != name);
        self.entries.len() != before
    }
}

impl From<Vec<WishlistEntry>> for Wishlist {
    fn from(entries: Vec<WishlistEntry>) -> Self {
        let mut wishlist = Wishlist::new();
        for entry in entries {
            if !wishlist.contains(&entry.name) {
                wishlist.entries.push(entry);
            }
        }
        wishlist
    }
}

impl From<Wishlist> for Vec<WishlistEntry> {
    fn from(wishlist: Wishlist) -> Self {
        wishlist.entries
    }
}
