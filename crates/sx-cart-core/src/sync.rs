//! Views that mirror persisted cart and wishlist state.
//!
//! A view is handed freshly loaded state and must rebuild its whole region
//! from it. Views never keep state between renders.

use crate::cart::Cart;
use crate::wishlist::Wishlist;
use std::rc::Rc;

pub trait CartView {
    fn name(&self) -> &str;
    fn render_cart(&self, cart: &Cart);
}

pub trait WishlistView {
    fn name(&self) -> &str;
    fn render_wishlist(&self, wishlist: &Wishlist);
}

#[derive(Default)]
pub struct ViewRegistry {
    cart_views: Vec<Rc<dyn CartView>>,
    wishlist_views: Vec<Rc<dyn WishlistView>>,
}

impl ViewRegistry {
    pub fn mount_cart(&mut self, view: Rc<dyn CartView>) {
        self.cart_views.push(view);
    }

    pub fn mount_wishlist(&mut self, view: Rc<dyn WishlistView>) {
        self.wishlist_views.push(view);
    }

    pub fn cart_views(&self) -> &[Rc<dyn CartView>] {
        &self.cart_views
    }

    pub fn wishlist_views(&self) -> &[Rc<dyn WishlistView>] {
        &self.wishlist_views
    }

    pub fn len(&self) -> usize {
        self.cart_views.len() + self.wishlist_views.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
