use crate::cart::{Cart, CartError};
use crate::checkout::{CheckoutError, CheckoutSummary, OrderReceipt};
use crate::config::StorefrontConfig;
use crate::sync::{CartView, ViewRegistry, WishlistView};
use crate::wishlist::Wishlist;
use std::rc::Rc;
use sx_storage::{KeyValueStore, KeyValueStoreExt};
use sx_types::{CartLine, LineId, LineKey, WishlistEntry, is_valid_price};
use thiserror::Error;
use tracing::{debug, info, warn};

#[derive(Debug, Error)]
pub enum StorefrontError {
    #[error(transparent)]
    Cart(#[from] CartError),
    #[error(transparent)]
    Checkout(#[from] CheckoutError),
    #[error("'{0}' is not in the wishlist")]
    NotInWishlist(String),
    #[error("'{name}' has an invalid price {price}")]
    InvalidPrice { name: String, price: f64 },
    #[error(transparent)]
    Storage(#[from] anyhow::Error),
}

/// Cart and wishlist operations over an injected store.
///
/// Every mutation reloads the collection, applies the change, persists it and
/// then re-renders every mounted view of that collection. Nothing is cached
/// between calls.
pub struct Storefront<S> {
    store: S,
    config: StorefrontConfig,
    views: ViewRegistry,
}

impl<S> Storefront<S>
where
    S: KeyValueStore,
{
    pub fn new(store: S, config: StorefrontConfig) -> Self {
        Self {
            store,
            config,
            views: ViewRegistry::default(),
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn config(&self) -> &StorefrontConfig {
        &self.config
    }

    pub fn views(&self) -> &ViewRegistry {
        &self.views
    }

    /// Mounts `view` and renders it once with the current cart.
    pub fn mount_cart_view(&mut self, view: Rc<dyn CartView>) {
        view.render_cart(&self.cart());
        self.views.mount_cart(view);
    }

    pub fn mount_wishlist_view(&mut self, view: Rc<dyn WishlistView>) {
        view.render_wishlist(&self.wishlist());
        self.views.mount_wishlist(view);
    }

    pub fn cart(&self) -> Cart {
        self.store.load_or_default(&self.config.cart_key)
    }

    pub fn wishlist(&self) -> Wishlist {
        self.store.load_or_default(&self.config.wishlist_key)
    }

    /// Rejects a line whose price is negative or not finite; nothing is
    /// written in that case.
    pub fn add_to_cart(&self, line: CartLine) -> Result<Cart, StorefrontError> {
        check_price(&line.name, line.price)?;
        let key = line.key();
        self.mutate_cart("add", move |cart| {
            let idx = cart.add_or_merge(line);
            debug!("cart line {} now at index {}", key, idx);
            Ok(())
        })
    }

    pub fn increment(&self, key: &LineKey) -> Result<Cart, StorefrontError> {
        self.mutate_cart("increment", |cart| cart.increment(key).map(drop))
    }

    pub fn decrement(&self, key: &LineKey) -> Result<Cart, StorefrontError> {
        self.mutate_cart("decrement", |cart| cart.decrement(key).map(drop))
    }

    pub fn remove_line(&self, key: &LineKey) -> Result<Cart, StorefrontError> {
        self.mutate_cart("remove", |cart| cart.remove(key).map(drop))
    }

    /// Positional variant of [`Storefront::increment`]. The index refers to the
    /// cart as currently stored.
    pub fn increment_at(&self, index: usize) -> Result<Cart, StorefrontError> {
        self.mutate_cart("increment", |cart| cart.increment_at(index).map(drop))
    }

    pub fn decrement_at(&self, index: usize) -> Result<Cart, StorefrontError> {
        self.mutate_cart("decrement", |cart| cart.decrement_at(index).map(drop))
    }

    pub fn checkout_summary(&self) -> CheckoutSummary {
        CheckoutSummary::from_cart(&self.cart())
    }

    /// Places the order: rejects an empty cart, otherwise clears it.
    pub fn finish_order(&self) -> Result<OrderReceipt, StorefrontError> {
        let mut cart = self.cart();
        let receipt = OrderReceipt::for_cart(&cart).inspect_err(|err| {
            warn!("checkout rejected: {}", err);
        })?;

        cart.clear();
        self.store.save_json(&self.config.cart_key, &cart)?;
        info!(
            "order placed: {} items in {} lines, total {}",
            receipt.items, receipt.lines, receipt.total
        );
        self.sync_cart_views();

        Ok(receipt)
    }

    /// Returns whether the product is liked afterwards.
    pub fn toggle_wishlist(&self, entry: WishlistEntry) -> Result<bool, StorefrontError> {
        let mut wishlist = self.wishlist();
        if !wishlist.contains(&entry.name) {
            check_price(&entry.name, entry.price)?;
        }
        let liked = wishlist.toggle(entry);
        self.save_wishlist(&wishlist)?;
        Ok(liked)
    }

    pub fn remove_from_wishlist(&self, name: &str) -> Result<bool, StorefrontError> {
        let mut wishlist = self.wishlist();
        let removed = wishlist.remove(name);
        self.save_wishlist(&wishlist)?;
        Ok(removed)
    }

    /// Adds the saved product `name` to the cart as a single plain unit.
    /// The wishlist itself is left untouched.
    pub fn add_from_wishlist(&self, name: &str, id: LineId) -> Result<Cart, StorefrontError> {
        let wishlist = self.wishlist();
        let entry = wishlist
            .get(name)
            .ok_or_else(|| StorefrontError::NotInWishlist(name.to_owned()))?;
        self.add_to_cart(entry.to_cart_line(id))
    }

    /// Re-renders every mounted cart view, each from its own fresh read.
    pub fn sync_cart_views(&self) {
        for view in self.views.cart_views() {
            debug!("rendering cart view {}", view.name());
            view.render_cart(&self.cart());
        }
    }

    pub fn sync_wishlist_views(&self) {
        for view in self.views.wishlist_views() {
            debug!("rendering wishlist view {}", view.name());
            view.render_wishlist(&self.wishlist());
        }
    }

    fn mutate_cart<F, R>(&self, op: &str, apply: F) -> Result<Cart, StorefrontError>
    where
        F: FnOnce(&mut Cart) -> Result<R, CartError>,
    {
        let mut cart = self.cart();
        apply(&mut cart).inspect_err(|err| {
            warn!("cart {} rejected: {}", op, err);
        })?;

        self.store.save_json(&self.config.cart_key, &cart)?;
        debug!(
            "cart {}: {} lines, {} items",
            op,
            cart.len(),
            cart.total_count()
        );
        self.sync_cart_views();

        Ok(cart)
    }

    fn save_wishlist(&self, wishlist: &Wishlist) -> Result<(), StorefrontError> {
        self.store.save_json(&self.config.wishlist_key, wishlist)?;
        debug!("wishlist saved with {} entries", wishlist.len());
        self.sync_wishlist_views();
        Ok(())
    }
}

fn check_price(name: &str, price: f64) -> Result<(), StorefrontError> {
    if is_valid_price(price) {
        return Ok(());
    }
    warn!("rejecting '{}' with price {}", name, price);
    Err(StorefrontError::InvalidPrice {
        name: name.to_owned(),
        price,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use sx_storage::InMemoryStore;

    #[derive(Default)]
    struct Recorder {
        name: String,
        carts: RefCell<Vec<Cart>>,
        wishlists: RefCell<Vec<Wishlist>>,
    }

    impl Recorder {
        fn named(name: &str) -> Rc<Self> {
            Rc::new(Self {
                name: name.to_owned(),
                ..Self::default()
            })
        }

        fn last_cart(&self) -> Option<Cart> {
            self.carts.borrow().last().cloned()
        }

        fn cart_renders(&self) -> usize {
            self.carts.borrow().len()
        }

        fn last_wishlist(&self) -> Option<Wishlist> {
            self.wishlists.borrow().last().cloned()
        }

        fn wishlist_renders(&self) -> usize {
            self.wishlists.borrow().len()
        }
    }

    impl CartView for Recorder {
        fn name(&self) -> &str {
            &self.name
        }

        fn render_cart(&self, cart: &Cart) {
            self.carts.borrow_mut().push(cart.clone());
        }
    }

    impl WishlistView for Recorder {
        fn name(&self) -> &str {
            &self.name
        }

        fn render_wishlist(&self, wishlist: &Wishlist) {
            self.wishlists.borrow_mut().push(wishlist.clone());
        }
    }

    fn storefront() -> Storefront<InMemoryStore> {
        Storefront::new(InMemoryStore::new(), StorefrontConfig::default())
    }

    fn shoe_a(qty: u32) -> CartLine {
        CartLine {
            id: LineId::Timestamp(1_700_000_000_000),
            name: "Shoe A".to_owned(),
            price: 1000.0,
            img: "shoe-a.jpg".to_owned(),
            size: "M".to_owned(),
            color: "red".to_owned(),
            qty,
        }
    }

    #[test]
    fn repeated_add_merges_and_persists() -> anyhow::Result<()> {
        let sf = storefront();
        sf.add_to_cart(shoe_a(1))?;
        let cart = sf.add_to_cart(shoe_a(1))?;

        assert_eq!(cart.len(), 1);
        assert_eq!(cart.lines()[0].qty, 2);
        assert_eq!(cart.total_price(), 2000.0);
        assert_eq!(sf.cart(), cart);

        let raw = sf.store().get("sportx_cart")?.unwrap_or_default();
        assert!(raw.contains("\"qty\":2"));

        Ok(())
    }

    #[test]
    fn every_cart_view_rerenders_after_mutation() -> anyhow::Result<()> {
        let mut sf = storefront();
        let drawer = Recorder::named("drawer");
        let page = Recorder::named("cart-page");
        let badge = Recorder::named("header-badge");
        sf.mount_cart_view(drawer.clone());
        sf.mount_cart_view(page.clone());
        sf.mount_cart_view(badge.clone());

        sf.add_to_cart(shoe_a(1))?;
        sf.increment(&LineKey::new("Shoe A", "M", "red"))?;

        for view in [&drawer, &page, &badge] {
            assert_eq!(view.cart_renders(), 3);
            assert_eq!(view.last_cart().map(|c| c.total_count()), Some(2));
        }

        Ok(())
    }

    #[test]
    fn views_render_what_the_store_holds() -> anyhow::Result<()> {
        let mut sf = storefront();
        let drawer = Recorder::named("drawer");
        sf.mount_cart_view(drawer.clone());

        // another tab wrote to the same storage
        sf.store().save_json("sportx_cart", &vec![shoe_a(4)])?;
        sf.add_to_cart(shoe_a(1))?;

        assert_eq!(drawer.last_cart().map(|c| c.total_count()), Some(5));

        Ok(())
    }

    #[test]
    fn decrementing_last_unit_removes_line() -> anyhow::Result<()> {
        let sf = storefront();
        sf.add_to_cart(shoe_a(1))?;
        let mut other = shoe_a(1);
        other.size = "L".to_owned();
        sf.add_to_cart(other)?;

        let cart = sf.decrement(&LineKey::new("Shoe A", "M", "red"))?;

        assert_eq!(cart.len(), 1);
        assert_eq!(cart.lines()[0].size, "L");

        Ok(())
    }

    #[test]
    fn rejected_mutation_neither_writes_nor_renders() -> anyhow::Result<()> {
        let mut sf = storefront();
        let drawer = Recorder::named("drawer");
        sf.mount_cart_view(drawer.clone());
        sf.add_to_cart(shoe_a(1))?;
        let before = sf.store().get("sportx_cart")?;

        let err = sf.increment_at(3).unwrap_err();
        assert!(matches!(
            err,
            StorefrontError::Cart(CartError::IndexOutOfRange { index: 3, len: 1 })
        ));
        let err = sf.decrement(&LineKey::new("Shoe A", "XL", "red")).unwrap_err();
        assert!(matches!(err, StorefrontError::Cart(CartError::LineNotFound(_))));

        assert_eq!(sf.store().get("sportx_cart")?, before);
        assert_eq!(drawer.cart_renders(), 2);

        Ok(())
    }

    #[test]
    fn positional_mutation_uses_stored_order() -> anyhow::Result<()> {
        let sf = storefront();
        sf.add_to_cart(shoe_a(1))?;
        sf.add_to_cart(CartLine::plain(LineId::Card("cap-1".into()), "Cap", 100.0, "cap.jpg"))?;

        let cart = sf.increment_at(1)?;
        assert_eq!(cart.lines()[1].qty, 2);

        let cart = sf.decrement_at(0)?;
        assert_eq!(cart.len(), 1);
        assert_eq!(cart.lines()[0].name, "Cap");

        Ok(())
    }

    #[test]
    fn corrupt_cart_starts_empty_and_is_overwritten() -> anyhow::Result<()> {
        let store = InMemoryStore::with_entries([("sportx_cart", "<html>oops")]);
        let sf = Storefront::new(store, StorefrontConfig::default());

        assert!(sf.cart().is_empty());
        sf.add_to_cart(shoe_a(1))?;
        assert_eq!(sf.cart().total_count(), 1);

        Ok(())
    }

    #[test]
    fn finish_order_rejects_empty_cart() {
        let mut sf = storefront();
        let badge = Recorder::named("header-badge");
        sf.mount_cart_view(badge.clone());

        let err = sf.finish_order().unwrap_err();

        assert!(matches!(err, StorefrontError::Checkout(CheckoutError::EmptyCart)));
        assert_eq!(badge.cart_renders(), 1);
    }

    #[test]
    fn finish_order_clears_cart_and_notifies() -> anyhow::Result<()> {
        let mut sf = storefront();
        let badge = Recorder::named("header-badge");
        sf.mount_cart_view(badge.clone());
        sf.add_to_cart(shoe_a(2))?;

        let summary = sf.checkout_summary();
        assert_eq!(summary.total, 2000.0);

        let receipt = sf.finish_order()?;

        assert_eq!(receipt.items, 2);
        assert_eq!(receipt.total, 2000.0);
        assert!(sf.cart().is_empty());
        assert_eq!(sf.cart().total_count(), 0);
        assert_eq!(badge.last_cart().map(|c| c.total_count()), Some(0));

        Ok(())
    }

    #[test]
    fn wishlist_toggle_round_trip() -> anyhow::Result<()> {
        let mut sf = storefront();
        let grid = Recorder::named("wishlist-grid");
        sf.mount_wishlist_view(grid.clone());

        let entry = WishlistEntry::new("Shoe B", 500.0, "shoe-b.jpg");
        assert!(sf.toggle_wishlist(entry.clone())?);
        assert_eq!(sf.wishlist().entries(), &[entry.clone()]);

        assert!(!sf.toggle_wishlist(entry)?);
        assert!(sf.wishlist().is_empty());

        let renders = grid.wishlists.borrow();
        assert_eq!(renders.len(), 3);
        assert_eq!(renders[1].len(), 1);
        assert!(renders[2].is_empty());

        Ok(())
    }

    #[test]
    fn wishlist_item_moves_into_cart_as_plain_unit() -> anyhow::Result<()> {
        let mut sf = storefront();
        let drawer = Recorder::named("drawer");
        sf.mount_cart_view(drawer.clone());
        sf.toggle_wishlist(WishlistEntry::new("Shoe B", 500.0, "shoe-b.jpg"))?;

        let cart = sf.add_from_wishlist("Shoe B", LineId::Timestamp(42))?;

        assert_eq!(cart.lines()[0].size, "-");
        assert_eq!(cart.lines()[0].color, "-");
        assert_eq!(drawer.last_cart(), Some(cart));
        assert!(sf.wishlist().contains("Shoe B"));

        let err = sf.add_from_wishlist("Ghost", LineId::Timestamp(43)).unwrap_err();
        assert!(matches!(err, StorefrontError::NotInWishlist(name) if name == "Ghost"));

        Ok(())
    }

    #[test]
    fn remove_from_wishlist_by_name() -> anyhow::Result<()> {
        let sf = storefront();
        sf.toggle_wishlist(WishlistEntry::new("Cap", 100.0, "cap.jpg"))?;
        sf.toggle_wishlist(WishlistEntry::new("Bag", 300.0, "bag.jpg"))?;

        assert!(sf.remove_from_wishlist("Cap")?);
        assert!(!sf.remove_from_wishlist("Cap")?);
        assert_eq!(sf.wishlist().entries()[0].name, "Bag");

        Ok(())
    }

    #[test]
    fn each_collection_notifies_only_its_own_views() -> anyhow::Result<()> {
        let mut sf = storefront();
        let hearts = Recorder::named("wishlist-hearts");
        let grid = Recorder::named("wishlist-grid");
        let drawer = Recorder::named("drawer");
        sf.mount_wishlist_view(hearts.clone());
        sf.mount_wishlist_view(grid.clone());
        sf.mount_cart_view(drawer.clone());

        sf.toggle_wishlist(WishlistEntry::new("Cap", 100.0, "cap.jpg"))?;
        sf.toggle_wishlist(WishlistEntry::new("Bag", 300.0, "bag.jpg"))?;
        for view in [&hearts, &grid] {
            assert_eq!(view.wishlist_renders(), 3);
        }
        assert_eq!(drawer.cart_renders(), 1);

        sf.remove_from_wishlist("Bag")?;
        for view in [&hearts, &grid] {
            assert_eq!(view.wishlist_renders(), 4);
            assert_eq!(view.last_wishlist().map(|w| w.len()), Some(1));
        }
        assert_eq!(drawer.cart_renders(), 1);

        sf.add_from_wishlist("Cap", LineId::Timestamp(7))?;
        sf.add_to_cart(shoe_a(1))?;
        assert_eq!(drawer.cart_renders(), 3);
        for view in [&hearts, &grid] {
            assert_eq!(view.wishlist_renders(), 4);
            assert_eq!(view.cart_renders(), 0);
        }
        assert_eq!(drawer.wishlist_renders(), 0);

        Ok(())
    }

    #[test]
    fn invalid_price_is_rejected_and_cart_survives() -> anyhow::Result<()> {
        let mut sf = storefront();
        let drawer = Recorder::named("drawer");
        sf.mount_cart_view(drawer.clone());
        sf.add_to_cart(CartLine::plain(LineId::Card("cap-1".into()), "Cap", 100.0, "cap.jpg"))?;
        let before = sf.store().get("sportx_cart")?;

        for price in [f64::NAN, f64::INFINITY, -500.0] {
            let err = sf
                .add_to_cart(CartLine::plain(LineId::Timestamp(1), "Bad", price, "bad.jpg"))
                .unwrap_err();
            assert!(matches!(err, StorefrontError::InvalidPrice { ref name, .. } if name == "Bad"));
        }

        assert_eq!(sf.store().get("sportx_cart")?, before);
        assert_eq!(drawer.cart_renders(), 2);
        assert_eq!(sf.cart().len(), 1);
        assert_eq!(sf.cart().total_price(), 100.0);

        let err = sf
            .toggle_wishlist(WishlistEntry::new("Bad", f64::NAN, "bad.jpg"))
            .unwrap_err();
        assert!(matches!(err, StorefrontError::InvalidPrice { .. }));
        assert!(sf.wishlist().is_empty());

        Ok(())
    }

    #[test]
    fn stored_null_price_keeps_the_rest_of_the_cart() -> anyhow::Result<()> {
        let raw = r#"[
            {"id":1,"name":"Cap","price":100,"img":"cap.jpg","size":"-","color":"-","qty":1},
            {"id":2,"name":"Bad","price":null,"img":"bad.jpg","size":"-","color":"-","qty":2}
        ]"#;
        let store = InMemoryStore::with_entries([("sportx_cart", raw)]);
        let sf = Storefront::new(store, StorefrontConfig::default());

        assert_eq!(sf.cart().len(), 2);

        let cart = sf.add_to_cart(shoe_a(1))?;
        assert_eq!(cart.len(), 3);
        assert_eq!(cart.total_count(), 4);
        assert_eq!(cart.total_price(), 1100.0);

        Ok(())
    }

    #[test]
    fn configured_keys_are_used() -> anyhow::Result<()> {
        let config = StorefrontConfig {
            cart_key: "demo_cart".to_owned(),
            wishlist_key: "demo_wish".to_owned(),
            ..StorefrontConfig::default()
        };
        let sf = Storefront::new(InMemoryStore::new(), config);
        sf.add_to_cart(shoe_a(1))?;
        sf.toggle_wishlist(WishlistEntry::new("Cap", 100.0, "cap.jpg"))?;

        assert!(sf.store().get("demo_cart")?.is_some());
        assert!(sf.store().get("demo_wish")?.is_some());
        assert!(sf.store().get("sportx_cart")?.is_none());

        Ok(())
    }
}
