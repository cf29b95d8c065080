//! Shopping cart store.
//!
//! One cart per storage owner. Every mutation writes the full snapshot back
//! through the injected [`Storage`]; construction rehydrates from the same
//! key and silently starts empty when the payload is absent or corrupt.
//! Derived values (item count, subtotal) are always recomputed from the
//! current lines, never cached.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::domain::pricing::{display_price, PricingContext};
use crate::domain::product::Product;
use crate::domain::value_objects::Money;
use crate::storage::{keys, Storage};

/// A product with a positive quantity. At most one line exists per product
/// id; a quantity reaching zero removes the line entirely.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CartLine {
    pub product: Product,
    pub quantity: u32,
}

impl CartLine {
    pub fn line_total(&self, ctx: &PricingContext) -> Money {
        display_price(&self.product, ctx).price.multiply(self.quantity)
    }
}

pub struct Cart {
    lines: Vec<CartLine>,
    storage: Arc<dyn Storage>,
}

impl Cart {
    /// Rehydrate the cart from storage, falling back to empty on any
    /// missing or malformed snapshot.
    pub fn load(storage: Arc<dyn Storage>) -> Self {
        let lines = storage
            .get(keys::CART)
            .and_then(|raw| serde_json::from_str(&raw).ok())
            .unwrap_or_default();
        Self { lines, storage }
    }

    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn total_item_count(&self) -> u32 {
        self.lines.iter().map(|l| l.quantity).sum()
    }

    pub fn subtotal(&self, ctx: &PricingContext) -> Money {
        self.lines
            .iter()
            .fold(Money::zero("USD"), |acc, l| acc.add(&l.line_total(ctx)).unwrap_or(acc))
    }

    /// Add one unit of `product`, merging into an existing line for the
    /// same product id.
    pub fn add_item(&mut self, product: Product) {
        if let Some(line) = self.lines.iter_mut().find(|l| l.product.id == product.id) {
            line.quantity += 1;
        } else {
            self.lines.push(CartLine { product, quantity: 1 });
        }
        self.persist();
    }

    /// Remove the line for `product_id`. Absent ids are a no-op.
    pub fn remove_item(&mut self, product_id: &str) {
        self.lines.retain(|l| l.product.id != product_id);
        self.persist();
    }

    /// Set the quantity for an existing line. Zero or negative removes the
    /// line; an absent id creates nothing.
    pub fn update_quantity(&mut self, product_id: &str, quantity: i64) {
        if quantity <= 0 {
            self.remove_item(product_id);
            return;
        }
        if let Some(line) = self.lines.iter_mut().find(|l| l.product.id == product_id) {
            line.quantity = quantity as u32;
            self.persist();
        }
    }

    pub fn clear(&mut self) {
        self.lines.clear();
        self.persist();
    }

    fn persist(&self) {
        match serde_json::to_string(&self.lines) {
            Ok(raw) => self.storage.put(keys::CART, &raw),
            Err(e) => tracing::warn!(error = %e, "failed to serialize cart snapshot"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStorage;
    use chrono::Weekday;
    use rust_decimal::Decimal;

    fn product(id: &str, cost: &str) -> Product {
        Product {
            id: id.into(),
            name: "Rose Glow Blush".into(),
            sku: format!("SKU-{id}"),
            suggested_cost: cost.into(),
            weight_grams: None,
            color: None,
            categories: vec!["face".into()],
            inventory_count: 5,
            description: String::new(),
            expired: false,
        }
    }

    #[test]
    fn test_add_same_product_merges_line() {
        let mut cart = Cart::load(Arc::new(MemoryStorage::new()));
        cart.add_item(product("p1", "10.00"));
        cart.add_item(product("p1", "10.00"));
        assert_eq!(cart.lines().len(), 1);
        assert_eq!(cart.lines()[0].quantity, 2);
        assert_eq!(cart.total_item_count(), 2);
    }

    #[test]
    fn test_snapshot_round_trip() {
        let storage: Arc<dyn Storage> = Arc::new(MemoryStorage::new());
        {
            let mut cart = Cart::load(storage.clone());
            cart.add_item(product("p1", "10.00"));
            cart.add_item(product("p2", "4.25"));
            cart.update_quantity("p2", 3);
        }
        let cart = Cart::load(storage);
        let pairs: Vec<(&str, u32)> =
            cart.lines().iter().map(|l| (l.product.id.as_str(), l.quantity)).collect();
        assert_eq!(pairs, vec![("p1", 1), ("p2", 3)]);
    }

    #[test]
    fn test_corrupt_snapshot_loads_empty() {
        let storage: Arc<dyn Storage> = Arc::new(MemoryStorage::new());
        storage.put(keys::CART, "{{definitely not a cart");
        let cart = Cart::load(storage);
        assert!(cart.is_empty());
    }

    #[test]
    fn test_zero_quantity_removes_line() {
        let mut cart = Cart::load(Arc::new(MemoryStorage::new()));
        cart.add_item(product("p1", "10.00"));
        cart.update_quantity("p1", 0);
        assert!(cart.is_empty());
    }

    #[test]
    fn test_update_absent_id_is_noop() {
        let mut cart = Cart::load(Arc::new(MemoryStorage::new()));
        cart.update_quantity("ghost", 4);
        assert!(cart.is_empty());
        cart.remove_item("ghost"); // also a no-op
        assert!(cart.is_empty());
    }

    #[test]
    fn test_weekday_subtotal_includes_markup() {
        let mut cart = Cart::load(Arc::new(MemoryStorage::new()));
        cart.add_item(product("p1", "100.00"));
        cart.add_item(product("p1", "100.00"));
        // 100 * 1.30 * 2
        let subtotal = cart.subtotal(&PricingContext::on(Weekday::Wed));
        assert_eq!(subtotal.amount(), Decimal::new(26000, 2));
    }

    #[test]
    fn test_friday_subtotal_is_at_cost() {
        let mut cart = Cart::load(Arc::new(MemoryStorage::new()));
        cart.add_item(product("p1", "100.00"));
        cart.add_item(product("p1", "100.00"));
        let ctx = PricingContext::on(Weekday::Fri);
        assert_eq!(cart.subtotal(&ctx).amount(), Decimal::new(20000, 2));
        let unit = display_price(&cart.lines()[0].product, &ctx);
        assert_eq!(unit.was_price.unwrap().amount(), Decimal::new(13000, 2));
    }

    #[test]
    fn test_clear_empties_and_persists() {
        let storage: Arc<dyn Storage> = Arc::new(MemoryStorage::new());
        let mut cart = Cart::load(storage.clone());
        cart.add_item(product("p1", "10.00"));
        cart.clear();
        assert!(cart.is_empty());
        assert!(Cart::load(storage).is_empty());
    }
}
