//! Authoritative cart state

use serde::{Deserialize, Serialize};

use crate::types::catalog::ProductId;

use super::item::CartItem;

/// The single source of truth for what is being bought.
///
/// Mutated only by direct user actions; background shipping/promo resolution
/// never writes here.
#[derive(Debug, Clone, Default)]
pub struct CartStore {
    /// Items in insertion order (relevant to display, not to totals).
    items: Vec<CartItem>,
}

/// Immutable view of the cart taken at a point in time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartSnapshot {
    /// Items at snapshot time.
    pub items:    Vec<CartItem>,
    /// Subtotal at snapshot time.
    pub subtotal: u64,
}

impl CartStore {
    /// Creates an empty cart.
    #[must_use]
    pub fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Adds an item to the cart.
    ///
    /// If the product is already present, its quantity increases by the new
    /// item's quantity. Quantities clamp to `[1, stock]`; an item with zero
    /// stock never enters the cart.
    pub fn add_item(&mut self, item: CartItem) {
        if let Some(existing) = self.items.iter_mut().find(|i| i.product_id == item.product_id) {
            // The incoming item carries the freshest stock reading.
            existing.stock = item.stock;
            let requested = existing.quantity.saturating_add(item.quantity);
            existing.quantity = requested.min(existing.stock).max(1);
            return;
        }

        if item.stock == 0 {
            return;
        }

        let mut item = item;
        item.quantity = item.quantity.min(item.stock).max(1);
        self.items.push(item);
    }

    /// Updates an item's quantity, clamped to its stock ceiling.
    ///
    /// A quantity below 1 is a no-op; removal goes through [`Self::remove_item`].
    pub fn update_quantity(&mut self, product_id: &ProductId, quantity: u32) {
        if quantity < 1 {
            return;
        }
        if let Some(item) = self.items.iter_mut().find(|i| &i.product_id == product_id) {
            item.quantity = quantity.min(item.stock);
        }
    }

    /// Removes a line. No-op if the product is not in the cart.
    pub fn remove_item(&mut self, product_id: &ProductId) {
        self.items.retain(|i| &i.product_id != product_id);
    }

    /// Empties the cart. Called exactly once per purchase, after the order
    /// has been created, never before.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Subtotal, always recomputed from current items.
    #[must_use]
    pub fn subtotal(&self) -> u64 {
        self.items.iter().map(CartItem::line_total).sum()
    }

    /// Whether the cart is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Number of distinct lines.
    #[must_use]
    pub fn unique_item_count(&self) -> usize {
        self.items.len()
    }

    /// Total quantity across all lines.
    #[must_use]
    pub fn total_quantity(&self) -> u32 {
        self.items.iter().map(|i| i.quantity).sum()
    }

    /// Current items, read-only.
    #[must_use]
    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    /// Takes an immutable snapshot for composition and promo validation.
    #[must_use]
    pub fn snapshot(&self) -> CartSnapshot {
        CartSnapshot { items: self.items.clone(), subtotal: self.subtotal() }
    }
}
