//! Cart line item

use std::borrow::Cow;

use serde::{Deserialize, Serialize};

use crate::types::catalog::{CategoryId, ProductId};

/// Line item in the cart.
///
/// Owned exclusively by [`CartStore`](super::CartStore); everything outside
/// the store sees clones taken through a snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartItem {
    /// Product ID.
    pub product_id: ProductId,
    /// Product name (cached for display).
    pub name:       Cow<'static, str>,
    /// Product image URL (cached).
    pub image_url:  Option<Cow<'static, str>>,
    /// Unit price in minor currency units.
    pub unit_price: u64,
    /// Quantity, always in `[1, stock]`.
    pub quantity:   u32,
    /// Available stock captured at the most recent add; quantity ceiling.
    pub stock:      u32,
    /// Product category, when known.
    pub category:   Option<CategoryId>,
}

impl CartItem {
    /// Creates a new line item. The store clamps the quantity on insert.
    #[must_use]
    pub fn new(
        product_id: ProductId, name: impl Into<String>, unit_price: u64, quantity: u32, stock: u32,
    ) -> Self {
        Self {
            product_id,
            name: Cow::Owned(name.into()),
            image_url: None,
            unit_price,
            quantity,
            stock,
            category: None,
        }
    }

    /// Sets the cached image URL.
    #[must_use]
    pub fn with_image(mut self, url: impl Into<String>) -> Self {
        self.image_url = Some(Cow::Owned(url.into()));
        self
    }

    /// Sets the product category.
    #[must_use]
    pub fn with_category(mut self, category: CategoryId) -> Self {
        self.category = Some(category);
        self
    }

    /// Line total in minor currency units.
    #[must_use]
    pub fn line_total(&self) -> u64 {
        self.unit_price.saturating_mul(u64::from(self.quantity))
    }
}
