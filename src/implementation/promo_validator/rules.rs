//! Promo rule definitions

use serde::{Deserialize, Serialize};

use crate::types::catalog::CategoryId;

/// Discount kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PromoKind {
    /// Percentage off the subtotal.
    Percent,
    /// Fixed amount off the subtotal.
    Fixed,
    /// Shipping cost forced to zero.
    FreeShipping,
}

/// Promo code definition as returned by the promo service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PromoRule {
    /// Normalized (uppercase) code.
    pub code:             String,
    /// Discount kind.
    pub kind:             PromoKind,
    /// Percentage for [`PromoKind::Percent`], amount in minor units for
    /// [`PromoKind::Fixed`], unused for free shipping.
    pub value:            u64,
    /// Whether the code is enabled.
    pub active:           bool,
    /// Validity window start (unix seconds).
    pub starts_at:        Option<u64>,
    /// Validity window end (unix seconds).
    pub ends_at:          Option<u64>,
    /// Times the code has been redeemed, globally.
    pub usage_count:      u64,
    /// Global redemption limit.
    pub usage_limit:      Option<u64>,
    /// Times the requesting user has redeemed the code.
    pub user_usage_count: u64,
    /// Per-user redemption limit.
    pub per_user_limit:   Option<u64>,
    /// Minimum subtotal required to apply the code.
    pub min_purchase:     Option<u64>,
    /// Cap on the resolved discount amount.
    pub max_discount:     Option<u64>,
    /// Category the cart must contain an item from.
    pub category:         Option<CategoryId>,
    /// Message shown when the code applies.
    pub message:          Option<String>,
}

impl PromoRule {
    fn base(code: impl Into<String>, kind: PromoKind, value: u64) -> Self {
        Self {
            code: code.into().to_uppercase(),
            kind,
            value,
            active: true,
            starts_at: None,
            ends_at: None,
            usage_count: 0,
            usage_limit: None,
            user_usage_count: 0,
            per_user_limit: None,
            min_purchase: None,
            max_discount: None,
            category: None,
            message: None,
        }
    }

    /// Creates a percentage-off rule.
    #[must_use]
    pub fn percent(code: impl Into<String>, percent: u64) -> Self {
        Self::base(code, PromoKind::Percent, percent)
    }

    /// Creates a fixed-amount rule.
    #[must_use]
    pub fn fixed(code: impl Into<String>, amount: u64) -> Self {
        Self::base(code, PromoKind::Fixed, amount)
    }

    /// Creates a free-shipping rule.
    #[must_use]
    pub fn free_shipping(code: impl Into<String>) -> Self {
        Self::base(code, PromoKind::FreeShipping, 0)
    }
}
