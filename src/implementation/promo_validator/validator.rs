//! Promo code validation

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::errors::{PromoRejection, PromoResult};
use crate::implementation::cart_store::CartSnapshot;
use crate::traits::PromoService;
use crate::types::catalog::CategoryId;

use super::rules::{PromoKind, PromoRule};

/// Validated, cart-bound result of applying a promo code.
///
/// A descriptor is tied to the snapshot it was validated against. When the
/// cart changes afterwards the descriptor goes stale for display purposes;
/// the authoritative re-check happens server-side at order creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PromoDescriptor {
    /// Normalized code.
    pub code:               String,
    /// Discount kind.
    pub kind:               PromoKind,
    /// Raw rule value (percentage or amount).
    pub value:              u64,
    /// Discount resolved against the validated subtotal, in minor units.
    pub discount_amount:    u64,
    /// Category restriction, if any.
    pub category:           Option<CategoryId>,
    /// Minimum purchase constraint, if any.
    pub min_purchase:       Option<u64>,
    /// Discount cap, if any.
    pub max_discount:       Option<u64>,
    /// Message shown when the code applies.
    pub message:            Option<String>,
    /// Subtotal the descriptor was validated against.
    pub validated_subtotal: u64,
}

impl PromoDescriptor {
    /// Whether this descriptor forces the shipping cost to zero.
    #[must_use]
    pub fn is_free_shipping(&self) -> bool {
        self.kind == PromoKind::FreeShipping
    }

    /// Whether the cart changed since validation. A stale descriptor must not
    /// be treated as authoritative for display; re-validation is an explicit
    /// user action.
    #[must_use]
    pub fn is_stale(&self, cart: &CartSnapshot) -> bool {
        self.validated_subtotal != cart.subtotal
    }
}

/// Validates promo codes against cart contents and eligibility constraints.
///
/// Purely advisory: never touches the cart, and only runs on explicit user
/// action (the apply button), so no stale-response ordering guard is needed.
pub struct PromoValidator<P> {
    promos: Arc<P>,
}

impl<P: PromoService> PromoValidator<P> {
    /// Creates a validator over a promo service.
    #[must_use]
    pub fn new(promos: Arc<P>) -> Self {
        Self { promos }
    }

    /// Validates a code against the current cart snapshot.
    pub async fn validate(&self, code: &str, cart: &CartSnapshot) -> PromoResult<PromoDescriptor> {
        self.validate_at(code, cart, unix_now()).await
    }

    /// Validates a code at an explicit point in time.
    #[tracing::instrument(skip(self, cart), fields(subtotal = cart.subtotal))]
    pub async fn validate_at(
        &self, code: &str, cart: &CartSnapshot, now: u64,
    ) -> PromoResult<PromoDescriptor> {
        let normalized = code.trim().to_uppercase();

        let rule = self
            .promos
            .lookup(&normalized)
            .await
            .map_err(|err| PromoRejection::ServiceUnavailable(err.to_string()))?
            .ok_or(PromoRejection::NotFound)?;

        check_eligibility(&rule, cart, now)?;
        let discount_amount = resolve_discount(&rule, cart.subtotal);

        info!(code = %normalized, discount_amount, "promo code accepted");

        Ok(PromoDescriptor {
            code:               normalized,
            kind:               rule.kind,
            value:              rule.value,
            discount_amount,
            category:           rule.category,
            min_purchase:       rule.min_purchase,
            max_discount:       rule.max_discount,
            message:            rule.message,
            validated_subtotal: cart.subtotal,
        })
    }
}

fn check_eligibility(rule: &PromoRule, cart: &CartSnapshot, now: u64) -> PromoResult<()> {
    if !rule.active {
        return Err(PromoRejection::Inactive);
    }

    if rule.starts_at.is_some_and(|start| now < start) || rule.ends_at.is_some_and(|end| now > end)
    {
        return Err(PromoRejection::OutsideValidityWindow);
    }

    if rule.usage_limit.is_some_and(|limit| rule.usage_count >= limit)
        || rule.per_user_limit.is_some_and(|limit| rule.user_usage_count >= limit)
    {
        return Err(PromoRejection::UsageLimitReached);
    }

    if let Some(required) = rule.min_purchase {
        if cart.subtotal < required {
            return Err(PromoRejection::BelowMinPurchase { required, subtotal: cart.subtotal });
        }
    }

    if let Some(category) = &rule.category {
        let in_cart = cart.items.iter().any(|item| item.category.as_ref() == Some(category));
        if !in_cart {
            return Err(PromoRejection::CategoryNotInCart(category.to_string()));
        }
    }

    Ok(())
}

/// Resolves the discount amount for a rule against a subtotal.
fn resolve_discount(rule: &PromoRule, subtotal: u64) -> u64 {
    match rule.kind {
        PromoKind::Percent => {
            let discount = subtotal.saturating_mul(rule.value) / 100;
            match rule.max_discount {
                Some(cap) => discount.min(cap),
                None => discount,
            }
        },
        PromoKind::Fixed => rule.value.min(subtotal),
        PromoKind::FreeShipping => 0,
    }
}

fn unix_now() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}
