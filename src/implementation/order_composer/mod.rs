//! # Order Composer
//!
//! The only place the final order total is computed. Pure and side-effect
//! free: composing the same inputs twice yields an identical draft, and no
//! input is ever mutated.

use serde::{Deserialize, Serialize};

use crate::errors::{CheckoutError, CheckoutResult};
use crate::implementation::cart_store::{CartItem, CartSnapshot};
use crate::implementation::promo_validator::PromoDescriptor;
use crate::implementation::shipping_quoter::{DeliveryAddress, ShippingQuote};
use crate::types::catalog::Currency;
use crate::types::payment::PaymentMethod;
use crate::types::CheckoutConfig;

/// Shipping and contact fields captured on the checkout form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShippingDetails {
    /// Recipient full name.
    pub full_name:    String,
    /// Contact phone number.
    pub phone:        String,
    /// Street address.
    pub address:      String,
    /// City.
    pub city:         String,
    /// Region.
    pub region:       String,
    /// Neighborhood.
    pub neighborhood: String,
    /// Delivery notes.
    pub notes:        String,
}

impl ShippingDetails {
    /// Checks the mandatory fields (full name, phone, address, city).
    pub fn validate(&self) -> CheckoutResult<()> {
        for (field, value) in [
            ("full_name", &self.full_name),
            ("phone", &self.phone),
            ("address", &self.address),
            ("city", &self.city),
        ] {
            if value.trim().is_empty() {
                return Err(CheckoutError::MissingShippingField(field));
            }
        }
        Ok(())
    }

    /// The address fields the shipping quoter rates against.
    #[must_use]
    pub fn delivery_address(&self) -> DeliveryAddress {
        DeliveryAddress {
            address: self.address.clone(),
            city:    self.city.clone(),
            region:  self.region.clone(),
        }
    }
}

/// Priced order draft, the order-creation payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderDraft {
    /// Cart items at submission time.
    pub items:          Vec<CartItem>,
    /// Shipping and contact fields.
    pub shipping:       ShippingDetails,
    /// Selected payment method.
    pub payment_method: PaymentMethod,
    /// Applied promo code, if any.
    pub promo_code:     Option<String>,
    /// Subtotal in minor currency units.
    pub subtotal:       u64,
    /// Discount in minor currency units, never more than the subtotal.
    pub discount:       u64,
    /// Shipping cost in minor currency units.
    pub shipping_cost:  u64,
    /// Grand total: `subtotal - discount + shipping_cost`, floored at zero.
    pub total:          u64,
    /// Currency of all amounts.
    pub currency:       Currency,
}

/// Composes a priced order draft from the current cart, shipping quote and
/// promo descriptor.
///
/// Rules, in fixed order: subtotal from the snapshot; discount clamped to the
/// subtotal; shipping zero under a free-shipping promo, otherwise the quote
/// cost, otherwise the configured fallback zone cost; total floored at zero.
#[must_use]
pub fn compose(
    cart: &CartSnapshot, shipping: &ShippingDetails, payment_method: PaymentMethod,
    quote: Option<&ShippingQuote>, promo: Option<&PromoDescriptor>, config: &CheckoutConfig,
) -> OrderDraft {
    let subtotal = cart.subtotal;

    let discount = promo.map_or(0, |p| p.discount_amount.min(subtotal));

    let shipping_cost = if promo.is_some_and(PromoDescriptor::is_free_shipping) {
        0
    } else {
        quote.map_or(config.fallback_zone_cost, |q| q.cost)
    };

    let total = subtotal.saturating_sub(discount).saturating_add(shipping_cost);

    OrderDraft {
        items: cart.items.clone(),
        shipping: shipping.clone(),
        payment_method,
        promo_code: promo.map(|p| p.code.clone()),
        subtotal,
        discount,
        shipping_cost,
        total,
        currency: config.currency.clone(),
    }
}
