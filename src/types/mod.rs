//! Type definitions for the checkout engine

use crate::types::catalog::Currency;

pub mod catalog;
pub mod payment;

/// Checkout engine configuration.
#[derive(Debug, Clone)]
pub struct CheckoutConfig {
    /// Currency for all amounts.
    pub currency:            Currency,
    /// Debounce window for shipping quote resolution, in milliseconds.
    pub quote_debounce_ms:   u64,
    /// Shipping cost applied when no quote could be resolved.
    pub fallback_zone_cost:  u64,
    /// URL the gateway redirects to after a successful payment.
    pub payment_success_url: String,
    /// URL the gateway redirects to after a cancelled payment.
    pub payment_cancel_url:  String,
}

impl Default for CheckoutConfig {
    fn default() -> Self {
        Self {
            currency:            Currency::xaf(),
            quote_debounce_ms:   500,
            fallback_zone_cost:  2_000,
            payment_success_url: "/checkout?payment=success".to_string(),
            payment_cancel_url:  "/checkout?payment=cancel".to_string(),
        }
    }
}
