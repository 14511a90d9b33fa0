//! Payment method configuration
//!
//! The state machine branches on `requires_gateway_redirect`, never on
//! display metadata.

use serde::{Deserialize, Serialize};

/// Payment method selected at checkout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    /// Pay the courier in cash on delivery.
    CashOnDelivery,
    /// MTN Mobile Money via the payment gateway.
    MtnMobileMoney,
    /// Orange Money via the payment gateway.
    OrangeMoney,
    /// Bank card via the payment gateway.
    Card,
}

/// Behavior and display descriptor for a payment method.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaymentMethodConfig {
    /// Whether completing payment requires an off-site gateway redirect.
    pub requires_gateway_redirect: bool,
    /// Display label.
    pub display_label:             &'static str,
    /// Short informational text shown under the method.
    pub info_text:                 &'static str,
}

impl PaymentMethod {
    /// All selectable methods, in display order.
    #[must_use]
    pub fn all() -> &'static [PaymentMethod] {
        &[
            Self::CashOnDelivery,
            Self::MtnMobileMoney,
            Self::OrangeMoney,
            Self::Card,
        ]
    }

    /// Stable identifier used on the wire.
    #[must_use]
    pub fn id(self) -> &'static str {
        match self {
            Self::CashOnDelivery => "cash_on_delivery",
            Self::MtnMobileMoney => "mtn_mobile_money",
            Self::OrangeMoney => "orange_money",
            Self::Card => "card",
        }
    }

    /// Behavior descriptor for this method.
    #[must_use]
    pub fn config(self) -> PaymentMethodConfig {
        match self {
            Self::CashOnDelivery => PaymentMethodConfig {
                requires_gateway_redirect: false,
                display_label:             "Cash on delivery",
                info_text:                 "Pay the courier in cash when your order arrives",
            },
            Self::MtnMobileMoney => PaymentMethodConfig {
                requires_gateway_redirect: true,
                display_label:             "MTN Mobile Money",
                info_text:                 "You will be redirected to confirm the payment",
            },
            Self::OrangeMoney => PaymentMethodConfig {
                requires_gateway_redirect: true,
                display_label:             "Orange Money",
                info_text:                 "You will be redirected to confirm the payment",
            },
            Self::Card => PaymentMethodConfig {
                requires_gateway_redirect: true,
                display_label:             "Bank card",
                info_text:                 "Secure payment through our payment provider",
            },
        }
    }
}
