//! # Storefront Checkout
//!
//! Cart-to-order pricing and checkout composition engine: aggregates a mutable
//! cart, a conditionally-applicable promo code, a dynamically-quoted shipping
//! cost and a payment-method selection into a single priced order, then drives
//! that order through an external payment gateway redirect/callback cycle.

#![allow(clippy::uninlined_format_args)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::doc_markdown)]

pub mod errors;
pub mod implementation;
pub mod traits;
pub mod types;

// Re-exports for public API
pub use implementation::cart_store::{CartItem, CartSnapshot, CartStore};
pub use implementation::checkout::{
    CheckoutState, CheckoutStateMachine, CompletionOutcome, PaymentGatewayAdapter, PaymentReturn,
    PaymentReturnStatus, PaymentSession, PaymentSessionRequest,
};
pub use implementation::order_composer::{compose, OrderDraft, ShippingDetails};
pub use implementation::promo_validator::{PromoDescriptor, PromoKind, PromoRule, PromoValidator};
pub use implementation::shipping_quoter::{DeliveryAddress, ShippingQuote, ShippingQuoter};
pub use types::CheckoutConfig;
