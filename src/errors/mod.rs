//! Error types for the checkout engine

use thiserror::Error;

/// Checkout flow errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CheckoutError {
    /// Required shipping field is empty.
    #[error("Missing shipping field: {0}")]
    MissingShippingField(&'static str),
    /// Cart is empty.
    #[error("Cart is empty")]
    CartEmpty,
    /// A submission is already in flight.
    #[error("Submission already in progress")]
    SubmissionInProgress,
    /// Checkout flow already reached a terminal state.
    #[error("Checkout already completed")]
    AlreadyCompleted,
    /// Order creation failed; no order exists and submission may be retried.
    #[error("Order creation failed: {0}")]
    OrderCreationFailed(String),
    /// Payment session could not be created after the order already exists.
    #[error("Payment session unavailable: {0}")]
    GatewaySessionFailed(String),
    /// Gateway return received while no payment is awaiting redirect.
    #[error("Unexpected payment return")]
    UnexpectedPaymentReturn,
    /// Gateway return carries a different order id than the one in flight.
    #[error("Payment return for unknown order: {0}")]
    PaymentReturnOrderMismatch(String),
}

/// Promo code rejection reasons.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PromoRejection {
    /// Code not found.
    #[error("Promo code not found")]
    NotFound,
    /// Code exists but is disabled.
    #[error("Promo code is not active")]
    Inactive,
    /// Current time is outside the code's validity window.
    #[error("Promo code is outside its validity window")]
    OutsideValidityWindow,
    /// Global or per-user usage limit exhausted.
    #[error("Promo code usage limit reached")]
    UsageLimitReached,
    /// Cart subtotal below the code's minimum purchase.
    #[error("Minimum purchase of {required} not met (cart subtotal is {subtotal})")]
    BelowMinPurchase {
        /// Required minimum subtotal.
        required: u64,
        /// Subtotal the code was checked against.
        subtotal: u64,
    },
    /// Cart contains no item from the required category.
    #[error("No eligible item in cart for category: {0}")]
    CategoryNotInCart(String),
    /// Promo service could not be reached.
    #[error("Promo service unavailable: {0}")]
    ServiceUnavailable(String),
}

/// Transport-level failure reported by an external service.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Service unavailable: {0}")]
pub struct ServiceUnavailable(pub String);

impl ServiceUnavailable {
    /// Creates a new transport failure.
    #[must_use]
    pub fn new(reason: impl Into<String>) -> Self {
        Self(reason.into())
    }
}

/// Result type for checkout operations.
pub type CheckoutResult<T> = Result<T, CheckoutError>;

/// Result type for promo validation.
pub type PromoResult<T> = Result<T, PromoRejection>;
