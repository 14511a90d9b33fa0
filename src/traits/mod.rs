//! External collaborator interfaces
//!
//! The order, promo, shipping-rate and payment services live in the REST
//! backend; the engine depends only on these seams. Each trait carries a
//! generated mock for tests.

use async_trait::async_trait;
use mockall::automock;

use crate::errors::ServiceUnavailable;
use crate::implementation::checkout::{PaymentSession, PaymentSessionRequest};
use crate::implementation::order_composer::OrderDraft;
use crate::implementation::promo_validator::PromoRule;
use crate::implementation::shipping_quoter::{DeliveryAddress, ShippingQuote};
use crate::types::catalog::OrderId;

/// Order creation service.
///
/// Accepts the composed draft and persists it; the backend re-validates the
/// promo code and totals before accepting.
#[automock]
#[async_trait]
pub trait OrderService: Send + Sync {
    /// Creates an order from a priced draft and returns its identifier.
    async fn create_order(&self, draft: &OrderDraft) -> Result<OrderId, ServiceUnavailable>;
}

/// Promo code catalog service.
#[automock]
#[async_trait]
pub trait PromoService: Send + Sync {
    /// Looks up a promo rule by normalized code. `None` when no such code.
    async fn lookup(&self, code: &str) -> Result<Option<PromoRule>, ServiceUnavailable>;
}

/// Shipping rating service.
#[automock]
#[async_trait]
pub trait ShippingRateService: Send + Sync {
    /// Resolves a shipping quote for a free-form address.
    async fn rate(&self, address: &DeliveryAddress) -> Result<ShippingQuote, ServiceUnavailable>;
}

/// Off-site payment gateway.
#[automock]
#[async_trait]
pub trait PaymentGateway: Send + Sync {
    /// Requests a hosted checkout session for an existing order.
    async fn create_session(
        &self,
        request: &PaymentSessionRequest,
    ) -> Result<PaymentSession, ServiceUnavailable>;
}
