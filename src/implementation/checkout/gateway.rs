//! Payment gateway adapter

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::errors::{CheckoutError, CheckoutResult};
use crate::traits::PaymentGateway;
use crate::types::catalog::{Currency, OrderId};
use crate::types::payment::PaymentMethod;

/// Hosted-checkout session request, built for an order that already exists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentSessionRequest {
    /// Order to collect payment for.
    pub order_id:       OrderId,
    /// Amount due, in minor currency units.
    pub amount:         u64,
    /// Currency of the amount.
    pub currency:       Currency,
    /// Payment method the session is opened for.
    pub payment_method: PaymentMethod,
    /// URL the gateway redirects to on success.
    pub success_url:    String,
    /// URL the gateway redirects to on cancellation.
    pub cancel_url:     String,
}

/// Hosted-checkout session returned by the gateway.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentSession {
    /// Gateway session identifier.
    pub session_id:   String,
    /// URL the buyer is redirected to.
    pub redirect_url: String,
}

/// Thin adapter over the gateway seam, translating transport failures into
/// checkout errors.
pub struct PaymentGatewayAdapter<G> {
    gateway: Arc<G>,
}

impl<G: PaymentGateway> PaymentGatewayAdapter<G> {
    /// Creates an adapter over a gateway.
    #[must_use]
    pub fn new(gateway: Arc<G>) -> Self {
        Self { gateway }
    }

    /// Opens a hosted checkout session.
    ///
    /// The order already exists at this point; a failure here means the order
    /// stands unpaid and the flow must degrade rather than retry blindly.
    pub async fn open_session(
        &self, request: &PaymentSessionRequest,
    ) -> CheckoutResult<PaymentSession> {
        match self.gateway.create_session(request).await {
            Ok(session) => {
                info!(
                    order = %request.order_id,
                    session = %session.session_id,
                    amount = request.amount,
                    "payment session created"
                );
                Ok(session)
            },
            Err(err) => {
                warn!(order = %request.order_id, %err, "payment session creation failed");
                Err(CheckoutError::GatewaySessionFailed(err.to_string()))
            },
        }
    }
}
