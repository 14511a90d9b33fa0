//! Checkout flow state machine

use std::sync::Arc;

use tracing::{info, warn};

use crate::errors::{CheckoutError, CheckoutResult};
use crate::implementation::cart_store::CartStore;
use crate::implementation::order_composer::{compose, ShippingDetails};
use crate::implementation::promo_validator::PromoDescriptor;
use crate::implementation::shipping_quoter::ShippingQuote;
use crate::traits::{OrderService, PaymentGateway};
use crate::types::catalog::OrderId;
use crate::types::payment::PaymentMethod;
use crate::types::CheckoutConfig;

use super::gateway::{PaymentGatewayAdapter, PaymentSession, PaymentSessionRequest};
use super::payment_return::{PaymentReturn, PaymentReturnStatus};

/// How a checkout flow ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompletionOutcome {
    /// Order confirmed, payment collected on delivery.
    Confirmed,
    /// Gateway reported the payment captured.
    Paid,
    /// Buyer abandoned the hosted payment page; the order stands unpaid.
    CancelledPendingPayment,
    /// Order created but the gateway session could not be opened; the order
    /// stands unpaid and payment is arranged out of band.
    GatewayUnavailable,
}

/// Checkout flow state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckoutState {
    /// Cart and form are editable; nothing submitted.
    Editing,
    /// Order creation in flight; re-submission is rejected.
    SubmissionInProgress,
    /// Order created, buyer owes a redirect to the hosted payment page.
    AwaitingPaymentRedirect {
        /// Order the session was opened for.
        order_id: OrderId,
        /// Hosted checkout session.
        session:  PaymentSession,
    },
    /// Flow reached a terminal state.
    Completed {
        /// Created order.
        order_id: OrderId,
        /// How the flow ended.
        outcome:  CompletionOutcome,
    },
}

/// Drives a cart through submission, order creation and payment.
///
/// One machine per checkout attempt. `&mut self` on the transitions keeps the
/// flow single-writer; the intermediate states exist so callers that persist
/// the machine between requests reject double submission.
pub struct CheckoutStateMachine<O, G> {
    orders:  Arc<O>,
    gateway: PaymentGatewayAdapter<G>,
    config:  CheckoutConfig,
    state:   CheckoutState,
}

impl<O: OrderService, G: PaymentGateway> CheckoutStateMachine<O, G> {
    /// Creates a machine in the editing state.
    #[must_use]
    pub fn new(orders: Arc<O>, gateway: Arc<G>, config: CheckoutConfig) -> Self {
        Self {
            orders,
            gateway: PaymentGatewayAdapter::new(gateway),
            config,
            state: CheckoutState::Editing,
        }
    }

    /// Current flow state.
    #[must_use]
    pub fn state(&self) -> &CheckoutState {
        &self.state
    }

    /// Submits the checkout: validates, composes the order draft, creates the
    /// order and opens a payment session when the method requires one.
    ///
    /// On order-creation failure the machine returns to editing with the cart
    /// untouched, so the buyer can retry. Once the order exists the flow never
    /// rolls back: a gateway failure completes with
    /// [`CompletionOutcome::GatewayUnavailable`] instead.
    #[tracing::instrument(skip_all, fields(method = ?payment_method))]
    pub async fn submit(
        &mut self, cart: &mut CartStore, shipping: &ShippingDetails,
        payment_method: PaymentMethod, quote: Option<&ShippingQuote>,
        promo: Option<&PromoDescriptor>,
    ) -> CheckoutResult<&CheckoutState> {
        match &self.state {
            CheckoutState::Editing => {},
            CheckoutState::SubmissionInProgress | CheckoutState::AwaitingPaymentRedirect { .. } => {
                return Err(CheckoutError::SubmissionInProgress);
            },
            CheckoutState::Completed { .. } => return Err(CheckoutError::AlreadyCompleted),
        }

        shipping.validate()?;
        if cart.is_empty() {
            return Err(CheckoutError::CartEmpty);
        }

        self.state = CheckoutState::SubmissionInProgress;

        let draft =
            compose(&cart.snapshot(), shipping, payment_method, quote, promo, &self.config);

        let order_id = match self.orders.create_order(&draft).await {
            Ok(order_id) => order_id,
            Err(err) => {
                warn!(%err, "order creation failed");
                self.state = CheckoutState::Editing;
                return Err(CheckoutError::OrderCreationFailed(err.to_string()));
            },
        };
        info!(order = %order_id, total = draft.total, "order created");

        if !payment_method.config().requires_gateway_redirect {
            cart.clear();
            self.state =
                CheckoutState::Completed { order_id, outcome: CompletionOutcome::Confirmed };
            return Ok(&self.state);
        }

        let request = PaymentSessionRequest {
            order_id:       order_id.clone(),
            amount:         draft.total,
            currency:       draft.currency.clone(),
            payment_method,
            success_url:    self.config.payment_success_url.clone(),
            cancel_url:     self.config.payment_cancel_url.clone(),
        };

        self.state = match self.gateway.open_session(&request).await {
            Ok(session) => CheckoutState::AwaitingPaymentRedirect { order_id, session },
            Err(_) => {
                // The order exists; completing unpaid beats losing it.
                cart.clear();
                CheckoutState::Completed {
                    order_id,
                    outcome: CompletionOutcome::GatewayUnavailable,
                }
            },
        };
        Ok(&self.state)
    }

    /// Applies a gateway return redirect.
    ///
    /// Valid only while a payment redirect is awaited, and only for the order
    /// in flight. The gateway always echoes the order id; a return without one
    /// is rejected rather than trusted. Both outcomes are terminal; a
    /// cancelled payment leaves the order standing unpaid on the backend.
    pub fn handle_payment_return(
        &mut self, cart: &mut CartStore, payment_return: &PaymentReturn,
    ) -> CheckoutResult<&CheckoutState> {
        let CheckoutState::AwaitingPaymentRedirect { order_id, .. } = &self.state else {
            return Err(CheckoutError::UnexpectedPaymentReturn);
        };

        let Some(returned) = &payment_return.order_id else {
            return Err(CheckoutError::UnexpectedPaymentReturn);
        };
        if returned != order_id {
            return Err(CheckoutError::PaymentReturnOrderMismatch(returned.to_string()));
        }

        let order_id = order_id.clone();
        let outcome = match payment_return.status {
            PaymentReturnStatus::Success => CompletionOutcome::Paid,
            PaymentReturnStatus::Cancelled => CompletionOutcome::CancelledPendingPayment,
        };
        info!(order = %order_id, ?outcome, "payment return applied");

        cart.clear();
        self.state = CheckoutState::Completed { order_id, outcome };
        Ok(&self.state)
    }

    /// Returns a completed machine to the editing state for a new checkout.
    pub fn reset(&mut self) -> CheckoutResult<()> {
        match self.state {
            CheckoutState::Editing | CheckoutState::Completed { .. } => {
                self.state = CheckoutState::Editing;
                Ok(())
            },
            CheckoutState::SubmissionInProgress | CheckoutState::AwaitingPaymentRedirect { .. } => {
                Err(CheckoutError::SubmissionInProgress)
            },
        }
    }
}
