//! # Checkout
//!
//! The submission flow: state machine, gateway adapter and return-redirect
//! parsing. Everything price-related is delegated to the order composer;
//! this module only sequences the side effects.

mod gateway;
mod payment_return;
mod state;

pub use gateway::{PaymentGatewayAdapter, PaymentSession, PaymentSessionRequest};
pub use payment_return::{PaymentReturn, PaymentReturnStatus};
pub use state::{CheckoutState, CheckoutStateMachine, CompletionOutcome};

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use crate::errors::{CheckoutError, ServiceUnavailable};
    use crate::implementation::cart_store::{CartItem, CartStore};
    use crate::implementation::order_composer::ShippingDetails;
    use crate::implementation::shipping_quoter::ShippingQuote;
    use crate::traits::{MockOrderService, MockPaymentGateway};
    use crate::types::catalog::{OrderId, ProductId};
    use crate::types::payment::PaymentMethod;
    use crate::types::CheckoutConfig;

    use super::*;

    fn cart() -> CartStore {
        let mut cart = CartStore::new();
        cart.add_item(CartItem::new(ProductId::new("001"), "Gift box", 20_000, 2, 10));
        cart
    }

    fn shipping() -> ShippingDetails {
        ShippingDetails {
            full_name: "Awa Ndongo".to_string(),
            phone: "+237 6 77 00 00 00".to_string(),
            address: "Rue 1.234".to_string(),
            city: "Yaounde".to_string(),
            region: "Centre".to_string(),
            neighborhood: "Bastos".to_string(),
            notes: String::new(),
        }
    }

    fn quote() -> ShippingQuote {
        ShippingQuote {
            cost:       2_500,
            zone_id:    "yaounde".to_string(),
            zone_label: "Yaounde".to_string(),
            message:    String::new(),
            is_range:   false,
        }
    }

    fn orders_creating(id: &str, times: usize) -> MockOrderService {
        let id = id.to_string();
        let mut orders = MockOrderService::new();
        orders.expect_create_order().times(times).returning(move |_| Ok(OrderId::new(id.clone())));
        orders
    }

    fn gateway_opening() -> MockPaymentGateway {
        let mut gateway = MockPaymentGateway::new();
        gateway.expect_create_session().returning(|_| {
            Ok(PaymentSession {
                session_id:   "sess_1".to_string(),
                redirect_url: "https://pay.example/sess_1".to_string(),
            })
        });
        gateway
    }

    fn machine(
        orders: MockOrderService, gateway: MockPaymentGateway,
    ) -> CheckoutStateMachine<MockOrderService, MockPaymentGateway> {
        CheckoutStateMachine::new(Arc::new(orders), Arc::new(gateway), CheckoutConfig::default())
    }

    #[tokio::test]
    async fn test_cash_submission_completes_and_clears_cart() {
        let mut orders = MockOrderService::new();
        orders
            .expect_create_order()
            .times(1)
            .withf(|draft| draft.total == 42_500 && draft.subtotal == 40_000)
            .returning(|_| Ok(OrderId::new("ORD-1")));
        let mut machine = machine(orders, MockPaymentGateway::new());
        let mut cart = cart();

        let state = machine
            .submit(&mut cart, &shipping(), PaymentMethod::CashOnDelivery, Some(&quote()), None)
            .await
            .expect("submit");

        assert_eq!(
            state,
            &CheckoutState::Completed {
                order_id: OrderId::new("ORD-1"),
                outcome:  CompletionOutcome::Confirmed,
            }
        );
        assert!(cart.is_empty());
    }

    #[tokio::test]
    async fn test_invalid_shipping_rejected_before_any_side_effect() {
        let mut machine = machine(MockOrderService::new(), MockPaymentGateway::new());
        let mut cart = cart();
        let mut details = shipping();
        details.city = String::new();

        let result = machine
            .submit(&mut cart, &details, PaymentMethod::CashOnDelivery, None, None)
            .await;

        assert_eq!(result, Err(CheckoutError::MissingShippingField("city")));
        assert_eq!(machine.state(), &CheckoutState::Editing);
        assert!(!cart.is_empty());
    }

    #[tokio::test]
    async fn test_empty_cart_rejected() {
        let mut machine = machine(MockOrderService::new(), MockPaymentGateway::new());
        let mut cart = CartStore::new();

        let result = machine
            .submit(&mut cart, &shipping(), PaymentMethod::CashOnDelivery, None, None)
            .await;

        assert_eq!(result, Err(CheckoutError::CartEmpty));
    }

    #[tokio::test]
    async fn test_order_creation_failure_returns_to_editing_with_cart_intact() {
        let mut orders = MockOrderService::new();
        orders
            .expect_create_order()
            .returning(|_| Err(ServiceUnavailable::new("backend down")));
        let mut machine = machine(orders, MockPaymentGateway::new());
        let mut cart = cart();

        let result = machine
            .submit(&mut cart, &shipping(), PaymentMethod::CashOnDelivery, None, None)
            .await;

        assert!(matches!(result, Err(CheckoutError::OrderCreationFailed(_))));
        assert_eq!(machine.state(), &CheckoutState::Editing);
        assert_eq!(cart.total_quantity(), 2);
    }

    #[tokio::test]
    async fn test_gateway_failure_completes_unpaid_and_clears_cart() {
        let mut gateway = MockPaymentGateway::new();
        gateway
            .expect_create_session()
            .returning(|_| Err(ServiceUnavailable::new("gateway down")));
        let mut machine = machine(orders_creating("ORD-2", 1), gateway);
        let mut cart = cart();

        let state = machine
            .submit(&mut cart, &shipping(), PaymentMethod::MtnMobileMoney, Some(&quote()), None)
            .await
            .expect("submit");

        assert_eq!(
            state,
            &CheckoutState::Completed {
                order_id: OrderId::new("ORD-2"),
                outcome:  CompletionOutcome::GatewayUnavailable,
            }
        );
        assert!(cart.is_empty());
    }

    #[tokio::test]
    async fn test_gateway_method_awaits_redirect_and_blocks_resubmission() {
        let mut gateway = MockPaymentGateway::new();
        gateway
            .expect_create_session()
            .withf(|request| request.amount == 42_500 && request.order_id == OrderId::new("ORD-3"))
            .returning(|_| {
                Ok(PaymentSession {
                    session_id:   "sess_1".to_string(),
                    redirect_url: "https://pay.example/sess_1".to_string(),
                })
            });
        let mut machine = machine(orders_creating("ORD-3", 1), gateway);
        let mut cart = cart();

        machine
            .submit(&mut cart, &shipping(), PaymentMethod::Card, Some(&quote()), None)
            .await
            .expect("submit");

        assert!(matches!(machine.state(), CheckoutState::AwaitingPaymentRedirect { .. }));
        // The cart survives until the gateway reports an outcome.
        assert!(!cart.is_empty());

        let again = machine
            .submit(&mut cart, &shipping(), PaymentMethod::Card, Some(&quote()), None)
            .await;
        assert_eq!(again, Err(CheckoutError::SubmissionInProgress));
    }

    #[tokio::test]
    async fn test_successful_return_completes_as_paid() {
        let mut machine = machine(orders_creating("ORD-4", 1), gateway_opening());
        let mut cart = cart();
        machine
            .submit(&mut cart, &shipping(), PaymentMethod::OrangeMoney, Some(&quote()), None)
            .await
            .expect("submit");

        let parsed = PaymentReturn::from_query("payment=success&order=ORD-4").expect("parsed");
        let state = machine.handle_payment_return(&mut cart, &parsed).expect("return");

        assert_eq!(
            state,
            &CheckoutState::Completed {
                order_id: OrderId::new("ORD-4"),
                outcome:  CompletionOutcome::Paid,
            }
        );
        assert!(cart.is_empty());
    }

    #[tokio::test]
    async fn test_cancelled_return_terminal_without_second_order() {
        // times(1) on the order service: a cancel must not re-create the order.
        let mut machine = machine(orders_creating("ORD-5", 1), gateway_opening());
        let mut cart = cart();
        machine
            .submit(&mut cart, &shipping(), PaymentMethod::MtnMobileMoney, Some(&quote()), None)
            .await
            .expect("submit");

        let parsed = PaymentReturn::from_query("payment=cancel&order=ORD-5").expect("parsed");
        let state = machine.handle_payment_return(&mut cart, &parsed).expect("return");

        assert_eq!(
            state,
            &CheckoutState::Completed {
                order_id: OrderId::new("ORD-5"),
                outcome:  CompletionOutcome::CancelledPendingPayment,
            }
        );
        assert!(cart.is_empty());

        let resubmit = machine
            .submit(&mut cart, &shipping(), PaymentMethod::MtnMobileMoney, None, None)
            .await;
        assert_eq!(resubmit, Err(CheckoutError::AlreadyCompleted));
    }

    #[tokio::test]
    async fn test_return_for_wrong_order_rejected() {
        let mut machine = machine(orders_creating("ORD-6", 1), gateway_opening());
        let mut cart = cart();
        machine
            .submit(&mut cart, &shipping(), PaymentMethod::Card, Some(&quote()), None)
            .await
            .expect("submit");

        let parsed = PaymentReturn::from_query("payment=success&order=ORD-999").expect("parsed");
        let result = machine.handle_payment_return(&mut cart, &parsed);

        assert_eq!(
            result,
            Err(CheckoutError::PaymentReturnOrderMismatch("ORD-999".to_string()))
        );
        assert!(matches!(machine.state(), CheckoutState::AwaitingPaymentRedirect { .. }));
        assert!(!cart.is_empty());
    }

    #[tokio::test]
    async fn test_return_without_order_id_rejected() {
        let mut machine = machine(orders_creating("ORD-8", 1), gateway_opening());
        let mut cart = cart();
        machine
            .submit(&mut cart, &shipping(), PaymentMethod::Card, Some(&quote()), None)
            .await
            .expect("submit");

        let parsed = PaymentReturn::from_query("payment=success").expect("parsed");
        let result = machine.handle_payment_return(&mut cart, &parsed);

        assert_eq!(result, Err(CheckoutError::UnexpectedPaymentReturn));
        assert!(matches!(machine.state(), CheckoutState::AwaitingPaymentRedirect { .. }));
        assert!(!cart.is_empty());
    }

    #[tokio::test]
    async fn test_return_while_editing_rejected() {
        let mut machine = machine(MockOrderService::new(), MockPaymentGateway::new());
        let mut cart = cart();

        let parsed = PaymentReturn::from_query("payment=success&order=ORD-1").expect("parsed");
        let result = machine.handle_payment_return(&mut cart, &parsed);

        assert_eq!(result, Err(CheckoutError::UnexpectedPaymentReturn));
    }

    #[tokio::test]
    async fn test_reset_starts_a_new_flow_only_from_terminal_state() {
        let mut machine = machine(orders_creating("ORD-7", 2), gateway_opening());
        let mut cart = cart();
        machine
            .submit(&mut cart, &shipping(), PaymentMethod::Card, Some(&quote()), None)
            .await
            .expect("submit");

        // Awaiting a redirect: reset refused.
        assert_eq!(machine.reset(), Err(CheckoutError::SubmissionInProgress));

        let parsed = PaymentReturn::from_query("payment=success&order=ORD-7").expect("parsed");
        machine.handle_payment_return(&mut cart, &parsed).expect("return");

        machine.reset().expect("reset");
        assert_eq!(machine.state(), &CheckoutState::Editing);

        // The machine accepts a fresh submission after the reset.
        let mut cart = self::cart();
        machine
            .submit(&mut cart, &shipping(), PaymentMethod::CashOnDelivery, Some(&quote()), None)
            .await
            .expect("second submit");
    }
}
