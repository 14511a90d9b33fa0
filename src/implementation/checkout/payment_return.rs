//! Gateway return-redirect parsing
//!
//! After the hosted payment page, the gateway redirects back with the outcome
//! encoded in the query string (`payment=success` or `payment=cancel`, plus
//! the order id). Parsing is lenient: unrelated parameters are ignored.

use crate::types::catalog::OrderId;

/// Outcome reported by the gateway redirect.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaymentReturnStatus {
    /// Payment captured.
    Success,
    /// Buyer abandoned the hosted payment page.
    Cancelled,
}

/// Parsed gateway return redirect.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentReturn {
    /// Reported outcome.
    pub status:   PaymentReturnStatus,
    /// Order id echoed by the gateway, when present.
    pub order_id: Option<OrderId>,
}

impl PaymentReturn {
    /// Parses a query string. Returns `None` when it carries no recognizable
    /// payment outcome.
    #[must_use]
    pub fn from_query(query: &str) -> Option<Self> {
        let mut status = None;
        let mut order_id = None;

        for pair in query.trim_start_matches('?').split('&') {
            let Some((key, value)) = pair.split_once('=') else {
                continue;
            };
            match key {
                "payment" => {
                    status = match value {
                        "success" => Some(PaymentReturnStatus::Success),
                        "cancel" | "cancelled" => Some(PaymentReturnStatus::Cancelled),
                        _ => status,
                    };
                },
                "order" if !value.is_empty() => {
                    order_id = Some(OrderId::new(value));
                },
                _ => {},
            }
        }

        status.map(|status| Self { status, order_id })
    }

    /// Removes the payment outcome parameters from a URL so a reload does not
    /// replay the return.
    #[must_use]
    pub fn strip_from_url(url: &str) -> String {
        let Some((base, query)) = url.split_once('?') else {
            return url.to_string();
        };

        let kept: Vec<&str> = query
            .split('&')
            .filter(|pair| {
                let key = pair.split_once('=').map_or(*pair, |(key, _)| key);
                key != "payment" && key != "order"
            })
            .collect();

        if kept.is_empty() {
            base.to_string()
        } else {
            format!("{}?{}", base, kept.join("&"))
        }
    }
}
