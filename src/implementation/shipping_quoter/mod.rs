//! # Shipping Quoter
//!
//! Resolves a delivery cost for a free-form address without blocking cart
//! editing. Address changes are debounced, and every in-flight resolution
//! carries the token it was issued with: a response is applied only while its
//! token is still the latest one (last-address-wins). A superseded response is
//! discarded cooperatively, never aborted at the transport level.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tokio::time::sleep;
use tracing::{debug, warn};

use crate::traits::ShippingRateService;
use crate::types::CheckoutConfig;

/// Free-form delivery address fields the rating service accepts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeliveryAddress {
    /// Street address.
    pub address: String,
    /// City.
    pub city:    String,
    /// Region.
    pub region:  String,
}

/// Resolved shipping quote.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShippingQuote {
    /// Shipping cost in minor currency units.
    pub cost:       u64,
    /// Zone identifier.
    pub zone_id:    String,
    /// Human-readable zone label.
    pub zone_label: String,
    /// Message shown next to the cost.
    pub message:    String,
    /// Whether the cost is an upper estimate pending manual confirmation.
    pub is_range:   bool,
}

#[derive(Debug, Default)]
struct QuoterState {
    quote:     Option<ShippingQuote>,
    resolving: bool,
}

/// Debounced, last-address-wins shipping quote resolver.
pub struct ShippingQuoter<S> {
    rates:    Arc<S>,
    debounce: Duration,
    token:    AtomicU64,
    state:    Mutex<QuoterState>,
}

impl<S: ShippingRateService> ShippingQuoter<S> {
    /// Creates a quoter over a rating service.
    #[must_use]
    pub fn new(rates: Arc<S>, debounce: Duration) -> Self {
        Self {
            rates,
            debounce,
            token: AtomicU64::new(0),
            state: Mutex::new(QuoterState::default()),
        }
    }

    /// Creates a quoter with the debounce window taken from the engine config.
    #[must_use]
    pub fn from_config(rates: Arc<S>, config: &CheckoutConfig) -> Self {
        Self::new(rates, Duration::from_millis(config.quote_debounce_ms))
    }

    /// Notifies the quoter that the address changed.
    ///
    /// Waits out the debounce window, then resolves a quote unless a newer
    /// address change has superseded this one. Returns the quote when this
    /// call's result was applied, `None` when it was superseded or the
    /// service failed. On failure the previous quote is retained.
    pub async fn address_changed(&self, address: DeliveryAddress) -> Option<ShippingQuote> {
        let token = self.token.fetch_add(1, Ordering::SeqCst) + 1;
        self.set_resolving(true);

        sleep(self.debounce).await;
        if !self.is_current(token) {
            // Superseded within the debounce window; the newer call owns the
            // resolving flag now.
            return None;
        }

        match self.rates.rate(&address).await {
            Ok(quote) => self.apply(token, quote),
            Err(err) => {
                if self.is_current(token) {
                    warn!(%err, city = %address.city, "shipping quote failed, keeping last known quote");
                    self.set_resolving(false);
                }
                None
            },
        }
    }

    /// Last successfully resolved quote, if any.
    #[must_use]
    pub fn current_quote(&self) -> Option<ShippingQuote> {
        self.state.lock().ok().and_then(|s| s.quote.clone())
    }

    /// Whether a resolution is pending for the latest address.
    #[must_use]
    pub fn is_resolving(&self) -> bool {
        self.state.lock().map(|s| s.resolving).unwrap_or(false)
    }

    fn apply(&self, token: u64, quote: ShippingQuote) -> Option<ShippingQuote> {
        let Ok(mut state) = self.state.lock() else {
            return None;
        };
        // Token re-checked under the lock so a superseding change cannot race
        // the write.
        if !self.is_current(token) {
            debug!(token, zone = %quote.zone_id, "discarding stale shipping quote");
            return None;
        }
        state.quote = Some(quote.clone());
        state.resolving = false;
        Some(quote)
    }

    fn is_current(&self, token: u64) -> bool {
        self.token.load(Ordering::SeqCst) == token
    }

    fn set_resolving(&self, resolving: bool) {
        if let Ok(mut state) = self.state.lock() {
            state.resolving = resolving;
        }
    }
}
