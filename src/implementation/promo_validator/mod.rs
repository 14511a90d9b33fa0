//! # Promo Validator
//!
//! Validates a code against the cart snapshot and eligibility constraints,
//! returning a cart-bound discount descriptor or a rejection.

mod rules;
mod validator;

pub use rules::{PromoKind, PromoRule};
pub use validator::{PromoDescriptor, PromoValidator};
