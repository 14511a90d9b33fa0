//! Implementation of the checkout engine components

pub mod cart_store;
pub mod checkout;
pub mod order_composer;
pub mod promo_validator;
pub mod shipping_quoter;
