//! # Cart Store
//!
//! Exclusive owner of the line-item list; all reads elsewhere are snapshots.

mod item;
mod store;

pub use item::CartItem;
pub use store::{CartSnapshot, CartStore};
