//! Business logic services for storefront.
//!
//! # Services
//!
//! - `orders` - Turns an accepted order form into a payment intent or a
//!   direct order

pub mod orders;

pub use orders::{OrderTarget, Placement, place_order};
