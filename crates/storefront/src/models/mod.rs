//! Domain models for storefront.
//!
//! The storefront owns no persistent data. The only state it keeps is the
//! pending checkout held in the buyer's session between the order form and a
//! confirmed payment.

pub mod session;

pub use session::{CheckoutSummary, PendingCheckout, keys as session_keys};
