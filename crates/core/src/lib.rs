//! Shoutout Core - Shared domain types library.
//!
//! This crate provides the types used by the storefront:
//! - catalog and profile records fetched from the shoutout API
//! - order and payment status enums
//! - the payment flow state machine driven by the checkout page
//! - order form validation
//!
//! # Architecture
//!
//! The core crate contains only types and pure functions - no I/O, no HTTP
//! clients, no templates. Everything here can be unit tested in isolation.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for IDs, prices, emails, and statuses
//! - [`shoutout`] - Shoutout kinds, duration formatting and availability
//! - [`checkout`] - Payment flow state machine
//! - [`order`] - Order form validation

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod checkout;
pub mod order;
pub mod shoutout;
pub mod types;

pub use checkout::{FlowEvent, PaymentFlow, PaymentPhase, TransitionError, WidgetOutcome};
pub use order::{BuyerNameRule, OrderDraft, OrderFormError, ValidOrder};
pub use shoutout::{Availability, AvailabilityState, ShoutoutKind};
pub use types::*;
