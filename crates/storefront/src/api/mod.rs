//! Shoutout REST API access.
//!
//! Route handlers talk to the marketplace API only through the
//! [`ShoutoutApi`] trait. [`HttpShoutoutApi`] is the production
//! implementation; tests substitute an in-process fake.

mod cache;
pub mod client;
pub mod types;

use async_trait::async_trait;
use thiserror::Error;

use shoutout_core::{CampaignId, Email, OrderNumber, Username};

pub use client::HttpShoutoutApi;
pub use types::*;

/// Errors returned by the shoutout API.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The request never produced a response (connect error, timeout, ...).
    #[error("HTTP error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The API answered but refused the request (`success: false` or a
    /// non-2xx status).
    #[error("API rejected request ({status}): {}", .message.as_deref().unwrap_or("no message"))]
    Rejected { status: u16, message: Option<String> },

    /// The API answered with a body this client cannot read.
    #[error("Parse error: {0}")]
    Decode(String),
}

impl ApiError {
    /// Whether the API reported the resource as missing.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::Rejected { status: 404, .. })
    }

    /// Message the API wants shown to the buyer, if any.
    #[must_use]
    pub fn server_message(&self) -> Option<&str> {
        match self {
            Self::Rejected { message, .. } => message.as_deref().filter(|m| !m.trim().is_empty()),
            Self::Transport(_) | Self::Decode(_) => None,
        }
    }
}

/// Operations the storefront needs from the marketplace API.
#[async_trait]
pub trait ShoutoutApi: Send + Sync {
    /// Public profile, shoutout settings and catalog of a creator.
    async fn profile(&self, username: &Username) -> Result<ProfileData, ApiError>;

    /// A campaign with its creator and price options.
    async fn campaign(&self, id: CampaignId) -> Result<Campaign, ApiError>;

    /// Create a payment intent for one order.
    async fn create_payment_intent(
        &self,
        request: &PaymentIntentRequest,
    ) -> Result<PaymentIntent, ApiError>;

    /// Place an order without payment.
    async fn place_order(&self, request: &DirectOrderRequest) -> Result<PlacedOrder, ApiError>;

    /// Payment record for a confirmed payment intent.
    async fn payment(&self, payment_intent_id: &str) -> Result<PaymentRecord, ApiError>;

    /// Order detail, released only if `email` matches the buyer.
    async fn order_status(
        &self,
        order_number: &OrderNumber,
        email: &Email,
    ) -> Result<OrderDetails, ApiError>;

    /// Whether the API answers at all.
    async fn health_check(&self) -> bool;
}
