//! Session-related types.
//!
//! Types stored in the session for the checkout flow.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tower_sessions::Session;

use shoutout_core::{PaymentFlow, Price, ShoutoutKind};

/// What is being paid for; rendered as the order summary on the checkout page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckoutSummary {
    pub creator_username: String,
    pub creator_name: String,
    pub option_title: String,
    pub duration_label: String,
    pub amount: Decimal,
    pub buyer_email: String,
    pub kind: ShoutoutKind,
    /// Where "Abbrechen" leads back to.
    pub back_url: String,
}

impl CheckoutSummary {
    #[must_use]
    pub fn price_label(&self) -> String {
        Price::eur(self.amount).display()
    }

    /// Label of the pay button ("€25 bezahlen").
    #[must_use]
    pub fn pay_label(&self) -> String {
        format!("{} bezahlen", self.price_label())
    }
}

/// A payment intent waiting for confirmation by the hosted payment element.
///
/// Created when the order form is accepted, removed once the payment has
/// succeeded or the buyer cancels.
#[derive(Clone, Serialize, Deserialize)]
pub struct PendingCheckout {
    pub payment_intent_id: String,
    pub client_secret: String,
    pub flow: PaymentFlow,
    pub summary: CheckoutSummary,
}

impl std::fmt::Debug for PendingCheckout {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PendingCheckout")
            .field("payment_intent_id", &self.payment_intent_id)
            .field("client_secret", &"[REDACTED]")
            .field("flow", &self.flow)
            .field("summary", &self.summary)
            .finish()
    }
}

impl PendingCheckout {
    /// Load the pending checkout from the session.
    ///
    /// # Errors
    ///
    /// Returns an error if the session store fails.
    pub async fn load(session: &Session) -> Result<Option<Self>, tower_sessions::session::Error> {
        session.get::<Self>(keys::PENDING_CHECKOUT).await
    }

    /// Store this checkout in the session, replacing any previous one.
    ///
    /// # Errors
    ///
    /// Returns an error if the session store fails.
    pub async fn save(&self, session: &Session) -> Result<(), tower_sessions::session::Error> {
        session.insert(keys::PENDING_CHECKOUT, self).await
    }

    /// Remove the pending checkout from the session.
    ///
    /// # Errors
    ///
    /// Returns an error if the session store fails.
    pub async fn clear(session: &Session) -> Result<(), tower_sessions::session::Error> {
        session.remove::<Self>(keys::PENDING_CHECKOUT).await.map(|_| ())
    }
}

/// Session keys.
pub mod keys {
    /// Key for the checkout awaiting payment.
    pub const PENDING_CHECKOUT: &str = "pending_checkout";
}
