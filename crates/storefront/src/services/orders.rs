//! Order placement shared by the profile and campaign pages.
//!
//! An accepted order form becomes exactly one API request: a payment intent
//! in payment mode, or a direct order otherwise.

use rust_decimal::Decimal;

use shoutout_core::{
    BuyerNameRule, CreatorId, OrderNumber, PaymentFlow, ShoutoutOptionId, ValidOrder,
};

use crate::api::{
    ApiError, DirectOrderRequest, IntentMetadata, PaymentIntentRequest, ShoutoutApi,
};
use crate::config::CheckoutMode;
use crate::models::{CheckoutSummary, PendingCheckout};

/// Fallback shown when an order could not be created and the API gave no
/// reason.
pub const ORDER_FAILED_MESSAGE: &str = "Fehler beim Erstellen der Bestellung. Bitte versuche es erneut.";

/// The catalog entry an order form was submitted for.
#[derive(Debug, Clone)]
pub struct OrderTarget {
    pub creator_id: CreatorId,
    pub creator_username: String,
    pub creator_name: String,
    pub option_id: ShoutoutOptionId,
    pub option_title: String,
    pub duration_seconds: u32,
    pub duration_label: String,
    pub price: Decimal,
    /// Page the buyer ordered from.
    pub back_url: String,
}

/// Result of a successful submission.
#[derive(Debug)]
pub enum Placement {
    /// Payment intent created; the buyer continues on the checkout page.
    Checkout(PendingCheckout),
    /// Order placed without payment.
    Placed(OrderNumber),
}

/// Whether the buyer name is mandatory in this mode.
#[must_use]
pub const fn name_rule(mode: CheckoutMode) -> BuyerNameRule {
    match mode {
        CheckoutMode::Payment => BuyerNameRule::Optional,
        CheckoutMode::Direct => BuyerNameRule::Required,
    }
}

/// Turn a validated order into one API request.
///
/// # Errors
///
/// Returns the API error unchanged; callers show it inline.
pub async fn place_order(
    api: &dyn ShoutoutApi,
    mode: CheckoutMode,
    target: &OrderTarget,
    order: &ValidOrder,
) -> Result<Placement, ApiError> {
    match mode {
        CheckoutMode::Payment => {
            let request = PaymentIntentRequest {
                option_id: target.option_id.clone(),
                creator_id: target.creator_id,
                buyer_email: order.email.clone(),
                buyer_name: order.name.clone(),
                message: order.message.clone(),
                amount: target.price,
                metadata: IntentMetadata {
                    shoutout_type: order.kind,
                    script_text: order.script_text.clone(),
                },
            };
            let intent = api.create_payment_intent(&request).await?;

            Ok(Placement::Checkout(PendingCheckout {
                payment_intent_id: intent.payment_intent_id,
                client_secret: intent.client_secret,
                flow: PaymentFlow::default(),
                summary: CheckoutSummary {
                    creator_username: target.creator_username.clone(),
                    creator_name: target.creator_name.clone(),
                    option_title: target.option_title.clone(),
                    duration_label: target.duration_label.clone(),
                    amount: target.price,
                    buyer_email: order.email.to_string(),
                    kind: order.kind,
                    back_url: target.back_url.clone(),
                },
            }))
        }
        CheckoutMode::Direct => {
            let request = DirectOrderRequest {
                option_id: target.option_id.clone(),
                creator_id: target.creator_id,
                buyer_email: order.email.clone(),
                buyer_name: order.name.clone(),
                message: order.message.clone(),
                amount: target.price,
                duration: target.duration_seconds,
                shoutout_type: order.kind,
                script_text: order.script_text.clone(),
            };
            let placed = api.place_order(&request).await?;
            Ok(Placement::Placed(placed.order.order_number))
        }
    }
}

/// Inline message for a failed submission.
#[must_use]
pub fn failure_message(err: &ApiError) -> String {
    err.server_message()
        .map_or_else(|| ORDER_FAILED_MESSAGE.to_string(), |m| format!("Fehler beim Erstellen der Bestellung: {m}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_name_rule_per_mode() {
        assert_eq!(name_rule(CheckoutMode::Payment), BuyerNameRule::Optional);
        assert_eq!(name_rule(CheckoutMode::Direct), BuyerNameRule::Required);
    }

    #[test]
    fn test_failure_message() {
        let err = ApiError::Rejected {
            status: 409,
            message: Some("Ausverkauft".to_string()),
        };
        assert_eq!(
            failure_message(&err),
            "Fehler beim Erstellen der Bestellung: Ausverkauft"
        );

        let err = ApiError::Decode("eof".to_string());
        assert_eq!(failure_message(&err), ORDER_FAILED_MESSAGE);
    }
}
