//! Order confirmation pages.
//!
//! - `GET /payment-success` is the return URL of the payment provider and
//!   the target of the checkout script once a payment succeeded.
//! - `GET /success` confirms an order placed without payment.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{Query, State},
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use shoutout_core::{OrderNumber, PaymentIntentStatus, PaymentPhase, WidgetOutcome};

use crate::error::Result;
use crate::filters;
use crate::models::PendingCheckout;
use crate::state::AppState;

/// Query parameters appended by the payment provider.
#[derive(Debug, Deserialize)]
pub struct PaymentReturnQuery {
    pub payment_intent: Option<String>,
    pub redirect_status: Option<String>,
}

/// Query parameters of the direct-order confirmation.
#[derive(Debug, Deserialize)]
pub struct SuccessQuery {
    #[serde(alias = "orderId")]
    pub order: Option<String>,
}

/// Payment details shown after a successful payment.
#[derive(Clone)]
pub struct PaymentView {
    pub order_number: Option<String>,
    pub buyer_email: Option<String>,
    pub amount: Option<String>,
}

/// Payment success page template.
#[derive(Template, WebTemplate)]
#[template(path = "payment_success.html")]
pub struct PaymentSuccessTemplate {
    pub payment_intent_id: String,
    /// `None` when the payment record could not be loaded.
    pub payment: Option<PaymentView>,
}

/// Direct-order confirmation template.
#[derive(Template, WebTemplate)]
#[template(path = "success.html")]
pub struct SuccessTemplate {
    pub order_number: Option<String>,
}

/// Apply the provider's redirect to the pending checkout, if it is ours.
///
/// Returns `true` when the buyer should go back to the checkout page
/// because the payment did not succeed.
async fn settle_pending(
    session: &Session,
    payment_intent_id: &str,
    redirect_status: Option<&str>,
) -> Result<bool> {
    let Some(mut pending) = PendingCheckout::load(session).await? else {
        return Ok(false);
    };
    if pending.payment_intent_id != payment_intent_id {
        return Ok(false);
    }

    // `processing` means the provider accepted the payment but has not
    // settled it yet; the buyer still gets the confirmation page.
    let status = match redirect_status {
        None | Some("succeeded") => Some(PaymentIntentStatus::Succeeded),
        Some("processing") => Some(PaymentIntentStatus::Processing),
        Some(_) => None,
    };
    let succeeded = status.is_some();

    if pending.flow.phase() == PaymentPhase::Processing {
        let outcome = status.map_or(WidgetOutcome::Error { message: None }, |status| {
            WidgetOutcome::Confirmed {
                status,
                payment_intent_id: payment_intent_id.to_string(),
            }
        });
        pending.flow.resolve(outcome)?;
    }

    match pending.flow.phase() {
        PaymentPhase::Succeeded => {
            PendingCheckout::clear(session).await?;
            Ok(false)
        }
        // The provider's return outranks what the page reported: the flow
        // may have failed here while the payment went through off-site.
        PaymentPhase::Idle | PaymentPhase::Processing | PaymentPhase::Failed if succeeded => {
            PendingCheckout::clear(session).await?;
            Ok(false)
        }
        PaymentPhase::Failed => {
            pending.save(session).await?;
            Ok(true)
        }
        PaymentPhase::Idle | PaymentPhase::Processing => Ok(true),
    }
}

/// Show the confirmation for a paid order.
#[instrument(skip(state, session))]
pub async fn payment_success(
    State(state): State<AppState>,
    session: Session,
    Query(query): Query<PaymentReturnQuery>,
) -> Result<Response> {
    let Some(payment_intent_id) = query
        .payment_intent
        .map(|id| id.trim().to_string())
        .filter(|id| !id.is_empty())
    else {
        return Ok(Redirect::to("/").into_response());
    };

    if settle_pending(&session, &payment_intent_id, query.redirect_status.as_deref()).await? {
        return Ok(Redirect::to("/checkout").into_response());
    }

    let payment = match state.api().payment(&payment_intent_id).await {
        Ok(record) => Some(PaymentView {
            order_number: record.order_number().map(str::to_string),
            buyer_email: record.buyer_email.clone(),
            amount: record.amount_label(),
        }),
        Err(e) => {
            tracing::warn!("Failed to load payment record: {e}");
            None
        }
    };

    Ok(PaymentSuccessTemplate {
        payment_intent_id,
        payment,
    }
    .into_response())
}

/// Show the confirmation for an order placed without payment.
#[instrument]
pub async fn success(Query(query): Query<SuccessQuery>) -> impl IntoResponse {
    SuccessTemplate {
        order_number: query
            .order
            .as_deref()
            .and_then(OrderNumber::parse)
            .map(|n| n.to_string()),
    }
}
