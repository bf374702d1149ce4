//! Checkout route handlers.
//!
//! The checkout page mounts the hosted payment element for the pending
//! checkout in the session. The page script reports each step of the
//! confirmation back here so the payment flow in the session stays the
//! single source of truth:
//!
//! ```text
//! POST /checkout/submit   idle → processing        (before confirmPayment)
//! POST /checkout/result   processing → succeeded | failed | processing
//! POST /checkout/retry    failed → idle
//! POST /checkout/cancel   drop the pending checkout
//! ```

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Json,
    extract::State,
    response::{IntoResponse, Redirect, Response},
};
use serde::Serialize;
use tower_sessions::Session;
use tracing::instrument;

use shoutout_core::{PaymentFlow, PaymentPhase, WidgetOutcome};

use crate::error::{AppError, Result, add_breadcrumb};
use crate::filters;
use crate::middleware::CspNonce;
use crate::models::{CheckoutSummary, PendingCheckout};
use crate::state::AppState;

/// Page the provider redirects back to after off-site authentication.
pub const RETURN_PATH: &str = "/payment-success";

/// Checkout page template.
#[derive(Template, WebTemplate)]
#[template(path = "checkout.html")]
pub struct CheckoutTemplate {
    pub summary: CheckoutSummary,
    pub phase: PaymentPhase,
    pub error: Option<String>,
    pub client_secret: String,
    pub publishable_key: String,
    pub return_url: String,
    pub nonce: String,
}

impl CheckoutTemplate {
    fn is_idle(&self) -> bool {
        self.phase == PaymentPhase::Idle
    }

    fn is_processing(&self) -> bool {
        self.phase == PaymentPhase::Processing
    }

    fn is_failed(&self) -> bool {
        self.phase == PaymentPhase::Failed
    }
}

/// JSON answer to the checkout script.
#[derive(Debug, Serialize)]
pub struct FlowResponse {
    pub state: PaymentPhase,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub redirect: Option<String>,
}

impl From<&PaymentFlow> for FlowResponse {
    fn from(flow: &PaymentFlow) -> Self {
        Self {
            state: flow.phase(),
            message: flow.failure_message().map(str::to_string),
            redirect: flow.succeeded_id().map(success_url),
        }
    }
}

/// Success page URL for a confirmed payment intent.
#[must_use]
pub fn success_url(payment_intent_id: &str) -> String {
    let query = url::form_urlencoded::Serializer::new(String::new())
        .append_pair("payment_intent", payment_intent_id)
        .append_pair("redirect_status", "succeeded")
        .finish();
    format!("{RETURN_PATH}?{query}")
}

async fn require_pending(session: &Session) -> Result<PendingCheckout> {
    PendingCheckout::load(session)
        .await?
        .ok_or_else(|| AppError::BadRequest("no pending checkout".to_string()))
}

/// Settle a confirmation the page never reported back, from the payment
/// record the API holds for the intent.
///
/// The flow stays in `processing` while the record is missing or pending.
async fn reconcile(
    state: &AppState,
    session: &Session,
    pending: &mut PendingCheckout,
) -> Result<()> {
    let record = match state.api().payment(&pending.payment_intent_id).await {
        Ok(record) => record,
        Err(e) => {
            tracing::info!(
                payment_intent_id = %pending.payment_intent_id,
                "Payment record not available yet: {e}"
            );
            return Ok(());
        }
    };
    let Some(outcome) = record.settled_outcome(&pending.payment_intent_id) else {
        return Ok(());
    };

    pending.flow.resolve(outcome)?;
    tracing::info!(
        payment_intent_id = %pending.payment_intent_id,
        phase = %pending.flow.phase(),
        "Payment settled from payment record"
    );
    pending.save(session).await?;
    Ok(())
}

/// Display the payment page for the pending checkout.
///
/// Without a pending checkout the buyer is sent home; a checkout that has
/// already succeeded goes straight to the success page. A confirmation still
/// in flight is checked against the payment record first.
#[instrument(skip(state, session, nonce))]
pub async fn show(
    State(state): State<AppState>,
    session: Session,
    CspNonce(nonce): CspNonce,
) -> Result<Response> {
    let Some(mut pending) = PendingCheckout::load(&session).await? else {
        return Ok(Redirect::to("/").into_response());
    };
    if pending.flow.phase() == PaymentPhase::Processing {
        reconcile(&state, &session, &mut pending).await?;
    }
    if let Some(id) = pending.flow.succeeded_id() {
        return Ok(Redirect::to(&success_url(id)).into_response());
    }
    let Some(stripe) = state.config().stripe.as_ref() else {
        tracing::error!("Pending checkout without payment provider configuration");
        PendingCheckout::clear(&session).await?;
        return Err(AppError::Internal("payment provider not configured".to_string()));
    };

    Ok(CheckoutTemplate {
        phase: pending.flow.phase(),
        error: pending.flow.failure_message().map(str::to_string),
        client_secret: pending.client_secret,
        publishable_key: stripe.publishable_key.clone(),
        return_url: format!(
            "{}{RETURN_PATH}",
            state.config().base_url.trim_end_matches('/')
        ),
        summary: pending.summary,
        nonce,
    }
    .into_response())
}

/// Start a confirmation: `idle → processing`.
///
/// Answers 409 while another confirmation is outstanding.
#[instrument(skip(session))]
pub async fn submit(session: Session) -> Result<Json<FlowResponse>> {
    let mut pending = require_pending(&session).await?;
    pending.flow.submit()?;
    pending.save(&session).await?;

    add_breadcrumb(
        "checkout",
        "Payment submitted",
        Some(&[("payment_intent_id", pending.payment_intent_id.as_str())]),
    );
    Ok(Json(FlowResponse::from(&pending.flow)))
}

/// Record what the payment element reported.
#[instrument(skip(session, outcome))]
pub async fn result(
    session: Session,
    Json(outcome): Json<WidgetOutcome>,
) -> Result<Json<FlowResponse>> {
    let mut pending = require_pending(&session).await?;
    let confirmed = pending.flow.resolve(outcome)?;

    match (&confirmed, pending.flow.failure_message()) {
        (Some(id), _) => {
            if *id != pending.payment_intent_id {
                tracing::warn!(
                    expected = %pending.payment_intent_id,
                    reported = %id,
                    "Payment element confirmed a different payment intent"
                );
            }
            tracing::info!(payment_intent_id = %id, "Payment confirmed");
        }
        (None, Some(message)) => {
            tracing::warn!(
                payment_intent_id = %pending.payment_intent_id,
                "Payment failed: {message}"
            );
        }
        (None, None) => {}
    }

    pending.save(&session).await?;
    Ok(Json(FlowResponse::from(&pending.flow)))
}

/// Leave the failed state so the buyer can try again: `failed → idle`.
#[instrument(skip(session))]
pub async fn retry(session: Session) -> Result<Redirect> {
    let mut pending = require_pending(&session).await?;
    pending.flow.retry()?;
    pending.save(&session).await?;
    Ok(Redirect::to("/checkout"))
}

/// Abandon the pending checkout and go back to where the order started.
#[instrument(skip(session))]
pub async fn cancel(session: Session) -> Result<Redirect> {
    let back = PendingCheckout::load(&session)
        .await?
        .map_or_else(|| "/".to_string(), |p| p.summary.back_url);
    PendingCheckout::clear(&session).await?;
    Ok(Redirect::to(&back))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_url_encodes_id() {
        assert_eq!(
            success_url("pi_123"),
            "/payment-success?payment_intent=pi_123&redirect_status=succeeded"
        );
        assert_eq!(
            success_url("pi 1&x"),
            "/payment-success?payment_intent=pi+1%26x&redirect_status=succeeded"
        );
    }

    #[test]
    fn test_flow_response_shape() {
        let failed = PaymentFlow::Failed {
            message: "Karte abgelehnt".to_string(),
        };
        let json = serde_json::to_value(FlowResponse::from(&failed)).unwrap_or_default();
        assert_eq!(
            json,
            serde_json::json!({"state": "failed", "message": "Karte abgelehnt"})
        );

        let done = PaymentFlow::Succeeded {
            payment_intent_id: "pi_9".to_string(),
        };
        let response = FlowResponse::from(&done);
        assert_eq!(response.state, PaymentPhase::Succeeded);
        assert_eq!(
            response.redirect.as_deref(),
            Some("/payment-success?payment_intent=pi_9&redirect_status=succeeded")
        );
    }
}
