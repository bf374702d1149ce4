//! Order status lookup.
//!
//! The status page is gated by the buyer's email address. `GET` shows the
//! email form; `POST` asks the API once and renders the order only if the
//! API confirms the address. Nothing is remembered, so a reload shows the
//! form again.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Deserialize;
use tracing::instrument;

use shoutout_core::shoutout::format_duration;
use shoutout_core::{Email, OrderNumber, Price};

use crate::api::{ApiError, OrderDetails};
use crate::error::{AppError, Result};
use crate::filters;
use crate::state::AppState;

/// Shown when the API refuses the lookup without a message.
pub const NOT_FOUND_MESSAGE: &str = "Bestellung nicht gefunden";

/// Shown when the API could not be reached.
pub const TRANSPORT_ERROR_MESSAGE: &str = "Ein Fehler ist aufgetreten. Bitte versuche es erneut.";

/// Email verification form data.
#[derive(Debug, Deserialize)]
pub struct VerifyForm {
    #[serde(default)]
    pub email: String,
}

/// Email form template ("unverified").
#[derive(Template, WebTemplate)]
#[template(path = "order_status/verify.html")]
pub struct VerifyTemplate {
    pub order_number: String,
    pub email: String,
    pub error: Option<String>,
}

/// Order detail display data.
#[derive(Clone)]
pub struct OrderView {
    pub order_number: String,
    pub status_label: String,
    pub status_tone: String,
    pub is_started: bool,
    pub is_delivered: bool,
    pub progress_label: String,
    pub created_at: Option<String>,
    pub delivered_at: Option<String>,
    pub deadline: Option<String>,
    pub is_overdue: bool,
    pub video_url: Option<String>,
    pub amount: String,
    pub duration: String,
    pub payment_status: String,
    pub payment_method: Option<String>,
    pub message: Option<String>,
    pub option_title: Option<String>,
    pub buyer_name: String,
    pub creator_username: String,
    pub creator_name: String,
    pub creator_image: Option<String>,
}

impl From<OrderDetails> for OrderView {
    fn from(details: OrderDetails) -> Self {
        let OrderDetails {
            order,
            creator,
            option,
            payment,
        } = details;
        let german_date = |value: Option<String>| {
            value
                .filter(|v| !v.trim().is_empty())
                .map(|v| filters::format_german_datetime(&v))
        };

        Self {
            order_number: order.order_number,
            status_label: order.status.label().to_string(),
            status_tone: order.status.tone().to_string(),
            is_started: order.status.is_started(),
            is_delivered: order.status.is_delivered(),
            progress_label: order.status.progress_label().to_string(),
            created_at: german_date(order.created_at),
            delivered_at: german_date(order.delivery_date),
            deadline: german_date(order.delivery_deadline),
            is_overdue: order.is_overdue,
            video_url: order.video_url.filter(|url| !url.trim().is_empty()),
            amount: Price::eur(order.amount).display(),
            duration: format_duration(order.duration),
            payment_status: order.payment_status.label().to_string(),
            payment_method: payment.method.filter(|m| !m.is_empty()),
            message: Some(order.message).filter(|m| !m.trim().is_empty()),
            option_title: Some(option.title).filter(|t| !t.trim().is_empty()),
            buyer_name: order.buyer_name,
            creator_name: if creator.display_name.trim().is_empty() {
                creator.username.clone()
            } else {
                creator.display_name
            },
            creator_username: creator.username,
            creator_image: creator.profile_image.filter(|url| !url.is_empty()),
        }
    }
}

/// Order detail template ("verified").
#[derive(Template, WebTemplate)]
#[template(path = "order_status/show.html")]
pub struct OrderStatusTemplate {
    pub order: OrderView,
}

fn parse_order_number(raw: &str) -> Result<OrderNumber> {
    OrderNumber::parse(raw).ok_or_else(|| AppError::NotFound(format!("order {raw}")))
}

/// Inline message for a failed lookup.
#[must_use]
pub fn lookup_error_message(err: &ApiError) -> String {
    match err {
        ApiError::Transport(_) => TRANSPORT_ERROR_MESSAGE.to_string(),
        ApiError::Rejected { .. } | ApiError::Decode(_) => err
            .server_message()
            .unwrap_or(NOT_FOUND_MESSAGE)
            .to_string(),
    }
}

/// Display the email form for an order.
#[instrument]
pub async fn show(Path(order_number): Path<String>) -> Result<impl IntoResponse> {
    let order_number = parse_order_number(&order_number)?;
    Ok(VerifyTemplate {
        order_number: order_number.to_string(),
        email: String::new(),
        error: None,
    })
}

/// Verify the buyer's email and show the order.
#[instrument(skip(state, form))]
pub async fn verify(
    State(state): State<AppState>,
    Path(order_number): Path<String>,
    Form(form): Form<VerifyForm>,
) -> Result<Response> {
    let order_number = parse_order_number(&order_number)?;
    let rejected = |email: String, message: String| {
        (
            StatusCode::UNPROCESSABLE_ENTITY,
            VerifyTemplate {
                order_number: order_number.to_string(),
                email,
                error: Some(message),
            },
        )
            .into_response()
    };

    let email = match Email::parse(&form.email) {
        Ok(email) => email,
        Err(_) => {
            return Ok(rejected(
                form.email,
                "Bitte gib eine gültige E-Mail-Adresse ein.".to_string(),
            ));
        }
    };

    match state.api().order_status(&order_number, &email).await {
        Ok(details) => Ok(OrderStatusTemplate {
            order: OrderView::from(details),
        }
        .into_response()),
        Err(e) => {
            tracing::info!(order_number = %order_number, "Order lookup refused: {e}");
            Ok(rejected(form.email, lookup_error_message(&e)))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_error_message() {
        let err = ApiError::Rejected {
            status: 403,
            message: Some("E-Mail stimmt nicht überein".to_string()),
        };
        assert_eq!(lookup_error_message(&err), "E-Mail stimmt nicht überein");

        let err = ApiError::Rejected {
            status: 404,
            message: None,
        };
        assert_eq!(lookup_error_message(&err), NOT_FOUND_MESSAGE);

        let err = ApiError::Decode("eof".to_string());
        assert_eq!(lookup_error_message(&err), NOT_FOUND_MESSAGE);
    }

    #[test]
    fn test_rejects_malformed_order_numbers() {
        assert!(parse_order_number("SHT-2025-1").is_ok());
        assert!(matches!(
            parse_order_number("../admin"),
            Err(AppError::NotFound(_))
        ));
    }
}
