//! Order form shared by the profile and campaign pages.
//!
//! Both pages render the same form partial and submit through
//! [`submit`], which validates the input and hands it to
//! [`services::place_order`](crate::services::place_order).

use axum::response::{IntoResponse, Redirect, Response};
use serde::{Deserialize, Deserializer};
use tower_sessions::Session;

use shoutout_core::order::MAX_TEXT_CHARS;
use shoutout_core::{Availability, OrderDraft, ShoutoutKind};

use crate::config::CheckoutMode;
use crate::error::{AppError, add_breadcrumb};
use crate::services::orders::{self, OrderTarget, Placement};
use crate::state::AppState;

/// Shown when the submitted option is not in the creator's catalog.
pub const UNKNOWN_OPTION_MESSAGE: &str = "Bitte wähle eine gültige Option aus.";

/// Shown instead of the form when the catalog is empty.
pub const NO_OPTIONS_MESSAGE: &str = "Derzeit sind keine Optionen verfügbar.";

/// Order form data.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct OrderForm {
    pub option_id: String,
    pub email: String,
    pub name: String,
    #[serde(deserialize_with = "lenient_kind")]
    pub shoutout_type: ShoutoutKind,
    pub message: String,
    pub script_text: String,
}

/// Anything but `script` is a creative shoutout; a tampered radio value
/// must not turn the form post into an extractor rejection.
fn lenient_kind<'de, D: Deserializer<'de>>(deserializer: D) -> Result<ShoutoutKind, D::Error> {
    let raw = String::deserialize(deserializer)?;
    Ok(if raw.trim().eq_ignore_ascii_case(ShoutoutKind::Script.as_str()) {
        ShoutoutKind::Script
    } else {
        ShoutoutKind::Creative
    })
}

impl OrderForm {
    fn draft(&self) -> OrderDraft {
        OrderDraft {
            email: self.email.clone(),
            name: self.name.clone(),
            kind: self.shoutout_type,
            message: self.message.clone(),
            script_text: self.script_text.clone(),
        }
    }
}

/// One selectable catalog entry.
#[derive(Clone)]
pub struct OptionView {
    pub id: String,
    pub title: String,
    pub duration: String,
    pub price: String,
}

/// Everything the order form partial renders.
#[derive(Clone)]
pub struct OrderFormView {
    /// Where the form posts to.
    pub action: String,
    pub options: Vec<OptionView>,
    pub selected_option: String,
    pub email: String,
    pub name: String,
    pub is_script: bool,
    pub message: String,
    pub script_text: String,
    pub remaining_chars: usize,
    pub max_chars: usize,
    pub name_required: bool,
    /// False when the creator cannot take orders; the form is then hidden.
    pub orderable: bool,
    pub unavailable_message: String,
    pub error: Option<String>,
}

impl OrderFormView {
    /// Empty form with `selected` preselected (or the first option).
    #[must_use]
    pub fn new(
        action: String,
        options: Vec<OptionView>,
        selected: Option<&str>,
        mode: CheckoutMode,
        availability: &Availability,
    ) -> Self {
        let selected_option = selected
            .filter(|id| options.iter().any(|o| o.id == *id))
            .or_else(|| options.first().map(|o| o.id.as_str()))
            .unwrap_or_default()
            .to_string();

        Self {
            action,
            selected_option,
            email: String::new(),
            name: String::new(),
            is_script: false,
            message: String::new(),
            script_text: String::new(),
            remaining_chars: MAX_TEXT_CHARS,
            max_chars: MAX_TEXT_CHARS,
            name_required: orders::name_rule(mode) == shoutout_core::BuyerNameRule::Required,
            orderable: availability.is_orderable() && !options.is_empty(),
            unavailable_message: if availability.is_orderable() {
                NO_OPTIONS_MESSAGE.to_string()
            } else {
                availability.message()
            },
            error: None,
            options,
        }
    }

    /// Refill the form with submitted values and an inline error.
    #[must_use]
    pub fn with_submission(mut self, form: &OrderForm, error: impl Into<String>) -> Self {
        if self.options.iter().any(|o| o.id == form.option_id) {
            self.selected_option.clone_from(&form.option_id);
        }
        self.email.clone_from(&form.email);
        self.name.clone_from(&form.name);
        self.is_script = form.shoutout_type == ShoutoutKind::Script;
        self.message.clone_from(&form.message);
        self.script_text.clone_from(&form.script_text);
        self.remaining_chars = form.draft().remaining_chars();
        self.error = Some(error.into());
        self
    }

    /// Whether `id` is the preselected option.
    #[must_use]
    pub fn is_selected(&self, id: &str) -> bool {
        self.selected_option == id
    }
}

/// Outcome of an order form submission.
pub enum Submission {
    /// Redirect to checkout or the confirmation page.
    Done(Response),
    /// Re-render the form with this message.
    Rejected(String),
}

/// Validate and place an order for `target`.
///
/// Exactly one API request is made when the input is valid; none otherwise.
///
/// # Errors
///
/// Returns an error only when the session store fails. API and validation
/// failures come back as [`Submission::Rejected`].
pub async fn submit(
    state: &AppState,
    session: &Session,
    availability: &Availability,
    target: Option<OrderTarget>,
    form: &OrderForm,
) -> Result<Submission, AppError> {
    if !availability.is_orderable() {
        return Ok(Submission::Rejected(availability.message()));
    }
    let Some(target) = target else {
        return Ok(Submission::Rejected(UNKNOWN_OPTION_MESSAGE.to_string()));
    };

    let mode = state.config().checkout_mode;
    let order = match form.draft().validate(orders::name_rule(mode)) {
        Ok(order) => order,
        Err(e) => {
            tracing::debug!(error = %e, "Order form rejected");
            return Ok(Submission::Rejected(e.user_message().to_string()));
        }
    };

    match orders::place_order(state.api(), mode, &target, &order).await {
        Ok(Placement::Checkout(pending)) => {
            add_breadcrumb(
                "checkout",
                "Payment intent created",
                Some(&[("payment_intent_id", pending.payment_intent_id.as_str())]),
            );
            pending.save(session).await?;
            Ok(Submission::Done(Redirect::to("/checkout").into_response()))
        }
        Ok(Placement::Placed(order_number)) => {
            tracing::info!(order_number = %order_number, "Order placed");
            let url = format!("/success?order={order_number}");
            Ok(Submission::Done(Redirect::to(&url).into_response()))
        }
        Err(e) => {
            tracing::warn!(
                creator = %target.creator_username,
                option_id = %target.option_id,
                "Order submission failed: {e}"
            );
            Ok(Submission::Rejected(orders::failure_message(&e)))
        }
    }
}
