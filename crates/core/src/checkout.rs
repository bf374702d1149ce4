//! Payment flow state machine.
//!
//! The checkout page embeds the payment provider's hosted element. The
//! storefront never sees card data; it only tracks where the buyer is in the
//! confirmation:
//!
//! ```text
//!           submit                 Confirmed(succeeded)
//!   Idle ───────────► Processing ─────────────────────► Succeeded
//!    ▲                    │
//!    │ retry              │ Error / Exception
//!    └──────── Failed ◄───┘
//! ```
//!
//! Non-terminal widget statuses keep the flow in `Processing`. Every other
//! (state, event) pair is rejected with [`TransitionError`] and leaves the
//! state untouched.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::types::PaymentIntentStatus;

/// Message shown when the widget reports an error without a message.
pub const PAYMENT_FAILED_MESSAGE: &str = "Zahlung fehlgeschlagen";

/// Message shown when the confirmation itself blew up.
pub const UNEXPECTED_ERROR_MESSAGE: &str = "Ein unerwarteter Fehler ist aufgetreten";

/// Current state of a checkout's payment confirmation.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum PaymentFlow {
    /// Waiting for the buyer to submit the payment form.
    #[default]
    Idle,
    /// Confirmation has been handed to the widget.
    Processing,
    /// The widget reported success for this payment intent.
    Succeeded { payment_intent_id: String },
    /// The widget reported an error.
    Failed { message: String },
}

/// Data-less view of [`PaymentFlow`], used in errors and templates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentPhase {
    Idle,
    Processing,
    Succeeded,
    Failed,
}

impl fmt::Display for PaymentPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Idle => "idle",
            Self::Processing => "processing",
            Self::Succeeded => "succeeded",
            Self::Failed => "failed",
        })
    }
}

/// What the hosted widget reported back after a confirmation attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum WidgetOutcome {
    /// The widget returned a payment intent.
    Confirmed {
        status: PaymentIntentStatus,
        payment_intent_id: String,
    },
    /// The widget returned an error object.
    Error { message: Option<String> },
    /// Confirmation threw before producing a result.
    Exception,
}

/// Events the flow reacts to; named in [`TransitionError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlowEvent {
    Submit,
    Resolve,
    Retry,
}

impl fmt::Display for FlowEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Submit => "submit",
            Self::Resolve => "resolve",
            Self::Retry => "retry",
        })
    }
}

/// An event that is not valid in the current state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("cannot {event} while payment is {from}")]
pub struct TransitionError {
    pub from: PaymentPhase,
    pub event: FlowEvent,
}

impl PaymentFlow {
    /// The state without its payload.
    #[must_use]
    pub const fn phase(&self) -> PaymentPhase {
        match self {
            Self::Idle => PaymentPhase::Idle,
            Self::Processing => PaymentPhase::Processing,
            Self::Succeeded { .. } => PaymentPhase::Succeeded,
            Self::Failed { .. } => PaymentPhase::Failed,
        }
    }

    /// Error message when failed.
    #[must_use]
    pub fn failure_message(&self) -> Option<&str> {
        match self {
            Self::Failed { message } => Some(message),
            _ => None,
        }
    }

    /// Confirmed payment intent id when succeeded.
    #[must_use]
    pub fn succeeded_id(&self) -> Option<&str> {
        match self {
            Self::Succeeded { payment_intent_id } => Some(payment_intent_id),
            _ => None,
        }
    }

    const fn reject(&self, event: FlowEvent) -> TransitionError {
        TransitionError {
            from: self.phase(),
            event,
        }
    }

    /// `Idle → Processing`.
    ///
    /// # Errors
    ///
    /// Rejected in any other state; in particular a second submit while a
    /// confirmation is outstanding.
    pub fn submit(&mut self) -> Result<(), TransitionError> {
        match self {
            Self::Idle => {
                *self = Self::Processing;
                Ok(())
            }
            _ => Err(self.reject(FlowEvent::Submit)),
        }
    }

    /// Apply the widget's outcome while `Processing`.
    ///
    /// Returns the confirmed payment intent id when the flow reached
    /// `Succeeded`, `None` when it stayed in `Processing` or moved to
    /// `Failed`.
    ///
    /// # Errors
    ///
    /// Rejected unless the flow is `Processing`.
    pub fn resolve(&mut self, outcome: WidgetOutcome) -> Result<Option<String>, TransitionError> {
        if !matches!(self, Self::Processing) {
            return Err(self.reject(FlowEvent::Resolve));
        }

        match outcome {
            WidgetOutcome::Confirmed {
                status,
                payment_intent_id,
            } if status.is_succeeded() => {
                *self = Self::Succeeded {
                    payment_intent_id: payment_intent_id.clone(),
                };
                Ok(Some(payment_intent_id))
            }
            WidgetOutcome::Confirmed { .. } => Ok(None),
            WidgetOutcome::Error { message } => {
                let message = message
                    .filter(|m| !m.trim().is_empty())
                    .unwrap_or_else(|| PAYMENT_FAILED_MESSAGE.to_string());
                *self = Self::Failed { message };
                Ok(None)
            }
            WidgetOutcome::Exception => {
                *self = Self::Failed {
                    message: UNEXPECTED_ERROR_MESSAGE.to_string(),
                };
                Ok(None)
            }
        }
    }

    /// `Failed → Idle`.
    ///
    /// # Errors
    ///
    /// Rejected unless the flow is `Failed`.
    pub fn retry(&mut self) -> Result<(), TransitionError> {
        match self {
            Self::Failed { .. } => {
                *self = Self::Idle;
                Ok(())
            }
            _ => Err(self.reject(FlowEvent::Retry)),
        }
    }
}
