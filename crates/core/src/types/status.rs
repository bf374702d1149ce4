//! Status enums for orders and payments.
//!
//! The API reports statuses as lowercase strings. Known values map to enum
//! variants; unknown values are preserved so they can still be shown to the
//! buyer verbatim.

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Fulfillment status of a shoutout order.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum OrderStatus {
    /// Paid or placed, waiting for the creator.
    #[default]
    Pending,
    /// The creator is recording.
    InProgress,
    /// The video has been delivered.
    Delivered,
    /// The order was cancelled.
    Cancelled,
    /// A status this storefront does not know about.
    Other(String),
}

impl OrderStatus {
    /// Wire representation.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Pending => "pending",
            Self::InProgress => "in_progress",
            Self::Delivered => "delivered",
            Self::Cancelled => "cancelled",
            Self::Other(s) => s,
        }
    }

    /// German label shown on the status page.
    #[must_use]
    pub fn label(&self) -> &str {
        match self {
            Self::Pending => "Wartend",
            Self::InProgress => "In Bearbeitung",
            Self::Delivered => "Geliefert",
            Self::Cancelled => "Storniert",
            Self::Other(s) => s,
        }
    }

    /// CSS tone used to color the status badge.
    #[must_use]
    pub const fn tone(&self) -> &'static str {
        match self {
            Self::Pending => "warning",
            Self::InProgress => "info",
            Self::Delivered => "success",
            Self::Cancelled => "danger",
            Self::Other(_) => "neutral",
        }
    }

    /// Whether recording has started (in progress or already delivered).
    #[must_use]
    pub const fn is_started(&self) -> bool {
        matches!(self, Self::InProgress | Self::Delivered)
    }

    /// Whether the video has been delivered.
    #[must_use]
    pub const fn is_delivered(&self) -> bool {
        matches!(self, Self::Delivered)
    }

    /// Label for the "recording" progress step.
    #[must_use]
    pub const fn progress_label(&self) -> &'static str {
        match self {
            Self::InProgress => "Wird gerade bearbeitet",
            Self::Delivered => "Abgeschlossen",
            _ => "Wartend",
        }
    }
}

impl From<&str> for OrderStatus {
    fn from(s: &str) -> Self {
        match s {
            "pending" => Self::Pending,
            "in_progress" => Self::InProgress,
            "delivered" => Self::Delivered,
            "cancelled" => Self::Cancelled,
            other => Self::Other(other.to_owned()),
        }
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for OrderStatus {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for OrderStatus {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Ok(Self::from(s.as_str()))
    }
}

/// Payment status of an order as reported by the API.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(transparent)]
pub struct PaymentStatus(String);

impl PaymentStatus {
    /// Create a payment status from its wire value.
    #[must_use]
    pub fn new(status: impl Into<String>) -> Self {
        Self(status.into())
    }

    /// Whether the payment has been captured.
    #[must_use]
    pub fn is_paid(&self) -> bool {
        self.0 == "completed"
    }

    /// German label ("Bezahlt" once completed, otherwise the raw value).
    #[must_use]
    pub fn label(&self) -> &str {
        if self.is_paid() { "Bezahlt" } else { &self.0 }
    }
}

/// Status of a payment intent as reported by the hosted payment widget.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentIntentStatus {
    Succeeded,
    Processing,
    RequiresAction,
    RequiresPaymentMethod,
    RequiresConfirmation,
    RequiresCapture,
    Canceled,
    /// Anything the widget reports that is not listed above.
    #[serde(other)]
    Unknown,
}

impl PaymentIntentStatus {
    /// Whether this is the terminal success status.
    #[must_use]
    pub const fn is_succeeded(&self) -> bool {
        matches!(self, Self::Succeeded)
    }

    /// Whether the provider gave up on this attempt; the buyer has to pay
    /// again.
    #[must_use]
    pub const fn is_failed(&self) -> bool {
        matches!(self, Self::RequiresPaymentMethod | Self::Canceled)
    }

    /// Parse a status string from a payment record.
    ///
    /// `completed` and `failed` are how the marketplace API records a settled
    /// payment; they map onto the provider's own statuses.
    #[must_use]
    pub fn from_record(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "succeeded" | "completed" => Self::Succeeded,
            "processing" => Self::Processing,
            "requires_action" => Self::RequiresAction,
            "requires_payment_method" | "failed" => Self::RequiresPaymentMethod,
            "requires_confirmation" => Self::RequiresConfirmation,
            "requires_capture" => Self::RequiresCapture,
            "canceled" | "cancelled" => Self::Canceled,
            _ => Self::Unknown,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_order_status_known_values() {
        let statuses: Vec<OrderStatus> =
            serde_json::from_str(r#"["pending","in_progress","delivered","cancelled"]"#).unwrap();
        assert_eq!(
            statuses,
            vec![
                OrderStatus::Pending,
                OrderStatus::InProgress,
                OrderStatus::Delivered,
                OrderStatus::Cancelled
            ]
        );
        let labels: Vec<&str> = statuses.iter().map(OrderStatus::label).collect();
        assert_eq!(labels, vec!["Wartend", "In Bearbeitung", "Geliefert", "Storniert"]);
    }

    #[test]
    fn test_order_status_unknown_value_is_shown_verbatim() {
        let status: OrderStatus = serde_json::from_str(r#""refunded""#).unwrap();
        assert_eq!(status, OrderStatus::Other("refunded".to_string()));
        assert_eq!(status.label(), "refunded");
        assert_eq!(status.tone(), "neutral");
        assert_eq!(serde_json::to_string(&status).unwrap(), r#""refunded""#);
    }

    #[test]
    fn test_order_status_progress() {
        assert!(!OrderStatus::Pending.is_started());
        assert!(OrderStatus::InProgress.is_started());
        assert!(OrderStatus::Delivered.is_started());
        assert_eq!(OrderStatus::Delivered.progress_label(), "Abgeschlossen");
        assert_eq!(OrderStatus::Cancelled.progress_label(), "Wartend");
    }

    #[test]
    fn test_payment_status_label() {
        assert_eq!(PaymentStatus::new("completed").label(), "Bezahlt");
        assert_eq!(PaymentStatus::new("pending").label(), "pending");
    }

    #[test]
    fn test_payment_intent_status_wire_format() {
        let status: PaymentIntentStatus = serde_json::from_str(r#""requires_action""#).unwrap();
        assert_eq!(status, PaymentIntentStatus::RequiresAction);
        let status: PaymentIntentStatus = serde_json::from_str(r#""something_new""#).unwrap();
        assert_eq!(status, PaymentIntentStatus::Unknown);
        assert!(PaymentIntentStatus::Succeeded.is_succeeded());
    }

    #[test]
    fn test_payment_intent_status_from_record() {
        assert_eq!(
            PaymentIntentStatus::from_record("completed"),
            PaymentIntentStatus::Succeeded
        );
        assert_eq!(
            PaymentIntentStatus::from_record("processing"),
            PaymentIntentStatus::Processing
        );
        assert!(PaymentIntentStatus::from_record("failed").is_failed());
        assert!(PaymentIntentStatus::from_record("Canceled").is_failed());
        assert!(!PaymentIntentStatus::from_record("requires_action").is_failed());
        assert_eq!(
            PaymentIntentStatus::from_record("on_hold"),
            PaymentIntentStatus::Unknown
        );
    }
}
