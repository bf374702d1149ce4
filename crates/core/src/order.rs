//! Order form validation.
//!
//! The order form is the only thing the storefront creates. Validation stays
//! deliberately shallow (parseable email, non-empty required fields, a length
//! cap on free text); pricing and capacity are the API's business.

use crate::shoutout::ShoutoutKind;
use crate::types::{Email, EmailError};

/// Maximum length of the message or script text, in characters.
pub const MAX_TEXT_CHARS: usize = 1000;

/// Whether the buyer's display name must be given.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuyerNameRule {
    Required,
    Optional,
}

/// Raw order form input, as submitted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrderDraft {
    pub email: String,
    pub name: String,
    pub kind: ShoutoutKind,
    pub message: String,
    pub script_text: String,
}

/// Order form input that passed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidOrder {
    pub email: Email,
    /// Trimmed display name; empty when optional and not given.
    pub name: String,
    pub kind: ShoutoutKind,
    /// Creative brief (may be empty).
    pub message: String,
    /// Script text, present only for [`ShoutoutKind::Script`].
    pub script_text: Option<String>,
}

/// Why an order form was rejected.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum OrderFormError {
    #[error("invalid email: {0}")]
    Email(#[from] EmailError),
    #[error("buyer name is required")]
    MissingName,
    #[error("script text is required for script shoutouts")]
    MissingScript,
    #[error("{field} exceeds {max} characters")]
    TooLong { field: &'static str, max: usize },
}

impl OrderFormError {
    /// Inline message shown above the form.
    #[must_use]
    pub const fn user_message(&self) -> &'static str {
        match self {
            Self::Email(_) => "Bitte gib eine gültige E-Mail-Adresse ein.",
            Self::MissingName => "Bitte gib deinen Namen ein.",
            Self::MissingScript => "Bitte gib den Text für dein Skript ein.",
            Self::TooLong { .. } => "Deine Nachricht darf höchstens 1000 Zeichen lang sein.",
        }
    }
}

impl OrderDraft {
    /// Characters left for the text field matching the chosen kind.
    #[must_use]
    pub fn remaining_chars(&self) -> usize {
        let used = match self.kind {
            ShoutoutKind::Script => self.script_text.chars().count(),
            ShoutoutKind::Creative => self.message.chars().count(),
        };
        MAX_TEXT_CHARS.saturating_sub(used)
    }

    /// Validate the draft.
    ///
    /// # Errors
    ///
    /// Returns the first violated rule, checked in form order.
    pub fn validate(&self, name_rule: BuyerNameRule) -> Result<ValidOrder, OrderFormError> {
        let email = Email::parse(&self.email)?;

        let name = self.name.trim();
        if name_rule == BuyerNameRule::Required && name.is_empty() {
            return Err(OrderFormError::MissingName);
        }

        let message = self.message.trim();
        if message.chars().count() > MAX_TEXT_CHARS {
            return Err(OrderFormError::TooLong {
                field: "message",
                max: MAX_TEXT_CHARS,
            });
        }

        let script_text = match self.kind {
            ShoutoutKind::Script => {
                let script = self.script_text.trim();
                if script.is_empty() {
                    return Err(OrderFormError::MissingScript);
                }
                if script.chars().count() > MAX_TEXT_CHARS {
                    return Err(OrderFormError::TooLong {
                        field: "script",
                        max: MAX_TEXT_CHARS,
                    });
                }
                Some(script.to_owned())
            }
            ShoutoutKind::Creative => None,
        };

        Ok(ValidOrder {
            email,
            name: name.to_owned(),
            kind: self.kind,
            message: message.to_owned(),
            script_text,
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn draft() -> OrderDraft {
        OrderDraft {
            email: "fan@example.com".to_string(),
            name: "Lisa".to_string(),
            kind: ShoutoutKind::Creative,
            message: "Alles Gute zum Geburtstag!".to_string(),
            script_text: String::new(),
        }
    }

    #[test]
    fn test_creative_order_is_valid_with_empty_brief() {
        let mut d = draft();
        d.message = String::new();
        let valid = d.validate(BuyerNameRule::Required).unwrap();
        assert_eq!(valid.kind, ShoutoutKind::Creative);
        assert_eq!(valid.message, "");
        assert_eq!(valid.script_text, None);
    }

    #[test]
    fn test_script_order_requires_script_text() {
        let mut d = draft();
        d.kind = ShoutoutKind::Script;
        assert_eq!(
            d.validate(BuyerNameRule::Required),
            Err(OrderFormError::MissingScript)
        );

        d.script_text = "  Hallo Lisa!  ".to_string();
        let valid = d.validate(BuyerNameRule::Required).unwrap();
        assert_eq!(valid.script_text.as_deref(), Some("Hallo Lisa!"));
    }

    #[test]
    fn test_name_rule() {
        let mut d = draft();
        d.name = "   ".to_string();
        assert_eq!(
            d.validate(BuyerNameRule::Required),
            Err(OrderFormError::MissingName)
        );
        assert_eq!(d.validate(BuyerNameRule::Optional).unwrap().name, "");
    }

    #[test]
    fn test_email_checked_first() {
        let mut d = draft();
        d.email = "not-an-email".to_string();
        d.name = String::new();
        let err = d.validate(BuyerNameRule::Required).unwrap_err();
        assert!(matches!(err, OrderFormError::Email(_)));
        assert_eq!(err.user_message(), "Bitte gib eine gültige E-Mail-Adresse ein.");
    }

    #[test]
    fn test_text_length_is_counted_in_chars() {
        let mut d = draft();
        d.message = "ü".repeat(MAX_TEXT_CHARS);
        assert!(d.validate(BuyerNameRule::Required).is_ok());
        assert_eq!(d.remaining_chars(), 0);

        d.message.push('!');
        assert!(matches!(
            d.validate(BuyerNameRule::Required),
            Err(OrderFormError::TooLong { field: "message", .. })
        ));
    }
}
