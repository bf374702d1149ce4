//! Wire types for the shoutout REST API.
//!
//! Every response is wrapped in an [`Envelope`]. Field naming follows the API
//! as it is: profile and campaign records are `snake_case`, request bodies
//! and order records are `camelCase`.

use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};

use shoutout_core::shoutout::{format_duration, format_duration_long};
use shoutout_core::{
    Availability, CampaignId, CreatorId, Email, OrderId, OrderNumber, OrderStatus,
    PaymentIntentStatus, PaymentStatus, Price, ShoutoutKind, ShoutoutOptionId, WidgetOutcome,
};

/// Response wrapper used by every API endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct Envelope<T> {
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub data: Option<T>,
    #[serde(default)]
    pub error: Option<String>,
}

// =============================================================================
// Lenient scalars
// =============================================================================

/// Scalars the API sends either as JSON strings or as numbers.
#[derive(Deserialize)]
#[serde(untagged)]
enum StringOrNumber {
    String(String),
    Int(i64),
    Float(f64),
}

impl StringOrNumber {
    fn into_string(self) -> String {
        match self {
            Self::String(s) => s,
            Self::Int(n) => n.to_string(),
            Self::Float(n) => n.to_string(),
        }
    }
}

fn option_id<'de, D: Deserializer<'de>>(deserializer: D) -> Result<ShoutoutOptionId, D::Error> {
    StringOrNumber::deserialize(deserializer).map(|v| ShoutoutOptionId::new(v.into_string()))
}

fn optional_quantity<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<String>, D::Error> {
    Option::<StringOrNumber>::deserialize(deserializer).map(|v| v.map(StringOrNumber::into_string))
}

// =============================================================================
// Profiles
// =============================================================================

/// `GET /public/profile/{username}`
#[derive(Debug, Clone, Deserialize)]
pub struct ProfileData {
    pub profile: PublicProfile,
    #[serde(rename = "shoutoutSettings")]
    pub shoutout_settings: ShoutoutSettings,
    #[serde(rename = "shoutoutOptions", default)]
    pub shoutout_options: Vec<ShoutoutOption>,
}

impl ProfileData {
    /// Catalog options in display order.
    #[must_use]
    pub fn sorted_options(&self) -> Vec<&ShoutoutOption> {
        let mut options: Vec<&ShoutoutOption> = self.shoutout_options.iter().collect();
        options.sort_by_key(|o| o.sort_order);
        options
    }

    /// Look up a catalog option by id.
    #[must_use]
    pub fn option(&self, id: &str) -> Option<&ShoutoutOption> {
        self.shoutout_options.iter().find(|o| o.id.as_str() == id)
    }
}

/// A creator's public profile.
#[derive(Debug, Clone, Deserialize)]
pub struct PublicProfile {
    pub id: CreatorId,
    pub username: String,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub bio: Option<String>,
    #[serde(default)]
    pub profile_image_original: Option<String>,
    #[serde(default)]
    pub profile_image_thumbnail: Option<String>,
    #[serde(default)]
    pub profile_image_small: Option<String>,
    #[serde(default)]
    pub rating: Decimal,
    #[serde(default)]
    pub completed_shoutouts: u32,
    #[serde(default)]
    pub is_verified: bool,
    #[serde(default)]
    pub created_at: Option<String>,
}

impl PublicProfile {
    /// "First Last" when either is present, otherwise the username.
    #[must_use]
    pub fn display_name(&self) -> String {
        display_name(
            self.first_name.as_deref(),
            self.last_name.as_deref(),
            &self.username,
        )
    }

    /// Best available profile image for the header.
    #[must_use]
    pub fn image_url(&self) -> Option<&str> {
        self.profile_image_original
            .as_deref()
            .or(self.profile_image_small.as_deref())
            .or(self.profile_image_thumbnail.as_deref())
            .filter(|url| !url.is_empty())
    }

    /// Rating rounded to one decimal place.
    #[must_use]
    pub fn rating_label(&self) -> String {
        format!("{:.1}", self.rating.round_dp(1))
    }
}

/// Display name rule shared by profiles and order records.
#[must_use]
pub fn display_name(first: Option<&str>, last: Option<&str>, username: &str) -> String {
    let full = format!("{} {}", first.unwrap_or_default(), last.unwrap_or_default());
    let full = full.trim();
    if full.is_empty() {
        username.to_string()
    } else {
        full.to_string()
    }
}

/// Capacity settings for a creator's shoutouts.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ShoutoutSettings {
    #[serde(default)]
    pub shoutout_mode_active: bool,
    #[serde(default)]
    pub is_unlimited: bool,
    /// Remaining capacity; a numeric string (or number, or null) on the wire.
    #[serde(default, deserialize_with = "optional_quantity")]
    pub max_quantity: Option<String>,
}

impl ShoutoutSettings {
    /// Current availability.
    #[must_use]
    pub fn availability(&self) -> Availability {
        Availability::from_settings(
            self.shoutout_mode_active,
            self.is_unlimited,
            self.max_quantity.as_deref(),
        )
    }
}

/// One entry in a creator's shoutout catalog.
#[derive(Debug, Clone, Deserialize)]
pub struct ShoutoutOption {
    #[serde(deserialize_with = "option_id")]
    pub id: ShoutoutOptionId,
    #[serde(default)]
    pub title: String,
    /// Video length in seconds.
    pub duration: u32,
    pub price: Decimal,
    #[serde(default)]
    pub sort_order: i32,
}

impl ShoutoutOption {
    /// Title, falling back to a generic label.
    #[must_use]
    pub fn display_title(&self) -> &str {
        if self.title.trim().is_empty() {
            "Persönlicher Shoutout"
        } else {
            &self.title
        }
    }

    #[must_use]
    pub fn price_label(&self) -> String {
        Price::eur(self.price).display()
    }

    #[must_use]
    pub fn duration_label(&self) -> String {
        format_duration(self.duration)
    }
}

// =============================================================================
// Campaigns
// =============================================================================

/// `GET /public/campaigns/{id}`
#[derive(Debug, Clone, Deserialize)]
pub struct Campaign {
    pub id: CampaignId,
    pub user: CampaignCreator,
    #[serde(default)]
    pub custom_title: Option<String>,
    #[serde(default)]
    pub category: Option<Category>,
    #[serde(default)]
    pub is_active: bool,
    #[serde(default)]
    pub is_unlimited: bool,
    #[serde(default)]
    pub max_shoutouts: Option<i64>,
    #[serde(default)]
    pub shoutouts_sold: i64,
    #[serde(default)]
    pub expires_at: Option<String>,
    #[serde(rename = "priceOptions", default)]
    pub price_options: Vec<PriceOption>,
}

impl Campaign {
    /// Custom title, else the category name, else "Shoutout".
    #[must_use]
    pub fn title(&self) -> &str {
        self.custom_title
            .as_deref()
            .filter(|t| !t.trim().is_empty())
            .or_else(|| self.category.as_ref().map(|c| c.name.as_str()))
            .unwrap_or("Shoutout")
    }

    /// Availability from the campaign's limit and sold count.
    #[must_use]
    pub fn availability(&self) -> Availability {
        let remaining = self
            .max_shoutouts
            .map_or(0, |max| max - self.shoutouts_sold);
        Availability::from_capacity(self.is_active, self.is_unlimited, remaining)
    }

    /// Price options that can currently be ordered, cheapest first.
    #[must_use]
    pub fn active_options(&self) -> Vec<&PriceOption> {
        let mut options: Vec<&PriceOption> =
            self.price_options.iter().filter(|o| o.is_active).collect();
        options.sort_by(|a, b| a.price.cmp(&b.price));
        options
    }

    /// Look up an active price option by id.
    #[must_use]
    pub fn option(&self, id: i64) -> Option<&PriceOption> {
        self.price_options
            .iter()
            .find(|o| o.is_active && o.id == id)
    }

    /// Cheapest active option's price.
    #[must_use]
    pub fn lowest_price(&self) -> Option<Price> {
        self.active_options().first().map(|o| Price::eur(o.price))
    }
}

/// Creator summary embedded in a campaign.
#[derive(Debug, Clone, Deserialize)]
pub struct CampaignCreator {
    pub id: CreatorId,
    pub username: String,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub profile_picture: Option<String>,
    #[serde(default)]
    pub bio: Option<String>,
    #[serde(default)]
    pub is_verified: bool,
}

impl CampaignCreator {
    /// Full name, or the username when no name is set.
    #[must_use]
    pub fn display_name(&self) -> String {
        display_name(
            self.first_name.as_deref(),
            self.last_name.as_deref(),
            &self.username,
        )
    }
}

/// Campaign category.
#[derive(Debug, Clone, Deserialize)]
pub struct Category {
    pub id: i64,
    pub slug: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
}

/// A purchasable duration/price pair within a campaign.
#[derive(Debug, Clone, Deserialize)]
pub struct PriceOption {
    pub id: i64,
    pub duration_seconds: u32,
    pub price: Decimal,
    #[serde(default)]
    pub is_active: bool,
}

impl PriceOption {
    #[must_use]
    pub fn price_label(&self) -> String {
        Price::eur(self.price).display()
    }

    #[must_use]
    pub fn duration_label(&self) -> String {
        format_duration_long(self.duration_seconds)
    }
}

// =============================================================================
// Orders and payments
// =============================================================================

/// Free-form part of a payment-intent request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IntentMetadata {
    pub shoutout_type: ShoutoutKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub script_text: Option<String>,
}

/// `POST /payments/create-intent`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentIntentRequest {
    pub option_id: ShoutoutOptionId,
    pub creator_id: CreatorId,
    pub buyer_email: Email,
    pub buyer_name: String,
    pub message: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
    pub metadata: IntentMetadata,
}

/// Payment intent created for one checkout.
#[derive(Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentIntent {
    pub client_secret: String,
    pub payment_intent_id: String,
}

impl std::fmt::Debug for PaymentIntent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PaymentIntent")
            .field("client_secret", &"[REDACTED]")
            .field("payment_intent_id", &self.payment_intent_id)
            .finish()
    }
}

/// `POST /public/orders`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DirectOrderRequest {
    pub option_id: ShoutoutOptionId,
    pub creator_id: CreatorId,
    pub buyer_email: Email,
    pub buyer_name: String,
    pub message: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
    pub duration: u32,
    pub shoutout_type: ShoutoutKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub script_text: Option<String>,
}

/// Response to a direct order.
#[derive(Debug, Clone, Deserialize)]
pub struct PlacedOrder {
    pub order: PlacedOrderRef,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlacedOrderRef {
    pub order_number: OrderNumber,
}

/// `GET /payments/{paymentIntentId}`
#[derive(Debug, Clone, Deserialize)]
pub struct PaymentLookup {
    pub payment: PaymentRecord,
}

/// A payment as recorded by the API.
#[derive(Debug, Clone, Deserialize)]
pub struct PaymentRecord {
    #[serde(default)]
    pub amount: Option<Decimal>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub buyer_email: Option<String>,
    #[serde(default)]
    pub metadata: PaymentRecordMetadata,
}

impl PaymentRecord {
    #[must_use]
    pub fn order_number(&self) -> Option<&str> {
        self.metadata.order_number.as_deref()
    }

    #[must_use]
    pub fn amount_label(&self) -> Option<String> {
        self.amount.map(|a| Price::eur(a).display())
    }

    /// The confirmation outcome this record settles, if it is final.
    ///
    /// Pending statuses (`processing`, `requires_action`, unknown values)
    /// return `None`.
    #[must_use]
    pub fn settled_outcome(&self, payment_intent_id: &str) -> Option<WidgetOutcome> {
        let status = PaymentIntentStatus::from_record(self.status.as_deref()?);
        if status.is_succeeded() {
            Some(WidgetOutcome::Confirmed {
                status,
                payment_intent_id: payment_intent_id.to_string(),
            })
        } else if status.is_failed() {
            Some(WidgetOutcome::Error { message: None })
        } else {
            None
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentRecordMetadata {
    #[serde(default)]
    pub order_number: Option<String>,
}

/// Body of `POST /public/orders/{orderNumber}/status`.
#[derive(Debug, Clone, Serialize)]
pub struct StatusLookupRequest<'a> {
    pub email: &'a Email,
}

/// Verified order detail.
#[derive(Debug, Clone, Deserialize)]
pub struct OrderDetails {
    pub order: OrderRecord,
    pub creator: CreatorSummary,
    #[serde(default)]
    pub option: OptionSummary,
    #[serde(default)]
    pub payment: PaymentSummary,
}

/// Order as reported by the status endpoint.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderRecord {
    pub id: OrderId,
    pub order_number: String,
    pub status: OrderStatus,
    #[serde(default)]
    pub payment_status: PaymentStatus,
    pub amount: Decimal,
    #[serde(default)]
    pub duration: u32,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub video_url: Option<String>,
    #[serde(default)]
    pub delivery_date: Option<String>,
    #[serde(default)]
    pub completed_at: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub is_overdue: bool,
    #[serde(default)]
    pub delivery_deadline: Option<String>,
    #[serde(default)]
    pub buyer_name: String,
    #[serde(default)]
    pub buyer_email: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatorSummary {
    pub username: String,
    #[serde(default)]
    pub display_name: String,
    #[serde(default)]
    pub profile_image: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct OptionSummary {
    #[serde(default)]
    pub title: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentSummary {
    #[serde(default)]
    pub method: Option<String>,
    #[serde(default)]
    pub customer_id: Option<String>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_profile_payload() {
        let data: ProfileData = serde_json::from_value(json!({
            "profile": {
                "id": 7,
                "username": "lisa",
                "first_name": "Lisa",
                "last_name": null,
                "rating": "4.87",
                "completed_shoutouts": 12,
                "is_verified": true,
                "created_at": "2024-01-01T00:00:00.000Z"
            },
            "shoutoutSettings": {
                "shoutout_mode_active": true,
                "is_unlimited": false,
                "max_quantity": 3
            },
            "shoutoutOptions": [
                {"id": "b", "title": "", "duration": 90, "price": 25.5, "sort_order": 2},
                {"id": 11, "title": "Kurz", "duration": 30, "price": 15, "sort_order": 1}
            ]
        }))
        .unwrap();

        assert_eq!(data.profile.display_name(), "Lisa");
        assert_eq!(data.profile.rating_label(), "4.9");
        assert_eq!(data.shoutout_settings.max_quantity.as_deref(), Some("3"));
        assert_eq!(data.shoutout_settings.availability().remaining(), Some(3));

        let sorted: Vec<&str> = data.sorted_options().iter().map(|o| o.id.as_str()).collect();
        assert_eq!(sorted, vec!["11", "b"]);

        let option = data.option("b").unwrap();
        assert_eq!(option.display_title(), "Persönlicher Shoutout");
        assert_eq!(option.price_label(), "€25.50");
        assert_eq!(option.duration_label(), "1:30 Min");
    }

    #[test]
    fn test_payment_record_settled_outcome() {
        let record = |status: serde_json::Value| -> PaymentRecord {
            serde_json::from_value(json!({"status": status})).unwrap()
        };

        assert_eq!(
            record(json!("succeeded")).settled_outcome("pi_1"),
            Some(WidgetOutcome::Confirmed {
                status: PaymentIntentStatus::Succeeded,
                payment_intent_id: "pi_1".to_string(),
            })
        );
        assert_eq!(
            record(json!("requires_payment_method")).settled_outcome("pi_1"),
            Some(WidgetOutcome::Error { message: None })
        );
        assert_eq!(record(json!("processing")).settled_outcome("pi_1"), None);
        assert_eq!(record(json!(null)).settled_outcome("pi_1"), None);
    }

    #[test]
    fn test_display_name_falls_back_to_username() {
        assert_eq!(display_name(None, None, "max"), "max");
        assert_eq!(display_name(Some(" "), Some(""), "max"), "max");
        assert_eq!(display_name(None, Some("Muster"), "max"), "Muster");
        assert_eq!(display_name(Some("Max"), Some("Muster"), "max"), "Max Muster");
    }

    #[test]
    fn test_campaign_payload() {
        let campaign: Campaign = serde_json::from_value(json!({
            "id": 2,
            "user": {"id": 1, "username": "hs", "is_verified": true},
            "custom_title": null,
            "category": {"id": 7, "slug": "other", "name": "Sonstiges", "description": ""},
            "is_active": true,
            "is_unlimited": false,
            "max_shoutouts": 50,
            "shoutouts_sold": 23,
            "priceOptions": [
                {"id": 5, "campaign_id": 2, "duration_seconds": 90, "price": 55, "is_active": true},
                {"id": 4, "campaign_id": 2, "duration_seconds": 45, "price": 35, "is_active": true},
                {"id": 6, "campaign_id": 2, "duration_seconds": 60, "price": 10, "is_active": false}
            ]
        }))
        .unwrap();

        assert_eq!(campaign.title(), "Sonstiges");
        assert_eq!(campaign.availability().remaining(), Some(27));
        assert_eq!(campaign.lowest_price().unwrap().display(), "€35");
        assert!(campaign.option(6).is_none());
        assert_eq!(campaign.option(5).unwrap().duration_label(), "1:30 Minuten");
        assert_eq!(campaign.user.display_name(), "hs");

        let named: CampaignCreator = serde_json::from_value(json!({
            "id": 1, "username": "hs", "first_name": "Hanna", "last_name": "Schulz"
        }))
        .unwrap();
        assert_eq!(named.display_name(), "Hanna Schulz");
    }

    #[test]
    fn test_intent_request_wire_shape() {
        let request = PaymentIntentRequest {
            option_id: ShoutoutOptionId::new("opt_1"),
            creator_id: CreatorId::new(7),
            buyer_email: Email::parse("fan@example.com").unwrap(),
            buyer_name: "Fan".to_string(),
            message: String::new(),
            amount: Decimal::new(2550, 2),
            metadata: IntentMetadata {
                shoutout_type: ShoutoutKind::Script,
                script_text: Some("Hallo!".to_string()),
            },
        };
        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({
                "optionId": "opt_1",
                "creatorId": 7,
                "buyerEmail": "fan@example.com",
                "buyerName": "Fan",
                "message": "",
                "amount": 25.5,
                "metadata": {"shoutoutType": "script", "scriptText": "Hallo!"}
            })
        );
    }

    #[test]
    fn test_order_details_payload() {
        let details: OrderDetails = serde_json::from_value(json!({
            "order": {
                "id": 3,
                "orderNumber": "SHT-1",
                "status": "in_progress",
                "paymentStatus": "completed",
                "amount": "40.00",
                "duration": 60,
                "message": "Hi",
                "createdAt": "2025-03-05T14:30:00Z",
                "isOverdue": false,
                "deliveryDeadline": "2025-03-07T14:30:00Z",
                "buyerName": "Fan",
                "buyerEmail": "fan@example.com"
            },
            "creator": {"username": "lisa", "displayName": "Lisa"},
            "option": {"title": "Standard"},
            "payment": {"method": "card"}
        }))
        .unwrap();

        assert_eq!(details.order.status, OrderStatus::InProgress);
        assert!(details.order.payment_status.is_paid());
        assert_eq!(details.payment.method.as_deref(), Some("card"));
    }

    #[test]
    fn test_payment_intent_debug_hides_secret() {
        let intent: PaymentIntent = serde_json::from_value(json!({
            "clientSecret": "pi_1_secret_xyz",
            "paymentIntentId": "pi_1"
        }))
        .unwrap();
        let debug = format!("{intent:?}");
        assert!(debug.contains("pi_1"));
        assert!(!debug.contains("secret_xyz"));
    }
}
