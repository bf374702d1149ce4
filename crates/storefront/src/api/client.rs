//! HTTP implementation of [`ShoutoutApi`].
//!
//! Uses `reqwest` 0.13 with JSON bodies. Profiles and campaigns are cached
//! with `moka` for one minute; orders, payments and status lookups never are.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use moka::future::Cache;
use reqwest::RequestBuilder;
use serde::de::DeserializeOwned;
use tracing::{debug, instrument};
use url::Url;

use shoutout_core::{CampaignId, Email, OrderNumber, Username};

use super::cache::{CacheKey, CacheValue};
use super::types::{
    Campaign, DirectOrderRequest, Envelope, OrderDetails, PaymentIntent, PaymentIntentRequest,
    PaymentLookup, PaymentRecord, PlacedOrder, ProfileData, StatusLookupRequest,
};
use super::{ApiError, ShoutoutApi};
use crate::config::ApiConfig;

/// How long profile and campaign lookups stay cached.
const CACHE_TTL: Duration = Duration::from_secs(60);

/// Longest response body excerpt written to the logs.
const LOG_BODY_CHARS: usize = 500;

/// Client for the shoutout REST API.
#[derive(Clone)]
pub struct HttpShoutoutApi {
    inner: Arc<HttpShoutoutApiInner>,
}

struct HttpShoutoutApiInner {
    client: reqwest::Client,
    base_url: Url,
    cache: Cache<CacheKey, CacheValue>,
}

impl HttpShoutoutApi {
    /// Create a new API client.
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client fails to build.
    pub fn new(config: &ApiConfig) -> Result<Self, ApiError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(concat!("shoutout-storefront/", env!("CARGO_PKG_VERSION")))
            .build()?;

        let cache = Cache::builder()
            .max_capacity(1000)
            .time_to_live(CACHE_TTL)
            .build();

        Ok(Self {
            inner: Arc::new(HttpShoutoutApiInner {
                client,
                base_url: config.base_url.clone(),
                cache,
            }),
        })
    }

    /// Build an endpoint URL by appending percent-encoded path segments.
    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.inner.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    /// Send a request and unwrap the response envelope.
    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, ApiError> {
        let response = request.send().await?;
        let status = response.status();
        let body = response.text().await?;

        let envelope: Envelope<serde_json::Value> = match serde_json::from_str(&body) {
            Ok(envelope) => envelope,
            Err(e) if status.is_success() => {
                tracing::error!(
                    error = %e,
                    body = %excerpt(&body),
                    "Failed to parse shoutout API response"
                );
                return Err(ApiError::Decode(e.to_string()));
            }
            Err(_) => {
                tracing::warn!(
                    status = %status,
                    body = %excerpt(&body),
                    "Shoutout API returned non-success status"
                );
                return Err(ApiError::Rejected {
                    status: status.as_u16(),
                    message: None,
                });
            }
        };

        if !status.is_success() || !envelope.success {
            tracing::warn!(
                status = %status,
                message = ?envelope.message,
                error = ?envelope.error,
                "Shoutout API rejected request"
            );
            return Err(ApiError::Rejected {
                status: status.as_u16(),
                message: envelope.message.or(envelope.error),
            });
        }

        let data = envelope.data.ok_or_else(|| {
            tracing::error!(body = %excerpt(&body), "Shoutout API response has no data");
            ApiError::Decode("no data in response".to_string())
        })?;

        serde_json::from_value(data).map_err(|e| {
            tracing::error!(
                error = %e,
                body = %excerpt(&body),
                "Unexpected shoutout API response shape"
            );
            ApiError::Decode(e.to_string())
        })
    }
}

fn excerpt(body: &str) -> String {
    body.chars().take(LOG_BODY_CHARS).collect()
}

#[async_trait]
impl ShoutoutApi for HttpShoutoutApi {
    #[instrument(skip(self), fields(username = %username))]
    async fn profile(&self, username: &Username) -> Result<ProfileData, ApiError> {
        let key = CacheKey::Profile(username.as_str().to_ascii_lowercase());
        if let Some(CacheValue::Profile(profile)) = self.inner.cache.get(&key).await {
            debug!("Cache hit for profile");
            return Ok((*profile).clone());
        }

        let url = self.endpoint(&["public", "profile", username.as_str()]);
        let profile: ProfileData = self.send(self.inner.client.get(url)).await?;

        self.inner
            .cache
            .insert(key, CacheValue::Profile(Arc::new(profile.clone())))
            .await;
        Ok(profile)
    }

    #[instrument(skip(self), fields(campaign_id = %id))]
    async fn campaign(&self, id: CampaignId) -> Result<Campaign, ApiError> {
        let key = CacheKey::Campaign(id.as_i64());
        if let Some(CacheValue::Campaign(campaign)) = self.inner.cache.get(&key).await {
            debug!("Cache hit for campaign");
            return Ok((*campaign).clone());
        }

        let id_segment = id.to_string();
        let url = self.endpoint(&["public", "campaigns", &id_segment]);
        let campaign: Campaign = self.send(self.inner.client.get(url)).await?;

        self.inner
            .cache
            .insert(key, CacheValue::Campaign(Arc::new(campaign.clone())))
            .await;
        Ok(campaign)
    }

    #[instrument(
        skip(self, request),
        fields(option_id = %request.option_id, creator_id = %request.creator_id)
    )]
    async fn create_payment_intent(
        &self,
        request: &PaymentIntentRequest,
    ) -> Result<PaymentIntent, ApiError> {
        let url = self.endpoint(&["payments", "create-intent"]);
        let intent: PaymentIntent = self.send(self.inner.client.post(url).json(request)).await?;
        tracing::info!(payment_intent_id = %intent.payment_intent_id, "Payment intent created");
        Ok(intent)
    }

    #[instrument(
        skip(self, request),
        fields(option_id = %request.option_id, creator_id = %request.creator_id)
    )]
    async fn place_order(&self, request: &DirectOrderRequest) -> Result<PlacedOrder, ApiError> {
        let url = self.endpoint(&["public", "orders"]);
        let placed: PlacedOrder = self.send(self.inner.client.post(url).json(request)).await?;
        tracing::info!(order_number = %placed.order.order_number, "Order placed");
        Ok(placed)
    }

    #[instrument(skip(self))]
    async fn payment(&self, payment_intent_id: &str) -> Result<PaymentRecord, ApiError> {
        let url = self.endpoint(&["payments", payment_intent_id]);
        let lookup: PaymentLookup = self.send(self.inner.client.get(url)).await?;
        Ok(lookup.payment)
    }

    #[instrument(skip(self, email), fields(order_number = %order_number))]
    async fn order_status(
        &self,
        order_number: &OrderNumber,
        email: &Email,
    ) -> Result<OrderDetails, ApiError> {
        let url = self.endpoint(&["public", "orders", order_number.as_str(), "status"]);
        let body = StatusLookupRequest { email };
        self.send(self.inner.client.post(url).json(&body)).await
    }

    async fn health_check(&self) -> bool {
        match self.inner.client.get(self.inner.base_url.clone()).send().await {
            Ok(_) => true,
            Err(e) => {
                tracing::warn!(error = %e, "Shoutout API unreachable");
                false
            }
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn client(base: &str) -> HttpShoutoutApi {
        HttpShoutoutApi::new(&ApiConfig {
            base_url: Url::parse(base).unwrap(),
            timeout: Duration::from_secs(5),
        })
        .unwrap()
    }

    #[test]
    fn test_endpoint_appends_segments() {
        let api = client("https://api.example.com/api");
        assert_eq!(
            api.endpoint(&["public", "profile", "lisa"]).as_str(),
            "https://api.example.com/api/public/profile/lisa"
        );
    }

    #[test]
    fn test_endpoint_encodes_segments() {
        let api = client("https://api.example.com");
        assert_eq!(
            api.endpoint(&["payments", "pi_1/../admin"]).as_str(),
            "https://api.example.com/payments/pi_1%2F..%2Fadmin"
        );
    }

    #[test]
    fn test_api_error_messages() {
        let err = ApiError::Rejected {
            status: 404,
            message: Some("Profil nicht gefunden".to_string()),
        };
        assert!(err.is_not_found());
        assert_eq!(err.server_message(), Some("Profil nicht gefunden"));

        let err = ApiError::Rejected {
            status: 400,
            message: Some("  ".to_string()),
        };
        assert!(!err.is_not_found());
        assert_eq!(err.server_message(), None);
        assert_eq!(err.to_string(), "API rejected request (400):   ");
    }
}
