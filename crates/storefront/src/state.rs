//! Application state shared across handlers.

use std::sync::Arc;

use crate::api::{ApiError, HttpShoutoutApi, ShoutoutApi};
use crate::config::StorefrontConfig;

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc` and provides access to
/// configuration and the shoutout API client.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: StorefrontConfig,
    api: Arc<dyn ShoutoutApi>,
}

impl AppState {
    /// Create application state backed by the HTTP API client.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(config: StorefrontConfig) -> Result<Self, ApiError> {
        let api = HttpShoutoutApi::new(&config.api)?;
        Ok(Self::with_api(config, Arc::new(api)))
    }

    /// Create application state with a specific API implementation.
    #[must_use]
    pub fn with_api(config: StorefrontConfig, api: Arc<dyn ShoutoutApi>) -> Self {
        Self {
            inner: Arc::new(AppStateInner { config, api }),
        }
    }

    /// Get a reference to the storefront configuration.
    #[must_use]
    pub fn config(&self) -> &StorefrontConfig {
        &self.inner.config
    }

    /// Get a reference to the shoutout API client.
    #[must_use]
    pub fn api(&self) -> &dyn ShoutoutApi {
        self.inner.api.as_ref()
    }
}
