//! Cache types for read-only API lookups.

use std::sync::Arc;

use super::types::{Campaign, ProfileData};

/// Cache key for profiles and campaigns.
#[derive(Debug, Clone, Hash, PartialEq, Eq)]
pub enum CacheKey {
    Profile(String),
    Campaign(i64),
}

/// Cached value types.
#[derive(Debug, Clone)]
pub enum CacheValue {
    Profile(Arc<ProfileData>),
    Campaign(Arc<Campaign>),
}
