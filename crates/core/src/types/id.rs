//! Newtype IDs for type-safe entity references.
//!
//! Use the `define_id!` macro to create type-safe ID wrappers that prevent
//! accidentally mixing IDs from different entity types.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Macro to define a type-safe numeric ID wrapper.
///
/// Creates a newtype wrapper around `i64` with:
/// - `Serialize`/`Deserialize` with `#[serde(transparent)]`
/// - `Debug`, `Clone`, `Copy`, `PartialEq`, `Eq`, `Hash`
/// - Conversion methods: `new()`, `as_i64()`
/// - `From<i64>`, `Into<i64>` and `Display`
///
/// # Example
///
/// ```rust
/// # use shoutout_core::define_id;
/// define_id!(CreatorId);
/// define_id!(CampaignId);
///
/// let creator_id = CreatorId::new(1);
/// let campaign_id = CampaignId::new(1);
///
/// // These are different types, so this won't compile:
/// // let _: CreatorId = campaign_id;
/// ```
#[macro_export]
macro_rules! define_id {
    ($name:ident) => {
        #[derive(
            Debug,
            Clone,
            Copy,
            PartialEq,
            Eq,
            Hash,
            ::serde::Serialize,
            ::serde::Deserialize
        )]
        #[serde(transparent)]
        pub struct $name(i64);

        impl $name {
            /// Create a new ID from an i64 value.
            #[must_use]
            pub const fn new(id: i64) -> Self {
                Self(id)
            }

            /// Get the underlying i64 value.
            #[must_use]
            pub const fn as_i64(&self) -> i64 {
                self.0
            }
        }

        impl From<i64> for $name {
            fn from(id: i64) -> Self {
                Self(id)
            }
        }

        impl From<$name> for i64 {
            fn from(id: $name) -> Self {
                id.0
            }
        }

        impl ::core::fmt::Display for $name {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl ::core::str::FromStr for $name {
            type Err = ::core::num::ParseIntError;

            fn from_str(s: &str) -> ::core::result::Result<Self, Self::Err> {
                s.parse::<i64>().map(Self)
            }
        }
    };
}

define_id!(CreatorId);
define_id!(CampaignId);
define_id!(OrderId);

/// Identifier of a shoutout option in a creator's catalog.
///
/// The API hands these out as opaque strings (numeric price-option IDs of a
/// campaign are stringified into the same space).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ShoutoutOptionId(String);

impl ShoutoutOptionId {
    /// Create a new option ID.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the ID as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ShoutoutOptionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<i64> for ShoutoutOptionId {
    fn from(id: i64) -> Self {
        Self(id.to_string())
    }
}

/// Human-facing order number (e.g. `SHT-2025-000123`).
///
/// Order numbers come from route parameters, so they are restricted to a
/// conservative character set before being interpolated into API paths.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderNumber(String);

impl OrderNumber {
    /// Maximum accepted length of an order number.
    pub const MAX_LENGTH: usize = 64;

    /// Parse an order number from a route parameter.
    ///
    /// Returns `None` for empty, overlong, or non-alphanumeric input
    /// (dashes and underscores are allowed).
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim();
        if s.is_empty() || s.len() > Self::MAX_LENGTH {
            return None;
        }
        s.chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
            .then(|| Self(s.to_owned()))
    }

    /// Returns the order number as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for OrderNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A creator's public handle, as used in profile URLs.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Username(String);

impl Username {
    /// Maximum accepted length of a username.
    pub const MAX_LENGTH: usize = 64;

    /// Parse a username from a route parameter.
    ///
    /// Accepts ASCII letters, digits, `.`, `_` and `-`. A leading `@` is
    /// stripped so that `/@lisa` and `/lisa` resolve to the same creator.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim();
        let s = s.strip_prefix('@').unwrap_or(s);
        if s.is_empty() || s.len() > Self::MAX_LENGTH || s.starts_with('.') {
            return None;
        }
        s.chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-'))
            .then(|| Self(s.to_owned()))
    }

    /// Returns the username as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_numeric_id_roundtrip_through_json() {
        let id: CreatorId = serde_json::from_str("42").unwrap();
        assert_eq!(id, CreatorId::new(42));
        assert_eq!(serde_json::to_string(&id).unwrap(), "42");
    }

    #[test]
    fn test_numeric_id_from_route_segment() {
        let id: CampaignId = "17".parse().unwrap();
        assert_eq!(id.as_i64(), 17);
        assert!("abc".parse::<CampaignId>().is_err());
    }

    #[test]
    fn test_option_id_from_price_option() {
        let id = ShoutoutOptionId::from(7);
        assert_eq!(id.as_str(), "7");
    }

    #[test]
    fn test_order_number_accepts_typical_formats() {
        assert!(OrderNumber::parse("SHT-2025-000123").is_some());
        assert!(OrderNumber::parse("ABC123XYZ").is_some());
        assert_eq!(OrderNumber::parse("  SHT1  ").unwrap().as_str(), "SHT1");
    }

    #[test]
    fn test_order_number_rejects_path_tricks() {
        assert!(OrderNumber::parse("").is_none());
        assert!(OrderNumber::parse("../admin").is_none());
        assert!(OrderNumber::parse("a/b").is_none());
        assert!(OrderNumber::parse(&"A".repeat(65)).is_none());
    }

    #[test]
    fn test_username_parse() {
        assert_eq!(Username::parse("lisa.mueller").unwrap().as_str(), "lisa.mueller");
        assert_eq!(Username::parse("@max_99").unwrap().as_str(), "max_99");
        assert!(Username::parse("").is_none());
        assert!(Username::parse("..").is_none());
        assert!(Username::parse("favicon ico").is_none());
        assert!(Username::parse("a/b").is_none());
    }
}
