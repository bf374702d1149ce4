//! Shoutout catalog rules: kinds, durations and availability.

use serde::{Deserialize, Serialize};

/// What the buyer hands the creator: an exact script, or a creative brief.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ShoutoutKind {
    /// The creator reads the buyer's script verbatim.
    Script,
    /// The creator improvises from the buyer's brief.
    #[default]
    Creative,
}

impl ShoutoutKind {
    /// Wire value (`script` / `creative`).
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Script => "script",
            Self::Creative => "creative",
        }
    }
}

/// Short duration label used on profile cards and the order form.
///
/// ```
/// use shoutout_core::shoutout::format_duration;
///
/// assert_eq!(format_duration(30), "30 Sek");
/// assert_eq!(format_duration(90), "1:30 Min");
/// assert_eq!(format_duration(120), "2 Min");
/// ```
#[must_use]
pub fn format_duration(seconds: u32) -> String {
    if seconds < 60 {
        return format!("{seconds} Sek");
    }
    let minutes = seconds / 60;
    let rest = seconds % 60;
    if rest > 0 {
        format!("{minutes}:{rest:02} Min")
    } else {
        format!("{minutes} Min")
    }
}

/// Long duration label used on the campaign page.
#[must_use]
pub fn format_duration_long(seconds: u32) -> String {
    if seconds < 60 {
        return format!("{seconds} Sekunden");
    }
    let minutes = seconds / 60;
    let rest = seconds % 60;
    match (minutes, rest) {
        (1, 0) => "1 Minute".to_string(),
        (m, 0) => format!("{m} Minuten"),
        (m, r) => format!("{m}:{r:02} Minuten"),
    }
}

/// Coarse availability of a creator's shoutouts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AvailabilityState {
    /// The creator has switched shoutouts off.
    Inactive,
    /// No capacity limit.
    Unlimited,
    /// Limited capacity with this many slots left.
    Limited(u32),
    /// Limited capacity, none left.
    SoldOut,
}

/// Availability status derived from a creator's shoutout settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Availability {
    pub state: AvailabilityState,
}

impl Availability {
    /// Compute availability from the raw settings.
    ///
    /// `max_quantity` is the remaining capacity as the API reports it (a
    /// numeric string); missing or unparsable values count as zero.
    #[must_use]
    pub fn from_settings(active: bool, unlimited: bool, max_quantity: Option<&str>) -> Self {
        let remaining = max_quantity
            .and_then(|q| q.trim().parse::<i64>().ok())
            .unwrap_or(0);
        Self::from_capacity(active, unlimited, remaining)
    }

    /// Compute availability from an already-known remaining capacity.
    ///
    /// Campaigns report a limit and a sold count; pass `limit - sold`.
    #[must_use]
    pub fn from_capacity(active: bool, unlimited: bool, remaining: i64) -> Self {
        let state = if !active {
            AvailabilityState::Inactive
        } else if unlimited {
            AvailabilityState::Unlimited
        } else {
            match u32::try_from(remaining) {
                Ok(n) if n > 0 => AvailabilityState::Limited(n),
                _ => AvailabilityState::SoldOut,
            }
        };
        Self { state }
    }

    /// Short status ("Verfügbar", "Ausverkauft", ...).
    #[must_use]
    pub const fn status(&self) -> &'static str {
        match self.state {
            AvailabilityState::Inactive => "Nicht verfügbar",
            AvailabilityState::Unlimited | AvailabilityState::Limited(_) => "Verfügbar",
            AvailabilityState::SoldOut => "Ausverkauft",
        }
    }

    /// Longer explanation shown beneath the status.
    #[must_use]
    pub fn message(&self) -> String {
        match self.state {
            AvailabilityState::Inactive => "Shoutouts sind derzeit nicht verfügbar".to_string(),
            AvailabilityState::Unlimited => "Unbegrenzt verfügbar".to_string(),
            AvailabilityState::Limited(n) => format!("{n} Plätze verfügbar"),
            AvailabilityState::SoldOut => "Alle Plätze belegt".to_string(),
        }
    }

    /// CSS tone for the status badge.
    #[must_use]
    pub const fn tone(&self) -> &'static str {
        match self.state {
            AvailabilityState::Inactive => "neutral",
            AvailabilityState::Unlimited | AvailabilityState::Limited(_) => "success",
            AvailabilityState::SoldOut => "danger",
        }
    }

    /// Remaining slots, `None` when unbounded or inactive.
    #[must_use]
    pub const fn remaining(&self) -> Option<u32> {
        match self.state {
            AvailabilityState::Limited(n) => Some(n),
            AvailabilityState::SoldOut => Some(0),
            AvailabilityState::Inactive | AvailabilityState::Unlimited => None,
        }
    }

    /// Whether new orders can be placed.
    #[must_use]
    pub const fn is_orderable(&self) -> bool {
        matches!(
            self.state,
            AvailabilityState::Unlimited | AvailabilityState::Limited(_)
        )
    }
}
