//! Seat hold value objects.
//!
//! A hold is immutable once constructed: its seat list and expiry never
//! change. Failed holds carry only a failure description and are never
//! stored.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Identifier for a live hold.
///
/// Unique among live holds; the ticket manager enforces uniqueness when
/// the hold is inserted into the repository.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HoldId(pub u64);

impl fmt::Display for HoldId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for HoldId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse().map(Self)
    }
}

impl From<u64> for HoldId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

impl From<HoldId> for u64 {
    fn from(id: HoldId) -> u64 {
        id.0
    }
}

/// A temporary claim on specific seats, confirmable until `expires_at`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SuccessfulHold {
    /// Identifier the customer presents to confirm the hold.
    pub hold_id: HoldId,
    /// The held seat numbers, best first. Fixed at creation.
    pub seats: Vec<u32>,
    /// Instant at and after which the hold can no longer be confirmed.
    pub expires_at: DateTime<Utc>,
}

impl SuccessfulHold {
    /// Creates a hold over the given seats.
    pub fn new(hold_id: HoldId, seats: Vec<u32>, expires_at: DateTime<Utc>) -> Self {
        Self {
            hold_id,
            seats,
            expires_at,
        }
    }

    /// Whether this hold is expired as of `now`. The expiry instant itself
    /// counts as expired.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }
}

/// Outcome of a hold request.
///
/// Matched explicitly by callers; a failed request is a normal value, not
/// a fault.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SeatHold {
    /// Seats were found and are now held.
    Held(SuccessfulHold),
    /// No hold was created.
    Failed {
        /// Human-readable description of why the request failed.
        reason: String,
    },
}

impl SeatHold {
    /// Creates a failed outcome with the given reason.
    pub fn failed(reason: impl Into<String>) -> Self {
        Self::Failed {
            reason: reason.into(),
        }
    }

    /// Whether this outcome is a failure.
    pub fn is_failed(&self) -> bool {
        matches!(self, Self::Failed { .. })
    }

    /// The successful hold, if any.
    pub fn as_held(&self) -> Option<&SuccessfulHold> {
        match self {
            Self::Held(hold) => Some(hold),
            Self::Failed { .. } => None,
        }
    }

    /// The failure reason, if any.
    pub fn failure_reason(&self) -> Option<&str> {
        match self {
            Self::Failed { reason } => Some(reason),
            Self::Held(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_hold_id_display_and_parse() {
        let id = HoldId(42);
        assert_eq!(id.to_string(), "42");
        let parsed: HoldId = "42".parse().expect("should parse");
        assert_eq!(parsed, id);
    }

    #[test]
    fn test_expiry_boundary_is_inclusive() {
        let now = Utc::now();
        let hold = SuccessfulHold::new(HoldId(1), vec![1, 2, 3], now);
        assert!(hold.is_expired_at(now));
        assert!(hold.is_expired_at(now + Duration::seconds(1)));
        assert!(!hold.is_expired_at(now - Duration::seconds(1)));
    }

    #[test]
    fn test_outcome_accessors() {
        let now = Utc::now();
        let held = SeatHold::Held(SuccessfulHold::new(HoldId(7), vec![1], now));
        assert!(!held.is_failed());
        assert_eq!(held.as_held().map(|h| h.hold_id), Some(HoldId(7)));
        assert_eq!(held.failure_reason(), None);

        let failed = SeatHold::failed("numSeats must be > 0");
        assert!(failed.is_failed());
        assert!(failed.as_held().is_none());
        assert_eq!(failed.failure_reason(), Some("numSeats must be > 0"));
    }

    #[test]
    fn test_serde_roundtrip() {
        let hold = SuccessfulHold::new(HoldId(9), vec![2, 4, 5], Utc::now());
        let json = serde_json::to_string(&SeatHold::Held(hold.clone())).expect("serialize");
        let parsed: SeatHold = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(parsed.as_held(), Some(&hold));
    }
}
