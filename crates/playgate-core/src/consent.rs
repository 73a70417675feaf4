//! The visitor's consent decision and its expiry rule.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// How long an affirmative consent stays valid (days).
pub const CONSENT_TTL_DAYS: i64 = 365;

/// A recorded consent decision.
///
/// Only affirmative decisions are ever stored: declining erases the record
/// instead of remembering a "no", so the banner reappears on the next visit.
/// The record never leaves the visitor's machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsentRecord {
    /// Whether the visitor made an affirmative choice to accept.
    pub given: bool,
    /// Moment the choice was recorded.
    pub issued_at: DateTime<Utc>,
}

impl ConsentRecord {
    /// An affirmative consent stamped with the current time.
    #[must_use]
    pub fn granted_now() -> Self {
        Self {
            given: true,
            issued_at: Utc::now(),
        }
    }

    /// Build a record with an explicit issue time.
    #[must_use]
    pub fn issued(given: bool, issued_at: DateTime<Utc>) -> Self {
        Self { given, issued_at }
    }

    /// The expiry window applied to every record.
    #[must_use]
    pub fn ttl() -> Duration {
        Duration::days(CONSENT_TTL_DAYS)
    }

    /// Check validity against the current clock.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.is_valid_at(Utc::now())
    }

    /// Validity at an arbitrary instant: affirmative and younger than the
    /// expiry window.
    #[must_use]
    pub fn is_valid_at(&self, now: DateTime<Utc>) -> bool {
        self.given && now.signed_duration_since(self.issued_at) < Self::ttl()
    }

    /// Remaining lifetime, or `None` once expired.
    #[must_use]
    pub fn remaining(&self) -> Option<Duration> {
        let age = Utc::now().signed_duration_since(self.issued_at);
        let left = Self::ttl() - age;
        if left > Duration::zero() {
            Some(left)
        } else {
            None
        }
    }
}
