//! Aggregate compliance state and the compliance endpoint payload.

use serde::{Deserialize, Serialize};

/// The single source of truth consumed by the gate.
///
/// `geo_blocked` always takes precedence: a blocked visitor sees only the
/// block screen regardless of consent history.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComplianceState {
    /// Whether a valid affirmative consent is on record.
    pub consent_given: bool,
    /// Whether this session's jurisdiction is disallowed.
    pub geo_blocked: bool,
}

impl ComplianceState {
    /// The permissive pre-hydration default.
    ///
    /// `consent_given: false` is safe because it only triggers a prompt,
    /// never a block; `geo_blocked: false` is the optimistic starting point
    /// while verification is in flight.
    #[must_use]
    pub const fn permissive() -> Self {
        Self {
            consent_given: false,
            geo_blocked: false,
        }
    }
}

/// Payload returned by the compliance endpoint.
///
/// A missing `blocked` field means "not blocked": the endpoint only has to
/// say something when it wants the session stopped.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeoComplianceStatus {
    #[serde(default)]
    pub blocked: bool,
}
