//! Playgate core: data model and gating rules for the compliance gate
//! of a casino comparison portal.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────┐
//! │  Consent Store  │  ← durable flag + timestamp, 365-day shelf life
//! └────────┬────────┘
//!          │ load() once, after hydration
//!          ▼
//! ┌─────────────────┐      ┌─────────────────┐
//! │   Controller    │ ◄──  │   Geo Probe     │  ← one GET per lifecycle
//! │ (state authority)│      │ (fail-open)     │
//! └────────┬────────┘      └─────────────────┘
//!          │ ComplianceState
//!          ▼
//! ┌─────────────────┐
//! │ Compliance Gate │  → Blocked | ConsentPending | Clear
//! └─────────────────┘
//! ```
//!
//! This crate holds the pure pieces: the consent record and its expiry rule,
//! the aggregate state, and the deterministic render decision. Persistence
//! lives in `playgate-store`, the jurisdiction probe in `playgate-geo`, and
//! the controller/gate pair in `playgate-gate`.

pub mod consent;
pub mod state;
pub mod view;

pub use consent::{ConsentRecord, CONSENT_TTL_DAYS};
pub use state::{ComplianceState, GeoComplianceStatus};
pub use view::{BlockNotice, ConsentPrompt, GateDecision, Rendered};

use thiserror::Error;

/// Errors from gate infrastructure operations.
///
/// None of these ever reach the visitor: storage faults collapse to "not
/// consented", endpoint faults leave the previous jurisdiction verdict in
/// place. They exist so the fault can be logged with a reason.
#[derive(Debug, Error)]
pub enum GateError {
    #[error("storage fault: {0}")]
    Storage(String),
    #[error("compliance endpoint fault: {0}")]
    Endpoint(String),
    #[error("malformed compliance response: {0}")]
    MalformedResponse(String),
    #[error("configuration fault: {0}")]
    Config(String),
}

impl From<std::io::Error> for GateError {
    fn from(e: std::io::Error) -> Self {
        GateError::Storage(e.to_string())
    }
}

/// Result type for gate operations.
pub type Result<T> = std::result::Result<T, GateError>;
