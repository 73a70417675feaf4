//! Playgate compliance gate
//!
//! Wraps the portal behind one pass/fail authority: consent management
//! (cookie consent with a 365-day shelf life) and geo-blocking (restricting
//! access by jurisdiction).
//!
//! # Lifecycle
//!
//! ```text
//! ┌──────────────────┐
//! │  server default  │  ← permissive: prompt-only consequences
//! └────────┬─────────┘
//!          │ hydrate()          exactly once, after the interactive
//!          ▼                    environment is confirmed
//! ┌──────────────────┐
//! │    hydrated      │  ← one ConsentStore::load(), folded into state
//! └────────┬─────────┘
//!          │ mount() → trigger_geo_check()   fire-and-forget, at most once
//!          ▼
//! ┌──────────────────┐
//! │   geo-checked    │  ← verdict adopted verbatim; faults fail open
//! └──────────────────┘
//! ```
//!
//! State is scoped to one application lifetime and rebuilt from scratch on
//! every fresh load. The controller is constructed once per application root
//! and passed down explicitly; nothing here relies on ambient lookup.

pub mod controller;
pub mod gate;

pub use controller::ComplianceController;
pub use gate::ComplianceGate;
