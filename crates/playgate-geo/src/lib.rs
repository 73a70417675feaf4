//! Jurisdiction verification for the Playgate gate.
//!
//! One GET per page lifecycle against the portal's compliance endpoint,
//! requesting no cached response. The probe fails open: any transport,
//! status, or parse fault is reported as an error the controller logs and
//! ignores, leaving the prior verdict in place. A transient outage must not
//! lock out legitimate visitors.

pub mod config;
pub mod probe;

pub use config::GateConfig;
pub use probe::{GeoProbe, HttpGeoProbe};
