//! Durable consent persistence for the Playgate gate.
//!
//! The store keeps exactly two string-valued key files, the affirmative
//! flag and an epoch-millis timestamp, under a common state dir:
//!
//!   Unix:    `$HOME/.playgate/state/`
//!   Windows: `%USERPROFILE%\.playgate\state\`
//!   Or override with `PLAYGATE_HOME`, which becomes `$PLAYGATE_HOME/state/`
//!
//! Both keys are cleared together on decline and on expiry detection, so
//! stale entries never accumulate. Storage faults are logged and collapse
//! to "not consented"; they never reach the caller.

pub mod consent;
pub mod kv;

pub use consent::{ConsentStore, FileConsentStore, CONSENT_FLAG_KEY, CONSENT_STAMP_KEY};
pub use kv::state_dir;
