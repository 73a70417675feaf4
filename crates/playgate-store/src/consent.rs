//! The consent store: two durable keys with a 365-day shelf life.

use crate::kv;
use chrono::{DateTime, Utc};
use playgate_core::ConsentRecord;
use std::io;
use std::path::PathBuf;
use tracing::{debug, warn};

/// Key holding the boolean-as-string affirmative flag.
pub const CONSENT_FLAG_KEY: &str = "consent.given";
/// Key holding the epoch-millis issue timestamp.
pub const CONSENT_STAMP_KEY: &str = "consent.issued_at";

/// Durable, expiring storage of one consent decision.
///
/// Implementations must never propagate a storage fault: reads collapse to
/// `None` ("not consented") and writes log the fault and return.
pub trait ConsentStore: Send + Sync {
    /// Read the persisted decision. Expired or garbled entries are erased
    /// as a side effect and reported as absent.
    fn load(&self) -> Option<ConsentRecord>;

    /// Persist an affirmative decision with a fresh timestamp, or erase
    /// everything on decline.
    fn save(&self, given: bool);
}

/// File-backed consent store rooted at a state directory.
#[derive(Debug, Clone)]
pub struct FileConsentStore {
    root: PathBuf,
}

impl FileConsentStore {
    /// Store rooted at an explicit directory (tests use tempdirs).
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Store rooted at the production state dir.
    #[must_use]
    pub fn open_default() -> Self {
        Self::new(kv::state_dir())
    }

    #[must_use]
    pub fn root(&self) -> &std::path::Path {
        &self.root
    }

    /// Erase both keys. Both or neither: a half-cleared pair would read as
    /// garbled and be cleared on the next load anyway.
    fn clear(&self) -> io::Result<()> {
        kv::remove_key(&self.root, CONSENT_FLAG_KEY)?;
        kv::remove_key(&self.root, CONSENT_STAMP_KEY)
    }

    fn persist(&self, record: &ConsentRecord) -> io::Result<()> {
        kv::write_key(&self.root, CONSENT_FLAG_KEY, "true")?;
        kv::write_key(
            &self.root,
            CONSENT_STAMP_KEY,
            &record.issued_at.timestamp_millis().to_string(),
        )
    }

    /// Parse the two keys into a record. `None` means absent or garbled;
    /// garbled entries are cleared so they are not re-parsed every read.
    fn read_record(&self) -> Option<ConsentRecord> {
        let flag = kv::read_key(&self.root, CONSENT_FLAG_KEY)?;
        if flag != "true" {
            warn!(%flag, "unexpected consent flag value; clearing");
            self.clear_logged();
            return None;
        }

        let stamp = match kv::read_key(&self.root, CONSENT_STAMP_KEY) {
            Some(s) => s,
            None => {
                warn!("consent flag present without timestamp; clearing");
                self.clear_logged();
                return None;
            }
        };

        let millis: i64 = match stamp.parse() {
            Ok(ms) => ms,
            Err(_) => {
                warn!(%stamp, "unparseable consent timestamp; clearing");
                self.clear_logged();
                return None;
            }
        };

        let issued_at = match DateTime::<Utc>::from_timestamp_millis(millis) {
            Some(ts) => ts,
            None => {
                warn!(millis, "consent timestamp out of range; clearing");
                self.clear_logged();
                return None;
            }
        };
        Some(ConsentRecord::issued(true, issued_at))
    }

    fn clear_logged(&self) {
        if let Err(err) = self.clear() {
            warn!(%err, "failed to clear consent keys");
        }
    }
}

impl ConsentStore for FileConsentStore {
    fn load(&self) -> Option<ConsentRecord> {
        let record = self.read_record()?;
        if record.is_valid() {
            debug!("loaded valid consent record");
            return Some(record);
        }

        // Expired: erase now so later reads don't have to re-validate it.
        debug!("stored consent expired; clearing");
        self.clear_logged();
        None
    }

    fn save(&self, given: bool) {
        let result = if given {
            self.persist(&ConsentRecord::granted_now())
        } else {
            self.clear()
        };
        if let Err(err) = result {
            warn!(%err, given, "consent save failed; treating as not consented");
        }
    }
}
