//! Gate configuration loader.
//!
//! Reads `$PLAYGATE_HOME/config.toml` (else `~/.playgate/config.toml`).
//! Every field is optional with a hard default; a missing or unparseable
//! file silently falls back to defaults.

use serde::Deserialize;
use std::fs;
use std::path::PathBuf;

/// Endpoint used when no configuration overrides it: the local portal
/// dev server's compliance route.
pub const DEFAULT_COMPLIANCE_ENDPOINT: &str = "http://127.0.0.1:8080/api/compliance-check";

#[derive(Debug, Deserialize, Clone)]
pub struct GateConfig {
    /// Compliance-check URL override.
    pub compliance_endpoint: Option<String>,
    /// Whether to enable verbose debug
    pub debug: Option<bool>,
}

impl Default for GateConfig {
    fn default() -> Self {
        Self {
            compliance_endpoint: Some(DEFAULT_COMPLIANCE_ENDPOINT.to_string()),
            debug: Some(false),
        }
    }
}

impl GateConfig {
    /// Returns `~/.playgate/config.toml` (or `$PLAYGATE_HOME/config.toml` if set)
    fn default_path() -> PathBuf {
        if let Ok(home) = std::env::var("PLAYGATE_HOME") {
            return PathBuf::from(home).join("config.toml");
        }
        let mut p = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
        p.push(".playgate");
        p.push("config.toml");
        p
    }

    /// Load config from file if it exists, otherwise return defaults.
    #[must_use]
    pub fn load() -> Self {
        let path = Self::default_path();
        if !path.exists() {
            return Self::default();
        }
        match fs::read_to_string(&path) {
            Ok(txt) => toml::from_str(&txt).unwrap_or_else(|_| Self::default()),
            Err(_) => Self::default(),
        }
    }

    /// The endpoint to probe, falling back to the default route.
    #[must_use]
    pub fn endpoint(&self) -> &str {
        self.compliance_endpoint
            .as_deref()
            .unwrap_or(DEFAULT_COMPLIANCE_ENDPOINT)
    }
}
