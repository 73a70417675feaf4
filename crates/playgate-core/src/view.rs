//! Render decision produced by the compliance gate, plus the content of the
//! two user-visible surfaces (block notice and consent banner).

use crate::state::ComplianceState;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The gate's three mutually exclusive outcomes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GateDecision {
    /// Jurisdiction is disallowed: block notice only, nothing else.
    Blocked,
    /// No valid consent on record: content plus a non-blocking banner.
    ConsentPending,
    /// Valid consent and no block: content only.
    Clear,
}

impl GateDecision {
    /// Derive the decision from the aggregate state.
    ///
    /// `geo_blocked` wins over any consent state.
    #[must_use]
    pub fn from_state(state: ComplianceState) -> Self {
        if state.geo_blocked {
            GateDecision::Blocked
        } else if state.consent_given {
            GateDecision::Clear
        } else {
            GateDecision::ConsentPending
        }
    }

    /// Whether the portal content may appear in the output at all.
    #[must_use]
    pub fn allows_content(&self) -> bool {
        !matches!(self, GateDecision::Blocked)
    }

    /// Whether the consent banner accompanies the content.
    #[must_use]
    pub fn shows_prompt(&self) -> bool {
        matches!(self, GateDecision::ConsentPending)
    }

    /// Human-readable action for logs and the CLI.
    #[must_use]
    pub fn action_text(&self) -> &'static str {
        match self {
            GateDecision::Blocked => "BLOCK",
            GateDecision::ConsentPending => "PROMPT",
            GateDecision::Clear => "CLEAR",
        }
    }
}

impl fmt::Display for GateDecision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.action_text())
    }
}

/// Content of the jurisdiction block screen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockNotice {
    pub title: String,
    pub body: String,
    pub support_hint: String,
}

impl BlockNotice {
    /// The standard notice shown to visitors from disallowed jurisdictions.
    #[must_use]
    pub fn jurisdiction() -> Self {
        Self {
            title: "Not available in your region".to_string(),
            body: "Online casino comparison content cannot be shown in your \
                   current jurisdiction due to local gambling regulations."
                .to_string(),
            support_hint: "If you believe this is an error, contact support."
                .to_string(),
        }
    }
}

/// Content of the cookie-consent banner.
///
/// The banner is informational: it overlays the page without blocking
/// interaction with the content underneath.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsentPrompt {
    pub message: String,
    pub accept_label: String,
    pub decline_label: String,
    pub policy_path: String,
}

impl ConsentPrompt {
    /// The standard cookie banner.
    #[must_use]
    pub fn cookie_banner() -> Self {
        Self {
            message: "We use cookies to analyse traffic and improve our casino \
                      comparisons. Accepting lets us remember your preferences \
                      for a year."
                .to_string(),
            accept_label: "Accept".to_string(),
            decline_label: "Decline".to_string(),
            policy_path: "/privacy-policy".to_string(),
        }
    }
}

/// The gate's typed output.
///
/// The blocked variant carries no content, so a blocked visitor cannot
/// receive the portal output even by accident; absence is structural, not
/// a matter of hiding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rendered<T> {
    /// Only the block notice; the content was never attached.
    Blocked(BlockNotice),
    /// Content with the consent banner appended after it.
    ConsentPending { content: T, prompt: ConsentPrompt },
    /// Content alone.
    Clear { content: T },
}

impl<T> Rendered<T> {
    /// The decision this output corresponds to.
    #[must_use]
    pub fn decision(&self) -> GateDecision {
        match self {
            Rendered::Blocked(_) => GateDecision::Blocked,
            Rendered::ConsentPending { .. } => GateDecision::ConsentPending,
            Rendered::Clear { .. } => GateDecision::Clear,
        }
    }

    /// Borrow the content, if any made it into the output.
    #[must_use]
    pub fn content(&self) -> Option<&T> {
        match self {
            Rendered::Blocked(_) => None,
            Rendered::ConsentPending { content, .. } | Rendered::Clear { content } => {
                Some(content)
            }
        }
    }

    /// Borrow the consent banner, if one is shown.
    #[must_use]
    pub fn prompt(&self) -> Option<&ConsentPrompt> {
        match self {
            Rendered::ConsentPending { prompt, .. } => Some(prompt),
            _ => None,
        }
    }

    #[must_use]
    pub fn allows_content(&self) -> bool {
        self.decision().allows_content()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state(consent_given: bool, geo_blocked: bool) -> ComplianceState {
        ComplianceState {
            consent_given,
            geo_blocked,
        }
    }

    #[test]
    fn decision_table_is_exhaustive() {
        assert_eq!(
            GateDecision::from_state(state(false, false)),
            GateDecision::ConsentPending
        );
        assert_eq!(
            GateDecision::from_state(state(true, false)),
            GateDecision::Clear
        );
        assert_eq!(
            GateDecision::from_state(state(false, true)),
            GateDecision::Blocked
        );
        // Blocked wins even with consent on record.
        assert_eq!(
            GateDecision::from_state(state(true, true)),
            GateDecision::Blocked
        );
    }

    #[test]
    fn blocked_output_has_no_content_or_prompt() {
        let rendered: Rendered<&str> = Rendered::Blocked(BlockNotice::jurisdiction());
        assert_eq!(rendered.decision(), GateDecision::Blocked);
        assert!(rendered.content().is_none());
        assert!(rendered.prompt().is_none());
        assert!(!rendered.allows_content());
    }

    #[test]
    fn pending_output_carries_content_and_prompt() {
        let rendered = Rendered::ConsentPending {
            content: "lobby",
            prompt: ConsentPrompt::cookie_banner(),
        };
        assert_eq!(rendered.content(), Some(&"lobby"));
        assert!(rendered.prompt().is_some());
        assert!(rendered.allows_content());
    }

    #[test]
    fn clear_output_has_content_only() {
        let rendered = Rendered::Clear { content: "lobby" };
        assert_eq!(rendered.content(), Some(&"lobby"));
        assert!(rendered.prompt().is_none());
    }

    #[test]
    fn decision_display_matches_action_text() {
        assert_eq!(GateDecision::Blocked.to_string(), "BLOCK");
        assert_eq!(GateDecision::ConsentPending.to_string(), "PROMPT");
        assert_eq!(GateDecision::Clear.to_string(), "CLEAR");
    }
}
