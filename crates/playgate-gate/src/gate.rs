//! The compliance gate: deterministic render decision plus the visitor's
//! accept/decline entry points.

use crate::controller::ComplianceController;
use playgate_core::{BlockNotice, ConsentPrompt, GateDecision, Rendered};
use std::sync::Arc;
use tracing::info;

/// Wraps the whole portal: either blocks rendering entirely (disallowed
/// jurisdiction) or passes the content through, with a consent banner while
/// no valid consent is on record.
pub struct ComplianceGate {
    controller: Arc<ComplianceController>,
}

impl ComplianceGate {
    #[must_use]
    pub fn new(controller: Arc<ComplianceController>) -> Self {
        Self { controller }
    }

    #[must_use]
    pub fn controller(&self) -> &Arc<ComplianceController> {
        &self.controller
    }

    /// The mount transition: the runtime is now confirmed interactive, so
    /// hydrate the controller and fire the one jurisdiction check. Neither
    /// step blocks rendering; both are idempotent across repeated mounts.
    pub fn mount(&self) {
        self.controller.hydrate();
        self.controller.trigger_geo_check();
    }

    /// Current decision without rendering anything.
    #[must_use]
    pub fn decision(&self) -> GateDecision {
        GateDecision::from_state(self.controller.state())
    }

    /// Turn the portal content into the gate's output.
    ///
    /// A blocked visitor gets only the notice; `content` is dropped here,
    /// not hidden downstream.
    #[must_use]
    pub fn render<T>(&self, content: T) -> Rendered<T> {
        match self.decision() {
            GateDecision::Blocked => Rendered::Blocked(BlockNotice::jurisdiction()),
            GateDecision::ConsentPending => Rendered::ConsentPending {
                content,
                prompt: ConsentPrompt::cookie_banner(),
            },
            GateDecision::Clear => Rendered::Clear { content },
        }
    }

    /// The visitor accepted the consent banner.
    pub fn accept(&self) {
        info!("visitor accepted consent");
        self.controller.set_consent_given(true);
    }

    /// The visitor declined. Declining forgets rather than remembers, so
    /// the banner returns on the next visit.
    pub fn decline(&self) {
        info!("visitor declined consent");
        self.controller.set_consent_given(false);
    }
}
