//! Compliance state controller: the single authority combining the consent
//! store and the jurisdiction probe.

use parking_lot::RwLock;
use playgate_core::ComplianceState;
use playgate_geo::GeoProbe;
use playgate_store::ConsentStore;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::{debug, warn};

/// Unifies consent + geo state and owns the two lifecycle transitions
/// (hydration, geo check). One controller per application root, injected
/// into whatever consumes it.
pub struct ComplianceController {
    state: RwLock<ComplianceState>,
    store: Arc<dyn ConsentStore>,
    probe: Arc<dyn GeoProbe>,
    hydrated: AtomicBool,
    geo_check_started: AtomicBool,
}

impl ComplianceController {
    /// Controller in the permissive pre-hydration state.
    ///
    /// Safe to build during server rendering: the defaults can only cause
    /// a consent prompt, never a block, and the store is not touched until
    /// [`hydrate`](Self::hydrate) confirms the interactive environment.
    #[must_use]
    pub fn server_default(store: Arc<dyn ConsentStore>, probe: Arc<dyn GeoProbe>) -> Arc<Self> {
        Arc::new(Self {
            state: RwLock::new(ComplianceState::permissive()),
            store,
            probe,
            hydrated: AtomicBool::new(false),
            geo_check_started: AtomicBool::new(false),
        })
    }

    /// Snapshot of the current aggregate state.
    #[must_use]
    pub fn state(&self) -> ComplianceState {
        *self.state.read()
    }

    #[must_use]
    pub fn is_hydrated(&self) -> bool {
        self.hydrated.load(Ordering::SeqCst)
    }

    /// Fold the persisted consent decision into state.
    ///
    /// Call once the runtime is confirmed interactive; this is the only
    /// place the store is ever read, and it runs at most once per
    /// controller. Later calls are no-ops.
    pub fn hydrate(&self) {
        if self.hydrated.swap(true, Ordering::SeqCst) {
            debug!("hydrate called again; ignoring");
            return;
        }

        let consent_given = self.store.load().map(|r| r.given).unwrap_or(false);
        self.state.write().consent_given = consent_given;
        debug!(consent_given, "controller hydrated");
    }

    /// Run the jurisdiction check and fold the verdict into state.
    ///
    /// Faults are logged and ignored: the prior verdict stands (fail-open).
    pub async fn check_compliance(&self) {
        match self.probe.fetch_status().await {
            Ok(status) => {
                debug!(blocked = status.blocked, "compliance check resolved");
                self.set_geo_blocked(status.blocked);
            }
            Err(err) => {
                debug!(%err, "compliance check failed; keeping prior verdict");
            }
        }
    }

    /// Fire-and-forget wrapper around [`check_compliance`](Self::check_compliance)
    /// that runs at most once per controller lifetime. The gate calls this
    /// on mount; rendering never waits for it.
    pub fn trigger_geo_check(self: &Arc<Self>) {
        if self.geo_check_started.swap(true, Ordering::SeqCst) {
            debug!("geo check already triggered; ignoring");
            return;
        }

        let ctrl = Arc::clone(self);
        match tokio::runtime::Handle::try_current() {
            Ok(handle) => {
                handle.spawn(async move { ctrl.check_compliance().await });
            }
            Err(_) => {
                warn!("no async runtime; compliance check skipped (fail-open)");
            }
        }
    }

    /// Record the visitor's consent choice.
    ///
    /// The in-memory state updates synchronously so the caller sees the new
    /// state immediately; persistence happens off the caller's path and is
    /// not awaited.
    pub fn set_consent_given(&self, given: bool) {
        self.state.write().consent_given = given;

        let store = Arc::clone(&self.store);
        match tokio::runtime::Handle::try_current() {
            Ok(handle) => {
                handle.spawn_blocking(move || store.save(given));
            }
            Err(_) => store.save(given),
        }
    }

    /// Adopt a jurisdiction verdict. Memory-only: the verdict is recomputed
    /// on every load and never persisted.
    pub fn set_geo_blocked(&self, blocked: bool) {
        self.state.write().geo_blocked = blocked;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use parking_lot::Mutex;
    use playgate_core::{ConsentRecord, GateError, GeoComplianceStatus};
    use std::sync::atomic::AtomicUsize;

    /// In-memory store that counts loads.
    #[derive(Default)]
    struct MemStore {
        record: Mutex<Option<ConsentRecord>>,
        loads: AtomicUsize,
    }

    impl ConsentStore for MemStore {
        fn load(&self) -> Option<ConsentRecord> {
            self.loads.fetch_add(1, Ordering::SeqCst);
            *self.record.lock()
        }

        fn save(&self, given: bool) {
            *self.record.lock() = given.then(ConsentRecord::granted_now);
        }
    }

    /// Probe with a fixed outcome that counts fetches.
    struct StubProbe {
        blocked: Option<bool>,
        fetches: AtomicUsize,
    }

    impl StubProbe {
        fn verdict(blocked: bool) -> Self {
            Self {
                blocked: Some(blocked),
                fetches: AtomicUsize::new(0),
            }
        }

        fn failing() -> Self {
            Self {
                blocked: None,
                fetches: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl GeoProbe for StubProbe {
        async fn fetch_status(&self) -> playgate_core::Result<GeoComplianceStatus> {
            self.fetches.fetch_add(1, Ordering::SeqCst);
            match self.blocked {
                Some(blocked) => Ok(GeoComplianceStatus { blocked }),
                None => Err(GateError::Endpoint("connection refused".into())),
            }
        }
    }

    fn controller(
        store: Arc<MemStore>,
        probe: Arc<StubProbe>,
    ) -> Arc<ComplianceController> {
        ComplianceController::server_default(store, probe)
    }

    #[test]
    fn server_default_is_permissive() {
        let ctrl = controller(Arc::default(), Arc::new(StubProbe::verdict(false)));
        assert_eq!(ctrl.state(), ComplianceState::permissive());
        assert!(!ctrl.is_hydrated());
    }

    #[test]
    fn hydrate_loads_exactly_once() {
        let store = Arc::new(MemStore::default());
        store.save(true);

        let ctrl = controller(Arc::clone(&store), Arc::new(StubProbe::verdict(false)));
        ctrl.hydrate();
        ctrl.hydrate();
        ctrl.hydrate();

        assert!(ctrl.is_hydrated());
        assert!(ctrl.state().consent_given);
        assert_eq!(store.loads.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn store_is_untouched_before_hydration() {
        let store = Arc::new(MemStore::default());
        let ctrl = controller(Arc::clone(&store), Arc::new(StubProbe::verdict(false)));

        let _ = ctrl.state();
        ctrl.set_geo_blocked(true);
        assert_eq!(store.loads.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn check_adopts_blocked_verdict() {
        let ctrl = controller(Arc::default(), Arc::new(StubProbe::verdict(true)));
        ctrl.check_compliance().await;
        assert!(ctrl.state().geo_blocked);
    }

    #[tokio::test]
    async fn check_failure_fails_open() {
        let ctrl = controller(Arc::default(), Arc::new(StubProbe::failing()));
        ctrl.check_compliance().await;
        assert!(!ctrl.state().geo_blocked);
    }

    #[tokio::test]
    async fn check_failure_keeps_an_earlier_block() {
        let ctrl = controller(Arc::default(), Arc::new(StubProbe::failing()));
        ctrl.set_geo_blocked(true);
        ctrl.check_compliance().await;
        assert!(ctrl.state().geo_blocked);
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn trigger_runs_the_probe_at_most_once() {
        let probe = Arc::new(StubProbe::verdict(false));
        let ctrl = controller(Arc::default(), Arc::clone(&probe));

        ctrl.trigger_geo_check();
        ctrl.trigger_geo_check();
        ctrl.trigger_geo_check();

        // Give the spawned task time to finish.
        for _ in 0..50 {
            if probe.fetches.load(Ordering::SeqCst) > 0 {
                break;
            }
            tokio::time::sleep(std::time::Duration::from_millis(10)).await;
        }
        assert_eq!(probe.fetches.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn consent_choice_is_visible_immediately_and_persisted_eventually() {
        let store = Arc::new(MemStore::default());
        let ctrl = controller(Arc::clone(&store), Arc::new(StubProbe::verdict(false)));

        ctrl.set_consent_given(true);
        assert!(ctrl.state().consent_given);

        for _ in 0..50 {
            if store.record.lock().is_some() {
                break;
            }
            tokio::time::sleep(std::time::Duration::from_millis(10)).await;
        }
        assert!(store.record.lock().expect("persisted").given);
    }

    #[test]
    fn consent_choice_persists_without_a_runtime() {
        let store = Arc::new(MemStore::default());
        let ctrl = controller(Arc::clone(&store), Arc::new(StubProbe::verdict(false)));

        ctrl.set_consent_given(true);
        assert!(store.record.lock().is_some());

        ctrl.set_consent_given(false);
        assert!(store.record.lock().is_none());
    }
}
