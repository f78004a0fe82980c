use crate::{
    lookup::{errors::LookupError, Inspector},
    registry::KeyValueStore,
    types::AccountInfo,
};
use providers::Connector;
use serde::Serialize;
use std::sync::{Mutex, MutexGuard, PoisonError};

#[derive(Serialize, Clone, Debug, Default, PartialEq, Eq)]
#[serde(tag = "state", content = "info", rename_all = "camelCase")]
pub enum ViewState {
    #[default]
    Idle,
    Loading,
    Loaded(AccountInfo),
}

#[derive(Serialize, Clone, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ViewSnapshot {
    #[serde(flatten)]
    pub state: ViewState,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notification: Option<String>,
}

/// Presentation state of the lookup page.
///
/// Every submission gets a new generation; only the latest one may change
/// the state, so an older lookup finishing late is dropped.
#[derive(Default)]
pub struct ViewModel {
    state: ViewState,
    notification: Option<String>,
    generation: u64,
}

impl ViewModel {
    pub fn state(&self) -> &ViewState {
        &self.state
    }

    pub fn is_loading(&self) -> bool {
        self.state == ViewState::Loading
    }

    pub fn snapshot(&self) -> ViewSnapshot {
        ViewSnapshot {
            state: self.state.clone(),
            notification: self.notification.clone(),
        }
    }

    pub fn begin(&mut self) -> u64 {
        self.generation += 1;
        self.state = ViewState::Loading;
        self.notification = None;

        self.generation
    }

    /// Applies the result of submission `generation`. Returns `false` when a
    /// newer submission has started since.
    pub fn complete(
        &mut self,
        generation: u64,
        result: Result<AccountInfo, LookupError>,
    ) -> bool {
        if generation != self.generation {
            log::debug!(
                "dropping result of submission {generation}, latest is {}",
                self.generation
            );
            return false;
        }

        match result {
            Ok(info) => self.state = ViewState::Loaded(info),
            Err(e) => {
                log::error!("lookup failed: {e}");
                self.notification = Some(e.to_string());
                self.state = ViewState::Idle;
            }
        }

        true
    }

    fn release(&mut self, generation: u64) {
        if generation == self.generation && self.is_loading() {
            self.state = ViewState::Idle;
        }
    }
}

fn lock(view: &Mutex<ViewModel>) -> MutexGuard<'_, ViewModel> {
    view.lock().unwrap_or_else(PoisonError::into_inner)
}

pub fn current(view: &Mutex<ViewModel>) -> ViewSnapshot {
    lock(view).snapshot()
}

/// Leaves the loading state when dropped, whichever way the submission ends.
struct LoadingGuard<'a> {
    view: &'a Mutex<ViewModel>,
    generation: u64,
}

impl<'a> LoadingGuard<'a> {
    fn begin(view: &'a Mutex<ViewModel>) -> Self {
        let generation = lock(view).begin();

        Self { view, generation }
    }

    fn complete(self, result: Result<AccountInfo, LookupError>) -> ViewSnapshot {
        let snapshot = {
            let mut view = lock(self.view);
            view.complete(self.generation, result);
            view.snapshot()
        };
        drop(self);

        snapshot
    }
}

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        lock(self.view).release(self.generation);
    }
}

/// Runs one submission against `view` and returns what should be shown.
pub async fn run_submission<C, S>(
    view: &Mutex<ViewModel>,
    inspector: &Inspector<C, S>,
    raw: &str,
) -> ViewSnapshot
where
    C: Connector,
    S: KeyValueStore,
{
    let guard = LoadingGuard::begin(view);
    let result = inspector.submit(raw).await;

    guard.complete(result)
}

#[cfg(test)]
mod test {
    use super::{run_submission, LoadingGuard, ViewModel, ViewState};
    use crate::{
        config::Config,
        lookup::{errors::LookupError, Inspector},
        registry::{MemoryStore, TokenRegistry},
        testing::{MockConnector, MockReader, OWNER},
    };
    use std::sync::Mutex;

    fn inspector(reader: MockReader) -> Inspector<MockConnector, MemoryStore> {
        Inspector::new(
            Config::new("http://mock"),
            MockConnector::new(reader),
            TokenRegistry::with_defaults(MemoryStore::default(), vec![]),
        )
    }

    #[tokio::test]
    async fn successful_submission_is_loaded() {
        let view = Mutex::new(ViewModel::default());
        let snapshot = run_submission(&view, &inspector(MockReader::default()), OWNER).await;

        assert!(matches!(snapshot.state, ViewState::Loaded(_)));
        assert_eq!(snapshot.notification, None);
        assert!(!view.lock().unwrap().is_loading());
    }

    #[tokio::test]
    async fn failed_submission_notifies_and_returns_to_idle() {
        let view = Mutex::new(ViewModel::default());
        let reader = MockReader {
            guardians: None,
            ..MockReader::default()
        };

        let snapshot = run_submission(&view, &inspector(reader), OWNER).await;

        assert_eq!(snapshot.state, ViewState::Idle);
        assert_eq!(
            snapshot.notification.as_deref(),
            Some("Contract call failed: `guardianCount` reverted")
        );
        assert!(!view.lock().unwrap().is_loading());
    }

    #[tokio::test]
    async fn invalid_address_uses_the_same_notification_path() {
        let view = Mutex::new(ViewModel::default());
        let inspector = inspector(MockReader::default());

        let snapshot = run_submission(&view, &inspector, "0xnope").await;

        assert_eq!(snapshot.state, ViewState::Idle);
        assert!(snapshot.notification.unwrap().contains("0xnope"));
    }

    #[test]
    fn stale_results_are_dropped() {
        let mut view = ViewModel::default();

        let first = view.begin();
        let second = view.begin();

        assert!(!view.complete(first, Err(LookupError::Network("late".into()))));
        assert!(view.is_loading());
        assert_eq!(view.snapshot().notification, None);

        assert!(view.complete(second, Err(LookupError::Network("boom".into()))));
        assert_eq!(view.state(), &ViewState::Idle);
        assert_eq!(view.snapshot().notification.as_deref(), Some("boom"));
    }

    #[test]
    fn dropped_submission_releases_loading() {
        let view = Mutex::new(ViewModel::default());

        {
            let _guard = LoadingGuard::begin(&view);
            assert!(view.lock().unwrap().is_loading());
        }

        assert!(!view.lock().unwrap().is_loading());
        assert_eq!(view.lock().unwrap().state(), &ViewState::Idle);
    }

    #[test]
    fn stale_guard_leaves_newer_submission_loading() {
        let view = Mutex::new(ViewModel::default());

        let stale = LoadingGuard::begin(&view);
        let _current = LoadingGuard::begin(&view);
        drop(stale);

        assert!(view.lock().unwrap().is_loading());
    }

    #[test]
    fn snapshot_serialization() {
        let mut view = ViewModel::default();
        let generation = view.begin();
        view.complete(generation, Err(LookupError::Network("down".into())));

        assert_eq!(
            serde_json::to_value(view.snapshot()).unwrap(),
            serde_json::json!({ "state": "idle", "notification": "down" })
        );
    }
}
