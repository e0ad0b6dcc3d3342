//! Generic token-bound resource envelope and fetch binder.
//!
//! ARCHITECTURE
//! ============
//! Every server-owned resource the client shows goes through one binding
//! primitive: a plain [`ResourceState`] envelope held in a signal, driven
//! by an effect that re-runs whenever the token, the resource key, or the
//! reload epoch changes. Staleness, cancellation, and the 401 sign-out
//! cascade live here and nowhere else; the typed wrappers in `resources`
//! only choose endpoints.
//!
//! CONCURRENCY
//! ===========
//! Interleaved async, never parallel. Each effect run supersedes the
//! previous attempt: the old fetch is aborted through its controller and
//! its commit is suppressed twice over — a cancellation channel wakes the
//! old task before it can win its select, and a generation check gates
//! every write so a stale result that still resolves can never commit.

#[cfg(test)]
#[path = "resource_test.rs"]
mod resource_test;

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use leptos::prelude::*;

use crate::net::RequestSignal;
use crate::net::error::ApiError;
use crate::state::auth::AuthState;
#[cfg(feature = "hydrate")]
use crate::state::auth::sign_out;

/// The `{resource, loading, error}` envelope for one bound resource.
///
/// `loading` is true only while a fetch for the current dependency set is
/// outstanding. `error` and `loading` are mutually exclusive terminal
/// states per attempt. `resource` keeps its last successful value across
/// a failed refetch.
#[derive(Clone, Debug, PartialEq)]
pub struct ResourceState<T> {
    /// Last successfully fetched value, or the initial value.
    pub resource: T,
    /// Whether a fetch for the current dependency set is in flight.
    pub loading: bool,
    /// Failure of the most recent attempt, if it failed.
    pub error: Option<ApiError>,
}

impl<T> ResourceState<T> {
    /// Envelope holding `initial` with no attempt made yet.
    #[must_use]
    pub fn new(initial: T) -> Self {
        Self { resource: initial, loading: false, error: None }
    }

    /// A fetch attempt began; the previous value stays visible.
    pub fn apply_started(&mut self) {
        self.loading = true;
        self.error = None;
    }

    /// The attempt succeeded.
    pub fn apply_success(&mut self, value: T) {
        self.resource = value;
        self.loading = false;
        self.error = None;
    }

    /// The attempt failed; the previous value is preserved.
    pub fn apply_failure(&mut self, error: ApiError) {
        self.loading = false;
        self.error = Some(error);
    }
}

/// What happened when a fetch result reached the commit boundary.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CommitOutcome {
    /// The envelope absorbed a success or a displayable failure.
    Committed,
    /// The credential was rejected; the caller must force a sign-out.
    SignedOut,
    /// A cancellation; nothing may change.
    Ignored,
}

/// Apply a finished fetch attempt to the envelope.
///
/// 401 never surfaces as an error — it demands a sign-out instead.
/// Cancellations are dropped entirely.
pub fn commit_result<T>(
    state: &mut ResourceState<T>,
    result: Result<T, ApiError>,
) -> CommitOutcome {
    match result {
        Ok(value) => {
            state.apply_success(value);
            CommitOutcome::Committed
        }
        Err(err) if err.is_unauthorized() => CommitOutcome::SignedOut,
        Err(err) if err.is_aborted() => CommitOutcome::Ignored,
        Err(err) => {
            state.apply_failure(err);
            CommitOutcome::Committed
        }
    }
}

/// Monotonic generation counter deciding which fetch attempt is current.
///
/// Every new dependency set takes the next generation; a result may only
/// commit while its generation is still the newest one issued.
#[derive(Clone, Debug, Default)]
pub struct FetchGeneration {
    current: Arc<AtomicU64>,
}

impl FetchGeneration {
    /// Start a new generation, superseding all earlier ones.
    pub fn next(&self) -> u64 {
        self.current.fetch_add(1, Ordering::Relaxed) + 1
    }

    /// Whether `generation` is still the newest one issued.
    #[must_use]
    pub fn is_current(&self, generation: u64) -> bool {
        self.current.load(Ordering::Relaxed) == generation
    }

    /// Supersede every outstanding generation without starting a new one.
    pub fn invalidate(&self) {
        self.current.fetch_add(1, Ordering::Relaxed);
    }
}

/// Handle to one bound resource: the envelope signal plus the explicit
/// refresh and optimistic-update entry points.
pub struct ResourceBinding<T: Send + Sync + 'static> {
    /// The envelope, readable by any consumer of the binding.
    pub state: RwSignal<ResourceState<T>>,
    reload_epoch: RwSignal<u64>,
}

// Signal handles copy regardless of the resource type.
impl<T: Send + Sync + 'static> Clone for ResourceBinding<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T: Send + Sync + 'static> Copy for ResourceBinding<T> {}

impl<T: Clone + Send + Sync + 'static> ResourceBinding<T> {
    /// Current resource value.
    #[must_use]
    pub fn resource(&self) -> T {
        self.state.with(|s| s.resource.clone())
    }

    /// Whether a fetch is in flight.
    #[must_use]
    pub fn loading(&self) -> bool {
        self.state.with(|s| s.loading)
    }

    /// Failure of the most recent attempt, if any.
    #[must_use]
    pub fn error(&self) -> Option<ApiError> {
        self.state.with(|s| s.error.clone())
    }

    /// Re-run the fetch with the current token and key, without resetting
    /// the visible value.
    pub fn reload(&self) {
        self.reload_epoch.update(|epoch| *epoch += 1);
    }

    /// Install `value` locally without a fetch, e.g. after a mutation
    /// returned the server's authoritative shape.
    pub fn set_resource(&self, value: T) {
        self.state.update(|s| s.apply_success(value));
    }
}

/// Bind a token-dependent fetch to a reactive envelope.
///
/// `key` is re-read reactively; returning `None` (key not ready) leaves
/// the envelope untouched. Without a token no fetch happens and the
/// envelope carries [`ApiError::AuthenticationRequired`] instead.
pub fn bind_resource<T, K, KF, F, Fut>(initial: T, key: KF, fetch: F) -> ResourceBinding<T>
where
    T: Clone + Send + Sync + 'static,
    K: 'static,
    KF: Fn() -> Option<K> + 'static,
    F: Fn(String, K, RequestSignal) -> Fut + 'static,
    Fut: Future<Output = Result<T, ApiError>> + 'static,
{
    let auth = expect_context::<RwSignal<AuthState>>();
    let state = RwSignal::new(ResourceState::new(initial));
    let reload_epoch = RwSignal::new(0_u64);

    #[cfg(feature = "hydrate")]
    {
        use std::sync::Mutex;

        use futures::channel::oneshot;
        use futures::future::{self, Either};

        let generation = FetchGeneration::default();
        // Dropping the stored sender wakes the task it belongs to, so both
        // supersession and unmount ride the same cancellation channel.
        let cancel_slot: Arc<Mutex<Option<oneshot::Sender<()>>>> = Arc::new(Mutex::new(None));

        let effect_generation = generation.clone();
        let effect_cancel_slot = Arc::clone(&cancel_slot);
        Effect::new(move || {
            reload_epoch.track();
            let token = auth.with(|s| s.token.clone());
            let key = key();

            let attempt = effect_generation.next();
            let (cancel_tx, cancel_rx) = oneshot::channel::<()>();
            if let Ok(mut slot) = effect_cancel_slot.lock() {
                // Replacing the sender cancels the superseded attempt.
                *slot = Some(cancel_tx);
            }

            let Some(token) = token else {
                state.update(|s| s.apply_failure(ApiError::AuthenticationRequired));
                return;
            };
            let Some(key) = key else {
                return;
            };

            state.update(ResourceState::apply_started);

            let controller = web_sys::AbortController::new().ok();
            let signal = controller.as_ref().map(web_sys::AbortController::signal);

            let fut = fetch(token, key, signal);
            let task_generation = effect_generation.clone();
            leptos::task::spawn_local(async move {
                match future::select(Box::pin(fut), cancel_rx).await {
                    Either::Left((result, _)) => {
                        if !task_generation.is_current(attempt) {
                            return;
                        }
                        let mut outcome = CommitOutcome::Ignored;
                        let _ = state.try_update(|s| outcome = commit_result(s, result));
                        if outcome == CommitOutcome::SignedOut {
                            leptos::logging::warn!("credential rejected; signing out");
                            sign_out(auth);
                        }
                    }
                    Either::Right((_, pending)) => {
                        // Cancelled: raise the advisory abort and drop the
                        // attempt without touching any state.
                        if let Some(ctrl) = controller {
                            ctrl.abort();
                        }
                        drop(pending);
                    }
                }
            });
        });

        on_cleanup(move || {
            generation.invalidate();
            if let Ok(mut slot) = cancel_slot.lock() {
                slot.take();
            }
        });
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (key, fetch, auth);
    }

    ResourceBinding { state, reload_epoch }
}
