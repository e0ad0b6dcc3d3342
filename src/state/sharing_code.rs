//! Sharing-code countdown and auto-renewal lifecycle.
//!
//! DESIGN
//! ======
//! An explicit phase machine (`Idle -> Loading -> Active -> Renewing ->
//! Active | Error`) driven by one 500 ms timer source. The transitions are
//! pure functions over wall-clock milliseconds so the whole machine is
//! unit-testable without a browser; the hook below only wires them to the
//! resource binding and the interval.
//!
//! The code is a single-use-window secret: once a replacement resolves,
//! the previous code is discarded entirely and never shown again.

#[cfg(test)]
#[path = "sharing_code_test.rs"]
mod sharing_code_test;

use leptos::prelude::*;

use crate::net::api;
use crate::net::types::SharingCode;
use crate::state::auth::{AuthContext, AuthState};
use crate::state::resource::{ResourceBinding, ResourceState, bind_resource};

/// Countdown tick period.
pub const SHARING_CODE_TICK_MS: u32 = 500;

/// Remaining validity, in seconds, at or below which renewal starts.
pub const RENEWAL_THRESHOLD_SECS: f64 = 3.0;

/// Lifecycle phase of the displayed sharing code.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SharingCodePhase {
    /// No code requested yet.
    #[default]
    Idle,
    /// First request in flight; nothing to display.
    Loading,
    /// A code is displayed and counting down.
    Active,
    /// A replacement request is in flight while the old code is still shown.
    Renewing,
    /// The last request failed; recovery requires a remount or manual reload.
    Error,
}

/// What a countdown tick decided.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TickOutcome {
    /// Keep counting.
    Continue,
    /// Remaining validity crossed the low-water mark: request a new code.
    Renew,
}

/// Client-side projection of the sharing-code lifecycle.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SharingCodeState {
    /// Current phase tag.
    pub phase: SharingCodePhase,
    /// The displayed code, if one has been adopted.
    pub code: Option<SharingCode>,
    /// Seconds of validity left, recomputed on each tick.
    pub time_until_expiry: f64,
    /// Validity the current code had when adopted; renders the
    /// proportional countdown.
    pub original_time_until_expiry: f64,
}

/// Seconds from `now_ms` until `expiry_time_ms`, floored at zero.
#[must_use]
pub fn seconds_until(expiry_time_ms: f64, now_ms: f64) -> f64 {
    ((expiry_time_ms - now_ms) / 1000.0).max(0.0)
}

impl SharingCodeState {
    /// Project the binding's envelope into the lifecycle.
    ///
    /// A new code (different secret string) fully replaces the previous
    /// one and resets the countdown baseline.
    pub fn apply_envelope(&mut self, envelope: &ResourceState<Option<SharingCode>>, now_ms: f64) {
        if envelope.error.is_some() {
            self.phase = SharingCodePhase::Error;
            return;
        }
        match &envelope.resource {
            None => {
                self.phase = if envelope.loading {
                    SharingCodePhase::Loading
                } else {
                    SharingCodePhase::Idle
                };
            }
            Some(code) => {
                let replaced = self.code.as_ref().is_none_or(|held| held.code != code.code);
                if replaced {
                    self.adopt(code.clone(), now_ms);
                }
            }
        }
    }

    fn adopt(&mut self, code: SharingCode, now_ms: f64) {
        let remaining = seconds_until(code.expiry_time, now_ms);
        self.time_until_expiry = remaining;
        self.original_time_until_expiry = remaining;
        self.code = Some(code);
        self.phase = SharingCodePhase::Active;
    }

    /// Advance the countdown. Returns [`TickOutcome::Renew`] exactly once
    /// per code, on the first tick at or below the renewal threshold.
    pub fn apply_tick(&mut self, now_ms: f64) -> TickOutcome {
        if !matches!(self.phase, SharingCodePhase::Active | SharingCodePhase::Renewing) {
            return TickOutcome::Continue;
        }
        let Some(code) = &self.code else {
            return TickOutcome::Continue;
        };
        self.time_until_expiry = seconds_until(code.expiry_time, now_ms);
        if self.phase == SharingCodePhase::Active
            && self.time_until_expiry <= RENEWAL_THRESHOLD_SECS
        {
            self.phase = SharingCodePhase::Renewing;
            return TickOutcome::Renew;
        }
        TickOutcome::Continue
    }

    /// Remaining validity as a 0..=1 fraction of the adopted validity.
    #[must_use]
    pub fn countdown_fraction(&self) -> f64 {
        if self.original_time_until_expiry > 0.0 {
            (self.time_until_expiry / self.original_time_until_expiry).clamp(0.0, 1.0)
        } else {
            0.0
        }
    }
}

/// Handle to the sharing-code lifecycle for one mounted consumer.
#[derive(Clone, Copy)]
pub struct SharingCodeHandle {
    /// The underlying resource binding; `reload()` mints a new code.
    pub binding: ResourceBinding<Option<SharingCode>>,
    /// The projected lifecycle state for rendering.
    pub lifecycle: RwSignal<SharingCodeState>,
}

/// Request a sharing code for the signed-in user and keep it fresh.
///
/// Mounting requests a code; the countdown ticks every 500 ms; renewal is
/// requested automatically when remaining validity first reaches the
/// threshold. Unmounting stops the tick and cancels any in-flight request.
pub fn use_sharing_code() -> SharingCodeHandle {
    let auth = expect_context::<RwSignal<AuthState>>();
    let binding = bind_resource(
        None,
        move || AuthContext::from_state(&auth.get()).user_id,
        |token, user_id: String, signal| async move {
            api::create_sharing_code(&user_id, &token, signal).await.map(Some)
        },
    );
    let lifecycle = RwSignal::new(SharingCodeState::default());

    #[cfg(feature = "hydrate")]
    {
        use std::cell::RefCell;
        use std::rc::Rc;
        use std::sync::Arc;
        use std::sync::atomic::{AtomicBool, Ordering};

        use gloo_timers::callback::Interval;

        Effect::new(move || {
            let envelope = binding.state.get();
            lifecycle.update(|s| s.apply_envelope(&envelope, js_sys::Date::now()));
        });

        let alive = Arc::new(AtomicBool::new(true));
        let tick_handle = Rc::new(RefCell::new(None::<Interval>));

        let tick_alive = Arc::clone(&alive);
        let tick_handle_inner = Rc::clone(&tick_handle);
        *tick_handle.borrow_mut() = Some(Interval::new(SHARING_CODE_TICK_MS, move || {
            if !tick_alive.load(Ordering::Relaxed) {
                // Release the interval outside its own call frame.
                let handle = Rc::clone(&tick_handle_inner);
                leptos::task::spawn_local(async move {
                    handle.borrow_mut().take();
                });
                return;
            }
            let mut outcome = TickOutcome::Continue;
            let _ = lifecycle.try_update(|s| outcome = s.apply_tick(js_sys::Date::now()));
            if outcome == TickOutcome::Renew {
                binding.reload();
            }
        }));

        on_cleanup(move || alive.store(false, Ordering::Relaxed));
    }

    SharingCodeHandle { binding, lifecycle }
}
