//! Auth-session state for the current browser user.
//!
//! SYSTEM CONTEXT
//! ==============
//! One `RwSignal<AuthState>` is provided at the application root; it holds
//! the only authoritative copy of the bearer token. Route guards, the
//! resource binder, and user-aware components derive everything else from
//! it on demand. All mutation funnels through [`authenticate`] and
//! [`sign_out`] — descendants never write the token directly.
//!
//! DESIGN
//! ======
//! Client-side permission checks are a UX filter only. The backend
//! re-evaluates authorization on every request; clearing or forging the
//! local claims changes what is rendered, never what is allowed.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use std::collections::HashSet;

use leptos::prelude::*;

use crate::net::token;
use crate::util::persistence;

/// Permission required to see and use the user-administration page.
pub const PERMISSION_CREATE_USERS: &str = "create-users";

/// Authentication state: the current bearer token, if any.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AuthState {
    /// The opaque bearer credential, absent when signed out.
    pub token: Option<String>,
}

/// Derived authentication context, recomputed from [`AuthState`] on every
/// use and never cached across token changes.
///
/// A token that fails to decode yields the same context as no token.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AuthContext {
    /// The token the context was derived from, when it decoded.
    pub token: Option<String>,
    /// Identifier of the authenticated principal.
    pub user_id: Option<String>,
    permissions: HashSet<String>,
}

impl AuthContext {
    /// Derive the context from the current auth state.
    #[must_use]
    pub fn from_state(state: &AuthState) -> Self {
        let Some(token) = state.token.clone() else {
            return Self::default();
        };
        match token::decode(&token) {
            Ok(claims) => Self {
                token: Some(token),
                user_id: Some(claims.user_id),
                permissions: claims.permissions.into_iter().collect(),
            },
            Err(_) => Self::default(),
        }
    }

    /// Whether a decodable token is present.
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.user_id.is_some()
    }

    /// Whether the current principal holds `permission`.
    ///
    /// Always `false` when signed out or when the token failed to decode.
    #[must_use]
    pub fn has_permission(&self, permission: &str) -> bool {
        self.permissions.contains(permission)
    }
}

/// Reactively derive the [`AuthContext`] from the auth signal.
#[must_use]
pub fn auth_context(auth: RwSignal<AuthState>) -> AuthContext {
    AuthContext::from_state(&auth.get())
}

/// Install `token` as the current session credential.
///
/// Writes durable storage first (when enabled for the run mode), then
/// updates in-memory state so dependents re-derive their context.
pub fn authenticate(auth: RwSignal<AuthState>, token: String) {
    if persistence::session_persistence_enabled() {
        persistence::save_string(persistence::TOKEN_KEY, &token);
    }
    auth.set(AuthState { token: Some(token) });
}

/// Clear the session. Idempotent; safe to call when already signed out.
pub fn sign_out(auth: RwSignal<AuthState>) {
    if persistence::session_persistence_enabled() {
        persistence::remove(persistence::TOKEN_KEY);
    }
    if auth.with_untracked(|state| state.token.is_some()) {
        leptos::logging::log!("session cleared");
        auth.set(AuthState::default());
    }
}

/// Restore a persisted session on process start.
///
/// A no-op when persistence is disabled, so production-like runs always
/// start signed out.
pub fn restore_session(auth: RwSignal<AuthState>) {
    if !persistence::session_persistence_enabled() {
        return;
    }
    if let Some(token) = persistence::load_string(persistence::TOKEN_KEY) {
        auth.set(AuthState { token: Some(token) });
    }
}
