//! Route guard for permission-gated navigation.
//!
//! SYSTEM CONTEXT
//! ==============
//! Route components wrap their content in [`RequireAuth`] so every guarded
//! route applies identical redirect behavior. A missing permission renders
//! the router's not-found output verbatim, keeping privileged routes
//! indistinguishable from routes that do not exist.

#[cfg(test)]
#[path = "guard_test.rs"]
mod guard_test;

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::use_navigate;

use crate::state::auth::{AuthContext, AuthState};

/// Fallback text rendered for unknown routes; the guard's not-found
/// outcome must render exactly this.
pub const NOT_FOUND_TEXT: &str = "Page not found.";

/// What a guarded route should do for the current authentication context.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GuardOutcome {
    /// No decodable token: send the user to the sign-in entry point.
    Redirect,
    /// Authenticated but missing a required permission.
    NotFound,
    /// Authenticated with every required permission.
    Render,
}

/// Evaluate the guard for `required` permissions. An empty list admits any
/// authenticated user.
#[must_use]
pub fn evaluate_guard(ctx: &AuthContext, required: &[String]) -> GuardOutcome {
    if !ctx.is_authenticated() {
        return GuardOutcome::Redirect;
    }
    if required.iter().all(|permission| ctx.has_permission(permission)) {
        GuardOutcome::Render
    } else {
        GuardOutcome::NotFound
    }
}

/// Gate `children` behind authentication and an optional permission list.
#[component]
pub fn RequireAuth(
    /// Permissions the current user must hold, all of them.
    #[prop(optional)]
    permissions: Vec<String>,
    children: ChildrenFn,
) -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    let navigate = use_navigate();

    let outcome = Signal::derive(move || {
        evaluate_guard(&AuthContext::from_state(&auth.get()), &permissions)
    });

    Effect::new(move || {
        if outcome.get() == GuardOutcome::Redirect {
            navigate("/login", NavigateOptions::default());
        }
    });

    view! {
        <Show
            when=move || outcome.get() == GuardOutcome::Render
            fallback=move || {
                view! {
                    <p>
                        {move || {
                            if outcome.get() == GuardOutcome::NotFound {
                                NOT_FOUND_TEXT
                            } else {
                                "Redirecting to sign-in..."
                            }
                        }}
                    </p>
                }
            }
        >
            {children()}
        </Show>
    }
}
