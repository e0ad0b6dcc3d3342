//! Top navigation bar for authenticated screens.

use leptos::prelude::*;

use crate::state::auth::{AuthContext, AuthState, PERMISSION_CREATE_USERS, sign_out};

/// Navigation bar — section links plus the sign-out action. Renders
/// nothing while signed out.
#[component]
pub fn NavBar() -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();

    let records_href = move || {
        AuthContext::from_state(&auth.get())
            .user_id
            .map_or_else(|| "/login".to_owned(), |id| format!("/records/{id}"))
    };
    let show_admin = move || {
        AuthContext::from_state(&auth.get()).has_permission(PERMISSION_CREATE_USERS)
    };

    let on_sign_out = move |_| {
        // The route guard notices the cleared token and redirects.
        sign_out(auth);
    };

    view! {
        <Show when=move || auth.get().token.is_some()>
            <header class="nav-bar">
                <a class="nav-bar__brand" href="/">
                    "HealthPass"
                </a>
                <nav class="nav-bar__links">
                    <a href="/">"Profile"</a>
                    <a href=records_href>"My results"</a>
                    <a href="/share">"Share"</a>
                    <a href="/access">"Redeem a code"</a>
                    <Show when=show_admin>
                        <a href="/admin">"Administration"</a>
                    </Show>
                </nav>
                <span class="nav-bar__spacer"></span>
                <button class="btn nav-bar__sign-out" on:click=on_sign_out>
                    "Sign out"
                </button>
            </header>
        </Show>
    }
}
