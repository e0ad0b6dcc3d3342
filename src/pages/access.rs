//! Access page — redeem another user's sharing code.
//!
//! SYSTEM CONTEXT
//! ==============
//! Redeeming creates an access pass; the backend decides validity. On
//! success the page navigates straight to the owner's result list.

#[cfg(test)]
#[path = "access_test.rs"]
mod access_test;

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::use_navigate;

use crate::state::auth::{AuthContext, AuthState};
use crate::util::guard::RequireAuth;

/// Uppercase the code as the user types; codes are case-insensitive on
/// entry but canonically uppercase.
pub(crate) fn normalize_code_input(raw: &str) -> String {
    raw.trim().to_ascii_uppercase()
}

/// Route to the record list of `owner_id`.
pub(crate) fn records_route(owner_id: &str) -> String {
    format!("/records/{owner_id}")
}

/// Access page — code entry form for redeeming a sharing code.
#[component]
pub fn AccessPage() -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    let navigate = use_navigate();

    let code = RwSignal::new(String::new());
    let info = RwSignal::new(String::new());
    let busy = RwSignal::new(false);
    let granted_for = RwSignal::new(None::<String>);

    // Navigate once a pass is granted.
    Effect::new(move || {
        if let Some(owner_id) = granted_for.get() {
            navigate(&records_route(&owner_id), NavigateOptions::default());
        }
    });

    let on_redeem = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get() {
            return;
        }
        let value = normalize_code_input(&code.get());
        if value.is_empty() {
            info.set("Enter a sharing code first.".to_owned());
            return;
        }
        let context = AuthContext::from_state(&auth.get_untracked());
        let (Some(user_id), Some(token)) = (context.user_id, context.token) else {
            return;
        };
        busy.set(true);
        info.set(String::new());

        #[cfg(feature = "hydrate")]
        leptos::task::spawn_local(async move {
            match crate::net::api::create_access_pass(&user_id, &value, &token).await {
                Ok(pass) => {
                    let granted = crate::util::messages::message("access.granted");
                    let _ = info.try_set(format!("{} {}", granted, pass.user_id));
                    let _ = granted_for.try_set(Some(pass.user_id));
                }
                Err(e) if e.is_unauthorized() => crate::state::auth::sign_out(auth),
                Err(e) => {
                    let _ = info.try_set(crate::util::messages::describe_error(&e));
                }
            }
            let _ = busy.try_set(false);
        });
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (user_id, token, value);
        }
    };

    view! {
        <RequireAuth>
            <section class="access-page">
                <h1>"Redeem a sharing code"</h1>
                <form class="access-form" on:submit=on_redeem>
                    <input
                        class="access-form__input"
                        type="text"
                        maxlength="6"
                        placeholder="e.g. H7K2PQ"
                        prop:value=move || code.get()
                        on:input=move |ev| code.set(normalize_code_input(&event_target_value(&ev)))
                    />
                    <button class="btn btn--primary" type="submit" disabled=move || busy.get()>
                        "Redeem"
                    </button>
                </form>
                <Show when=move || !info.get().is_empty()>
                    <p class="access-page__message">{move || info.get()}</p>
                </Show>
            </section>
        </RequireAuth>
    }
}
