//! Administration page: role catalog and bulk user creation.
//!
//! SYSTEM CONTEXT
//! ==============
//! Guarded by the `create-users` permission. The guard renders the
//! router's not-found output for anyone else, so this route does not
//! reveal itself to unauthorized users.

#[cfg(test)]
#[path = "admin_test.rs"]
mod admin_test;

use leptos::prelude::*;

use crate::net::types::CreateUserCommand;
use crate::state::auth::{AuthState, PERMISSION_CREATE_USERS};
use crate::state::resources::use_roles;
use crate::util::guard::RequireAuth;
use crate::util::messages::describe_error;

/// Parse the bulk-creation textarea: one email per line, blanks skipped,
/// duplicates collapsed, all assigned `role` (when picked).
pub(crate) fn parse_user_commands(raw: &str, role: &str) -> Vec<CreateUserCommand> {
    let roles = if role.is_empty() { Vec::new() } else { vec![role.to_owned()] };
    let mut seen = Vec::new();
    raw.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && line.contains('@'))
        .filter(|line| {
            if seen.contains(&line.to_ascii_lowercase()) {
                false
            } else {
                seen.push(line.to_ascii_lowercase());
                true
            }
        })
        .map(|line| CreateUserCommand { email: line.to_owned(), roles: roles.clone() })
        .collect()
}

/// Administration page — bulk-create users with an optional role.
#[component]
pub fn AdminPage() -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    let roles = use_roles();

    let emails = RwSignal::new(String::new());
    let selected_role = RwSignal::new(String::new());
    let info = RwSignal::new(String::new());
    let busy = RwSignal::new(false);

    let on_create = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get() {
            return;
        }
        let commands = parse_user_commands(&emails.get(), &selected_role.get());
        if commands.is_empty() {
            info.set("Enter at least one email address.".to_owned());
            return;
        }
        let Some(token) = auth.with_untracked(|s| s.token.clone()) else {
            return;
        };
        busy.set(true);
        info.set(String::new());

        #[cfg(feature = "hydrate")]
        leptos::task::spawn_local(async move {
            match crate::net::api::create_users(&commands, &token).await {
                Ok(created) => {
                    let _ = info.try_set(format!("Created {} users.", created.len()));
                    let _ = emails.try_set(String::new());
                }
                Err(e) if e.is_unauthorized() => crate::state::auth::sign_out(auth),
                Err(e) => {
                    let _ = info.try_set(describe_error(&e));
                }
            }
            let _ = busy.try_set(false);
        });
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (commands, token);
        }
    };

    view! {
        <RequireAuth permissions=vec![PERMISSION_CREATE_USERS.to_owned()]>
            <section class="admin-page">
                <h1>"Administration"</h1>

                <Show when=move || roles.error().is_some()>
                    <p class="admin-page__error">
                        {move || roles.error().map(|e| describe_error(&e)).unwrap_or_default()}
                    </p>
                </Show>

                <form class="admin-form" on:submit=on_create>
                    <label class="admin-form__label">
                        "Email addresses, one per line"
                        <textarea
                            class="admin-form__input"
                            rows="6"
                            prop:value=move || emails.get()
                            on:input=move |ev| emails.set(event_target_value(&ev))
                        ></textarea>
                    </label>
                    <label class="admin-form__label">
                        "Role"
                        <select
                            class="admin-form__input"
                            prop:value=move || selected_role.get()
                            on:change=move |ev| selected_role.set(event_target_value(&ev))
                        >
                            <option value="">"No role"</option>
                            {move || {
                                roles
                                    .resource()
                                    .into_iter()
                                    .map(|role| {
                                        let name = role.name.clone();
                                        view! { <option value=name.clone()>{name.clone()}</option> }
                                    })
                                    .collect::<Vec<_>>()
                            }}
                        </select>
                    </label>
                    <button class="btn btn--primary" type="submit" disabled=move || busy.get()>
                        "Create users"
                    </button>
                </form>

                <Show when=move || !info.get().is_empty()>
                    <p class="admin-page__message">{move || info.get()}</p>
                </Show>
            </section>
        </RequireAuth>
    }
}
