//! Profile page — the authenticated landing route.
//!
//! SYSTEM CONTEXT
//! ==============
//! Shows and edits the signed-in user's profile through the profile
//! binding's bind-and-update pair. The server's response to an update is
//! what lands in the envelope; local form state is only a draft.

#[cfg(test)]
#[path = "profile_test.rs"]
mod profile_test;

use leptos::prelude::*;

use crate::net::types::User;
use crate::state::resources::{use_countries, use_profile};
use crate::util::guard::RequireAuth;
use crate::util::messages::describe_error;

/// `None` for a blank input, so clearing a field clears the stored value.
pub(crate) fn non_empty(value: String) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() { None } else { Some(trimmed.to_owned()) }
}

/// Fold the form draft into the stored user shape.
pub(crate) fn draft_into_user(
    mut user: User,
    first_name: String,
    last_name: String,
    date_of_birth: String,
    country_code: String,
) -> User {
    user.first_name = non_empty(first_name);
    user.last_name = non_empty(last_name);
    user.date_of_birth = non_empty(date_of_birth);
    user.country_code = non_empty(country_code);
    user
}

/// Profile page with editable personal details.
#[component]
pub fn ProfilePage() -> impl IntoView {
    let profile = use_profile();
    let countries = use_countries();

    let first_name = RwSignal::new(String::new());
    let last_name = RwSignal::new(String::new());
    let date_of_birth = RwSignal::new(String::new());
    let country_code = RwSignal::new(String::new());
    let seeded_for = RwSignal::new(None::<String>);

    // Seed the draft once per loaded user; later refetches of the same
    // user must not clobber in-progress edits.
    Effect::new(move || {
        let Some(user) = profile.binding.resource() else {
            return;
        };
        if seeded_for.get_untracked().as_deref() == Some(user.id.as_str()) {
            return;
        }
        first_name.set(user.first_name.clone().unwrap_or_default());
        last_name.set(user.last_name.clone().unwrap_or_default());
        date_of_birth.set(user.date_of_birth.clone().unwrap_or_default());
        country_code.set(user.country_code.clone().unwrap_or_default());
        seeded_for.set(Some(user.id));
    });

    let on_save = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        let Some(user) = profile.binding.resource() else {
            return;
        };
        profile.update(draft_into_user(
            user,
            first_name.get(),
            last_name.get(),
            date_of_birth.get(),
            country_code.get(),
        ));
    };

    view! {
        <RequireAuth>
            <section class="profile-page">
                <h1>"Your profile"</h1>

                <Show when=move || profile.binding.loading()>
                    <p class="profile-page__hint">"Loading profile..."</p>
                </Show>
                <Show when=move || profile.binding.error().is_some()>
                    <p class="profile-page__error">
                        {move || {
                            profile.binding.error().map(|e| describe_error(&e)).unwrap_or_default()
                        }}
                    </p>
                </Show>

                <Show when=move || profile.binding.resource().is_some()>
                    <form class="profile-form" on:submit=on_save>
                        <label class="profile-form__label">
                            "Email"
                            <input
                                class="profile-form__input"
                                type="email"
                                readonly=true
                                prop:value=move || {
                                    profile
                                        .binding
                                        .resource()
                                        .map(|u| u.email)
                                        .unwrap_or_default()
                                }
                            />
                        </label>
                        <label class="profile-form__label">
                            "First name"
                            <input
                                class="profile-form__input"
                                type="text"
                                prop:value=move || first_name.get()
                                on:input=move |ev| first_name.set(event_target_value(&ev))
                            />
                        </label>
                        <label class="profile-form__label">
                            "Last name"
                            <input
                                class="profile-form__input"
                                type="text"
                                prop:value=move || last_name.get()
                                on:input=move |ev| last_name.set(event_target_value(&ev))
                            />
                        </label>
                        <label class="profile-form__label">
                            "Date of birth"
                            <input
                                class="profile-form__input"
                                type="date"
                                prop:value=move || date_of_birth.get()
                                on:input=move |ev| date_of_birth.set(event_target_value(&ev))
                            />
                        </label>
                        <label class="profile-form__label">
                            "Country"
                            <select
                                class="profile-form__input"
                                prop:value=move || country_code.get()
                                on:change=move |ev| country_code.set(event_target_value(&ev))
                            >
                                <option value="">"Select a country"</option>
                                {move || {
                                    countries
                                        .resource()
                                        .into_iter()
                                        .map(|country| {
                                            view! {
                                                <option value=country.code>{country.name}</option>
                                            }
                                        })
                                        .collect::<Vec<_>>()
                                }}
                            </select>
                        </label>

                        <button
                            class="btn btn--primary"
                            type="submit"
                            disabled=move || profile.saving.get()
                        >
                            {move || if profile.saving.get() { "Saving..." } else { "Save" }}
                        </button>
                        <Show when=move || profile.save_error.get().is_some()>
                            <p class="profile-page__error">
                                {move || {
                                    profile
                                        .save_error
                                        .get()
                                        .map(|e| describe_error(&e))
                                        .unwrap_or_default()
                                }}
                            </p>
                        </Show>
                    </form>
                </Show>
            </section>
        </RequireAuth>
    }
}
