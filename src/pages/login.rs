//! Sign-in page: magic link, national e-ID entry, and credential exchange.
//!
//! SYSTEM CONTEXT
//! ==============
//! This is the only unauthenticated route. Both sign-in flows end with a
//! one-time code arriving in the callback query string; exchanging it is
//! the single place a token enters the authentication store.

#[cfg(test)]
#[path = "login_test.rs"]
mod login_test;

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::{use_navigate, use_query_map};

use crate::net::api::CredentialMethod;
use crate::state::auth::AuthState;
use crate::util::messages::message;

/// Validate and normalize the magic-link email input.
pub(crate) fn validate_email_input(raw: &str) -> Result<String, &'static str> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || !trimmed.contains('@') {
        return Err("Enter a valid email address.");
    }
    Ok(trimmed.to_owned())
}

/// Pick the credential carried by the callback query parameters, if any.
///
/// A magic-link token wins over an e-ID session code; both flows never
/// legitimately arrive together.
pub(crate) fn callback_credential(
    token: Option<String>,
    session: Option<String>,
) -> Option<(CredentialMethod, String)> {
    if let Some(code) = token.filter(|value| !value.is_empty()) {
        return Some((CredentialMethod::MagicLink, code));
    }
    if let Some(code) = session.filter(|value| !value.is_empty()) {
        return Some((CredentialMethod::IdentitySession, code));
    }
    None
}

/// Login page — magic-link request form plus the external e-ID entry.
#[component]
pub fn LoginPage() -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    let navigate = use_navigate();
    let query = use_query_map();

    let email = RwSignal::new(String::new());
    let info = RwSignal::new(String::new());
    let busy = RwSignal::new(false);
    let link_sent_to = RwSignal::new(None::<String>);
    let config = RwSignal::new(None::<crate::net::types::FrontendConfig>);
    let exchanged = RwSignal::new(false);

    // Signed in (now or as soon as an exchange lands): leave for the profile.
    let navigate_home = navigate.clone();
    Effect::new(move || {
        if auth.get().token.is_some() {
            navigate_home("/", NavigateOptions::default());
        }
    });

    // Load the frontend config for the e-ID entry link, cache-first.
    #[cfg(feature = "hydrate")]
    {
        use crate::util::persistence;

        if let Some(cached) =
            persistence::load_json::<crate::net::types::FrontendConfig>(persistence::CONFIG_KEY)
        {
            config.set(Some(cached));
        }
        leptos::task::spawn_local(async move {
            match crate::net::api::fetch_frontend_config().await {
                Ok(fresh) => {
                    persistence::save_json(persistence::CONFIG_KEY, &fresh);
                    let _ = config.try_set(Some(fresh));
                }
                Err(e) => leptos::logging::warn!("config fetch failed: {e}"),
            }
        });
    }

    // Exchange a credential code arriving in the callback parameters.
    Effect::new(move || {
        let credential =
            callback_credential(query.read().get("token"), query.read().get("session"));
        let Some((method, code)) = credential else {
            return;
        };
        if exchanged.get_untracked() {
            return;
        }
        exchanged.set(true);
        busy.set(true);
        info.set("Signing you in...".to_owned());

        #[cfg(feature = "hydrate")]
        leptos::task::spawn_local(async move {
            match crate::net::api::exchange_credential(method, &code, None).await {
                Ok(token) => {
                    // The effect above navigates once the token lands.
                    crate::state::auth::authenticate(auth, token);
                }
                Err(e) => {
                    let _ = info.try_set(format!("{}: {e}", message("error.sign-in-failed")));
                    let _ = busy.try_set(false);
                    let _ = exchanged.try_set(false);
                }
            }
        });
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (method, code);
        }
    });

    let on_request_link = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get() {
            return;
        }
        match validate_email_input(&email.get()) {
            Err(msg) => info.set(msg.to_owned()),
            Ok(address) => {
                busy.set(true);
                info.set(String::new());

                #[cfg(feature = "hydrate")]
                leptos::task::spawn_local(async move {
                    match crate::net::api::create_magic_link(&address).await {
                        Ok(link) if link.active => {
                            let _ = link_sent_to.try_set(Some(address));
                        }
                        Ok(_) => {
                            let _ = info.try_set("The sign-in link could not be issued.".to_owned());
                        }
                        Err(e) => {
                            let _ =
                                info.try_set(format!("{}: {e}", message("error.sign-in-failed")));
                        }
                    }
                    let _ = busy.try_set(false);
                });
                #[cfg(not(feature = "hydrate"))]
                {
                    let _ = address;
                }
            }
        }
    };

    view! {
        <div class="login-page">
            <div class="login-card">
                <h1>"HealthPass"</h1>
                <Show
                    when=move || link_sent_to.get().is_some()
                    fallback=move || {
                        view! {
                            <p class="login-card__subtitle">"Sign in with your email"</p>
                            <form class="login-form" on:submit=on_request_link>
                                <input
                                    class="login-input"
                                    type="email"
                                    placeholder="you@example.com"
                                    prop:value=move || email.get()
                                    on:input=move |ev| email.set(event_target_value(&ev))
                                />
                                <button
                                    class="login-button"
                                    type="submit"
                                    disabled=move || busy.get()
                                >
                                    "Email me a sign-in link"
                                </button>
                            </form>
                            <div class="login-divider"></div>
                            <p class="login-card__subtitle">"Or"</p>
                            <Show when=move || config.get().is_some()>
                                <a
                                    class="login-button"
                                    href=move || {
                                        config
                                            .get()
                                            .map(|c| c.identity_authority_url)
                                            .unwrap_or_default()
                                    }
                                >
                                    "Sign in with national e-ID"
                                </a>
                            </Show>
                        }
                    }
                >
                    <p class="login-message">{message("login.check-inbox").to_owned()}</p>
                    <p class="login-message--detail">
                        {message("login.link-sent-to").to_owned()}
                        " "
                        <span class="login-message__email">
                            {move || link_sent_to.get().unwrap_or_default()}
                        </span>
                    </p>
                </Show>
                <Show when=move || !info.get().is_empty()>
                    <p class="login-message">{move || info.get()}</p>
                </Show>
            </div>
        </div>
    }
}
