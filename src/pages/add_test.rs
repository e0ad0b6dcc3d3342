//! Record-a-test page, driven by the test-type catalog.
//!
//! DESIGN
//! ======
//! The form is data-driven: the selected test type's opaque field
//! descriptor decides which inputs appear. The client never interprets
//! the descriptor beyond enumerating its field names; the backend
//! validates the submitted values.

#[cfg(test)]
#[path = "add_test_test.rs"]
mod add_test_test;

use std::collections::HashMap;

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::{use_navigate, use_params_map};

use crate::net::types::CreateTestCommand;
use crate::state::auth::{AuthContext, AuthState};
use crate::state::resources::{permitted_test_types, use_test_types};
use crate::util::guard::RequireAuth;

/// Field names listed by a test type's opaque form descriptor.
///
/// Descriptors carry their fields under a `properties` object; anything
/// else yields no fields.
pub(crate) fn descriptor_field_names(fields: &serde_json::Value) -> Vec<String> {
    fields
        .get("properties")
        .and_then(|p| p.as_object())
        .map(|object| object.keys().cloned().collect())
        .unwrap_or_default()
}

/// Assemble the submitted values into the command's results object,
/// keeping only the descriptor's fields and dropping blanks.
pub(crate) fn collect_results(
    field_names: &[String],
    values: &HashMap<String, String>,
) -> serde_json::Value {
    let mut results = serde_json::Map::new();
    for name in field_names {
        if let Some(value) = values.get(name) {
            let trimmed = value.trim();
            if !trimmed.is_empty() {
                results.insert(name.clone(), serde_json::Value::String(trimmed.to_owned()));
            }
        }
    }
    serde_json::Value::Object(results)
}

/// Add-test page — reads the record owner from the route parameter and
/// offers only the test types the signed-in user may record.
#[component]
pub fn AddTestPage() -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    let params = use_params_map();
    let navigate = use_navigate();

    let owner_id = move || params.read().get("id");
    let test_types = use_test_types();

    let selected_type_id = RwSignal::new(String::new());
    let values = RwSignal::new(HashMap::<String, String>::new());
    let info = RwSignal::new(String::new());
    let busy = RwSignal::new(false);
    let created = RwSignal::new(false);

    let permitted = move || {
        let catalog = test_types.resource();
        let ctx = AuthContext::from_state(&auth.get());
        permitted_test_types(&catalog, &ctx)
    };
    let selected_type = move || {
        permitted().into_iter().find(|t| t.id == selected_type_id.get())
    };
    let field_names = move || {
        selected_type().map(|t| descriptor_field_names(&t.fields)).unwrap_or_default()
    };

    // Back to the record list once the result is stored.
    let navigate_back = navigate.clone();
    Effect::new(move || {
        if created.get()
            && let Some(id) = owner_id()
        {
            navigate_back(&format!("/records/{id}"), NavigateOptions::default());
        }
    });

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get() {
            return;
        }
        let Some(test_type) = selected_type() else {
            info.set("Pick a test type first.".to_owned());
            return;
        };
        let Some(user_id) = owner_id() else {
            return;
        };
        let Some(token) = auth.with_untracked(|s| s.token.clone()) else {
            return;
        };
        let command = CreateTestCommand {
            test_type_id: test_type.id.clone(),
            results: collect_results(&descriptor_field_names(&test_type.fields), &values.get()),
        };
        busy.set(true);
        info.set(String::new());

        #[cfg(feature = "hydrate")]
        leptos::task::spawn_local(async move {
            match crate::net::api::create_test(&user_id, &command, &token).await {
                Ok(_) => {
                    let _ = created.try_set(true);
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
            let _ = (user_id, token, command);
        }
    };

    view! {
        <RequireAuth>
            <section class="add-test-page">
                <h1>"Record a test"</h1>

                <Show
                    when=move || !permitted().is_empty()
                    fallback=move || {
                        view! {
                            <p class="add-test-page__hint">
                                "There are no test types you can record results for."
                            </p>
                        }
                    }
                >
                    <form class="add-test-form" on:submit=on_submit>
                        <label class="add-test-form__label">
                            "Test type"
                            <select
                                class="add-test-form__input"
                                prop:value=move || selected_type_id.get()
                                on:change=move |ev| {
                                    selected_type_id.set(event_target_value(&ev));
                                    values.set(HashMap::new());
                                }
                            >
                                <option value="">"Select a test type"</option>
                                {move || {
                                    permitted()
                                        .into_iter()
                                        .map(|t| {
                                            view! { <option value=t.id>{t.name}</option> }
                                        })
                                        .collect::<Vec<_>>()
                                }}
                            </select>
                        </label>

                        {move || {
                            field_names()
                                .into_iter()
                                .map(|name| {
                                    let field = name.clone();
                                    view! {
                                        <label class="add-test-form__label">
                                            {name.clone()}
                                            <input
                                                class="add-test-form__input"
                                                type="text"
                                                prop:value=move || {
                                                    values.get().get(&name).cloned().unwrap_or_default()
                                                }
                                                on:input=move |ev| {
                                                    let entered = event_target_value(&ev);
                                                    values
                                                        .update(|map| {
                                                            map.insert(field.clone(), entered);
                                                        });
                                                }
                                            />
                                        </label>
                                    }
                                })
                                .collect::<Vec<_>>()
                        }}

                        <button
                            class="btn btn--primary"
                            type="submit"
                            disabled=move || busy.get()
                        >
                            "Save result"
                        </button>
                    </form>
                </Show>

                <Show when=move || !info.get().is_empty()>
                    <p class="add-test-page__message">{move || info.get()}</p>
                </Show>
            </section>
        </RequireAuth>
    }
}
