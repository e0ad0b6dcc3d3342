//! Detail page for a single recorded test.

#[cfg(test)]
#[path = "test_detail_test.rs"]
mod test_detail_test;

use leptos::prelude::*;
use leptos_router::hooks::use_params_map;

use crate::state::resources::{use_test, use_test_types};
use crate::util::guard::RequireAuth;
use crate::util::messages::describe_error;

/// Flatten the opaque results object into displayable `(field, value)`
/// pairs, in the backend's key order.
pub(crate) fn result_entries(results: &serde_json::Value) -> Vec<(String, String)> {
    let Some(object) = results.as_object() else {
        return Vec::new();
    };
    object
        .iter()
        .map(|(key, value)| {
            let rendered = match value {
                serde_json::Value::String(s) => s.clone(),
                other => other.to_string(),
            };
            (key.clone(), rendered)
        })
        .collect()
}

/// Test detail page — reads the test id from the route parameter.
#[component]
pub fn TestDetailPage() -> impl IntoView {
    let params = use_params_map();
    let test_id = move || params.read().get("id");

    let test = use_test(test_id);
    let test_types = use_test_types();

    let type_name = move || {
        test.resource()
            .map(|t| {
                super::test_list::test_type_name(&test_types.resource(), &t.test_type_id)
            })
            .unwrap_or_default()
    };

    view! {
        <RequireAuth>
            <section class="test-detail-page">
                <Show when=move || test.loading()>
                    <p>"Loading result..."</p>
                </Show>
                <Show when=move || test.error().is_some()>
                    <p class="test-detail-page__error">
                        {move || test.error().map(|e| describe_error(&e)).unwrap_or_default()}
                    </p>
                </Show>
                <Show when=move || test.resource().is_some()>
                    <h1>{type_name}</h1>
                    <p class="test-detail-page__recorded">
                        {move || {
                            test.resource().map(|t| t.creation_time).unwrap_or_default()
                        }}
                    </p>
                    <dl class="test-detail-page__results">
                        {move || {
                            test.resource()
                                .map(|t| result_entries(&t.results))
                                .unwrap_or_default()
                                .into_iter()
                                .map(|(field, value)| {
                                    view! {
                                        <dt>{field}</dt>
                                        <dd>{value}</dd>
                                    }
                                })
                                .collect::<Vec<_>>()
                        }}
                    </dl>
                </Show>
            </section>
        </RequireAuth>
    }
}
