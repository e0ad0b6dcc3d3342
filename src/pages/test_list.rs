//! Result list page for one user's record.
//!
//! SYSTEM CONTEXT
//! ==============
//! Works for the signed-in user's own record and, after redeeming a
//! sharing code, for another user's. The backend enforces actual access;
//! this page only renders what it is allowed to fetch.

#[cfg(test)]
#[path = "test_list_test.rs"]
mod test_list_test;

use leptos::prelude::*;
use leptos_router::hooks::use_params_map;

use crate::components::test_card::TestCard;
use crate::net::types::{Test, TestType};
use crate::state::auth::{AuthContext, AuthState};
use crate::state::resources::{permitted_test_types, use_test_types, use_tests};
use crate::util::guard::RequireAuth;
use crate::util::messages::describe_error;

/// Display name of a test type, falling back to its id for types the
/// catalog no longer lists.
pub(crate) fn test_type_name(catalog: &[TestType], test_type_id: &str) -> String {
    catalog
        .iter()
        .find(|t| t.id == test_type_id)
        .map_or_else(|| test_type_id.to_owned(), |t| t.name.clone())
}

/// Newest results first. ISO 8601 timestamps order lexicographically.
pub(crate) fn sort_tests_newest_first(mut tests: Vec<Test>) -> Vec<Test> {
    tests.sort_by(|a, b| b.creation_time.cmp(&a.creation_time));
    tests
}

/// Result list page — reads the record owner from the route parameter.
#[component]
pub fn TestListPage() -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    let params = use_params_map();

    let owner_id = move || params.read().get("id");
    let tests = use_tests(owner_id);
    let test_types = use_test_types();

    let can_add = move || {
        let catalog = test_types.resource();
        let ctx = AuthContext::from_state(&auth.get());
        !permitted_test_types(&catalog, &ctx).is_empty()
    };
    let add_href = move || {
        owner_id().map_or_else(|| "/".to_owned(), |id| format!("/records/{id}/add"))
    };

    view! {
        <RequireAuth>
            <section class="test-list-page">
                <h1>"Test results"</h1>

                <Show when=can_add>
                    <a class="btn btn--primary" href=add_href>
                        "+ Record a test"
                    </a>
                </Show>

                <Show when=move || tests.error().is_some()>
                    <p class="test-list-page__error">
                        {move || tests.error().map(|e| describe_error(&e)).unwrap_or_default()}
                    </p>
                </Show>

                <Show
                    when=move || !tests.loading()
                    fallback=move || view! { <p>"Loading results..."</p> }
                >
                    <Show
                        when=move || !tests.resource().is_empty()
                        fallback=move || view! { <p>"No results recorded yet."</p> }
                    >
                        <div class="test-list-page__cards">
                            {move || {
                                let catalog = test_types.resource();
                                sort_tests_newest_first(tests.resource())
                                    .into_iter()
                                    .map(|test| {
                                        let type_name =
                                            test_type_name(&catalog, &test.test_type_id);
                                        view! { <TestCard test=test type_name=type_name /> }
                                    })
                                    .collect::<Vec<_>>()
                            }}
                        </div>
                    </Show>
                </Show>
            </section>
        </RequireAuth>
    }
}
