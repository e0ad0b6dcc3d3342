//! Card rendering one recorded test in a result list.

use leptos::prelude::*;

use crate::net::types::Test;

/// Compact card linking to the test's detail view.
#[component]
pub fn TestCard(
    /// The recorded test.
    test: Test,
    /// Display name of its test type.
    type_name: String,
) -> impl IntoView {
    let href = format!("/tests/{}", test.id);

    view! {
        <a class="test-card" href=href>
            <span class="test-card__type">{type_name}</span>
            <span class="test-card__recorded">{test.creation_time}</span>
        </a>
    }
}
