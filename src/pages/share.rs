//! Sharing page — presents the perishable sharing code.

use leptos::prelude::*;

use crate::components::sharing_panel::SharingPanel;
use crate::state::sharing_code::use_sharing_code;
use crate::util::guard::RequireAuth;

/// Share page — mounting requests a code; the panel keeps it fresh until
/// the page unmounts.
#[component]
pub fn SharePage() -> impl IntoView {
    let handle = use_sharing_code();

    view! {
        <RequireAuth>
            <section class="share-page">
                <h1>"Share your record"</h1>
                <p class="share-page__hint">
                    "Let another person scan this code to get temporary access to your results."
                </p>
                <SharingPanel handle=handle />
            </section>
        </RequireAuth>
    }
}
