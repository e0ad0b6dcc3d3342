//! Sharing-code presentation: the scannable token and its countdown.
//!
//! SYSTEM CONTEXT
//! ==============
//! Pure rendering over `SharingCodeHandle`; all countdown and renewal
//! behavior lives in `state::sharing_code`.

use leptos::prelude::*;

use crate::state::sharing_code::{SharingCodeHandle, SharingCodePhase};
use crate::util::messages::{describe_error, message};

/// Render the sharing code for scanning, with a proportional countdown
/// bar and the renewal/error states of the lifecycle.
#[component]
pub fn SharingPanel(
    /// Lifecycle handle obtained from `use_sharing_code`.
    handle: SharingCodeHandle,
) -> impl IntoView {
    let lifecycle = handle.lifecycle;
    let binding = handle.binding;

    let phase = move || lifecycle.get().phase;
    let code_text = move || {
        lifecycle.get().code.map(|c| c.code).unwrap_or_default()
    };
    let remaining_label = move || {
        let state = lifecycle.get();
        format!("{} {:.0}s", message("share.valid-for"), state.time_until_expiry.ceil())
    };
    let bar_width = move || {
        format!("{:.0}%", lifecycle.get().countdown_fraction() * 100.0)
    };

    view! {
        <div class="sharing-panel">
            <Show when=move || matches!(phase(), SharingCodePhase::Idle | SharingCodePhase::Loading)>
                <p class="sharing-panel__hint">"Preparing your sharing code..."</p>
            </Show>

            <Show when=move || {
                matches!(phase(), SharingCodePhase::Active | SharingCodePhase::Renewing)
            }>
                <div class="sharing-panel__token" aria-label="sharing code">
                    <span class="sharing-panel__code">{code_text}</span>
                </div>
                <div class="sharing-panel__countdown">
                    <div class="sharing-panel__countdown-bar" style:width=bar_width></div>
                </div>
                <p class="sharing-panel__remaining">{remaining_label}</p>
                <Show when=move || phase() == SharingCodePhase::Renewing>
                    <p class="sharing-panel__hint">{message("share.renewing")}</p>
                </Show>
            </Show>

            <Show when=move || phase() == SharingCodePhase::Error>
                <p class="sharing-panel__error">
                    {move || binding.error().map(|e| describe_error(&e)).unwrap_or_default()}
                </p>
                <button class="btn" on:click=move |_| binding.reload()>
                    "Try again"
                </button>
            </Show>
        </div>
    }
}
