//! # healthpass
//!
//! Leptos + WASM frontend for the test-result tracking application.
//!
//! This crate contains pages, components, the authenticated-session state
//! layer, and the REST endpoint bindings. The session layer (token codec,
//! auth store, resource binder, sharing-code lifecycle) lives under `state`
//! and `net`; everything else is presentation glue around it.

pub mod app;
pub mod components;
pub mod net;
pub mod pages;
pub mod state;
pub mod util;

/// Browser entry point: install logging and hydrate the server-rendered DOM.
#[cfg(feature = "hydrate")]
#[wasm_bindgen::prelude::wasm_bindgen]
pub fn hydrate() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Debug);
    leptos::mount::hydrate_body(app::App);
}
