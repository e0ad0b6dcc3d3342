//! Reusable UI component modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! Components render page chrome and resource views while reading shared
//! state from Leptos context providers; mutation flows stay in pages.

pub mod nav_bar;
pub mod sharing_panel;
pub mod test_card;
