//! Page modules for route-level screens.
//!
//! ARCHITECTURE
//! ============
//! Each page owns route-scoped orchestration (bindings, mutations,
//! navigation) and delegates rendering details to `components`.

pub mod access;
pub mod add_test;
pub mod admin;
pub mod login;
pub mod profile;
pub mod share;
pub mod test_detail;
pub mod test_list;
