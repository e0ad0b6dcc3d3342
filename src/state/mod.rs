//! Shared client-side state modules.
//!
//! DESIGN
//! ======
//! State is split by concern: `auth` owns the session token, `resource`
//! owns the generic fetch envelope, `resources` binds the individual
//! backend resources, and `sharing_code` layers the countdown/renewal
//! machine on top. Models are plain structs wired into `RwSignal` context
//! so their transitions stay unit-testable off the browser.

pub mod auth;
pub mod resource;
pub mod resources;
pub mod sharing_code;
