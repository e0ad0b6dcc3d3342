//! Networking modules for the REST endpoint contract.
//!
//! SYSTEM CONTEXT
//! ==============
//! `api` performs the HTTP calls, `error` classifies their failures so the
//! resource binder can tell an expired session apart from an ordinary
//! failure, `token` decodes bearer-token claims, and `types` defines the
//! shared wire schema.

pub mod api;
pub mod error;
pub mod token;
pub mod types;

/// Abort signal threaded through endpoint calls.
///
/// Browser builds hand over a real `AbortSignal`; the server-side stubs
/// never receive one, so the alias collapses to an uninhabitable option.
#[cfg(feature = "hydrate")]
pub type RequestSignal = Option<web_sys::AbortSignal>;
#[cfg(not(feature = "hydrate"))]
pub type RequestSignal = Option<std::convert::Infallible>;
