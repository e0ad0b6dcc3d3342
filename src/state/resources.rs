//! Typed resource bindings for the individual backend resources.
//!
//! SYSTEM CONTEXT
//! ==============
//! Thin wrappers over `bind_resource`: each picks an endpoint, a key, and
//! an initial value. Staleness, cancellation, and 401 handling stay in the
//! binder; permission-derived filtering stays pure in this module.

#[cfg(test)]
#[path = "resources_test.rs"]
mod resources_test;

use leptos::prelude::*;

use crate::net::api;
use crate::net::error::ApiError;
use crate::net::types::{Country, Role, Test, TestType, User};
use crate::state::auth::{AuthContext, AuthState};
use crate::state::resource::{ResourceBinding, bind_resource};
#[cfg(feature = "hydrate")]
use crate::state::auth::sign_out;

/// Profile binding plus its mutation entry point.
#[derive(Clone, Copy)]
pub struct ProfileHandle {
    /// The signed-in user's profile.
    pub binding: ResourceBinding<Option<User>>,
    /// Whether an update is in flight.
    pub saving: RwSignal<bool>,
    /// Failure of the most recent update, if it failed.
    pub save_error: RwSignal<Option<ApiError>>,
    auth: RwSignal<AuthState>,
}

impl ProfileHandle {
    /// Persist `user` and install the server's response as the new
    /// profile value. The server remains authoritative for the stored
    /// shape; the local value is only replaced by the response.
    pub fn update(&self, user: User) {
        #[cfg(feature = "hydrate")]
        {
            let auth = self.auth;
            let binding = self.binding;
            let saving = self.saving;
            let save_error = self.save_error;
            let Some(token) = auth.with_untracked(|s| s.token.clone()) else {
                save_error.set(Some(ApiError::AuthenticationRequired));
                return;
            };
            saving.set(true);
            save_error.set(None);
            leptos::task::spawn_local(async move {
                match api::update_user(&user, &token).await {
                    Ok(stored) => binding.set_resource(Some(stored)),
                    Err(err) if err.is_unauthorized() => sign_out(auth),
                    Err(err) if err.is_aborted() => {}
                    Err(err) => save_error.set(Some(err)),
                }
                let _ = saving.try_set(false);
            });
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = user;
        }
    }
}

/// Bind the signed-in user's profile.
pub fn use_profile() -> ProfileHandle {
    let auth = expect_context::<RwSignal<AuthState>>();
    let binding = bind_resource(
        None,
        move || AuthContext::from_state(&auth.get()).user_id,
        |token, user_id: String, signal| async move {
            api::fetch_user(&user_id, &token, signal).await.map(Some)
        },
    );
    ProfileHandle {
        binding,
        saving: RwSignal::new(false),
        save_error: RwSignal::new(None),
        auth,
    }
}

/// Bind the country catalog. Keyless; fetched once per mount.
pub fn use_countries() -> ResourceBinding<Vec<Country>> {
    bind_resource(Vec::new(), || Some(()), |token, (), signal| async move {
        api::fetch_countries(&token, signal).await
    })
}

/// Bind the full test-type catalog.
///
/// Consumers filter it down with [`permitted_test_types`]; the filtered
/// subset is derived state and never persisted.
pub fn use_test_types() -> ResourceBinding<Vec<TestType>> {
    bind_resource(Vec::new(), || Some(()), |token, (), signal| async move {
        api::fetch_test_types(&token, signal).await
    })
}

/// Bind the test list of the user identified by `user_id`. Re-fetches
/// whenever the key changes.
pub fn use_tests(
    user_id: impl Fn() -> Option<String> + 'static,
) -> ResourceBinding<Vec<Test>> {
    bind_resource(Vec::new(), user_id, |token, user_id: String, signal| async move {
        api::fetch_tests(&user_id, &token, signal).await
    })
}

/// Bind a single test by id. Re-fetches whenever the key changes.
pub fn use_test(
    test_id: impl Fn() -> Option<String> + 'static,
) -> ResourceBinding<Option<Test>> {
    bind_resource(None, test_id, |token, test_id: String, signal| async move {
        api::fetch_test(&test_id, &token, signal).await.map(Some)
    })
}

/// Bind the role catalog for the administration page.
pub fn use_roles() -> ResourceBinding<Vec<Role>> {
    bind_resource(Vec::new(), || Some(()), |token, (), signal| async move {
        api::fetch_roles(&token, signal).await
    })
}

/// The subset of `catalog` the current principal may record results for:
/// types needing no permission plus types whose permission is held.
#[must_use]
pub fn permitted_test_types(catalog: &[TestType], ctx: &AuthContext) -> Vec<TestType> {
    catalog
        .iter()
        .filter(|test_type| {
            test_type.needed_permission_to_add_results.is_empty()
                || ctx.has_permission(&test_type.needed_permission_to_add_results)
        })
        .cloned()
        .collect()
}
