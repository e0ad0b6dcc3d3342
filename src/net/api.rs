//! REST endpoint bindings for the backend contract.
//!
//! Client-side (hydrate): real HTTP calls via `gloo-net`, carrying the
//! bearer token and an optional abort signal.
//! Server-side (SSR): stubs returning a network error since these
//! endpoints are only meaningful in the browser.
//!
//! ERROR HANDLING
//! ==============
//! Every call resolves to `Result<T, ApiError>`. A 401 response maps to
//! `ApiError::Unauthorized` so the resource binder can force a sign-out;
//! an aborted fetch maps to `ApiError::Aborted` and is filtered before it
//! reaches any state.

#![allow(clippy::unused_async)]

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use super::RequestSignal;
use super::error::ApiError;
use super::types::{
    AccessPass, Country, CreateTestCommand, CreateUserCommand, FrontendConfig, MagicLink, Role,
    SharingCode, Test, TestType, User,
};
#[cfg(feature = "hydrate")]
use serde::Deserialize;

/// How a credential code was obtained, for the exchange endpoint.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CredentialMethod {
    /// Token embedded in a magic sign-in link.
    MagicLink,
    /// Session code handed back by the external identity authority.
    IdentitySession,
}

impl CredentialMethod {
    /// Wire name of the method.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::MagicLink => "magic-link",
            Self::IdentitySession => "identity-session",
        }
    }
}

#[cfg(any(test, feature = "hydrate"))]
fn bearer(token: &str) -> String {
    format!("Bearer {token}")
}

#[cfg(any(test, feature = "hydrate"))]
fn user_endpoint(user_id: &str) -> String {
    format!("/api/users/{user_id}")
}

#[cfg(any(test, feature = "hydrate"))]
fn user_tests_endpoint(user_id: &str) -> String {
    format!("/api/users/{user_id}/tests")
}

#[cfg(any(test, feature = "hydrate"))]
fn test_endpoint(test_id: &str) -> String {
    format!("/api/tests/{test_id}")
}

#[cfg(any(test, feature = "hydrate"))]
fn sharing_code_endpoint(user_id: &str) -> String {
    format!("/api/users/{user_id}/sharing-code")
}

#[cfg(any(test, feature = "hydrate"))]
fn access_pass_endpoint(user_id: &str) -> String {
    format!("/api/users/{user_id}/access-passes")
}

#[cfg(not(feature = "hydrate"))]
fn server_stub() -> ApiError {
    ApiError::Network("not available on server".to_owned())
}

#[cfg(feature = "hydrate")]
fn send_failure(err: &gloo_net::Error) -> ApiError {
    ApiError::from_transport(&err.to_string())
}

#[cfg(feature = "hydrate")]
async fn read_response<T: serde::de::DeserializeOwned>(
    resp: gloo_net::http::Response,
) -> Result<T, ApiError> {
    if !resp.ok() {
        let status = resp.status();
        let message = resp.text().await.unwrap_or_default();
        return Err(ApiError::from_status(status, message));
    }
    resp.json::<T>()
        .await
        .map_err(|e| ApiError::from_transport(&e.to_string()))
}

/// Request a magic sign-in link for `email` via `POST /api/auth/magic-links`.
///
/// # Errors
///
/// Fails with a classified [`ApiError`] on transport or server failure.
pub async fn create_magic_link(email: &str) -> Result<MagicLink, ApiError> {
    #[cfg(feature = "hydrate")]
    {
        let payload = serde_json::json!({ "email": email });
        let resp = gloo_net::http::Request::post("/api/auth/magic-links")
            .json(&payload)
            .map_err(|e| send_failure(&e))?
            .send()
            .await
            .map_err(|e| send_failure(&e))?;
        read_response(resp).await
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = email;
        Err(server_stub())
    }
}

#[cfg(feature = "hydrate")]
#[derive(Debug, Deserialize)]
struct ExchangeResponse {
    token: String,
}

/// Exchange a one-time credential code for a bearer token via
/// `POST /api/auth/sessions`.
///
/// # Errors
///
/// Fails with a classified [`ApiError`]; an invalid or expired code comes
/// back as a non-401 status error.
pub async fn exchange_credential(
    method: CredentialMethod,
    code: &str,
    signal: RequestSignal,
) -> Result<String, ApiError> {
    #[cfg(feature = "hydrate")]
    {
        let payload = serde_json::json!({ "method": method.as_str(), "code": code });
        let resp = gloo_net::http::Request::post("/api/auth/sessions")
            .abort_signal(signal.as_ref())
            .json(&payload)
            .map_err(|e| send_failure(&e))?
            .send()
            .await
            .map_err(|e| send_failure(&e))?;
        let body: ExchangeResponse = read_response(resp).await?;
        Ok(body.token)
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (method, code, signal);
        Err(server_stub())
    }
}

/// Fetch the frontend configuration blob via `GET /api/config`.
///
/// # Errors
///
/// Fails with a classified [`ApiError`] on transport or server failure.
pub async fn fetch_frontend_config() -> Result<FrontendConfig, ApiError> {
    #[cfg(feature = "hydrate")]
    {
        let resp = gloo_net::http::Request::get("/api/config")
            .send()
            .await
            .map_err(|e| send_failure(&e))?;
        read_response(resp).await
    }
    #[cfg(not(feature = "hydrate"))]
    {
        Err(server_stub())
    }
}

/// Fetch a user via `GET /api/users/{id}`.
///
/// # Errors
///
/// Fails with a classified [`ApiError`]; 401 marks an expired session.
pub async fn fetch_user(
    user_id: &str,
    token: &str,
    signal: RequestSignal,
) -> Result<User, ApiError> {
    #[cfg(feature = "hydrate")]
    {
        let resp = gloo_net::http::Request::get(&user_endpoint(user_id))
            .header("Authorization", &bearer(token))
            .abort_signal(signal.as_ref())
            .send()
            .await
            .map_err(|e| send_failure(&e))?;
        read_response(resp).await
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (user_id, token, signal);
        Err(server_stub())
    }
}

/// Update a user via `PUT /api/users/{id}` and return the stored shape.
///
/// # Errors
///
/// Fails with a classified [`ApiError`]; validation rejections surface as
/// status errors.
pub async fn update_user(user: &User, token: &str) -> Result<User, ApiError> {
    #[cfg(feature = "hydrate")]
    {
        let resp = gloo_net::http::Request::put(&user_endpoint(&user.id))
            .header("Authorization", &bearer(token))
            .json(user)
            .map_err(|e| send_failure(&e))?
            .send()
            .await
            .map_err(|e| send_failure(&e))?;
        read_response(resp).await
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (user, token);
        Err(server_stub())
    }
}

/// Fetch the full test-type catalog via `GET /api/test-types`.
///
/// # Errors
///
/// Fails with a classified [`ApiError`]; 401 marks an expired session.
pub async fn fetch_test_types(
    token: &str,
    signal: RequestSignal,
) -> Result<Vec<TestType>, ApiError> {
    #[cfg(feature = "hydrate")]
    {
        let resp = gloo_net::http::Request::get("/api/test-types")
            .header("Authorization", &bearer(token))
            .abort_signal(signal.as_ref())
            .send()
            .await
            .map_err(|e| send_failure(&e))?;
        read_response(resp).await
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (token, signal);
        Err(server_stub())
    }
}

/// Fetch all tests recorded for a user via `GET /api/users/{id}/tests`.
///
/// # Errors
///
/// Fails with a classified [`ApiError`]; 401 marks an expired session.
pub async fn fetch_tests(
    user_id: &str,
    token: &str,
    signal: RequestSignal,
) -> Result<Vec<Test>, ApiError> {
    #[cfg(feature = "hydrate")]
    {
        let resp = gloo_net::http::Request::get(&user_tests_endpoint(user_id))
            .header("Authorization", &bearer(token))
            .abort_signal(signal.as_ref())
            .send()
            .await
            .map_err(|e| send_failure(&e))?;
        read_response(resp).await
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (user_id, token, signal);
        Err(server_stub())
    }
}

/// Fetch one test via `GET /api/tests/{id}`.
///
/// # Errors
///
/// Fails with a classified [`ApiError`]; 401 marks an expired session.
pub async fn fetch_test(
    test_id: &str,
    token: &str,
    signal: RequestSignal,
) -> Result<Test, ApiError> {
    #[cfg(feature = "hydrate")]
    {
        let resp = gloo_net::http::Request::get(&test_endpoint(test_id))
            .header("Authorization", &bearer(token))
            .abort_signal(signal.as_ref())
            .send()
            .await
            .map_err(|e| send_failure(&e))?;
        read_response(resp).await
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (test_id, token, signal);
        Err(server_stub())
    }
}

/// Record a test result via `POST /api/users/{id}/tests`.
///
/// # Errors
///
/// Fails with a classified [`ApiError`]; validation rejections surface as
/// status errors.
pub async fn create_test(
    user_id: &str,
    command: &CreateTestCommand,
    token: &str,
) -> Result<Test, ApiError> {
    #[cfg(feature = "hydrate")]
    {
        let resp = gloo_net::http::Request::post(&user_tests_endpoint(user_id))
            .header("Authorization", &bearer(token))
            .json(command)
            .map_err(|e| send_failure(&e))?
            .send()
            .await
            .map_err(|e| send_failure(&e))?;
        read_response(resp).await
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (user_id, command, token);
        Err(server_stub())
    }
}

/// Mint a fresh sharing code via `POST /api/users/{id}/sharing-code`.
///
/// Every call creates a new code; the previous one stays valid until its
/// own expiry but is never shown again.
///
/// # Errors
///
/// Fails with a classified [`ApiError`]; 401 marks an expired session.
pub async fn create_sharing_code(
    user_id: &str,
    token: &str,
    signal: RequestSignal,
) -> Result<SharingCode, ApiError> {
    #[cfg(feature = "hydrate")]
    {
        let resp = gloo_net::http::Request::post(&sharing_code_endpoint(user_id))
            .header("Authorization", &bearer(token))
            .abort_signal(signal.as_ref())
            .send()
            .await
            .map_err(|e| send_failure(&e))?;
        read_response(resp).await
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (user_id, token, signal);
        Err(server_stub())
    }
}

/// Redeem another user's sharing code via
/// `POST /api/users/{id}/access-passes`.
///
/// `user_id` is the redeeming user; the returned pass names the record
/// owner.
///
/// # Errors
///
/// Fails with a classified [`ApiError`]; an unknown or expired code comes
/// back as a non-401 status error.
pub async fn create_access_pass(
    user_id: &str,
    code: &str,
    token: &str,
) -> Result<AccessPass, ApiError> {
    #[cfg(feature = "hydrate")]
    {
        let payload = serde_json::json!({ "code": code });
        let resp = gloo_net::http::Request::post(&access_pass_endpoint(user_id))
            .header("Authorization", &bearer(token))
            .json(&payload)
            .map_err(|e| send_failure(&e))?
            .send()
            .await
            .map_err(|e| send_failure(&e))?;
        read_response(resp).await
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (user_id, code, token);
        Err(server_stub())
    }
}

/// Fetch the country catalog via `GET /api/countries`.
///
/// # Errors
///
/// Fails with a classified [`ApiError`]; 401 marks an expired session.
pub async fn fetch_countries(
    token: &str,
    signal: RequestSignal,
) -> Result<Vec<Country>, ApiError> {
    #[cfg(feature = "hydrate")]
    {
        let resp = gloo_net::http::Request::get("/api/countries")
            .header("Authorization", &bearer(token))
            .abort_signal(signal.as_ref())
            .send()
            .await
            .map_err(|e| send_failure(&e))?;
        read_response(resp).await
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (token, signal);
        Err(server_stub())
    }
}

/// Fetch the role catalog via `GET /api/roles`.
///
/// # Errors
///
/// Fails with a classified [`ApiError`]; 401 marks an expired session.
pub async fn fetch_roles(token: &str, signal: RequestSignal) -> Result<Vec<Role>, ApiError> {
    #[cfg(feature = "hydrate")]
    {
        let resp = gloo_net::http::Request::get("/api/roles")
            .header("Authorization", &bearer(token))
            .abort_signal(signal.as_ref())
            .send()
            .await
            .map_err(|e| send_failure(&e))?;
        read_response(resp).await
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (token, signal);
        Err(server_stub())
    }
}

/// Create users in bulk via `POST /api/users`.
///
/// # Errors
///
/// Fails with a classified [`ApiError`]; the whole batch fails or succeeds
/// together.
pub async fn create_users(
    commands: &[CreateUserCommand],
    token: &str,
) -> Result<Vec<User>, ApiError> {
    #[cfg(feature = "hydrate")]
    {
        let resp = gloo_net::http::Request::post("/api/users")
            .header("Authorization", &bearer(token))
            .json(&commands)
            .map_err(|e| send_failure(&e))?
            .send()
            .await
            .map_err(|e| send_failure(&e))?;
        read_response(resp).await
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (commands, token);
        Err(server_stub())
    }
}
