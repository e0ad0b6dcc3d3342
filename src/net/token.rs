//! Bearer-token claim decoding.
//!
//! DESIGN
//! ======
//! The token is a compact JWS string whose middle segment carries the
//! claims JSON. The client reads claims to personalize the UI and to
//! pre-filter permission-gated actions; it deliberately performs no
//! signature verification. The backend re-checks authorization on every
//! request, so a forged token buys nothing beyond a broken-looking UI.

#[cfg(test)]
#[path = "token_test.rs"]
mod token_test;

use base64::Engine as _;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use serde::Deserialize;
use thiserror::Error;

/// Claims carried by an authentication token.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenClaims {
    /// Identifier of the authenticated principal.
    pub user_id: String,
    /// Role names, informational only.
    #[serde(default)]
    pub roles: Vec<String>,
    /// Capability strings checked by the permission predicates.
    #[serde(default)]
    pub permissions: Vec<String>,
}

/// Failure to read claims out of a token.
///
/// Callers treat any decode failure identically to "no token".
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum DecodeError {
    /// The token is not a three-segment compact JWS string.
    #[error("token is not in compact claims format")]
    Malformed,
    /// The claims segment is not base64url or not the expected JSON shape.
    #[error("token claims could not be read: {0}")]
    Claims(String),
}

/// Decode the claims segment of `token`. Pure and synchronous.
///
/// # Errors
///
/// Returns [`DecodeError`] when the token deviates structurally from the
/// compact claims format in any way.
pub fn decode(token: &str) -> Result<TokenClaims, DecodeError> {
    let mut segments = token.split('.');
    let (Some(_header), Some(payload), Some(_signature), None) =
        (segments.next(), segments.next(), segments.next(), segments.next())
    else {
        return Err(DecodeError::Malformed);
    };
    if payload.is_empty() {
        return Err(DecodeError::Malformed);
    }

    let bytes = URL_SAFE_NO_PAD
        .decode(payload)
        .map_err(|e| DecodeError::Claims(e.to_string()))?;
    serde_json::from_slice(&bytes).map_err(|e| DecodeError::Claims(e.to_string()))
}
