use super::*;
use base64::Engine as _;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;

// =============================================================
// Helpers
// =============================================================

fn token_with_claims(claims_json: &str) -> String {
    let header = URL_SAFE_NO_PAD.encode(r#"{"alg":"HS256"}"#);
    let payload = URL_SAFE_NO_PAD.encode(claims_json);
    format!("{header}.{payload}.sig")
}

fn state_with(token: &str) -> AuthState {
    AuthState { token: Some(token.to_owned()) }
}

// =============================================================
// AuthContext derivation
// =============================================================

#[test]
fn context_from_signed_out_state_is_empty() {
    let ctx = AuthContext::from_state(&AuthState::default());
    assert!(ctx.token.is_none());
    assert!(ctx.user_id.is_none());
    assert!(!ctx.is_authenticated());
}

#[test]
fn context_reads_user_id_and_permissions() {
    let token = token_with_claims(r#"{"userId":"u1","permissions":["create-users"]}"#);
    let ctx = AuthContext::from_state(&state_with(&token));
    assert_eq!(ctx.user_id.as_deref(), Some("u1"));
    assert!(ctx.is_authenticated());
    assert!(ctx.has_permission("create-users"));
    assert!(!ctx.has_permission("add-test-results"));
}

#[test]
fn undecodable_token_behaves_like_no_token() {
    let ctx = AuthContext::from_state(&state_with("garbage"));
    assert!(ctx.token.is_none());
    assert!(ctx.user_id.is_none());
    assert!(!ctx.is_authenticated());
    assert!(!ctx.has_permission("create-users"));
    assert!(!ctx.has_permission(""));
}

#[test]
fn context_is_rederived_per_state_not_cached() {
    let token_a = token_with_claims(r#"{"userId":"a","permissions":["x"]}"#);
    let token_b = token_with_claims(r#"{"userId":"b","permissions":[]}"#);
    let ctx_a = AuthContext::from_state(&state_with(&token_a));
    let ctx_b = AuthContext::from_state(&state_with(&token_b));
    assert!(ctx_a.has_permission("x"));
    assert!(!ctx_b.has_permission("x"));
    assert_ne!(ctx_a.user_id, ctx_b.user_id);
}

// =============================================================
// Store operations (persistence is disabled off-browser)
// =============================================================

#[test]
fn authenticate_installs_the_token() {
    let auth = RwSignal::new(AuthState::default());
    authenticate(auth, "tok".to_owned());
    assert_eq!(auth.get_untracked().token.as_deref(), Some("tok"));
}

#[test]
fn authenticate_replaces_rather_than_merges() {
    let auth = RwSignal::new(AuthState::default());
    authenticate(auth, "first".to_owned());
    authenticate(auth, "second".to_owned());
    assert_eq!(auth.get_untracked().token.as_deref(), Some("second"));
}

#[test]
fn sign_out_clears_the_token_and_is_idempotent() {
    let auth = RwSignal::new(AuthState::default());
    authenticate(auth, "tok".to_owned());
    sign_out(auth);
    assert!(auth.get_untracked().token.is_none());
    sign_out(auth);
    assert!(auth.get_untracked().token.is_none());
}

#[test]
fn restore_session_is_noop_when_persistence_disabled() {
    let auth = RwSignal::new(AuthState::default());
    restore_session(auth);
    assert!(auth.get_untracked().token.is_none());
}
