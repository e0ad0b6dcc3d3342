use super::*;
use base64::Engine as _;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;

// =============================================================
// Helpers
// =============================================================

fn encode_token(claims_json: &str) -> String {
    let header = URL_SAFE_NO_PAD.encode(r#"{"alg":"HS256","typ":"JWT"}"#);
    let payload = URL_SAFE_NO_PAD.encode(claims_json);
    format!("{header}.{payload}.signature")
}

// =============================================================
// decode
// =============================================================

#[test]
fn decode_reads_all_claim_fields() {
    let token = encode_token(
        r#"{"userId":"u1","roles":["admin"],"permissions":["create-users","add-test-results"]}"#,
    );
    let claims = decode(&token).unwrap();
    assert_eq!(claims.user_id, "u1");
    assert_eq!(claims.roles, vec!["admin".to_owned()]);
    assert_eq!(
        claims.permissions,
        vec!["create-users".to_owned(), "add-test-results".to_owned()]
    );
}

#[test]
fn decode_defaults_missing_role_and_permission_sets() {
    let token = encode_token(r#"{"userId":"u1"}"#);
    let claims = decode(&token).unwrap();
    assert_eq!(claims.user_id, "u1");
    assert!(claims.roles.is_empty());
    assert!(claims.permissions.is_empty());
}

#[test]
fn decode_rejects_wrong_segment_count() {
    assert_eq!(decode("not-a-token"), Err(DecodeError::Malformed));
    assert_eq!(decode("one.two"), Err(DecodeError::Malformed));
    assert_eq!(decode("a.b.c.d"), Err(DecodeError::Malformed));
    assert_eq!(decode(""), Err(DecodeError::Malformed));
}

#[test]
fn decode_rejects_empty_payload_segment() {
    assert_eq!(decode("header..signature"), Err(DecodeError::Malformed));
}

#[test]
fn decode_rejects_non_base64_payload() {
    let err = decode("header.!!!.signature").unwrap_err();
    assert!(matches!(err, DecodeError::Claims(_)));
}

#[test]
fn decode_rejects_payload_that_is_not_claims_json() {
    let token = encode_token(r#"["just","an","array"]"#);
    let err = decode(&token).unwrap_err();
    assert!(matches!(err, DecodeError::Claims(_)));
}

#[test]
fn decode_rejects_missing_user_id() {
    let token = encode_token(r#"{"roles":[],"permissions":[]}"#);
    assert!(matches!(decode(&token), Err(DecodeError::Claims(_))));
}
