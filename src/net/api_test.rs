use super::*;

// =============================================================
// Endpoint paths
// =============================================================

#[test]
fn user_endpoint_formats_expected_path() {
    assert_eq!(user_endpoint("u123"), "/api/users/u123");
}

#[test]
fn user_tests_endpoint_formats_expected_path() {
    assert_eq!(user_tests_endpoint("u123"), "/api/users/u123/tests");
}

#[test]
fn test_endpoint_formats_expected_path() {
    assert_eq!(test_endpoint("t9"), "/api/tests/t9");
}

#[test]
fn sharing_code_endpoint_formats_expected_path() {
    assert_eq!(sharing_code_endpoint("u123"), "/api/users/u123/sharing-code");
}

#[test]
fn access_pass_endpoint_formats_expected_path() {
    assert_eq!(access_pass_endpoint("u123"), "/api/users/u123/access-passes");
}

// =============================================================
// Headers and method names
// =============================================================

#[test]
fn bearer_prefixes_token() {
    assert_eq!(bearer("abc.def.ghi"), "Bearer abc.def.ghi");
}

#[test]
fn credential_method_wire_names() {
    assert_eq!(CredentialMethod::MagicLink.as_str(), "magic-link");
    assert_eq!(CredentialMethod::IdentitySession.as_str(), "identity-session");
}
