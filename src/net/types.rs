//! Shared wire DTOs for the client/backend boundary.
//!
//! DESIGN
//! ======
//! These types mirror the backend's JSON payloads (camelCase keys) so serde
//! round-trips stay lossless. The backend owns every one of these shapes;
//! the client never invents fields, it only reads and echoes them.

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;

use serde::{Deserialize, Serialize};

/// A registered user as returned by the users endpoints.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Unique user identifier.
    pub id: String,
    /// Sign-in email address.
    pub email: String,
    /// Given name, if the profile has been filled in.
    pub first_name: Option<String>,
    /// Family name, if the profile has been filled in.
    pub last_name: Option<String>,
    /// ISO 8601 date of birth, if provided.
    pub date_of_birth: Option<String>,
    /// ISO 3166 country code of residence, if provided.
    pub country_code: Option<String>,
}

/// A selectable country of residence.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Country {
    /// ISO 3166 country code.
    pub code: String,
    /// English display name.
    pub name: String,
}

/// Server-defined descriptor of one recordable test kind.
///
/// `fields` is an opaque data-driven form descriptor; the client renders it
/// without interpreting its schema beyond enumerating field names.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestType {
    /// Unique test-type identifier.
    pub id: String,
    /// Display name (e.g. `"PCR"`).
    pub name: String,
    /// Opaque form descriptor for the result fields.
    pub fields: serde_json::Value,
    /// Permission a user must hold to record results of this type.
    pub needed_permission_to_add_results: String,
}

/// A recorded test result tied to a user and a test type.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Test {
    /// Unique test identifier.
    pub id: String,
    /// User the result belongs to.
    pub user_id: String,
    /// Test type the result was recorded against.
    pub test_type_id: String,
    /// ISO 8601 timestamp of when the result was recorded.
    pub creation_time: String,
    /// Result values keyed by descriptor field name.
    pub results: serde_json::Value,
}

/// Command payload for recording a new test result.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTestCommand {
    /// Test type to record against.
    pub test_type_id: String,
    /// Result values keyed by descriptor field name.
    pub results: serde_json::Value,
}

/// A perishable sharing secret issued on demand by the backend.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SharingCode {
    /// The secret to present to another user.
    pub code: String,
    /// Expiry timestamp in milliseconds since the Unix epoch.
    pub expiry_time: f64,
}

/// The grant produced by redeeming another user's sharing code.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccessPass {
    /// Owner of the record the pass grants access to.
    pub user_id: String,
    /// Expiry timestamp of the grant in milliseconds since the Unix epoch.
    pub expiry_time: f64,
}

/// Receipt for a requested magic sign-in link.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MagicLink {
    /// ISO 8601 timestamp of when the link was issued.
    pub creation_time: String,
    /// Whether the link is still redeemable.
    pub active: bool,
}

/// A backend role with its granted capability strings.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Role {
    /// Role name (e.g. `"lab-operator"`).
    pub name: String,
    /// Capability strings granted by the role.
    pub permissions: Vec<String>,
}

/// Command payload for bulk user creation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserCommand {
    /// Sign-in email address of the new user.
    pub email: String,
    /// Roles to assign at creation time.
    #[serde(default)]
    pub roles: Vec<String>,
}

/// Frontend configuration blob served by the backend and cached locally.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FrontendConfig {
    /// Entry URL of the external digital-identity authority.
    pub identity_authority_url: String,
}
