//! User Model

use serde::{Deserialize, Serialize};
use shared::client::UserInfo;
use shared::models::Role;
use surrealdb::RecordId;

use super::serde_helpers;

/// User ID type
pub type UserId = RecordId;

/// User account record
///
/// The argon2 password hash never serializes, so repository results can be
/// returned to API callers directly.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "serde_helpers::option_record_id"
    )]
    pub id: Option<UserId>,
    pub name: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password: String,
    #[serde(default)]
    pub role: Role,
    /// SHA-256 digest of the outstanding password-reset token
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reset_token: Option<String>,
    /// Reset token expiry (unix millis)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reset_token_expiry: Option<i64>,
    #[serde(default)]
    pub created_at: i64,
}

/// Registration payload handed to the repository (plain password)
#[derive(Debug, Clone)]
pub struct UserCreate {
    pub name: String,
    pub email: String,
    pub password: String,
}

impl User {
    /// Verify password using argon2
    pub fn verify_password(&self, password: &str) -> Result<bool, argon2::password_hash::Error> {
        use argon2::{
            Argon2,
            password_hash::{PasswordHash, PasswordVerifier},
        };

        let parsed_hash = PasswordHash::new(&self.password)?;
        Ok(Argon2::default()
            .verify_password(password.as_bytes(), &parsed_hash)
            .is_ok())
    }

    /// Hash password using argon2
    pub fn hash_password(password: &str) -> Result<String, argon2::password_hash::Error> {
        use argon2::{
            Argon2,
            password_hash::{PasswordHasher, SaltString, rand_core::OsRng},
        };

        let salt = SaltString::generate(&mut OsRng);
        let argon2 = Argon2::default();
        let password_hash = argon2.hash_password(password.as_bytes(), &salt)?;
        Ok(password_hash.to_string())
    }

    /// Record id as a "user:..." string (empty for unsaved records)
    pub fn id_string(&self) -> String {
        self.id.as_ref().map(|t| t.to_string()).unwrap_or_default()
    }
}

impl From<&User> for UserInfo {
    fn from(user: &User) -> Self {
        Self {
            id: user.id_string(),
            name: user.name.clone(),
            email: user.email.clone(),
            role: user.role,
        }
    }
}
