//! User Repository

use super::{BaseRepository, RepoError, RepoResult};
use crate::db::models::{User, UserCreate};
use chrono::Utc;
use shared::models::Role;
use surrealdb::engine::local::Db;
use surrealdb::{RecordId, Surreal};

#[derive(Clone)]
pub struct UserRepository {
    base: BaseRepository,
}

impl UserRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Find all users, newest first
    pub async fn find_all(&self) -> RepoResult<Vec<User>> {
        let users: Vec<User> = self
            .base
            .db()
            .query("SELECT * FROM user ORDER BY createdAt DESC")
            .await?
            .take(0)?;
        Ok(users)
    }

    /// Find user by id
    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<User>> {
        let thing: RecordId = id
            .parse()
            .map_err(|_| RepoError::Validation(format!("Invalid ID: {}", id)))?;
        let user: Option<User> = self.base.db().select(thing).await?;
        Ok(user)
    }

    /// Find user by email
    pub async fn find_by_email(&self, email: &str) -> RepoResult<Option<User>> {
        let email_owned = email.to_string();
        let mut result = self
            .base
            .db()
            .query("SELECT * FROM user WHERE email = $email LIMIT 1")
            .bind(("email", email_owned))
            .await?;
        let users: Vec<User> = result.take(0)?;
        Ok(users.into_iter().next())
    }

    /// Create a new user account
    ///
    /// New accounts always start with the `user` role; promotion is an
    /// admin operation. The unique email index rejects duplicates.
    pub async fn create(&self, data: UserCreate) -> RepoResult<User> {
        let password = User::hash_password(&data.password)
            .map_err(|e| RepoError::Database(format!("Failed to hash password: {}", e)))?;

        let mut result = self
            .base
            .db()
            .query(
                r#"CREATE user SET
                    name = $name,
                    email = $email,
                    password = $password,
                    role = $role,
                    createdAt = $now
                RETURN AFTER"#,
            )
            .bind(("name", data.name))
            .bind(("email", data.email))
            .bind(("password", password))
            .bind(("role", Role::User))
            .bind(("now", Utc::now().timestamp_millis()))
            .await?;

        let created: Option<User> = result.take(0)?;
        created.ok_or_else(|| RepoError::Database("Failed to create user".to_string()))
    }

    /// Update a user's role
    pub async fn update_role(&self, id: &str, role: Role) -> RepoResult<User> {
        let thing: RecordId = id
            .parse()
            .map_err(|_| RepoError::Validation(format!("Invalid ID: {}", id)))?;

        let mut result = self
            .base
            .db()
            .query("UPDATE $thing SET role = $role RETURN AFTER")
            .bind(("thing", thing))
            .bind(("role", role))
            .await?;

        result
            .take::<Option<User>>(0)?
            .ok_or_else(|| RepoError::NotFound(format!("User {} not found", id)))
    }

    /// Replace a user's password hash
    pub async fn update_password(&self, id: &str, password: &str) -> RepoResult<User> {
        let thing: RecordId = id
            .parse()
            .map_err(|_| RepoError::Validation(format!("Invalid ID: {}", id)))?;
        let hash = User::hash_password(password)
            .map_err(|e| RepoError::Database(format!("Failed to hash password: {}", e)))?;

        let mut result = self
            .base
            .db()
            .query("UPDATE $thing SET password = $password RETURN AFTER")
            .bind(("thing", thing))
            .bind(("password", hash))
            .await?;

        result
            .take::<Option<User>>(0)?
            .ok_or_else(|| RepoError::NotFound(format!("User {} not found", id)))
    }

    /// Store a password-reset token digest with its expiry
    pub async fn set_reset_token(
        &self,
        id: &str,
        token_digest: &str,
        expiry_millis: i64,
    ) -> RepoResult<()> {
        let thing: RecordId = id
            .parse()
            .map_err(|_| RepoError::Validation(format!("Invalid ID: {}", id)))?;

        self.base
            .db()
            .query("UPDATE $thing SET resetToken = $token, resetTokenExpiry = $expiry")
            .bind(("thing", thing))
            .bind(("token", token_digest.to_string()))
            .bind(("expiry", expiry_millis))
            .await?
            .check()?;
        Ok(())
    }

    /// Find the user holding an outstanding reset token digest
    pub async fn find_by_reset_token(&self, token_digest: &str) -> RepoResult<Option<User>> {
        let digest = token_digest.to_string();
        let mut result = self
            .base
            .db()
            .query("SELECT * FROM user WHERE resetToken = $token LIMIT 1")
            .bind(("token", digest))
            .await?;
        let users: Vec<User> = result.take(0)?;
        Ok(users.into_iter().next())
    }

    /// Set a new password and consume the reset token
    pub async fn reset_password(&self, id: &str, password: &str) -> RepoResult<User> {
        let thing: RecordId = id
            .parse()
            .map_err(|_| RepoError::Validation(format!("Invalid ID: {}", id)))?;
        let hash = User::hash_password(password)
            .map_err(|e| RepoError::Database(format!("Failed to hash password: {}", e)))?;

        let mut result = self
            .base
            .db()
            .query(
                "UPDATE $thing SET password = $password, \
                 resetToken = NONE, resetTokenExpiry = NONE RETURN AFTER",
            )
            .bind(("thing", thing))
            .bind(("password", hash))
            .await?;

        result
            .take::<Option<User>>(0)?
            .ok_or_else(|| RepoError::NotFound(format!("User {} not found", id)))
    }

    /// Hard delete a user
    pub async fn delete(&self, id: &str) -> RepoResult<()> {
        let thing: RecordId = id
            .parse()
            .map_err(|_| RepoError::Validation(format!("Invalid ID: {}", id)))?;
        let deleted: Option<User> = self.base.db().delete(thing).await?;
        if deleted.is_none() {
            return Err(RepoError::NotFound(format!("User {} not found", id)));
        }
        Ok(())
    }
}
