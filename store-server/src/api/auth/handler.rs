//! Authentication Handlers
//!
//! Handles registration, login, and password management.

use std::time::Duration;

use axum::{Json, extract::State, http::StatusCode};
use chrono::Utc;
use rand::RngCore;
use sha2::{Digest, Sha256};

use shared::client::{
    ChangePasswordRequest, ForgotPasswordRequest, LoginRequest, LoginResponse, MessageResponse,
    RegisterRequest, RegisterResponse, ResetPasswordRequest, UserInfo,
};

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::models::UserCreate;
use crate::db::repository::{RepoError, UserRepository};
use crate::utils::{AppError, AppResult, ErrorCode, validate_request};

/// Fixed delay for authentication to prevent timing attacks
const AUTH_FIXED_DELAY_MS: u64 = 100;

/// Reset tokens stay valid for one hour
const RESET_TOKEN_TTL_MILLIS: i64 = 60 * 60 * 1000;

fn token_digest(token: &str) -> String {
    hex::encode(Sha256::digest(token.as_bytes()))
}

/// Registration handler
///
/// New accounts are always created with the `user` role; promotion to
/// supplier or admin is an admin operation.
pub async fn register(
    State(state): State<ServerState>,
    Json(req): Json<RegisterRequest>,
) -> AppResult<(StatusCode, Json<RegisterResponse>)> {
    validate_request(&req)?;

    let repo = UserRepository::new(state.db.clone());
    let user = repo
        .create(UserCreate {
            name: req.name,
            email: req.email,
            password: req.password,
        })
        .await
        .map_err(|e| match e {
            RepoError::Duplicate(_) => AppError::new(ErrorCode::EmailExists),
            other => other.into(),
        })?;

    tracing::info!(user_id = %user.id_string(), email = %user.email, "User registered");

    Ok((
        StatusCode::CREATED,
        Json(RegisterResponse {
            message: "User created successfully".to_string(),
            user: UserInfo::from(&user),
        }),
    ))
}

/// Login handler
///
/// Authenticates credentials and returns a JWT session token. The error is
/// identical for unknown emails and wrong passwords so accounts cannot be
/// enumerated.
pub async fn login(
    State(state): State<ServerState>,
    Json(req): Json<LoginRequest>,
) -> AppResult<Json<LoginResponse>> {
    let repo = UserRepository::new(state.db.clone());
    let user = repo.find_by_email(&req.email).await?;

    // Fixed delay to prevent timing attacks (before checking result)
    tokio::time::sleep(Duration::from_millis(AUTH_FIXED_DELAY_MS)).await;

    let user = match user {
        Some(user) => {
            let password_valid = user
                .verify_password(&req.password)
                .map_err(|e| AppError::internal(format!("Password verification failed: {}", e)))?;

            if !password_valid {
                tracing::warn!(email = %req.email, "Login failed - invalid credentials");
                return Err(AppError::invalid_credentials());
            }

            user
        }
        None => {
            tracing::warn!(email = %req.email, "Login failed - user not found");
            return Err(AppError::invalid_credentials());
        }
    };

    let user_id = user.id_string();
    let token = state
        .get_jwt_service()
        .generate_token(&user_id, &user.name, &user.email, user.role)
        .map_err(|e| AppError::internal(format!("Failed to generate token: {}", e)))?;

    tracing::info!(
        user_id = %user_id,
        email = %user.email,
        role = %user.role,
        "User logged in successfully"
    );

    Ok(Json(LoginResponse {
        token,
        user: UserInfo::from(&user),
    }))
}

/// Get current user info
pub async fn me(
    State(state): State<ServerState>,
    user: CurrentUser,
) -> AppResult<Json<UserInfo>> {
    // Fresh read so role changes take effect without a new login
    let repo = UserRepository::new(state.db.clone());
    let record = repo
        .find_by_id(&user.id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::UserNotFound))?;

    Ok(Json(UserInfo::from(&record)))
}

/// Logout handler
pub async fn logout(
    user: CurrentUser,
) -> AppResult<Json<MessageResponse>> {
    tracing::info!(user_id = %user.id, email = %user.email, "User logged out");
    Ok(Json(MessageResponse::new("Logged out")))
}

/// Change password (authenticated)
pub async fn change_password(
    State(state): State<ServerState>,
    user: CurrentUser,
    Json(req): Json<ChangePasswordRequest>,
) -> AppResult<Json<MessageResponse>> {
    validate_request(&req)?;

    let repo = UserRepository::new(state.db.clone());
    let record = repo
        .find_by_id(&user.id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::UserNotFound))?;

    let current_valid = record
        .verify_password(&req.current_password)
        .map_err(|e| AppError::internal(format!("Password verification failed: {}", e)))?;
    if !current_valid {
        return Err(AppError::invalid_credentials());
    }

    repo.update_password(&user.id, &req.new_password).await?;

    tracing::info!(user_id = %user.id, "Password changed");
    Ok(Json(MessageResponse::new("Password updated successfully")))
}

/// Start the password-reset flow
///
/// The response is the same whether or not the email exists. Only a SHA-256
/// digest of the token is stored; the raw token goes to the mail
/// collaborator.
pub async fn forgot_password(
    State(state): State<ServerState>,
    Json(req): Json<ForgotPasswordRequest>,
) -> AppResult<Json<MessageResponse>> {
    validate_request(&req)?;

    let repo = UserRepository::new(state.db.clone());
    if let Some(user) = repo.find_by_email(&req.email).await? {
        let mut raw = [0u8; 32];
        rand::thread_rng().fill_bytes(&mut raw);
        let token = hex::encode(raw);

        let expiry = Utc::now().timestamp_millis() + RESET_TOKEN_TTL_MILLIS;
        repo.set_reset_token(&user.id_string(), &token_digest(&token), expiry)
            .await?;

        if let Err(e) = state.mailer.send_password_reset(&user.email, &token).await {
            tracing::error!(email = %user.email, error = %e, "Failed to send reset mail");
        }
    }

    Ok(Json(MessageResponse::new(
        "If that email is registered, a reset link has been sent",
    )))
}

/// Complete the password-reset flow
pub async fn reset_password(
    State(state): State<ServerState>,
    Json(req): Json<ResetPasswordRequest>,
) -> AppResult<Json<MessageResponse>> {
    validate_request(&req)?;

    let repo = UserRepository::new(state.db.clone());
    let user = repo
        .find_by_reset_token(&token_digest(&req.token))
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::ResetTokenInvalid))?;

    let expired = user
        .reset_token_expiry
        .is_none_or(|expiry| expiry < Utc::now().timestamp_millis());
    if expired {
        return Err(AppError::new(ErrorCode::ResetTokenExpired));
    }

    // Consumes the token - reset links are single-use
    repo.reset_password(&user.id_string(), &req.new_password)
        .await?;

    tracing::info!(user_id = %user.id_string(), "Password reset completed");
    Ok(Json(MessageResponse::new("Password updated successfully")))
}
