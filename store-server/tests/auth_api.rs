//! Auth API tests
//!
//! Registration, login, and the password-management flows.

mod common;

use common::*;
use http::StatusCode;
use serde_json::json;

#[tokio::test]
async fn register_creates_plain_user() {
    let app = spawn_app().await;

    let (status, body) = request(
        &app,
        "POST",
        "/api/auth/register",
        None,
        Some(json!({ "name": "Ada", "email": "ada@example.com", "password": "a-strong-password" })),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["user"]["email"], json!("ada@example.com"));
    // Registration never grants elevated roles
    assert_eq!(body["user"]["role"], json!("user"));
}

#[tokio::test]
async fn register_rejects_duplicates_and_bad_input() {
    let app = spawn_app().await;
    register_user(&app, "Ada", "ada@example.com", "a-strong-password").await;

    let (status, _) = request(
        &app,
        "POST",
        "/api/auth/register",
        None,
        Some(json!({ "name": "Imposter", "email": "ada@example.com", "password": "a-strong-password" })),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, _) = request(
        &app,
        "POST",
        "/api/auth/register",
        None,
        Some(json!({ "name": "X", "email": "not-an-email", "password": "a-strong-password" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = request(
        &app,
        "POST",
        "/api/auth/register",
        None,
        Some(json!({ "name": "X", "email": "x@example.com", "password": "short" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn login_rejects_bad_credentials_uniformly() {
    let app = spawn_app().await;
    register_user(&app, "Ada", "ada@example.com", "a-strong-password").await;

    let (status, wrong_password) = request(
        &app,
        "POST",
        "/api/auth/login",
        None,
        Some(json!({ "email": "ada@example.com", "password": "wrong" })),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, unknown_user) = request(
        &app,
        "POST",
        "/api/auth/login",
        None,
        Some(json!({ "email": "ghost@example.com", "password": "wrong" })),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    // Same message both ways, so accounts cannot be enumerated
    assert_eq!(wrong_password["message"], unknown_user["message"]);
}

#[tokio::test]
async fn me_requires_session_and_reads_fresh_state() {
    let app = spawn_app().await;
    let token = register_and_login(&app, "ada@example.com").await;

    let (status, body) = request(&app, "GET", "/api/auth/me", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["email"], json!("ada@example.com"));

    let (status, _) = request(&app, "GET", "/api/auth/me", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = request(&app, "GET", "/api/auth/me", Some("not.a.jwt"), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn change_password_verifies_current_password() {
    let app = spawn_app().await;
    let token = register_and_login(&app, "ada@example.com").await;

    let (status, _) = request(
        &app,
        "POST",
        "/api/auth/change-password",
        Some(&token),
        Some(json!({ "currentPassword": "wrong", "newPassword": "another-strong-one" })),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = request(
        &app,
        "POST",
        "/api/auth/change-password",
        Some(&token),
        Some(json!({ "currentPassword": "a-strong-password", "newPassword": "another-strong-one" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    // Old password is dead, new one works
    let (status, _) = request(
        &app,
        "POST",
        "/api/auth/login",
        None,
        Some(json!({ "email": "ada@example.com", "password": "a-strong-password" })),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    login(&app, "ada@example.com", "another-strong-one").await;
}

#[tokio::test]
async fn password_reset_flow_consumes_token() {
    let app = spawn_app().await;
    register_user(&app, "Ada", "ada@example.com", "a-strong-password").await;

    let (status, _) = request(
        &app,
        "POST",
        "/api/auth/forgot-password",
        None,
        Some(json!({ "email": "ada@example.com" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let token = app.mailer.last_token_for("ada@example.com").unwrap();

    let (status, _) = request(
        &app,
        "POST",
        "/api/auth/reset-password",
        None,
        Some(json!({ "token": token, "newPassword": "reset-password-1" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    login(&app, "ada@example.com", "reset-password-1").await;

    // Reset links are single-use
    let (status, _) = request(
        &app,
        "POST",
        "/api/auth/reset-password",
        None,
        Some(json!({ "token": token, "newPassword": "reset-password-2" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn expired_reset_token_is_rejected() {
    let app = spawn_app().await;
    register_user(&app, "Ada", "ada@example.com", "a-strong-password").await;

    request(
        &app,
        "POST",
        "/api/auth/forgot-password",
        None,
        Some(json!({ "email": "ada@example.com" })),
    )
    .await;
    let token = app.mailer.last_token_for("ada@example.com").unwrap();

    // Force the expiry into the past
    app.state
        .db
        .query("UPDATE user SET resetTokenExpiry = 1 WHERE email = 'ada@example.com'")
        .await
        .unwrap()
        .check()
        .unwrap();

    let (status, _) = request(
        &app,
        "POST",
        "/api/auth/reset-password",
        None,
        Some(json!({ "token": token, "newPassword": "reset-password-1" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn forgot_password_does_not_leak_account_existence() {
    let app = spawn_app().await;
    register_user(&app, "Ada", "ada@example.com", "a-strong-password").await;

    let (status, known) = request(
        &app,
        "POST",
        "/api/auth/forgot-password",
        None,
        Some(json!({ "email": "ada@example.com" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, unknown) = request(
        &app,
        "POST",
        "/api/auth/forgot-password",
        None,
        Some(json!({ "email": "ghost@example.com" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(known, unknown);

    // Mail only ever goes to the real account
    assert_eq!(app.mailer.sent().len(), 1);
}

#[tokio::test]
async fn health_is_public() {
    let app = spawn_app().await;
    let (status, body) = request(&app, "GET", "/api/health", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], json!("ok"));
    assert_eq!(body["database"], json!("ok"));
}
