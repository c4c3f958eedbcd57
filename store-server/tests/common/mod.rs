//! Shared test harness
//!
//! Boots the full router against an in-memory database, a mock payment
//! gateway, and a token-recording mailer, then drives it with oneshot
//! requests.
#![allow(dead_code)]

use std::sync::Arc;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use axum::Router;
use axum::body::Body;
use http::{Request, StatusCode};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use surrealdb::Surreal;
use surrealdb::engine::local::{Db, Mem};
use tower::util::ServiceExt;

use store_server::api;
use store_server::auth::{JwtConfig, JwtService};
use store_server::core::{Config, ServerState};
use store_server::db::define_schema;
use store_server::services::{
    MailError, Mailer, PaymentError, PaymentGateway, PaymentIntent, PaymentMetadata,
};

// =============================================================================
// Collaborator doubles
// =============================================================================

/// Payment gateway double - records calls, fails on demand
pub struct MockGateway {
    fail: AtomicBool,
    calls: Mutex<Vec<i64>>,
}

impl MockGateway {
    pub fn new() -> Self {
        Self {
            fail: AtomicBool::new(false),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Make every subsequent intent creation fail
    pub fn set_fail(&self, fail: bool) {
        self.fail.store(fail, Ordering::SeqCst);
    }

    /// Minor-unit amounts of every intent requested so far
    pub fn amounts(&self) -> Vec<i64> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl PaymentGateway for MockGateway {
    async fn create_payment_intent(
        &self,
        amount_minor: i64,
        _currency: &str,
        metadata: &PaymentMetadata,
    ) -> Result<PaymentIntent, PaymentError> {
        self.calls.lock().unwrap().push(amount_minor);

        if self.fail.load(Ordering::SeqCst) {
            return Err(PaymentError::Declined("card declined".into()));
        }

        let id = format!("pi_test_{}", metadata.order_number);
        Ok(PaymentIntent {
            client_secret: format!("{id}_secret"),
            id,
        })
    }
}

/// Mailer double - captures reset tokens instead of sending anything
#[derive(Default)]
pub struct RecordingMailer {
    sent: Mutex<Vec<(String, String)>>,
}

impl RecordingMailer {
    /// (recipient, token) pairs in send order
    pub fn sent(&self) -> Vec<(String, String)> {
        self.sent.lock().unwrap().clone()
    }

    /// Most recent token sent to `email`
    pub fn last_token_for(&self, email: &str) -> Option<String> {
        self.sent
            .lock()
            .unwrap()
            .iter()
            .rev()
            .find(|(to, _)| to == email)
            .map(|(_, token)| token.clone())
    }
}

#[async_trait]
impl Mailer for RecordingMailer {
    async fn send_password_reset(&self, to: &str, reset_token: &str) -> Result<(), MailError> {
        self.sent
            .lock()
            .unwrap()
            .push((to.to_string(), reset_token.to_string()));
        Ok(())
    }
}

// =============================================================================
// Test application
// =============================================================================

pub struct TestApp {
    pub router: Router,
    pub state: ServerState,
    pub payments: Arc<MockGateway>,
    pub mailer: Arc<RecordingMailer>,
}

fn test_jwt_config() -> JwtConfig {
    JwtConfig {
        secret: "integration-test-secret-key-32-bytes!!".to_string(),
        expiration_minutes: 60,
        issuer: "store-server".to_string(),
        audience: "store-clients".to_string(),
    }
}

fn test_config() -> Config {
    Config {
        work_dir: "/tmp/storefront-test".to_string(),
        http_port: 0,
        jwt: test_jwt_config(),
        environment: "test".to_string(),
        stripe_secret_key: None,
        stripe_api_url: "http://localhost:0".to_string(),
    }
}

/// Boot the app against an in-memory database
pub async fn spawn_app() -> TestApp {
    let db: Surreal<Db> = Surreal::new::<Mem>(()).await.unwrap();
    db.use_ns("test").use_db("test").await.unwrap();
    define_schema(&db).await.unwrap();

    let payments = Arc::new(MockGateway::new());
    let mailer = Arc::new(RecordingMailer::default());

    let state = ServerState::new(
        test_config(),
        db,
        Arc::new(JwtService::with_config(test_jwt_config())),
        payments.clone(),
        mailer.clone(),
    );

    TestApp {
        router: api::build_app(state.clone()),
        state,
        payments,
        mailer,
    }
}

/// Drive one request through the router, returning status + parsed body
pub async fn request(
    app: &TestApp,
    method: &str,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {token}"));
    }

    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };

    (status, json)
}

// =============================================================================
// Account helpers
// =============================================================================

/// Register an account, returning its "user:..." id
pub async fn register_user(app: &TestApp, name: &str, email: &str, password: &str) -> String {
    let (status, body) = request(
        app,
        "POST",
        "/api/auth/register",
        None,
        Some(json!({ "name": name, "email": email, "password": password })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "register failed: {body}");
    body["user"]["id"].as_str().unwrap().to_string()
}

/// Log in, returning the bearer token
pub async fn login(app: &TestApp, email: &str, password: &str) -> String {
    let (status, body) = request(
        app,
        "POST",
        "/api/auth/login",
        None,
        Some(json!({ "email": email, "password": password })),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "login failed: {body}");
    body["token"].as_str().unwrap().to_string()
}

/// Register + login in one step
pub async fn register_and_login(app: &TestApp, email: &str) -> String {
    register_user(app, "Test User", email, "a-strong-password").await;
    login(app, email, "a-strong-password").await
}

/// Register an account, promote it to admin, and log in
pub async fn admin_token(app: &TestApp, email: &str) -> String {
    register_user(app, "Admin", email, "a-strong-password").await;
    app.state
        .db
        .query("UPDATE user SET role = 'admin' WHERE email = $email")
        .bind(("email", email.to_string()))
        .await
        .unwrap()
        .check()
        .unwrap();
    login(app, email, "a-strong-password").await
}

/// A complete shipping address as JSON
pub fn shipping_address() -> Value {
    json!({
        "firstName": "Ada",
        "lastName": "Lovelace",
        "email": "ada@example.com",
        "address": "1 Analytical Way",
        "city": "London",
        "state": "LDN",
        "zipCode": "E1 6AN"
    })
}

/// A one-line cart as JSON order items
pub fn order_items() -> Value {
    json!([
        { "productId": "product:widget", "name": "Widget", "price": 10.0, "quantity": 2 }
    ])
}
