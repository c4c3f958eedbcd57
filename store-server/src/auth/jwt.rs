//! JWT session service
//!
//! Generates, validates, and parses the bearer tokens that back
//! credential sessions.

use chrono::{Duration, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use ring::rand::{SecureRandom, SystemRandom};
use serde::{Deserialize, Serialize};
use shared::models::Role;
use thiserror::Error;

/// JWT configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JwtConfig {
    /// Signing secret (at least 32 bytes)
    pub secret: String,
    /// Token lifetime in minutes
    pub expiration_minutes: i64,
    /// Token issuer
    pub issuer: String,
    /// Token audience
    pub audience: String,
}

impl Default for JwtConfig {
    fn default() -> Self {
        let secret = match load_jwt_secret() {
            Ok(secret) => secret,
            Err(e) => {
                #[cfg(debug_assertions)]
                {
                    tracing::warn!("JWT configuration error: {}, using generated dev key", e);
                    generate_printable_jwt_secret()
                }
                #[cfg(not(debug_assertions))]
                {
                    panic!("FATAL: JWT_SECRET configuration failed: {}", e);
                }
            }
        };

        Self {
            secret,
            expiration_minutes: std::env::var("JWT_EXPIRATION_MINUTES")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(1440), // 24 hours
            issuer: std::env::var("JWT_ISSUER").unwrap_or_else(|_| "store-server".to_string()),
            audience: std::env::var("JWT_AUDIENCE")
                .unwrap_or_else(|_| "store-clients".to_string()),
        }
    }
}

/// JWT claims stored in the token
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// User id (subject)
    pub sub: String,
    /// Display name
    pub name: String,
    /// Account email
    pub email: String,
    /// Role name
    pub role: String,
    /// Token type
    pub token_type: String,
    /// Expiration timestamp
    pub exp: i64,
    /// Issued-at timestamp
    pub iat: i64,
    /// Issuer
    pub iss: String,
    /// Audience
    pub aud: String,
}

/// JWT errors
#[derive(Error, Debug)]
pub enum JwtError {
    #[error("Invalid token: {0}")]
    InvalidToken(String),

    #[error("Token expired")]
    ExpiredToken,

    #[error("Invalid signature")]
    InvalidSignature,

    #[error("Token generation failed: {0}")]
    GenerationFailed(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

/// Generate a printable random JWT secret (development fallback)
pub fn generate_printable_jwt_secret() -> String {
    let allowed_chars =
        "ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789!@#$%^&*()-_=+";

    let rng = SystemRandom::new();
    let mut key = String::with_capacity(64);

    for _ in 0..64 {
        let mut byte = [0u8; 1];
        if rng.fill(&mut byte).is_err() {
            return "storefront-dev-secret-key-must-be-replaced-2026".to_string();
        }
        let idx = (byte[0] as usize) % allowed_chars.len();
        key.push(allowed_chars.as_bytes()[idx] as char);
    }

    key
}

/// Load the JWT secret from the environment
fn load_jwt_secret() -> Result<String, JwtError> {
    match std::env::var("JWT_SECRET") {
        Ok(secret) => {
            if secret.len() < 32 {
                return Err(JwtError::ConfigError(
                    "JWT_SECRET must be at least 32 characters long".to_string(),
                ));
            }
            Ok(secret)
        }
        Err(_) => Err(JwtError::ConfigError(
            "JWT_SECRET environment variable not set".to_string(),
        )),
    }
}

/// JWT session service
#[derive(Debug, Clone)]
pub struct JwtService {
    pub config: JwtConfig,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
}

impl JwtService {
    /// Create a new JWT service with the default configuration
    pub fn new() -> Self {
        Self::with_config(JwtConfig::default())
    }

    /// Create a new JWT service with the given configuration
    pub fn with_config(config: JwtConfig) -> Self {
        let encoding_key = EncodingKey::from_secret(config.secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(config.secret.as_bytes());

        Self {
            config,
            encoding_key,
            decoding_key,
        }
    }

    /// Generate a session token for a user
    pub fn generate_token(
        &self,
        user_id: &str,
        name: &str,
        email: &str,
        role: Role,
    ) -> Result<String, JwtError> {
        let now = Utc::now();
        let expiration = now + Duration::minutes(self.config.expiration_minutes);

        let claims = Claims {
            sub: user_id.to_string(),
            name: name.to_string(),
            email: email.to_string(),
            role: role.to_string(),
            token_type: "access".to_string(),
            exp: expiration.timestamp(),
            iat: now.timestamp(),
            iss: self.config.issuer.clone(),
            aud: self.config.audience.clone(),
        };

        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| JwtError::GenerationFailed(e.to_string()))
    }

    /// Validate and decode a token
    pub fn validate_token(&self, token: &str) -> Result<Claims, JwtError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_audience(&[&self.config.audience]);
        validation.set_issuer(&[&self.config.issuer]);
        validation.set_required_spec_claims(&["sub", "exp", "iat", "iss", "aud"]);

        let token_data = decode::<Claims>(token, &self.decoding_key, &validation).map_err(|e| {
            match e.kind() {
                ErrorKind::ExpiredSignature => JwtError::ExpiredToken,
                ErrorKind::InvalidSignature => JwtError::InvalidSignature,
                ErrorKind::InvalidToken => JwtError::InvalidToken(e.to_string()),
                _ => JwtError::InvalidToken(format!("Token validation failed: {}", e)),
            }
        })?;

        Ok(token_data.claims)
    }

    /// Extract the token from an Authorization header
    pub fn extract_from_header(header: &str) -> Option<&str> {
        header.strip_prefix("Bearer ")
    }
}

impl Default for JwtService {
    fn default() -> Self {
        Self::new()
    }
}

/// Current user context (parsed from JWT claims)
///
/// Created by the auth middleware and injected into the request extensions.
#[derive(Debug, Clone)]
pub struct CurrentUser {
    /// User id ("user:...")
    pub id: String,
    /// Display name
    pub name: String,
    /// Account email
    pub email: String,
    /// Account role
    pub role: Role,
}

impl TryFrom<Claims> for CurrentUser {
    type Error = shared::models::InvalidRole;

    fn try_from(claims: Claims) -> Result<Self, Self::Error> {
        Ok(Self {
            id: claims.sub,
            name: claims.name,
            email: claims.email,
            role: claims.role.parse()?,
        })
    }
}

impl CurrentUser {
    /// Whether this user holds the admin role
    ///
    /// Role is the sole authorization axis - admins pass every check.
    pub fn is_admin(&self) -> bool {
        self.role.is_admin()
    }
}
