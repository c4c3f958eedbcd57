use std::sync::Arc;

use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use crate::auth::JwtService;
use crate::core::error::{Result, ServerError};
use crate::core::Config;
use crate::db::DbService;
use crate::services::{LogMailer, Mailer, PaymentGateway, StripeGateway};

/// Server state - shared handles to every service
///
/// `ServerState` is the core data structure of the storefront backend,
/// holding shared references to all services. Cloning is shallow (Arc).
///
/// | Field | Type | Description |
/// |-------|------|-------------|
/// | config | Config | Configuration (immutable) |
/// | db | Surreal<Db> | Embedded database |
/// | jwt_service | Arc<JwtService> | JWT session service |
/// | payments | Arc<dyn PaymentGateway> | Payment collaborator |
/// | mailer | Arc<dyn Mailer> | Outbound mail collaborator |
#[derive(Clone)]
pub struct ServerState {
    /// Server configuration
    pub config: Config,
    /// Embedded database (SurrealDB)
    pub db: Surreal<Db>,
    /// JWT session service
    pub jwt_service: Arc<JwtService>,
    /// Payment collaborator (Stripe in production, mock in tests)
    pub payments: Arc<dyn PaymentGateway>,
    /// Outbound mail collaborator (log-only by default)
    pub mailer: Arc<dyn Mailer>,
}

impl ServerState {
    /// Create server state from pre-built parts
    ///
    /// Used by tests to plug in an in-memory database and a mock gateway;
    /// production code goes through [`ServerState::initialize`].
    pub fn new(
        config: Config,
        db: Surreal<Db>,
        jwt_service: Arc<JwtService>,
        payments: Arc<dyn PaymentGateway>,
        mailer: Arc<dyn Mailer>,
    ) -> Self {
        Self {
            config,
            db,
            jwt_service,
            payments,
            mailer,
        }
    }

    /// Initialize server state
    ///
    /// 1. Ensure the working directory structure exists
    /// 2. Open the embedded database (work_dir/database/storefront.db)
    /// 3. Build services (JWT, payment gateway, mailer)
    pub async fn initialize(config: &Config) -> Result<Self> {
        config.ensure_work_dir_structure()?;

        let db_path = config.database_dir().join("storefront.db");
        let db_service = DbService::new(&db_path.to_string_lossy())
            .await
            .map_err(|e| ServerError::Database(e.to_string()))?;

        let jwt_service = Arc::new(JwtService::with_config(config.jwt.clone()));
        let payments: Arc<dyn PaymentGateway> = Arc::new(StripeGateway::from_config(config));
        let mailer: Arc<dyn Mailer> = Arc::new(LogMailer);

        if config.stripe_secret_key.is_none() {
            tracing::warn!("STRIPE_SECRET_KEY not set - checkout payment intents will fail");
        }

        Ok(Self::new(
            config.clone(),
            db_service.db,
            jwt_service,
            payments,
            mailer,
        ))
    }

    /// Get the database handle
    pub fn get_db(&self) -> Surreal<Db> {
        self.db.clone()
    }

    /// Get the JWT service
    pub fn get_jwt_service(&self) -> Arc<JwtService> {
        self.jwt_service.clone()
    }
}
