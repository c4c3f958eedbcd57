//! Order Repository

use super::{BaseRepository, RepoError, RepoResult};
use crate::db::models::{Order, OrderCreate};
use chrono::Utc;
use shared::models::{OrderStatus, PaymentStatus};
use surrealdb::engine::local::Db;
use surrealdb::{RecordId, Surreal};

#[derive(Clone)]
pub struct OrderRepository {
    base: BaseRepository,
}

impl OrderRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Persist a new order with status `pending`
    ///
    /// The unique index on `orderNumber` surfaces collisions as
    /// [`RepoError::Duplicate`] so the caller can regenerate and retry.
    pub async fn create(&self, data: OrderCreate) -> RepoResult<Order> {
        let now = Utc::now().timestamp_millis();

        let mut result = self
            .base
            .db()
            .query(
                r#"CREATE order SET
                    orderNumber = $order_number,
                    userId = $user_id,
                    items = $items,
                    total = $total,
                    status = $status,
                    shippingAddress = $shipping_address,
                    paymentDetails = $payment_details,
                    createdAt = $now,
                    updatedAt = $now
                RETURN AFTER"#,
            )
            .bind(("order_number", data.order_number))
            .bind(("user_id", data.user_id))
            .bind(("items", data.items))
            .bind(("total", data.total))
            .bind(("status", OrderStatus::Pending))
            .bind(("shipping_address", data.shipping_address))
            .bind(("payment_details", data.payment_details))
            .bind(("now", now))
            .await?;

        let created: Option<Order> = result.take(0)?;
        created.ok_or_else(|| RepoError::Database("Failed to create order".to_string()))
    }

    /// Orders of one user, newest first
    pub async fn find_by_user(&self, user_id: &str) -> RepoResult<Vec<Order>> {
        let user_id = user_id.to_string();
        let orders: Vec<Order> = self
            .base
            .db()
            .query("SELECT * FROM order WHERE userId = $user_id ORDER BY createdAt DESC")
            .bind(("user_id", user_id))
            .await?
            .take(0)?;
        Ok(orders)
    }

    /// All orders, newest first (admin view)
    pub async fn find_all(&self) -> RepoResult<Vec<Order>> {
        let orders: Vec<Order> = self
            .base
            .db()
            .query("SELECT * FROM order ORDER BY createdAt DESC")
            .await?
            .take(0)?;
        Ok(orders)
    }

    /// Find order by id
    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<Order>> {
        let thing: RecordId = id
            .parse()
            .map_err(|_| RepoError::Validation(format!("Invalid ID: {}", id)))?;
        let order: Option<Order> = self.base.db().select(thing).await?;
        Ok(order)
    }

    /// Update an order's status (admin action or payment callback)
    pub async fn update_status(&self, id: &str, status: OrderStatus) -> RepoResult<Order> {
        let thing: RecordId = id
            .parse()
            .map_err(|_| RepoError::Validation(format!("Invalid ID: {}", id)))?;

        let mut result = self
            .base
            .db()
            .query("UPDATE $thing SET status = $status, updatedAt = $now RETURN AFTER")
            .bind(("thing", thing))
            .bind(("status", status))
            .bind(("now", Utc::now().timestamp_millis()))
            .await?;

        result
            .take::<Option<Order>>(0)?
            .ok_or_else(|| RepoError::NotFound(format!("Order {} not found", id)))
    }

    /// Attach the payment collaborator's intent id to the order
    pub async fn set_payment_intent(&self, id: &str, intent_id: &str) -> RepoResult<Order> {
        let thing: RecordId = id
            .parse()
            .map_err(|_| RepoError::Validation(format!("Invalid ID: {}", id)))?;

        let mut result = self
            .base
            .db()
            .query(
                "UPDATE $thing SET \
                 paymentDetails.stripePaymentIntentId = $intent_id, \
                 updatedAt = $now RETURN AFTER",
            )
            .bind(("thing", thing))
            .bind(("intent_id", intent_id.to_string()))
            .bind(("now", Utc::now().timestamp_millis()))
            .await?;

        result
            .take::<Option<Order>>(0)?
            .ok_or_else(|| RepoError::NotFound(format!("Order {} not found", id)))
    }

    /// Compensating update after a payment-collaborator failure
    ///
    /// The order is cancelled but retained as the audit trail of the
    /// failed attempt.
    pub async fn mark_payment_failed(&self, id: &str) -> RepoResult<Order> {
        let thing: RecordId = id
            .parse()
            .map_err(|_| RepoError::Validation(format!("Invalid ID: {}", id)))?;

        let mut result = self
            .base
            .db()
            .query(
                "UPDATE $thing SET \
                 status = $status, \
                 paymentDetails.status = $payment_status, \
                 updatedAt = $now RETURN AFTER",
            )
            .bind(("thing", thing))
            .bind(("status", OrderStatus::Cancelled))
            .bind(("payment_status", PaymentStatus::Failed))
            .bind(("now", Utc::now().timestamp_millis()))
            .await?;

        result
            .take::<Option<Order>>(0)?
            .ok_or_else(|| RepoError::NotFound(format!("Order {} not found", id)))
    }
}
