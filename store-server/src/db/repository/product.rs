//! Product Repository

use super::{BaseRepository, RepoError, RepoResult};
use crate::db::models::{Product, ProductCreate, ProductUpdate};
use crate::db::query::ProductQuery;
use chrono::Utc;
use serde::Deserialize;
use surrealdb::engine::local::Db;
use surrealdb::{RecordId, Surreal};

#[derive(Debug, Deserialize)]
struct CountRow {
    count: u64,
}

#[derive(Clone)]
pub struct ProductRepository {
    base: BaseRepository,
}

impl ProductRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Fetch one listing page plus the total matching-record count
    pub async fn find_page(&self, query: &ProductQuery) -> RepoResult<(Vec<Product>, u64)> {
        let mut select = self.base.db().query(query.select_statement());
        for (name, value) in query.bindings() {
            select = select.bind((*name, value.clone()));
        }
        let products: Vec<Product> = select.await?.take(0)?;

        let mut count = self.base.db().query(query.count_statement());
        for (name, value) in query.bindings() {
            count = count.bind((*name, value.clone()));
        }
        let rows: Vec<CountRow> = count.await?.take(0)?;
        let total = rows.first().map(|r| r.count).unwrap_or(0);

        Ok((products, total))
    }

    /// Find product by id
    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<Product>> {
        let thing: RecordId = id
            .parse()
            .map_err(|_| RepoError::Validation(format!("Invalid ID: {}", id)))?;
        let product: Option<Product> = self.base.db().select(thing).await?;
        Ok(product)
    }

    /// Create a new product
    pub async fn create(&self, data: ProductCreate) -> RepoResult<Product> {
        if data.price < 0.0 || !data.price.is_finite() {
            return Err(RepoError::Validation("price must be non-negative".into()));
        }

        let mut result = self
            .base
            .db()
            .query(
                r#"CREATE product SET
                    name = $name,
                    description = $description,
                    price = $price,
                    category = $category,
                    stock = $stock,
                    images = $images,
                    isActive = true,
                    createdAt = $now
                RETURN AFTER"#,
            )
            .bind(("name", data.name))
            .bind(("description", data.description.unwrap_or_default()))
            .bind(("price", data.price))
            .bind(("category", data.category))
            .bind(("stock", data.stock.unwrap_or(0)))
            .bind(("images", data.images.unwrap_or_default()))
            .bind(("now", Utc::now().timestamp_millis()))
            .await?;

        let created: Option<Product> = result.take(0)?;
        created.ok_or_else(|| RepoError::Database("Failed to create product".to_string()))
    }

    /// Update a product
    pub async fn update(&self, id: &str, data: ProductUpdate) -> RepoResult<Product> {
        let thing: RecordId = id
            .parse()
            .map_err(|_| RepoError::Validation(format!("Invalid ID: {}", id)))?;

        if let Some(price) = data.price
            && (price < 0.0 || !price.is_finite())
        {
            return Err(RepoError::Validation("price must be non-negative".into()));
        }

        // Build dynamic SET clauses so absent fields stay untouched
        let mut set_parts: Vec<&str> = Vec::new();
        if data.name.is_some() {
            set_parts.push("name = $name");
        }
        if data.description.is_some() {
            set_parts.push("description = $description");
        }
        if data.price.is_some() {
            set_parts.push("price = $price");
        }
        if data.category.is_some() {
            set_parts.push("category = $category");
        }
        if data.stock.is_some() {
            set_parts.push("stock = $stock");
        }
        if data.images.is_some() {
            set_parts.push("images = $images");
        }
        if data.is_active.is_some() {
            set_parts.push("isActive = $isActive");
        }

        if set_parts.is_empty() {
            // No fields to update
            return self
                .find_by_id(id)
                .await?
                .ok_or_else(|| RepoError::NotFound(format!("Product {} not found", id)));
        }

        let statement = format!("UPDATE $thing SET {} RETURN AFTER", set_parts.join(", "));

        let mut query = self.base.db().query(statement).bind(("thing", thing));
        if let Some(v) = data.name {
            query = query.bind(("name", v));
        }
        if let Some(v) = data.description {
            query = query.bind(("description", v));
        }
        if let Some(v) = data.price {
            query = query.bind(("price", v));
        }
        if let Some(v) = data.category {
            query = query.bind(("category", v));
        }
        if let Some(v) = data.stock {
            query = query.bind(("stock", v));
        }
        if let Some(v) = data.images {
            query = query.bind(("images", v));
        }
        if let Some(v) = data.is_active {
            query = query.bind(("isActive", v));
        }

        let mut result = query.await?;
        result
            .take::<Option<Product>>(0)?
            .ok_or_else(|| RepoError::NotFound(format!("Product {} not found", id)))
    }

    /// Soft delete - hide the product from the catalog
    ///
    /// Order items hold snapshots, so deactivating a product never touches
    /// order history.
    pub async fn deactivate(&self, id: &str) -> RepoResult<Product> {
        self.update(
            id,
            ProductUpdate {
                name: None,
                description: None,
                price: None,
                category: None,
                stock: None,
                images: None,
                is_active: Some(false),
            },
        )
        .await
    }
}
