//! Client-side cart store
//!
//! A locally persisted collection of selected line items with derived
//! aggregates. State transitions are pure reducer-style operations on
//! [`CartState`]; [`CartStore`] wraps the state and mirrors every mutation
//! to a JSON file so a restart restores the cart.
//!
//! The cart is exclusively owned by one client session: mutations are
//! synchronous and never raise errors; out-of-range quantities are clamped
//! against the item's stock ceiling.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

/// Catalog data for a product being added to the cart (no quantity yet)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartProduct {
    pub id: String,
    pub name: String,
    pub price: f64,
    pub image: String,
    pub category: String,
    pub stock: u32,
}

/// A cart line item
///
/// Invariant: `0 < quantity <= stock` while the item is in the cart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
    pub id: String,
    pub name: String,
    pub price: f64,
    pub quantity: u32,
    pub image: String,
    pub category: String,
    pub stock: u32,
}

impl CartItem {
    fn from_product(product: CartProduct, quantity: u32) -> Self {
        Self {
            id: product.id,
            name: product.name,
            price: product.price,
            quantity,
            image: product.image,
            category: product.category,
            stock: product.stock,
        }
    }
}

/// Cart state with derived aggregates
///
/// `total_items` and `total_price` are recomputed after every mutation and
/// always equal the sum of quantities / the dot product of quantities and
/// prices.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartState {
    pub items: Vec<CartItem>,
    pub total_items: u32,
    pub total_price: f64,
}

impl CartState {
    /// Add a product to the cart
    ///
    /// An existing line with the same id gains one unit, clamped to its
    /// stock ceiling; otherwise a new line starts at quantity 1.
    pub fn add_item(&mut self, product: CartProduct) {
        match self.items.iter_mut().find(|i| i.id == product.id) {
            Some(existing) => {
                existing.quantity = (existing.quantity + 1).min(existing.stock);
            }
            None => {
                self.items.push(CartItem::from_product(product, 1));
            }
        }
        self.recompute();
    }

    /// Remove a line item by id (no-op for unknown ids)
    pub fn remove_item(&mut self, id: &str) {
        self.items.retain(|i| i.id != id);
        self.recompute();
    }

    /// Set a line item's quantity, clamped to `[0, stock]`
    ///
    /// A clamped result of 0 drops the line entirely; there are no
    /// zero-quantity placeholders.
    pub fn update_quantity(&mut self, id: &str, quantity: u32) {
        if let Some(item) = self.items.iter_mut().find(|i| i.id == id) {
            item.quantity = quantity.min(item.stock);
        }
        self.items.retain(|i| i.quantity > 0);
        self.recompute();
    }

    /// Empty the cart and zero the aggregates
    pub fn clear(&mut self) {
        self.items.clear();
        self.recompute();
    }

    /// True when the cart holds no items
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Snapshot the cart lines as order items for a checkout submission
    pub fn to_order_items(&self) -> Vec<crate::models::OrderItem> {
        self.items
            .iter()
            .map(|item| crate::models::OrderItem {
                product_id: item.id.clone(),
                name: item.name.clone(),
                price: item.price,
                quantity: item.quantity,
            })
            .collect()
    }

    fn recompute(&mut self) {
        self.total_items = self.items.iter().map(|i| i.quantity).sum();
        self.total_price = self
            .items
            .iter()
            .map(|i| i.price * i.quantity as f64)
            .sum();
    }
}

/// Persisted cart store
///
/// Wraps [`CartState`] and writes it to a JSON file after every mutation.
/// Storage failures are logged and never surfaced; losing a persisted cart
/// only costs the user a reload of their selection.
#[derive(Debug, Clone, Default)]
pub struct CartStore {
    state: CartState,
    path: Option<PathBuf>,
}

impl CartStore {
    /// Create an in-memory store without persistence
    pub fn new() -> Self {
        Self::default()
    }

    /// Load the cart from a JSON file, falling back to an empty cart
    ///
    /// The path is remembered; subsequent mutations are written back to it.
    pub fn load(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let state = match fs::read_to_string(&path) {
            Ok(raw) => serde_json::from_str(&raw).unwrap_or_else(|e| {
                tracing::warn!(path = %path.display(), error = %e, "Discarding unreadable cart file");
                CartState::default()
            }),
            Err(_) => CartState::default(),
        };
        Self {
            state,
            path: Some(path),
        }
    }

    /// Current cart state
    pub fn state(&self) -> &CartState {
        &self.state
    }

    pub fn add_item(&mut self, product: CartProduct) {
        self.state.add_item(product);
        self.persist();
    }

    pub fn remove_item(&mut self, id: &str) {
        self.state.remove_item(id);
        self.persist();
    }

    pub fn update_quantity(&mut self, id: &str, quantity: u32) {
        self.state.update_quantity(id, quantity);
        self.persist();
    }

    pub fn clear_cart(&mut self) {
        self.state.clear();
        self.persist();
    }

    fn persist(&self) {
        let Some(path) = &self.path else {
            return;
        };
        let result = serde_json::to_string_pretty(&self.state)
            .map_err(std::io::Error::other)
            .and_then(|json| fs::write(path, json));
        if let Err(e) = result {
            tracing::warn!(path = %path.display(), error = %e, "Failed to persist cart");
        }
    }
}
