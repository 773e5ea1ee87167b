//! # Repository Module
//!
//! The product repository contract and its three backends.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    One Contract, Three Stores                           │
//! │                                                                         │
//! │  Menu loop                                                             │
//! │       │                                                                 │
//! │       │  repo.create(new) / repo.low_stock() / ...                     │
//! │       ▼                                                                 │
//! │  Box<dyn ProductRepository>   (picked once at startup)                 │
//! │       │                                                                 │
//! │       ├──► MapRepository     BTreeMap<id, Product>                     │
//! │       ├──► ListRepository    Vec<Product>                              │
//! │       └──► SqliteRepository  productos table                           │
//! │                                                                         │
//! │  The menu never learns which one it is talking to.                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Shared Guarantees
//! - Ids are assigned by the store, start at 1, and are never reused.
//! - `list()` is ordered by ascending id.
//! - `low_stock()` holds exactly the products with stock <= 5, ordered by
//!   stock then id.
//! - Records that would break a product invariant are rejected with
//!   [`DbError::Invalid`](crate::DbError::Invalid) and nothing is stored.

pub mod list;
pub mod map;
pub mod sqlite;

#[cfg(test)]
pub(crate) mod conformance;

use async_trait::async_trait;
use stockroom_core::{NewProduct, Product, ProductId, ProductPatch};

use crate::error::DbResult;

/// Storage contract for products.
///
/// Reads take `&self`; writes take `&mut self` because the in-memory stores
/// own their state outright. The menu loop is the only caller, one call at a
/// time.
#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// Short label for logs and the menu banner.
    fn backend_name(&self) -> &'static str;

    /// All products, ascending id.
    async fn list(&self) -> DbResult<Vec<Product>>;

    /// The product with `id`, if any.
    async fn get(&self, id: ProductId) -> DbResult<Option<Product>>;

    /// Stores a new product under a freshly assigned id.
    async fn create(&mut self, new: NewProduct) -> DbResult<Product>;

    /// Applies `patch`. Returns `None` when `id` is unknown.
    async fn update(&mut self, id: ProductId, patch: ProductPatch) -> DbResult<Option<Product>>;

    /// Removes the product. Returns `true` iff it existed.
    async fn delete(&mut self, id: ProductId) -> DbResult<bool>;

    /// Products with stock at or below the low-stock threshold.
    async fn low_stock(&self) -> DbResult<Vec<Product>>;

    /// Releases backend resources at teardown.
    async fn close(&mut self) {}
}
