//! # SQLite Repository
//!
//! Relational product store backed by the `productos` table.
//!
//! ## Statement per Operation
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Operation   SQL                                          Commit        │
//! │  ─────────   ───────────────────────────────────────────  ──────────    │
//! │  list        SELECT ... ORDER BY id                       -             │
//! │  get         SELECT ... WHERE id = ?                      -             │
//! │  create      INSERT ... RETURNING                         own tx        │
//! │  update      UPDATE ... SET col = COALESCE(?, col)        own tx        │
//! │              ... RETURNING                                              │
//! │  delete      DELETE ... WHERE id = ?                      own tx        │
//! │  low_stock   SELECT ... WHERE stock <= 5                  -             │
//! │              ORDER BY stock, id                                         │
//! │                                                                         │
//! │  Any error before commit drops the transaction → rollback.             │
//! │  The error is returned to the caller, never raised past it.            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use async_trait::async_trait;
use sqlx::SqlitePool;
use stockroom_core::validation::{validate_new_product, validate_patch};
use stockroom_core::{
    Money, NewProduct, Product, ProductId, ProductPatch, LOW_STOCK_THRESHOLD,
};
use tracing::{debug, error, info, warn};

use super::ProductRepository;
use crate::error::{DbError, DbResult};

const SELECT_COLUMNS: &str = "id, nombre, precio, stock";

/// One `productos` row as stored.
#[derive(Debug, sqlx::FromRow)]
struct ProductRow {
    id: i64,
    nombre: String,
    precio: i64,
    stock: i64,
}

impl From<ProductRow> for Product {
    fn from(row: ProductRow) -> Self {
        Product {
            id: row.id,
            name: row.nombre,
            price: Money::from_cents(row.precio),
            stock: row.stock,
        }
    }
}

/// Logs a failed operation at error level and passes the result through.
fn logged<T>(operation: &'static str, result: DbResult<T>) -> DbResult<T> {
    if let Err(e) = &result {
        error!(operation, error = %e, "Product store operation failed");
    }
    result
}

/// Repository for the `productos` table.
///
/// ## Usage
/// ```rust,ignore
/// let db = Database::new(DbConfig::new("inventario.db")).await?;
/// let mut repo = db.products();
///
/// let p = repo.create(NewProduct::new("Widget", Money::from_cents(999), 3)).await?;
/// let low = repo.low_stock().await?;
/// ```
#[derive(Debug, Clone)]
pub struct SqliteRepository {
    pool: SqlitePool,
}

impl SqliteRepository {
    /// Creates a new SqliteRepository.
    pub fn new(pool: SqlitePool) -> Self {
        SqliteRepository { pool }
    }

    /// Counts stored products (for diagnostics and seeding).
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM productos")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }

    async fn insert(&self, new: &NewProduct) -> DbResult<Product> {
        let mut tx = self.pool.begin().await?;

        let row = sqlx::query_as::<_, ProductRow>(&format!(
            "INSERT INTO productos (nombre, precio, stock) \
             VALUES (?1, ?2, ?3) RETURNING {SELECT_COLUMNS}"
        ))
        .bind(&new.name)
        .bind(new.price.cents())
        .bind(new.stock)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit()
            .await
            .map_err(|e| DbError::TransactionFailed(e.to_string()))?;

        Ok(row.into())
    }

    async fn apply_patch(&self, id: ProductId, patch: &ProductPatch) -> DbResult<Option<Product>> {
        let mut tx = self.pool.begin().await?;

        let row = sqlx::query_as::<_, ProductRow>(&format!(
            "UPDATE productos SET \
                 nombre = COALESCE(?2, nombre), \
                 precio = COALESCE(?3, precio), \
                 stock = COALESCE(?4, stock) \
             WHERE id = ?1 RETURNING {SELECT_COLUMNS}"
        ))
        .bind(id)
        .bind(patch.name.as_deref())
        .bind(patch.price.map(|p| p.cents()))
        .bind(patch.stock)
        .fetch_optional(&mut *tx)
        .await?;

        tx.commit()
            .await
            .map_err(|e| DbError::TransactionFailed(e.to_string()))?;

        Ok(row.map(Product::from))
    }

    async fn remove(&self, id: ProductId) -> DbResult<bool> {
        let mut tx = self.pool.begin().await?;

        let result = sqlx::query("DELETE FROM productos WHERE id = ?1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        tx.commit()
            .await
            .map_err(|e| DbError::TransactionFailed(e.to_string()))?;

        Ok(result.rows_affected() > 0)
    }
}

#[async_trait]
impl ProductRepository for SqliteRepository {
    fn backend_name(&self) -> &'static str {
        "SQLite"
    }

    async fn list(&self) -> DbResult<Vec<Product>> {
        let rows = sqlx::query_as::<_, ProductRow>(&format!(
            "SELECT {SELECT_COLUMNS} FROM productos ORDER BY id"
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(DbError::from);

        let rows = logged("list", rows)?;
        debug!(count = rows.len(), "Listed all products");
        Ok(rows.into_iter().map(Product::from).collect())
    }

    async fn get(&self, id: ProductId) -> DbResult<Option<Product>> {
        let row = sqlx::query_as::<_, ProductRow>(&format!(
            "SELECT {SELECT_COLUMNS} FROM productos WHERE id = ?1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(DbError::from);

        let row = logged("get", row)?;
        if row.is_none() {
            warn!(id, "Product not found");
        }
        Ok(row.map(Product::from))
    }

    async fn create(&mut self, new: NewProduct) -> DbResult<Product> {
        validate_new_product(&new)?;

        let product = logged("create", self.insert(&new).await)?;
        info!(id = product.id, name = %product.name, price = %product.price, stock = product.stock, "Product created");
        Ok(product)
    }

    async fn update(&mut self, id: ProductId, patch: ProductPatch) -> DbResult<Option<Product>> {
        validate_patch(&patch)?;

        let updated = logged("update", self.apply_patch(id, &patch).await)?;
        match &updated {
            Some(p) => {
                info!(id, name = %p.name, price = %p.price, stock = p.stock, "Product updated")
            }
            None => warn!(id, "Attempted to update a product that does not exist"),
        }
        Ok(updated)
    }

    async fn delete(&mut self, id: ProductId) -> DbResult<bool> {
        let removed = logged("delete", self.remove(id).await)?;
        if removed {
            info!(id, "Product deleted");
        } else {
            warn!(id, "Attempted to delete a product that does not exist");
        }
        Ok(removed)
    }

    async fn low_stock(&self) -> DbResult<Vec<Product>> {
        let rows = sqlx::query_as::<_, ProductRow>(&format!(
            "SELECT {SELECT_COLUMNS} FROM productos WHERE stock <= ?1 ORDER BY stock, id"
        ))
        .bind(LOW_STOCK_THRESHOLD)
        .fetch_all(&self.pool)
        .await
        .map_err(DbError::from);

        let rows = logged("low_stock", rows)?;
        debug!(count = rows.len(), "Low stock query");
        Ok(rows.into_iter().map(Product::from).collect())
    }

    async fn close(&mut self) {
        info!("Closing database connection pool");
        self.pool.close().await;
    }
}
