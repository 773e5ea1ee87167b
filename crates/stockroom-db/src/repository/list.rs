//! # List Repository
//!
//! In-memory store as a plain ordered list of records.
//!
//! Products are appended on create, so insertion order and ascending id
//! order coincide. Lookups are linear scans, which is fine for a shop-sized
//! catalog.

use async_trait::async_trait;
use stockroom_core::validation::{validate_new_product, validate_patch};
use stockroom_core::{low_stock_order, NewProduct, Product, ProductId, ProductPatch};
use tracing::{debug, info, warn};

use super::ProductRepository;
use crate::error::DbResult;

/// Products held in insertion order.
#[derive(Debug, Default)]
pub struct ListRepository {
    products: Vec<Product>,
    last_id: ProductId,
}

impl ListRepository {
    pub fn new() -> Self {
        ListRepository::default()
    }

    /// Creates a store preloaded with `seed`; new ids continue after it.
    pub fn with_seed(seed: impl IntoIterator<Item = NewProduct>) -> Self {
        let mut repo = ListRepository::new();
        for new in seed {
            let id = repo.next_id();
            repo.products.push(Product::from_new(id, new));
        }
        debug!(count = repo.products.len(), "List store seeded");
        repo
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    fn next_id(&mut self) -> ProductId {
        self.last_id += 1;
        self.last_id
    }

    fn position(&self, id: ProductId) -> Option<usize> {
        self.products.iter().position(|p| p.id == id)
    }
}

#[async_trait]
impl ProductRepository for ListRepository {
    fn backend_name(&self) -> &'static str {
        "memoria (lista)"
    }

    async fn list(&self) -> DbResult<Vec<Product>> {
        Ok(self.products.clone())
    }

    async fn get(&self, id: ProductId) -> DbResult<Option<Product>> {
        let product = self.products.iter().find(|p| p.id == id).cloned();
        if product.is_none() {
            warn!(id, "Product not found");
        }
        Ok(product)
    }

    async fn create(&mut self, new: NewProduct) -> DbResult<Product> {
        validate_new_product(&new)?;

        let id = self.next_id();
        let product = Product::from_new(id, new);
        self.products.push(product.clone());

        info!(id, name = %product.name, price = %product.price, stock = product.stock, "Product created");
        Ok(product)
    }

    async fn update(&mut self, id: ProductId, patch: ProductPatch) -> DbResult<Option<Product>> {
        validate_patch(&patch)?;

        let Some(index) = self.position(id) else {
            warn!(id, "Attempted to update a product that does not exist");
            return Ok(None);
        };

        let product = &mut self.products[index];
        patch.apply(product);
        info!(id, name = %product.name, price = %product.price, stock = product.stock, "Product updated");
        Ok(Some(product.clone()))
    }

    async fn delete(&mut self, id: ProductId) -> DbResult<bool> {
        let Some(index) = self.position(id) else {
            warn!(id, "Attempted to delete a product that does not exist");
            return Ok(false);
        };

        // `remove`, not `swap_remove`: the list must stay in id order.
        let product = self.products.remove(index);
        info!(id, name = %product.name, "Product deleted");
        Ok(true)
    }

    async fn low_stock(&self) -> DbResult<Vec<Product>> {
        let mut products: Vec<Product> = self
            .products
            .iter()
            .filter(|p| p.is_low_stock())
            .cloned()
            .collect();
        products.sort_by(low_stock_order);

        debug!(count = products.len(), "Low stock query");
        Ok(products)
    }
}
