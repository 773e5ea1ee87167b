//! # Map Repository
//!
//! In-memory store keyed by product id.
//!
//! A `BTreeMap` keeps iteration in ascending id order, so `list()` needs no
//! sort. Nothing survives a restart.

use std::collections::BTreeMap;

use async_trait::async_trait;
use stockroom_core::validation::{validate_new_product, validate_patch};
use stockroom_core::{low_stock_order, NewProduct, Product, ProductId, ProductPatch};
use tracing::{debug, info, warn};

use super::ProductRepository;
use crate::error::DbResult;

/// Products held in an ordered map.
#[derive(Debug, Default)]
pub struct MapRepository {
    products: BTreeMap<ProductId, Product>,
    /// Highest id ever handed out. Deleting never lowers it.
    last_id: ProductId,
}

impl MapRepository {
    /// Creates an empty store. The first product gets id 1.
    pub fn new() -> Self {
        MapRepository::default()
    }

    /// Creates a store preloaded with `seed`, ids 1..=n in order.
    /// The next created product continues after the seed.
    pub fn with_seed(seed: impl IntoIterator<Item = NewProduct>) -> Self {
        let mut repo = MapRepository::new();
        for new in seed {
            let id = repo.next_id();
            repo.products.insert(id, Product::from_new(id, new));
        }
        debug!(count = repo.products.len(), "Map store seeded");
        repo
    }

    /// Number of products currently held.
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
}

#[async_trait]
impl ProductRepository for MapRepository {
    fn backend_name(&self) -> &'static str {
        "memoria (mapa)"
    }

    async fn list(&self) -> DbResult<Vec<Product>> {
        Ok(self.products.values().cloned().collect())
    }

    async fn get(&self, id: ProductId) -> DbResult<Option<Product>> {
        let product = self.products.get(&id).cloned();
        if product.is_none() {
            warn!(id, "Product not found");
        }
        Ok(product)
    }

    async fn create(&mut self, new: NewProduct) -> DbResult<Product> {
        validate_new_product(&new)?;

        let id = self.next_id();
        let product = Product::from_new(id, new);
        self.products.insert(id, product.clone());

        info!(id, name = %product.name, price = %product.price, stock = product.stock, "Product created");
        Ok(product)
    }

    async fn update(&mut self, id: ProductId, patch: ProductPatch) -> DbResult<Option<Product>> {
        validate_patch(&patch)?;

        match self.products.get_mut(&id) {
            Some(product) => {
                patch.apply(product);
                info!(id, name = %product.name, price = %product.price, stock = product.stock, "Product updated");
                Ok(Some(product.clone()))
            }
            None => {
                warn!(id, "Attempted to update a product that does not exist");
                Ok(None)
            }
        }
    }

    async fn delete(&mut self, id: ProductId) -> DbResult<bool> {
        match self.products.remove(&id) {
            Some(product) => {
                info!(id, name = %product.name, "Product deleted");
                Ok(true)
            }
            None => {
                warn!(id, "Attempted to delete a product that does not exist");
                Ok(false)
            }
        }
    }

    async fn low_stock(&self) -> DbResult<Vec<Product>> {
        let mut products: Vec<Product> = self
            .products
            .values()
            .filter(|p| p.is_low_stock())
            .cloned()
            .collect();
        products.sort_by(low_stock_order);

        debug!(count = products.len(), "Low stock query");
        Ok(products)
    }
}
