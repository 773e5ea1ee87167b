//! # Domain Types
//!
//! Core domain types used throughout Stockroom.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │   NewProduct    │   │    Product      │   │  ProductPatch   │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  name           │──►│  id (i64)       │◄──│  name?          │       │
//! │  │  price          │   │  name           │   │  price?         │       │
//! │  │  stock          │   │  price (Money)  │   │  stock?         │       │
//! │  └─────────────────┘   │  stock (i64)    │   └─────────────────┘       │
//! │        create          └─────────────────┘         update              │
//! │                                │                                        │
//! │                                ▼                                        │
//! │                       ┌─────────────────┐                               │
//! │                       │  StockStatus    │                               │
//! │                       │  OutOfStock/Low │                               │
//! │                       │  /Ok            │                               │
//! │                       └─────────────────┘                               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Identity
//! `id` is assigned by the repository on creation and never changes.
//! Neither `NewProduct` nor `ProductPatch` carries one.

use std::fmt;

use crate::money::Money;
use crate::LOW_STOCK_THRESHOLD;

/// Repository-assigned product identifier.
pub type ProductId = i64;

// =============================================================================
// Product
// =============================================================================

/// A product on the store's shelves.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Product {
    /// Unique identifier, assigned on creation.
    pub id: ProductId,

    /// Display name.
    pub name: String,

    /// Shelf price.
    pub price: Money,

    /// Units on hand.
    pub stock: i64,
}

impl Product {
    /// Builds the stored record for a freshly assigned id.
    pub fn from_new(id: ProductId, new: NewProduct) -> Self {
        Product {
            id,
            name: new.name,
            price: new.price,
            stock: new.stock,
        }
    }

    /// Checks if stock is at or below [`LOW_STOCK_THRESHOLD`].
    #[inline]
    pub fn is_low_stock(&self) -> bool {
        self.stock <= LOW_STOCK_THRESHOLD
    }

    /// Returns the display status for the current stock level.
    #[inline]
    pub fn stock_status(&self) -> StockStatus {
        StockStatus::for_stock(self.stock)
    }
}

/// Orders low-stock results: stock ascending, then id ascending.
///
/// Every repository backend sorts with this so the report reads the same
/// whichever store is active.
pub fn low_stock_order(a: &Product, b: &Product) -> std::cmp::Ordering {
    a.stock.cmp(&b.stock).then(a.id.cmp(&b.id))
}

// =============================================================================
// New Product
// =============================================================================

/// Fields supplied when creating a product.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewProduct {
    pub name: String,
    pub price: Money,
    pub stock: i64,
}

impl NewProduct {
    pub fn new(name: impl Into<String>, price: Money, stock: i64) -> Self {
        NewProduct {
            name: name.into(),
            price,
            stock,
        }
    }
}

// =============================================================================
// Product Patch
// =============================================================================

/// A partial update. `None` fields keep their prior value.
///
/// ## Example
/// ```rust
/// use stockroom_core::{Money, NewProduct, Product, ProductPatch};
///
/// let mut p = Product::from_new(1, NewProduct::new("X", Money::from_cents(1000), 5));
/// ProductPatch::default().with_stock(2).apply(&mut p);
///
/// assert_eq!(p.name, "X");
/// assert_eq!(p.price.cents(), 1000);
/// assert_eq!(p.stock, 2);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductPatch {
    pub name: Option<String>,
    pub price: Option<Money>,
    pub stock: Option<i64>,
}

impl ProductPatch {
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_price(mut self, price: Money) -> Self {
        self.price = Some(price);
        self
    }

    pub fn with_stock(mut self, stock: i64) -> Self {
        self.stock = Some(stock);
        self
    }

    /// True when no field would change.
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.price.is_none() && self.stock.is_none()
    }

    /// Merges the supplied fields into `product`. The id is never touched.
    pub fn apply(&self, product: &mut Product) {
        if let Some(name) = &self.name {
            product.name = name.clone();
        }
        if let Some(price) = self.price {
            product.price = price;
        }
        if let Some(stock) = self.stock {
            product.stock = stock;
        }
    }
}

// =============================================================================
// Stock Status
// =============================================================================

/// Stock level label shown next to each product in listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StockStatus {
    /// No units left.
    OutOfStock,
    /// 1 to [`LOW_STOCK_THRESHOLD`] units.
    Low,
    /// Comfortably stocked.
    Ok,
}

impl StockStatus {
    pub fn for_stock(stock: i64) -> Self {
        if stock <= 0 {
            StockStatus::OutOfStock
        } else if stock <= LOW_STOCK_THRESHOLD {
            StockStatus::Low
        } else {
            StockStatus::Ok
        }
    }

    /// Operator-facing label.
    pub fn label(&self) -> &'static str {
        match self {
            StockStatus::OutOfStock => "SIN STOCK",
            StockStatus::Low => "STOCK BAJO",
            StockStatus::Ok => "STOCK OK",
        }
    }
}

impl fmt::Display for StockStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
