//! # stockroom-core: Pure Domain Logic for Stockroom
//!
//! This crate holds the product model and the rules every storage backend
//! and the console front end agree on. It performs no I/O.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Stockroom Architecture                           │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                  stockroom-cli (menu loop)                      │   │
//! │  │   Add ──► List ──► Find ──► Update ──► Delete ──► Export       │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ dyn ProductRepository                  │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                  stockroom-db (storage)                         │   │
//! │  │        MapRepository │ ListRepository │ SqliteRepository        │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │              ★ stockroom-core (THIS CRATE) ★                    │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐                  │   │
//! │  │   │   types   │  │   money   │  │ validation│                  │   │
//! │  │   │  Product  │  │   Money   │  │   rules   │                  │   │
//! │  │   │   Patch   │  │  parsing  │  │  parsing  │                  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘                  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO TERMINAL • PURE FUNCTIONS          │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Product, NewProduct, ProductPatch, StockStatus)
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`error`] - Domain error types
//! - [`validation`] - Input parsing and business rule validation
//!
//! ## Example Usage
//!
//! ```rust
//! use stockroom_core::{Money, NewProduct, Product, ProductPatch};
//!
//! let mut product = Product::from_new(1, NewProduct::new("Widget", Money::from_cents(999), 3));
//! ProductPatch::default().with_stock(0).apply(&mut product);
//!
//! assert_eq!(product.price.to_string(), "$9.99");
//! assert!(product.is_low_stock());
//! ```

pub mod error;
pub mod money;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use error::{CoreError, ValidationError};
pub use money::Money;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// A product whose stock is at or below this many units is "low stock".
pub const LOW_STOCK_THRESHOLD: i64 = 5;

/// Maximum length of a product name, in characters.
pub const MAX_NAME_LENGTH: usize = 200;
