//! # Validation Module
//!
//! Parsing and validation of operator input.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Menu prompt (stockroom-cli)                                  │
//! │  └── Reads one trimmed line                                            │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE                                                  │
//! │  ├── Text → number parsing (id, stock, price)                          │
//! │  └── Business rules (non-empty name, non-negative values)              │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Storage                                                      │
//! │  └── SQLite CHECK constraints on precio / stock                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use stockroom_core::validation::{parse_price, parse_stock, validate_product_name};
//!
//! validate_product_name("Widget").unwrap();
//! assert_eq!(parse_price("9.99").unwrap().cents(), 999);
//! assert_eq!(parse_stock("3").unwrap(), 3);
//! assert!(parse_stock("-1").is_err());
//! ```

use crate::error::ValidationError;
use crate::money::Money;
use crate::types::{NewProduct, ProductId, ProductPatch};
use crate::MAX_NAME_LENGTH;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// String Validators
// =============================================================================

/// Validates a product name.
///
/// ## Rules
/// - Must not be empty after trimming
/// - At most [`MAX_NAME_LENGTH`] characters
pub fn validate_product_name(name: &str) -> ValidationResult<()> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::required("name"));
    }

    if name.chars().count() > MAX_NAME_LENGTH {
        return Err(ValidationError::TooLong {
            field: "name".to_string(),
            max: MAX_NAME_LENGTH,
        });
    }

    Ok(())
}

/// Validates the base name of an export file.
///
/// ## Rules
/// - Must not be empty
/// - Must not contain path separators, so the report always lands inside
///   the export directory. `.txt` is appended, so a bare `..` stays a file
///   name too
pub fn validate_export_name(name: &str) -> ValidationResult<()> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::required("file name"));
    }

    if name.contains(['/', '\\']) {
        return Err(ValidationError::InvalidFormat {
            field: "file name".to_string(),
            reason: "must not contain path separators".to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a price. Zero is allowed (free items).
pub fn validate_price(price: Money) -> ValidationResult<()> {
    if price.is_negative() {
        return Err(ValidationError::negative("price"));
    }
    Ok(())
}

/// Validates a stock level. Zero is allowed (sold out).
pub fn validate_stock(stock: i64) -> ValidationResult<()> {
    if stock < 0 {
        return Err(ValidationError::negative("stock"));
    }
    Ok(())
}

// =============================================================================
// Parsers
// =============================================================================

/// Parses and validates a price typed by the operator.
pub fn parse_price(input: &str) -> ValidationResult<Money> {
    let price: Money = input.parse()?;
    validate_price(price)?;
    Ok(price)
}

/// Parses and validates a stock count.
pub fn parse_stock(input: &str) -> ValidationResult<i64> {
    let input = input.trim();
    let stock: i64 = input
        .parse()
        .map_err(|_| ValidationError::invalid_number("stock", input))?;
    validate_stock(stock)?;
    Ok(stock)
}

/// Parses a product id. Ids are positive integers.
pub fn parse_id(input: &str) -> ValidationResult<ProductId> {
    let input = input.trim();
    let id: ProductId = input
        .parse()
        .map_err(|_| ValidationError::invalid_number("id", input))?;
    if id <= 0 {
        return Err(ValidationError::InvalidFormat {
            field: "id".to_string(),
            reason: "must be a positive integer".to_string(),
        });
    }
    Ok(id)
}

// =============================================================================
// Aggregate Validators
// =============================================================================

/// Validates every field of a product about to be created.
pub fn validate_new_product(new: &NewProduct) -> ValidationResult<()> {
    validate_product_name(&new.name)?;
    validate_price(new.price)?;
    validate_stock(new.stock)?;
    Ok(())
}

/// Validates the supplied fields of a partial update.
pub fn validate_patch(patch: &ProductPatch) -> ValidationResult<()> {
    if let Some(name) = &patch.name {
        validate_product_name(name)?;
    }
    if let Some(price) = patch.price {
        validate_price(price)?;
    }
    if let Some(stock) = patch.stock {
        validate_stock(stock)?;
    }
    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
