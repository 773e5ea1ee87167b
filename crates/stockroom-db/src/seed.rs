//! Demo catalog for a small electronics shop.
//!
//! A few items sit at or below the low-stock threshold so the low-stock
//! report has something to show right away.

use stockroom_core::{Money, NewProduct};

/// (name, price in cents, stock)
const CATALOG: &[(&str, i64, i64)] = &[
    ("Laptop Lenovo IdeaPad 5", 64999, 8),
    ("Mouse inalámbrico Logitech", 2499, 35),
    ("Teclado mecánico Redragon", 4550, 4),
    ("Monitor Samsung 24\"", 18999, 6),
    ("Auriculares Sony WH-CH520", 5990, 0),
    ("Disco SSD Kingston 1TB", 7450, 12),
    ("Memoria USB SanDisk 64GB", 899, 50),
    ("Cable HDMI 2m", 650, 2),
    ("Router TP-Link Archer C6", 3999, 5),
    ("Webcam Logitech C920", 6999, 9),
];

/// The demo products, in insertion order.
pub fn demo_catalog() -> Vec<NewProduct> {
    CATALOG
        .iter()
        .map(|&(name, cents, stock)| NewProduct::new(name, Money::from_cents(cents), stock))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use stockroom_core::validation::validate_new_product;
    use stockroom_core::LOW_STOCK_THRESHOLD;

    #[test]
    fn test_catalog_is_valid() {
        let catalog = demo_catalog();
        assert_eq!(catalog.len(), CATALOG.len());
        assert!(catalog.iter().all(|p| validate_new_product(p).is_ok()));
    }

    #[test]
    fn test_catalog_has_low_stock_items() {
        let low = demo_catalog()
            .iter()
            .filter(|p| p.stock <= LOW_STOCK_THRESHOLD)
            .count();
        assert!(low >= 2);
    }
}
