//! Plain-text inventory report.
//!
//! ```text
//! REPORTE DE INVENTARIO
//! ==================================================
//!
//! ID: 1 | Widget | Precio: $9.99 | Stock: 3
//! ID: 4 | Cable HDMI 2m | Precio: $6.50 | Stock: 2
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use stockroom_core::validation::validate_export_name;
use stockroom_core::Product;
use tracing::{error, info};

use crate::error::{AppError, AppResult};

pub const REPORT_TITLE: &str = "REPORTE DE INVENTARIO";
const RULE_WIDTH: usize = 50;

/// One report line per product.
pub fn report_line(product: &Product) -> String {
    format!(
        "ID: {} | {} | Precio: {} | Stock: {}",
        product.id, product.name, product.price, product.stock
    )
}

/// The full report body, products in the order given.
pub fn render_report(products: &[Product]) -> String {
    let mut out = String::new();
    out.push_str(REPORT_TITLE);
    out.push('\n');
    out.push_str(&"=".repeat(RULE_WIDTH));
    out.push_str("\n\n");
    for product in products {
        out.push_str(&report_line(product));
        out.push('\n');
    }
    out
}

/// Resolves `<dir>/<name>.txt`, rejecting names that would escape `dir`.
pub fn report_path(dir: &Path, name: &str) -> AppResult<PathBuf> {
    validate_export_name(name)?;
    Ok(dir.join(format!("{}.txt", name.trim())))
}

/// Writes the report, creating `dir` if needed. Returns the file written.
pub fn write_report(dir: &Path, name: &str, products: &[Product]) -> AppResult<PathBuf> {
    let path = report_path(dir, name)?;

    let written = fs::create_dir_all(dir).and_then(|_| fs::write(&path, render_report(products)));
    if let Err(source) = written {
        error!(path = %path.display(), error = %source, "Export failed");
        return Err(AppError::Export { path, source });
    }

    info!(path = %path.display(), count = products.len(), "Inventory exported");
    Ok(path)
}
