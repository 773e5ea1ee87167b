//! # Application Error Type
//!
//! Unified error type for menu actions.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in the Menu Loop                          │
//! │                                                                         │
//! │  Menu action                                                           │
//! │  Result<Flow, AppError>                                                │
//! │         │                                                               │
//! │         ├── Validation ─── bad input        ──► warn!  + message ─┐    │
//! │         ├── NotFound ───── unknown id       ──► warn!  + message ─┤    │
//! │         ├── InvalidOption  bad menu choice  ──► warn!  + message ─┤    │
//! │         ├── Database ───── backend failure  ──► error! + message ─┤    │
//! │         ├── Export ─────── file write error ──► error! + message ─┤    │
//! │         │                                                         ▼    │
//! │         │                                               loop continues │
//! │         │                                                               │
//! │         └── Io ─────────── terminal gone    ──► loop ends              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Messages for the operator are in Spanish; `Display` stays in English for
//! the log file.

use std::io;
use std::path::PathBuf;

use stockroom_core::{CoreError, ProductId, ValidationError};
use stockroom_db::DbError;
use thiserror::Error;

use crate::config::ConfigError;

/// Anything a menu action or startup can fail with.
#[derive(Debug, Error)]
pub enum AppError {
    /// Configuration could not be loaded.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Backend failure.
    #[error("Database error: {0}")]
    Database(DbError),

    /// Operator input was rejected.
    #[error("Invalid input: {0}")]
    Validation(#[from] ValidationError),

    /// No product with this id.
    #[error("Product not found: {0}")]
    NotFound(ProductId),

    /// Menu choice outside 1..=8.
    #[error("Invalid menu option: '{0}'")]
    InvalidOption(String),

    /// Writing the export file failed.
    #[error("Export to {} failed: {source}", path.display())]
    Export {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Reading stdin or writing stdout failed.
    #[error("Terminal I/O failed: {0}")]
    Io(#[from] io::Error),
}

impl From<DbError> for AppError {
    fn from(err: DbError) -> Self {
        match err {
            // Repositories validate before storing; surface that as input error.
            DbError::Invalid(e) => AppError::Validation(e),
            other => AppError::Database(other),
        }
    }
}

impl From<CoreError> for AppError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::ProductNotFound(id) => AppError::NotFound(id),
            CoreError::Validation(e) => AppError::Validation(e),
        }
    }
}

impl AppError {
    /// True for problems caused by the operator rather than the system.
    pub fn is_user_error(&self) -> bool {
        matches!(
            self,
            AppError::Validation(_) | AppError::NotFound(_) | AppError::InvalidOption(_)
        )
    }

    /// True when the menu loop cannot go on.
    pub fn is_fatal(&self) -> bool {
        matches!(self, AppError::Io(_) | AppError::Config(_))
    }

    /// The line shown to the operator.
    pub fn user_message(&self) -> String {
        match self {
            AppError::Config(e) => format!("Error de configuración: {e}"),
            AppError::Database(_) => {
                "Ocurrió un error en el almacenamiento. La operación no se aplicó.".to_string()
            }
            AppError::Validation(e) => validation_message(e),
            AppError::NotFound(id) => format!("Producto con ID {id} no encontrado."),
            AppError::InvalidOption(_) => {
                "Opción no válida. Por favor seleccione una opción del 1 al 8.".to_string()
            }
            AppError::Export { source, .. } => {
                format!("Error al escribir en el archivo: {source}")
            }
            AppError::Io(e) => format!("Error de entrada/salida: {e}"),
        }
    }
}

fn field_label(field: &str) -> &str {
    match field {
        "name" => "nombre",
        "price" => "precio",
        "stock" => "stock",
        "id" => "ID",
        "file name" => "nombre del archivo",
        other => other,
    }
}

fn validation_message(err: &ValidationError) -> String {
    match err {
        ValidationError::Required { field } => {
            format!("El {} no puede estar vacío.", field_label(field))
        }
        ValidationError::TooLong { field, max } => {
            format!("El {} admite como máximo {max} caracteres.", field_label(field))
        }
        ValidationError::Negative { field } => {
            format!("El {} no puede ser negativo.", field_label(field))
        }
        ValidationError::InvalidNumber { field, input } => {
            format!(
                "Ingrese un valor numérico válido para {} (recibido: '{input}').",
                field_label(field)
            )
        }
        ValidationError::InvalidFormat { field, .. } => {
            format!("Formato inválido para {}.", field_label(field))
        }
    }
}

/// Result type for menu actions.
pub type AppResult<T> = Result<T, AppError>;
