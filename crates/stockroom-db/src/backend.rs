//! # Backend Selection
//!
//! Maps the configured backend name to a boxed repository.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  backend = "map"     →  MapRepository     (optionally seeded)          │
//! │  backend = "list"    →  ListRepository    (optionally seeded)          │
//! │  backend = "sqlite"  →  Database::new(config) + health check           │
//! │                         → products(); Err here is fatal at startup     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::fmt;

use serde::Deserialize;
use tracing::info;

use crate::error::{DbError, DbResult};
use crate::pool::{Database, DbConfig};
use crate::repository::list::ListRepository;
use crate::repository::map::MapRepository;
use crate::repository::ProductRepository;
use crate::seed::demo_catalog;

/// Which product store to run against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
    /// In-memory, keyed by id.
    Map,
    /// In-memory, ordered list.
    List,
    /// SQLite file (or `:memory:`).
    #[default]
    Sqlite,
}

impl Backend {
    pub fn as_str(&self) -> &'static str {
        match self {
            Backend::Map => "map",
            Backend::List => "list",
            Backend::Sqlite => "sqlite",
        }
    }
}

impl fmt::Display for Backend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Opens the selected backend.
///
/// `seed` preloads the demo catalog into the in-memory stores. A SQLite file
/// is left as found; use the `seed` binary to fill one.
pub async fn open_repository(
    backend: Backend,
    db_config: &DbConfig,
    seed: bool,
) -> DbResult<Box<dyn ProductRepository>> {
    let catalog = if seed { demo_catalog() } else { Vec::new() };

    let repo: Box<dyn ProductRepository> = match backend {
        Backend::Map => Box::new(MapRepository::with_seed(catalog)),
        Backend::List => Box::new(ListRepository::with_seed(catalog)),
        Backend::Sqlite => {
            let db = Database::new(db_config.clone()).await?;
            if !db.health_check().await {
                db.close().await;
                return Err(DbError::ConnectionFailed(
                    "database did not answer a test query".to_string(),
                ));
            }
            Box::new(db.products())
        }
    };

    info!(backend = %backend, store = repo.backend_name(), "Product store opened");
    Ok(repo)
}
