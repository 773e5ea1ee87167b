//! # Stockroom Console Library
//!
//! Startup and the interactive menu for the inventory console.
//!
//! ## Module Organization
//! ```text
//! stockroom_cli/
//! ├── lib.rs          ◄─── You are here (startup sequence)
//! ├── config.rs       ◄─── Layered AppConfig
//! ├── logging.rs      ◄─── operaciones.log subscriber
//! ├── app.rs          ◄─── Menu loop and actions
//! ├── console.rs      ◄─── Prompt / pause / clear over any BufRead + Write
//! ├── export.rs       ◄─── Plain-text inventory report
//! └── error.rs        ◄─── AppError and operator-facing messages
//! ```

pub mod app;
pub mod config;
pub mod console;
pub mod error;
pub mod export;
pub mod logging;

use std::io;
use std::process::ExitCode;

use anyhow::Context;
use stockroom_db::open_repository;
use tracing::{error, info};

use app::App;
use config::AppConfig;
use console::Console;
use error::AppError;

/// Runs the console application.
///
/// ## Startup Sequence
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │                       Application Startup                               │
/// │                                                                         │
/// │  1. Load configuration ──── fails → stderr, exit 1                     │
/// │  2. Initialize logging ──── fails → stderr, exit 1                     │
/// │  3. Build current-thread tokio runtime                                  │
/// │  4. Open the configured product store ── fails → stderr + log, exit 1  │
/// │  5. Menu loop until "8" or end of input                                │
/// │  6. Close the store (pool close is logged), exit 0                     │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
pub fn run() -> ExitCode {
    let config = match AppConfig::load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error fatal: {}", AppError::from(e).user_message());
            return ExitCode::FAILURE;
        }
    };

    // Held until exit so buffered log lines are flushed.
    let _log_guard = match logging::init_logging(&config.log) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Error fatal: no se pudo iniciar el registro de operaciones: {e:#}");
            return ExitCode::FAILURE;
        }
    };

    let runtime = match tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(e) => {
            error!(error = %e, "Failed to build async runtime");
            eprintln!("Error fatal: {e}");
            return ExitCode::FAILURE;
        }
    };

    match runtime.block_on(run_session(config)) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            let message = format!("{e:#}");
            error!(error = %message, "Session ended with a fatal error");
            ExitCode::FAILURE
        }
    }
}

async fn run_session(config: AppConfig) -> anyhow::Result<()> {
    info!(backend = %config.backend, "Starting Stockroom");

    let db_config = config.database.to_db_config();
    let repo = match open_repository(config.backend, &db_config, config.seed_demo_data).await {
        Ok(repo) => repo,
        Err(e) => {
            error!(error = %e, path = %db_config.database_path.display(), "CRITICAL: product store unavailable");
            eprintln!("Error fatal: No se pudo establecer la conexión con la base de datos.");
            eprintln!(
                "Por favor, verifique la configuración ({}) y que el archivo sea accesible.",
                db_config.database_path.display()
            );
            return Err(e).context("opening the product store");
        }
    };

    let stdin = io::stdin();
    let console = Console::new(stdin.lock(), io::stdout(), config.clear_screen);
    let mut app = App::new(repo, console, config.store_name, config.export_dir);

    let result = app.run().await;
    app.shutdown().await;

    if let Err(e) = &result {
        eprintln!("Error fatal: {}", e.user_message());
    }
    result.context("running the menu loop")
}
