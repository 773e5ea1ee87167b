//! # Stockroom Console Entry Point
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Stockroom Console                                │
//! │                                                                         │
//! │  stdin ──► menu loop ──► dyn ProductRepository ──► map / list / SQLite │
//! │               │                                                         │
//! │               ├──► stdout (menu, listings, messages)                   │
//! │               ├──► exports-txt/<name>.txt                              │
//! │               └──► operaciones.log                                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Exit status is 1 when configuration or the product store cannot be
//! opened at startup, 0 after a normal quit.

use std::process::ExitCode;

fn main() -> ExitCode {
    // The actual setup is in lib.rs for better testability
    stockroom_cli::run()
}
