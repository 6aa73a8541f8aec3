//! Tally Server - group-order settlement node
//!
//! # Architecture overview
//!
//! The server coordinates who owes what after a shared purchase and
//! reconciles the money as it comes back in:
//!
//! - **Order engine** (`orders`): event-sourced commands, snapshots, split
//!   math and the payment ledger
//! - **Notifications** (`notify`): background worker projecting order
//!   events into per-user records
//! - **HTTP API** (`api`): RESTful surface over the engine
//! - **Identity** (`auth`): trusted gateway headers
//!
//! # Module structure
//!
//! ```text
//! tally-server/src/
//! ├── core/          # Configuration, state, server lifecycle
//! ├── auth/          # Identity extraction
//! ├── api/           # HTTP routes and handlers
//! ├── notify/        # Notification worker and sink seam
//! ├── orders/        # Order event sourcing
//! └── utils/         # Errors, logging
//! ```

pub mod api;
pub mod auth;
pub mod core;
pub mod notify;
pub mod orders;
pub mod utils;

// Re-export common types
pub use auth::CurrentUser;
pub use core::{Config, Server, ServerState};
pub use notify::{LogSink, NotificationSink, NotificationWorker};
pub use orders::{OrderStorage, OrdersManager};
pub use utils::{AppError, AppResult};

// Re-export logger functions
pub use utils::logger::{init_logger, init_logger_with_file};

/// Prepare process environment: .env file, then logging
///
/// Log level and optional file output come from `LOG_LEVEL` and `LOG_DIR`.
pub fn setup_environment() {
    dotenv::dotenv().ok();

    let level = std::env::var("LOG_LEVEL").ok();
    let dir = std::env::var("LOG_DIR").ok();
    init_logger_with_file(level.as_deref(), dir.as_deref());
}

pub fn print_banner() {
    println!(
        r#"
  ______      ____
 /_  __/___ _/ / /_  __
  / / / __ `/ / / / / /
 / / / /_/ / / / /_/ /
/_/  \__,_/_/_/\__, /
              /____/
    "#
    );
}
