//! Canteen Order Server
//!
//! Night-canteen food ordering backend: students place orders, staff move
//! them through the lifecycle, and both sides get pushed updates over a
//! realtime TCP channel.
//!
//! # Module structure
//!
//! ```text
//! canteen-server/src/
//! ├── core/       # config, state, HTTP bootstrap
//! ├── auth/       # JWT validation, roles
//! ├── api/        # HTTP routes and handlers
//! ├── db/         # embedded SurrealDB storage
//! ├── orders/     # lifecycle, id allocation, orchestration, retention
//! ├── realtime/   # sessions, registry, dispatcher, TCP server
//! └── utils/      # errors, responses, logging
//! ```

pub mod api;
pub mod auth;
pub mod core;
pub mod db;
pub mod orders;
pub mod realtime;
pub mod utils;

// Re-export common types
pub use auth::{CurrentUser, JwtService, Role};
pub use core::{Config, Server, ServerState};
pub use orders::{OrderError, OrderService};
pub use realtime::{ConnectionRegistry, NotificationDispatcher, RealtimeHub};
pub use utils::{AppError, AppResponse, AppResult};

// Re-export logger functions
pub use utils::logger::{init_logger, init_logger_with_file};

/// Load .env and initialize logging.
pub fn setup_environment() {
    dotenv::dotenv().ok();
    utils::logger::init_logger();
}

pub fn print_banner() {
    println!(
        r#"
   ______            __
  / ____/___ _____  / /____  ___  ____
 / /   / __ `/ __ \/ __/ _ \/ _ \/ __ \
/ /___/ /_/ / / / / /_/  __/  __/ / / /
\____/\__,_/_/ /_/\__/\___/\___/_/ /_/
    "#
    );
}
