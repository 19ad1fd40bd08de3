//! Mesa Server - 餐厅桌边点餐协调服务
//!
//! Coordinates the lifecycle of a restaurant order across three actors:
//! the customer device at the table, the kitchen display, and the waiter
//! console. All three view and mutate a shared order concurrently; the
//! server keeps the order/item dual state machine consistent and fans
//! every committed change out to all observers in real time.
//!
//! # Module structure
//!
//! ```text
//! mesa-server/src/
//! ├── core/          # Config, state, server bootstrap
//! ├── api/           # HTTP routes and handlers
//! ├── db/            # SurrealDB models and repositories
//! ├── orders/        # Transition engine + order coordinator
//! ├── notify/        # Order feed fan-out
//! └── utils/         # Errors, logging, validation
//! ```

pub mod api;
pub mod core;
pub mod db;
pub mod notify;
pub mod orders;
pub mod utils;

// Re-export public types
pub use core::{Config, Server, ServerState};
pub use notify::OrderFeed;
pub use orders::{OrderCoordinator, OrderStore};
pub use utils::{AppError, AppResult};

// Re-export logger functions
pub use utils::logger::{init_logger, init_logger_with_file};

pub fn print_banner() {
    println!(
        r#"
   __  ___
  /  |/  /__  _________ _
 / /|_/ / _ \/ ___/ __ `/
/ /  / /  __(__  ) /_/ /
\_/  /_/\___/____/\__,_/
        table service coordinator
"#
    );
}
