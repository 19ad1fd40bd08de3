//! Core server components
//!
//! - [`Config`] - 配置管理
//! - [`ServerState`] - 服务器状态
//! - [`Server`] - HTTP 服务器

pub mod config;
pub mod server;
pub mod state;

pub use config::Config;
pub use server::Server;
pub use state::ServerState;
