//! MCP stdio server for the CleanSlate food log.

pub mod config;
pub mod protocol;
pub mod server;

pub use config::Config;
pub use server::McpServer;
