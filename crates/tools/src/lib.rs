//! The five food-log tools: input rules, the adapters that call the
//! service, and the dispatcher that runs them by name.

pub mod delete_food_entry;
pub mod edit_food_entry;
pub mod get_today_log;
pub mod get_today_summary;
pub mod log_food;
pub mod operation;
pub mod registry;
pub mod schema;

#[cfg(test)]
mod testing;

pub use operation::ToolOperation;
pub use registry::{ToolDefinition, ToolName, ToolRegistry, ToolResponse};
