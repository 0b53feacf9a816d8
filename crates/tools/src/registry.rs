//! The fixed tool table and the dispatcher that runs a tool by name.

use std::fmt;
use std::sync::Arc;

use cleanslate_api::FoodLogApi;
use cleanslate_core::Error;
use serde::Serialize;
use serde_json::{Value, json};
use tracing::{info, warn};

use crate::delete_food_entry::delete_food_entry;
use crate::edit_food_entry::edit_food_entry;
use crate::get_today_log::get_today_log;
use crate::get_today_summary::get_today_summary;
use crate::log_food::log_food;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolName {
    LogFood,
    GetTodayLog,
    DeleteFoodEntry,
    EditFoodEntry,
    GetTodaySummary,
}

impl ToolName {
    pub const ALL: [ToolName; 5] = [
        Self::LogFood,
        Self::GetTodayLog,
        Self::DeleteFoodEntry,
        Self::EditFoodEntry,
        Self::GetTodaySummary,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::LogFood => "log_food",
            Self::GetTodayLog => "get_today_log",
            Self::DeleteFoodEntry => "delete_food_entry",
            Self::EditFoodEntry => "edit_food_entry",
            Self::GetTodaySummary => "get_today_summary",
        }
    }

    pub fn parse(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|tool| tool.as_str() == name)
    }

    fn description(self) -> &'static str {
        match self {
            Self::LogFood => "Add a food entry to today's log with calories and protein",
            Self::GetTodayLog => "Retrieve all food entries logged today",
            Self::DeleteFoodEntry => "Remove a food entry from today's log",
            Self::EditFoodEntry => "Update calories, protein, or name of an existing entry",
            Self::GetTodaySummary => "Get total calories and protein for today",
        }
    }

    fn input_schema(self) -> Value {
        match self {
            Self::LogFood => json!({
                "type": "object",
                "properties": {
                    "name": {
                        "type": "string",
                        "description": "Food name or description (1-200 characters)"
                    },
                    "calories": {
                        "type": "number",
                        "description": "Calories (0-10000, whole number)"
                    },
                    "protein": {
                        "type": "number",
                        "description": "Protein in grams (0-500, can be decimal)"
                    }
                },
                "required": ["name", "calories", "protein"]
            }),
            Self::DeleteFoodEntry => json!({
                "type": "object",
                "properties": {
                    "entryId": {
                        "type": "string",
                        "description": "UUID of the entry to delete"
                    }
                },
                "required": ["entryId"]
            }),
            Self::EditFoodEntry => json!({
                "type": "object",
                "properties": {
                    "entryId": {
                        "type": "string",
                        "description": "UUID of the entry to edit"
                    },
                    "name": {
                        "type": "string",
                        "description": "Updated food name (optional, 1-200 characters)"
                    },
                    "calories": {
                        "type": "number",
                        "description": "Updated calories (optional, 0-10000)"
                    },
                    "protein": {
                        "type": "number",
                        "description": "Updated protein in grams (optional, 0-500)"
                    }
                },
                "required": ["entryId"]
            }),
            Self::GetTodayLog | Self::GetTodaySummary => json!({
                "type": "object",
                "properties": {}
            }),
        }
    }

    pub fn definition(self) -> ToolDefinition {
        ToolDefinition {
            name: self.as_str(),
            description: self.description(),
            input_schema: self.input_schema(),
        }
    }
}

impl fmt::Display for ToolName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One entry of the `tools/list` answer.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolDefinition {
    pub name: &'static str,
    pub description: &'static str,
    pub input_schema: Value,
}

/// Outcome of a tool call, already shaped as the JSON envelope the caller
/// sees.
#[derive(Debug, Clone, PartialEq)]
pub struct ToolResponse {
    pub payload: Value,
    pub is_error: bool,
}

impl ToolResponse {
    fn success(payload: Value) -> Self {
        Self {
            payload,
            is_error: false,
        }
    }

    fn failure(message: &str) -> Self {
        Self {
            payload: json!({ "success": false, "error": message }),
            is_error: true,
        }
    }
}

/// Runs tools against one food-log client.
#[derive(Clone)]
pub struct ToolRegistry {
    api: Arc<dyn FoodLogApi>,
}

impl ToolRegistry {
    pub fn new(api: Arc<dyn FoodLogApi>) -> Self {
        Self { api }
    }

    pub fn definitions(&self) -> Vec<ToolDefinition> {
        ToolName::ALL.into_iter().map(ToolName::definition).collect()
    }

    /// Run the tool called `name`. Every outcome, unknown tools included,
    /// becomes a response; nothing here fails the caller.
    pub async fn call(&self, name: &str, arguments: &Value) -> ToolResponse {
        let Some(tool) = ToolName::parse(name) else {
            warn!(tool = name, "Unknown tool requested");
            return ToolResponse::failure(&format!("Unknown tool: {name}"));
        };

        info!(tool = %tool, "Running tool");

        let result = self.run(tool, arguments).await;
        match result {
            Ok(payload) => ToolResponse::success(payload),
            Err(err) => {
                warn!(tool = %tool, kind = ?err.kind(), error = %err, "Tool failed");
                ToolResponse::failure(err.message())
            }
        }
    }

    async fn run(&self, tool: ToolName, arguments: &Value) -> Result<Value, Error> {
        let api = self.api.as_ref();
        match tool {
            ToolName::LogFood => to_payload(log_food(api, arguments).await?),
            ToolName::GetTodayLog => to_payload(get_today_log(api, arguments).await?),
            ToolName::DeleteFoodEntry => to_payload(delete_food_entry(api, arguments).await?),
            ToolName::EditFoodEntry => to_payload(edit_food_entry(api, arguments).await?),
            ToolName::GetTodaySummary => to_payload(get_today_summary(api, arguments).await?),
        }
    }
}

fn to_payload<T: Serialize>(output: T) -> Result<Value, Error> {
    serde_json::to_value(output).map_err(|err| {
        warn!(error = %err, "Failed to serialize tool output");
        Error::api()
    })
}
