//! `delete_food_entry`: remove one entry by id.

use cleanslate_api::FoodLogApi;
use cleanslate_core::Error;
use serde::Serialize;
use serde_json::Value;

use crate::operation::ToolOperation;
use crate::schema::{self, DELETE_FOOD_ENTRY};

#[derive(Debug, Clone, Serialize)]
pub struct DeleteOutput {
    pub success: bool,
    pub message: String,
}

pub async fn delete_food_entry(api: &dyn FoodLogApi, input: &Value) -> Result<DeleteOutput, Error> {
    DELETE_FOOD_ENTRY.validate(input)?;
    let entry_id = schema::text(input, "entryId").unwrap_or_default();

    api.delete_entry(&entry_id)
        .await
        .map_err(|err| ToolOperation::DeleteFoodEntry.remap(err))?;

    Ok(DeleteOutput {
        success: true,
        message: "Entry deleted".into(),
    })
}
