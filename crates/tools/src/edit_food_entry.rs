//! `edit_food_entry`: change any of name, calories or protein.

use cleanslate_api::FoodLogApi;
use cleanslate_core::{EntryUpdate, Error, FoodEntry};
use serde::Serialize;
use serde_json::Value;

use crate::operation::ToolOperation;
use crate::schema::{self, EDIT_FOOD_ENTRY};

#[derive(Debug, Clone, Serialize)]
pub struct EditOutput {
    pub success: bool,
    pub entry: FoodEntry,
    pub message: String,
}

/// Build the partial update from validated input. Only fields present in the
/// input end up in the update.
pub fn update_from_input(input: &Value) -> EntryUpdate {
    EntryUpdate {
        name: schema::text(input, "name"),
        calories: schema::whole(input, "calories"),
        protein: schema::number(input, "protein"),
    }
}

pub async fn edit_food_entry(api: &dyn FoodLogApi, input: &Value) -> Result<EditOutput, Error> {
    EDIT_FOOD_ENTRY.validate(input)?;
    let entry_id = schema::text(input, "entryId").unwrap_or_default();
    let update = update_from_input(input);

    let entry = api
        .update_entry(&entry_id, &update)
        .await
        .map_err(|err| ToolOperation::EditFoodEntry.remap(err))?;

    Ok(EditOutput {
        success: true,
        entry,
        message: "Entry updated".into(),
    })
}
