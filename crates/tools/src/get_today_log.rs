//! `get_today_log`: every entry logged today.

use cleanslate_api::FoodLogApi;
use cleanslate_core::{Error, FoodEntry};
use serde::Serialize;
use serde_json::Value;

use crate::operation::ToolOperation;
use crate::schema::NO_ARGUMENTS;

#[derive(Debug, Clone, Serialize)]
pub struct TodayLogOutput {
    pub success: bool,
    pub entries: Vec<FoodEntry>,
    pub count: usize,
}

pub async fn get_today_log(api: &dyn FoodLogApi, input: &Value) -> Result<TodayLogOutput, Error> {
    NO_ARGUMENTS.validate(input)?;

    let entries = api
        .list_today()
        .await
        .map_err(|err| ToolOperation::GetTodayLog.remap(err))?;

    Ok(TodayLogOutput {
        success: true,
        count: entries.len(),
        entries,
    })
}
