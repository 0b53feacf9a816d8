//! `get_today_summary`: today's calorie and protein totals.

use cleanslate_api::FoodLogApi;
use cleanslate_core::{DailySummary, Error};
use serde::Serialize;
use serde_json::Value;

use crate::operation::ToolOperation;
use crate::schema::NO_ARGUMENTS;

#[derive(Debug, Clone, Serialize)]
pub struct SummaryOutput {
    pub success: bool,
    pub summary: DailySummary,
}

pub async fn get_today_summary(api: &dyn FoodLogApi, input: &Value) -> Result<SummaryOutput, Error> {
    NO_ARGUMENTS.validate(input)?;

    let summary = api
        .today_summary()
        .await
        .map_err(|err| ToolOperation::GetTodaySummary.remap(err))?;

    Ok(SummaryOutput {
        success: true,
        summary,
    })
}
