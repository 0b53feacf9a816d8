//! `log_food`: add an entry to today's log.

use cleanslate_api::FoodLogApi;
use cleanslate_core::{Error, FoodEntry, NewFoodEntry};
use serde::Serialize;
use serde_json::Value;

use crate::operation::ToolOperation;
use crate::schema::{self, LOG_FOOD};

#[derive(Debug, Clone, Serialize)]
pub struct LogFoodOutput {
    pub success: bool,
    pub entry: FoodEntry,
    pub message: String,
}

pub async fn log_food(api: &dyn FoodLogApi, input: &Value) -> Result<LogFoodOutput, Error> {
    LOG_FOOD.validate(input)?;

    let new_entry = NewFoodEntry {
        name: schema::text(input, "name").unwrap_or_default(),
        calories: schema::whole(input, "calories").unwrap_or_default(),
        protein: schema::number(input, "protein").unwrap_or_default(),
    };

    let entry = api
        .create_entry(&new_entry)
        .await
        .map_err(|err| ToolOperation::LogFood.remap(err))?;

    Ok(LogFoodOutput {
        success: true,
        entry,
        message: format!("Added {} to today's log", new_entry.name),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::MemoryFoodLog;
    use cleanslate_core::ErrorKind;
    use serde_json::json;

    #[tokio::test]
    async fn test_logs_entry_with_confirmation() {
        let api = MemoryFoodLog::new();
        let output = log_food(
            &api,
            &json!({ "name": "Grilled Chicken", "calories": 200, "protein": 35 }),
        )
        .await
        .unwrap();

        assert!(output.success);
        assert_eq!(output.message, "Added Grilled Chicken to today's log");
        assert_eq!(output.entry.name, "Grilled Chicken");
        assert_eq!(output.entry.calories, 200);
        assert_eq!(output.entry.protein, 35.0);
        assert!(!output.entry.id.is_empty());
        assert_eq!(api.calls(), 1);
    }

    #[tokio::test]
    async fn test_out_of_range_values_never_reach_the_api() {
        let api = MemoryFoodLog::new();
        let inputs = [
            json!({ "name": "Cake", "calories": -1, "protein": 4 }),
            json!({ "name": "Cake", "calories": 10001, "protein": 4 }),
            json!({ "name": "Cake", "calories": 400, "protein": -0.5 }),
            json!({ "name": "Cake", "calories": 400, "protein": 500.1 }),
            json!({ "name": "Cake", "calories": 12.5, "protein": 4 }),
            json!({ "name": "", "calories": 400, "protein": 4 }),
            json!({ "calories": 400, "protein": 4 }),
        ];

        for input in inputs {
            let err = log_food(&api, &input).await.unwrap_err();
            assert_eq!(err.kind(), ErrorKind::Validation, "{input}");
        }
        assert_eq!(api.calls(), 0);
    }

    #[tokio::test]
    async fn test_schema_message_is_surfaced_verbatim() {
        let api = MemoryFoodLog::new();
        let err = log_food(&api, &json!({ "name": "Rice", "calories": 20000, "protein": 4 }))
            .await
            .unwrap_err();
        assert_eq!(err, Error::validation("Calories must be 10,000 or less"));
    }

    #[tokio::test]
    async fn test_boundaries_are_accepted() {
        let api = MemoryFoodLog::new();
        for input in [
            json!({ "name": "Water", "calories": 0, "protein": 0 }),
            json!({ "name": "x".repeat(200), "calories": 10000, "protein": 500 }),
        ] {
            log_food(&api, &input).await.unwrap();
        }
        assert_eq!(api.calls(), 2);
    }

    #[tokio::test]
    async fn test_failures_are_reworded() {
        let api = MemoryFoodLog::failing(Error::network());
        let err = log_food(&api, &json!({ "name": "Rice", "calories": 200, "protein": 4 }))
            .await
            .unwrap_err();
        assert_eq!(
            err,
            Error::Network("Couldn't save entry right now. Check your connection and try again.".into())
        );

        let api = MemoryFoodLog::failing(Error::api());
        let err = log_food(&api, &json!({ "name": "Rice", "calories": 200, "protein": 4 }))
            .await
            .unwrap_err();
        assert_eq!(
            err,
            Error::Api("Couldn't save entry right now. Try again in a moment.".into())
        );
    }

    #[tokio::test]
    async fn test_authentication_passes_through() {
        let api = MemoryFoodLog::failing(Error::authentication());
        let err = log_food(&api, &json!({ "name": "Rice", "calories": 200, "protein": 4 }))
            .await
            .unwrap_err();
        assert_eq!(err, Error::authentication());
    }
}
