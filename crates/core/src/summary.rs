//! Daily totals.

use serde::{Deserialize, Serialize};

use crate::de::null_as_default;
use crate::entry::FoodEntry;

/// Totals for one day. Every field defaults to zero, so an empty day is a
/// valid summary rather than a missing one.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailySummary {
    #[serde(default, deserialize_with = "null_as_default")]
    pub total_calories: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub total_protein: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub entry_count: usize,
}

impl DailySummary {
    pub fn from_entries(entries: &[FoodEntry]) -> Self {
        entries.iter().fold(Self::default(), |mut acc, entry| {
            acc.total_calories += u64::from(entry.calories);
            acc.total_protein += entry.protein;
            acc.entry_count += 1;
            acc
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(calories: u32, protein: f64) -> FoodEntry {
        FoodEntry {
            id: format!("id-{calories}"),
            name: "Test".into(),
            calories,
            protein,
            timestamp: "2026-10-18T08:00:00.000Z".into(),
        }
    }

    #[test]
    fn test_empty_day_is_zero() {
        let summary = DailySummary::from_entries(&[]);
        assert_eq!(summary, DailySummary::default());
        assert_eq!(summary.entry_count, 0);
        assert_eq!(summary.total_calories, 0);
        assert_eq!(summary.total_protein, 0.0);
    }

    #[test]
    fn test_sums_entries() {
        let summary = DailySummary::from_entries(&[entry(140, 12.0), entry(165, 31.0)]);
        assert_eq!(summary.total_calories, 305);
        assert_eq!(summary.total_protein, 43.0);
        assert_eq!(summary.entry_count, 2);
    }

    #[test]
    fn test_missing_fields_default_to_zero() {
        let summary: DailySummary = serde_json::from_str("{}").unwrap();
        assert_eq!(summary, DailySummary::default());

        let json = serde_json::to_value(DailySummary::default()).unwrap();
        assert_eq!(json["totalCalories"], 0);
        assert_eq!(json["entryCount"], 0);
    }

    #[test]
    fn test_null_totals_default_to_zero() {
        let summary: DailySummary = serde_json::from_str(
            r#"{"totalCalories": null, "totalProtein": null, "entryCount": null}"#,
        )
        .unwrap();
        assert_eq!(summary, DailySummary::default());
    }
}
