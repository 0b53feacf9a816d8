//! Food entries as the remote service reports them.

use serde::{Deserialize, Serialize};

/// A logged food item. The identifier and timestamp are always assigned by
/// the remote service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FoodEntry {
    pub id: String,
    pub name: String,
    pub calories: u32,
    /// Grams, may be fractional.
    pub protein: f64,
    /// ISO-8601 creation instant.
    pub timestamp: String,
}

/// Fields for a new entry, already validated.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewFoodEntry {
    pub name: String,
    pub calories: u32,
    pub protein: f64,
}

/// Partial update. Absent fields are left out of the wire payload entirely.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct EntryUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub calories: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub protein: Option<f64>,
}

impl EntryUpdate {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.calories.is_none() && self.protein.is_none()
    }
}
