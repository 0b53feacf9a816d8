//! In-memory food log used by the tool tests.

use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use cleanslate_api::FoodLogApi;
use cleanslate_core::{DailySummary, EntryUpdate, Error, FoodEntry, NewFoodEntry};

const TIMESTAMP: &str = "2026-10-18T12:00:00.000Z";

/// Behaves like the remote service for one day's log and counts every call.
#[derive(Default)]
pub struct MemoryFoodLog {
    entries: Mutex<Vec<FoodEntry>>,
    failure: Option<Error>,
    calls: AtomicUsize,
}

impl MemoryFoodLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every call fails with `err`.
    pub fn failing(err: Error) -> Self {
        Self {
            failure: Some(err),
            ..Self::default()
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn enter(&self) -> Result<(), Error> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.failure {
            Some(err) => Err(err.clone()),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl FoodLogApi for MemoryFoodLog {
    async fn create_entry(&self, entry: &NewFoodEntry) -> Result<FoodEntry, Error> {
        self.enter()?;
        let created = FoodEntry {
            id: uuid::Uuid::new_v4().to_string(),
            name: entry.name.clone(),
            calories: entry.calories,
            protein: entry.protein,
            timestamp: TIMESTAMP.into(),
        };
        self.entries.lock().unwrap().push(created.clone());
        Ok(created)
    }

    async fn list_today(&self) -> Result<Vec<FoodEntry>, Error> {
        self.enter()?;
        Ok(self.entries.lock().unwrap().clone())
    }

    async fn delete_entry(&self, entry_id: &str) -> Result<(), Error> {
        self.enter()?;
        let mut entries = self.entries.lock().unwrap();
        let before = entries.len();
        entries.retain(|entry| entry.id != entry_id);
        if entries.len() == before {
            return Err(Error::not_found());
        }
        Ok(())
    }

    async fn update_entry(&self, entry_id: &str, update: &EntryUpdate) -> Result<FoodEntry, Error> {
        self.enter()?;
        let mut entries = self.entries.lock().unwrap();
        let entry = entries
            .iter_mut()
            .find(|entry| entry.id == entry_id)
            .ok_or_else(Error::not_found)?;
        if let Some(name) = &update.name {
            entry.name = name.clone();
        }
        if let Some(calories) = update.calories {
            entry.calories = calories;
        }
        if let Some(protein) = update.protein {
            entry.protein = protein;
        }
        Ok(entry.clone())
    }

    async fn today_summary(&self) -> Result<DailySummary, Error> {
        self.enter()?;
        Ok(DailySummary::from_entries(&self.entries.lock().unwrap()))
    }
}
