//! Client for the CleanSlate diet-tracking service.
//!
//! Two wire variants speak the same contract: [`RestClient`] (verb + path,
//! bearer header) and [`GraphqlClient`] (single endpoint, token in the body).
//! Callers depend on [`FoodLogApi`] and pick a variant once at startup.

use std::sync::Arc;

use async_trait::async_trait;
use cleanslate_core::{DailySummary, EntryUpdate, Error, FoodEntry, NewFoodEntry};

pub mod config;
pub mod graphql;
mod http;
pub mod rest;
pub mod retry;

pub use config::ClientConfig;
pub use graphql::GraphqlClient;
pub use http::error_for_status;
pub use rest::RestClient;

pub const DEFAULT_GRAPHQL_URL: &str = "https://cleanslate.jinocenc.io/auth/graphql";
pub const DEFAULT_REST_URL: &str = "https://api.cleanslate.sh/v1";

/// The five food-log operations, independent of wire format.
#[async_trait]
pub trait FoodLogApi: Send + Sync {
    /// Create an entry; the service assigns its id and timestamp.
    async fn create_entry(&self, entry: &NewFoodEntry) -> Result<FoodEntry, Error>;

    /// Entries logged during the current local day.
    async fn list_today(&self) -> Result<Vec<FoodEntry>, Error>;

    async fn delete_entry(&self, entry_id: &str) -> Result<(), Error>;

    /// Apply a non-empty partial update.
    async fn update_entry(&self, entry_id: &str, update: &EntryUpdate) -> Result<FoodEntry, Error>;

    /// Calorie and protein totals for today.
    async fn today_summary(&self) -> Result<DailySummary, Error>;
}

/// Which wire variant to talk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TransportKind {
    #[default]
    Graphql,
    Rest,
}

impl TransportKind {
    pub fn default_base_url(self) -> &'static str {
        match self {
            Self::Graphql => DEFAULT_GRAPHQL_URL,
            Self::Rest => DEFAULT_REST_URL,
        }
    }
}

/// Build the client for `kind`, taking ownership of the configuration.
pub fn connect(kind: TransportKind, config: ClientConfig) -> Result<Arc<dyn FoodLogApi>, Error> {
    let api: Arc<dyn FoodLogApi> = match kind {
        TransportKind::Graphql => Arc::new(GraphqlClient::new(config)?),
        TransportKind::Rest => Arc::new(RestClient::new(config)?),
    };
    Ok(api)
}
