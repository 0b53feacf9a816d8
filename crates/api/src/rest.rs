//! REST transport: one resource path per operation, bearer auth in the
//! `Authorization` header.

use async_trait::async_trait;
use cleanslate_core::de::null_as_default;
use cleanslate_core::{
    DailySummary, EMPTY_UPDATE_MESSAGE, EntryUpdate, Error, FoodEntry, NewFoodEntry,
};
use reqwest::Method;
use reqwest::header::CONTENT_TYPE;
use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use crate::FoodLogApi;
use crate::config::ClientConfig;
use crate::http::{HttpCore, decode};

#[derive(Debug, Deserialize)]
struct EntryEnvelope {
    entry: FoodEntry,
}

#[derive(Debug, Deserialize)]
struct EntriesEnvelope {
    #[serde(default, deserialize_with = "null_as_default")]
    entries: Vec<FoodEntry>,
}

/// CleanSlate REST API client.
pub struct RestClient {
    core: HttpCore,
}

impl RestClient {
    pub fn new(config: ClientConfig) -> Result<Self, Error> {
        Ok(Self {
            core: HttpCore::new(config)?,
        })
    }

    async fn request(&self, method: Method, path: &str, body: Option<Value>) -> Result<Value, Error> {
        let config = self.core.config();
        let url = format!("{}{}", config.base_url(), path);
        debug!(method = %method, url = %url, "CleanSlate REST request");

        self.core
            .send(|http| {
                let request = http
                    .request(method.clone(), &url)
                    .bearer_auth(config.api_key())
                    .header(CONTENT_TYPE, "application/json");
                match &body {
                    Some(body) => request.json(body),
                    None => request,
                }
            })
            .await
    }
}

fn entry_path(entry_id: &str) -> String {
    format!("/food-entries/{}", urlencoding::encode(entry_id))
}

fn to_body<T: serde::Serialize>(value: &T) -> Result<Value, Error> {
    serde_json::to_value(value).map_err(|_| Error::api())
}

#[async_trait]
impl FoodLogApi for RestClient {
    async fn create_entry(&self, entry: &NewFoodEntry) -> Result<FoodEntry, Error> {
        let body = to_body(entry)?;
        let value = self.request(Method::POST, "/food-entries", Some(body)).await?;
        Ok(decode::<EntryEnvelope>(value)?.entry)
    }

    async fn list_today(&self) -> Result<Vec<FoodEntry>, Error> {
        let value = self.request(Method::GET, "/food-entries/today", None).await?;
        Ok(decode::<EntriesEnvelope>(value)?.entries)
    }

    async fn delete_entry(&self, entry_id: &str) -> Result<(), Error> {
        self.request(Method::DELETE, &entry_path(entry_id), None).await?;
        Ok(())
    }

    async fn update_entry(&self, entry_id: &str, update: &EntryUpdate) -> Result<FoodEntry, Error> {
        if update.is_empty() {
            return Err(Error::validation(EMPTY_UPDATE_MESSAGE));
        }
        let body = to_body(update)?;
        let value = self
            .request(Method::PATCH, &entry_path(entry_id), Some(body))
            .await?;
        Ok(decode::<EntryEnvelope>(value)?.entry)
    }

    async fn today_summary(&self) -> Result<DailySummary, Error> {
        let value = self
            .request(Method::GET, "/food-entries/today/summary", None)
            .await?;
        decode(value)
    }
}
