//! GraphQL transport against the `quick_logs` collection.
//!
//! Every operation is a `POST` to the configured endpoint with a body of
//! `{token, query, variables}`. The service answers with the data object
//! itself rather than a `{data: ...}` envelope; an envelope is unwrapped if
//! one shows up. A `200` can still carry an `errors` list, which is
//! classified by wording (see [`classify_graphql_error`]).

use async_trait::async_trait;
use chrono::{DateTime, Local, NaiveDate, NaiveTime, SecondsFormat, TimeZone, Utc};
use cleanslate_core::de::null_as_default;
use cleanslate_core::{
    DailySummary, EMPTY_UPDATE_MESSAGE, EntryUpdate, Error, FoodEntry, NewFoodEntry,
};
use serde::de::IgnoredAny;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use tracing::{debug, warn};

use crate::FoodLogApi;
use crate::config::ClientConfig;
use crate::http::{HttpCore, decode};

pub const NO_DATA_MESSAGE: &str = "No data returned";

const CREATE_QUICK_LOG: &str = r#"
mutation CREATE_QUICK_LOG($object: quick_logs_insert_input!) {
  insert_quick_logs_one(object: $object) {
    id
    name
    calories
    protein
    createdAt
  }
}
"#;

const UPDATE_QUICK_LOG: &str = r#"
mutation UPDATE_QUICK_LOG($pk_columns: quick_logs_pk_columns_input!, $set: quick_logs_set_input) {
  update_quick_logs_by_pk(pk_columns: $pk_columns, _set: $set) {
    id
    name
    calories
    protein
    createdAt
  }
}
"#;

const DELETE_QUICK_LOG: &str = r#"
mutation DELETE_QUICK_LOG($id: uuid!) {
  delete_quick_logs_by_pk(id: $id) {
    id
  }
}
"#;

const GET_TODAY_LOGS: &str = r#"
query GET_TODAY_LOGS($today: timestamptz, $tomorrow: timestamptz) {
  quick_logs(where: { createdAt: { _gte: $today, _lte: $tomorrow } }) {
    id
    name
    calories
    protein
    createdAt
  }
}
"#;

#[derive(Serialize)]
struct GraphqlRequest<'a> {
    token: &'a str,
    query: &'a str,
    variables: Value,
}

#[derive(Debug, Deserialize)]
struct QuickLog {
    id: String,
    name: String,
    calories: u32,
    protein: f64,
    #[serde(rename = "createdAt")]
    created_at: String,
}

impl From<QuickLog> for FoodEntry {
    fn from(log: QuickLog) -> Self {
        Self {
            id: log.id,
            name: log.name,
            calories: log.calories,
            protein: log.protein,
            timestamp: log.created_at,
        }
    }
}

#[derive(Deserialize)]
struct CreateData {
    insert_quick_logs_one: QuickLog,
}

#[derive(Deserialize)]
struct UpdateData {
    update_quick_logs_by_pk: Option<QuickLog>,
}

#[derive(Deserialize)]
struct DeleteData {
    delete_quick_logs_by_pk: Option<IgnoredAny>,
}

#[derive(Deserialize)]
struct TodayData {
    #[serde(default, deserialize_with = "null_as_default")]
    quick_logs: Vec<QuickLog>,
}

/// CleanSlate GraphQL client. The API token travels in the request body.
pub struct GraphqlClient {
    core: HttpCore,
}

impl GraphqlClient {
    pub fn new(config: ClientConfig) -> Result<Self, Error> {
        Ok(Self {
            core: HttpCore::new(config)?,
        })
    }

    async fn execute(&self, operation: &str, query: &str, variables: Value) -> Result<Value, Error> {
        let config = self.core.config();
        let body = GraphqlRequest {
            token: config.api_key(),
            query,
            variables,
        };
        debug!(operation, url = %config.base_url(), "CleanSlate GraphQL request");

        let payload = self
            .core
            .send(|http| http.post(config.base_url()).json(&body))
            .await?;

        extract_data(payload).inspect_err(|err| {
            warn!(operation, kind = ?err.kind(), "GraphQL operation failed");
        })
    }
}

#[async_trait]
impl FoodLogApi for GraphqlClient {
    async fn create_entry(&self, entry: &NewFoodEntry) -> Result<FoodEntry, Error> {
        let variables = json!({
            "object": {
                "name": entry.name,
                "calories": entry.calories,
                "protein": entry.protein,
            }
        });
        let data = self
            .execute("CREATE_QUICK_LOG", CREATE_QUICK_LOG, variables)
            .await?;
        Ok(decode::<CreateData>(data)?.insert_quick_logs_one.into())
    }

    async fn list_today(&self) -> Result<Vec<FoodEntry>, Error> {
        let (today, tomorrow) = day_bounds(&Local::now());
        let variables = json!({ "today": today, "tomorrow": tomorrow });
        let data = self
            .execute("GET_TODAY_LOGS", GET_TODAY_LOGS, variables)
            .await?;
        let logs = decode::<TodayData>(data)?.quick_logs;
        Ok(logs.into_iter().map(FoodEntry::from).collect())
    }

    async fn delete_entry(&self, entry_id: &str) -> Result<(), Error> {
        let data = self
            .execute("DELETE_QUICK_LOG", DELETE_QUICK_LOG, json!({ "id": entry_id }))
            .await?;
        match decode::<DeleteData>(data)?.delete_quick_logs_by_pk {
            Some(_) => Ok(()),
            None => Err(Error::not_found()),
        }
    }

    async fn update_entry(&self, entry_id: &str, update: &EntryUpdate) -> Result<FoodEntry, Error> {
        if update.is_empty() {
            return Err(Error::validation(EMPTY_UPDATE_MESSAGE));
        }
        let variables = json!({
            "pk_columns": { "id": entry_id },
            "set": update,
        });
        let data = self
            .execute("UPDATE_QUICK_LOG", UPDATE_QUICK_LOG, variables)
            .await?;
        decode::<UpdateData>(data)?
            .update_quick_logs_by_pk
            .map(FoodEntry::from)
            .ok_or_else(Error::not_found)
    }

    /// There is no aggregate on the GraphQL side, so totals are summed from
    /// today's list.
    async fn today_summary(&self) -> Result<DailySummary, Error> {
        let entries = self.list_today().await?;
        Ok(DailySummary::from_entries(&entries))
    }
}

/// Turn a successful response body into its data object, surfacing any
/// protocol-level errors first.
fn extract_data(mut payload: Value) -> Result<Value, Error> {
    if let Some(first) = payload
        .get("errors")
        .and_then(Value::as_array)
        .and_then(|errors| errors.first())
    {
        let message = first.get("message").and_then(Value::as_str).unwrap_or_default();
        return Err(classify_graphql_error(message));
    }

    let data = match payload.get_mut("data").map(Value::take) {
        Some(data) => data,
        None => {
            if let Some(object) = payload.as_object_mut() {
                object.remove("errors");
            }
            payload
        }
    };

    match &data {
        Value::Null => Err(Error::Api(NO_DATA_MESSAGE.into())),
        Value::Object(object) if object.is_empty() => Err(Error::Api(NO_DATA_MESSAGE.into())),
        _ => Ok(data),
    }
}

/// Classify a GraphQL error by the words in its message.
///
/// This is a best-effort heuristic: a service that words its errors
/// differently (or mentions "author" in a field error) will be misread.
pub fn classify_graphql_error(message: &str) -> Error {
    let lower = message.to_lowercase();

    if lower.contains("unauthorized") || lower.contains("auth") {
        Error::authentication()
    } else if lower.contains("invalid") || lower.contains("validation") {
        Error::Validation(message.to_string())
    } else if lower.contains("not found") {
        Error::not_found()
    } else {
        Error::api()
    }
}

/// Start of the local calendar day containing `now` and start of the next
/// one, as UTC instants in `toISOString` form.
pub fn day_bounds<Tz: TimeZone>(now: &DateTime<Tz>) -> (String, String) {
    let tz = now.timezone();
    let today = now.date_naive();
    let tomorrow = today.succ_opt().unwrap_or(today);

    (
        iso_instant(&local_midnight(&tz, today)),
        iso_instant(&local_midnight(&tz, tomorrow)),
    )
}

/// Midnight in `tz`. Where a DST jump skips midnight, the first instant of
/// the day after the gap is used.
fn local_midnight<Tz: TimeZone>(tz: &Tz, date: NaiveDate) -> DateTime<Utc> {
    let midnight = date.and_time(NaiveTime::default());
    match tz.from_local_datetime(&midnight).earliest() {
        Some(start) => start.with_timezone(&Utc),
        None => {
            let after_gap = midnight + chrono::Duration::hours(1);
            tz.from_local_datetime(&after_gap)
                .earliest()
                .map(|start| start.with_timezone(&Utc))
                .unwrap_or_else(|| Utc.from_utc_datetime(&midnight))
        }
    }
}

fn iso_instant(instant: &DateTime<Utc>) -> String {
    instant.to_rfc3339_opts(SecondsFormat::Millis, true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::FixedOffset;
    use cleanslate_core::ErrorKind;
    use mockito::{Matcher, Server};

    const KEY: &str = "gql-token";

    fn client(url: &str) -> GraphqlClient {
        let config = ClientConfig::new(KEY, format!("{url}/auth/graphql")).unwrap();
        GraphqlClient::new(config).unwrap()
    }

    fn log_json(id: &str, name: &str, calories: u32, protein: f64) -> Value {
        json!({
            "id": id,
            "name": name,
            "calories": calories,
            "protein": protein,
            "createdAt": "2026-10-18T12:00:00.000Z"
        })
    }

    #[test]
    fn test_day_bounds_fixed_offset() {
        let tz = FixedOffset::west_opt(5 * 3600).unwrap();
        let now = tz.with_ymd_and_hms(2026, 10, 18, 15, 30, 0).unwrap();
        let (today, tomorrow) = day_bounds(&now);
        assert_eq!(today, "2026-10-18T05:00:00.000Z");
        assert_eq!(tomorrow, "2026-10-19T05:00:00.000Z");
    }

    #[test]
    fn test_day_bounds_utc_late_evening() {
        let now = Utc.with_ymd_and_hms(2026, 12, 31, 23, 59, 59).unwrap();
        let (today, tomorrow) = day_bounds(&now);
        assert_eq!(today, "2026-12-31T00:00:00.000Z");
        assert_eq!(tomorrow, "2027-01-01T00:00:00.000Z");
    }

    #[test]
    fn test_classify_by_wording() {
        assert_eq!(classify_graphql_error("Unauthorized").kind(), ErrorKind::Authentication);
        assert_eq!(
            classify_graphql_error("Could not verify JWT: auth failed").kind(),
            ErrorKind::Authentication
        );
        assert_eq!(
            classify_graphql_error("invalid input syntax for type uuid").kind(),
            ErrorKind::Validation
        );
        assert_eq!(
            classify_graphql_error("validation failed for field calories").kind(),
            ErrorKind::Validation
        );
        assert_eq!(classify_graphql_error("Entry not found").kind(), ErrorKind::NotFound);
        assert_eq!(classify_graphql_error("database is on fire").kind(), ErrorKind::Api);
    }

    #[test]
    fn test_classify_heuristic_can_misread() {
        // Wording-based: an unrelated mention of "author" reads as an auth
        // failure. Services with other phrasing may be classified differently.
        assert_eq!(
            classify_graphql_error("field 'author' not found in type quick_logs").kind(),
            ErrorKind::Authentication
        );
    }

    #[test]
    fn test_extract_data_shapes() {
        let raw = extract_data(json!({ "quick_logs": [] })).unwrap();
        assert_eq!(raw, json!({ "quick_logs": [] }));

        let wrapped = extract_data(json!({ "data": { "quick_logs": [] } })).unwrap();
        assert_eq!(wrapped, json!({ "quick_logs": [] }));

        assert_eq!(
            extract_data(json!({})).unwrap_err(),
            Error::Api(NO_DATA_MESSAGE.into())
        );
        assert_eq!(
            extract_data(json!({ "data": null })).unwrap_err(),
            Error::Api(NO_DATA_MESSAGE.into())
        );
        assert_eq!(
            extract_data(json!({ "errors": [{ "message": "not found" }] })).unwrap_err(),
            Error::not_found()
        );
    }

    #[tokio::test]
    async fn test_create_sends_token_in_body() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", "/auth/graphql")
            .match_body(Matcher::PartialJson(json!({
                "token": KEY,
                "variables": {
                    "object": { "name": "Apple", "calories": 95, "protein": 0.5 }
                }
            })))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(json!({ "insert_quick_logs_one": log_json("q-1", "Apple", 95, 0.5) }).to_string())
            .expect(1)
            .create_async()
            .await;

        let entry = client(&server.url())
            .create_entry(&NewFoodEntry {
                name: "Apple".into(),
                calories: 95,
                protein: 0.5,
            })
            .await
            .unwrap();

        mock.assert_async().await;
        assert_eq!(entry.id, "q-1");
        assert_eq!(entry.timestamp, "2026-10-18T12:00:00.000Z");
    }

    #[tokio::test]
    async fn test_summary_sums_today_list() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", "/auth/graphql")
            .match_body(Matcher::Regex("GET_TODAY_LOGS".into()))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                json!({
                    "quick_logs": [
                        log_json("q-1", "Greek Yogurt", 140, 12.0),
                        log_json("q-2", "Chicken Breast", 165, 31.0)
                    ]
                })
                .to_string(),
            )
            .expect(2)
            .create_async()
            .await;

        let api = client(&server.url());
        let entries = api.list_today().await.unwrap();
        let summary = api.today_summary().await.unwrap();
        mock.assert_async().await;

        let calories: u64 = entries.iter().map(|e| u64::from(e.calories)).sum();
        let protein: f64 = entries.iter().map(|e| e.protein).sum();
        assert_eq!(summary.total_calories, calories);
        assert_eq!(summary.total_protein, protein);
        assert_eq!(summary.total_calories, 305);
        assert_eq!(summary.total_protein, 43.0);
        assert_eq!(summary.entry_count, 2);
    }

    #[tokio::test]
    async fn test_empty_day() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("POST", "/auth/graphql")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"quick_logs": []}"#)
            .create_async()
            .await;

        let api = client(&server.url());
        assert!(api.list_today().await.unwrap().is_empty());
        assert_eq!(api.today_summary().await.unwrap(), DailySummary::default());
    }

    #[tokio::test]
    async fn test_null_log_list_is_empty_day() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("POST", "/auth/graphql")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"quick_logs": null}"#)
            .create_async()
            .await;

        let api = client(&server.url());
        assert!(api.list_today().await.unwrap().is_empty());
        assert_eq!(api.today_summary().await.unwrap(), DailySummary::default());
    }

    #[tokio::test]
    async fn test_delete_missing_is_not_found() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("POST", "/auth/graphql")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"delete_quick_logs_by_pk": null}"#)
            .create_async()
            .await;

        let err = client(&server.url())
            .delete_entry("5f0c1f0e-4a55-4a0b-9d7c-2f1f5b0f6a01")
            .await
            .unwrap_err();
        assert_eq!(err, Error::not_found());
    }

    #[tokio::test]
    async fn test_update_sends_set_and_maps_null_to_not_found() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", "/auth/graphql")
            .match_body(Matcher::PartialJson(json!({
                "variables": {
                    "pk_columns": { "id": "q-9" },
                    "set": { "name": "Banana" }
                }
            })))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"update_quick_logs_by_pk": null}"#)
            .expect(1)
            .create_async()
            .await;

        let update = EntryUpdate {
            name: Some("Banana".into()),
            ..Default::default()
        };
        let err = client(&server.url()).update_entry("q-9", &update).await.unwrap_err();
        mock.assert_async().await;
        assert_eq!(err, Error::not_found());
    }

    #[tokio::test]
    async fn test_error_list_on_ok_status() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("POST", "/auth/graphql")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"errors": [{"message": "Unauthorized: token expired"}]}"#)
            .create_async()
            .await;

        let err = client(&server.url()).list_today().await.unwrap_err();
        assert_eq!(err, Error::authentication());
    }

    #[tokio::test]
    async fn test_http_status_still_mapped() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("POST", "/auth/graphql")
            .with_status(403)
            .create_async()
            .await;

        let err = client(&server.url()).list_today().await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Authentication);
    }
}
