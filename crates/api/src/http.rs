//! Shared HTTP plumbing for both transports: deadline, retry, response
//! decoding and status mapping.

use cleanslate_core::Error;
use reqwest::header::CONTENT_TYPE;
use reqwest::{RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, warn};

use crate::config::ClientConfig;
use crate::retry::{send_with_retry, RETRY_BACKOFF};

/// Used for a 400 response that carries no message of its own.
pub const VALIDATION_FALLBACK_MESSAGE: &str =
    "The request couldn't be processed. Check the values and try again.";

/// Used when an error response body can't be read or parsed.
pub const UNKNOWN_ERROR_MESSAGE: &str = "Unknown error occurred";

pub(crate) struct HttpCore {
    http: reqwest::Client,
    config: ClientConfig,
}

impl HttpCore {
    pub fn new(config: ClientConfig) -> Result<Self, Error> {
        let http = reqwest::Client::builder().build().map_err(|err| {
            warn!(error = %err, "Failed to build HTTP client");
            Error::api()
        })?;

        Ok(Self { http, config })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Perform one logical call. Transport failures are retried; the whole
    /// call, retries and body read included, is bounded by the configured
    /// timeout.
    pub async fn send<F>(&self, make_request: F) -> Result<Value, Error>
    where
        F: Fn(&reqwest::Client) -> RequestBuilder + Sync,
    {
        let call = async {
            let response = send_with_retry(self.config.max_retries(), RETRY_BACKOFF, || {
                make_request(&self.http).send()
            })
            .await
            .map_err(|err| {
                warn!(error = %err, "Request failed after retries");
                Error::network()
            })?;

            read_response(response).await
        };

        match tokio::time::timeout(self.config.timeout(), call).await {
            Ok(result) => result,
            Err(_) => {
                warn!(
                    timeout_ms = self.config.timeout().as_millis() as u64,
                    "Request timed out"
                );
                Err(Error::timed_out())
            }
        }
    }
}

/// Map a failed HTTP status to the error taxonomy.
pub fn error_for_status(status: u16, message: Option<String>) -> Error {
    match status {
        400 => Error::Validation(message.unwrap_or_else(|| VALIDATION_FALLBACK_MESSAGE.into())),
        401 | 403 => message.map_or_else(Error::authentication, Error::Authentication),
        404 => message.map_or_else(Error::not_found, Error::NotFound),
        _ => message.map_or_else(Error::api, Error::Api),
    }
}

pub(crate) fn decode<T: DeserializeOwned>(value: Value) -> Result<T, Error> {
    serde_json::from_value(value).map_err(|err| {
        warn!(error = %err, "Unexpected response shape");
        Error::api()
    })
}

async fn read_response(response: Response) -> Result<Value, Error> {
    let status = response.status();
    let is_json = response
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .is_some_and(|value| value.contains("application/json"));

    debug!(status = status.as_u16(), "Response received");

    if !status.is_success() {
        let message = read_error_message(response, is_json).await;
        return Err(error_for_status(status.as_u16(), message));
    }

    if !is_json || status == StatusCode::NO_CONTENT {
        return Ok(Value::Object(Default::default()));
    }

    let body = response.bytes().await.map_err(|err| {
        warn!(error = %err, "Failed to read response body");
        Error::network()
    })?;

    if body.is_empty() {
        return Ok(Value::Object(Default::default()));
    }

    serde_json::from_slice(&body).map_err(|err| {
        warn!(error = %err, "Response body is not JSON");
        Error::api()
    })
}

/// Pull a human-readable message out of an error response. `None` means the
/// body had nothing to say and the status default applies.
async fn read_error_message(response: Response, is_json: bool) -> Option<String> {
    if is_json {
        return match response.json::<Value>().await {
            Ok(body) => body
                .get("message")
                .and_then(Value::as_str)
                .filter(|message| !message.is_empty())
                .map(str::to_string),
            Err(_) => Some(UNKNOWN_ERROR_MESSAGE.into()),
        };
    }

    match response.text().await {
        Ok(text) if text.trim().is_empty() => None,
        Ok(text) => Some(text.trim().to_string()),
        Err(_) => Some(UNKNOWN_ERROR_MESSAGE.into()),
    }
}
