//! Core types for the CleanSlate food log: entries, summaries and the
//! error taxonomy every layer speaks.

pub mod de;
pub mod entry;
pub mod summary;

pub use entry::{EntryUpdate, FoodEntry, NewFoodEntry};
pub use summary::DailySummary;

/// Message used when the remote service returns an authentication failure
/// without its own explanation.
pub const AUTHENTICATION_MESSAGE: &str = "Invalid API key. Check your configuration.";

pub const NOT_FOUND_MESSAGE: &str = "That entry wasn't found. It may have been deleted.";

pub const NETWORK_MESSAGE: &str = "Network issue. Check your connection and try again.";

pub const API_MESSAGE: &str = "Couldn't complete request right now. Try again in a moment.";

/// Message used when a call is aborted because its deadline elapsed.
pub const TIMED_OUT_MESSAGE: &str = "Request timed out. Check your connection and try again.";

/// Message for an edit that names no field to change.
pub const EMPTY_UPDATE_MESSAGE: &str =
    "Provide at least one field to update (calories, protein, or name)";

/// Failure category, independent of the message attached to it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    Authentication,
    Validation,
    NotFound,
    Network,
    Api,
}

/// Error types shared by the client, the tools and the server.
///
/// Every message that reaches a user is phrased without blame; layers above
/// the transport may swap the message but never the variant.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error("{0}")]
    Authentication(String),

    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Network(String),

    #[error("{0}")]
    Api(String),
}

impl Error {
    pub fn authentication() -> Self {
        Self::Authentication(AUTHENTICATION_MESSAGE.into())
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub fn not_found() -> Self {
        Self::NotFound(NOT_FOUND_MESSAGE.into())
    }

    pub fn network() -> Self {
        Self::Network(NETWORK_MESSAGE.into())
    }

    pub fn timed_out() -> Self {
        Self::Network(TIMED_OUT_MESSAGE.into())
    }

    pub fn api() -> Self {
        Self::Api(API_MESSAGE.into())
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Authentication(_) => ErrorKind::Authentication,
            Self::Validation(_) => ErrorKind::Validation,
            Self::NotFound(_) => ErrorKind::NotFound,
            Self::Network(_) => ErrorKind::Network,
            Self::Api(_) => ErrorKind::Api,
        }
    }

    /// HTTP status associated with the category. Network failures never
    /// produced a response, so they have none.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::Authentication(_) => Some(401),
            Self::Validation(_) => Some(400),
            Self::NotFound(_) => Some(404),
            Self::Network(_) => None,
            Self::Api(_) => Some(500),
        }
    }

    pub fn message(&self) -> &str {
        match self {
            Self::Authentication(m)
            | Self::Validation(m)
            | Self::NotFound(m)
            | Self::Network(m)
            | Self::Api(m) => m,
        }
    }

    /// Same category, different wording.
    pub fn with_message(self, message: impl Into<String>) -> Self {
        let message = message.into();
        match self {
            Self::Authentication(_) => Self::Authentication(message),
            Self::Validation(_) => Self::Validation(message),
            Self::NotFound(_) => Self::NotFound(message),
            Self::Network(_) => Self::Network(message),
            Self::Api(_) => Self::Api(message),
        }
    }
}
