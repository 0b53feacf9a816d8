//! Per-operation error wording.

use cleanslate_core::{Error, NOT_FOUND_MESSAGE};

const ALREADY_DELETED_MESSAGE: &str = "That entry wasn't found. It may have already been deleted.";

/// The operation a tool performs, used to word its failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolOperation {
    LogFood,
    GetTodayLog,
    DeleteFoodEntry,
    EditFoodEntry,
    GetTodaySummary,
}

impl ToolOperation {
    fn action(self) -> &'static str {
        match self {
            Self::LogFood => "save entry",
            Self::GetTodayLog => "load today's log",
            Self::DeleteFoodEntry => "delete entry",
            Self::EditFoodEntry => "update entry",
            Self::GetTodaySummary => "load today's summary",
        }
    }

    pub fn retry_message(self) -> String {
        format!("Couldn't {} right now. Try again in a moment.", self.action())
    }

    pub fn network_message(self) -> String {
        format!(
            "Couldn't {} right now. Check your connection and try again.",
            self.action()
        )
    }

    pub fn not_found_message(self) -> String {
        match self {
            Self::DeleteFoodEntry => ALREADY_DELETED_MESSAGE.into(),
            Self::EditFoodEntry => NOT_FOUND_MESSAGE.into(),
            _ => self.retry_message(),
        }
    }

    /// Reword an error from the client for this operation. Authentication
    /// failures keep their text and the kind never changes.
    pub fn remap(self, err: Error) -> Error {
        match err {
            Error::Authentication(_) => err,
            Error::NotFound(_) => err.with_message(self.not_found_message()),
            Error::Network(_) => err.with_message(self.network_message()),
            Error::Validation(_) | Error::Api(_) => err.with_message(self.retry_message()),
        }
    }
}
