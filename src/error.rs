//! Fetch failure taxonomy

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// The one message shown for every kind of fetch failure
pub const GENERIC_ERROR: &str = "City not found";

/// Why a weather fetch failed.
///
/// Variants are kept apart for logs and the debug overlay only. The UI
/// shows [`GENERIC_ERROR`] for all of them.
#[derive(thiserror::Error, Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
pub enum FetchError {
    #[error("backend returned client error {status}")]
    NotFound { status: u16 },
    #[error("backend returned status {status}")]
    Server { status: u16 },
    #[error("request failed: {0}")]
    Transport(String),
    #[error("malformed response body: {0}")]
    MalformedBody(String),
    #[error("city {0:?} is a dot path segment")]
    UnroutableCity(String),
}

impl FetchError {
    /// Classify a non-2xx status code
    pub fn from_status(status: u16) -> Self {
        if (400..500).contains(&status) {
            FetchError::NotFound { status }
        } else {
            FetchError::Server { status }
        }
    }

    pub fn user_message(&self) -> &'static str {
        GENERIC_ERROR
    }
}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        if let Some(status) = err.status() {
            return FetchError::from_status(status.as_u16());
        }
        FetchError::Transport(err.to_string())
    }
}
