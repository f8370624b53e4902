//! Actions - every input the search form reacts to

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::FetchError;
use crate::state::WeatherResult;

#[derive(tui_dispatch::Action, Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
#[action(infer_categories)]
pub enum Action {
    // ===== Form category =====
    /// City input text changed
    FormCityChange(String),

    /// Submit the form (fetches weather for the current city)
    FormSubmit,

    // ===== Weather category =====
    /// Result: the backend answered with a weather result
    WeatherDidLoad {
        request_id: u64,
        weather: WeatherResult,
    },

    /// Result: the fetch failed for any reason
    WeatherDidError { request_id: u64, error: FetchError },

    // ===== Uncategorized (global) =====
    /// Force a re-render (cursor and focus movement)
    Render,

    /// Exit the application
    Quit,
}
