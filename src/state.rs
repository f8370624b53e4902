//! Application state - single source of truth

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tui_dispatch::DataResource;

use crate::error::FetchError;

/// Success body of `GET /api/weather/{city}`
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct WeatherResult {
    /// Temperature in degrees Celsius
    pub temp: f64,
    pub description: String,
}

impl WeatherResult {
    pub fn temperature_line(&self) -> String {
        format!("Temperature: {}°C", self.temp)
    }

    pub fn description_line(&self) -> String {
        format!("Description: {}", self.description)
    }
}

/// Application state - everything the form needs to render
#[derive(Clone, Debug, tui_dispatch::DebugState, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct AppState {
    /// Current contents of the city input
    #[debug(section = "Form", label = "City", debug_fmt)]
    pub city: String,

    /// Result/error region: Empty → Loading → Loaded/Failed.
    /// `Loaded` and `Failed` are mutually exclusive, which keeps the
    /// result and the error message from ever showing together.
    #[debug(section = "Weather", label = "Data", debug_fmt)]
    pub weather: DataResource<WeatherResult>,

    /// Id of the most recently dispatched fetch (0 = none yet)
    #[debug(section = "Request", label = "Latest")]
    pub latest_request: u64,

    /// Classified cause of the last failure, never shown in the panel
    #[debug(section = "Request", label = "Failure", debug_fmt)]
    pub failure: Option<FetchError>,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            city: String::new(),
            weather: DataResource::Empty,
            latest_request: 0,
            failure: None,
        }
    }
}

impl AppState {
    /// State with the input pre-filled
    pub fn with_city(city: impl Into<String>) -> Self {
        Self {
            city: city.into(),
            ..Default::default()
        }
    }

    /// Result heading; follows the input, not the city that was fetched
    pub fn heading(&self) -> String {
        format!("Weather in {}", self.city)
    }

    /// The successful result, if the last fetch succeeded
    pub fn weather_result(&self) -> Option<&WeatherResult> {
        self.weather.data()
    }

    /// The user-facing error, if the last fetch failed
    pub fn error_message(&self) -> Option<&str> {
        self.weather.error()
    }

    pub fn is_fetching(&self) -> bool {
        self.weather.is_loading()
    }
}
