//! Command-line and environment configuration

use std::time::Duration;

use clap::Parser;
use tui_dispatch_debug::DebugCliArgs;

use crate::api::{DEFAULT_BASE_URL, WeatherClient};
use crate::error::FetchError;
use crate::state::AppState;

/// Weather Search - look up the current weather for a city
#[derive(Parser, Debug)]
#[command(name = "weather-search")]
#[command(about = "A terminal weather search form")]
pub struct Args {
    /// Backend origin serving /api/weather/{city}
    #[arg(long, env = "WEATHER_SEARCH_BASE_URL", default_value = DEFAULT_BASE_URL)]
    pub base_url: String,

    /// Request timeout in seconds (no timeout when omitted)
    #[arg(
        long,
        env = "WEATHER_SEARCH_TIMEOUT_SECS",
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    pub timeout_secs: Option<u64>,

    /// Pre-fill the city input (does not submit)
    #[arg(long, short)]
    pub city: Option<String>,

    #[command(flatten)]
    pub debug: DebugCliArgs,
}

impl Args {
    /// HTTP client configured from the flags
    pub fn client(&self) -> Result<WeatherClient, FetchError> {
        match self.timeout_secs {
            Some(secs) => WeatherClient::with_timeout(&self.base_url, Duration::from_secs(secs)),
            None => Ok(WeatherClient::new(&self.base_url)),
        }
    }

    pub fn initial_state(&self) -> AppState {
        match &self.city {
            Some(city) => AppState::with_city(city.clone()),
            None => AppState::default(),
        }
    }
}
