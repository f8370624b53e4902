//! Weather backend client

use std::time::Duration;

use crate::error::FetchError;
use crate::state::WeatherResult;

/// Backend origin used when nothing overrides it
pub const DEFAULT_BASE_URL: &str = "http://localhost:8080";

/// Client for `GET {base_url}/api/weather/{city}`
#[derive(Clone, Debug)]
pub struct WeatherClient {
    client: reqwest::Client,
    base_url: String,
}

impl Default for WeatherClient {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

impl WeatherClient {
    /// Client without a request timeout (reqwest defaults apply)
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into(),
        }
    }

    /// Client whose requests fail with a transport error after `timeout`
    pub fn with_timeout(
        base_url: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, FetchError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: base_url.into(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Full request URL; the city is percent-encoded as one path segment.
    ///
    /// `.` and `..` survive encoding and would be collapsed by URL
    /// normalization, so [`fetch_weather`](Self::fetch_weather) rejects them.
    pub fn weather_url(&self, city: &str) -> String {
        format!(
            "{}/api/weather/{}",
            self.base_url.trim_end_matches('/'),
            urlencoding::encode(city)
        )
    }

    /// Fetch the current weather for `city`.
    ///
    /// Any non-2xx status, transport failure or body without numeric `temp`
    /// and text `description` is an error.
    pub async fn fetch_weather(&self, city: &str) -> Result<WeatherResult, FetchError> {
        if matches!(city, "." | "..") {
            return Err(FetchError::UnroutableCity(city.to_string()));
        }
        let url = self.weather_url(city);

        let response = self.client.get(&url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::from_status(status.as_u16()));
        }

        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| FetchError::MalformedBody(e.to_string()))
    }
}
