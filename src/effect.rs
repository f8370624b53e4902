//! Effects - side effects declared by the reducer

use crate::action::Action;
use crate::api::WeatherClient;

/// Side effects that can be triggered by actions
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// GET the weather for `city`; the answer comes back tagged with `request_id`
    FetchWeather { request_id: u64, city: String },
}

/// Run one fetch and turn its outcome into the result action
pub async fn fetch_weather(client: &WeatherClient, request_id: u64, city: String) -> Action {
    tracing::debug!(request_id, %city, url = %client.weather_url(&city), "fetching weather");

    match client.fetch_weather(&city).await {
        Ok(weather) => {
            tracing::info!(request_id, %city, temp = weather.temp, "weather loaded");
            Action::WeatherDidLoad {
                request_id,
                weather,
            }
        }
        Err(error) => {
            tracing::warn!(request_id, %city, %error, "weather fetch failed");
            Action::WeatherDidError { request_id, error }
        }
    }
}
