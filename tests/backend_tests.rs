//! End-to-end tests against a stub backend
//!
//! The store runs the real reducer; every declared effect is executed with
//! the real HTTP client against a wiremock server, and the resulting action
//! is fed back into the store before rendering.

use std::time::Duration;

use pretty_assertions::assert_eq;
use serde_json::json;
use tui_dispatch::testing::*;
use tui_dispatch::EffectStore;
use weather_search::{
    action::Action,
    api::WeatherClient,
    components::{Component, SearchScreen, SearchScreenProps},
    effect::{Effect, fetch_weather},
    error::FetchError,
    reducer::reducer,
    state::{AppState, WeatherResult},
};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Run the declared effects the way the app runtime does
async fn run_effects(client: &WeatherClient, effects: Vec<Effect>) -> Vec<Action> {
    let mut actions = Vec::new();
    for effect in effects {
        let Effect::FetchWeather { request_id, city } = effect;
        actions.push(fetch_weather(client, request_id, city).await);
    }
    actions
}

/// Type the city, submit, and resolve the request
macro_rules! search {
    ($store:expr, $client:expr, $city:expr) => {{
        $store.dispatch(Action::FormCityChange($city.to_string()));
        let result = $store.dispatch(Action::FormSubmit);
        for action in run_effects(&$client, result.effects).await {
            $store.dispatch(action);
        }
    }};
}

fn render(state: &AppState) -> String {
    let mut render = RenderHarness::new(60, 16);
    let mut screen = SearchScreen::new();
    render.render_to_string_plain(|frame| {
        let props = SearchScreenProps {
            state,
            is_focused: true,
        };
        screen.render(frame, frame.area(), props);
    })
}

/// Base URL nothing listens on
fn unreachable_base_url() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);
    format!("http://127.0.0.1:{}", port)
}

#[tokio::test]
async fn test_success_round_trip() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/weather/London"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"temp": 25, "description": "clear sky"})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let client = WeatherClient::new(server.uri());
    let mut store = EffectStore::new(AppState::default(), reducer);
    search!(store, client, "London");

    let output = render(store.state());
    assert!(output.contains("Weather in London"), "output:\n{}", output);
    assert!(output.contains("Temperature: 25°C"), "output:\n{}", output);
    assert!(output.contains("Description: clear sky"), "output:\n{}", output);
    assert!(!output.contains("City not found"), "output:\n{}", output);
}

#[tokio::test]
async fn test_not_found() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/weather/InvalidCity"))
        .respond_with(ResponseTemplate::new(404))
        .expect(1)
        .mount(&server)
        .await;

    let client = WeatherClient::new(server.uri());
    let mut store = EffectStore::new(AppState::default(), reducer);
    search!(store, client, "InvalidCity");

    assert_eq!(store.state().error_message(), Some("City not found"));
    assert_eq!(store.state().weather_result(), None);
    assert_eq!(store.state().failure, Some(FetchError::NotFound { status: 404 }));

    let output = render(store.state());
    assert!(output.contains("City not found"), "output:\n{}", output);
    assert!(!output.contains("Weather in"), "output:\n{}", output);
}

#[tokio::test]
async fn test_network_failure_shows_same_message() {
    let client = WeatherClient::new(unreachable_base_url());
    let mut store = EffectStore::new(AppState::default(), reducer);
    search!(store, client, "London");

    assert_eq!(store.state().error_message(), Some("City not found"));
    assert!(matches!(store.state().failure, Some(FetchError::Transport(_))));

    let output = render(store.state());
    assert!(output.contains("City not found"), "output:\n{}", output);
}

#[tokio::test]
async fn test_server_error_and_malformed_body_collapse() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/weather/Boom"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/weather/Garbled"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/weather/Partial"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"temp": 3})))
        .mount(&server)
        .await;

    let client = WeatherClient::new(server.uri());
    let mut store = EffectStore::new(AppState::default(), reducer);

    search!(store, client, "Boom");
    assert_eq!(store.state().failure, Some(FetchError::Server { status: 500 }));
    assert_eq!(store.state().error_message(), Some("City not found"));

    search!(store, client, "Garbled");
    assert!(matches!(store.state().failure, Some(FetchError::MalformedBody(_))));
    assert_eq!(store.state().error_message(), Some("City not found"));

    search!(store, client, "Partial");
    assert!(matches!(store.state().failure, Some(FetchError::MalformedBody(_))));
    assert_eq!(store.state().weather_result(), None);
}

#[tokio::test]
async fn test_error_and_result_replace_each_other() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/weather/InvalidCity"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/weather/Paris"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"temp": 18.5, "description": "overcast"})),
        )
        .mount(&server)
        .await;

    let client = WeatherClient::new(server.uri());
    let mut store = EffectStore::new(AppState::default(), reducer);

    search!(store, client, "InvalidCity");
    let output = render(store.state());
    assert!(output.contains("City not found"));
    assert!(!output.contains("Weather in"));

    search!(store, client, "Paris");
    let output = render(store.state());
    assert!(output.contains("Weather in Paris"), "output:\n{}", output);
    assert!(output.contains("Temperature: 18.5°C"), "output:\n{}", output);
    assert!(!output.contains("City not found"), "output:\n{}", output);

    search!(store, client, "InvalidCity");
    let output = render(store.state());
    assert!(output.contains("City not found"));
    assert!(!output.contains("Weather in"));
}

#[tokio::test]
async fn test_empty_city_sends_no_request() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let client = WeatherClient::new(server.uri());
    let mut store = EffectStore::new(AppState::default(), reducer);

    let before = store.state().clone();
    let result = store.dispatch(Action::FormSubmit);
    assert!(result.effects.is_empty());
    assert!(run_effects(&client, result.effects).await.is_empty());

    assert_eq!(store.state().latest_request, before.latest_request);
    assert!(store.state().weather.is_empty());
}

#[tokio::test]
async fn test_city_is_percent_encoded() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/weather/New%20York"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"temp": 30, "description": "humid"})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let client = WeatherClient::new(server.uri());
    let mut store = EffectStore::new(AppState::default(), reducer);
    search!(store, client, "New York");

    assert_eq!(
        store.state().weather_result(),
        Some(&WeatherResult {
            temp: 30.0,
            description: "humid".into(),
        })
    );
    assert!(render(store.state()).contains("Weather in New York"));
}

#[tokio::test]
async fn test_timeout_is_a_failure() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/weather/Slowtown"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"temp": 1, "description": "late"}))
                .set_delay(Duration::from_secs(5)),
        )
        .mount(&server)
        .await;

    let client = WeatherClient::with_timeout(server.uri(), Duration::from_millis(200)).unwrap();
    let result = client.fetch_weather("Slowtown").await;

    assert!(matches!(result, Err(FetchError::Transport(_))), "{:?}", result);
}

#[tokio::test]
async fn test_stale_response_is_discarded() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/weather/London"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"temp": 25, "description": "clear sky"})),
        )
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/weather/InvalidCity"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let client = WeatherClient::new(server.uri());
    let mut store = EffectStore::new(AppState::default(), reducer);

    // Two submissions in flight; the older one resolves last
    store.dispatch(Action::FormCityChange("London".into()));
    let first = store.dispatch(Action::FormSubmit).effects;
    store.dispatch(Action::FormCityChange("InvalidCity".into()));
    let second = store.dispatch(Action::FormSubmit).effects;

    for action in run_effects(&client, second).await {
        store.dispatch(action);
    }
    for action in run_effects(&client, first).await {
        store.dispatch(action);
    }

    assert_eq!(store.state().error_message(), Some("City not found"));
    assert_eq!(store.state().weather_result(), None);
}

#[tokio::test]
async fn test_dot_segment_city_never_leaves_weather_path() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let client = WeatherClient::new(server.uri());
    let mut store = EffectStore::new(AppState::default(), reducer);

    search!(store, client, "..");
    assert_eq!(store.state().failure, Some(FetchError::UnroutableCity("..".into())));
    assert_eq!(store.state().error_message(), Some("City not found"));

    search!(store, client, ".");
    assert_eq!(store.state().failure, Some(FetchError::UnroutableCity(".".into())));
    assert!(render(store.state()).contains("City not found"));
}
