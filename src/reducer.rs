//! Reducer - pure function: (state, action) -> DispatchResult

use tui_dispatch::{DataResource, DispatchResult};

use crate::action::Action;
use crate::effect::Effect;
use crate::state::AppState;

/// The reducer handles all state transitions
pub fn reducer(state: &mut AppState, action: Action) -> DispatchResult<Effect> {
    match action {
        // ===== Form actions =====
        Action::FormCityChange(city) => {
            if state.city == city {
                return DispatchResult::unchanged();
            }
            state.city = city;
            DispatchResult::changed()
        }

        Action::FormSubmit => {
            // Required field: an empty input never reaches the backend
            if state.city.is_empty() {
                return DispatchResult::unchanged();
            }

            state.latest_request = state.latest_request.wrapping_add(1);
            state.weather = DataResource::Loading;
            state.failure = None;
            DispatchResult::changed_with(Effect::FetchWeather {
                request_id: state.latest_request,
                city: state.city.clone(),
            })
        }

        // ===== Weather actions =====
        Action::WeatherDidLoad {
            request_id,
            weather,
        } => {
            if request_id != state.latest_request {
                tracing::debug!(
                    request_id,
                    latest = state.latest_request,
                    "dropping stale weather result"
                );
                return DispatchResult::unchanged();
            }
            state.weather = DataResource::Loaded(weather);
            state.failure = None;
            DispatchResult::changed()
        }

        Action::WeatherDidError { request_id, error } => {
            if request_id != state.latest_request {
                tracing::debug!(
                    request_id,
                    latest = state.latest_request,
                    "dropping stale weather error"
                );
                return DispatchResult::unchanged();
            }
            state.weather = DataResource::Failed(error.user_message().to_string());
            state.failure = Some(error);
            DispatchResult::changed()
        }

        // ===== Global actions =====
        Action::Render => DispatchResult::changed(),

        Action::Quit => DispatchResult::unchanged(),
    }
}
