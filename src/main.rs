//! Weather Search - terminal search form

use std::cell::RefCell;
use std::io;
use std::rc::Rc;

use clap::Parser;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Frame, Terminal, backend::CrosstermBackend, layout::Rect};
use tui_dispatch::{
    EffectContext, EffectStoreLike, EffectStoreWithMiddleware, EventBus, EventContext, EventKind,
    EventRoutingState, HandlerResponse, Keybindings, RenderContext,
};
use tui_dispatch_debug::debug::DebugLayer;
use tui_dispatch_debug::{DebugRunOutput, DebugSession, DebugSessionError, ReplayItem};
use weather_search::action::Action;
use weather_search::api::WeatherClient;
use weather_search::components::{Component, SearchScreen, SearchScreenProps};
use weather_search::config::Args;
use weather_search::effect::{self, Effect};
use weather_search::logging;
use weather_search::reducer::reducer;
use weather_search::state::AppState;

#[derive(tui_dispatch::ComponentId, Clone, Copy, PartialEq, Eq, Hash, Debug)]
enum SearchComponentId {
    Form,
}

#[derive(tui_dispatch::BindingContext, Clone, Copy, PartialEq, Eq, Hash)]
enum SearchContext {
    Main,
}

impl EventRoutingState<SearchComponentId, SearchContext> for AppState {
    fn focused(&self) -> Option<SearchComponentId> {
        Some(SearchComponentId::Form)
    }

    fn modal(&self) -> Option<SearchComponentId> {
        None
    }

    fn binding_context(&self, _id: SearchComponentId) -> SearchContext {
        SearchContext::Main
    }

    fn default_context(&self) -> SearchContext {
        SearchContext::Main
    }
}

#[tokio::main]
async fn main() -> io::Result<()> {
    let args = Args::parse();
    logging::init_tracing();

    let client = args
        .client()
        .map_err(|e| io::Error::other(format!("could not build HTTP client: {e}")))?;
    tracing::info!(base_url = client.base_url(), "starting weather search");

    let initial = args.initial_state();
    let debug = DebugSession::new(args.debug);

    // Export JSON schemas if requested
    debug.save_state_schema::<AppState>().map_err(debug_error)?;
    debug.save_actions_schema::<Action>().map_err(debug_error)?;

    let state = debug
        .load_state_or_else_async(move || async move { Ok::<AppState, io::Error>(initial) })
        .await
        .map_err(debug_error)?;

    let replay_actions = debug.load_replay_items().map_err(debug_error)?;

    let (middleware, action_recorder) = debug.middleware_with_recorder();
    let store = EffectStoreWithMiddleware::new(state, reducer, middleware);

    // ===== Terminal setup =====
    let use_alt_screen = debug.use_alt_screen();
    let mut stdout = io::stdout();
    if use_alt_screen {
        enable_raw_mode()?;
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    }
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, &debug, store, client, replay_actions).await;

    // ===== Cleanup =====
    if use_alt_screen {
        disable_raw_mode()?;
        execute!(
            terminal.backend_mut(),
            LeaveAlternateScreen,
            DisableMouseCapture
        )?;
        terminal.show_cursor()?;
    }

    let run_output = result?;
    run_output.write_render_output()?;
    debug
        .save_actions(action_recorder.as_ref())
        .map_err(debug_error)?;

    Ok(())
}

struct SearchUi {
    screen: SearchScreen,
}

impl SearchUi {
    fn new() -> Self {
        Self {
            screen: SearchScreen::new(),
        }
    }

    fn render(
        &mut self,
        frame: &mut Frame,
        area: Rect,
        state: &AppState,
        render_ctx: RenderContext,
        event_ctx: &mut EventContext<SearchComponentId>,
    ) {
        event_ctx.set_component_area(SearchComponentId::Form, area);

        let props = SearchScreenProps {
            state,
            is_focused: render_ctx.is_focused(),
        };
        self.screen.render(frame, area, props);
    }

    fn handle_event(&mut self, event: &EventKind, state: &AppState) -> HandlerResponse<Action> {
        let props = SearchScreenProps {
            state,
            is_focused: true,
        };
        let actions: Vec<_> = self.screen.handle_event(event, props).into_iter().collect();
        if actions.is_empty() {
            HandlerResponse::ignored()
        } else {
            HandlerResponse {
                actions,
                consumed: true,
                needs_render: false,
            }
        }
    }
}

fn debug_error(error: DebugSessionError) -> io::Error {
    io::Error::other(format!("debug session error: {error}"))
}

async fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    debug: &DebugSession,
    store: impl EffectStoreLike<AppState, Action, Effect>,
    client: WeatherClient,
    replay_actions: Vec<ReplayItem<Action>>,
) -> io::Result<DebugRunOutput<AppState>> {
    let ui = Rc::new(RefCell::new(SearchUi::new()));
    let mut bus: EventBus<AppState, Action, SearchComponentId, SearchContext> = EventBus::new();
    let keybindings: Keybindings<SearchContext> = Keybindings::new();

    let ui_form = Rc::clone(&ui);
    bus.register(SearchComponentId::Form, move |event, state| {
        ui_form.borrow_mut().handle_event(&event.kind, state)
    });

    // Re-render on terminal resize (no action needed, just redraw)
    bus.register_global(|event, _state| match event.kind {
        EventKind::Resize(_, _) => HandlerResponse::ignored().with_render(),
        _ => HandlerResponse::ignored(),
    });

    debug
        .run_effect_app_with_bus(
            terminal,
            store,
            DebugLayer::simple(),
            replay_actions,
            None,
            Some(Action::Quit),
            |_runtime| {},
            &mut bus,
            &keybindings,
            |frame, area, state, render_ctx, event_ctx| {
                ui.borrow_mut()
                    .render(frame, area, state, render_ctx, event_ctx);
            },
            |action| matches!(action, Action::Quit),
            move |effect, ctx| handle_effect(effect, ctx, client.clone()),
        )
        .await
}

/// Handle effects by spawning tasks
fn handle_effect(effect: Effect, ctx: &mut EffectContext<Action>, client: WeatherClient) {
    match effect {
        Effect::FetchWeather { request_id, city } => {
            // Same key: a newer submission aborts the request still in flight
            ctx.tasks().spawn("weather", async move {
                effect::fetch_weather(&client, request_id, city).await
            });
        }
    }
}
