use ratatui::{
    layout::{Constraint, Layout},
    prelude::{Frame, Rect},
    style::{Modifier, Style},
    text::Line,
    widgets::Paragraph,
};
use tui_dispatch::EventKind;
use tui_dispatch_components::{
    StatusBar, StatusBarHint, StatusBarProps, StatusBarSection, StatusBarStyle,
};

use super::{Component, SearchForm, SearchFormProps, WeatherPanel, WeatherPanelProps};
use crate::action::Action;
use crate::state::AppState;

pub const HEADING: &str = "Weather Search";

/// Props for SearchScreen - read-only view of state
pub struct SearchScreenProps<'a> {
    pub state: &'a AppState,
    pub is_focused: bool,
}

/// The whole search page: heading, form, result region and key hints
pub struct SearchScreen {
    form: SearchForm,
    status_bar: StatusBar,
}

impl Default for SearchScreen {
    fn default() -> Self {
        Self {
            form: SearchForm::new(),
            status_bar: StatusBar::new(),
        }
    }
}

impl SearchScreen {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn form(&self) -> &SearchForm {
        &self.form
    }
}

fn submit_form(_: String) -> Action {
    Action::FormSubmit
}

fn form_props(state: &AppState, is_focused: bool) -> SearchFormProps<'_> {
    SearchFormProps {
        city: &state.city,
        is_focused,
        on_change: Action::FormCityChange,
        on_submit: submit_form,
    }
}

impl Component<Action> for SearchScreen {
    type Props<'a> = SearchScreenProps<'a>;

    fn handle_event(
        &mut self,
        event: &EventKind,
        props: Self::Props<'_>,
    ) -> impl IntoIterator<Item = Action> {
        self.form
            .handle_event(event, form_props(props.state, props.is_focused))
            .into_iter()
            .collect::<Vec<_>>()
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let chunks = Layout::vertical([
            Constraint::Length(1), // Heading
            Constraint::Length(1), // Spacer
            Constraint::Length(3), // Form
            Constraint::Length(1), // Spacer
            Constraint::Min(1),    // Result / error
            Constraint::Length(1), // Help bar
        ])
        .split(area);

        let heading = Line::styled(HEADING, Style::default().add_modifier(Modifier::BOLD));
        frame.render_widget(Paragraph::new(heading), chunks[0]);

        self.form.render(
            frame,
            chunks[2],
            form_props(props.state, props.is_focused),
        );

        let mut panel = WeatherPanel;
        panel.render(
            frame,
            chunks[4],
            WeatherPanelProps {
                heading: props.state.heading(),
                weather: &props.state.weather,
            },
        );

        <StatusBar as Component<Action>>::render(
            &mut self.status_bar,
            frame,
            chunks[5],
            StatusBarProps {
                left: StatusBarSection::empty(),
                center: StatusBarSection::hints(&[
                    StatusBarHint::new("enter", "submit"),
                    StatusBarHint::new("tab", "focus"),
                    StatusBarHint::new("esc", "quit"),
                ]),
                right: StatusBarSection::empty(),
                style: StatusBarStyle::default(),
                is_focused: false,
            },
        );
    }
}
