use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Wrap},
};
use tui_dispatch::DataResource;

use super::Component;
use crate::action::Action;
use crate::state::WeatherResult;

/// Result region below the form: the weather result or the error text
pub struct WeatherPanel;

pub struct WeatherPanelProps<'a> {
    /// Heading text, taken from the live input
    pub heading: String,
    pub weather: &'a DataResource<WeatherResult>,
}

fn result_lines(heading: String, weather: &WeatherResult) -> Vec<Line<'static>> {
    vec![
        Line::from(Span::styled(
            heading,
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(weather.temperature_line()),
        Line::from(weather.description_line()),
    ]
}

impl Component<Action> for WeatherPanel {
    type Props<'a> = WeatherPanelProps<'a>;

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        // Empty and Loading draw nothing: there is no pending indicator
        let lines = match props.weather {
            DataResource::Loaded(weather) => result_lines(props.heading, weather),
            DataResource::Failed(message) => vec![Line::from(Span::styled(
                message.clone(),
                Style::default().fg(Color::Red),
            ))],
            _ => return,
        };

        frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }), area);
    }
}
