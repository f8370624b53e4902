use crossterm::event::{KeyCode, KeyEventKind, KeyModifiers};
use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::Line,
    widgets::{Block, Borders, Paragraph},
};
use tui_dispatch::EventKind;
use tui_dispatch_components::{BaseStyle, Padding, TextInput, TextInputProps, TextInputStyle};

use super::Component;
use crate::action::Action;

pub const PLACEHOLDER: &str = "Enter city";
pub const SUBMIT_LABEL: &str = "Get Weather";

const ACCENT: Color = Color::Cyan;
const DIM: Color = Color::DarkGray;
const BUTTON_WIDTH: u16 = SUBMIT_LABEL.len() as u16 + 6;

/// Which control of the form has keyboard focus
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum FormFocus {
    #[default]
    Input,
    Button,
}

impl FormFocus {
    pub fn toggle(self) -> Self {
        match self {
            FormFocus::Input => FormFocus::Button,
            FormFocus::Button => FormFocus::Input,
        }
    }
}

/// City input plus the "Get Weather" submit control
pub struct SearchForm {
    input: TextInput,
    focus: FormFocus,
}

impl Default for SearchForm {
    fn default() -> Self {
        Self {
            input: TextInput::new(),
            focus: FormFocus::default(),
        }
    }
}

pub struct SearchFormProps<'a> {
    pub city: &'a str,
    pub is_focused: bool,
    pub on_change: fn(String) -> Action,
    pub on_submit: fn(String) -> Action,
}

impl SearchForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn focus(&self) -> FormFocus {
        self.focus
    }

    fn input_props<'a>(
        &self,
        props: &SearchFormProps<'a>,
        is_focused: bool,
    ) -> TextInputProps<'a, Action> {
        TextInputProps {
            value: props.city,
            placeholder: PLACEHOLDER,
            is_focused,
            style: TextInputStyle {
                base: BaseStyle {
                    border: None,
                    padding: Padding::xy(1, 0),
                    bg: None,
                    fg: None,
                },
                placeholder_style: Some(Style::default().fg(DIM)),
                cursor_style: None,
            },
            on_change: props.on_change,
            on_submit: props.on_submit,
            on_cursor_move: Some(|_| Action::Render),
        }
    }
}

fn border_style(focused: bool) -> Style {
    if focused {
        Style::default().fg(ACCENT)
    } else {
        Style::default().fg(DIM)
    }
}

impl Component<Action> for SearchForm {
    type Props<'a> = SearchFormProps<'a>;

    fn handle_event(
        &mut self,
        event: &EventKind,
        props: Self::Props<'_>,
    ) -> impl IntoIterator<Item = Action> {
        if !props.is_focused {
            return Vec::new();
        }

        let EventKind::Key(key) = event else {
            return Vec::new();
        };
        if key.kind == KeyEventKind::Release {
            return Vec::new();
        }

        match key.code {
            KeyCode::Esc => return vec![Action::Quit],
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                return vec![Action::Quit];
            }
            KeyCode::Tab | KeyCode::BackTab => {
                self.focus = self.focus.toggle();
                return vec![Action::Render];
            }
            _ => {}
        }

        match self.focus {
            FormFocus::Button => match key.code {
                KeyCode::Enter | KeyCode::Char(' ') => {
                    vec![(props.on_submit)(props.city.to_string())]
                }
                _ => Vec::new(),
            },
            FormFocus::Input => {
                let input_props = self.input_props(&props, true);
                self.input
                    .handle_event(event, input_props)
                    .into_iter()
                    .collect()
            }
        }
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let [input_area, button_area] =
            Layout::horizontal([Constraint::Min(10), Constraint::Length(BUTTON_WIDTH)])
                .spacing(1)
                .areas(area);

        let input_focused = props.is_focused && self.focus == FormFocus::Input;
        let input_block = Block::default()
            .borders(Borders::ALL)
            .border_style(border_style(input_focused));
        let input_inner = input_block.inner(input_area);
        frame.render_widget(input_block, input_area);

        let input_props = self.input_props(&props, input_focused);
        self.input.render(frame, input_inner, input_props);

        let button_focused = props.is_focused && self.focus == FormFocus::Button;
        let label_style = if button_focused {
            Style::default()
                .fg(Color::Black)
                .bg(ACCENT)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().add_modifier(Modifier::BOLD)
        };
        let button = Paragraph::new(Line::styled(SUBMIT_LABEL, label_style).centered()).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(border_style(button_focused)),
        );
        frame.render_widget(button, button_area);
    }
}
