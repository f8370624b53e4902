pub mod search_form;
pub mod search_screen;
pub mod weather_panel;

// Re-export core Component trait
pub use tui_dispatch::Component;

pub use search_form::{FormFocus, SearchForm, SearchFormProps};
pub use search_screen::{SearchScreen, SearchScreenProps};
pub use weather_panel::{WeatherPanel, WeatherPanelProps};
