pub mod favorites;
pub mod weather_view;

pub use favorites::{display_name, Favorites};
pub use weather_view::WeatherView;
