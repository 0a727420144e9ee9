//! Application layer for Skyvane: the app controller, favorites persistence
//! and render targets.

pub mod app;
pub mod error_mapping;
pub mod models;
pub mod render;
pub mod services;

pub use app::{WeatherApp, EMPTY_CITY_MESSAGE};
pub use models::{Favorites, WeatherView};
pub use render::{RenderTarget, TerminalRenderer};
pub use services::{FavoritesError, FavoritesStore, JsonFileStore, MemoryStore};
