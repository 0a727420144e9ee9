//! Render targets: where the app sends what the user should see.

use std::io::Write;

use crate::models::favorites::display_name;
use crate::models::weather_view::WeatherView;

/// Display surface driven by [`crate::WeatherApp`].
pub trait RenderTarget {
    fn show_loading(&mut self);
    fn hide_loading(&mut self);
    fn show_weather(&mut self, view: &WeatherView);
    fn show_error(&mut self, message: &str);
    fn hide_error(&mut self);
    fn show_favorites(&mut self, favorites: &[String]);
    /// Blocking notice for invalid input
    fn alert(&mut self, message: &str);
}

/// Plain-text renderer writing to any `Write` sink (stdout in the CLI).
pub struct TerminalRenderer<W: Write> {
    out: W,
    show_progress: bool,
}

impl<W: Write> TerminalRenderer<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            show_progress: true,
        }
    }

    /// Suppress the "Loading..." line (one-shot commands)
    pub fn quiet(mut self) -> Self {
        self.show_progress = false;
        self
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn line(&mut self, text: &str) {
        if let Err(e) = writeln!(self.out, "{}", text) {
            tracing::warn!("Failed to write to terminal: {}", e);
        }
    }
}

impl<W: Write> RenderTarget for TerminalRenderer<W> {
    fn show_loading(&mut self) {
        if self.show_progress {
            self.line("Loading...");
        }
    }

    fn hide_loading(&mut self) {
        if let Err(e) = self.out.flush() {
            tracing::warn!("Failed to flush terminal: {}", e);
        }
    }

    fn show_weather(&mut self, view: &WeatherView) {
        let unit = view.unit.symbol();
        self.line(&view.location);
        self.line(&format!("  {}{}  {}", view.temperature, unit, view.description));
        self.line(&format!("  Feels like: {}{}", view.feels_like, unit));
        self.line(&format!("  Humidity:   {}%", view.humidity));
        self.line(&format!("  Wind:       {}", view.wind_speed));
    }

    fn show_error(&mut self, message: &str) {
        self.line(&format!("Error: {}", message));
    }

    fn hide_error(&mut self) {}

    fn show_favorites(&mut self, favorites: &[String]) {
        if favorites.is_empty() {
            self.line("No favorites yet.");
            return;
        }
        self.line("Favorites:");
        for city in favorites {
            self.line(&format!("  - {}", display_name(city)));
        }
    }

    fn alert(&mut self, message: &str) {
        self.line(&format!("! {}", message));
    }
}
