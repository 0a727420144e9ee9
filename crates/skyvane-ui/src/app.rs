//! App controller: turns user actions into weather lookups, favorites
//! changes and render calls.

use skyvane_core::AppError;
use skyvane_weather::{TemperatureUnit, WeatherClient};

use crate::models::favorites::Favorites;
use crate::models::weather_view::WeatherView;
use crate::render::RenderTarget;
use crate::services::favorites_store::FavoritesStore;

pub const EMPTY_CITY_MESSAGE: &str = "Please enter a city name";

pub struct WeatherApp<R: RenderTarget, S: FavoritesStore> {
    client: WeatherClient,
    renderer: R,
    store: S,
    favorites: Favorites,
    native_unit: TemperatureUnit,
    unit: TemperatureUnit,
    city_input: String,
    current: Option<WeatherView>,
}

impl<R: RenderTarget, S: FavoritesStore> WeatherApp<R, S> {
    /// Create the app, load favorites from `store` and render them.
    ///
    /// A store that cannot be read is logged, reported through the
    /// renderer, and treated as empty.
    pub fn new(client: WeatherClient, mut renderer: R, store: S) -> Self {
        let favorites = match store.load() {
            Ok(list) => Favorites::from_stored(list),
            Err(e) => {
                let err = AppError::from(e);
                tracing::warn!("Ignoring unreadable favorites: {}", err);
                renderer.alert(&err.user_message());
                Favorites::new()
            }
        };
        let native_unit = client.settings().units.temperature_unit();

        let mut app = Self {
            client,
            renderer,
            store,
            favorites,
            native_unit,
            unit: native_unit,
            city_input: String::new(),
            current: None,
        };
        app.display_favorites();
        app
    }

    /// Look up `input` (trimmed) and render the result or an error.
    ///
    /// Returns the error for callers that need an exit status; it has
    /// already been rendered.
    pub async fn search(&mut self, input: &str) -> Result<(), AppError> {
        self.city_input = input.to_string();
        self.search_current().await
    }

    async fn search_current(&mut self) -> Result<(), AppError> {
        let city = self.city_input.trim().to_string();
        if city.is_empty() {
            self.renderer.alert(EMPTY_CITY_MESSAGE);
            return Ok(());
        }

        self.renderer.show_loading();

        match self.client.get_current_weather(&city).await {
            Ok(data) => {
                let view = WeatherView::from_data(&data, self.native_unit);
                self.unit = self.native_unit;
                self.renderer.hide_loading();
                self.renderer.show_weather(&view);
                self.renderer.hide_error();
                self.current = Some(view);
                Ok(())
            }
            Err(e) => {
                let err = AppError::from(e);
                tracing::warn!("Weather lookup failed for {}: {}", city, err);
                self.current = None;
                self.renderer.hide_loading();
                self.renderer.show_error(&err.user_message());
                Err(err)
            }
        }
    }

    /// Switch the displayed temperature unit.
    ///
    /// From the API's native unit the shown values are converted locally.
    /// Switching back re-runs the last search so exact values come back
    /// (from cache while fresh).
    pub async fn toggle_unit(&mut self) -> Result<(), AppError> {
        if self.unit == self.native_unit {
            let target = self.native_unit.other();
            if let Some(view) = self.current.as_ref().map(|v| v.converted_to(target)) {
                self.renderer.show_weather(&view);
                self.current = Some(view);
            }
            self.unit = target;
            return Ok(());
        }

        let result = if self.city_input.trim().is_empty() {
            Ok(())
        } else {
            self.search_current().await
        };
        self.unit = self.native_unit;
        result
    }

    /// Add `city` to favorites, persisting and re-rendering if it was new.
    pub fn add_favorite(&mut self, city: &str) -> Result<bool, AppError> {
        if !self.favorites.add(city) {
            return Ok(false);
        }
        self.save_favorites()?;
        self.display_favorites();
        Ok(true)
    }

    /// Remove `city` from favorites, then persist and re-render.
    pub fn remove_favorite(&mut self, city: &str) -> Result<bool, AppError> {
        let removed = self.favorites.remove(city);
        self.save_favorites()?;
        self.display_favorites();
        Ok(removed)
    }

    /// Show weather for a favorite and make sure it stays in the list.
    /// The city is added even when the lookup fails.
    pub async fn view_favorite(&mut self, city: &str) -> Result<(), AppError> {
        let lookup = self.search(city).await;
        self.add_favorite(city)?;
        lookup
    }

    pub fn display_favorites(&mut self) {
        self.renderer.show_favorites(self.favorites.as_slice());
    }

    pub fn clear_cache(&self) {
        self.client.clear_cache();
    }

    fn save_favorites(&self) -> Result<(), AppError> {
        self.store.save(self.favorites.as_slice())?;
        Ok(())
    }

    pub fn favorites(&self) -> &[String] {
        self.favorites.as_slice()
    }

    pub fn current(&self) -> Option<&WeatherView> {
        self.current.as_ref()
    }

    pub fn unit(&self) -> TemperatureUnit {
        self.unit
    }

    pub fn city_input(&self) -> &str {
        &self.city_input
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn renderer_mut(&mut self) -> &mut R {
        &mut self.renderer
    }
}
