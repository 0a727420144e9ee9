use skyvane_weather::{
    celsius_to_fahrenheit, fahrenheit_to_celsius, round_half_up, TemperatureUnit, WeatherData,
};

/// What the renderer shows for one lookup
#[derive(Debug, Clone, PartialEq)]
pub struct WeatherView {
    /// "Paris, FR"
    pub location: String,
    pub temperature: i64,
    pub feels_like: i64,
    pub description: String,
    pub humidity: f64,
    pub wind_speed: f64,
    pub unit: TemperatureUnit,
}

impl WeatherView {
    /// Build a view from API data reported in `unit`.
    pub fn from_data(data: &WeatherData, unit: TemperatureUnit) -> Self {
        Self {
            location: data.location_label(),
            temperature: round_half_up(data.temperature()),
            feels_like: round_half_up(data.feels_like()),
            description: data.description().to_string(),
            humidity: data.humidity(),
            wind_speed: data.wind_speed(),
            unit,
        }
    }

    /// Convert the displayed (already rounded) temperatures into `target`.
    pub fn converted_to(&self, target: TemperatureUnit) -> Self {
        if target == self.unit {
            return self.clone();
        }

        let convert = |value: i64| {
            let value = value as f64;
            round_half_up(match target {
                TemperatureUnit::Fahrenheit => celsius_to_fahrenheit(value),
                TemperatureUnit::Celsius => fahrenheit_to_celsius(value),
            })
        };

        Self {
            temperature: convert(self.temperature),
            feels_like: convert(self.feels_like),
            unit: target,
            ..self.clone()
        }
    }
}
