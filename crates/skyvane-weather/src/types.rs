use serde::{Deserialize, Serialize};

pub const DEFAULT_BASE_URL: &str = "https://api.openweathermap.org/data/2.5/weather";
pub const API_KEY_PLACEHOLDER: &str = "YOUR_API_KEY_HERE";

/// Unit system requested from the weather API
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Units {
    #[default]
    Metric,
    Imperial,
}

impl Units {
    /// Query-string value understood by the API
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Metric => "metric",
            Self::Imperial => "imperial",
        }
    }

    /// Temperature unit the API reports in for this system
    pub fn temperature_unit(&self) -> TemperatureUnit {
        match self {
            Self::Metric => TemperatureUnit::Celsius,
            Self::Imperial => TemperatureUnit::Fahrenheit,
        }
    }
}

impl std::str::FromStr for Units {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "metric" => Ok(Self::Metric),
            "imperial" => Ok(Self::Imperial),
            other => Err(format!("unknown unit system: {}", other)),
        }
    }
}

/// Temperature unit used for display
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum TemperatureUnit {
    #[default]
    Celsius,
    Fahrenheit,
}

impl TemperatureUnit {
    pub fn symbol(&self) -> &'static str {
        match self {
            Self::Celsius => "°C",
            Self::Fahrenheit => "°F",
        }
    }

    pub fn other(&self) -> Self {
        match self {
            Self::Celsius => Self::Fahrenheit,
            Self::Fahrenheit => Self::Celsius,
        }
    }
}

/// Round half up (towards positive infinity), so -2.5 becomes -2.
pub fn round_half_up(value: f64) -> i64 {
    (value + 0.5).floor() as i64
}

pub fn celsius_to_fahrenheit(celsius: f64) -> f64 {
    celsius * 9.0 / 5.0 + 32.0
}

pub fn fahrenheit_to_celsius(fahrenheit: f64) -> f64 {
    (fahrenheit - 32.0) * 5.0 / 9.0
}

/// Connection settings for the weather endpoint. Immutable once a client holds them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherSettings {
    /// API key sent as `appid`
    pub api_key: String,

    /// Full endpoint URL, e.g. `https://api.openweathermap.org/data/2.5/weather`
    pub base_url: String,

    /// Unit system sent as `units`
    #[serde(default)]
    pub units: Units,
}

impl WeatherSettings {
    /// Check if the API key is set to something other than the placeholder
    pub fn has_api_key(&self) -> bool {
        !self.api_key.trim().is_empty() && self.api_key != API_KEY_PLACEHOLDER
    }
}

impl Default for WeatherSettings {
    fn default() -> Self {
        Self {
            api_key: API_KEY_PLACEHOLDER.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            units: Units::Metric,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
struct SysInfo {
    country: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
struct MainReadings {
    temp: f64,
    feels_like: f64,
    humidity: f64,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
struct Condition {
    description: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
struct Wind {
    speed: f64,
}

/// Required fields of a current-weather payload
#[derive(Debug, Clone, PartialEq, Deserialize)]
struct Report {
    name: String,
    sys: SysInfo,
    main: MainReadings,
    weather: Vec<Condition>,
    wind: Wind,
}

/// Current weather payload as returned by the API and stored in the cache.
///
/// The parsed JSON is kept verbatim; typed accessors cover the fields the
/// app displays. Serializing yields the original object unchanged.
#[derive(Debug, Clone, PartialEq)]
pub struct WeatherData {
    raw: serde_json::Value,
    report: Report,
}

impl WeatherData {
    /// Validate `raw` against the expected shape and wrap it.
    pub fn from_value(raw: serde_json::Value) -> Result<Self, serde_json::Error> {
        let report = Report::deserialize(&raw)?;
        Ok(Self { raw, report })
    }

    /// The payload exactly as received
    pub fn raw(&self) -> &serde_json::Value {
        &self.raw
    }

    pub fn into_raw(self) -> serde_json::Value {
        self.raw
    }

    pub fn name(&self) -> &str {
        &self.report.name
    }

    pub fn country(&self) -> &str {
        &self.report.sys.country
    }

    pub fn temperature(&self) -> f64 {
        self.report.main.temp
    }

    pub fn feels_like(&self) -> f64 {
        self.report.main.feels_like
    }

    pub fn humidity(&self) -> f64 {
        self.report.main.humidity
    }

    pub fn wind_speed(&self) -> f64 {
        self.report.wind.speed
    }

    /// Whether the payload lists at least one weather condition
    pub fn has_conditions(&self) -> bool {
        !self.report.weather.is_empty()
    }

    /// Description of the primary condition (`weather[0]`)
    pub fn description(&self) -> &str {
        self.report
            .weather
            .first()
            .map(|c| c.description.as_str())
            .unwrap_or_default()
    }

    /// "Paris, FR"
    pub fn location_label(&self) -> String {
        format!("{}, {}", self.name(), self.country())
    }
}

impl Serialize for WeatherData {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.raw.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for WeatherData {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = serde_json::Value::deserialize(deserializer)?;
        Self::from_value(raw).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn paris() -> serde_json::Value {
        serde_json::json!({
            "name": "Paris",
            "sys": {"country": "FR", "sunrise": 1700000000},
            "main": {"temp": 18.4, "feels_like": 17.9, "humidity": 60, "pressure": 1012},
            "weather": [{"id": 800, "main": "Clear", "description": "clear sky", "icon": "01d"}],
            "wind": {"speed": 3.1, "deg": 200},
            "visibility": 10000
        })
    }

    #[test]
    fn test_weather_data_ignores_extra_fields() {
        let data: WeatherData = serde_json::from_value(paris()).unwrap();
        assert_eq!(data.name(), "Paris");
        assert_eq!(data.country(), "FR");
        assert_eq!(data.humidity(), 60.0);
        assert_eq!(data.description(), "clear sky");
        assert_eq!(data.wind_speed(), 3.1);
    }

    #[test]
    fn test_weather_data_keeps_payload_verbatim() {
        let data: WeatherData = serde_json::from_value(paris()).unwrap();
        assert_eq!(data.raw(), &paris());
        // Integer humidity stays an integer
        assert_eq!(serde_json::to_value(&data).unwrap(), paris());
        assert_eq!(data.into_raw()["visibility"], 10000);
    }

    #[test]
    fn test_weather_data_missing_field_fails() {
        let mut value = paris();
        value["main"].as_object_mut().unwrap().remove("feels_like");
        assert!(serde_json::from_value::<WeatherData>(value).is_err());
    }

    #[test]
    fn test_location_label() {
        let data: WeatherData = serde_json::from_value(paris()).unwrap();
        assert_eq!(data.location_label(), "Paris, FR");
    }

    #[test]
    fn test_units_serde_lowercase() {
        assert_eq!(serde_json::to_string(&Units::Imperial).unwrap(), "\"imperial\"");
        let u: Units = serde_json::from_str("\"metric\"").unwrap();
        assert_eq!(u, Units::Metric);
    }

    #[test]
    fn test_units_from_str() {
        assert_eq!("Imperial".parse::<Units>(), Ok(Units::Imperial));
        assert!("kelvin".parse::<Units>().is_err());
    }

    #[test]
    fn test_units_temperature_unit() {
        assert_eq!(Units::Metric.temperature_unit(), TemperatureUnit::Celsius);
        assert_eq!(Units::Imperial.temperature_unit(), TemperatureUnit::Fahrenheit);
    }

    #[test]
    fn test_round_half_up() {
        assert_eq!(round_half_up(18.4), 18);
        assert_eq!(round_half_up(17.5), 18);
        assert_eq!(round_half_up(-2.5), -2);
        assert_eq!(round_half_up(-2.6), -3);
    }

    #[test]
    fn test_temperature_conversion() {
        assert_eq!(celsius_to_fahrenheit(100.0), 212.0);
        assert_eq!(celsius_to_fahrenheit(-40.0), -40.0);
        assert_eq!(fahrenheit_to_celsius(32.0), 0.0);
        assert_eq!(round_half_up(celsius_to_fahrenheit(18.0)), 64);
    }

    #[test]
    fn test_settings_api_key_placeholder() {
        let mut settings = WeatherSettings::default();
        assert!(!settings.has_api_key());
        settings.api_key = "k".into();
        assert!(settings.has_api_key());
    }
}
