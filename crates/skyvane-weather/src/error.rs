//! Weather lookup error types.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum WeatherError {
    /// Non-2xx response or transport failure. Unknown cities, bad API keys
    /// and unreachable hosts all land here.
    #[error("Weather data not found for {city}")]
    NotFound {
        city: String,
        status: Option<u16>,
        #[source]
        source: Option<reqwest::Error>,
    },

    #[error("Malformed weather response: {0}")]
    MalformedResponse(String),

    #[error("Failed to build HTTP client: {0}")]
    HttpClient(#[source] reqwest::Error),
}

impl WeatherError {
    /// User-friendly error message for UI display.
    pub fn user_message(&self) -> String {
        match self {
            Self::NotFound { city, .. } => {
                format!("Could not load weather for {}. Check the city name and try again.", city)
            }
            Self::MalformedResponse(_) => {
                "Received an unexpected response from the weather service.".to_string()
            }
            Self::HttpClient(_) => "Weather service could not be started.".to_string(),
        }
    }

    /// City the failed lookup was for, when known.
    pub fn city(&self) -> Option<&str> {
        match self {
            Self::NotFound { city, .. } => Some(city),
            _ => None,
        }
    }
}
