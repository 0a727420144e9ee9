//! Weather lookups for Skyvane
//!
//! Fetches current weather by city name from an OpenWeatherMap-compatible
//! endpoint, memoizing results in a time-bounded in-memory cache.

pub mod cache;
pub mod client;
pub mod error;
pub mod types;

pub use cache::{CacheKey, Clock, ManualClock, SystemClock, WeatherCache, DEFAULT_CACHE_DURATION};
pub use client::WeatherClient;
pub use error::WeatherError;
pub use types::*;
