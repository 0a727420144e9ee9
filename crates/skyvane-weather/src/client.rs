//! Current-weather client backed by [`WeatherCache`].

use std::sync::Arc;

use parking_lot::Mutex;
use reqwest::Client;
use tracing::{instrument, Instrument};

use crate::cache::{CacheKey, Clock, SystemClock, WeatherCache};
use crate::error::WeatherError;
use crate::types::{WeatherData, WeatherSettings};

const USER_AGENT: &str = concat!("Skyvane/", env!("CARGO_PKG_VERSION"));

pub struct WeatherClient {
    http: Client,
    settings: Arc<WeatherSettings>,
    cache: Arc<Mutex<WeatherCache>>,
}

impl std::fmt::Debug for WeatherClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WeatherClient")
            .field("base_url", &self.settings.base_url)
            .field("units", &self.settings.units)
            .field("cache", &*self.cache.lock())
            .finish()
    }
}

impl WeatherClient {
    /// Create a client using the wall clock for cache expiry.
    pub fn new(settings: WeatherSettings) -> Result<Self, WeatherError> {
        Self::with_clock(settings, Arc::new(SystemClock))
    }

    /// Create a client whose cache reads time from `clock`.
    pub fn with_clock(
        settings: WeatherSettings,
        clock: Arc<dyn Clock>,
    ) -> Result<Self, WeatherError> {
        let http = Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .map_err(WeatherError::HttpClient)?;

        Ok(Self::with_cache(settings, http, WeatherCache::new(clock)))
    }

    /// Assemble a client from an existing HTTP client and cache.
    pub fn with_cache(settings: WeatherSettings, http: Client, cache: WeatherCache) -> Self {
        Self {
            http,
            settings: Arc::new(settings),
            cache: Arc::new(Mutex::new(cache)),
        }
    }

    pub fn settings(&self) -> &WeatherSettings {
        &self.settings
    }

    /// Current weather for `city`, served from cache when fresh.
    ///
    /// The city is sent to the API as given; only the cache key is lowercased.
    /// Concurrent misses for the same city each perform their own request.
    ///
    /// A miss runs as a spawned task: dropping the returned future stops the
    /// wait, not the request, and a response that arrives afterwards is still
    /// cached.
    #[instrument(skip(self), level = "info")]
    pub async fn get_current_weather(&self, city: &str) -> Result<WeatherData, WeatherError> {
        let key = CacheKey::for_city(city);

        // Lock scope ends before any await
        let cached = self.cache.lock().get(&key);
        if let Some(data) = cached {
            tracing::debug!("Cache hit for {}", key);
            return Ok(data);
        }

        tracing::debug!("Cache miss for {}, fetching", key);
        let task = tokio::spawn(
            fetch_and_store(
                self.http.clone(),
                Arc::clone(&self.settings),
                Arc::clone(&self.cache),
                city.to_string(),
                key,
            )
            .in_current_span(),
        );

        let result = match task.await {
            Ok(result) => result,
            Err(e) => {
                tracing::error!("Weather fetch task failed: {}", e);
                Err(WeatherError::NotFound {
                    city: city.to_string(),
                    status: None,
                    source: None,
                })
            }
        };

        result.inspect_err(|e| {
            tracing::error!("Error fetching weather: {}", e);
        })
    }

    /// Drop every cached entry.
    pub fn clear_cache(&self) {
        self.cache.lock().clear();
        tracing::info!("Weather cache cleared");
    }

    /// Number of entries currently held, fresh or not.
    pub fn cached_entries(&self) -> usize {
        self.cache.lock().len()
    }
}

async fn fetch_and_store(
    http: Client,
    settings: Arc<WeatherSettings>,
    cache: Arc<Mutex<WeatherCache>>,
    city: String,
    key: CacheKey,
) -> Result<WeatherData, WeatherError> {
    let data = fetch(&http, &settings, &city).await?;
    cache.lock().set(key, data.clone());
    Ok(data)
}

async fn fetch(
    http: &Client,
    settings: &WeatherSettings,
    city: &str,
) -> Result<WeatherData, WeatherError> {
    let not_found = |status: Option<u16>, source: Option<reqwest::Error>| {
        WeatherError::NotFound {
            city: city.to_string(),
            status,
            source,
        }
    };

    let response = http
        .get(&settings.base_url)
        .query(&[
            ("q", city),
            ("units", settings.units.as_str()),
            ("appid", settings.api_key.as_str()),
        ])
        .send()
        .await
        .map_err(|e| not_found(None, Some(e)))?;

    let status = response.status();
    if !status.is_success() {
        tracing::warn!("Weather API returned status {} for {}", status, city);
        return Err(not_found(Some(status.as_u16()), None));
    }

    let body = response
        .text()
        .await
        .map_err(|e| not_found(Some(status.as_u16()), Some(e)))?;

    parse_weather(&body)
}

fn parse_weather(body: &str) -> Result<WeatherData, WeatherError> {
    let data: WeatherData = serde_json::from_str(body)
        .map_err(|e| WeatherError::MalformedResponse(format!("JSON parse error: {}", e)))?;

    if !data.has_conditions() {
        return Err(WeatherError::MalformedResponse(
            "weather conditions array is empty".to_string(),
        ));
    }

    Ok(data)
}
