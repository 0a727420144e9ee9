//! Time-bounded in-memory cache for current-weather lookups.
//!
//! Entries expire after a fixed duration and are evicted lazily by the
//! lookup that finds them stale. Time comes from an injected [`Clock`].

use std::collections::HashMap;
use std::fmt;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use crate::types::WeatherData;

/// Default lifetime of a cached entry (10 minutes).
pub const DEFAULT_CACHE_DURATION: Duration = Duration::from_secs(10 * 60);

const KEY_PREFIX: &str = "current_";

/// Source of "now" in milliseconds since the Unix epoch.
pub trait Clock: Send + Sync {
    fn now_millis(&self) -> i64;
}

/// Wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_millis(&self) -> i64 {
        chrono::Utc::now().timestamp_millis()
    }
}

/// Manually driven clock. Clones share the same time.
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    millis: Arc<AtomicI64>,
}

impl ManualClock {
    pub fn new(start_millis: i64) -> Self {
        Self {
            millis: Arc::new(AtomicI64::new(start_millis)),
        }
    }

    pub fn set(&self, millis: i64) {
        self.millis.store(millis, Ordering::SeqCst);
    }

    pub fn advance(&self, by: Duration) {
        self.millis.fetch_add(duration_millis(by), Ordering::SeqCst);
    }
}

impl Clock for ManualClock {
    fn now_millis(&self) -> i64 {
        self.millis.load(Ordering::SeqCst)
    }
}

fn duration_millis(d: Duration) -> i64 {
    i64::try_from(d.as_millis()).unwrap_or(i64::MAX)
}

/// Cache key derived from a city name. Lowercases only; whitespace is kept.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey(String);

impl CacheKey {
    pub fn for_city(city: &str) -> Self {
        Self(format!("{}{}", KEY_PREFIX, city.to_lowercase()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone)]
struct CacheEntry {
    data: WeatherData,
    inserted_at: i64,
}

/// Weather lookups keyed by normalized city.
pub struct WeatherCache {
    entries: HashMap<CacheKey, CacheEntry>,
    clock: Arc<dyn Clock>,
    cache_duration_ms: i64,
}

impl fmt::Debug for WeatherCache {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WeatherCache")
            .field("entries", &self.entries.len())
            .field("cache_duration_ms", &self.cache_duration_ms)
            .finish()
    }
}

impl WeatherCache {
    /// Create an empty cache with the default 10 minute lifetime.
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self::with_duration(clock, DEFAULT_CACHE_DURATION)
    }

    /// Create an empty cache with a custom entry lifetime.
    pub fn with_duration(clock: Arc<dyn Clock>, cache_duration: Duration) -> Self {
        Self {
            entries: HashMap::new(),
            clock,
            cache_duration_ms: duration_millis(cache_duration),
        }
    }

    /// Look up a fresh entry. A stale entry is removed and `None` returned.
    pub fn get(&mut self, key: &CacheKey) -> Option<WeatherData> {
        let now = self.clock.now_millis();
        let entry = self.entries.get(key)?;

        if now.saturating_sub(entry.inserted_at) < self.cache_duration_ms {
            return Some(entry.data.clone());
        }

        tracing::debug!("Evicting stale cache entry: {}", key);
        self.entries.remove(key);
        None
    }

    /// Insert or overwrite the entry for `key`, stamped with the current time.
    pub fn set(&mut self, key: CacheKey, data: WeatherData) {
        let inserted_at = self.clock.now_millis();
        self.entries.insert(key, CacheEntry { data, inserted_at });
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Number of stored entries, including stale ones not yet observed.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn cache_duration(&self) -> Duration {
        Duration::from_millis(u64::try_from(self.cache_duration_ms).unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const T0: i64 = 1_700_000_000_000;

    fn sample(name: &str) -> WeatherData {
        WeatherData::from_value(serde_json::json!({
            "name": name,
            "sys": {"country": "GB"},
            "main": {"temp": 11.2, "feels_like": 9.8, "humidity": 81},
            "weather": [{"description": "light rain"}],
            "wind": {"speed": 5.4}
        }))
        .unwrap()
    }

    fn cache_at(start: i64) -> (WeatherCache, ManualClock) {
        let clock = ManualClock::new(start);
        (WeatherCache::new(Arc::new(clock.clone())), clock)
    }

    #[test]
    fn test_hit_within_window() {
        let (mut cache, clock) = cache_at(T0);
        let key = CacheKey::for_city("london");
        cache.set(key.clone(), sample("London"));

        clock.advance(Duration::from_millis(599_999));
        assert_eq!(cache.get(&key), Some(sample("London")));
    }

    #[test]
    fn test_expiry_at_boundary() {
        let (mut cache, clock) = cache_at(T0);
        let key = CacheKey::for_city("london");
        cache.set(key.clone(), sample("London"));

        clock.set(T0 + 600_000);
        assert_eq!(cache.get(&key), None);
        assert!(cache.is_empty());
        // Absence is idempotent
        assert_eq!(cache.get(&key), None);
    }

    #[test]
    fn test_stale_entry_kept_until_observed() {
        let (mut cache, clock) = cache_at(T0);
        cache.set(CacheKey::for_city("london"), sample("London"));
        cache.set(CacheKey::for_city("paris"), sample("Paris"));

        clock.advance(Duration::from_secs(3600));
        assert_eq!(cache.len(), 2);

        assert_eq!(cache.get(&CacheKey::for_city("london")), None);
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_set_overwrites_and_restamps() {
        let (mut cache, clock) = cache_at(T0);
        let key = CacheKey::for_city("london");
        cache.set(key.clone(), sample("Old"));

        clock.advance(Duration::from_secs(500));
        cache.set(key.clone(), sample("New"));

        clock.advance(Duration::from_secs(500));
        assert_eq!(cache.get(&key).map(|d| d.name().to_string()), Some("New".to_string()));
    }

    #[test]
    fn test_key_normalization_lowercases_only() {
        assert_eq!(CacheKey::for_city("LONDON"), CacheKey::for_city("london"));
        assert_ne!(CacheKey::for_city(" London"), CacheKey::for_city("london"));
        assert_eq!(CacheKey::for_city("London").as_str(), "current_london");
    }

    #[test]
    fn test_lookup_is_case_insensitive() {
        let (mut cache, _clock) = cache_at(T0);
        cache.set(CacheKey::for_city("london"), sample("London"));

        assert!(cache.get(&CacheKey::for_city("LONDON")).is_some());
        assert!(cache.get(&CacheKey::for_city(" London")).is_none());
    }

    #[test]
    fn test_clear() {
        let (mut cache, _clock) = cache_at(T0);
        cache.set(CacheKey::for_city("a"), sample("A"));
        cache.set(CacheKey::for_city("b"), sample("B"));
        cache.clear();
        assert!(cache.is_empty());
        assert_eq!(cache.get(&CacheKey::for_city("a")), None);
    }

    #[test]
    fn test_custom_duration() {
        let clock = ManualClock::new(T0);
        let mut cache =
            WeatherCache::with_duration(Arc::new(clock.clone()), Duration::from_secs(1));
        assert_eq!(cache.cache_duration(), Duration::from_secs(1));

        let key = CacheKey::for_city("x");
        cache.set(key.clone(), sample("X"));
        clock.advance(Duration::from_millis(1000));
        assert_eq!(cache.get(&key), None);
    }

    #[test]
    fn test_default_duration_is_ten_minutes() {
        let (cache, _clock) = cache_at(T0);
        assert_eq!(cache.cache_duration(), Duration::from_millis(600_000));
    }
}
