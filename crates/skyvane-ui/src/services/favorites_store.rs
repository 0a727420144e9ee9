//! Persistent storage for the favorites list.
//! The whole list is serialized as a JSON array and rewritten on every save.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use parking_lot::Mutex;

/// Error type for favorites persistence
#[derive(Debug, thiserror::Error)]
pub enum FavoritesError {
    #[error("Failed to read favorites from {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to write favorites to {path}: {source}")]
    Write {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("Favorites data is not a JSON list of strings: {0}")]
    Corrupt(#[from] serde_json::Error),
}

/// Where the favorites list lives between runs.
pub trait FavoritesStore {
    /// Load the stored list. A store that was never written yields an empty list.
    fn load(&self) -> Result<Vec<String>, FavoritesError>;

    /// Replace the stored list with `favorites`.
    fn save(&self, favorites: &[String]) -> Result<(), FavoritesError>;
}

/// JSON file on disk
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl FavoritesStore for JsonFileStore {
    fn load(&self) -> Result<Vec<String>, FavoritesError> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }

        let json = fs::read_to_string(&self.path).map_err(|source| FavoritesError::Read {
            path: self.path.display().to_string(),
            source,
        })?;

        let favorites: Vec<String> = serde_json::from_str(&json)?;
        tracing::debug!("Loaded {} favorites from {:?}", favorites.len(), self.path);
        Ok(favorites)
    }

    fn save(&self, favorites: &[String]) -> Result<(), FavoritesError> {
        let write_err = |source| FavoritesError::Write {
            path: self.path.display().to_string(),
            source,
        };

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(write_err)?;
        }

        let json = serde_json::to_string(favorites)?;
        fs::write(&self.path, json).map_err(write_err)?;

        tracing::debug!("Saved {} favorites to {:?}", favorites.len(), self.path);
        Ok(())
    }
}

/// In-memory store holding the serialized JSON text. Clones share contents.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    raw: Arc<Mutex<Option<String>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the store with raw JSON text, as if written by an earlier session.
    pub fn with_raw(raw: impl Into<String>) -> Self {
        Self {
            raw: Arc::new(Mutex::new(Some(raw.into()))),
        }
    }

    /// Raw JSON text last saved, if any.
    pub fn raw(&self) -> Option<String> {
        self.raw.lock().clone()
    }
}

impl FavoritesStore for MemoryStore {
    fn load(&self) -> Result<Vec<String>, FavoritesError> {
        match self.raw.lock().as_deref() {
            Some(json) => Ok(serde_json::from_str(json)?),
            None => Ok(Vec::new()),
        }
    }

    fn save(&self, favorites: &[String]) -> Result<(), FavoritesError> {
        let json = serde_json::to_string(favorites)?;
        *self.raw.lock() = Some(json);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn list(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_file_store_missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path().join("favorites.json"));
        assert!(store.load().unwrap().is_empty());
    }

    #[test]
    fn test_file_store_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sub").join("favorites.json");
        let store = JsonFileStore::new(&path);

        store.save(&list(&["paris", "tokyo"])).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), r#"["paris","tokyo"]"#);
        assert_eq!(store.load().unwrap(), list(&["paris", "tokyo"]));

        store.save(&list(&["tokyo"])).unwrap();
        assert_eq!(store.load().unwrap(), list(&["tokyo"]));
    }

    #[test]
    fn test_file_store_corrupt() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("favorites.json");
        fs::write(&path, "{not json").unwrap();

        let store = JsonFileStore::new(&path);
        assert!(matches!(store.load(), Err(FavoritesError::Corrupt(_))));
    }

    #[test]
    fn test_memory_store_shares_contents() {
        let store = MemoryStore::new();
        let other = store.clone();
        assert!(store.load().unwrap().is_empty());

        store.save(&list(&["oslo"])).unwrap();
        assert_eq!(other.raw().as_deref(), Some(r#"["oslo"]"#));
        assert_eq!(other.load().unwrap(), list(&["oslo"]));
    }

    #[test]
    fn test_memory_store_with_raw() {
        let store = MemoryStore::with_raw(r#"["lima","quito"]"#);
        assert_eq!(store.load().unwrap(), list(&["lima", "quito"]));

        let bad = MemoryStore::with_raw("[1, 2]");
        assert!(bad.load().is_err());
    }
}
