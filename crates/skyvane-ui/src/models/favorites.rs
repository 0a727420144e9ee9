/// Ordered list of favorite cities, stored lowercased and without duplicates.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Favorites {
    cities: Vec<String>,
}

impl Favorites {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from a stored list. Entries are normalized and duplicates dropped.
    pub fn from_stored(cities: Vec<String>) -> Self {
        let mut favorites = Self::new();
        for city in cities {
            favorites.add(&city);
        }
        favorites
    }

    /// Append `city` (lowercased). Returns false if it was already present.
    pub fn add(&mut self, city: &str) -> bool {
        let city = city.to_lowercase();
        if self.cities.contains(&city) {
            return false;
        }
        self.cities.push(city);
        true
    }

    /// Remove `city` (compared lowercased). Returns false if it wasn't present.
    pub fn remove(&mut self, city: &str) -> bool {
        let city = city.to_lowercase();
        let before = self.cities.len();
        self.cities.retain(|fav| *fav != city);
        self.cities.len() != before
    }

    pub fn as_slice(&self) -> &[String] {
        &self.cities
    }

    pub fn len(&self) -> usize {
        self.cities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cities.is_empty()
    }
}

/// "new york" -> "New york"
pub fn display_name(city: &str) -> String {
    let mut chars = city.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
