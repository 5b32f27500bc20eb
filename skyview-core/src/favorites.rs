//! User-curated favorite cities, kept in insertion order without duplicates.

use tracing::warn;

use crate::{error::PersistenceError, persistence::PersistenceAdapter};

/// Key the favorites list is stored under.
pub const FAVORITES_KEY: &str = "favorites";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Favorites {
    cities: Vec<String>,
}

impl Favorites {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, city: &str) -> bool {
        self.cities.iter().any(|c| c == city)
    }

    /// Append `city` unless already present. Returns whether it was added.
    pub fn insert(&mut self, city: &str) -> bool {
        if self.contains(city) {
            return false;
        }
        self.cities.push(city.to_string());
        true
    }

    /// Remove every occurrence of `city`. Returns whether anything was removed.
    pub fn remove(&mut self, city: &str) -> bool {
        let before = self.cities.len();
        self.cities.retain(|c| c != city);
        self.cities.len() != before
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.cities.iter().map(String::as_str)
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

    /// Load from the store. Absent, unreadable or malformed values yield an
    /// empty set; this never fails.
    pub fn load(store: &dyn PersistenceAdapter) -> Self {
        let raw = match store.load(FAVORITES_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Self::default(),
            Err(e) => {
                warn!(error = %e, "could not read stored favorites, starting empty");
                return Self::default();
            }
        };

        match serde_json::from_str::<Vec<String>>(&raw) {
            // Older writers may have stored duplicates; drop them on the way in.
            Ok(cities) => cities.into_iter().fold(Self::default(), |mut favs, city| {
                favs.insert(&city);
                favs
            }),
            Err(e) => {
                warn!(error = %e, "stored favorites are malformed, starting empty");
                Self::default()
            }
        }
    }

    /// Overwrite the stored value with this set as a JSON array of strings.
    pub fn save(&self, store: &mut dyn PersistenceAdapter) -> Result<(), PersistenceError> {
        let raw = serde_json::to_string(&self.cities)?;
        store.save(FAVORITES_KEY, &raw)
    }
}

impl<S: AsRef<str>> FromIterator<S> for Favorites {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut favs = Self::default();
        for city in iter {
            favs.insert(city.as_ref());
        }
        favs
    }
}
