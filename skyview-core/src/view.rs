//! The weather view controller.
//!
//! [`WeatherView`] owns every piece of client-side state: the input text, the
//! most recent reading, the server history log and the favorites set. The
//! network and the local store are injected, so tests run against fakes.

use tracing::{info, instrument, warn};

use crate::{
    client::WeatherClient,
    display::{self, ReadingDisplay},
    error::ViewError,
    favorites::Favorites,
    model::{HistoryEntry, WeatherReading},
    persistence::PersistenceAdapter,
};

#[derive(Debug)]
pub struct WeatherView<C, P> {
    client: C,
    store: P,
    input: String,
    reading: Option<WeatherReading>,
    history: Vec<HistoryEntry>,
    favorites: Favorites,
    busy: bool,
}

impl<C: WeatherClient, P: PersistenceAdapter> WeatherView<C, P> {
    /// Load stored favorites and pull the history log once.
    ///
    /// Neither step can fail: bad stored data means no favorites, and a failed
    /// history fetch means an empty history.
    pub async fn init(client: C, store: P) -> Self {
        let favorites = Favorites::load(&store);

        let mut view = Self {
            client,
            store,
            input: String::new(),
            reading: None,
            history: Vec::new(),
            favorites,
            busy: false,
        };

        view.refresh_history().await;
        view
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn reading(&self) -> Option<&WeatherReading> {
        self.reading.as_ref()
    }

    pub fn history(&self) -> &[HistoryEntry] {
        &self.history
    }

    pub fn favorites(&self) -> &Favorites {
        &self.favorites
    }

    pub fn is_busy(&self) -> bool {
        self.busy
    }

    pub fn client(&self) -> &C {
        &self.client
    }

    pub fn into_parts(self) -> (C, P) {
        (self.client, self.store)
    }

    /// Card for the current reading, if any.
    pub fn display(&self) -> Option<ReadingDisplay> {
        self.reading.as_ref().map(ReadingDisplay::from)
    }

    pub fn background(&self) -> &'static str {
        display::page_background(self.reading.as_ref())
    }

    /// Update the input text, upper-casing its first character.
    pub fn set_input(&mut self, raw: &str) {
        self.input = capitalize_first(raw);
    }

    /// Look up weather for `raw_city`.
    ///
    /// On success the reading is replaced and the history log refreshed once.
    /// On failure the previous reading is kept.
    #[instrument(skip(self))]
    pub async fn submit_lookup(&mut self, raw_city: &str) -> Result<WeatherReading, ViewError> {
        self.set_input(raw_city);

        let city = capitalize_first(raw_city.trim());
        if !is_valid_city(&city) {
            return Err(ViewError::Validation);
        }

        self.busy = true;
        let result = self.client.lookup(&city).await;
        self.busy = false;

        let reading = match result {
            Ok(reading) => reading,
            Err(e) => {
                warn!(%city, error = %e, "weather lookup failed");
                return Err(e.into());
            }
        };

        info!(city = %reading.city, description = %reading.description, "weather updated");
        self.reading = Some(reading.clone());

        self.refresh_history().await;

        Ok(reading)
    }

    /// Replace the history log with the server's current one.
    ///
    /// Best-effort: on failure the previous log stays and `false` is returned.
    pub async fn refresh_history(&mut self) -> bool {
        match self.client.fetch_history().await {
            Ok(history) => {
                info!(entries = history.len(), "history refreshed");
                self.history = history;
                true
            }
            Err(e) => {
                warn!(error = %e, "history refresh failed, keeping previous entries");
                false
            }
        }
    }

    /// Add the current reading's city to favorites and persist.
    ///
    /// Returns `Ok(false)` when there is no reading or the city is already a
    /// favorite. If the write fails the in-memory set is left unchanged.
    pub fn add_favorite(&mut self) -> Result<bool, ViewError> {
        let Some(city) = self.reading.as_ref().map(|r| r.city.clone()) else {
            return Ok(false);
        };

        let mut updated = self.favorites.clone();
        if !updated.insert(&city) {
            return Ok(false);
        }

        self.commit_favorites(updated)?;
        info!(%city, "favorite added");
        Ok(true)
    }

    /// Remove every occurrence of `city` from favorites and persist.
    ///
    /// Returns `Ok(false)` without touching the store when `city` is absent.
    pub fn remove_favorite(&mut self, city: &str) -> Result<bool, ViewError> {
        let mut updated = self.favorites.clone();
        if !updated.remove(city) {
            return Ok(false);
        }

        self.commit_favorites(updated)?;
        info!(%city, "favorite removed");
        Ok(true)
    }

    fn commit_favorites(&mut self, updated: Favorites) -> Result<(), ViewError> {
        if let Err(e) = updated.save(&mut self.store) {
            warn!(error = %e, "failed to persist favorites");
            return Err(e.into());
        }
        self.favorites = updated;
        Ok(())
    }
}

/// Empty names and bare dot segments cannot be looked up.
fn is_valid_city(city: &str) -> bool {
    !matches!(city, "" | "." | "..")
}

fn capitalize_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
