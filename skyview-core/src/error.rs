//! Error types shared by the client, the store and the view controller.

use thiserror::Error;

/// Failure talking to the weather backend.
#[derive(Error, Debug)]
pub enum ClientError {
    #[error("Invalid backend URL: {0}")]
    InvalidUrl(String),

    #[error("Request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Backend responded with status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Failed to decode backend response: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Failure reading or writing the local key-value store.
#[derive(Error, Debug)]
pub enum PersistenceError {
    #[error("Invalid store key '{0}'")]
    InvalidKey(String),

    #[error("Store I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to encode stored value: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Errors surfaced to the user by [`crate::view::WeatherView`].
#[derive(Error, Debug)]
pub enum ViewError {
    #[error("City name is empty")]
    Validation,

    #[error("Weather lookup failed: {0}")]
    Network(#[from] ClientError),

    #[error("Failed to save favorites: {0}")]
    Persistence(#[from] PersistenceError),
}

impl ViewError {
    /// Alert text shown to the user.
    pub fn user_message(&self) -> String {
        match self {
            Self::Validation => "Please enter a city name.".to_string(),
            Self::Network(_) => "Error fetching weather data.".to_string(),
            Self::Persistence(_) => "Could not save favorite cities.".to_string(),
        }
    }
}
