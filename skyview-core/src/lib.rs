//! Core library for the `skyview` weather client.
//!
//! This crate defines:
//! - The weather view controller and the state it owns
//! - The backend client abstraction and its HTTP implementation
//! - Local persistence for favorite cities
//! - Pure display mapping (images, temperature treatment)
//! - Configuration handling
//!
//! It is used by `skyview-cli`, but can also drive other front-ends.

pub mod client;
pub mod config;
pub mod display;
pub mod error;
pub mod favorites;
pub mod model;
pub mod persistence;
pub mod view;

pub use client::{HttpWeatherClient, WeatherClient};
pub use config::Config;
pub use display::{ReadingDisplay, TemperatureTone};
pub use error::{ClientError, PersistenceError, ViewError};
pub use favorites::Favorites;
pub use model::{HistoryEntry, WeatherReading};
pub use persistence::{FileStore, MemoryStore, PersistenceAdapter};
pub use view::WeatherView;
