//! Core library for the weather lookup client.
//!
//! This crate defines:
//! - Configuration handling
//! - The HTTP client for the weather proxy backend
//! - Reduction of the raw forecast feed to a daily view
//! - Session state: query outcome plus persisted recent searches
//! - The location provider abstraction
//!
//! It is used by `lookup-cli`, but can also be reused by other binaries or services.

pub mod backend;
pub mod config;
pub mod forecast;
pub mod history;
pub mod location;
pub mod lookup;
pub mod model;
pub mod session;

pub use backend::{BackendClient, BackendError};
pub use config::{Config, HomeLocation};
pub use forecast::reduce_to_daily;
pub use history::{FileStore, HistoryStore, MemoryStore};
pub use location::{ConfiguredLocation, LocationOutcome, LocationProvider, NoLocation};
pub use lookup::WeatherLookup;
pub use model::{Coordinates, CurrentConditions, ForecastEntry, QueryOutcome};
pub use session::Session;
