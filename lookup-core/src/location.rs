use async_trait::async_trait;
use std::fmt::Debug;

use crate::config::HomeLocation;
use crate::model::Coordinates;

/// Result of a single-shot coordinate acquisition.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LocationOutcome {
    Available(Coordinates),
    Denied,
    Unsupported,
}

/// Source of device coordinates.
///
/// `is_supported` resolves synchronously, before any acquisition is
/// attempted; denial is only knowable after the asynchronous round trip.
#[async_trait]
pub trait LocationProvider: Send + Sync + Debug {
    fn is_supported(&self) -> bool;

    async fn current_coordinates(&self) -> LocationOutcome;
}

/// Coordinates pinned in the config file, standing in for a device
/// geolocation capability.
#[derive(Debug, Clone, Copy)]
pub struct ConfiguredLocation {
    home: Option<HomeLocation>,
}

impl ConfiguredLocation {
    pub fn new(home: Option<HomeLocation>) -> Self {
        Self { home }
    }
}

#[async_trait]
impl LocationProvider for ConfiguredLocation {
    fn is_supported(&self) -> bool {
        self.home.is_some()
    }

    async fn current_coordinates(&self) -> LocationOutcome {
        match self.home {
            Some(home) => LocationOutcome::Available(Coordinates {
                latitude: home.latitude,
                longitude: home.longitude,
            }),
            None => LocationOutcome::Unsupported,
        }
    }
}

/// Provider for runtimes without any location capability.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoLocation;

#[async_trait]
impl LocationProvider for NoLocation {
    fn is_supported(&self) -> bool {
        false
    }

    async fn current_coordinates(&self) -> LocationOutcome {
        LocationOutcome::Unsupported
    }
}
