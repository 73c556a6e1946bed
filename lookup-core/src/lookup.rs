//! The lookup controller: turns a search term or a coordinate pair into the
//! two backend requests and writes the outcome into the session.

use tracing::debug;

use crate::backend::{BackendClient, BackendError};
use crate::forecast::reduce_to_daily;
use crate::location::{LocationOutcome, LocationProvider};
use crate::model::{Coordinates, CurrentConditions, ForecastEntry, QueryOutcome};
use crate::session::Session;

/// User-facing failure messages, fixed per entry point. Underlying causes
/// stay in the debug log.
pub const CITY_LOOKUP_FAILED: &str = "City not found or server error.";
pub const COORDINATE_LOOKUP_FAILED: &str = "Unable to fetch location weather.";
pub const GEOLOCATION_UNSUPPORTED: &str = "Geolocation not supported.";
pub const LOCATION_PERMISSION_DENIED: &str = "Location permission denied.";

#[derive(Debug)]
pub struct WeatherLookup {
    backend: BackendClient,
    session: Session,
    location: Box<dyn LocationProvider>,
}

impl WeatherLookup {
    pub fn new(
        backend: BackendClient,
        session: Session,
        location: Box<dyn LocationProvider>,
    ) -> Self {
        Self { backend, session, location }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Each entry point below computes its terminal outcome in one `match`
    /// and makes exactly one `settle` call, so Pending cannot leak past any
    /// exit path.
    pub async fn query_by_city(&mut self, term: &str) {
        let term = term.trim();
        if term.is_empty() {
            return;
        }

        let ticket = self.session.begin();
        let (outcome, succeeded) = match self.city_bundle(term).await {
            Ok((conditions, daily)) => (QueryOutcome::Success { conditions, daily }, true),
            Err(err) => {
                debug!(city = term, %err, "city lookup failed");
                (QueryOutcome::failure(CITY_LOOKUP_FAILED), false)
            }
        };

        if self.session.settle(ticket, outcome) && succeeded {
            self.session.record_search(term);
        }
    }

    pub async fn query_by_coordinates(&mut self, coords: Coordinates) {
        let ticket = self.session.begin();
        let outcome = self.coordinate_outcome(coords).await;
        self.session.settle(ticket, outcome);
    }

    /// An unsupported capability surfaces immediately, without entering
    /// Pending; denial is only knowable after the asynchronous round trip and
    /// therefore settles a begun query.
    pub async fn query_by_location(&mut self) {
        if !self.location.is_supported() {
            self.session.reject(GEOLOCATION_UNSUPPORTED);
            return;
        }

        let ticket = self.session.begin();
        let outcome = match self.location.current_coordinates().await {
            LocationOutcome::Available(coords) => self.coordinate_outcome(coords).await,
            LocationOutcome::Denied => QueryOutcome::failure(LOCATION_PERMISSION_DENIED),
            LocationOutcome::Unsupported => QueryOutcome::failure(GEOLOCATION_UNSUPPORTED),
        };
        self.session.settle(ticket, outcome);
    }

    async fn coordinate_outcome(&self, coords: Coordinates) -> QueryOutcome {
        match self.coordinate_bundle(coords).await {
            Ok((conditions, daily)) => QueryOutcome::Success { conditions, daily },
            Err(err) => {
                debug!(
                    lat = coords.latitude,
                    lon = coords.longitude,
                    %err,
                    "coordinate lookup failed"
                );
                QueryOutcome::failure(COORDINATE_LOOKUP_FAILED)
            }
        }
    }

    /// A join, not a race: both requests must succeed, either failure fails
    /// the query.
    async fn city_bundle(
        &self,
        city: &str,
    ) -> Result<(CurrentConditions, Vec<ForecastEntry>), BackendError> {
        let (conditions, feed) = tokio::try_join!(
            self.backend.current_by_city(city),
            self.backend.forecast_by_city(city),
        )?;

        Ok((conditions, reduce_to_daily(&feed)))
    }

    /// Both requests use the coordinate endpoints. Resolving the forecast
    /// through the coordinate-derived place name could silently target a
    /// different, same-named place.
    async fn coordinate_bundle(
        &self,
        coords: Coordinates,
    ) -> Result<(CurrentConditions, Vec<ForecastEntry>), BackendError> {
        let (conditions, feed) = tokio::try_join!(
            self.backend.current_by_coordinates(coords),
            self.backend.forecast_by_coordinates(coords),
        )?;

        Ok((conditions, reduce_to_daily(&feed)))
    }
}
