use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// A latitude/longitude pair supplied by a location provider.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentConditions {
    pub place: String,
    pub country: String,
    pub temperature_c: f64,
    pub humidity_pct: u8,
    pub wind_speed_mps: f64,
    pub description: String,
    pub icon: String,
}

/// One sample from the raw forecast feed, typically eight per calendar day.
///
/// The daily view produced by [`crate::forecast::reduce_to_daily`] is a
/// subsequence of these, at most one per day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastEntry {
    pub at: NaiveDateTime,
    pub temperature_c: f64,
    pub description: String,
}

/// The session's single query outcome. Pending, a Success payload, and a
/// Failure message are mutually exclusive by construction.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum QueryOutcome {
    #[default]
    Idle,
    Pending,
    Success {
        conditions: CurrentConditions,
        daily: Vec<ForecastEntry>,
    },
    Failure(String),
}

impl QueryOutcome {
    pub fn failure(message: impl Into<String>) -> Self {
        QueryOutcome::Failure(message.into())
    }

    pub fn is_success(&self) -> bool {
        matches!(self, QueryOutcome::Success { .. })
    }

    pub fn is_pending(&self) -> bool {
        matches!(self, QueryOutcome::Pending)
    }
}
