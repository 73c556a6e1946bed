use chrono::NaiveDateTime;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::debug;

use crate::model::{Coordinates, CurrentConditions, ForecastEntry};

/// Timestamp encoding used by the forecast feed's `dt_txt` field.
const FEED_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Errors that can occur when talking to the weather proxy.
#[derive(Debug, Error)]
pub enum BackendError {
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("backend returned status {0}")]
    Status(StatusCode),

    #[error("failed to parse response body: {0}")]
    Parse(#[from] serde_json::Error),
}

/// HTTP client for the weather proxy backend.
///
/// The base URL is injected at construction so tests can point the client at
/// a fake server.
#[derive(Debug, Clone)]
pub struct BackendClient {
    http: Client,
    base_url: String,
}

impl BackendClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { http: Client::new(), base_url }
    }

    pub async fn current_by_city(&self, city: &str) -> Result<CurrentConditions, BackendError> {
        let raw: ApiCurrent =
            self.get_json("/api/weather", &[("city", city.to_string())]).await?;
        Ok(raw.into())
    }

    pub async fn current_by_coordinates(
        &self,
        coords: Coordinates,
    ) -> Result<CurrentConditions, BackendError> {
        let raw: ApiCurrent =
            self.get_json("/api/weather/coordinates", &coord_query(coords)).await?;
        Ok(raw.into())
    }

    pub async fn forecast_by_city(&self, city: &str) -> Result<Vec<ForecastEntry>, BackendError> {
        let raw: ApiForecast =
            self.get_json("/api/weather/forecast", &[("city", city.to_string())]).await?;
        Ok(parse_feed(raw))
    }

    pub async fn forecast_by_coordinates(
        &self,
        coords: Coordinates,
    ) -> Result<Vec<ForecastEntry>, BackendError> {
        let raw: ApiForecast =
            self.get_json("/api/weather/forecast/coordinates", &coord_query(coords)).await?;
        Ok(parse_feed(raw))
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T, BackendError> {
        let url = format!("{}{}", self.base_url, path);

        let res = self.http.get(&url).query(query).send().await?;

        let status = res.status();
        let body = res.text().await?;

        if !status.is_success() {
            debug!(%status, path, "backend request failed");
            return Err(BackendError::Status(status));
        }

        Ok(serde_json::from_str(&body)?)
    }
}

fn coord_query(coords: Coordinates) -> [(&'static str, String); 2] {
    [
        ("lat", coords.latitude.to_string()),
        ("lon", coords.longitude.to_string()),
    ]
}

#[derive(Debug, Deserialize)]
struct ApiSys {
    country: String,
}

#[derive(Debug, Deserialize)]
struct ApiCurrentMain {
    temp: f64,
    humidity: u8,
}

#[derive(Debug, Deserialize)]
struct ApiWind {
    speed: f64,
}

#[derive(Debug, Deserialize)]
struct ApiWeather {
    description: String,
    #[serde(default)]
    icon: String,
}

#[derive(Debug, Deserialize)]
struct ApiCurrent {
    name: String,
    sys: ApiSys,
    main: ApiCurrentMain,
    wind: ApiWind,
    weather: Vec<ApiWeather>,
}

#[derive(Debug, Deserialize)]
struct ApiEntryMain {
    temp: f64,
}

#[derive(Debug, Deserialize)]
struct ApiForecastEntry {
    dt_txt: String,
    main: ApiEntryMain,
    weather: Vec<ApiWeather>,
}

#[derive(Debug, Deserialize)]
struct ApiForecast {
    list: Vec<ApiForecastEntry>,
}

impl From<ApiCurrent> for CurrentConditions {
    fn from(raw: ApiCurrent) -> Self {
        let (description, icon) = raw
            .weather
            .into_iter()
            .next()
            .map(|w| (w.description, w.icon))
            .unwrap_or_else(|| ("Unknown".to_string(), String::new()));

        Self {
            place: raw.name,
            country: raw.sys.country,
            temperature_c: raw.main.temp,
            humidity_pct: raw.main.humidity,
            wind_speed_mps: raw.wind.speed,
            description,
            icon,
        }
    }
}

/// Entries whose timestamp doesn't parse are dropped individually rather than
/// failing the whole feed.
fn parse_feed(raw: ApiForecast) -> Vec<ForecastEntry> {
    raw.list
        .into_iter()
        .filter_map(|entry| {
            let at = match NaiveDateTime::parse_from_str(&entry.dt_txt, FEED_TIME_FORMAT) {
                Ok(at) => at,
                Err(err) => {
                    debug!(dt_txt = %entry.dt_txt, %err, "skipping malformed feed timestamp");
                    return None;
                }
            };

            let description = entry
                .weather
                .into_iter()
                .next()
                .map(|w| w.description)
                .unwrap_or_else(|| "Unknown".to_string());

            Some(ForecastEntry { at, temperature_c: entry.main.temp, description })
        })
        .collect()
}
