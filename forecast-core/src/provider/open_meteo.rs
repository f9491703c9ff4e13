use async_trait::async_trait;
use chrono::NaiveDate;
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

use crate::{
    error::Error,
    model::{CityQuery, Coordinate, DayForecast, ForecastOptions, ForecastSeries},
};

use super::{ForecastFetcher, LocationResolver};

const GEOCODING_URL: &str = "https://geocoding-api.open-meteo.com/v1/search";
const FORECAST_URL: &str = "https://api.open-meteo.com/v1/forecast";

/// How many geocoding candidates to ask for.
const RESULT_CAP: &str = "10";

/// Client for the two Open-Meteo endpoints (geocoding and daily forecast).
///
/// Both lookups are keyless; a single shared HTTP client is reused across
/// the two sequential requests of an invocation.
#[derive(Debug, Clone)]
pub struct OpenMeteo {
    http: Client,
}

impl OpenMeteo {
    pub fn new() -> Self {
        Self {
            http: Client::new(),
        }
    }
}

impl Default for OpenMeteo {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl LocationResolver for OpenMeteo {
    async fn resolve(&self, query: &CityQuery) -> Result<Coordinate, Error> {
        let endpoint = "geocoding";

        debug!(city = %query.name, "requesting geocoding candidates");

        let res = self
            .http
            .get(GEOCODING_URL)
            .query(&[
                ("name", query.name.as_str()),
                ("count", RESULT_CAP),
                ("language", "en"),
                ("format", "json"),
            ])
            .send()
            .await
            .map_err(|source| Error::Network { endpoint, source })?;

        let status = res.status();
        let body = res
            .text()
            .await
            .map_err(|source| Error::Network { endpoint, source })?;

        if !status.is_success() {
            return Err(Error::Status {
                endpoint,
                status,
                body: truncate_body(&body),
            });
        }

        let parsed: GeocodingResponse =
            serde_json::from_str(&body).map_err(|source| Error::Decode { endpoint, source })?;

        first_country_match(&parsed.results, &query.country).ok_or_else(|| Error::NoMatch {
            city: query.name.clone(),
            country: query.country.clone(),
        })
    }
}

#[async_trait]
impl ForecastFetcher for OpenMeteo {
    async fn fetch(
        &self,
        location: &Coordinate,
        options: &ForecastOptions,
    ) -> Result<ForecastSeries, Error> {
        let endpoint = "forecast";
        let daily = daily_fields(options);

        debug!(
            latitude = %location.latitude,
            longitude = %location.longitude,
            %daily,
            "requesting daily forecast"
        );

        let res = self
            .http
            .get(FORECAST_URL)
            .query(&[
                ("latitude", location.latitude.as_str()),
                ("longitude", location.longitude.as_str()),
                ("timezone", "auto"),
                ("daily", daily.as_str()),
            ])
            .send()
            .await
            .map_err(|source| Error::Network { endpoint, source })?;

        let status = res.status();
        let body = res
            .text()
            .await
            .map_err(|source| Error::Network { endpoint, source })?;

        if !status.is_success() {
            return Err(Error::Status {
                endpoint,
                status,
                body: truncate_body(&body),
            });
        }

        let parsed: ForecastResponse =
            serde_json::from_str(&body).map_err(|source| Error::Decode { endpoint, source })?;

        Ok(parsed.daily.into_series())
    }
}

/// Scan candidates in provider order; the first exact country match wins.
fn first_country_match(candidates: &[GeoCandidate], country: &str) -> Option<Coordinate> {
    let hit = candidates.iter().find(|c| c.country == country)?;
    debug!(name = %hit.name, country = %hit.country, "matched geocoding candidate");

    Some(Coordinate {
        latitude: hit.latitude.to_string(),
        longitude: hit.longitude.to_string(),
    })
}

/// The two mandatory fields are always requested; each enabled optional
/// field is appended in this declared order.
fn daily_fields(options: &ForecastOptions) -> String {
    let optional: [(bool, &str); 4] = [
        (options.precipitation, "precipitation_sum"),
        (options.sunrise, "sunrise"),
        (options.sunset, "sunset"),
        (options.uv_index, "uv_index_max"),
    ];

    let mut fields = vec!["temperature_2m_max", "temperature_2m_min"];
    fields.extend(
        optional
            .iter()
            .filter(|(enabled, _)| *enabled)
            .map(|(_, name)| *name),
    );
    fields.join(",")
}

#[derive(Debug, Deserialize)]
struct GeocodingResponse {
    #[serde(default)]
    results: Vec<GeoCandidate>,
}

#[derive(Debug, Deserialize)]
struct GeoCandidate {
    #[serde(default)]
    name: String,
    // serde_json::Number keeps the provider's decimal text intact, so the
    // coordinates can be echoed into the forecast query verbatim.
    latitude: serde_json::Number,
    longitude: serde_json::Number,
    #[serde(default)]
    country: String,
}

#[derive(Debug, Deserialize)]
struct ForecastResponse {
    daily: DailyBlock,
}

/// The provider's parallel per-day arrays, keyed by field name. Optional
/// arrays default to empty when the field was not requested.
#[derive(Debug, Deserialize)]
struct DailyBlock {
    time: Vec<NaiveDate>,
    temperature_2m_max: Vec<f64>,
    #[serde(default)]
    temperature_2m_min: Vec<Option<f64>>,
    #[serde(default)]
    precipitation_sum: Vec<Option<f64>>,
    #[serde(default)]
    uv_index_max: Vec<Option<f64>>,
    #[serde(default)]
    sunrise: Vec<String>,
    #[serde(default)]
    sunset: Vec<String>,
}

impl DailyBlock {
    /// Positional conversion into per-day records. An optional array that is
    /// shorter than the temperature array, or a `null` entry, yields `None`
    /// for that day rather than an error.
    fn into_series(self) -> ForecastSeries {
        let days = self
            .time
            .iter()
            .zip(self.temperature_2m_max.iter())
            .enumerate()
            .map(|(i, (date, max))| DayForecast {
                date: *date,
                temperature_max: *max,
                temperature_min: self.temperature_2m_min.get(i).copied().flatten(),
                precipitation_sum: self.precipitation_sum.get(i).copied().flatten(),
                uv_index_max: self.uv_index_max.get(i).copied().flatten(),
                sunrise: self.sunrise.get(i).cloned(),
                sunset: self.sunset.get(i).cloned(),
            })
            .collect();

        ForecastSeries { days }
    }
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    if body.len() > MAX {
        format!("{}...", &body[..MAX])
    } else {
        body.to_string()
    }
}
