use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A human-entered city/country pair, constructed once from CLI input.
#[derive(Debug, Clone)]
pub struct CityQuery {
    pub name: String,
    pub country: String,
}

/// Latitude/longitude as decimal strings.
///
/// Kept as the provider's decimal text so the values survive being
/// re-serialized into the forecast query without float round-tripping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Coordinate {
    pub latitude: String,
    pub longitude: String,
}

/// Which optional fields to request and render.
#[derive(Debug, Clone, Copy, Default)]
pub struct ForecastOptions {
    pub precipitation: bool,
    pub sunrise: bool,
    pub sunset: bool,
    pub uv_index: bool,
    pub fahrenheit: bool,
}

/// One calendar day of the forecast window. Temperatures are Celsius.
///
/// Optional fields are `None` when the user did not request them, when the
/// provider array was shorter than the temperature array, or when the
/// provider returned `null` for that day.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DayForecast {
    pub date: NaiveDate,
    pub temperature_max: f64,
    pub temperature_min: Option<f64>,
    pub precipitation_sum: Option<f64>,
    pub uv_index_max: Option<f64>,
    pub sunrise: Option<String>,
    pub sunset: Option<String>,
}

/// Chronologically ordered forecast days; iteration order is render order.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ForecastSeries {
    pub days: Vec<DayForecast>,
}
