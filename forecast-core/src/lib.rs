//! Core library for the `forecast` CLI.
//!
//! This crate defines:
//! - Shared domain models (city queries, coordinates, forecast series)
//! - Abstraction over the geocoding and forecast endpoints
//! - Report rendering (relative-intensity indicator, one line per day)
//!
//! It is used by `forecast-cli`, but can also be reused by other binaries or services.

pub mod error;
pub mod model;
pub mod provider;
pub mod report;

pub use error::Error;
pub use model::{CityQuery, Coordinate, DayForecast, ForecastOptions, ForecastSeries};
pub use provider::{ForecastFetcher, LocationResolver};
