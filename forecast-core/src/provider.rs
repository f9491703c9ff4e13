use crate::{
    Error,
    model::{CityQuery, Coordinate, ForecastOptions, ForecastSeries},
};
use async_trait::async_trait;
use std::fmt::Debug;

pub mod open_meteo;

/// Turns a city/country pair into coordinates.
#[async_trait]
pub trait LocationResolver: Send + Sync + Debug {
    /// Returns the coordinates of the first candidate whose country matches
    /// the query exactly, or [`Error::NoMatch`].
    async fn resolve(&self, query: &CityQuery) -> Result<Coordinate, Error>;
}

/// Turns coordinates plus requested fields into a forecast series.
#[async_trait]
pub trait ForecastFetcher: Send + Sync + Debug {
    async fn fetch(
        &self,
        location: &Coordinate,
        options: &ForecastOptions,
    ) -> Result<ForecastSeries, Error>;
}
