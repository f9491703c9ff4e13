use chrono::NaiveDate;
use clap::{CommandFactory, Parser};
use tracing::debug;

use forecast_core::{
    CityQuery, ForecastFetcher, ForecastOptions, LocationResolver,
    provider::open_meteo::OpenMeteo, report,
};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "forecast", version, about = "Weekly weather forecast for a city")]
pub struct Cli {
    /// Name of the city (e.g. "The Hague").
    #[arg(long)]
    pub city: String,

    /// Country of the city (e.g. "Netherlands").
    #[arg(long)]
    pub country: String,

    /// Day of interest; echoed above the report, never narrows the window.
    #[arg(long)]
    pub day: Option<NaiveDate>,

    /// Include the precipitation sum.
    #[arg(short = 'p')]
    pub precipitation: bool,

    /// Include the daily UV index maximum.
    #[arg(long)]
    pub uv: bool,

    /// Include the sunrise time.
    #[arg(long)]
    pub sunrise: bool,

    /// Include the sunset time.
    #[arg(long)]
    pub sunset: bool,

    /// Display temperatures in Fahrenheit.
    #[arg(short = 'f')]
    pub fahrenheit: bool,
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        // clap rejects missing flags; empty values still need a usage reply
        // before anything touches the network.
        if self.city.trim().is_empty() || self.country.trim().is_empty() {
            Cli::command().print_help()?;
            anyhow::bail!("--city and --country must not be empty");
        }

        let options = self.forecast_options();
        let query = CityQuery {
            name: self.city,
            country: self.country,
        };

        debug!(city = %query.name, country = %query.country, "starting forecast run");

        let client = OpenMeteo::new();
        let location = client.resolve(&query).await?;
        let series = client.fetch(&location, &options).await?;

        if let Some(day) = self.day {
            println!("Requested day: {day}");
        }
        for line in report::render(&series, &options) {
            println!("{line}");
        }

        Ok(())
    }

    fn forecast_options(&self) -> ForecastOptions {
        ForecastOptions {
            precipitation: self.precipitation,
            sunrise: self.sunrise,
            sunset: self.sunset,
            uv_index: self.uv,
            fahrenheit: self.fahrenheit,
        }
    }
}
