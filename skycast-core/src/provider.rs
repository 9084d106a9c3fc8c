use crate::{
    Config, WidgetError,
    model::{Coordinates, Forecast, Geocoded},
    provider::openweather::OpenWeatherProvider,
};
use async_trait::async_trait;
use std::fmt::Debug;

pub mod openweather;

/// Resolves a free-text city name to its best match.
#[async_trait]
pub trait Geocoder: Send + Sync + Debug {
    async fn geocode(&self, city: &str) -> Result<Geocoded, WidgetError>;
}

/// Fetches the 3-hour forecast series for a position.
#[async_trait]
pub trait ForecastFetcher: Send + Sync + Debug {
    async fn forecast(&self, coords: Coordinates) -> Result<Forecast, WidgetError>;
}

/// Construct the OpenWeather client from config.
pub fn provider_from_config(config: &Config) -> anyhow::Result<OpenWeatherProvider> {
    let api_key = config.resolve_api_key()?;
    let provider = OpenWeatherProvider::new(api_key).with_base_url(config.base_url());

    match config.request_timeout() {
        Some(timeout) => provider.with_timeout(timeout),
        None => Ok(provider),
    }
}
