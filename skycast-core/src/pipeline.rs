//! The network half of a search: geocode, fetch, sample.
//!
//! Nothing here touches the view, so a search can run while the controller
//! keeps handling input; the controller decides afterwards whether the
//! result is still wanted.

use std::sync::Arc;

use crate::{
    WidgetError,
    locate::Locator,
    model::{ForecastEntry, SearchState},
    provider::{ForecastFetcher, Geocoder},
    sampler::sample_days,
};

#[derive(Debug, Clone)]
pub struct Pipeline {
    geocoder: Arc<dyn Geocoder>,
    fetcher: Arc<dyn ForecastFetcher>,
}

impl Pipeline {
    pub fn new(geocoder: Arc<dyn Geocoder>, fetcher: Arc<dyn ForecastFetcher>) -> Self {
        Self { geocoder, fetcher }
    }

    /// Builds a pipeline from one provider serving both endpoints.
    pub fn from_provider<P>(provider: P) -> Self
    where
        P: Geocoder + ForecastFetcher + 'static,
    {
        let provider = Arc::new(provider);
        Self { geocoder: provider.clone(), fetcher: provider }
    }

    /// Runs a full city search and returns the populated state.
    pub async fn search(&self, city: &str) -> Result<SearchState, WidgetError> {
        let geocoded = self.geocoder.geocode(city).await?;
        tracing::debug!(
            city = %geocoded.city.city_name,
            lat = geocoded.coords.lat,
            lon = geocoded.coords.lon,
            "geocoded"
        );

        let forecast = self.fetcher.forecast(geocoded.coords).await?;

        let current = forecast
            .records
            .first()
            .ok_or_else(|| WidgetError::fetch_failed("forecast contained no entries"))?;

        let future_info = sample_days(&forecast.records, current.dt);
        let weather_info = forecast.records.iter().map(ForecastEntry::from).collect();

        Ok(SearchState {
            query: city.to_string(),
            city_info: Some(geocoded.city),
            weather_info,
            future_info,
        })
    }

    /// Resolves the device position to the city name the forecast endpoint
    /// reports for it.
    pub async fn locate_city(&self, locator: &dyn Locator) -> Result<String, WidgetError> {
        let coords = locator.current_position().await?;
        let forecast = self.fetcher.forecast(coords).await?;
        Ok(forecast.city_name)
    }
}
