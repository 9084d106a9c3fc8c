use anyhow::Context;
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use std::time::Duration;

use crate::{
    WidgetError,
    config::DEFAULT_BASE_URL,
    model::{CityInfo, Coordinates, Forecast, ForecastRecord, Geocoded},
};

use super::{ForecastFetcher, Geocoder};

const GEOCODE_PATH: &str = "/geo/1.0/direct";
const FORECAST_PATH: &str = "/data/2.5/forecast";

#[derive(Debug, Clone)]
pub struct OpenWeatherProvider {
    api_key: String,
    base_url: String,
    http: Client,
}

impl OpenWeatherProvider {
    pub fn new(api_key: String) -> Self {
        Self {
            api_key,
            base_url: DEFAULT_BASE_URL.to_string(),
            http: Client::new(),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> anyhow::Result<Self> {
        self.http = Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to build HTTP client")?;
        Ok(self)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// GET `path` with the API key appended; returns status and body.
    /// Only transport failures are errors here.
    async fn get_text(
        &self,
        path: &str,
        query: &[(&str, String)],
        what: &str,
    ) -> Result<(StatusCode, String), WidgetError> {
        let url = format!("{}{}", self.base_url, path);
        tracing::debug!(%url, what, "sending OpenWeather request");

        let res = self
            .http
            .get(&url)
            .query(query)
            .query(&[("appid", self.api_key.as_str())])
            .send()
            .await
            .map_err(|e| fetch_failed(format!("Failed to send OpenWeather {what} request: {e}")))?;

        let status = res.status();
        let body = res.text().await.map_err(|e| {
            fetch_failed(format!("Failed to read OpenWeather {what} response body: {e}"))
        })?;

        Ok((status, body))
    }
}

fn fetch_failed(reason: String) -> WidgetError {
    tracing::warn!(%reason, "OpenWeather request failed");
    WidgetError::fetch_failed(reason)
}

#[derive(Debug, Deserialize)]
struct OwGeoResult {
    lat: f64,
    lon: f64,
    name: String,
    country: String,
}

#[derive(Debug, Deserialize)]
struct OwCity {
    name: String,
}

#[derive(Debug, Deserialize)]
struct OwForecastResponse {
    city: OwCity,
    list: Vec<ForecastRecord>,
}

#[async_trait]
impl Geocoder for OpenWeatherProvider {
    async fn geocode(&self, city: &str) -> Result<Geocoded, WidgetError> {
        let (status, body) = self
            .get_text(GEOCODE_PATH, &[("q", city.to_string()), ("limit", "1".to_string())], "geocoding")
            .await?;

        // Any reply that is not a match list, rejected or malformed, means no city.
        if !status.is_success() {
            tracing::warn!(%status, body = %truncate_body(&body), "geocoding request rejected");
            return Err(WidgetError::GeoNotFound);
        }

        let results: Vec<OwGeoResult> = serde_json::from_str(&body).map_err(|e| {
            tracing::warn!(error = %e, body = %truncate_body(&body), "Failed to parse geocoding JSON");
            WidgetError::GeoNotFound
        })?;

        let first = results.into_iter().next().ok_or_else(|| {
            tracing::info!(city, "geocoding returned no match");
            WidgetError::GeoNotFound
        })?;

        Ok(Geocoded {
            coords: Coordinates { lat: first.lat, lon: first.lon },
            city: CityInfo { country: first.country, city_name: first.name },
        })
    }
}

#[async_trait]
impl ForecastFetcher for OpenWeatherProvider {
    async fn forecast(&self, coords: Coordinates) -> Result<Forecast, WidgetError> {
        let (status, body) = self
            .get_text(
                FORECAST_PATH,
                &[("lat", coords.lat.to_string()), ("lon", coords.lon.to_string())],
                "forecast",
            )
            .await?;

        if !status.is_success() {
            return Err(fetch_failed(format!(
                "OpenWeather forecast request failed with status {}: {}",
                status,
                truncate_body(&body),
            )));
        }

        let parsed: OwForecastResponse = serde_json::from_str(&body)
            .map_err(|e| fetch_failed(format!("Failed to parse OpenWeather forecast JSON: {e}")))?;

        if parsed.list.is_empty() {
            return Err(fetch_failed("OpenWeather forecast response contained no data".to_string()));
        }

        tracing::debug!(city = %parsed.city.name, records = parsed.list.len(), "forecast received");

        Ok(Forecast { city_name: parsed.city.name, records: parsed.list })
    }
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    match body.char_indices().nth(MAX) {
        Some((idx, _)) => format!("{}...", &body[..idx]),
        None => body.to_string(),
    }
}
