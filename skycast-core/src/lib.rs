//! Core library for the `skycast` weather widget.
//!
//! This crate defines:
//! - Configuration & credentials handling
//! - The OpenWeather client behind the `Geocoder` / `ForecastFetcher` seams
//! - Daily sampling of the 3-hour forecast series
//! - Display formatting and markup fragments
//! - The view controller that turns user triggers into a rendered `View`
//!
//! It is used by `skycast-cli`, but any front end able to show a `View` can drive it.

pub mod config;
pub mod controller;
pub mod error;
pub mod format;
pub mod locate;
pub mod model;
pub mod pipeline;
pub mod provider;
pub mod sampler;

pub use config::Config;
pub use controller::{Applied, Banner, Phase, View, ViewController};
pub use error::WidgetError;
pub use locate::{Locator, StaticLocator};
pub use model::{CityInfo, Coordinates, DailySample, ForecastEntry, SearchState};
pub use pipeline::Pipeline;
pub use provider::{ForecastFetcher, Geocoder, openweather::OpenWeatherProvider};
