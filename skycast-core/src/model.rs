use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lon: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CityInfo {
    pub country: String,
    pub city_name: String,
}

/// Best geocoding match for a query.
#[derive(Debug, Clone, PartialEq)]
pub struct Geocoded {
    pub coords: Coordinates,
    pub city: CityInfo,
}

/// One weather condition attached to a forecast record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Condition {
    pub id: u32,
    pub description: String,
}

/// Temperatures are in Kelvin, as delivered by the provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Readings {
    pub temp: f64,
    pub feels_like: f64,
    pub humidity: u8,
}

/// Raw 3-hour forecast record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastRecord {
    pub dt: i64,
    pub dt_txt: String,
    pub main: Readings,
    pub weather: Vec<Condition>,
}

impl ForecastRecord {
    /// Icon key: all condition ids joined without a separator.
    pub fn condition_id(&self) -> String {
        self.weather.iter().map(|w| w.id.to_string()).collect()
    }

    /// All condition descriptions joined without a separator.
    pub fn description(&self) -> String {
        self.weather.iter().map(|w| w.description.as_str()).collect()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Forecast {
    /// City name as reported by the forecast endpoint.
    pub city_name: String,
    pub records: Vec<ForecastRecord>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ForecastEntry {
    pub time_of_recording: String,
    pub temp: f64,
    pub feels_like: f64,
    pub humidity: u8,
    pub description: String,
    pub condition_id: String,
}

impl From<&ForecastRecord> for ForecastEntry {
    fn from(record: &ForecastRecord) -> Self {
        Self {
            time_of_recording: record.dt_txt.clone(),
            temp: record.main.temp,
            feels_like: record.main.feels_like,
            humidity: record.main.humidity,
            description: record.description(),
            condition_id: record.condition_id(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DailySample {
    pub time_stamp: i64,
    pub temp: f64,
    pub condition_id: String,
}

impl From<&ForecastRecord> for DailySample {
    fn from(record: &ForecastRecord) -> Self {
        Self { time_stamp: record.dt, temp: record.main.temp, condition_id: record.condition_id() }
    }
}

/// Everything one search knows. Replaced wholesale on each new search.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SearchState {
    pub query: String,
    pub city_info: Option<CityInfo>,
    pub weather_info: Vec<ForecastEntry>,
    pub future_info: Vec<DailySample>,
}

impl SearchState {
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}
