use thiserror::Error;

/// Failures the widget reports to the user.
///
/// `Display` is the exact banner text; anything more detailed is carried in
/// fields and only goes to the logs.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WidgetError {
    #[error("No city found, please search again!")]
    GeoNotFound,

    #[error("Unable to fetch weather data, please try again!")]
    FetchFailed { reason: String },

    #[error("Unable to get device location!")]
    GeolocationDenied,
}

impl WidgetError {
    pub fn fetch_failed(reason: impl Into<String>) -> Self {
        WidgetError::FetchFailed { reason: reason.into() }
    }
}
