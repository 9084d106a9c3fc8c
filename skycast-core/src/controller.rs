//! Widget state machine.
//!
//! The controller owns the [`SearchState`] and the [`View`] a front end
//! displays. Every search takes a [`Ticket`]; a result is only applied while
//! its ticket is the latest one, so a slow earlier search can never overwrite
//! a newer one (or resurrect results after [`ViewController::close`]).

use serde::Serialize;

use crate::{
    WidgetError,
    format::{main_panel_html, mini_panel_html},
    locate::Locator,
    model::SearchState,
    pipeline::Pipeline,
};

/// A dismissible error region.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Banner {
    pub visible: bool,
    pub text: String,
}

impl Banner {
    fn show(&mut self, err: &WidgetError) {
        self.visible = true;
        self.text = err.to_string();
    }

    fn hide(&mut self) {
        self.visible = false;
    }

    fn reset(&mut self) {
        self.visible = false;
        self.text.clear();
    }
}

/// What the rendering surface shows.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct View {
    pub input: String,
    pub results_html: String,
    pub minis_html: String,
    pub back_visible: bool,
    pub search_error: Banner,
    pub geo_error: Banner,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub enum Phase {
    #[default]
    Idle,
    Showing,
}

/// Identifies one search; see [`ViewController::begin_search`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket(u64);

/// What happened to a finished search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Applied {
    Shown,
    /// The error went to a banner.
    Failed,
    /// A newer search or a close happened first; nothing changed.
    Stale,
}

#[derive(Debug)]
pub struct ViewController {
    pipeline: Pipeline,
    state: SearchState,
    view: View,
    phase: Phase,
    generation: u64,
}

impl ViewController {
    pub fn new(pipeline: Pipeline) -> Self {
        Self {
            pipeline,
            state: SearchState::default(),
            view: View::default(),
            phase: Phase::Idle,
            generation: 0,
        }
    }

    pub fn state(&self) -> &SearchState {
        &self.state
    }

    pub fn view(&self) -> &View {
        &self.view
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Handle for running searches outside of `&mut self`.
    pub fn pipeline(&self) -> Pipeline {
        self.pipeline.clone()
    }

    pub fn set_input(&mut self, text: impl Into<String>) {
        self.view.input = text.into();
    }

    fn next_ticket(&mut self) -> Ticket {
        self.generation += 1;
        Ticket(self.generation)
    }

    fn is_current(&self, ticket: Ticket) -> bool {
        ticket.0 == self.generation
    }

    /// Clears the previous search and prepares the view for a new one.
    pub fn begin_search(&mut self) -> Ticket {
        self.reset();
        self.view.back_visible = true;
        self.view.search_error.hide();
        self.next_ticket()
    }

    /// Applies the outcome of [`Pipeline::search`].
    pub fn apply_search(
        &mut self,
        ticket: Ticket,
        result: Result<SearchState, WidgetError>,
    ) -> Applied {
        if !self.is_current(ticket) {
            tracing::debug!(ticket = ticket.0, current = self.generation, "dropping stale search");
            return Applied::Stale;
        }

        match result {
            Ok(state) => {
                let (results, minis) = render(&state);
                tracing::info!(
                    query = %state.query,
                    entries = state.weather_info.len(),
                    days = state.future_info.len(),
                    "search shown"
                );
                self.state = state;
                self.view.results_html = results;
                self.view.minis_html = minis;
                self.view.input.clear();
                self.phase = Phase::Showing;
                Applied::Shown
            }
            Err(err) => {
                tracing::warn!(error = ?err, "search failed");
                self.view.search_error.show(&err);
                Applied::Failed
            }
        }
    }

    /// Searches for `city` and applies the result.
    pub async fn submit(&mut self, city: &str) -> Applied {
        let ticket = self.begin_search();
        let result = self.pipeline.search(city).await;
        self.apply_search(ticket, result)
    }

    /// Submits whatever is in the input field (the Enter key).
    pub async fn submit_input(&mut self) -> Applied {
        let city = self.view.input.clone();
        self.submit(&city).await
    }

    /// Starts a device lookup. Unlike [`Self::begin_search`] the view is
    /// left alone until the lookup resolves to a city.
    pub fn begin_geolocation(&mut self) -> Ticket {
        self.next_ticket()
    }

    /// Shows a failed device lookup in the geolocation banner.
    pub fn apply_geolocation_failure(&mut self, ticket: Ticket, err: WidgetError) -> Applied {
        if !self.is_current(ticket) {
            return Applied::Stale;
        }
        tracing::warn!(error = ?err, "geolocation failed");
        self.view.back_visible = true;
        self.view.geo_error.show(&err);
        Applied::Failed
    }

    /// Looks up the city at the device position, then searches for it.
    pub async fn geolocate(&mut self, locator: &dyn Locator) -> Applied {
        let ticket = self.begin_geolocation();

        let located = self.pipeline.locate_city(locator).await;
        match located {
            Ok(city) if self.is_current(ticket) => self.submit(&city).await,
            Ok(_) => Applied::Stale,
            Err(err) => self.apply_geolocation_failure(ticket, err),
        }
    }

    fn reset(&mut self) {
        self.state.clear();
        self.view.input.clear();
        self.view.results_html.clear();
        self.view.minis_html.clear();
        self.view.back_visible = false;
        self.view.search_error.reset();
        self.view.geo_error.reset();
        self.phase = Phase::Idle;
    }

    /// Back to an empty widget. Any search still in flight becomes stale.
    pub fn close(&mut self) {
        self.reset();
        self.next_ticket();
    }
}

fn render(state: &SearchState) -> (String, String) {
    let results = match (state.weather_info.first(), &state.city_info) {
        (Some(current), Some(city)) => main_panel_html(current, city),
        _ => String::new(),
    };
    let minis = state.future_info.iter().map(mini_panel_html).collect();
    (results, minis)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{
        CityInfo, Condition, Coordinates, Forecast, ForecastRecord, Geocoded, Readings,
    };
    use crate::{
        locate::StaticLocator,
        provider::{ForecastFetcher, Geocoder},
    };
    use async_trait::async_trait;
    use std::sync::Arc;

    const JAN_1_2023: i64 = 1_672_531_200;

    #[derive(Debug)]
    struct Fake {
        known_city: &'static str,
        forecast: Result<(), WidgetError>,
    }

    #[async_trait]
    impl Geocoder for Fake {
        async fn geocode(&self, city: &str) -> Result<Geocoded, WidgetError> {
            if city != self.known_city {
                return Err(WidgetError::GeoNotFound);
            }
            Ok(Geocoded {
                coords: Coordinates { lat: 38.72, lon: -9.14 },
                city: CityInfo { country: "PT".into(), city_name: city.into() },
            })
        }
    }

    #[async_trait]
    impl ForecastFetcher for Fake {
        async fn forecast(&self, _coords: Coordinates) -> Result<Forecast, WidgetError> {
            self.forecast.clone()?;
            let records = (0..40)
                .map(|i| ForecastRecord {
                    dt: JAN_1_2023 + i * 3 * 3600,
                    dt_txt: String::new(),
                    main: Readings { temp: 288.15, feels_like: 287.15, humidity: 70 },
                    weather: vec![Condition { id: 801, description: "few clouds".into() }],
                })
                .collect();
            Ok(Forecast { city_name: self.known_city.into(), records })
        }
    }

    fn controller(forecast: Result<(), WidgetError>) -> ViewController {
        ViewController::new(Pipeline::from_provider(Fake { known_city: "Lisbon", forecast }))
    }

    #[tokio::test]
    async fn submit_shows_results() {
        let mut vc = controller(Ok(()));
        vc.set_input("Lisbon");

        assert_eq!(vc.submit_input().await, Applied::Shown);
        assert_eq!(vc.phase(), Phase::Showing);
        assert_eq!(vc.state().query, "Lisbon");
        assert_eq!(vc.state().future_info.len(), 4);
        assert_eq!(vc.state().weather_info.len(), 40);
        assert!(vc.view().results_html.contains("Few Clouds"));
        assert_eq!(vc.view().minis_html.matches("class=\"mini fade-in\"").count(), 4);
        assert!(vc.view().back_visible);
        assert!(vc.view().input.is_empty());
    }

    #[tokio::test]
    async fn unknown_city_shows_search_banner() {
        let mut vc = controller(Ok(()));

        assert_eq!(vc.submit("Zzzznotacity").await, Applied::Failed);
        assert!(vc.view().search_error.visible);
        assert_eq!(vc.view().search_error.text, "No city found, please search again!");
        assert!(vc.state().future_info.is_empty());
        assert_eq!(vc.phase(), Phase::Idle);
        assert!(vc.view().back_visible);
    }

    #[tokio::test]
    async fn new_search_discards_previous_results() {
        let mut vc = controller(Ok(()));
        vc.submit("Lisbon").await;
        vc.submit("Nowhere").await;

        assert!(vc.state().future_info.is_empty());
        assert!(vc.state().city_info.is_none());
        assert!(vc.view().results_html.is_empty());
        assert!(vc.view().minis_html.is_empty());
    }

    #[tokio::test]
    async fn fetch_failure_reaches_search_banner() {
        let mut vc = controller(Err(WidgetError::fetch_failed("boom")));

        assert_eq!(vc.submit("Lisbon").await, Applied::Failed);
        assert_eq!(vc.view().search_error.text, "Unable to fetch weather data, please try again!");
    }

    #[tokio::test]
    async fn denied_geolocation_shows_geo_banner() {
        let mut vc = controller(Ok(()));

        assert_eq!(vc.geolocate(&StaticLocator::denied()).await, Applied::Failed);
        assert!(vc.view().geo_error.visible);
        assert_eq!(vc.view().geo_error.text, "Unable to get device location!");
        assert!(vc.view().back_visible);
        assert!(!vc.view().search_error.visible);
    }

    #[tokio::test]
    async fn geolocation_searches_reported_city() {
        let mut vc = controller(Ok(()));
        let here = StaticLocator::new(Some(Coordinates { lat: 38.72, lon: -9.14 }));

        assert_eq!(vc.geolocate(&here).await, Applied::Shown);
        assert_eq!(vc.state().query, "Lisbon");
    }

    #[tokio::test]
    async fn geolocation_fetch_failure_uses_geo_banner() {
        let mut vc = controller(Err(WidgetError::fetch_failed("boom")));
        let here = StaticLocator::new(Some(Coordinates { lat: 0.0, lon: 0.0 }));

        assert_eq!(vc.geolocate(&here).await, Applied::Failed);
        assert!(vc.view().geo_error.visible);
        assert!(!vc.view().search_error.visible);
    }

    #[tokio::test]
    async fn close_resets_from_any_state() {
        let mut vc = controller(Ok(()));
        vc.submit("Lisbon").await;
        vc.geolocate(&StaticLocator::denied()).await;
        vc.submit("Nowhere").await;
        vc.set_input("half typed");

        vc.close();

        assert_eq!(vc.view(), &View::default());
        assert!(vc.state().future_info.is_empty());
        assert_eq!(vc.phase(), Phase::Idle);
    }

    #[tokio::test]
    async fn stale_search_is_dropped() {
        let mut vc = controller(Ok(()));
        let pipeline = vc.pipeline();

        let first = vc.begin_search();
        let second = vc.begin_search();

        let slow = pipeline.search("Lisbon").await;
        assert_eq!(vc.apply_search(first, slow), Applied::Stale);
        assert!(vc.state().future_info.is_empty());
        assert!(vc.view().results_html.is_empty());

        let fresh = pipeline.search("Nowhere").await;
        assert_eq!(vc.apply_search(second, fresh), Applied::Failed);
        assert!(vc.view().search_error.visible);
    }

    #[tokio::test]
    async fn geolocation_failure_keeps_current_results() {
        let mut vc = controller(Ok(()));
        vc.submit("Lisbon").await;

        let ticket = vc.begin_geolocation();
        assert_eq!(vc.phase(), Phase::Showing);
        assert!(!vc.view().results_html.is_empty());

        let applied = vc.apply_geolocation_failure(ticket, WidgetError::GeolocationDenied);
        assert_eq!(applied, Applied::Failed);
        assert!(vc.view().geo_error.visible);
        assert_eq!(vc.state().future_info.len(), 4);
    }

    #[tokio::test]
    async fn geolocation_failure_after_new_search_is_stale() {
        let mut vc = controller(Ok(()));

        let ticket = vc.begin_geolocation();
        vc.submit("Lisbon").await;

        let applied = vc.apply_geolocation_failure(ticket, WidgetError::GeolocationDenied);
        assert_eq!(applied, Applied::Stale);
        assert!(!vc.view().geo_error.visible);
    }

    #[tokio::test]
    async fn results_after_close_are_dropped() {
        let mut vc = controller(Ok(()));
        let pipeline = vc.pipeline();

        let ticket = vc.begin_search();
        vc.close();

        let result = pipeline.search("Lisbon").await;
        assert_eq!(vc.apply_search(ticket, result), Applied::Stale);
        assert_eq!(vc.phase(), Phase::Idle);
        assert!(!vc.view().back_visible);
    }
}
