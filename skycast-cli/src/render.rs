use std::fmt::Write as _;

use clap::ValueEnum;
use skycast_core::{
    SearchState, View, ViewController,
    format::{kelvin_to_celsius, title_case, weekday_label},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Output {
    /// Human-readable summary.
    Text,
    /// The markup fragments the widget inserts.
    Html,
    /// View and search state as JSON.
    Json,
}

pub fn print_view(vc: &ViewController, output: Output) -> anyhow::Result<()> {
    let rendered = match output {
        Output::Text => text(vc.view(), vc.state()),
        Output::Html => html(vc.view()),
        Output::Json => serde_json::to_string_pretty(&serde_json::json!({
            "phase": vc.phase(),
            "view": vc.view(),
            "state": vc.state(),
        }))?,
    };
    println!("{rendered}");
    Ok(())
}

fn banners(view: &View, out: &mut String) {
    for banner in [&view.search_error, &view.geo_error] {
        if banner.visible {
            let _ = writeln!(out, "! {}", banner.text);
        }
    }
}

fn text(view: &View, state: &SearchState) -> String {
    let mut out = String::new();
    banners(view, &mut out);

    if let (Some(current), Some(city)) = (state.weather_info.first(), &state.city_info) {
        let _ = writeln!(out, "{} ({})", city.city_name, city.country);
        let _ = writeln!(
            out,
            "Today  {}°C  {}",
            kelvin_to_celsius(current.temp),
            title_case(&current.description)
        );
        let _ = writeln!(
            out,
            "Feels like {}°C  Humidity {}%",
            kelvin_to_celsius(current.feels_like),
            current.humidity
        );
    }

    if !state.future_info.is_empty() {
        out.push('\n');
        for day in &state.future_info {
            let _ = writeln!(
                out,
                "{}  {:>4}°C  [{}]",
                weekday_label(day.time_stamp),
                kelvin_to_celsius(day.temp),
                day.condition_id
            );
        }
    }

    out.trim_end().to_string()
}

fn html(view: &View) -> String {
    let mut out = String::new();
    banners(view, &mut out);
    out.push_str(view.results_html.trim());
    if !view.minis_html.is_empty() {
        out.push('\n');
        out.push_str(view.minis_html.trim());
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use skycast_core::{Banner, CityInfo, DailySample, ForecastEntry};

    fn lisbon() -> SearchState {
        SearchState {
            query: "Lisbon".into(),
            city_info: Some(CityInfo { country: "PT".into(), city_name: "Lisbon".into() }),
            weather_info: vec![ForecastEntry {
                time_of_recording: "2023-01-01 00:00:00".into(),
                temp: 288.15,
                feels_like: 286.15,
                humidity: 72,
                description: "light rain".into(),
                condition_id: "500".into(),
            }],
            future_info: vec![DailySample {
                time_stamp: 1_672_617_600,
                temp: 290.15,
                condition_id: "800".into(),
            }],
        }
    }

    #[test]
    fn text_summary() {
        let out = text(&View::default(), &lisbon());
        assert!(out.starts_with("Lisbon (PT)"));
        assert!(out.contains("Today  15°C  Light Rain"));
        assert!(out.contains("Feels like 13°C  Humidity 72%"));
        assert!(out.contains("Mon    17°C  [800]"));
    }

    #[test]
    fn text_shows_visible_banners_only() {
        let view = View {
            search_error: Banner { visible: true, text: "No city found, please search again!".into() },
            geo_error: Banner { visible: false, text: "stale".into() },
            ..View::default()
        };
        let out = text(&view, &SearchState::default());
        assert_eq!(out, "! No city found, please search again!");
    }
}
