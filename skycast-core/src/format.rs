//! Display values and markup fragments.

use chrono::{DateTime, Datelike};

use crate::model::{CityInfo, DailySample, ForecastEntry};

const KELVIN_OFFSET: f64 = 273.15;
const DAYS: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

/// Rounds half away from zero. `-0.4` becomes `0`, never `-0`.
pub fn round_celsius(celsius: f64) -> i64 {
    celsius.round() as i64
}

pub fn kelvin_to_celsius(kelvin: f64) -> i64 {
    round_celsius(kelvin - KELVIN_OFFSET)
}

/// Uppercases the first character of every space-separated word.
pub fn title_case(text: &str) -> String {
    text.split(' ')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Short weekday name of a Unix timestamp (UTC).
pub fn weekday_label(ts: i64) -> &'static str {
    let idx = DateTime::from_timestamp(ts, 0)
        .map(|dt| dt.weekday().num_days_from_sunday())
        .unwrap_or(0);
    DAYS[idx as usize]
}

fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Markup for the "Today" panel and its feels-like/humidity footer.
pub fn main_panel_html(current: &ForecastEntry, city: &CityInfo) -> String {
    format!(
        r#"
<div class="main-results fade-in">
  <span class="day">Today</span>
  <div><i class="icon wi wi-owm-{id}"></i></div>
  <h2 class="temp"><span class="temp-num">{temp}</span>&#176;C</h2>
  <p class="description">{description}</p>
  <p class="location">
    <ion-icon name="location-outline"></ion-icon> {city}
    <span class="country-tag">{country}</span>
  </p>
</div>

<div class="footer-main-results fade-in">
  <div class="feels-like-section">
    <ion-icon class="thermometer-outline" name="thermometer-outline"></ion-icon>
    <div class="footer-desc">
      <p class="footer-temp">{feels_like}&#176;C</p>
      <p class="footer-mini-desc">Feels like</p>
    </div>
  </div>

  <div class="humidity-section">
    <ion-icon class="water-outline" name="water-outline"></ion-icon>
    <div class="footer-desc">
      <p class="footer-temp">{humidity}%</p>
      <p class="footer-mini-desc">Humidity</p>
    </div>
  </div>
</div>
"#,
        id = escape(&current.condition_id),
        temp = kelvin_to_celsius(current.temp),
        description = escape(&title_case(&current.description)),
        city = escape(&city.city_name),
        country = escape(&city.country),
        feels_like = kelvin_to_celsius(current.feels_like),
        humidity = current.humidity,
    )
}

/// Markup for one upcoming-day panel.
pub fn mini_panel_html(sample: &DailySample) -> String {
    format!(
        r#"
<div class="mini fade-in">
  <span class="title-mini">{day}</span>
  <div><i class="icon-mini wi wi-owm-{id}"></i></div>
  <h2 class="temp-mini">
    <span class="temp-num-mini">{temp}</span>&#176;C
  </h2>
</div>
"#,
        day = weekday_label(sample.time_stamp),
        id = escape(&sample.condition_id),
        temp = kelvin_to_celsius(sample.temp),
    )
}
