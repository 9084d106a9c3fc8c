//! Picks one forecast record per upcoming day.

use chrono::{DateTime, Datelike};

use crate::model::{DailySample, ForecastRecord};

pub const MAX_DAYS: usize = 4;

/// Day-of-month of a Unix timestamp, in UTC like the provider's `dt_txt`.
///
/// Only the day-of-month is compared, so two records exactly one month apart
/// look like the same day. The provider never returns more than 5 days.
fn day_of_month(ts: i64) -> Option<u32> {
    DateTime::from_timestamp(ts, 0).map(|dt| dt.day())
}

/// Returns the first record of each day after the day of `current_ts`,
/// in series order, at most [`MAX_DAYS`] of them.
///
/// Each round drops every record sharing the reference day; the head of
/// what is left becomes the next sample and the new reference.
pub fn sample_days(series: &[ForecastRecord], current_ts: i64) -> Vec<DailySample> {
    let mut samples = Vec::with_capacity(MAX_DAYS);
    let mut remainder: Vec<&ForecastRecord> = series.iter().collect();
    let mut reference = day_of_month(current_ts);

    while samples.len() < MAX_DAYS {
        remainder.retain(|r| day_of_month(r.dt) != reference);

        let Some(next) = remainder.first() else {
            break;
        };

        samples.push(DailySample::from(*next));
        reference = day_of_month(next.dt);
    }

    samples
}
