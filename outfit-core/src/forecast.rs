//! Deterministic mock forecast synthesis.
//!
//! Each city hashes to a fixed sequence of climate bands; only the jitter on
//! the band's base temperatures is random.

use std::{fmt::Debug, ops::Range, time::Duration};

use async_trait::async_trait;
use chrono::{Days, Local, NaiveDate};
use rand::Rng;

use crate::{
    bucket::Bucket,
    error::DashboardError,
    model::{DailyForecast, WeatherSnapshot},
};

pub const FORECAST_DAYS: u64 = 7;

/// Jitter applied to each base temperature is drawn from this range (°C).
pub const JITTER_C: Range<f64> = -2.0..2.0;

const SIMULATED_LATENCY_MS: Range<u64> = 500..1000;

const KNOWN_CITIES: &[(&str, &str, &str)] = &[
    ("taipei", "Taipei", "TW"),
    ("london", "London", "GB"),
    ("tokyo", "Tokyo", "JP"),
    ("new york", "New York", "US"),
    ("paris", "Paris", "FR"),
];

#[async_trait]
pub trait WeatherSource: Send + Sync + Debug {
    async fn forecast(&self, city: &str) -> Result<WeatherSnapshot, DashboardError>;
}

/// Offline source backed by [`synthesize`].
#[derive(Debug, Clone)]
pub struct MockWeatherSource {
    latency: Option<Range<u64>>,
}

impl MockWeatherSource {
    pub fn new() -> Self {
        Self { latency: Some(SIMULATED_LATENCY_MS) }
    }

    /// Skips the simulated network delay.
    pub fn instant() -> Self {
        Self { latency: None }
    }
}

impl Default for MockWeatherSource {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl WeatherSource for MockWeatherSource {
    async fn forecast(&self, city: &str) -> Result<WeatherSnapshot, DashboardError> {
        if let Some(range) = &self.latency {
            let delay_ms = rand::rng().random_range(range.clone());
            tracing::debug!(city, delay_ms, "simulating forecast latency");
            tokio::time::sleep(Duration::from_millis(delay_ms)).await;
        }

        let today = Local::now().date_naive();
        Ok(synthesize_random(city, today))
    }
}

fn synthesize_random(city: &str, today: NaiveDate) -> WeatherSnapshot {
    let mut rng = rand::rng();
    synthesize(city, today, || rng.random_range(JITTER_C))
}

/// Sum of the UTF-16 code units of the lower-cased city name.
pub fn city_hash(city: &str) -> u64 {
    city.to_lowercase().encode_utf16().map(u64::from).sum()
}

/// Build a 7-day snapshot for `city` starting at `today`.
///
/// `jitter` is called twice per day (min first, then max) and should return
/// values in [`JITTER_C`].
pub fn synthesize(city: &str, today: NaiveDate, mut jitter: impl FnMut() -> f64) -> WeatherSnapshot {
    let hash = city_hash(city);

    let forecast = (0..FORECAST_DAYS)
        .map(|offset| {
            let bucket = Bucket::from_seed(hash + offset);
            let date = today.checked_add_days(Days::new(offset)).unwrap_or(today);
            synthesize_day(bucket, date, jitter(), jitter())
        })
        .collect();

    let (city, country) = resolve_city(city);

    WeatherSnapshot { city, country, forecast }
}

fn synthesize_day(bucket: Bucket, date: NaiveDate, min_jitter: f64, max_jitter: f64) -> DailyForecast {
    let (base_min, base_max) = bucket.base_range();
    let mut min = base_min + min_jitter;
    let mut max = base_max + max_jitter;
    if min > max {
        std::mem::swap(&mut min, &mut max);
    }

    DailyForecast {
        date,
        min_temp_c: round_half_up(min),
        max_temp_c: round_half_up(max),
        avg_temp_c: round_half_up((min + max) / 2.0),
        weather: bucket.condition(),
    }
}

/// Round to the nearest integer, ties toward positive infinity.
pub fn round_half_up(value: f64) -> i32 {
    (value + 0.5).floor() as i32
}

/// Display name and country code for a city query.
pub fn resolve_city(query: &str) -> (String, String) {
    let normalized = query.to_lowercase();

    KNOWN_CITIES
        .iter()
        .find(|(key, _, _)| *key == normalized)
        .map(|(_, name, country)| (name.to_string(), country.to_string()))
        .unwrap_or_else(|| (capitalize(query), "?".to_string()))
}

fn capitalize(value: &str) -> String {
    let mut chars = value.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
