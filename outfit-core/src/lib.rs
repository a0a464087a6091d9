//! Core library for the `outfit` dashboard.
//!
//! This crate defines:
//! - Deterministic mock forecast synthesis
//! - Outfit keyword derivation behind pluggable text generators
//! - Image catalogue matching with tiered fallback
//! - The dashboard controller (pure reducer plus async driver)
//! - Configuration & credentials handling
//!
//! It is used by `outfit-cli`, but can also be reused by other front ends.

pub mod bucket;
pub mod catalog;
pub mod config;
pub mod dashboard;
pub mod error;
pub mod forecast;
pub mod generator;
pub mod keywords;
pub mod model;

pub use bucket::Bucket;
pub use catalog::ImageCatalog;
pub use config::{Config, DashboardConfig, GeneratorConfig};
pub use dashboard::{Action, Dashboard, DashboardState, LocationOutcome, Notice, NoticeLevel, Phase};
pub use error::DashboardError;
pub use forecast::{MockWeatherSource, WeatherSource};
pub use generator::{GeneratorId, KeywordGenerator};
pub use model::{
    Condition, DailyForecast, Gender, ImageCatalogEntry, KeywordRequest, OutfitKeywords, Style,
    UserSettings, WeatherSnapshot,
};
