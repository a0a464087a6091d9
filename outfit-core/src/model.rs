use std::{fmt, str::FromStr};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Gender {
    #[default]
    Male,
    Female,
    Neutral,
}

impl Gender {
    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Male => "Male",
            Gender::Female => "Female",
            Gender::Neutral => "Neutral",
        }
    }

    pub const fn all() -> &'static [Gender] {
        &[Gender::Male, Gender::Female, Gender::Neutral]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Style {
    #[default]
    Minimalist,
    Sporty,
    Business,
    Streetwear,
    Sweet,
}

impl Style {
    pub fn as_str(&self) -> &'static str {
        match self {
            Style::Minimalist => "Minimalist",
            Style::Sporty => "Sporty",
            Style::Business => "Business",
            Style::Streetwear => "Streetwear",
            Style::Sweet => "Sweet",
        }
    }

    pub const fn all() -> &'static [Style] {
        &[
            Style::Minimalist,
            Style::Sporty,
            Style::Business,
            Style::Streetwear,
            Style::Sweet,
        ]
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for Style {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Gender {
    type Err = anyhow::Error;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Gender::all()
            .iter()
            .copied()
            .find(|g| g.as_str().eq_ignore_ascii_case(value.trim()))
            .ok_or_else(|| {
                anyhow::anyhow!("Unknown gender '{value}'. Supported: Male, Female, Neutral.")
            })
    }
}

impl FromStr for Style {
    type Err = anyhow::Error;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Style::all()
            .iter()
            .copied()
            .find(|s| s.as_str().eq_ignore_ascii_case(value.trim()))
            .ok_or_else(|| {
                anyhow::anyhow!(
                    "Unknown style '{value}'. Supported: Minimalist, Sporty, Business, Streetwear, Sweet."
                )
            })
    }
}

/// Personal preferences that steer outfit matching. Session-scoped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct UserSettings {
    pub gender: Gender,
    pub style: Style,
}

/// Weather label attached to a forecast day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Condition {
    Snow,
    Clouds,
    Clear,
    Sunny,
    Rain,
    Thunderstorm,
}

impl Condition {
    pub fn as_str(&self) -> &'static str {
        match self {
            Condition::Snow => "Snow",
            Condition::Clouds => "Clouds",
            Condition::Clear => "Clear",
            Condition::Sunny => "Sunny",
            Condition::Rain => "Rain",
            Condition::Thunderstorm => "Thunderstorm",
        }
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyForecast {
    pub date: NaiveDate,
    pub min_temp_c: i32,
    pub max_temp_c: i32,
    /// Rounded midpoint of the unrounded min/max pair.
    pub avg_temp_c: i32,
    pub weather: Condition,
}

/// One complete 7-day forecast for a single city query. Index 0 is today.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherSnapshot {
    pub city: String,
    /// Country code, or `"?"` when the city is not in the known table.
    pub country: String,
    pub forecast: Vec<DailyForecast>,
}

impl WeatherSnapshot {
    pub fn today(&self) -> Option<&DailyForecast> {
        self.forecast.first()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageCatalogEntry {
    pub id: String,
    #[serde(rename = "imageUrl")]
    pub image_url: String,
    pub description: String,
    /// Free-text tags, e.g. "female sporty outfit".
    #[serde(rename = "imageHint")]
    pub image_hint: String,
}

/// Input handed to a keyword generator.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct KeywordRequest {
    pub temperature: f64,
    pub gender: Gender,
    pub style: Style,
}

/// Output of a keyword generator: a single search phrase.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutfitKeywords {
    pub keywords: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gender_and_style_parse_case_insensitively() {
        assert_eq!("female".parse::<Gender>().unwrap(), Gender::Female);
        assert_eq!(" STREETWEAR ".parse::<Style>().unwrap(), Style::Streetwear);
    }

    #[test]
    fn unknown_style_error() {
        let err = "gothic".parse::<Style>().unwrap_err();
        assert!(err.to_string().contains("Unknown style"));
    }

    #[test]
    fn default_settings_are_male_minimalist() {
        let settings = UserSettings::default();
        assert_eq!(settings.gender, Gender::Male);
        assert_eq!(settings.style, Style::Minimalist);
    }

    #[test]
    fn catalog_entry_uses_camel_case_keys() {
        let entry: ImageCatalogEntry = serde_json::from_str(
            r#"{"id":"1","imageUrl":"https://x/1.jpg","description":"d","imageHint":"male business"}"#,
        )
        .unwrap();
        assert_eq!(entry.image_hint, "male business");
    }
}
