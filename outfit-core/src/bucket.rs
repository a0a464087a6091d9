//! Temperature buckets shared by forecast synthesis and keyword derivation.

use std::fmt;

use crate::model::Condition;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Bucket {
    Cold,
    Cool,
    Comfortable,
    Warm,
    Hot,
}

impl Bucket {
    pub const fn all() -> &'static [Bucket] {
        &[
            Bucket::Cold,
            Bucket::Cool,
            Bucket::Comfortable,
            Bucket::Warm,
            Bucket::Hot,
        ]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Bucket::Cold => "Cold",
            Bucket::Cool => "Cool",
            Bucket::Comfortable => "Comfortable",
            Bucket::Warm => "Warm",
            Bucket::Hot => "Hot",
        }
    }

    /// Climate band picked by a synthesis seed.
    pub fn from_seed(seed: u64) -> Self {
        match seed % 5 {
            0 => Bucket::Cold,
            1 => Bucket::Cool,
            2 => Bucket::Comfortable,
            3 => Bucket::Warm,
            _ => Bucket::Hot,
        }
    }

    /// Clothing category for a temperature in °C.
    pub fn from_temperature(celsius: f64) -> Self {
        if celsius < 10.0 {
            Bucket::Cold
        } else if celsius < 18.0 {
            Bucket::Cool
        } else if celsius < 24.0 {
            Bucket::Comfortable
        } else if celsius < 28.0 {
            Bucket::Warm
        } else {
            Bucket::Hot
        }
    }

    /// Base `(min, max)` temperatures in °C before jitter.
    pub fn base_range(&self) -> (f64, f64) {
        match self {
            Bucket::Cold => (-2.0, 8.0),
            Bucket::Cool => (8.0, 16.0),
            Bucket::Comfortable => (17.0, 23.0),
            Bucket::Warm => (23.0, 27.0),
            Bucket::Hot => (28.0, 35.0),
        }
    }

    pub fn condition(&self) -> Condition {
        match self {
            Bucket::Cold => Condition::Snow,
            Bucket::Cool => Condition::Clouds,
            Bucket::Comfortable | Bucket::Warm => Condition::Clear,
            Bucket::Hot => Condition::Sunny,
        }
    }

    pub fn garments(&self) -> [&'static str; 3] {
        match self {
            Bucket::Cold => ["Down jacket", "Coat", "Thermal wear"],
            Bucket::Cool => ["Jacket", "Hoodie", "Knitwear"],
            Bucket::Comfortable => ["Long sleeve shirt", "Light outerwear", "Jeans"],
            Bucket::Warm => ["Short sleeve T-shirt", "Shorts", "Light shirt"],
            Bucket::Hot => ["Tank top", "Shorts", "Lightweight material"],
        }
    }

    /// Human-readable threshold, e.g. `10°C ≤ T < 18°C`.
    pub fn range_label(&self) -> &'static str {
        match self {
            Bucket::Cold => "T < 10°C",
            Bucket::Cool => "10°C ≤ T < 18°C",
            Bucket::Comfortable => "18°C ≤ T < 24°C",
            Bucket::Warm => "24°C ≤ T < 28°C",
            Bucket::Hot => "T ≥ 28°C",
        }
    }
}

impl fmt::Display for Bucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
