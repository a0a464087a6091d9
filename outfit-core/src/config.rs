use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{
    collections::HashMap,
    fs,
    path::{Path, PathBuf},
};

use crate::generator::GeneratorId;

pub const DEFAULT_FALLBACK_CITY: &str = "Taipei";

/// Credentials and endpoint overrides for a single generator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneratorConfig {
    pub api_key: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
}

/// Dashboard behaviour.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    /// City shown when no location is available.
    pub fallback_city: String,
    /// JSON file replacing the built-in image catalogue.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub catalog_path: Option<PathBuf>,
    /// Delay mock forecasts like a real network call would.
    pub simulated_latency: bool,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            fallback_city: DEFAULT_FALLBACK_CITY.to_string(),
            catalog_path: None,
            simulated_latency: true,
        }
    }
}

/// Top-level configuration stored on disk.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Optional default generator id, e.g. "openai" or "offline".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_generator: Option<String>,

    /// Example TOML:
    /// [generators.openai]
    /// api_key = "..."
    /// model = "gpt-4o-mini"
    #[serde(default)]
    pub generators: HashMap<String, GeneratorConfig>,

    #[serde(default)]
    pub dashboard: DashboardConfig,
}

impl Config {
    /// Return the default generator; `offline` when none is configured.
    pub fn default_generator_id(&self) -> Result<GeneratorId> {
        match &self.default_generator {
            Some(s) => GeneratorId::try_from(s.as_str()),
            None => Ok(GeneratorId::Offline),
        }
    }

    pub fn generator_config(&self, id: GeneratorId) -> Option<&GeneratorConfig> {
        self.generators.get(id.as_str())
    }

    /// Store default generator as string.
    pub fn set_default_generator(&mut self, id: GeneratorId) {
        self.default_generator = Some(id.as_str().to_string());
    }

    /// Load config from disk, or return an empty default if it doesn't exist yet.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_file_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            // First run: no config file, return empty.
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let cfg: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(cfg)
    }

    /// Save config to disk, creating parent directories as needed.
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_file_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let toml =
            toml::to_string_pretty(self).context("Failed to serialize configuration to TOML")?;

        fs::write(path, toml)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "smart-threads", "outfit-cli")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }

    /// Convenience helper: set/replace a generator API key and optionally set default generator.
    pub fn upsert_generator_api_key(&mut self, generator_id: GeneratorId, api_key: String) {
        self.generators
            .entry(generator_id.as_str().to_string())
            .and_modify(|cfg| cfg.api_key = api_key.clone())
            .or_insert(GeneratorConfig { api_key, base_url: None, model: None });

        if self.default_generator.is_none() {
            self.default_generator = Some(generator_id.to_string());
        }
    }

    /// Returns API key for a generator, if present.
    pub fn generator_api_key(&self, generator_id: GeneratorId) -> Option<&str> {
        self.generators.get(generator_id.as_str()).map(|cfg| cfg.api_key.as_str())
    }

    pub fn is_generator_configured(&self, generator_id: GeneratorId) -> bool {
        !generator_id.needs_api_key() || self.generator_api_key(generator_id).is_some()
    }
}
