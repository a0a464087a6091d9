use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand};
use inquire::{Password, Text};
use outfit_core::{
    Action, Config, Dashboard, DashboardState, Gender, GeneratorId, ImageCatalog,
    LocationOutcome, MockWeatherSource, Style, UserSettings,
    generator::{default_generator_from_config, openai},
};

use crate::{interactive, render};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "outfit", version, about = "Weather-driven outfit suggestions")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Configure credentials for a keyword generator.
    Configure {
        /// Generator short name, e.g. "openai" or "offline".
        generator: String,
    },

    /// Print today's suggestion and the week ahead for a city.
    Show {
        /// City name; defaults to the configured fallback city.
        city: Option<String>,

        #[arg(long, default_value = "Male")]
        gender: Gender,

        #[arg(long, default_value = "Minimalist")]
        style: Style,
    },

    /// Browse suggestions interactively.
    Dashboard {
        /// Start with this city instead of the fallback city.
        #[arg(long)]
        city: Option<String>,
    },

    /// List catalogue images matching a gender and style.
    Outfits {
        #[arg(long)]
        gender: Gender,

        #[arg(long)]
        style: Style,
    },
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        match self.command {
            Command::Configure { generator } => configure(&generator),
            Command::Show { city, gender, style } => {
                let config = Config::load()?;
                let mut dashboard = build_dashboard(&config, UserSettings { gender, style })?;
                match city {
                    Some(city) => dashboard.dispatch(Action::CitySearched(city)),
                    None => dashboard.start(LocationOutcome::Unavailable, &config.dashboard.fallback_city),
                }
                dashboard.settle().await;

                for notice in dashboard.take_notices() {
                    eprintln!("{}", render::notice(&notice));
                }
                println!("{}", render::dashboard(dashboard.state()));
                Ok(())
            }
            Command::Dashboard { city } => {
                let config = Config::load()?;
                let mut dashboard = build_dashboard(&config, UserSettings::default())?;
                match city {
                    Some(city) => dashboard.dispatch(Action::CitySearched(city)),
                    None => dashboard.start(LocationOutcome::Unavailable, &config.dashboard.fallback_city),
                }
                interactive::run(&mut dashboard).await
            }
            Command::Outfits { gender, style } => {
                let config = Config::load()?;
                let catalog = load_catalog(&config)?;
                for entry in catalog.match_outfits(gender, style) {
                    println!("{}", render::catalog_entry(&entry));
                }
                Ok(())
            }
        }
    }
}

fn configure(generator: &str) -> anyhow::Result<()> {
    let id = GeneratorId::try_from(generator)?;
    let mut config = Config::load()?;

    if id.needs_api_key() {
        if config.is_generator_configured(id) {
            println!("'{id}' already has an API key. Leave the prompt empty to keep it.");
        }
        let api_key = Password::new(&format!("API key for {id}:"))
            .without_confirmation()
            .prompt()
            .context("Failed to read API key")?;
        let api_key = choose_api_key(id, &api_key, config.generator_api_key(id))?;
        config.upsert_generator_api_key(id, api_key);

        let base_url = Text::new("Base URL:")
            .with_default(openai::DEFAULT_BASE_URL)
            .prompt()
            .context("Failed to read base URL")?;
        let model = Text::new("Model:")
            .with_default(openai::DEFAULT_MODEL)
            .prompt()
            .context("Failed to read model name")?;

        if let Some(settings) = config.generators.get_mut(id.as_str()) {
            settings.base_url = Some(base_url);
            settings.model = Some(model);
        }
    }

    config.set_default_generator(id);
    config.save()?;

    println!(
        "Saved. '{id}' is now the default generator ({}).",
        Config::config_file_path()?.display()
    );
    Ok(())
}

/// Empty input keeps the stored key.
fn choose_api_key(id: GeneratorId, entered: &str, existing: Option<&str>) -> anyhow::Result<String> {
    match (entered.trim(), existing) {
        ("", Some(existing)) => Ok(existing.to_string()),
        ("", None) => anyhow::bail!("An API key is required for generator '{id}'"),
        (entered, _) => Ok(entered.to_string()),
    }
}

fn load_catalog(config: &Config) -> anyhow::Result<ImageCatalog> {
    match &config.dashboard.catalog_path {
        Some(path) => ImageCatalog::load(path),
        None => ImageCatalog::builtin(),
    }
}

fn build_dashboard(config: &Config, settings: UserSettings) -> anyhow::Result<Dashboard> {
    let catalog = Arc::new(load_catalog(config)?);
    let generator = default_generator_from_config(config)?;
    let weather = if config.dashboard.simulated_latency {
        MockWeatherSource::new()
    } else {
        MockWeatherSource::instant()
    };

    tracing::debug!(generator = generator.name(), images = catalog.len(), "dashboard ready");

    Ok(Dashboard::new(
        DashboardState::new(catalog, settings),
        Arc::new(weather),
        Arc::from(generator),
    ))
}
