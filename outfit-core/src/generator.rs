use crate::{
    Config, KeywordRequest, OutfitKeywords,
    generator::{offline::OfflineGenerator, openai::OpenAiGenerator},
};
use async_trait::async_trait;
use std::{convert::TryFrom, fmt::Debug};

pub mod offline;
pub mod openai;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GeneratorId {
    OpenAi,
    Offline,
}

impl GeneratorId {
    pub fn as_str(&self) -> &'static str {
        match self {
            GeneratorId::OpenAi => "openai",
            GeneratorId::Offline => "offline",
        }
    }

    pub const fn all() -> &'static [GeneratorId] {
        &[GeneratorId::OpenAi, GeneratorId::Offline]
    }

    /// Whether the backend needs an API key before it can be used.
    pub fn needs_api_key(&self) -> bool {
        matches!(self, GeneratorId::OpenAi)
    }
}

impl std::fmt::Display for GeneratorId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for GeneratorId {
    type Error = anyhow::Error;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let lower = value.to_lowercase();

        match lower.as_str() {
            "openai" => Ok(GeneratorId::OpenAi),
            "offline" => Ok(GeneratorId::Offline),
            _ => Err(anyhow::anyhow!(
                "Unknown generator '{value}'. Supported generators: openai, offline."
            )),
        }
    }
}

/// Text-generation capability that turns a [`KeywordRequest`] into a search phrase.
#[async_trait]
pub trait KeywordGenerator: Send + Sync + Debug {
    fn name(&self) -> &'static str;

    async fn generate(&self, request: &KeywordRequest) -> anyhow::Result<OutfitKeywords>;
}

/// Construct a generator from config and explicit GeneratorId.
pub fn generator_from_config(
    id: GeneratorId,
    config: &Config,
) -> anyhow::Result<Box<dyn KeywordGenerator>> {
    let boxed: Box<dyn KeywordGenerator> = match id {
        GeneratorId::Offline => Box::new(OfflineGenerator),
        GeneratorId::OpenAi => {
            let settings = config.generator_config(id).ok_or_else(|| {
                anyhow::anyhow!(
                    "No API key configured for generator '{id}'.\n\
                         Hint: run `outfit configure {id}` and enter your API key."
                )
            })?;
            let generator = OpenAiGenerator::new(
                settings.api_key.clone(),
                settings.base_url.clone(),
                settings.model.clone(),
            );
            tracing::debug!(model = generator.model(), "using OpenAI-compatible generator");
            Box::new(generator)
        }
    };

    Ok(boxed)
}

/// Construct the default generator from config, using `default_generator` field.
pub fn default_generator_from_config(config: &Config) -> anyhow::Result<Box<dyn KeywordGenerator>> {
    let id = config.default_generator_id()?;
    generator_from_config(id, config)
}
