use anyhow::Result;
use async_trait::async_trait;

use crate::{
    bucket::Bucket,
    model::{KeywordRequest, OutfitKeywords},
};

use super::KeywordGenerator;

/// Deterministic local composer. Needs no network and no credentials.
#[derive(Debug, Clone, Copy, Default)]
pub struct OfflineGenerator;

#[async_trait]
impl KeywordGenerator for OfflineGenerator {
    fn name(&self) -> &'static str {
        "offline"
    }

    async fn generate(&self, request: &KeywordRequest) -> Result<OutfitKeywords> {
        let bucket = Bucket::from_temperature(request.temperature);
        let [clothing, ..] = bucket.garments();

        Ok(OutfitKeywords {
            keywords: format!("{clothing} {} {} Outfit", request.gender, request.style),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Gender, Style};

    #[tokio::test]
    async fn composes_clothing_gender_style() {
        let out = OfflineGenerator
            .generate(&KeywordRequest { temperature: 5.0, gender: Gender::Male, style: Style::Minimalist })
            .await
            .unwrap();
        assert_eq!(out.keywords, "Down jacket Male Minimalist Outfit");

        let out = OfflineGenerator
            .generate(&KeywordRequest { temperature: 31.0, gender: Gender::Neutral, style: Style::Streetwear })
            .await
            .unwrap();
        assert_eq!(out.keywords, "Tank top Neutral Streetwear Outfit");
    }
}
