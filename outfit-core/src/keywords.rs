//! Outfit keyword derivation on top of a [`KeywordGenerator`].

use anyhow::{Result, anyhow};

use crate::{
    bucket::Bucket,
    error::DashboardError,
    generator::KeywordGenerator,
    model::{KeywordRequest, OutfitKeywords},
};

/// Instruction template sent to text-generation backends.
pub fn prompt(request: &KeywordRequest) -> String {
    let ranges = Bucket::all()
        .iter()
        .map(|b| format!("  {}: {}: {}", b, b.range_label(), b.garments().join(", ")))
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        r#"You are an AI assistant designed to generate search keywords for outfit images based on the weather, gender, and style preferences.

Based on the temperature, select keywords related to clothing appropriate for that weather. Combine the clothing keywords with the specified gender and style to form a search query suitable for finding outfit images.

Here are the temperature ranges and keywords:
{ranges}

Temperature: {temperature}
Gender: {gender}
Style: {style}

Generate the keywords by combining the temperature-based clothing, gender, and style using the following format: "[Clothing] [Gender] [Style] Outfit". Do not include any preamble or postamble text, only the keywords.

Respond with a JSON object of the form {{"keywords": "..."}}."#,
        temperature = request.temperature,
        gender = request.gender,
        style = request.style,
    )
}

/// Ask `generator` for a search phrase.
///
/// The phrase is handed back exactly as generated. Only the request is
/// checked here, each backend checks the shape of its own reply.
pub async fn derive_keywords(
    generator: &dyn KeywordGenerator,
    request: &KeywordRequest,
) -> Result<OutfitKeywords, DashboardError> {
    validate_request(request).map_err(|e| DashboardError::external(&e))?;

    let output = generator.generate(request).await.map_err(|e| {
        tracing::warn!(generator = generator.name(), error = %format!("{e:#}"), "keyword generation failed");
        DashboardError::external(&e)
    })?;

    tracing::debug!(keywords = %output.keywords, "derived outfit keywords");
    Ok(output)
}

fn validate_request(request: &KeywordRequest) -> Result<()> {
    if !request.temperature.is_finite() {
        return Err(anyhow!("Temperature must be a finite number, got {}", request.temperature));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::offline::OfflineGenerator;
    use crate::model::{Gender, Style};
    use async_trait::async_trait;

    #[derive(Debug)]
    struct Canned(&'static str);

    #[async_trait]
    impl KeywordGenerator for Canned {
        fn name(&self) -> &'static str {
            "canned"
        }

        async fn generate(&self, _request: &KeywordRequest) -> Result<OutfitKeywords> {
            Ok(OutfitKeywords { keywords: self.0.to_string() })
        }
    }

    #[derive(Debug)]
    struct Broken;

    #[async_trait]
    impl KeywordGenerator for Broken {
        fn name(&self) -> &'static str {
            "broken"
        }

        async fn generate(&self, _request: &KeywordRequest) -> Result<OutfitKeywords> {
            Err(anyhow!("connection refused"))
        }
    }

    fn request(temperature: f64) -> KeywordRequest {
        KeywordRequest { temperature, gender: Gender::Female, style: Style::Sporty }
    }

    #[test]
    fn prompt_carries_inputs_and_every_bucket() {
        let text = prompt(&request(14.0));
        assert!(text.contains("Temperature: 14"));
        assert!(text.contains("Gender: Female"));
        assert!(text.contains("Style: Sporty"));
        assert!(text.contains("Cool: 10°C ≤ T < 18°C: Jacket, Hoodie, Knitwear"));
        assert!(text.contains("Hot: T ≥ 28°C: Tank top, Shorts, Lightweight material"));
        assert!(text.contains(r#"{"keywords": "..."}"#));
    }

    #[tokio::test]
    async fn output_passes_through_untouched() {
        let out = derive_keywords(&Canned("  Hoodie Female Sporty Outfit \n"), &request(14.0))
            .await
            .unwrap();
        assert_eq!(out.keywords, "  Hoodie Female Sporty Outfit \n");
    }

    #[tokio::test]
    async fn chatty_multiline_output_is_still_accepted() {
        let out = derive_keywords(&Canned("Hoodie Female Sporty Outfit\n(hope this helps)"), &request(14.0))
            .await
            .unwrap();
        assert_eq!(out.keywords, "Hoodie Female Sporty Outfit\n(hope this helps)");

        let out = derive_keywords(&Canned(""), &request(14.0)).await.unwrap();
        assert_eq!(out.keywords, "");
    }

    #[tokio::test]
    async fn non_finite_temperature_is_rejected() {
        let err = derive_keywords(&OfflineGenerator, &request(f64::NAN)).await.unwrap_err();
        assert!(matches!(err, DashboardError::ExternalService(_)));
    }

    #[tokio::test]
    async fn generator_failure_maps_to_service_error() {
        let err = derive_keywords(&Broken, &request(20.0)).await.unwrap_err();
        assert_eq!(
            err,
            DashboardError::ExternalService("connection refused".to_string())
        );
    }
}
