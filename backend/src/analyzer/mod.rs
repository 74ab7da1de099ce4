//! Turns uploaded photos into ingredients and recipes with two model calls.

mod upload;

pub use upload::UploadedImage;

use crate::vision::{ProviderError, VisionProvider, VisionRequest};
use serde::de::DeserializeOwned;
use shared::{AnalysisResult, Difficulty, Ingredient, Recipe};
use std::sync::Arc;

const INGREDIENTS_PROMPT: &str = "Analyze these images and identify all cooking ingredients you can see. \
Return a JSON array of objects with 'name' and 'confidence' fields. \
Only include ingredients that are clearly visible and identifiable. \
Be specific about the ingredient names (e.g., 'fresh tomatoes' not just 'tomatoes').";

const RECIPES_PROMPT_TEMPLATE: &str = "Based on these ingredients: {ingredients}

Generate 3 different recipes that can be made with these ingredients. For each recipe, return a JSON object with:
- title: Recipe name
- usedIngredients: Array of ingredients from the provided list that are used
- instructions: Array of step-by-step cooking instructions
- difficulty: \"easy\", \"medium\", or \"hard\"
- timeMinutes: Estimated cooking time in minutes

Return only a JSON array of 3 recipe objects, no other text.";

#[derive(Debug, thiserror::Error)]
pub enum AnalyzeError {
    #[error("Failed to analyze images: {0}")]
    Ingredients(#[source] ProviderError),
    #[error("Failed to generate recipes: {0}")]
    Recipes(#[source] ProviderError),
}

#[derive(Debug, Clone)]
pub struct ImageAnalyzer {
    provider: Arc<dyn VisionProvider>,
}

impl ImageAnalyzer {
    pub fn new(provider: Arc<dyn VisionProvider>) -> Self {
        Self { provider }
    }

    pub fn provider_name(&self) -> &'static str {
        self.provider.provider_name()
    }

    pub async fn analyze(&self, images: &[UploadedImage]) -> Result<AnalysisResult, AnalyzeError> {
        let ingredients = self.analyze_ingredients(images).await?;
        let recipes = self.generate_recipes(&ingredients).await?;
        Ok(AnalysisResult {
            ingredients,
            recipes,
        })
    }

    async fn analyze_ingredients(&self, images: &[UploadedImage]) -> Result<Vec<Ingredient>, AnalyzeError> {
        let request = VisionRequest {
            prompt: INGREDIENTS_PROMPT.to_string(),
            images: images.iter().map(UploadedImage::to_data_url).collect(),
            max_tokens: 1000,
            temperature: 0.1,
        };

        let names = images
            .iter()
            .map(|image| image.name.as_str())
            .collect::<Vec<_>>()
            .join(", ");
        log::info!(
            "Requesting ingredients from {} ({}) for {} images: {}",
            self.provider.provider_name(),
            self.provider.model_name(),
            images.len(),
            names
        );
        let reply = self
            .provider
            .complete(&request)
            .await
            .map_err(AnalyzeError::Ingredients)?;

        Ok(extract_json_array(&reply).unwrap_or_else(|err| {
            log::warn!("Failed to parse ingredients from model reply ({}): {}", err, reply);
            vec![Ingredient {
                name: "Unable to identify ingredients".to_string(),
                confidence: Some(0.1),
            }]
        }))
    }

    async fn generate_recipes(&self, ingredients: &[Ingredient]) -> Result<Vec<Recipe>, AnalyzeError> {
        let names = ingredients
            .iter()
            .map(|ingredient| ingredient.name.as_str())
            .collect::<Vec<_>>()
            .join(", ");
        let request = VisionRequest {
            prompt: RECIPES_PROMPT_TEMPLATE.replace("{ingredients}", &names),
            images: Vec::new(),
            max_tokens: 2000,
            temperature: 0.7,
        };

        let reply = self
            .provider
            .complete(&request)
            .await
            .map_err(AnalyzeError::Recipes)?;

        Ok(extract_json_array(&reply).unwrap_or_else(|err| {
            log::warn!("Failed to parse recipes from model reply ({}): {}", err, reply);
            vec![Recipe {
                title: "Unable to generate recipes".to_string(),
                used_ingredients: Vec::new(),
                instructions: vec!["Recipe generation failed".to_string()],
                difficulty: Difficulty::Easy,
                time_minutes: 0,
            }]
        }))
    }
}

/// Parses the first `[` .. last `]` span of a model reply, or the whole reply
/// when it has no such span.
pub fn extract_json_array<T: DeserializeOwned>(reply: &str) -> Result<Vec<T>, serde_json::Error> {
    match (reply.find('['), reply.rfind(']')) {
        (Some(start), Some(end)) if start < end => serde_json::from_str(&reply[start..=end]),
        _ => serde_json::from_str(reply),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vision::FakeProvider;

    fn image() -> UploadedImage {
        UploadedImage {
            name: "a.png".into(),
            image_type: shared::ImageType::Png,
            data: vec![0; 4],
        }
    }

    #[test]
    fn extracts_array_wrapped_in_prose() {
        let reply = "Sure! Here you go:\n```json\n[{\"name\": \"egg\", \"confidence\": 0.9}]\n```";
        let ingredients: Vec<Ingredient> = extract_json_array(reply).unwrap();
        assert_eq!(ingredients.len(), 1);
        assert_eq!(ingredients[0].name, "egg");
    }

    #[test]
    fn falls_back_to_whole_reply() {
        let items: Vec<u32> = extract_json_array(" [ ] ").unwrap();
        assert!(items.is_empty());
        assert!(extract_json_array::<u32>("no json here").is_err());
        assert!(extract_json_array::<u32>("] backwards [").is_err());
    }

    #[actix_web::test]
    async fn chains_ingredients_into_recipe_prompt() {
        let provider = Arc::new(FakeProvider::with_demo_responses());
        let analyzer = ImageAnalyzer::new(provider.clone());

        let result = analyzer.analyze(&[image(), image()]).await.unwrap();

        assert_eq!(result.ingredients.len(), 3);
        assert_eq!(result.recipes.len(), 3);

        let requests = provider.requests();
        assert_eq!(requests.len(), 2);
        assert_eq!(requests[0].images.len(), 2);
        assert!(requests[0].images[0].starts_with("data:image/png;base64,"));
        assert!(requests[1].images.is_empty());
        assert!(requests[1].prompt.contains("fresh tomatoes, mozzarella, basil"));
    }

    #[actix_web::test]
    async fn unparsable_replies_use_placeholders() {
        let provider = FakeProvider::new()
            .with_response("identify all cooking ingredients", "I see a fridge.")
            .with_response("Generate 3 different recipes", "Sorry, no recipes today.");
        let analyzer = ImageAnalyzer::new(Arc::new(provider));

        let result = analyzer.analyze(&[image()]).await.unwrap();

        assert_eq!(result.ingredients[0].name, "Unable to identify ingredients");
        assert_eq!(result.ingredients[0].confidence, Some(0.1));
        assert_eq!(result.recipes[0].title, "Unable to generate recipes");
        assert_eq!(result.recipes[0].instructions, vec!["Recipe generation failed"]);
    }

    #[actix_web::test]
    async fn loosely_typed_recipes_are_kept() {
        let provider = FakeProvider::new()
            .with_response("identify all cooking ingredients", r#"[{"name": "leek"}]"#)
            .with_response(
                "Generate 3 different recipes",
                r#"[{"title": "Leek Soup", "usedIngredients": null, "instructions": ["Simmer"], "difficulty": 2, "timeMinutes": "30"}]"#,
            );
        let analyzer = ImageAnalyzer::new(Arc::new(provider));

        let result = analyzer.analyze(&[image()]).await.unwrap();

        assert_eq!(result.recipes.len(), 1);
        assert_eq!(result.recipes[0].title, "Leek Soup");
        assert_eq!(result.recipes[0].difficulty, Difficulty::Easy);
        assert!(result.recipes[0].used_ingredients.is_empty());
        assert_eq!(result.recipes[0].time_minutes, 30);
    }

    #[actix_web::test]
    async fn provider_failures_are_errors() {
        let provider = FakeProvider::new().with_failure("identify", "connection reset");
        let analyzer = ImageAnalyzer::new(Arc::new(provider));

        let err = analyzer.analyze(&[image()]).await.unwrap_err();
        assert!(matches!(err, AnalyzeError::Ingredients(_)));
        assert_eq!(
            err.to_string(),
            "Failed to analyze images: API request failed: connection reset"
        );
    }
}
