//! Fake provider for tests and offline runs.
//!
//! Replies are matched by prompt substring; every request is recorded so tests
//! can inspect what would have been sent.

use super::{ProviderError, VisionProvider, VisionRequest};
use async_trait::async_trait;
use std::sync::RwLock;

#[derive(Debug, Default)]
pub struct FakeProvider {
    /// (prompt substring, reply), checked in insertion order.
    responses: RwLock<Vec<(String, Result<String, String>)>>,
    requests: RwLock<Vec<VisionRequest>>,
}

impl FakeProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_response(self, prompt_contains: &str, response: &str) -> Self {
        self.push(prompt_contains, Ok(response.to_string()));
        self
    }

    /// Makes prompts containing `prompt_contains` fail with a request error.
    #[cfg(test)]
    pub fn with_failure(self, prompt_contains: &str, message: &str) -> Self {
        self.push(prompt_contains, Err(message.to_string()));
        self
    }

    /// Canned pantry used when `VISION_PROVIDER=fake`.
    pub fn with_demo_responses() -> Self {
        Self::new()
            .with_response(
                "identify all cooking ingredients",
                r#"[
                    {"name": "fresh tomatoes", "confidence": 0.94},
                    {"name": "mozzarella", "confidence": 0.81},
                    {"name": "basil", "confidence": 0.67}
                ]"#,
            )
            .with_response(
                "Generate 3 different recipes",
                r#"[
                    {"title": "Caprese Salad", "usedIngredients": ["fresh tomatoes", "mozzarella", "basil"],
                     "instructions": ["Slice tomatoes and mozzarella", "Layer with basil", "Season and drizzle with oil"],
                     "difficulty": "easy", "timeMinutes": 10},
                    {"title": "Tomato Basil Bruschetta", "usedIngredients": ["fresh tomatoes", "basil"],
                     "instructions": ["Dice tomatoes", "Mix with chopped basil", "Spoon onto toasted bread"],
                     "difficulty": "easy", "timeMinutes": 15},
                    {"title": "Margherita Pizza", "usedIngredients": ["fresh tomatoes", "mozzarella", "basil"],
                     "instructions": ["Stretch the dough", "Top with tomato and mozzarella", "Bake hot", "Finish with basil"],
                     "difficulty": "medium", "timeMinutes": 45}
                ]"#,
            )
    }

    #[cfg(test)]
    pub fn requests(&self) -> Vec<VisionRequest> {
        self.requests
            .read()
            .map(|requests| requests.clone())
            .unwrap_or_default()
    }

    fn push(&self, prompt_contains: &str, reply: Result<String, String>) {
        if let Ok(mut responses) = self.responses.write() {
            responses.push((prompt_contains.to_lowercase(), reply));
        }
    }
}

#[async_trait]
impl VisionProvider for FakeProvider {
    async fn complete(&self, request: &VisionRequest) -> Result<String, ProviderError> {
        if let Ok(mut requests) = self.requests.write() {
            requests.push(request.clone());
        }

        let prompt = request.prompt.to_lowercase();
        let responses = self
            .responses
            .read()
            .map_err(|_| ProviderError::RequestFailed("FakeProvider lock poisoned".to_string()))?;

        let reply = responses
            .iter()
            .find(|(pattern, _)| prompt.contains(pattern.as_str()))
            .map(|(_, reply)| reply.clone());

        match reply {
            Some(Ok(text)) => Ok(text),
            Some(Err(message)) => Err(ProviderError::RequestFailed(message)),
            None => Err(ProviderError::RequestFailed(format!(
                "FakeProvider: no response configured for prompt: {}",
                request.prompt.chars().take(100).collect::<String>()
            ))),
        }
    }

    fn provider_name(&self) -> &'static str {
        "fake"
    }

    fn model_name(&self) -> &str {
        "fake-model"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(prompt: &str) -> VisionRequest {
        VisionRequest {
            prompt: prompt.to_string(),
            images: Vec::new(),
            max_tokens: 10,
            temperature: 0.0,
        }
    }

    #[actix_web::test]
    async fn matches_case_insensitively_and_records() {
        let provider = FakeProvider::new().with_response("HELLO", "world");

        let reply = provider.complete(&request("hello there")).await.unwrap();

        assert_eq!(reply, "world");
        assert_eq!(provider.requests().len(), 1);
    }

    #[actix_web::test]
    async fn unmatched_prompt_fails() {
        let provider = FakeProvider::new();
        assert!(provider.complete(&request("anything")).await.is_err());
    }

    #[actix_web::test]
    async fn configured_failure_is_returned() {
        let provider = FakeProvider::new().with_failure("recipes", "quota exceeded");
        let err = provider.complete(&request("Generate recipes")).await.unwrap_err();
        assert_eq!(err.to_string(), "API request failed: quota exceeded");
    }
}
