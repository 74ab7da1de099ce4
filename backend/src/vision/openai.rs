//! OpenAI chat-completions provider.

use super::{ProviderError, VisionProvider, VisionRequest};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Debug)]
pub struct OpenAiProvider {
    api_key: String,
    model: String,
    base_url: String,
    client: reqwest::Client,
}

impl OpenAiProvider {
    pub fn new(
        api_key: String,
        model: String,
        base_url: String,
        timeout: Duration,
    ) -> Result<Self, ProviderError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ProviderError::RequestFailed(e.to_string()))?;

        Ok(Self {
            api_key,
            model,
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        })
    }

    fn endpoint(&self) -> String {
        format!("{}/chat/completions", self.base_url)
    }
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    max_tokens: u32,
    temperature: f32,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: Vec<ContentPart<'a>>,
}

#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum ContentPart<'a> {
    Text { text: &'a str },
    ImageUrl { image_url: ImageUrl<'a> },
}

#[derive(Debug, Serialize)]
struct ImageUrl<'a> {
    url: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatReply,
}

#[derive(Debug, Deserialize)]
struct ChatReply {
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct OpenAiErrorResponse {
    error: OpenAiApiError,
}

#[derive(Debug, Deserialize)]
struct OpenAiApiError {
    message: String,
}

fn build_chat_request<'a>(model: &'a str, request: &'a VisionRequest) -> ChatRequest<'a> {
    let mut content = vec![ContentPart::Text {
        text: &request.prompt,
    }];
    content.extend(request.images.iter().map(|url| ContentPart::ImageUrl {
        image_url: ImageUrl { url },
    }));

    ChatRequest {
        model,
        messages: vec![ChatMessage {
            role: "user",
            content,
        }],
        max_tokens: request.max_tokens,
        temperature: request.temperature,
    }
}

#[async_trait]
impl VisionProvider for OpenAiProvider {
    async fn complete(&self, request: &VisionRequest) -> Result<String, ProviderError> {
        let body = build_chat_request(&self.model, request);

        log::info!(
            "Calling {} with {} images",
            self.model,
            request.images.len()
        );

        let response = self
            .client
            .post(self.endpoint())
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| ProviderError::RequestFailed(e.to_string()))?;

        let status = response.status().as_u16();
        let text = response
            .text()
            .await
            .map_err(|e| ProviderError::RequestFailed(e.to_string()))?;

        if !(200..300).contains(&status) {
            let message = serde_json::from_str::<OpenAiErrorResponse>(&text)
                .map(|e| e.error.message)
                .unwrap_or(text);
            return Err(ProviderError::ApiError { status, message });
        }

        let reply: ChatResponse =
            serde_json::from_str(&text).map_err(|e| ProviderError::ParseError(e.to_string()))?;

        reply
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .filter(|content| !content.trim().is_empty())
            .ok_or(ProviderError::EmptyResponse)
    }

    fn provider_name(&self) -> &'static str {
        "openai"
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_text_then_images() {
        let request = VisionRequest {
            prompt: "What is in the fridge?".into(),
            images: vec!["data:image/png;base64,AAAA".into()],
            max_tokens: 1000,
            temperature: 0.1,
        };

        let json = serde_json::to_value(build_chat_request("gpt-4o-mini", &request)).unwrap();
        let content = &json["messages"][0]["content"];

        assert_eq!(json["model"], "gpt-4o-mini");
        assert_eq!(json["max_tokens"], 1000);
        assert_eq!(json["messages"][0]["role"], "user");
        assert_eq!(content[0]["type"], "text");
        assert_eq!(content[0]["text"], "What is in the fridge?");
        assert_eq!(content[1]["type"], "image_url");
        assert_eq!(content[1]["image_url"]["url"], "data:image/png;base64,AAAA");
    }

    #[test]
    fn strips_trailing_slash_from_base_url() {
        let provider = OpenAiProvider::new(
            "sk-test".into(),
            "gpt-4o-mini".into(),
            "http://localhost:1234/v1/".into(),
            Duration::from_secs(5),
        )
        .unwrap();

        assert_eq!(provider.endpoint(), "http://localhost:1234/v1/chat/completions");
    }
}
