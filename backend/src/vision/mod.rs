//! Vision/language model providers.
//!
//! The analyzer only ever talks to a [`VisionProvider`]; which one backs it is
//! picked from configuration at startup.

mod fake;
mod openai;

pub use fake::FakeProvider;
pub use openai::OpenAiProvider;

use crate::config::{AppConfig, ProviderKind};
use async_trait::async_trait;
use std::fmt;
use std::sync::Arc;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("API request failed: {0}")]
    RequestFailed(String),

    #[error("API returned error: {status} - {message}")]
    ApiError { status: u16, message: String },

    #[error("Failed to parse response: {0}")]
    ParseError(String),

    #[error("Model returned no content")]
    EmptyResponse,
}

/// One prompt plus zero or more images, sent as a single user message.
#[derive(Debug, Clone, PartialEq)]
pub struct VisionRequest {
    pub prompt: String,
    /// `data:` URLs.
    pub images: Vec<String>,
    pub max_tokens: u32,
    pub temperature: f32,
}

#[async_trait]
pub trait VisionProvider: Send + Sync + fmt::Debug {
    /// Sends the request and returns the model's text reply.
    async fn complete(&self, request: &VisionRequest) -> Result<String, ProviderError>;

    fn provider_name(&self) -> &'static str;

    fn model_name(&self) -> &str;
}

/// Builds the configured provider. `None` means the OpenAI provider was chosen
/// but no API key is set; the analyze endpoint reports that per request.
pub fn create_provider(config: &AppConfig) -> Result<Option<Arc<dyn VisionProvider>>, ProviderError> {
    match config.provider {
        ProviderKind::Fake => Ok(Some(Arc::new(FakeProvider::with_demo_responses()))),
        ProviderKind::OpenAi => match &config.openai_api_key {
            Some(api_key) => {
                let provider = OpenAiProvider::new(
                    api_key.clone(),
                    config.openai_model.clone(),
                    config.openai_base_url.clone(),
                    config.openai_timeout,
                )?;
                Ok(Some(Arc::new(provider)))
            }
            None => Ok(None),
        },
    }
}
