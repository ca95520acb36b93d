use std::sync::Arc;
use std::time::Duration;

use async_openai::{config::OpenAIConfig, Client};
use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use serde_json::{json, Value};

use crate::errors::UpstreamError;
use crate::models::domain::TextSource;

/// One chat-completion request.
#[derive(Clone, Debug, PartialEq)]
pub struct ChatPrompt {
    pub system: String,
    pub user: String,
    pub temperature: f32,
    pub max_tokens: u32,
}

impl ChatPrompt {
    pub fn new(system: impl Into<String>, user: impl Into<String>) -> Self {
        Self {
            system: system.into(),
            user: user.into(),
            temperature: 0.7,
            max_tokens: 4000,
        }
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }
}

/// A language model endpoint that drafts presentation text.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn complete(&self, model: &str, prompt: &ChatPrompt) -> Result<String, UpstreamError>;
}

pub struct OpenAiTextGenerator {
    client: Client<OpenAIConfig>,
}

impl OpenAiTextGenerator {
    pub fn new(api_key: &SecretString, api_base: Option<&str>) -> Self {
        let mut config = OpenAIConfig::new().with_api_key(api_key.expose_secret());
        if let Some(base) = api_base {
            config = config.with_api_base(base);
        }
        Self {
            client: Client::with_config(config),
        }
    }
}

#[async_trait]
impl TextGenerator for OpenAiTextGenerator {
    async fn complete(&self, model: &str, prompt: &ChatPrompt) -> Result<String, UpstreamError> {
        let request = json!({
            "model": model,
            "messages": [
                { "role": "system", "content": prompt.system },
                { "role": "user", "content": prompt.user }
            ],
            "temperature": prompt.temperature,
            "max_tokens": prompt.max_tokens
        });

        let response: Value = self
            .client
            .chat()
            .create_byot(request)
            .await
            .map_err(|e| UpstreamError::classify(&e.to_string()))?;

        response["choices"][0]["message"]["content"]
            .as_str()
            .map(str::to_string)
            .filter(|text| !text.trim().is_empty())
            .ok_or_else(|| UpstreamError::Other(format!("Model {} returned no content", model)))
    }
}

/// Tries each model in preference order until one answers.
///
/// Authentication and rate-limit failures stop the chain and are returned.
/// Any other failure, including a timeout, moves on to the next model. When
/// no generator is configured or every model failed, the result is
/// [`TextSource::Canned`] so the caller can substitute built-in content.
#[derive(Clone)]
pub struct ModelChain {
    generator: Option<Arc<dyn TextGenerator>>,
    models: Vec<String>,
    timeout: Duration,
}

impl ModelChain {
    pub fn new(generator: Option<Arc<dyn TextGenerator>>, models: Vec<String>, timeout: Duration) -> Self {
        Self {
            generator,
            models,
            timeout,
        }
    }

    pub fn is_configured(&self) -> bool {
        self.generator.is_some() && !self.models.is_empty()
    }

    pub async fn source(&self, prompt: &ChatPrompt) -> Result<TextSource, UpstreamError> {
        let generator = match &self.generator {
            Some(generator) => generator,
            None => {
                log::info!("No text generation credentials configured, using built-in content");
                return Ok(TextSource::Canned {
                    reason: "text generation is not configured".to_string(),
                });
            }
        };

        let mut last_error = None;
        for model in &self.models {
            let attempt = tokio::time::timeout(self.timeout, generator.complete(model, prompt)).await;
            let result = match attempt {
                Ok(result) => result,
                Err(_) => Err(UpstreamError::Timeout(format!(
                    "{} did not answer within {}s",
                    model,
                    self.timeout.as_secs()
                ))),
            };

            match result {
                Ok(text) => {
                    log::info!("Drafted presentation text with {}", model);
                    return Ok(TextSource::Generated {
                        model: model.clone(),
                        text,
                    });
                }
                Err(e) if e.is_fatal() => {
                    log::warn!("Model {} failed, not retrying: {}", model, e);
                    return Err(e);
                }
                Err(e) => {
                    log::warn!("Model {} failed, trying next: {}", model, e);
                    last_error = Some(e);
                }
            }
        }

        let reason = match last_error {
            Some(e) => format!("all models failed, last error: {}", e),
            None => "no models configured".to_string(),
        };
        log::warn!("Text generation exhausted: {}", reason);
        Ok(TextSource::Canned { reason })
    }
}
