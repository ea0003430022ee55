//! Client for OpenAI-compatible model APIs (Together, OpenRouter, vLLM, ...).
//! Speaks `/chat/completions` and `/images/generations`.

use super::http_client::build_model_client_with_timeout;
use super::scrub::sanitize_api_error;
use super::traits::ModelClient;
use super::types::{
    ChatMessage, CompletionRequest, CompletionResult, ImageRequest, ImageResult, ResponseFormat,
    TokenUsage,
};
use crate::error::LlmError;
use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

pub struct OpenAiCompatibleClient {
    pub(crate) name: String,
    pub(crate) base_url: String,
    api_key: Option<String>,
    /// Pre-computed `Authorization` header value.
    cached_auth: Option<String>,
    cached_chat_url: String,
    cached_images_url: String,
    client: Client,
}

impl OpenAiCompatibleClient {
    pub fn new(name: &str, base_url: &str, api_key: Option<&str>, timeout_secs: u64) -> Self {
        let base_url = base_url.trim_end_matches('/').to_string();
        let api_key = api_key.filter(|k| !k.is_empty()).map(ToString::to_string);

        Self {
            name: name.to_string(),
            cached_chat_url: format!("{base_url}/chat/completions"),
            cached_images_url: format!("{base_url}/images/generations"),
            cached_auth: api_key.as_ref().map(|k| format!("Bearer {k}")),
            api_key,
            base_url,
            client: build_model_client_with_timeout(timeout_secs),
        }
    }

    pub fn from_config(config: &crate::config::Config) -> Self {
        Self::new(
            "together",
            &config.api_url,
            config.api_key.as_deref(),
            config.request_timeout_secs,
        )
    }

    fn chat_completions_url(&self) -> &str {
        &self.cached_chat_url
    }

    fn images_url(&self) -> &str {
        &self.cached_images_url
    }

    fn known_secrets(&self) -> Vec<&str> {
        self.api_key.iter().map(String::as_str).collect()
    }

    async fn post_json<B: Serialize + Sync, R: DeserializeOwned>(
        &self,
        url: &str,
        model: &str,
        body: &B,
    ) -> Result<R, LlmError> {
        let Some(auth) = &self.cached_auth else {
            return Err(LlmError::MissingApiKey {
                provider: self.name.clone(),
            });
        };

        let response = self
            .client
            .post(url)
            .header(reqwest::header::AUTHORIZATION, auth)
            .json(body)
            .send()
            .await
            .map_err(|error| LlmError::Request {
                model: model.to_string(),
                message: sanitize_api_error(&error.to_string(), &self.known_secrets()),
            })?;

        let status = response.status();
        let text = response.text().await.map_err(|error| LlmError::Request {
            model: model.to_string(),
            message: sanitize_api_error(&error.to_string(), &self.known_secrets()),
        })?;

        if !status.is_success() {
            tracing::warn!(provider = %self.name, model, status = status.as_u16(), "model API returned an error");
            return Err(LlmError::Status {
                status: status.as_u16(),
                message: sanitize_api_error(&text, &self.known_secrets()),
            });
        }

        serde_json::from_str(&text).map_err(|error| LlmError::Decode {
            message: format!("{} response from {model}: {error}", self.name),
        })
    }
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_format: Option<&'a ResponseFormat>,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
    usage: Option<ChatUsage>,
    model: Option<String>,
}

/// Some providers omit one of the counts; a missing count reads as zero.
#[derive(Debug, Deserialize)]
struct ChatUsage {
    #[serde(default)]
    prompt_tokens: u64,
    #[serde(default)]
    completion_tokens: u64,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: Option<ResponseMessage>,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    #[serde(default)]
    content: Option<serde_json::Value>,
}

#[derive(Debug, Serialize)]
struct ImageGenerationRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    steps: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    n: Option<u32>,
}

#[derive(Debug, Deserialize)]
struct ImageGenerationResponse {
    #[serde(default)]
    data: Vec<ImageData>,
}

#[derive(Debug, Deserialize)]
struct ImageData {
    url: Option<String>,
    b64_json: Option<String>,
}

/// `choices[0].message.content`, which must be a JSON string.
fn extract_chat_text(response: &ChatResponse) -> Option<String> {
    let content = response.choices.first()?.message.as_ref()?.content.as_ref()?;
    content.as_str().map(ToString::to_string)
}

fn extract_image_urls(response: ImageGenerationResponse) -> Vec<String> {
    response
        .data
        .into_iter()
        .filter_map(|item| match (item.url, item.b64_json) {
            (Some(url), _) if !url.is_empty() => Some(url),
            (_, Some(b64)) if !b64.is_empty() => Some(format!("data:image/png;base64,{b64}")),
            _ => None,
        })
        .collect()
}

#[async_trait]
impl ModelClient for OpenAiCompatibleClient {
    fn name(&self) -> &str {
        &self.name
    }

    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResult, LlmError> {
        let body = ChatRequest {
            model: &request.model,
            messages: &request.messages,
            temperature: request.temperature,
            response_format: request.response_format.as_ref(),
        };
        tracing::debug!(
            provider = %self.name,
            model = %request.model,
            messages = request.messages.len(),
            structured = request.response_format.is_some(),
            "chat completion request"
        );

        let response: ChatResponse = self
            .post_json(self.chat_completions_url(), &request.model, &body)
            .await?;

        let text = extract_chat_text(&response).ok_or_else(|| LlmError::EmptyResponse {
            model: request.model.clone(),
        })?;

        Ok(CompletionResult {
            text,
            model: response.model,
            usage: response.usage.map(|usage| TokenUsage {
                prompt_tokens: usage.prompt_tokens,
                completion_tokens: usage.completion_tokens,
            }),
        })
    }

    async fn generate_image(&self, request: ImageRequest) -> Result<ImageResult, LlmError> {
        let body = ImageGenerationRequest {
            model: &request.model,
            prompt: &request.prompt,
            steps: request.steps,
            n: request.n,
        };
        tracing::debug!(provider = %self.name, model = %request.model, "image generation request");

        let response: ImageGenerationResponse = self
            .post_json(self.images_url(), &request.model, &body)
            .await?;

        let urls = extract_image_urls(response);
        if urls.is_empty() {
            return Err(LlmError::NoImage {
                model: request.model,
            });
        }
        Ok(ImageResult { urls })
    }
}
