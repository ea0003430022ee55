use super::catalog::SolutionKind;
use crate::config::ModelsConfig;
use crate::error::{LlmError, Result, WorkflowError};
use crate::llm::{ChatMessage, CompletionRequest, ImageRequest, ModelClient};
use crate::prompt::{DESCRIBE_IMAGE_INSTRUCTION, PromptBuilder};
use crate::workflows::{
    self, ChainResult, MATH_CHAIN_STEPS, OrchestratorResult, ParallelResult, RoutedPrompt,
    require_input,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// What the user submitted on a solution form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SolutionInput {
    pub text: String,
    /// Chat model override; only the basic chat demo reads it.
    #[serde(default)]
    pub model: Option<String>,
}

impl SolutionInput {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            model: None,
        }
    }
}

/// Result of one solution run, tagged by what it holds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "result", rename_all = "snake_case")]
pub enum SolutionOutput {
    Chat { model: String, text: String },
    Image { url: String },
    Description { text: String },
    /// The generated description and the image made from it.
    Variation { prompt: String, url: String },
    Chain(ChainResult),
    Routes(Vec<RoutedPrompt>),
    Parallel(ParallelResult),
    Orchestrator(OrchestratorResult),
}

/// Runs catalog entries against one shared model client. Prompt templates
/// are compiled once here and reused by every run.
#[derive(Clone)]
pub struct SolutionRunner {
    client: Arc<dyn ModelClient>,
    templates: Arc<PromptBuilder>,
    models: ModelsConfig,
}

impl SolutionRunner {
    pub fn new(
        client: Arc<dyn ModelClient>,
        models: ModelsConfig,
    ) -> std::result::Result<Self, WorkflowError> {
        Ok(Self {
            client,
            templates: Arc::new(PromptBuilder::new()?),
            models,
        })
    }

    pub fn models(&self) -> &ModelsConfig {
        &self.models
    }

    /// Validate `input` and run the demo for `kind`. Blank input is rejected
    /// before any model call.
    pub async fn run(&self, kind: SolutionKind, input: SolutionInput) -> Result<SolutionOutput> {
        let text = require_input(&input.text)?;
        tracing::info!(%kind, "running solution");

        let client = self.client.as_ref();
        let templates = self.templates.as_ref();
        let models = &self.models;
        let output = match kind {
            SolutionKind::BasicChat => {
                let model = self.chat_model(input.model.as_deref())?;
                let text = client.chat(&model, None, text, None).await?;
                SolutionOutput::Chat { model, text }
            }
            SolutionKind::GenerateImage => SolutionOutput::Image {
                url: self.generate_image(text).await?,
            },
            SolutionKind::DescribeImage => SolutionOutput::Description {
                text: self.describe_image(text).await?,
            },
            SolutionKind::ImageVariation => {
                let prompt = self.describe_image(text).await?;
                let url = self.generate_image(&prompt).await?;
                SolutionOutput::Variation { prompt, url }
            }
            SolutionKind::PromptChaining => SolutionOutput::Chain(
                workflows::chain(
                    client,
                    templates,
                    &models.chain_model,
                    text,
                    &MATH_CHAIN_STEPS,
                    models.temperature,
                )
                .await?,
            ),
            SolutionKind::Routing => {
                let prompts = workflows::prompts_from_lines(text);
                SolutionOutput::Routes(
                    workflows::route_batch(
                        client,
                        templates,
                        &models.router_model,
                        &prompts,
                        &models.routes,
                    )
                    .await?,
                )
            }
            SolutionKind::Parallelization => SolutionOutput::Parallel(
                workflows::fan_out(
                    client,
                    templates,
                    text,
                    &models.proposer_models,
                    &models.aggregator_model,
                    models.temperature,
                )
                .await?,
            ),
            SolutionKind::OrchestratorWorkers => SolutionOutput::Orchestrator(
                workflows::orchestrate(
                    client,
                    templates,
                    &models.orchestrator_model,
                    &models.worker_model,
                    text,
                    models.temperature,
                )
                .await?,
            ),
        };
        Ok(output)
    }

    /// The requested chat model, or the default. Models outside the
    /// configured list are refused.
    fn chat_model(&self, requested: Option<&str>) -> std::result::Result<String, WorkflowError> {
        let model = requested
            .map(str::trim)
            .filter(|m| !m.is_empty())
            .unwrap_or(self.models.default_chat_model.as_str());
        if !self.models.chat_models.iter().any(|m| m == model) {
            return Err(WorkflowError::UnknownModel {
                model: model.to_string(),
            });
        }
        Ok(model.to_string())
    }

    async fn generate_image(&self, prompt: &str) -> Result<String> {
        let image = &self.models.image;
        let request = ImageRequest {
            model: image.model.clone(),
            prompt: prompt.to_string(),
            steps: Some(image.steps),
            n: Some(image.n),
        };
        let result = self.client.generate_image(request).await?;
        let url = result.first_url().ok_or_else(|| LlmError::NoImage {
            model: image.model.clone(),
        })?;
        Ok(url.to_string())
    }

    async fn describe_image(&self, raw_url: &str) -> Result<String> {
        let url = validate_image_url(raw_url)?;
        let request = CompletionRequest::new(&self.models.vision_model)
            .message(ChatMessage::user_with_image(DESCRIBE_IMAGE_INSTRUCTION, url));
        Ok(self.client.complete(request).await?.text)
    }
}

/// Accept absolute `http`/`https` URLs only.
pub fn validate_image_url(raw: &str) -> std::result::Result<String, WorkflowError> {
    let invalid = || WorkflowError::InvalidImageUrl {
        url: raw.to_string(),
    };
    let parsed = url::Url::parse(raw.trim()).map_err(|_| invalid())?;
    if !matches!(parsed.scheme(), "http" | "https") || parsed.host_str().is_none() {
        return Err(invalid());
    }
    Ok(parsed.to_string())
}
