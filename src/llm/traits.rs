use super::types::{CompletionRequest, CompletionResult, ImageRequest, ImageResult};
use crate::error::LlmError;
use async_trait::async_trait;

/// A hosted model service reachable over some request/response transport.
///
/// Implementations own their connection pool; one instance is created at
/// startup and shared behind an `Arc` by every workflow.
#[async_trait]
pub trait ModelClient: Send + Sync {
    /// Provider identifier used in logs and error messages.
    fn name(&self) -> &str;

    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResult, LlmError>;

    async fn generate_image(&self, request: ImageRequest) -> Result<ImageResult, LlmError>;

    /// One-turn chat returning only the text.
    async fn chat(
        &self,
        model: &str,
        system_prompt: Option<&str>,
        message: &str,
        temperature: Option<f64>,
    ) -> Result<String, LlmError> {
        let mut request = CompletionRequest::new(model);
        if let Some(system) = system_prompt {
            request = request.system(system);
        }
        request = request.user(message);
        if let Some(temperature) = temperature {
            request = request.temperature(temperature);
        }
        self.complete(request).await.map(|result| result.text)
    }
}
