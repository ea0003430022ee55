use super::traits::ModelClient;
use super::types::{CompletionRequest, CompletionResult, ImageRequest, ImageResult};
use crate::error::LlmError;
use async_trait::async_trait;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

type TextReply = Box<dyn Fn(&CompletionRequest) -> Result<String, LlmError> + Send + Sync>;
type ImageReply = Box<dyn Fn(&ImageRequest) -> Result<ImageResult, LlmError> + Send + Sync>;

/// In-memory model client that answers from closures and records every call.
pub(crate) struct ScriptedClient {
    reply: TextReply,
    image_reply: ImageReply,
    delay: Option<Duration>,
    requests: Mutex<Vec<CompletionRequest>>,
    image_requests: Mutex<Vec<ImageRequest>>,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
}

impl ScriptedClient {
    pub(crate) fn new(
        reply: impl Fn(&CompletionRequest) -> Result<String, LlmError> + Send + Sync + 'static,
    ) -> Self {
        Self {
            reply: Box::new(reply),
            image_reply: Box::new(|request| {
                Ok(ImageResult {
                    urls: vec![format!("https://images.test/{}.png", request.prompt.len())],
                })
            }),
            delay: None,
            requests: Mutex::new(Vec::new()),
            image_requests: Mutex::new(Vec::new()),
            in_flight: AtomicUsize::new(0),
            max_in_flight: AtomicUsize::new(0),
        }
    }

    /// Replies `"<model>: <last user text>"`.
    pub(crate) fn echo() -> Self {
        Self::new(|request| {
            Ok(format!(
                "{}: {}",
                request.model,
                request.user_text().unwrap_or_default()
            ))
        })
    }

    pub(crate) fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub(crate) fn with_images(
        mut self,
        reply: impl Fn(&ImageRequest) -> Result<ImageResult, LlmError> + Send + Sync + 'static,
    ) -> Self {
        self.image_reply = Box::new(reply);
        self
    }

    pub(crate) fn requests(&self) -> Vec<CompletionRequest> {
        self.requests
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .clone()
    }

    pub(crate) fn image_requests(&self) -> Vec<ImageRequest> {
        self.image_requests
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .clone()
    }

    pub(crate) fn call_count(&self) -> usize {
        self.requests().len()
    }

    /// Highest number of completions that were awaiting a reply at once.
    pub(crate) fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }
}

/// Convenience error for scripted failures.
pub(crate) fn upstream_error(message: &str) -> LlmError {
    LlmError::Status {
        status: 500,
        message: message.to_string(),
    }
}

#[async_trait]
impl ModelClient for ScriptedClient {
    fn name(&self) -> &str {
        "scripted"
    }

    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResult, LlmError> {
        self.requests
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .push(request.clone());

        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(now, Ordering::SeqCst);
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        self.in_flight.fetch_sub(1, Ordering::SeqCst);

        (self.reply)(&request).map(CompletionResult::text_only)
    }

    async fn generate_image(&self, request: ImageRequest) -> Result<ImageResult, LlmError> {
        self.image_requests
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .push(request.clone());
        (self.image_reply)(&request)
    }
}
