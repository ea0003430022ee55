// ── Infrastructure ───────────────────────────────────────────────────────────
pub mod http_client;
pub mod scrub;
pub mod structured;
pub mod traits;
pub mod types;

// ── Provider implementations ────────────────────────────────────────────────
pub mod compatible;

#[cfg(test)]
pub(crate) mod testing;

// ── Re-exports ──────────────────────────────────────────────────────────────
pub use compatible::OpenAiCompatibleClient;
pub use http_client::{build_model_client, build_model_client_with_timeout};
pub use scrub::{sanitize_api_error, scrub_secrets};
pub use structured::{
    StructuredOutput, complete_structured, complete_with_schema, parse_structured, schema_for,
};
pub use traits::ModelClient;
pub use types::{
    ChatMessage, CompletionRequest, CompletionResult, ContentPart, ImageRequest, ImageResult,
    ImageUrl, MessageContent, MessageRole, ResponseFormat, TokenUsage,
};
