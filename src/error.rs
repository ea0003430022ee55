use thiserror::Error;

/// Text shown to users whenever a solution run fails after input validation.
pub const USER_FACING_FAILURE: &str = "Error fetching response.";

// ─── Top-level error hierarchy ───────────────────────────────────────────────

/// Structured error hierarchy for Solution Explorer.
///
/// Each subsystem defines its own error variant. Library callers can match on
/// these to decide what to show; internal code uses `anyhow::Result` for
/// ad-hoc context chains where no caller needs to branch.
#[derive(Debug, Error)]
pub enum ExplorerError {
    // ── Config ───────────────────────────────────────────────────────────
    #[error("config: {0}")]
    Config(#[from] ConfigError),

    // ── Model API ───────────────────────────────────────────────────────
    #[error("llm: {0}")]
    Llm(#[from] LlmError),

    // ── Workflows ───────────────────────────────────────────────────────
    #[error("workflow: {0}")]
    Workflow(#[from] WorkflowError),

    // ── Catalog ─────────────────────────────────────────────────────────
    #[error("catalog: {0}")]
    Catalog(#[from] CatalogError),

    // ── Gateway ─────────────────────────────────────────────────────────
    #[error("gateway: {0}")]
    Gateway(String),

    // ── Generic fallthrough (wraps anyhow for interop) ──────────────────
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ExplorerError {
    /// Input was rejected before any model call was made.
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            Self::Workflow(
                WorkflowError::EmptyInput
                    | WorkflowError::UnknownModel { .. }
                    | WorkflowError::InvalidImageUrl { .. }
            )
        )
    }
}

// ─── Config errors ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to load config: {0}")]
    Load(String),

    #[error("validation failed: {0}")]
    Validation(String),

    #[error("io: {0}")]
    Io(#[from] std::io::Error),
}

// ─── Model API errors ───────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("{provider} API key not set (use SOLUTION_EXPLORER_API_KEY or api_key in config.toml)")]
    MissingApiKey { provider: String },

    #[error("request to model {model} failed: {message}")]
    Request { model: String, message: String },

    #[error("model API error ({status}): {message}")]
    Status { status: u16, message: String },

    #[error("malformed response: {message}")]
    Decode { message: String },

    #[error("no text content returned by model {model}")]
    EmptyResponse { model: String },

    #[error("no image returned by model {model}")]
    NoImage { model: String },
}

// ─── Workflow errors ────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum WorkflowError {
    #[error("input is empty")]
    EmptyInput,

    #[error("prompt chain has no steps")]
    NoSteps,

    #[error("route table is empty")]
    NoRoutes,

    #[error("no proposer models configured")]
    NoProposers,

    #[error("structured output failed validation: {reason}")]
    InvalidStructuredOutput { reason: String },

    #[error("classifier selected unknown route {route}")]
    UnknownRoute { route: String },

    #[error("model {model} is not offered by this solution")]
    UnknownModel { model: String },

    #[error("invalid image url {url}")]
    InvalidImageUrl { url: String },

    #[error("prompt template failed: {0}")]
    Template(String),
}

// ─── Catalog errors ─────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("duplicate solution id {0}")]
    DuplicateId(u32),

    #[error("solution {0} has an empty tag")]
    EmptyTag(u32),

    #[error("solution {0} has an empty name")]
    EmptyName(u32),

    #[error("solution {0} not found")]
    NotFound(u32),

    #[error("failed to load catalog: {0}")]
    Load(String),
}

// ─── Convenience re-exports ─────────────────────────────────────────────────

/// Shorthand result type for the crate.
pub type Result<T> = std::result::Result<T, ExplorerError>;
