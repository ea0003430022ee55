//! Multi-call workflows over one shared [`ModelClient`](crate::llm::ModelClient).
//!
//! Each workflow returns its own result type. A failed call anywhere fails
//! the whole workflow; no partial results are returned.

mod chain;
mod orchestrator;
mod parallel;
mod routing;

pub use chain::{ChainResult, ChainStep, MATH_CHAIN_STEPS, chain};
pub use orchestrator::{OrchestratorResult, Subtask, TaskPlan, TaskStyle, WorkerOutput, orchestrate};
pub use parallel::{ParallelResult, Proposal, fan_out};
pub use routing::{
    RouteResult, RouteSelection, RoutedPrompt, prompts_from_lines, route, route_batch,
    selection_schema,
};

use crate::error::WorkflowError;

/// Trimmed input, or `EmptyInput` when nothing is left.
pub(crate) fn require_input(input: &str) -> Result<&str, WorkflowError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(WorkflowError::EmptyInput);
    }
    Ok(trimmed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn require_input_trims() {
        assert_eq!(require_input("  hi \n").unwrap(), "hi");
    }

    #[test]
    fn require_input_rejects_whitespace() {
        assert!(matches!(
            require_input(" \t\n"),
            Err(WorkflowError::EmptyInput)
        ));
    }
}
