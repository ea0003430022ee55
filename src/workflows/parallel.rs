use super::require_input;
use crate::error::{LlmError, Result, WorkflowError};
use crate::llm::{CompletionRequest, ModelClient};
use crate::prompt::PromptBuilder;
use futures_util::future::join_all;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Proposal {
    pub model: String,
    pub response: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParallelResult {
    pub aggregated: String,
    /// In proposer order.
    pub proposals: Vec<Proposal>,
}

/// Ask every proposer concurrently, then have `aggregator` synthesize the
/// answers.
///
/// All proposer calls are awaited to completion before their results are
/// inspected. If any failed, the first failure is returned and the
/// aggregation call is never made.
pub async fn fan_out(
    client: &dyn ModelClient,
    templates: &PromptBuilder,
    input: &str,
    proposers: &[String],
    aggregator: &str,
    temperature: f64,
) -> Result<ParallelResult> {
    let input = require_input(input)?;
    if proposers.is_empty() {
        return Err(WorkflowError::NoProposers.into());
    }

    tracing::info!(proposers = proposers.len(), "fanning out to proposers");
    let calls = proposers.iter().map(|model| async move {
        let response = client.chat(model, None, input, Some(temperature)).await?;
        Ok::<_, LlmError>(Proposal {
            model: model.clone(),
            response,
        })
    });
    let proposals = join_all(calls)
        .await
        .into_iter()
        .collect::<std::result::Result<Vec<_>, _>>()?;

    let responses: Vec<String> = proposals.iter().map(|p| p.response.clone()).collect();
    let request = CompletionRequest::new(aggregator)
        .system(templates.aggregator_system(&responses)?)
        .user(input)
        .temperature(temperature);
    tracing::info!(aggregator, "aggregating proposals");
    let aggregated = client.complete(request).await?.text;

    Ok(ParallelResult {
        aggregated,
        proposals,
    })
}
