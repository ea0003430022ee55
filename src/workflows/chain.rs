use super::require_input;
use crate::error::{Result, WorkflowError};
use crate::llm::{CompletionRequest, ModelClient};
use crate::prompt::PromptBuilder;
use serde::{Deserialize, Serialize};

/// Steps of the word-problem demo: extract numbers, plan, answer.
pub const MATH_CHAIN_STEPS: [&str; 3] = [
    "Given the math problem, ONLY extract any relevant numerical information and how it can be used.",
    "Given the numerical information extracted, ONLY express the steps you would take to solve the problem.",
    "Given the steps, express the final answer to the problem.",
];

/// One executed step: its instruction and the model's reply.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChainStep {
    /// 1-based position in the chain.
    pub step: usize,
    pub prompt: String,
    pub response: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChainResult {
    pub steps: Vec<ChainStep>,
}

impl ChainResult {
    /// Reply of the last step.
    pub fn final_output(&self) -> Option<&str> {
        self.steps.last().map(|step| step.response.as_str())
    }
}

/// Run `steps` in order, feeding each reply into the next prompt.
///
/// Step 1 receives `input`; step k receives step k-1's reply. Any failed
/// call aborts the chain.
pub async fn chain(
    client: &dyn ModelClient,
    templates: &PromptBuilder,
    model: &str,
    input: &str,
    steps: &[&str],
    temperature: f64,
) -> Result<ChainResult> {
    let input = require_input(input)?;
    if steps.is_empty() {
        return Err(WorkflowError::NoSteps.into());
    }

    let mut records = Vec::with_capacity(steps.len());
    let mut previous = input.to_string();

    for (index, instruction) in steps.iter().enumerate() {
        let step = index + 1;
        tracing::info!(model, total = steps.len(), "Step {step}");

        let request = CompletionRequest::new(model)
            .user(templates.chain_step(instruction, &previous)?)
            .temperature(temperature);
        let response = client.complete(request).await?.text;

        previous.clone_from(&response);
        records.push(ChainStep {
            step,
            prompt: (*instruction).to_string(),
            response,
        });
    }

    Ok(ChainResult { steps: records })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn templates() -> PromptBuilder {
        PromptBuilder::new().unwrap()
    }
    use crate::error::ExplorerError;
    use crate::llm::testing::{ScriptedClient, upstream_error};
    use std::sync::atomic::{AtomicUsize, Ordering};

    const SALLY: &str = "Sally earns $12 an hour for babysitting. Yesterday, she just did 50 \
minutes of babysitting. How much did she earn?";

    fn numbered_replies() -> ScriptedClient {
        let counter = AtomicUsize::new(0);
        ScriptedClient::new(move |_| {
            let n = counter.fetch_add(1, Ordering::SeqCst) + 1;
            Ok(format!("output {n}"))
        })
    }

    #[tokio::test]
    async fn threads_each_output_into_the_next_step() {
        let client = numbered_replies();
        let steps = ["first", "second", "third"];

        let result = chain(&client, &templates(), "m", "the input", &steps, 0.7).await.unwrap();

        assert_eq!(result.steps.len(), 3);
        let requests = client.requests();
        assert_eq!(requests.len(), 3);
        assert_eq!(
            requests[0].user_text().unwrap(),
            "first\nInput:\nthe input"
        );
        assert_eq!(requests[1].user_text().unwrap(), "second\nInput:\noutput 1");
        assert_eq!(requests[2].user_text().unwrap(), "third\nInput:\noutput 2");
        assert_eq!(result.final_output(), Some("output 3"));
    }

    #[tokio::test]
    async fn records_are_ordered_and_match_requests() {
        let client = numbered_replies();
        let result = chain(&client, &templates(), "m", "x", &["a", "b"], 0.7).await.unwrap();

        let requests = client.requests();
        for (index, record) in result.steps.iter().enumerate() {
            assert_eq!(record.step, index + 1);
            assert_eq!(record.response, format!("output {}", index + 1));
            assert!(requests[index].user_text().unwrap().starts_with(&record.prompt));
        }
    }

    #[tokio::test]
    async fn every_step_uses_the_model_and_temperature() {
        let client = numbered_replies();
        chain(&client, &templates(), "chain-model", "x", &["a", "b"], 0.7)
            .await
            .unwrap();

        for request in client.requests() {
            assert_eq!(request.model, "chain-model");
            assert_eq!(request.temperature, Some(0.7));
            assert_eq!(request.messages.len(), 1);
            assert!(request.response_format.is_none());
        }
    }

    #[tokio::test]
    async fn word_problem_yields_three_non_empty_records() {
        let client = ScriptedClient::new(|request| {
            Ok(format!("considered {} chars", request.user_text().unwrap_or_default().len()))
        });

        let result = chain(&client, &templates(), "m", SALLY, &MATH_CHAIN_STEPS, 0.7)
            .await
            .unwrap();

        assert_eq!(result.steps.len(), 3);
        for record in &result.steps {
            assert!(!record.prompt.is_empty());
            assert!(!record.response.is_empty());
        }
        assert_eq!(result.steps[0].prompt, MATH_CHAIN_STEPS[0]);
        assert!(client.requests()[0].user_text().unwrap().contains("Sally earns $12"));
    }

    #[tokio::test]
    async fn empty_input_makes_no_calls() {
        let client = numbered_replies();
        let err = chain(&client, &templates(), "m", "   ", &MATH_CHAIN_STEPS, 0.7)
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            ExplorerError::Workflow(WorkflowError::EmptyInput)
        ));
        assert_eq!(client.call_count(), 0);
    }

    #[tokio::test]
    async fn no_steps_is_rejected() {
        let client = numbered_replies();
        let err = chain(&client, &templates(), "m", "x", &[], 0.7).await.unwrap_err();
        assert!(matches!(err, ExplorerError::Workflow(WorkflowError::NoSteps)));
        assert_eq!(client.call_count(), 0);
    }

    #[tokio::test]
    async fn failing_step_aborts_the_chain() {
        let counter = AtomicUsize::new(0);
        let client = ScriptedClient::new(move |_| {
            if counter.fetch_add(1, Ordering::SeqCst) == 1 {
                return Err(upstream_error("overloaded"));
            }
            Ok("fine".into())
        });

        let err = chain(&client, &templates(), "m", "x", &["a", "b", "c"], 0.7)
            .await
            .unwrap_err();

        assert!(matches!(err, ExplorerError::Llm(_)));
        assert_eq!(client.call_count(), 2);
    }
}
