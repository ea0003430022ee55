use super::require_input;
use crate::error::{LlmError, Result};
use crate::llm::{CompletionRequest, ModelClient, StructuredOutput, complete_structured};
use crate::prompt::PromptBuilder;
use futures_util::future::join_all;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Writing style a worker is asked to produce.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    JsonSchema,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum TaskStyle {
    Formal,
    Conversational,
    Hybrid,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Subtask {
    #[serde(rename = "type")]
    pub style: TaskStyle,
    pub description: String,
}

/// Decomposition returned by the orchestrator call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct TaskPlan {
    pub analysis: String,
    pub tasks: Vec<Subtask>,
}

impl StructuredOutput for TaskPlan {
    fn validate(&self) -> std::result::Result<(), String> {
        if self.tasks.is_empty() {
            return Err("plan contains no tasks".into());
        }
        if let Some(index) = self
            .tasks
            .iter()
            .position(|task| task.description.trim().is_empty())
        {
            return Err(format!("task {} has an empty description", index + 1));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkerOutput {
    pub task: Subtask,
    pub response: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrchestratorResult {
    pub analysis: String,
    /// One entry per planned task, in plan order.
    pub outputs: Vec<WorkerOutput>,
}

/// Plan `task` with `orchestrator_model`, then run one worker per planned
/// subtask concurrently on `worker_model`. `temperature` applies to the
/// workers; the planning call leaves it to the service.
pub async fn orchestrate(
    client: &dyn ModelClient,
    templates: &PromptBuilder,
    orchestrator_model: &str,
    worker_model: &str,
    task: &str,
    temperature: f64,
) -> Result<OrchestratorResult> {
    let task = require_input(task)?;

    let request = CompletionRequest::new(orchestrator_model).user(templates.orchestrator(task)?);
    let plan: TaskPlan = complete_structured(client, request).await?;
    tracing::info!(
        tasks = ?plan.tasks.iter().map(|t| t.style.to_string()).collect::<Vec<_>>(),
        "orchestrator produced plan"
    );

    let worker_prompts = plan
        .tasks
        .iter()
        .map(|subtask| templates.worker(task, &subtask.style.to_string(), &subtask.description))
        .collect::<std::result::Result<Vec<_>, _>>()?;

    let calls = plan
        .tasks
        .iter()
        .zip(worker_prompts)
        .map(|(subtask, prompt)| async move {
            let response = client.chat(worker_model, None, &prompt, Some(temperature)).await?;
            Ok::<_, LlmError>(WorkerOutput {
                task: subtask.clone(),
                response,
            })
        });
    let outputs = join_all(calls)
        .await
        .into_iter()
        .collect::<std::result::Result<Vec<_>, _>>()?;

    Ok(OrchestratorResult {
        analysis: plan.analysis,
        outputs,
    })
}
