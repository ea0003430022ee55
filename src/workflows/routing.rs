use super::require_input;
use crate::config::RouteConfig;
use crate::error::{Result, WorkflowError};
use crate::llm::{CompletionRequest, ModelClient, complete_with_schema, schema_for};
use crate::prompt::PromptBuilder;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Classifier verdict: which route to take and why.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct RouteSelection {
    /// Name of the selected route.
    pub route: String,
    /// Free-text justification.
    pub reason: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteResult {
    pub selection: RouteSelection,
    pub response: String,
}

/// One prompt of a batch together with its routed result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoutedPrompt {
    pub prompt: String,
    pub output: RouteResult,
}

/// Schema of [`RouteSelection`] with `route` restricted to the table's names.
pub fn selection_schema(routes: &RouteConfig) -> Value {
    let mut schema = schema_for::<RouteSelection>();
    if let Some(route) = schema.pointer_mut("/properties/route") {
        route["enum"] = Value::from(routes.names());
    }
    schema
}

/// Classify `input` with `router_model`, then answer it with the selected
/// route's model. Exactly two calls; a selection outside the table fails
/// before the second.
pub async fn route(
    client: &dyn ModelClient,
    templates: &PromptBuilder,
    router_model: &str,
    input: &str,
    routes: &RouteConfig,
) -> Result<RouteResult> {
    let input = require_input(input)?;
    if routes.is_empty() {
        return Err(WorkflowError::NoRoutes.into());
    }

    let system = templates.router_system(
        input,
        routes
            .iter()
            .map(|(name, description)| (name.as_str(), description.as_str())),
    )?;
    let request = CompletionRequest::new(router_model)
        .system(system)
        .user(input);
    let selection: RouteSelection =
        complete_with_schema(client, request, selection_schema(routes)).await?;

    if !routes.contains(&selection.route) {
        tracing::warn!(route = %selection.route, "classifier chose a route outside the table");
        return Err(WorkflowError::UnknownRoute {
            route: selection.route,
        }
        .into());
    }
    tracing::info!(route = %selection.route, reason = %selection.reason, "selected route");

    let response = client
        .chat(&selection.route, None, input, None)
        .await?;
    Ok(RouteResult {
        selection,
        response,
    })
}

/// Route each prompt in turn. The first failure aborts the batch.
pub async fn route_batch(
    client: &dyn ModelClient,
    templates: &PromptBuilder,
    router_model: &str,
    prompts: &[&str],
    routes: &RouteConfig,
) -> Result<Vec<RoutedPrompt>> {
    if prompts.is_empty() {
        return Err(WorkflowError::EmptyInput.into());
    }

    let mut results = Vec::with_capacity(prompts.len());
    for prompt in prompts {
        let output = route(client, templates, router_model, prompt, routes).await?;
        results.push(RoutedPrompt {
            prompt: (*prompt).to_string(),
            output,
        });
    }
    Ok(results)
}

/// Non-blank lines of `text`, trimmed.
pub fn prompts_from_lines(text: &str) -> Vec<&str> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect()
}
