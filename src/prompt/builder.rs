use super::engine::TeraEngine;
use crate::error::WorkflowError;
use serde::Serialize;
use tera::Context;

/// Instruction sent with an image URL to the vision model.
pub const DESCRIBE_IMAGE_INSTRUCTION: &str = "Describe the image whose URL is passed. \
The description should be very detailed, so that it can be passed as a prompt to any \
ai-based image generation tool, to create variations of this image";

const CHAIN_STEP_TEMPLATE: &str = "{{ instruction }}\nInput:\n{{ previous }}";

const ROUTER_TEMPLATE: &str = "\
Given a user prompt/query: {{ query }}, select the best option out of the following routes:

{% for route in routes %}{{ route.name }}: {{ route.description }}
{% endfor %}
Answer only in JSON format.";

const AGGREGATOR_TEMPLATE: &str = "\
You have been provided with a set of responses from various open-source models to the \
latest user query. Your task is to synthesize these responses into a single, high-quality \
response. It is crucial to critically evaluate the information provided in these responses, \
recognizing that some of it may be biased or incorrect. Your response should not simply \
replicate the given answers but should offer a refined, accurate, and comprehensive reply \
to the instruction. Ensure your response is well-structured, coherent, and adheres to the \
highest standards of accuracy and reliability.

Responses from models:
{% for response in responses %}{{ loop.index }}. {{ response }}
{% endfor %}";

const ORCHESTRATOR_TEMPLATE: &str = "\
Analyze this task and break it down into 2-3 distinct approaches:

Task: {{ task }}

Provide an Analysis:

Explain your understanding of the task and which variations would be valuable.
Focus on how each approach serves different aspects of the task.

Along with the analysis, provide 2-3 approaches to tackle the task, each with a brief description:

Formal style: Write technically and precisely, focusing on detailed specifications
Conversational style: Write in a friendly and engaging way that connects with the reader
Hybrid style: Tell a story that includes technical details, combining emotional elements with specifications

Return only JSON output.";

const WORKER_TEMPLATE: &str = "\
Generate content based on:
Task: {{ task }}
Style: {{ style }}
Guidelines: {{ guidelines }}

Return only your response:
[Your content here, maintaining the specified style and fully addressing requirements.]";

const CHAIN_STEP_NAME: &str = "chain_step";
const ROUTER_NAME: &str = "router";
const AGGREGATOR_NAME: &str = "aggregator";
const ORCHESTRATOR_NAME: &str = "orchestrator";
const WORKER_NAME: &str = "worker";

#[derive(Serialize)]
struct RouteLine<'a> {
    name: &'a str,
    description: &'a str,
}

/// Renders every prompt the workflows send. Templates are registered once
/// at construction; rendering only borrows.
pub struct PromptBuilder {
    engine: TeraEngine,
}

impl PromptBuilder {
    pub fn new() -> Result<Self, WorkflowError> {
        let mut engine = TeraEngine::new();
        engine
            .add_templates(&[
                (CHAIN_STEP_NAME, CHAIN_STEP_TEMPLATE),
                (ROUTER_NAME, ROUTER_TEMPLATE),
                (AGGREGATOR_NAME, AGGREGATOR_TEMPLATE),
                (ORCHESTRATOR_NAME, ORCHESTRATOR_TEMPLATE),
                (WORKER_NAME, WORKER_TEMPLATE),
            ])
            .map_err(template_error)?;
        Ok(Self { engine })
    }

    fn render(&self, name: &str, ctx: &Context) -> Result<String, WorkflowError> {
        self.engine.render(name, ctx).map_err(template_error)
    }

    /// `instruction`, then `Input:` and the previous step's output.
    pub fn chain_step(&self, instruction: &str, previous: &str) -> Result<String, WorkflowError> {
        let mut ctx = Context::new();
        ctx.insert("instruction", instruction);
        ctx.insert("previous", previous);
        self.render(CHAIN_STEP_NAME, &ctx)
    }

    /// System prompt for the routing classifier, one `name: description`
    /// line per route in the given order.
    pub fn router_system<'a>(
        &self,
        query: &str,
        routes: impl IntoIterator<Item = (&'a str, &'a str)>,
    ) -> Result<String, WorkflowError> {
        let routes: Vec<RouteLine<'_>> = routes
            .into_iter()
            .map(|(name, description)| RouteLine { name, description })
            .collect();
        let mut ctx = Context::new();
        ctx.insert("query", query);
        ctx.insert("routes", &routes);
        self.render(ROUTER_NAME, &ctx)
    }

    /// Synthesis instruction followed by the proposals numbered from 1.
    pub fn aggregator_system(&self, responses: &[String]) -> Result<String, WorkflowError> {
        let mut ctx = Context::new();
        ctx.insert("responses", responses);
        self.render(AGGREGATOR_NAME, &ctx)
    }

    pub fn orchestrator(&self, task: &str) -> Result<String, WorkflowError> {
        let mut ctx = Context::new();
        ctx.insert("task", task);
        self.render(ORCHESTRATOR_NAME, &ctx)
    }

    pub fn worker(
        &self,
        task: &str,
        style: &str,
        guidelines: &str,
    ) -> Result<String, WorkflowError> {
        let mut ctx = Context::new();
        ctx.insert("task", task);
        ctx.insert("style", style);
        ctx.insert("guidelines", guidelines);
        self.render(WORKER_NAME, &ctx)
    }
}

fn template_error(error: anyhow::Error) -> WorkflowError {
    WorkflowError::Template(format!("{error:#}"))
}
