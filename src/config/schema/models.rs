use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Model assignments for every solution. Defaults mirror the hosted free tier.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelsConfig {
    /// Models a user may pick from on the basic chat page.
    #[serde(default = "default_chat_models")]
    pub chat_models: Vec<String>,
    #[serde(default = "default_chat_model")]
    pub default_chat_model: String,
    #[serde(default = "default_vision_model")]
    pub vision_model: String,
    #[serde(default)]
    pub image: ImageModelConfig,
    #[serde(default = "default_chat_model")]
    pub chain_model: String,
    /// Model that classifies input for the routing demo.
    #[serde(default = "default_router_model")]
    pub router_model: String,
    #[serde(default)]
    pub routes: RouteConfig,
    #[serde(default = "default_proposer_models")]
    pub proposer_models: Vec<String>,
    #[serde(default = "default_reasoning_model")]
    pub aggregator_model: String,
    #[serde(default = "default_chat_model")]
    pub orchestrator_model: String,
    #[serde(default = "default_worker_model")]
    pub worker_model: String,
    #[serde(default = "default_temperature")]
    pub temperature: f64,
}

fn default_chat_model() -> String {
    "meta-llama/Llama-3.3-70B-Instruct-Turbo-Free".into()
}

fn default_vision_model() -> String {
    "meta-llama/Llama-Vision-Free".into()
}

fn default_reasoning_model() -> String {
    "deepseek-ai/DeepSeek-R1-Distill-Llama-70B-free".into()
}

fn default_router_model() -> String {
    "meta-llama/Meta-Llama-3.1-70B-Instruct-Turbo".into()
}

fn default_worker_model() -> String {
    "meta-llama/Llama-3.3-70B-Instruct-Turbo".into()
}

fn default_chat_models() -> Vec<String> {
    vec![default_chat_model(), default_reasoning_model()]
}

fn default_proposer_models() -> Vec<String> {
    vec![default_chat_model(), default_vision_model()]
}

fn default_temperature() -> f64 {
    0.7
}

impl Default for ModelsConfig {
    fn default() -> Self {
        Self {
            chat_models: default_chat_models(),
            default_chat_model: default_chat_model(),
            vision_model: default_vision_model(),
            image: ImageModelConfig::default(),
            chain_model: default_chat_model(),
            router_model: default_router_model(),
            routes: RouteConfig::default(),
            proposer_models: default_proposer_models(),
            aggregator_model: default_reasoning_model(),
            orchestrator_model: default_chat_model(),
            worker_model: default_worker_model(),
            temperature: default_temperature(),
        }
    }
}

impl ModelsConfig {
    /// Every model name that must be non-empty for the solutions to run.
    pub(crate) fn required_names(&self) -> impl Iterator<Item = (&'static str, &str)> {
        [
            ("default_chat_model", self.default_chat_model.as_str()),
            ("vision_model", self.vision_model.as_str()),
            ("image.model", self.image.model.as_str()),
            ("chain_model", self.chain_model.as_str()),
            ("router_model", self.router_model.as_str()),
            ("aggregator_model", self.aggregator_model.as_str()),
            ("orchestrator_model", self.orchestrator_model.as_str()),
            ("worker_model", self.worker_model.as_str()),
        ]
        .into_iter()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImageModelConfig {
    #[serde(default = "default_image_model")]
    pub model: String,
    /// Diffusion steps per image.
    #[serde(default = "default_image_steps")]
    pub steps: u32,
    /// Images requested per call; only the first is shown.
    #[serde(default = "default_image_count")]
    pub n: u32,
}

fn default_image_model() -> String {
    "black-forest-labs/FLUX.1-schnell-Free".into()
}

fn default_image_steps() -> u32 {
    4
}

fn default_image_count() -> u32 {
    4
}

impl Default for ImageModelConfig {
    fn default() -> Self {
        Self {
            model: default_image_model(),
            steps: default_image_steps(),
            n: default_image_count(),
        }
    }
}

/// Route table for the routing demo: model name -> what it is best at.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RouteConfig(pub BTreeMap<String, String>);

impl Default for RouteConfig {
    fn default() -> Self {
        Self(BTreeMap::from([
            (
                default_chat_model(),
                "Best model choice for code generation tasks.".to_string(),
            ),
            (
                default_vision_model(),
                "Best model choice for story-telling, role-playing and fantasy tasks.".to_string(),
            ),
            (
                default_reasoning_model(),
                "Best model for reasoning, planning and multi-step tasks".to_string(),
            ),
        ]))
    }
}

impl RouteConfig {
    pub fn contains(&self, model: &str) -> bool {
        self.0.contains_key(model)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &String)> {
        self.0.iter()
    }

    pub fn names(&self) -> Vec<&str> {
        self.0.keys().map(String::as_str).collect()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for RouteConfig {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}
