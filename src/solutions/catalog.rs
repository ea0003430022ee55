use crate::error::CatalogError;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

/// Which demo a catalog entry runs.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum SolutionKind {
    BasicChat,
    GenerateImage,
    DescribeImage,
    ImageVariation,
    PromptChaining,
    Routing,
    Parallelization,
    OrchestratorWorkers,
}

impl SolutionKind {
    /// Label above the input field.
    pub fn input_label(self) -> &'static str {
        match self {
            Self::GenerateImage => "Enter the prompt:",
            Self::DescribeImage | Self::ImageVariation => "Enter the URL of the reference image:",
            Self::Routing => "Enter your tasks (one per line):",
            Self::BasicChat
            | Self::PromptChaining
            | Self::Parallelization
            | Self::OrchestratorWorkers => "Enter your question:",
        }
    }

    /// Example input, shown as the form placeholder.
    pub fn sample_input(self) -> &'static str {
        match self {
            Self::BasicChat => "Ask a question",
            Self::GenerateImage => "A lighthouse on a cliff at dawn, watercolor",
            Self::DescribeImage | Self::ImageVariation => "https://example.com/reference.png",
            Self::PromptChaining => {
                "Sally earns $12 an hour for babysitting. Yesterday, she just did 50 minutes of \
                 babysitting. How much did she earn?"
            }
            Self::Routing => {
                "Produce python snippet to check to see if a number is prime or not.\n\
                 Plan and provide a short itinerary for a 2 week vacation in Europe.\n\
                 Write a short story about a dragon and a knight."
            }
            Self::Parallelization => "Ask a mathematics question",
            Self::OrchestratorWorkers => {
                "Write a product description for a new eco-friendly water bottle. The \
                 target_audience is environmentally conscious millennials and key product \
                 features are: plastic-free, insulated, lifetime warranty"
            }
        }
    }

    /// Whether the input is free text spanning several lines.
    pub fn multiline(self) -> bool {
        !matches!(self, Self::DescribeImage | Self::ImageVariation)
    }
}

/// One catalog entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Solution {
    pub id: u32,
    pub name: String,
    pub description: String,
    pub tags: Vec<String>,
    pub kind: SolutionKind,
}

impl Solution {
    fn new(id: u32, name: &str, description: &str, tags: &[&str], kind: SolutionKind) -> Self {
        Self {
            id,
            name: name.into(),
            description: description.into(),
            tags: tags.iter().map(|t| (*t).to_string()).collect(),
            kind,
        }
    }
}

/// Search text and selected tags from the browse page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CatalogQuery {
    pub search: String,
    pub tags: Vec<String>,
}

impl CatalogQuery {
    /// Parse a comma-separated tag list, dropping blanks and duplicates.
    pub fn parse_tags(raw: &str) -> Vec<String> {
        let mut tags: Vec<String> = Vec::new();
        for tag in raw.split(',').map(str::trim).filter(|t| !t.is_empty()) {
            if !tags.iter().any(|t| t == tag) {
                tags.push(tag.to_string());
            }
        }
        tags
    }

    pub fn is_selected(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }

    /// The selection with `tag` added, or removed if it was selected.
    pub fn toggled(&self, tag: &str) -> Vec<String> {
        if self.is_selected(tag) {
            self.tags.iter().filter(|t| *t != tag).cloned().collect()
        } else {
            let mut tags = self.tags.clone();
            tags.push(tag.to_string());
            tags
        }
    }

    fn matches(&self, solution: &Solution) -> bool {
        let needle = self.search.trim().to_lowercase();
        let text_match = needle.is_empty()
            || solution.name.to_lowercase().contains(&needle)
            || solution.description.to_lowercase().contains(&needle);
        let tag_match =
            self.tags.is_empty() || solution.tags.iter().any(|tag| self.is_selected(tag));
        text_match && tag_match
    }
}

#[derive(Deserialize)]
struct CatalogFile {
    #[serde(default)]
    solutions: Vec<Solution>,
}

/// Immutable list of solutions, validated on construction.
#[derive(Debug, Clone)]
pub struct Catalog {
    solutions: Vec<Solution>,
}

impl Catalog {
    pub fn new(solutions: Vec<Solution>) -> Result<Self, CatalogError> {
        let mut seen = HashSet::new();
        for solution in &solutions {
            if !seen.insert(solution.id) {
                return Err(CatalogError::DuplicateId(solution.id));
            }
            if solution.name.trim().is_empty() {
                return Err(CatalogError::EmptyName(solution.id));
            }
            if solution.tags.iter().any(|tag| tag.trim().is_empty()) {
                return Err(CatalogError::EmptyTag(solution.id));
            }
        }
        Ok(Self { solutions })
    }

    /// One entry per demo.
    pub fn builtin() -> Self {
        use SolutionKind as K;
        let solutions = vec![
            Solution::new(
                1,
                "Basic Chat",
                "Ask a question and get an answer from the chat model of your choice.",
                &["Chat", "LLM"],
                K::BasicChat,
            ),
            Solution::new(
                2,
                "Generate Image",
                "Turn a text prompt into an image with a text-to-image model.",
                &["Image", "Generation"],
                K::GenerateImage,
            ),
            Solution::new(
                3,
                "Describe Image",
                "Have a vision model write a detailed description of an image.",
                &["Image", "Vision"],
                K::DescribeImage,
            ),
            Solution::new(
                4,
                "Image Variation",
                "Describe a reference image, then generate a new image from that description.",
                &["Image", "Vision", "Generation"],
                K::ImageVariation,
            ),
            Solution::new(
                5,
                "Prompt Chaining",
                "Solve a word problem in sequential steps, each step building on the last answer.",
                &["Workflow", "Chaining"],
                K::PromptChaining,
            ),
            Solution::new(
                6,
                "Routing",
                "Classify each task and send it to the model best suited for it.",
                &["Workflow", "Routing"],
                K::Routing,
            ),
            Solution::new(
                7,
                "Parallelization",
                "Ask several models at once and aggregate their answers into one response.",
                &["Workflow", "Parallel"],
                K::Parallelization,
            ),
            Solution::new(
                8,
                "Orchestrator-Workers",
                "Break a task into approaches and have workers write each one concurrently.",
                &["Workflow", "Orchestration"],
                K::OrchestratorWorkers,
            ),
        ];
        Self { solutions }
    }

    /// Parse a catalog from TOML with a `[[solutions]]` table per entry.
    pub fn from_toml_str(raw: &str) -> Result<Self, CatalogError> {
        let file: CatalogFile =
            toml::from_str(raw).map_err(|error| CatalogError::Load(error.to_string()))?;
        Self::new(file.solutions)
    }

    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        let raw = std::fs::read_to_string(path)
            .map_err(|error| CatalogError::Load(format!("{}: {error}", path.display())))?;
        let catalog = Self::from_toml_str(&raw)?;
        tracing::info!(path = %path.display(), solutions = catalog.len(), "loaded catalog");
        Ok(catalog)
    }

    /// The catalog file named in the config, or the built-in one.
    pub fn from_config(config: &crate::Config) -> Result<Self, CatalogError> {
        match &config.catalog_path {
            Some(path) => Self::load(path),
            None => Ok(Self::builtin()),
        }
    }

    pub fn get(&self, id: u32) -> Option<&Solution> {
        self.solutions.iter().find(|s| s.id == id)
    }

    pub fn solutions(&self) -> &[Solution] {
        &self.solutions
    }

    pub fn len(&self) -> usize {
        self.solutions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.solutions.is_empty()
    }

    /// Every tag in first-seen order.
    pub fn all_tags(&self) -> Vec<&str> {
        let mut seen = HashSet::new();
        self.solutions
            .iter()
            .flat_map(|s| s.tags.iter().map(String::as_str))
            .filter(|tag| seen.insert(*tag))
            .collect()
    }

    /// Solutions whose name or description contains the search text
    /// (case-insensitive) and that carry any selected tag. An empty
    /// selection matches every tag.
    pub fn filter(&self, query: &CatalogQuery) -> Vec<&Solution> {
        self.solutions.iter().filter(|s| query.matches(s)).collect()
    }
}
