mod builder;
mod engine;

pub use builder::{DESCRIBE_IMAGE_INSTRUCTION, PromptBuilder};
pub use engine::TeraEngine;
