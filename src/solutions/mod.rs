//! The solution catalog and the runners behind each entry.

mod catalog;
mod runner;

pub use catalog::{Catalog, CatalogQuery, Solution, SolutionKind};
pub use runner::{SolutionInput, SolutionOutput, SolutionRunner, validate_image_url};
