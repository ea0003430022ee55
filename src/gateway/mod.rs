//! Axum-based web surface: catalog pages, solution forms and a JSON API.
//!
//! Every request shares one [`AppState`] built at startup. Bodies are capped
//! at 64KB and each request is bounded by the configured timeout.

mod handlers;
mod markdown;
mod server;
mod views;

pub use markdown::render_markdown;
pub use server::{build_app, run_gateway, run_gateway_with_listener};
pub use views::Views;

use crate::solutions::{Catalog, SolutionRunner};
use std::sync::Arc;

/// Maximum request body size (64KB)
pub const MAX_BODY_SIZE: usize = 65_536;

/// Shared state for all axum handlers
#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<Catalog>,
    pub runner: Arc<SolutionRunner>,
    pub views: Arc<Views>,
}

impl AppState {
    pub fn new(catalog: Catalog, runner: SolutionRunner) -> anyhow::Result<Self> {
        Ok(Self {
            catalog: Arc::new(catalog),
            runner: Arc::new(runner),
            views: Arc::new(Views::new()?),
        })
    }
}

/// Query string of the catalog page and list endpoint.
#[derive(Debug, Default, serde::Deserialize)]
pub struct CatalogParams {
    pub q: Option<String>,
    /// Comma-separated tag selection.
    pub tags: Option<String>,
}

/// Form body of a solution page submit.
#[derive(Debug, serde::Deserialize)]
pub struct RunForm {
    #[serde(default)]
    pub input: String,
    #[serde(default)]
    pub model: Option<String>,
}

/// JSON body of `POST /api/solutions/{id}/run`.
#[derive(Debug, serde::Deserialize, serde::Serialize)]
pub struct RunRequest {
    pub input: String,
    #[serde(default)]
    pub model: Option<String>,
}
