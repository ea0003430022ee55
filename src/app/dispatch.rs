use crate::app::render::{render_catalog, render_output, render_solution};
use crate::app::status::render_status;
use crate::cli::{Cli, Commands};
use anyhow::{Context, Result};
use solution_explorer::Config;
use solution_explorer::llm::{ModelClient, OpenAiCompatibleClient};
use solution_explorer::solutions::{Catalog, CatalogQuery, SolutionInput, SolutionRunner};
use std::sync::Arc;
use tracing::info;

/// Run one demo and print its sections.
async fn run_solution(
    config: &Config,
    id: u32,
    input: Option<String>,
    model: Option<String>,
) -> Result<()> {
    let catalog = Catalog::from_config(config).context("load solution catalog")?;
    let solution = catalog
        .get(id)
        .with_context(|| format!("no solution with id {id}"))?;

    let text = input.unwrap_or_else(|| {
        info!(solution = id, "no input given, using the sample input");
        solution.kind.sample_input().to_string()
    });

    let client: Arc<dyn ModelClient> = Arc::new(OpenAiCompatibleClient::from_config(config));
    let runner =
        SolutionRunner::new(client, config.models.clone()).context("compile prompt templates")?;
    let output = runner
        .run(solution.kind, SolutionInput { text, model })
        .await
        .with_context(|| format!("run {}", solution.name))?;

    println!("{}", render_output(&output));
    Ok(())
}

pub async fn dispatch(cli: Cli, config: Config) -> Result<()> {
    match cli.command {
        Commands::Serve { port, host } => {
            let mut config = config;
            if let Some(port) = port {
                config.gateway.port = port;
            }
            if let Some(host) = host {
                config.gateway.host = host;
            }
            if config.gateway.port == 0 {
                info!(
                    "Starting Solution Explorer on {} (random port)",
                    config.gateway.host
                );
            } else {
                info!(
                    "Starting Solution Explorer on {}:{}",
                    config.gateway.host, config.gateway.port
                );
            }
            solution_explorer::gateway::run_gateway(Arc::new(config)).await
        }

        Commands::List { search, tags } => {
            let catalog = Catalog::from_config(&config).context("load solution catalog")?;
            let query = CatalogQuery {
                search: search.unwrap_or_default(),
                tags,
            };
            println!("{}", render_catalog(&catalog.filter(&query)));
            Ok(())
        }

        Commands::Show { id } => {
            let catalog = Catalog::from_config(&config).context("load solution catalog")?;
            let solution = catalog
                .get(id)
                .with_context(|| format!("no solution with id {id}"))?;
            println!("{}", render_solution(solution));
            Ok(())
        }

        Commands::Run { id, input, model } => run_solution(&config, id, input, model).await,

        Commands::Status => {
            println!("{}", render_status(&config));
            Ok(())
        }
    }
}
