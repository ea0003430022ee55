use solution_explorer::Config;

pub fn render_status(config: &Config) -> String {
    let models = &config.models;
    let mut lines = vec![
        "◆ Solution Explorer".to_string(),
        String::new(),
        format!("Version     {}", env!("CARGO_PKG_VERSION")),
        format!("Config      {}", config.config_path.display()),
        format!(
            "Catalog     {}",
            config
                .catalog_path
                .as_ref()
                .map_or_else(|| "(built-in)".to_string(), |p| p.display().to_string())
        ),
        String::new(),
        format!("  API        {}", config.api_url),
        format!(
            "  API key    {}",
            if config.api_key.is_some() {
                "set"
            } else {
                "missing"
            }
        ),
        format!("  Timeout    {}s", config.request_timeout_secs),
        format!("  Log level  {}", config.log_level),
        String::new(),
        "Models".to_string(),
        format!("  chat         {}", models.chat_models.join(", ")),
        format!("  default      {}", models.default_chat_model),
        format!("  vision       {}", models.vision_model),
        format!(
            "  image        {} (steps={}, n={})",
            models.image.model, models.image.steps, models.image.n
        ),
        format!("  chain        {}", models.chain_model),
        format!("  router       {}", models.router_model),
    ];

    for (name, description) in models.routes.iter() {
        lines.push(format!("    route      {name}: {description}"));
    }

    lines.push(format!(
        "  proposers    {}",
        models.proposer_models.join(", ")
    ));
    lines.push(format!("  aggregator   {}", models.aggregator_model));
    lines.push(format!("  orchestrator {}", models.orchestrator_model));
    lines.push(format!("  worker       {}", models.worker_model));
    lines.push(format!("  temperature  {:.2}", models.temperature));

    lines.push(String::new());
    lines.push(format!(
        "Gateway     {}:{} (public bind {}, timeout {}s)",
        config.gateway.host,
        config.gateway.port,
        if config.gateway.allow_public_bind {
            "allowed"
        } else {
            "refused"
        },
        config.gateway.request_timeout_secs
    ));

    lines.join("\n")
}
