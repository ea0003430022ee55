use super::Config;

fn first_non_empty(keys: &[&str]) -> Option<String> {
    keys.iter()
        .filter_map(|key| std::env::var(key).ok())
        .find(|value| !value.is_empty())
}

impl Config {
    pub fn apply_env_overrides(&mut self) {
        if let Some(key) = first_non_empty(&["SOLUTION_EXPLORER_API_KEY", "TOGETHER_API_KEY"]) {
            self.api_key = Some(key);
        }

        if let Some(url) = first_non_empty(&["SOLUTION_EXPLORER_API_URL"]) {
            self.api_url = url;
        }

        if let Some(port_str) = first_non_empty(&["SOLUTION_EXPLORER_PORT", "PORT"])
            && let Ok(port) = port_str.parse::<u16>()
        {
            self.gateway.port = port;
        }

        if let Some(host) = first_non_empty(&["SOLUTION_EXPLORER_HOST", "HOST"]) {
            self.gateway.host = host;
        }

        if let Some(level) = first_non_empty(&["SOLUTION_EXPLORER_LOG"]) {
            self.log_level = level;
        }

        if let Some(temp_str) = first_non_empty(&["SOLUTION_EXPLORER_TEMPERATURE"])
            && let Ok(temp) = temp_str.parse::<f64>()
            && (0.0..=2.0).contains(&temp)
        {
            self.models.temperature = temp;
        }
    }
}
