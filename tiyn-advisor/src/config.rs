use std::env;

const DEFAULT_API_URL: &str = "http://localhost:11434/api/generate";
const DEFAULT_MODEL: &str = "mistral";

/// Where to send generation requests and which model to ask for.
#[derive(Debug, Clone)]
pub struct AdvisorConfig {
    pub api_url: String,
    pub model: String,
}

impl Default for AdvisorConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
        }
    }
}

impl AdvisorConfig {
    /// Read `OLLAMA_API` and `MODEL_NAME` from the environment, falling back
    /// to a local Ollama instance.
    pub fn from_env() -> Self {
        Self {
            api_url: env::var("OLLAMA_API").unwrap_or_else(|_| DEFAULT_API_URL.to_string()),
            model: env::var("MODEL_NAME").unwrap_or_else(|_| DEFAULT_MODEL.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_point_at_local_ollama() {
        let config = AdvisorConfig::default();
        assert_eq!(config.api_url, "http://localhost:11434/api/generate");
        assert_eq!(config.model, "mistral");
    }
}
