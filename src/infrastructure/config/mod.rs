//! Configuration management

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::application::errors::ConfigError;
use crate::infrastructure::llm::LLMConfig;

/// Service configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct Config {
    pub server: ServerConfig,
    pub llm: LLMConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct ServerConfig {
    /// Address the HTTP server listens on
    pub bind: String,
    /// Origins allowed to call the API from a browser; empty allows any
    pub allowed_origins: Vec<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: "0.0.0.0:3000".to_string(),
            allowed_origins: vec!["http://localhost:5173".to_string()],
        }
    }
}

impl Config {
    /// Load a YAML file, then apply environment overrides
    pub fn load(path: impl Into<PathBuf>) -> Result<Self, ConfigError> {
        let path = path.into();
        let content = std::fs::read_to_string(&path)
            .map_err(|e| ConfigError::Parse(format!("Failed to read config {}: {}", path.display(), e)))?;

        let mut config = Self::from_yaml(&content)?;
        config.apply_env()?;
        Ok(config)
    }

    /// Defaults plus environment overrides
    pub fn load_env() -> Result<Self, ConfigError> {
        let mut config = Config::default();
        config.apply_env()?;
        Ok(config)
    }

    pub fn from_yaml(content: &str) -> Result<Self, ConfigError> {
        serde_yaml::from_str(content).map_err(|e| ConfigError::Parse(format!("Failed to parse config: {}", e)))
    }

    pub fn to_yaml(&self) -> Result<String, ConfigError> {
        serde_yaml::to_string(self).map_err(|e| ConfigError::Parse(format!("Failed to serialize config: {}", e)))
    }

    fn apply_env(&mut self) -> Result<(), ConfigError> {
        // A missing .env file is fine
        if let Err(e) = dotenvy::dotenv() {
            if !e.not_found() {
                tracing::warn!("Failed to load .env: {}", e);
            }
        }

        if let Ok(bind) = std::env::var("BIND_ADDR") {
            self.server.bind = bind;
        }

        if let Ok(port) = std::env::var("PORT") {
            let port: u16 = port
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidValue(format!("PORT must be a port number, got '{}'", port)))?;
            self.server.bind = with_port(&self.server.bind, port);
        }

        if let Ok(origins) = std::env::var("FRONTEND_URL") {
            self.server.allowed_origins = parse_origins(&origins);
        }

        self.llm.apply_env();
        Ok(())
    }
}

/// Split a comma separated origin list, dropping blanks
pub fn parse_origins(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|origin| !origin.is_empty())
        .map(str::to_string)
        .collect()
}

/// Replace the port of a `host:port` bind address
fn with_port(bind: &str, port: u16) -> String {
    let host = match bind.rsplit_once(':') {
        Some((host, _)) if !host.is_empty() => host,
        _ => "0.0.0.0",
    };
    format!("{}:{}", host, port)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::ProviderId;

    #[test]
    fn test_parse_origins() {
        assert_eq!(
            parse_origins(" http://a.test , ,http://b.test,"),
            vec!["http://a.test".to_string(), "http://b.test".to_string()]
        );
        assert!(parse_origins(" , ").is_empty());
    }

    #[test]
    fn test_with_port() {
        assert_eq!(with_port("0.0.0.0:3000", 8080), "0.0.0.0:8080");
        assert_eq!(with_port("[::1]:3000", 4000), "[::1]:4000");
        assert_eq!(with_port("", 4000), "0.0.0.0:4000");
    }

    #[test]
    fn test_yaml_sections_are_optional() {
        let yaml = "llm:\n  claude-api-key: sk-test\n  max-tokens: \"1200\"\n";
        let config = Config::from_yaml(yaml).unwrap();
        assert_eq!(config.server, ServerConfig::default());
        assert_eq!(config.llm.api_key(ProviderId::Claude), Some("sk-test"));
        assert_eq!(config.llm.max_tokens.as_deref(), Some("1200"));
    }

    #[test]
    fn test_numeric_max_tokens_accepted() {
        let config = Config::from_yaml("llm:\n  max-tokens: 1500\n").unwrap();
        assert_eq!(config.llm.max_tokens.as_deref(), Some("1500"));

        let config = Config::from_yaml("server:\n  allowed-origins: []\n").unwrap();
        assert!(config.server.allowed_origins.is_empty());
        assert_eq!(config.server.bind, "0.0.0.0:3000");
    }

    #[test]
    fn test_default_config_round_trips_through_yaml() {
        let yaml = Config::default().to_yaml().unwrap();
        assert!(yaml.contains("allowed-origins"));
        assert_eq!(Config::from_yaml(&yaml).unwrap(), Config::default());
    }
}
