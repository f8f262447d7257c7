//! Configuration management

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::application::errors::ConfigError;
use crate::application::voice::VoiceConfig;
use crate::infrastructure::gateway::AfricasTalkingConfig;
use crate::infrastructure::llm::LLMConfig;

/// Gateway configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct Config {
    pub server: ServerConfig,
    pub gateway: AfricasTalkingConfig,
    pub llm: LLMConfig,
    pub voice: VoiceConfig,
    pub database: DatabaseConfig,
    pub session: SessionConfig,
    pub security: SecurityConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
        }
    }
}

impl ServerConfig {
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct DatabaseConfig {
    /// SQLite file; `:memory:` keeps everything in process
    pub path: PathBuf,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("data/ujamaa.db"),
        }
    }
}

impl DatabaseConfig {
    pub fn is_memory(&self) -> bool {
        self.path.as_os_str() == ":memory:"
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct SessionConfig {
    pub ttl_seconds: u64,
    pub cleanup_interval_seconds: u64,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            ttl_seconds: 180,
            cleanup_interval_seconds: 60,
        }
    }
}

impl SessionConfig {
    pub fn ttl(&self) -> Duration {
        Duration::from_secs(self.ttl_seconds)
    }

    pub fn cleanup_interval(&self) -> Duration {
        Duration::from_secs(self.cleanup_interval_seconds.max(1))
    }
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct SecurityConfig {
    pub rate_limit: RateLimitConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct RateLimitConfig {
    pub max_requests: u32,
    pub window_seconds: u64,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            max_requests: 20,
            window_seconds: 60,
        }
    }
}

impl Config {
    /// File values (or defaults when the file is absent), then environment
    /// overrides, validated as a whole
    pub fn resolve(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let mut config = if path.exists() {
            Self::read(path)?
        } else {
            tracing::info!("No config at {}, using defaults", path.display());
            Config::default()
        };
        config.apply_env();
        config.validate()?;
        Ok(config)
    }

    fn read(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::Parse(format!("Failed to read config: {}", e)))?;
        serde_yaml::from_str(&content)
            .map_err(|e| ConfigError::Parse(format!("Failed to parse config: {}", e)))
    }

    /// Environment variables win over file values
    pub fn apply_env(&mut self) {
        if let Ok(username) = std::env::var("AT_USERNAME") {
            self.gateway.sandbox = username == "sandbox";
            self.gateway.username = username;
        }
        if let Ok(key) = std::env::var("AT_API_KEY") {
            self.gateway.api_key = key;
        }
        if let Ok(sender) = std::env::var("AT_SENDER_ID") {
            self.gateway.sender_id = Some(sender);
        }

        self.llm.apply_env();

        if let Ok(host) = std::env::var("UJAMAA_HOST") {
            self.server.host = host;
        }
        if let Ok(port) = std::env::var("UJAMAA_PORT") {
            match port.parse() {
                Ok(port) => self.server.port = port,
                Err(_) => tracing::warn!("Ignoring invalid UJAMAA_PORT: {}", port),
            }
        }
        if let Ok(path) = std::env::var("UJAMAA_DB") {
            self.database.path = PathBuf::from(path);
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.gateway.username.trim().is_empty() {
            return Err(ConfigError::MissingField("gateway.username".to_string()));
        }
        if self.security.rate_limit.window_seconds == 0 {
            return Err(ConfigError::InvalidValue(
                "security.rate-limit.window-seconds must be positive".to_string(),
            ));
        }
        if self.session.ttl_seconds == 0 {
            return Err(ConfigError::InvalidValue(
                "session.ttl-seconds must be positive".to_string(),
            ));
        }
        Ok(())
    }

    pub fn to_yaml(&self) -> Result<String, ConfigError> {
        serde_yaml::to_string(self).map_err(|e| ConfigError::Parse(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_yaml_uses_defaults() {
        let yaml = "
server:
  port: 8080
gateway:
  username: ujamaa
  api-key: secret
  sandbox: false
security:
  rate-limit:
    max-requests: 5
";
        let config: Config = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.gateway.api_key, "secret");
        assert!(!config.gateway.sandbox);
        assert_eq!(config.security.rate_limit.max_requests, 5);
        assert_eq!(config.security.rate_limit.window_seconds, 60);
        assert_eq!(config.session.ttl_seconds, 180);
        assert_eq!(config.voice.specialists.len(), 5);
        config.validate().unwrap();
    }

    #[test]
    fn test_default_round_trips_through_yaml() {
        let yaml = Config::default().to_yaml().unwrap();
        assert!(yaml.contains("rate-limit"));
        let parsed: Config = serde_yaml::from_str(&yaml).unwrap();
        assert_eq!(parsed.gateway.username, "sandbox");
        assert_eq!(parsed.llm.temperature, 0.7);
    }

    // One test touches AT_USERNAME so parallel tests never observe it
    #[test]
    fn test_resolve_validates_after_environment() {
        let path = std::env::temp_dir().join(format!("ujamaa-{}.yaml", uuid::Uuid::new_v4()));
        std::env::remove_var("AT_USERNAME");

        std::fs::write(&path, "gateway:\n  username: ujamaa\n").unwrap();
        let config = Config::resolve(&path).unwrap();
        assert_eq!(config.gateway.username, "ujamaa");

        // A blank username from the environment must not slip past validation
        std::env::set_var("AT_USERNAME", "  ");
        let blank = Config::resolve(&path);
        std::env::remove_var("AT_USERNAME");
        assert!(matches!(blank, Err(ConfigError::MissingField(_))));

        std::fs::write(&path, "session:\n  ttl-seconds: 0\n").unwrap();
        let zero_ttl = Config::resolve(&path);
        std::fs::remove_file(&path).unwrap();
        assert!(matches!(zero_ttl, Err(ConfigError::InvalidValue(_))));
    }

    #[test]
    fn test_validate_rejects_zero_window() {
        let mut config = Config::default();
        config.security.rate_limit.window_seconds = 0;
        assert!(matches!(config.validate(), Err(ConfigError::InvalidValue(_))));
    }
}
