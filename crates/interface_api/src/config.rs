//! API configuration

use serde::Deserialize;

use core_kernel::Credential;
use infra_llm::OpenAiConfig;

/// Variable holding the completion service key, outside the `API_` prefix
pub const OPENAI_API_KEY_VAR: &str = "OPENAI_API_KEY";

/// Log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable lines
    #[default]
    Pretty,
    /// One JSON object per line
    Json,
}

/// API configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Server host
    pub host: String,
    /// Server port
    pub port: u16,
    /// Log level
    pub log_level: String,
    pub log_format: LogFormat,
    /// Completion service settings
    pub completion: CompletionSettings,
}

/// Completion service settings
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CompletionSettings {
    /// API key; absent or placeholder values disable the pipeline
    pub api_key: Option<String>,
    pub base_url: String,
    pub model: String,
    pub temperature: f32,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            log_level: "info".to_string(),
            log_format: LogFormat::Pretty,
            completion: CompletionSettings::default(),
        }
    }
}

impl Default for CompletionSettings {
    fn default() -> Self {
        let adapter = OpenAiConfig::default();
        Self {
            api_key: None,
            base_url: adapter.base_url,
            model: adapter.model,
            temperature: adapter.temperature,
        }
    }
}

impl ApiConfig {
    /// Loads configuration from the process environment
    ///
    /// Reads `API_*` variables (nested keys separated by `__`, for example
    /// `API_COMPLETION__MODEL`). `OPENAI_API_KEY` overrides
    /// `API_COMPLETION__API_KEY`.
    pub fn from_env() -> Result<Self, config::ConfigError> {
        Self::load(None)
    }

    /// Loads configuration from an explicit variable map
    pub fn from_vars(vars: config::Map<String, String>) -> Result<Self, config::ConfigError> {
        Self::load(Some(vars))
    }

    fn load(vars: Option<config::Map<String, String>>) -> Result<Self, config::ConfigError> {
        let openai_key = match &vars {
            Some(vars) => vars.get(OPENAI_API_KEY_VAR).cloned(),
            None => std::env::var(OPENAI_API_KEY_VAR).ok(),
        };

        config::Config::builder()
            .add_source(
                config::Environment::with_prefix("API")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true)
                    .source(vars),
            )
            .set_override_option("completion.api_key", openai_key)?
            .build()?
            .try_deserialize()
    }

    /// Returns the server address
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl CompletionSettings {
    pub fn credential(&self) -> Credential {
        Credential::from_option(self.api_key.clone())
    }

    /// Adapter configuration for these settings
    pub fn adapter_config(&self) -> OpenAiConfig {
        OpenAiConfig {
            base_url: self.base_url.clone(),
            credential: self.credential(),
            model: self.model.clone(),
            temperature: self.temperature,
        }
    }
}
