//! Shared types used by the core and the gateway.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Global application configuration (gateway identity, storage, knowledge base). Load from TOML or env.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CoreConfig {
    /// Application identity shown by `/api/v1/status`.
    pub app_name: String,
    /// HTTP port for the gateway.
    pub port: u16,
    /// Base directory for Sled DBs (the chat history path is derived from this).
    pub storage_path: String,
    /// Path of the legal FAQ knowledge base (JSON array of `{keywords, answer}`).
    pub faq_path: String,
}

impl CoreConfig {
    /// Directory of the chat history Sled DB.
    pub fn history_path(&self) -> PathBuf {
        Path::new(&self.storage_path).join("fir_history")
    }

    /// Load config from file and environment. Precedence: env `FIR_CONFIG` path > `config/gateway.toml` > defaults.
    /// Environment overrides use the `FIR` prefix with `__` as separator (e.g. `FIR__PORT=9000`).
    pub fn load() -> Result<Self, config::ConfigError> {
        let config_path = std::env::var("FIR_CONFIG").unwrap_or_else(|_| "config/gateway.toml".to_string());
        let builder = config::Config::builder()
            .set_default("app_name", "FIR Assistant")?
            .set_default("port", 8001_i64)?
            .set_default("storage_path", "./data")?
            .set_default("faq_path", "data/legal_faq.json")?;

        let path = Path::new(&config_path);
        let builder = if path.exists() {
            builder.add_source(config::File::from(path))
        } else {
            builder
        };

        let built = builder
            .add_source(config::Environment::with_prefix("FIR").separator("__"))
            .build()?;

        built.try_deserialize()
    }
}

/// Structured chatbot reply: display text, RFC 3339 timestamp, optional machine-readable payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatReply {
    pub text: String,
    pub timestamp: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
}

impl ChatReply {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            timestamp: chrono::Local::now().to_rfc3339(),
            data: None,
        }
    }

    pub fn with_data(text: impl Into<String>, data: serde_json::Value) -> Self {
        Self {
            data: Some(data),
            ..Self::text(text)
        }
    }
}
