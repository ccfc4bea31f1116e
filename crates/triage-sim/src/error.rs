//! Error types for the reference host.

use triage_engine::ConfigError;

#[derive(Debug, thiserror::Error)]
pub enum SimError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("TOML serialize error: {0}")]
    Serialize(#[from] toml::ser::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("policy: {0}")]
    Config(#[from] ConfigError),
    #[error("invalid value for {field}: {reason}")]
    InvalidConfig { field: &'static str, reason: String },
}
