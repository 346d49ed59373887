use thiserror::Error;

use crate::kitty::probe::ProbeError;

/// Termark error types
#[derive(Error, Debug)]
pub enum TermarkError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Template error: {0}")]
    Template(String),

    #[error("Renderer error: {0}")]
    Renderer(String),

    #[error("Terminal probe failed: {0}")]
    Probe(#[from] ProbeError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parsing error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("TOML serialization error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Rendered output is not valid UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}

/// Result type for termark operations
pub type Result<T> = std::result::Result<T, TermarkError>;
