use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

/// Termark configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Built-in theme name (`auto`, `dark`, `ascii`) or path to a JSON/TOML
    /// theme; `auto` picks `dark` when colors are enabled
    pub style: String,

    /// Column at which paragraphs are wrapped (0 disables wrapping)
    pub word_wrap: usize,

    /// Base URL relative links and images are resolved against
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,

    /// Number links as `[1]`, `[2]`, ...
    pub link_numbers: bool,

    /// Scaled headings through the kitty text sizing protocol
    pub text_sizing: TextSizingMode,

    /// How long to wait for each cursor position report while probing
    pub probe_timeout_ms: u64,

    /// Placeholder images
    pub images: Images,
}

/// When to draw scaled headings
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextSizingMode {
    /// Probe the terminal and use text sizing if fully supported
    #[default]
    Auto,
    On,
    Off,
}

/// Image placeholder configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Images {
    /// Replace known images with kitty Unicode placeholders
    pub enabled: bool,

    /// TOML manifest mapping image URLs to transmitted image ids
    #[serde(skip_serializing_if = "Option::is_none")]
    pub manifest: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            style: "auto".to_string(),
            word_wrap: 80,
            base_url: None,
            link_numbers: false,
            text_sizing: TextSizingMode::Auto,
            probe_timeout_ms: 200,
            images: Images::default(),
        }
    }
}

impl fmt::Display for TextSizingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TextSizingMode::Auto => write!(f, "auto"),
            TextSizingMode::On => write!(f, "on"),
            TextSizingMode::Off => write!(f, "off"),
        }
    }
}

impl FromStr for TextSizingMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "auto" => Ok(TextSizingMode::Auto),
            "on" | "true" => Ok(TextSizingMode::On),
            "off" | "false" => Ok(TextSizingMode::Off),
            other => Err(format!(
                "invalid text sizing mode '{}' (expected auto, on or off)",
                other
            )),
        }
    }
}
