use std::path::PathBuf;
use std::time::Duration;

use crate::config::{self, TextSizingMode};
use crate::error::Result;
use crate::kitty::{detect_text_sizing, is_kitty_terminal, Capability};

/// Probe the terminal for text sizing support and report the result.
///
/// With `enable`, a fully supported terminal gets `text_sizing = "on"`
/// recorded in the config file so later renders skip the probe.
pub fn run(timeout_ms: Option<u64>, enable: bool, config_path: Option<PathBuf>) -> Result<()> {
    let (mut config, config_path) = config::load_or_default(config_path.as_deref())?;

    let timeout = Duration::from_millis(timeout_ms.unwrap_or(config.probe_timeout_ms));
    let capability = detect_text_sizing(timeout)?;

    println!("Text sizing support: {}", capability);
    if is_kitty_terminal() {
        println!("Environment looks like kitty");
    }

    if enable {
        if capability == Capability::Full {
            config.text_sizing = TextSizingMode::On;
            config::save(&config, &config_path)?;
            println!("Enabled text sizing in {}", config_path.display());
        } else {
            eprintln!("Text sizing not fully supported; configuration left unchanged.");
        }
    }

    Ok(())
}
