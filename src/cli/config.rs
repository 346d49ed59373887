use crate::config::{self, Config};
use crate::error::Result;
use std::path::PathBuf;

/// Write a default configuration file, leaving an existing one untouched
pub fn init(path: Option<PathBuf>) -> Result<()> {
    let config_path = path.unwrap_or_else(|| PathBuf::from(config::DEFAULT_PATH));

    if config_path.exists() {
        eprintln!(
            "Configuration file already exists at: {}",
            config_path.display()
        );
        eprintln!("Remove it first if you want to reinitialize.");
        return Ok(());
    }

    let config = Config::default();
    config::save(&config, &config_path)?;

    println!("Configuration file created: {}", config_path.display());
    println!(
        "Defaults: style {}, wrap at {} columns, text sizing {}",
        config.style, config.word_wrap, config.text_sizing
    );
    println!(
        "\nRun 'termark probe --enable --config {}' inside kitty to turn on scaled headings.",
        config_path.display()
    );

    Ok(())
}
