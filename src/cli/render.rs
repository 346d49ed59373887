use log::debug;
use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::ansi::RenderOptions;
use crate::config::{self, Config, TextSizingMode};
use crate::display::{detect_color_profile, print_markdown, should_use_colors};
use crate::error::{Result, TermarkError};
use crate::kitty::{detect_and_enable, ImageManifest, ImageOptions};
use crate::style::{self, StyleConfig};

/// Command-line overrides for a render
#[derive(Debug, Default)]
pub struct RenderArgs {
    pub file: Option<PathBuf>,
    pub config: Option<PathBuf>,
    pub width: Option<usize>,
    pub style: Option<String>,
    pub text_sizing: Option<TextSizingMode>,
    pub link_numbers: bool,
    pub base_url: Option<String>,
}

/// Render a markdown file, or stdin, to the terminal
pub fn run(args: RenderArgs) -> Result<()> {
    let (config, _) = config::load_or_default(args.config.as_deref())?;
    let source = read_source(args.file.as_deref())?;
    let options = build_options(&config, &args)?;

    print_markdown(&source, &options)
}

fn read_source(file: Option<&Path>) -> Result<String> {
    match file {
        Some(path) => fs::read_to_string(path).map_err(|e| {
            TermarkError::Config(format!("Cannot read '{}': {}", path.display(), e))
        }),
        None => {
            let mut source = String::new();
            io::stdin().read_to_string(&mut source)?;
            Ok(source)
        }
    }
}

fn build_options(config: &Config, args: &RenderArgs) -> Result<RenderOptions> {
    let style_name = args.style.as_deref().unwrap_or(&config.style);
    let styles = resolve_style(style_name, should_use_colors())?;

    let text_sizing = match args.text_sizing.unwrap_or(config.text_sizing) {
        TextSizingMode::On => Some(true),
        TextSizingMode::Off => Some(false),
        TextSizingMode::Auto => {
            // the probe sets the process-wide flag the render falls back to
            let capability = detect_and_enable(Duration::from_millis(config.probe_timeout_ms));
            debug!("text sizing capability: {}", capability);
            None
        }
    };

    Ok(RenderOptions {
        styles,
        word_wrap: args.width.unwrap_or(config.word_wrap),
        color_profile: detect_color_profile(),
        base_url: args.base_url.clone().or_else(|| config.base_url.clone()),
        link_numbers: args.link_numbers || config.link_numbers,
        text_sizing,
        images: image_options(config)?,
    })
}

/// `auto` follows the terminal: the dark theme with colors, ascii without
fn resolve_style(name: &str, colors: bool) -> Result<StyleConfig> {
    match name {
        "auto" if colors => Ok(style::dark()),
        "auto" => Ok(style::ascii()),
        other => style::load_theme(other),
    }
}

fn image_options(config: &Config) -> Result<ImageOptions> {
    if !config.images.enabled {
        return Ok(ImageOptions::default());
    }

    match &config.images.manifest {
        Some(path) => Ok(ImageOptions::new(ImageManifest::load(path)?)),
        None => {
            debug!("images enabled without a manifest, no image will be placed");
            Ok(ImageOptions {
                enabled: true,
                lookup: None,
            })
        }
    }
}
