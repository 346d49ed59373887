use clap::{Parser, Subcommand};
use std::path::PathBuf;

use termark::cli;
use termark::cli::render::RenderArgs;
use termark::config::TextSizingMode;

#[derive(Parser)]
#[command(name = "termark")]
#[command(about = "Render markdown in the terminal, with kitty text sizing and images", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render a markdown document
    Render {
        /// Markdown file (reads stdin when omitted)
        file: Option<PathBuf>,

        /// Path to config file
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Wrap width in columns (0 disables wrapping)
        #[arg(short, long)]
        width: Option<usize>,

        /// Theme: auto, dark, ascii, or a path to a JSON/TOML theme
        #[arg(short, long)]
        style: Option<String>,

        /// Scaled headings: auto (probe the terminal), on, or off
        #[arg(long)]
        text_sizing: Option<TextSizingMode>,

        /// Number links as [1], [2], ...
        #[arg(long)]
        link_numbers: bool,

        /// Base URL for relative links and images
        #[arg(long)]
        base_url: Option<String>,
    },
    /// Detect kitty text sizing support
    Probe {
        /// Milliseconds to wait for each cursor position report
        #[arg(long)]
        timeout_ms: Option<u64>,

        /// Turn text sizing on in the config file when fully supported
        #[arg(long)]
        enable: bool,

        /// Path to config file
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
    /// Configuration commands
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(Subcommand)]
enum ConfigCommands {
    /// Initialize termark.toml configuration file
    Init {
        /// Path where to create the config file
        #[arg(long)]
        path: Option<PathBuf>,
    },
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Render {
            file,
            config,
            width,
            style,
            text_sizing,
            link_numbers,
            base_url,
        } => cli::render::run(RenderArgs {
            file,
            config,
            width,
            style,
            text_sizing,
            link_numbers,
            base_url,
        }),
        Commands::Probe {
            timeout_ms,
            enable,
            config,
        } => cli::probe::run(timeout_ms, enable, config),
        Commands::Config { command } => match command {
            ConfigCommands::Init { path } => cli::config::init(path),
        },
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
