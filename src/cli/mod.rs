//! Command-line interface module
//!
//! Implements all CLI commands using clap:
//! - render: Render a markdown file (or stdin) to the terminal
//! - probe: Detect kitty text sizing support
//! - config init: Initialize configuration file
pub mod config;
pub mod probe;
pub mod render;
