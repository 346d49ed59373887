//! Markdown rendering for the terminal, with kitty text sizing for headings
//! and Unicode placeholders for pre-transmitted images.

pub mod ansi;
pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod kitty;
pub mod markdown;
pub mod renderer;
pub mod style;

pub use ansi::{ColorProfile, RenderOptions};
pub use error::{Result, TermarkError};
pub use renderer::Renderer;
