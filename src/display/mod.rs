//! Terminal display module
//!
//! Handles rich terminal output with automatic TTY detection.

mod formatter;
mod terminal;

pub use formatter::{print_markdown, render_or_plain};
pub use terminal::{detect_color_profile, should_use_colors};
