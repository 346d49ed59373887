//! Kitty terminal protocols
//!
//! Text sizing (OSC 66) for scaled headings, the capability probe that
//! decides whether to use it, and Unicode placeholders for images that were
//! transmitted ahead of time.

pub mod image;
pub mod probe;
pub mod text_sizing;

pub use image::{ImageLookup, ImageManifest, ImageOptions, ImagePlacement};
pub use probe::{detect_and_enable, detect_text_sizing, Capability, ProbeError};
pub use text_sizing::{is_kitty_terminal, is_text_sizing_enabled, set_text_sizing_enabled};
