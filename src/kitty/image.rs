//! Kitty Unicode placeholders for pre-transmitted images
//!
//! Each cell of an image is drawn as U+10EEEE followed by two combining
//! diacritics that encode the cell's row and column. The image id travels in
//! the 24-bit foreground color and the placement id in the underline color.
//! Images must already have been transmitted to the terminal; this module
//! only references them.

use regex::{Captures, Regex};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use std::sync::LazyLock;

use crate::ansi::text::RESET;
use crate::error::{Result, TermarkError};

pub const PLACEHOLDER: char = '\u{10EEEE}';

/// Rows and columns the diacritic table can address
pub const MAX_CELLS: u32 = 32;

/// Image id of the 1×1 transparent anchor image
pub const TRANSPARENT_IMAGE_ID: u32 = 1;

const DIACRITICS: [char; MAX_CELLS as usize] = [
    '\u{0305}', '\u{030D}', '\u{030E}', '\u{0310}', '\u{0312}', '\u{033D}', '\u{033E}', '\u{033F}',
    '\u{0346}', '\u{034A}', '\u{034B}', '\u{034C}', '\u{0350}', '\u{0351}', '\u{0352}', '\u{0357}',
    '\u{035B}', '\u{0363}', '\u{0364}', '\u{0365}', '\u{0366}', '\u{0367}', '\u{0368}', '\u{0369}',
    '\u{036A}', '\u{036B}', '\u{036C}', '\u{036D}', '\u{036E}', '\u{036F}', '\u{0483}', '\u{0484}',
];

static IMAGE_MARKER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\[KITTY_IMAGE:id=(\d+),cols=(\d+),rows=(\d+)\]")
        .unwrap_or_else(|e| panic!("invalid image marker pattern: {e}"))
});

/// Where a transmitted image lives and how many cells it covers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImagePlacement {
    pub id: u32,
    pub cols: u32,
    pub rows: u32,
}

/// Resolves image URLs to images already transmitted to the terminal
pub trait ImageLookup {
    fn lookup(&self, url: &str) -> Option<ImagePlacement>;
}

impl<F> ImageLookup for F
where
    F: Fn(&str) -> Option<ImagePlacement>,
{
    fn lookup(&self, url: &str) -> Option<ImagePlacement> {
        self(url)
    }
}

/// URL to placement table, usually written by whatever transmitted the
/// images
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageManifest {
    #[serde(default)]
    pub images: HashMap<String, ImagePlacement>,
}

impl ImageManifest {
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            TermarkError::Config(format!(
                "Cannot read image manifest '{}': {}",
                path.display(),
                e
            ))
        })?;
        Ok(toml::from_str(&content)?)
    }
}

impl ImageLookup for ImageManifest {
    fn lookup(&self, url: &str) -> Option<ImagePlacement> {
        self.images.get(url).copied()
    }
}

/// Placeholder image rendering settings for a render call
#[derive(Default)]
pub struct ImageOptions {
    pub enabled: bool,
    pub lookup: Option<Box<dyn ImageLookup + Send + Sync>>,
}

impl ImageOptions {
    pub fn new(lookup: impl ImageLookup + Send + Sync + 'static) -> Self {
        Self {
            enabled: true,
            lookup: Some(Box::new(lookup)),
        }
    }

    /// Placement for `url` when images are enabled and the image is known
    pub fn placement(&self, url: &str) -> Option<ImagePlacement> {
        if !self.enabled {
            return None;
        }
        self.lookup.as_ref()?.lookup(url)
    }
}

/// Intermediate marker, expanded by [`expand_markers`]
pub fn marker(placement: &ImagePlacement) -> String {
    format!(
        "[KITTY_IMAGE:id={},cols={},rows={}]",
        placement.id, placement.cols, placement.rows
    )
}

fn id_color(id: u32) -> (u32, u32, u32) {
    ((id >> 16) & 0xff, (id >> 8) & 0xff, id & 0xff)
}

fn push_cell(out: &mut String, image_id: u32, placement_id: u32, row: usize, col: usize) {
    let (r, g, b) = id_color(image_id);
    out.push_str(&format!("\x1b[38;2;{};{};{}m", r, g, b));
    let (r, g, b) = id_color(placement_id);
    out.push_str(&format!("\x1b[58;2;{};{};{}m", r, g, b));
    out.push(PLACEHOLDER);
    out.push(DIACRITICS[row]);
    out.push(DIACRITICS[col]);
}

/// Placeholder grid for image `id` with placement id equal to the image id.
/// Grids are capped at 32×32 cells.
pub fn placeholder_grid(id: u32, cols: u32, rows: u32) -> String {
    let cols = cols.min(MAX_CELLS) as usize;
    let rows = rows.min(MAX_CELLS) as usize;

    let mut out = String::new();
    for row in 0..rows {
        for col in 0..cols {
            push_cell(&mut out, id, id, row, col);
        }
        out.push('\n');
    }
    out.push_str(RESET);
    out
}

/// 1×1 placeholder for the transparent anchor image, used to position
/// relative placements in the text flow
pub fn transparent_anchor() -> String {
    let mut out = String::new();
    push_cell(&mut out, TRANSPARENT_IMAGE_ID, TRANSPARENT_IMAGE_ID, 0, 0);
    out.push_str(RESET);
    out
}

/// Replace every image marker with its placeholder grid
pub fn expand_markers(text: &str) -> String {
    IMAGE_MARKER
        .replace_all(text, |caps: &Captures| {
            let field = |i: usize| caps.get(i).and_then(|m| m.as_str().parse::<u32>().ok());
            match (field(1), field(2), field(3)) {
                (Some(id), Some(cols), Some(rows)) => placeholder_grid(id, cols, rows),
                _ => caps[0].to_string(),
            }
        })
        .into_owned()
}
