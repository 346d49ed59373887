//! Color profiles
//!
//! Theme colors are either `#rrggbb`/`#rgb` hex strings or 0-255 palette
//! indices.
//! Each profile degrades them to what the terminal can show.

use crossterm::style::Color;
use serde::{Deserialize, Serialize};

/// Color capability of the output terminal
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorProfile {
    /// No colors; decorations are still emitted
    Ascii,
    /// 16 colors
    Ansi,
    /// 256 colors
    Ansi256,
    /// 24-bit colors
    #[default]
    TrueColor,
}

const ANSI_PALETTE: [(u8, u8, u8); 16] = [
    (0, 0, 0),
    (128, 0, 0),
    (0, 128, 0),
    (128, 128, 0),
    (0, 0, 128),
    (128, 0, 128),
    (0, 128, 128),
    (192, 192, 192),
    (128, 128, 128),
    (255, 0, 0),
    (0, 255, 0),
    (255, 255, 0),
    (0, 0, 255),
    (255, 0, 255),
    (0, 255, 255),
    (255, 255, 255),
];

const CUBE_LEVELS: [u8; 6] = [0, 95, 135, 175, 215, 255];

impl ColorProfile {
    /// Parse a theme color and degrade it to this profile
    pub fn color(self, spec: &str) -> Option<Color> {
        if self == ColorProfile::Ascii {
            return None;
        }
        let parsed = parse_color(spec)?;

        Some(match (self, parsed) {
            (ColorProfile::TrueColor, c) => c,
            (ColorProfile::Ansi256, Color::Rgb { r, g, b }) => Color::AnsiValue(rgb_to_ansi256(r, g, b)),
            (ColorProfile::Ansi, Color::Rgb { r, g, b }) => Color::AnsiValue(nearest_ansi16(r, g, b)),
            (ColorProfile::Ansi, Color::AnsiValue(n)) if n >= 16 => {
                let (r, g, b) = ansi256_to_rgb(n);
                Color::AnsiValue(nearest_ansi16(r, g, b))
            }
            (_, c) => c,
        })
    }

    /// SGR parameter for a foreground color, if the profile shows one
    pub fn foreground(self, spec: &str) -> Option<String> {
        self.color(spec).map(|c| color_sgr(c, false))
    }

    /// SGR parameter for a background color, if the profile shows one
    pub fn background(self, spec: &str) -> Option<String> {
        self.color(spec).map(|c| color_sgr(c, true))
    }
}

fn parse_color(spec: &str) -> Option<Color> {
    let spec = spec.trim();
    if spec.starts_with('#') {
        return parse_hex(spec);
    }
    spec.parse::<u8>().ok().map(Color::AnsiValue)
}

/// `#rgb` or `#rrggbb`; alpha is dropped
fn parse_hex(spec: &str) -> Option<Color> {
    let [r, g, b, _] = csscolorparser::parse(spec).ok()?.to_rgba8();
    Some(Color::Rgb { r, g, b })
}

fn color_sgr(color: Color, background: bool) -> String {
    match color {
        Color::AnsiValue(n) if n < 8 => format!("{}", n + if background { 40 } else { 30 }),
        Color::AnsiValue(n) if n < 16 => format!("{}", n - 8 + if background { 100 } else { 90 }),
        Color::AnsiValue(n) => format!("{};5;{}", if background { 48 } else { 38 }, n),
        Color::Rgb { r, g, b } => format!("{};2;{};{};{}", if background { 48 } else { 38 }, r, g, b),
        // parse_color only produces the two variants above
        _ => String::new(),
    }
}

fn ansi256_to_rgb(n: u8) -> (u8, u8, u8) {
    match n {
        0..=15 => ANSI_PALETTE[n as usize],
        16..=231 => {
            let i = n - 16;
            (
                CUBE_LEVELS[(i / 36) as usize],
                CUBE_LEVELS[((i / 6) % 6) as usize],
                CUBE_LEVELS[(i % 6) as usize],
            )
        }
        _ => {
            let v = 8 + (n - 232) * 10;
            (v, v, v)
        }
    }
}

fn distance(a: (u8, u8, u8), b: (u8, u8, u8)) -> u32 {
    let d = |x: u8, y: u8| (x as i32 - y as i32).pow(2) as u32;
    d(a.0, b.0) + d(a.1, b.1) + d(a.2, b.2)
}

fn rgb_to_ansi256(r: u8, g: u8, b: u8) -> u8 {
    let cube_index = |v: u8| -> u8 {
        match v {
            0..=47 => 0,
            48..=114 => 1,
            _ => (v - 35) / 40,
        }
    };
    let (ri, gi, bi) = (cube_index(r), cube_index(g), cube_index(b));
    let cube = (
        CUBE_LEVELS[ri as usize],
        CUBE_LEVELS[gi as usize],
        CUBE_LEVELS[bi as usize],
    );
    let cube_code = 16 + 36 * ri + 6 * gi + bi;

    let average = ((r as u32 + g as u32 + b as u32) / 3) as u8;
    let gray_index = if average > 238 {
        23
    } else {
        average.saturating_sub(3) / 10
    };
    let gray_level = 8 + 10 * gray_index;
    let gray_code = 232 + gray_index;

    let target = (r, g, b);
    if distance(target, (gray_level, gray_level, gray_level)) < distance(target, cube) {
        gray_code
    } else {
        cube_code
    }
}

fn nearest_ansi16(r: u8, g: u8, b: u8) -> u8 {
    let mut best = 0;
    let mut best_distance = u32::MAX;
    for (i, entry) in ANSI_PALETTE.iter().enumerate() {
        let d = distance((r, g, b), *entry);
        if d < best_distance {
            best = i as u8;
            best_distance = d;
        }
    }
    best
}
