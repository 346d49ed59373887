//! TTY detection and color support logic

use log::debug;
use std::io::IsTerminal;

use crate::ansi::ColorProfile;

/// Determine if colors should be used based on environment and TTY status
pub fn should_use_colors() -> bool {
    // Priority order:
    // 1. NO_COLOR takes precedence (https://no-color.org/)
    if std::env::var("NO_COLOR").is_ok() {
        return false;
    }

    // 2. CLICOLOR_FORCE enables colors even when piped
    if let Ok(val) = std::env::var("CLICOLOR_FORCE") {
        if val != "0" {
            return true;
        }
    }

    // 3. CLICOLOR=0 disables colors
    if let Ok(val) = std::env::var("CLICOLOR") {
        if val == "0" {
            return false;
        }
    }

    // 4. Check if stdout is a TTY
    std::io::stdout().is_terminal()
}

/// Pick the richest color profile the environment allows
pub fn detect_color_profile() -> ColorProfile {
    if !should_use_colors() {
        return ColorProfile::Ascii;
    }

    let colorterm = std::env::var("COLORTERM").unwrap_or_default();
    let term = std::env::var("TERM").unwrap_or_default();

    let profile = if colorterm == "truecolor" || colorterm == "24bit" {
        ColorProfile::TrueColor
    } else if term == "dumb" {
        ColorProfile::Ascii
    } else if term.contains("256color") {
        ColorProfile::Ansi256
    } else {
        ColorProfile::Ansi
    };

    debug!(
        "color profile {:?} (TERM={:?}, COLORTERM={:?})",
        profile, term, colorterm
    );
    profile
}
