//! Styled text primitives
//!
//! SGR composition, case transforms, markdown un-escaping, token templates
//! and escape stripping.

use crossterm::style::Attribute;
use regex::Regex;
use std::io::{self, Write};
use std::sync::LazyLock;
use unicode_width::UnicodeWidthStr;

use super::color::ColorProfile;
use crate::error::{Result, TermarkError};
use crate::style::StylePrimitive;

pub const RESET: &str = "\x1b[0m";

/// SGR sequences plus OSC sequences such as hyperlinks
static ESCAPE_SEQUENCE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\x1b\[[0-9;]*m|\x1b\][^\x07\x1b]*(?:\x07|\x1b\\)")
        .unwrap_or_else(|e| panic!("invalid escape pattern: {e}"))
});

/// SGR parameters for `rules`, in application order.
///
/// Order matters when attributes combine: inverse comes after the colors so
/// it swaps what they set. Faint is only emitted when `with_faint` is set.
pub fn sgr_params(profile: ColorProfile, rules: &StylePrimitive, with_faint: bool) -> Vec<String> {
    let mut params = Vec::new();

    if let Some(fg) = rules.color.as_deref().and_then(|c| profile.foreground(c)) {
        params.push(fg);
    }
    if let Some(bg) = rules
        .background_color
        .as_deref()
        .and_then(|c| profile.background(c))
    {
        params.push(bg);
    }

    let decorations = [
        (rules.underline, Attribute::Underlined),
        (rules.bold, Attribute::Bold),
        (rules.italic, Attribute::Italic),
        (rules.crossed_out, Attribute::CrossedOut),
        (rules.overlined, Attribute::OverLined),
        (rules.inverse, Attribute::Reverse),
        (rules.blink, Attribute::SlowBlink),
    ];
    for (enabled, attribute) in decorations {
        if enabled == Some(true) {
            params.push(attribute.sgr());
        }
    }

    if with_faint && rules.faint == Some(true) {
        params.push(Attribute::Dim.sgr());
    }

    params
}

/// Apply case transform and SGR styling to `s`
pub fn styled(profile: ColorProfile, rules: &StylePrimitive, s: &str) -> String {
    let text = transform_case(rules, s);
    let params = sgr_params(profile, rules, false);
    if params.is_empty() {
        return text;
    }
    format!("\x1b[{}m{}{}", params.join(";"), text, RESET)
}

/// Write `s` styled with `rules`; empty text writes nothing
pub fn render_text<W: Write + ?Sized>(
    w: &mut W,
    profile: ColorProfile,
    rules: &StylePrimitive,
    s: &str,
) -> io::Result<()> {
    if s.is_empty() {
        return Ok(());
    }
    w.write_all(styled(profile, rules, s).as_bytes())
}

/// Upper, else lower, else title case: the first enabled transform wins
pub fn transform_case(rules: &StylePrimitive, s: &str) -> String {
    if rules.upper == Some(true) {
        s.to_uppercase()
    } else if rules.lower == Some(true) {
        s.to_lowercase()
    } else if rules.title == Some(true) {
        title_case(s)
    } else {
        s.to_string()
    }
}

fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut at_word_start = true;
    for c in s.chars() {
        if c.is_alphanumeric() || c == '\'' {
            if at_word_start {
                out.extend(c.to_uppercase());
            } else {
                out.extend(c.to_lowercase());
            }
            at_word_start = false;
        } else {
            out.push(c);
            at_word_start = true;
        }
    }
    out
}

/// Markdown punctuation that may be backslash-escaped
const ESCAPABLE: &[char] = &[
    '\\', '`', '*', '_', '{', '}', '[', ']', '<', '>', '(', ')', '#', '+', '-', '.', '!', '|',
];

/// Replace backslash escapes of markdown punctuation with the literal char
pub fn unescape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut chars = s.chars().peekable();
    while let Some(c) = chars.next() {
        if c == '\\' {
            if let Some(&next) = chars.peek() {
                if ESCAPABLE.contains(&next) {
                    out.push(next);
                    chars.next();
                    continue;
                }
            }
        }
        out.push(c);
    }
    out
}

/// Substitute `token` into a `{{.text}}` template
pub fn format_token(format: &str, token: &str) -> Result<String> {
    let mut out = String::with_capacity(format.len() + token.len());
    let mut rest = format;

    while let Some(start) = rest.find("{{") {
        out.push_str(&rest[..start]);
        let after = &rest[start + 2..];
        let end = after.find("}}").ok_or_else(|| {
            TermarkError::Template(format!("unclosed action in format {:?}", format))
        })?;

        let action = after[..end]
            .trim()
            .trim_start_matches('-')
            .trim_end_matches('-')
            .trim();
        if action != ".text" {
            return Err(TermarkError::Template(format!(
                "unsupported action {{{{{}}}}} in format {:?}",
                action, format
            )));
        }
        out.push_str(token);
        rest = &after[end + 2..];
    }

    out.push_str(rest);
    Ok(out)
}

/// Remove SGR and OSC escape sequences
pub fn strip_ansi(s: &str) -> String {
    ESCAPE_SEQUENCE.replace_all(s, "").into_owned()
}

/// Display width in cells, ignoring escape sequences
pub fn visible_width(s: &str) -> usize {
    UnicodeWidthStr::width(strip_ansi(s).as_str())
}
