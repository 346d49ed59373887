//! Kitty text sizing protocol (OSC 66)
//!
//! Scaled text is sent as `ESC ] 66 ; <metadata> ; <text> BEL`, where the
//! metadata is a colon separated list of `key=value` pairs. The payload must
//! be plain text, so colors and decorations are applied around the escape.
//!
//! The escape does not survive word wrapping, so it travels through the
//! render pipeline base64 encoded between `KITTY_TEXT_SIZE:` and
//! `:END_KITTY_TEXT_SIZE` and is decoded once the output is complete.

use base64::{engine::general_purpose, Engine as _};
use log::debug;
use std::sync::RwLock;

use crate::ansi::text::{sgr_params, RESET};
use crate::ansi::ColorProfile;
use crate::style::StylePrimitive;

pub const MARKER_START: &str = "KITTY_TEXT_SIZE:";
pub const MARKER_END: &str = ":END_KITTY_TEXT_SIZE";

static TEXT_SIZING_ENABLED: RwLock<bool> = RwLock::new(false);

/// Enable or disable scaled headings for renders that do not choose
/// explicitly
pub fn set_text_sizing_enabled(enabled: bool) {
    match TEXT_SIZING_ENABLED.write() {
        Ok(mut flag) => *flag = enabled,
        Err(poisoned) => *poisoned.into_inner() = enabled,
    }
}

pub fn is_text_sizing_enabled() -> bool {
    match TEXT_SIZING_ENABLED.read() {
        Ok(flag) => *flag,
        Err(poisoned) => *poisoned.into_inner(),
    }
}

/// Text sizing parameters that are set and within protocol range
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TextSizing {
    /// `s`: 2-7; a scale of 1 is the terminal default and never sent
    pub scale: Option<u32>,
    /// `w`: 0-7
    pub width: Option<u32>,
    /// `n`: 0-15
    pub numerator: Option<u32>,
    /// `d`: 0-15, greater than `n`
    pub denominator: Option<u32>,
    /// `v`: 0-2
    pub valign: Option<u32>,
    /// `h`: 0-2
    pub halign: Option<u32>,
}

impl TextSizing {
    pub fn from_style(style: &StylePrimitive) -> Self {
        let within = |value: Option<u32>, min: u32, max: u32| value.filter(|v| (min..=max).contains(v));

        let mut sizing = Self {
            scale: within(style.kitty_scale, 2, 7),
            width: within(style.kitty_width, 0, 7),
            numerator: within(style.kitty_numerator, 0, 15),
            denominator: within(style.kitty_denominator, 0, 15),
            valign: within(style.kitty_valign, 0, 2),
            halign: within(style.kitty_halign, 0, 2),
        };

        // a fraction with d <= n is not a fraction; d = 0 disables it
        if let (Some(n), Some(d)) = (sizing.numerator, sizing.denominator) {
            if d != 0 && d <= n {
                sizing.numerator = None;
                sizing.denominator = None;
            }
        }

        sizing
    }

    /// Colon separated `key=value` list in `s w n d v h` order
    pub fn metadata(&self) -> String {
        let fields = [
            ("s", self.scale),
            ("w", self.width),
            ("n", self.numerator),
            ("d", self.denominator),
            ("v", self.valign),
            ("h", self.halign),
        ];
        fields
            .iter()
            .filter_map(|(key, value)| value.map(|v| format!("{}={}", key, v)))
            .collect::<Vec<_>>()
            .join(":")
    }
}

/// Whether the style asks for text sizing at all
pub fn has_text_sizing(style: &StylePrimitive) -> bool {
    style.kitty_scale.is_some()
        || style.kitty_width.is_some()
        || style.kitty_numerator.is_some()
        || style.kitty_denominator.is_some()
        || style.kitty_valign.is_some()
        || style.kitty_halign.is_some()
}

/// Rows a scaled line occupies beyond the first
pub fn extra_rows(style: &StylePrimitive) -> usize {
    TextSizing::from_style(style)
        .scale
        .map_or(0, |scale| scale as usize - 1)
}

/// Opening SGR sequence and matching reset for `style`, faint included
pub fn ansi_wrapper(profile: ColorProfile, style: &StylePrimitive) -> (String, &'static str) {
    let params = sgr_params(profile, style, true);
    if params.is_empty() {
        (String::new(), "")
    } else {
        (format!("\x1b[{}m", params.join(";")), RESET)
    }
}

pub fn build_osc66(metadata: &str, text: &str) -> String {
    format!("\x1b]66;{};{}\x07", metadata, text)
}

/// Scaled and styled `text`; plain styled text when no parameter applies
pub fn encode_scaled(profile: ColorProfile, style: &StylePrimitive, text: &str) -> String {
    let metadata = TextSizing::from_style(style).metadata();
    let (open, close) = ansi_wrapper(profile, style);

    if metadata.is_empty() {
        format!("{}{}{}", open, text, close)
    } else {
        format!("{}{}{}", open, build_osc66(&metadata, text), close)
    }
}

pub fn wrap_marker(bytes: &[u8]) -> String {
    format!(
        "{}{}{}",
        MARKER_START,
        general_purpose::STANDARD.encode(bytes),
        MARKER_END
    )
}

/// Replace every marker with its decoded payload.
///
/// Markers are matched leftmost first and decoded payloads are never scanned
/// again. A marker that fails to decode is dropped; a start sentinel without
/// an end is removed and the text after it kept.
pub fn decode_markers(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;

    while let Some(start) = rest.find(MARKER_START) {
        out.push_str(&rest[..start]);
        let after = &rest[start + MARKER_START.len()..];

        let Some(end) = after.find(MARKER_END) else {
            debug!("dropping unterminated text sizing marker");
            rest = after;
            continue;
        };

        let decoded = general_purpose::STANDARD
            .decode(&after[..end])
            .ok()
            .and_then(|bytes| String::from_utf8(bytes).ok());
        match decoded {
            Some(payload) => out.push_str(&payload),
            None => debug!("dropping undecodable text sizing marker"),
        }
        rest = &after[end + MARKER_END.len()..];
    }

    out.push_str(rest);
    out
}

/// Environment hint that we run inside kitty; probing is authoritative
pub fn is_kitty_terminal() -> bool {
    let term = std::env::var("TERM").unwrap_or_default();
    let term_program = std::env::var("TERM_PROGRAM").unwrap_or_default();
    let kitty_pid = std::env::var("KITTY_PID").unwrap_or_default();

    term.contains("kitty") || term_program == "kitty" || !kitty_pid.is_empty()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    fn style() -> StylePrimitive {
        StylePrimitive::default()
    }

    #[test]
    fn test_metadata_order() {
        let s = StylePrimitive {
            kitty_scale: Some(3),
            kitty_width: Some(4),
            kitty_numerator: Some(1),
            kitty_denominator: Some(2),
            kitty_valign: Some(2),
            kitty_halign: Some(1),
            ..style()
        };
        assert_eq!(TextSizing::from_style(&s).metadata(), "s=3:w=4:n=1:d=2:v=2:h=1");
    }

    #[test]
    fn test_out_of_range_values_are_dropped() {
        let s = StylePrimitive {
            kitty_scale: Some(9),
            kitty_width: Some(8),
            kitty_numerator: Some(16),
            kitty_valign: Some(3),
            kitty_halign: Some(7),
            ..style()
        };
        let metadata = TextSizing::from_style(&s).metadata();
        assert_eq!(metadata, "");
        assert!(!metadata.contains("s=9"));
    }

    #[test]
    fn test_scale_one_is_omitted() {
        let s = StylePrimitive {
            kitty_scale: Some(1),
            kitty_width: Some(0),
            ..style()
        };
        assert_eq!(TextSizing::from_style(&s).metadata(), "w=0");
    }

    #[test]
    fn test_invalid_fraction_is_dropped() {
        let s = StylePrimitive {
            kitty_scale: Some(2),
            kitty_numerator: Some(3),
            kitty_denominator: Some(2),
            ..style()
        };
        assert_eq!(TextSizing::from_style(&s).metadata(), "s=2");

        let s = StylePrimitive {
            kitty_numerator: Some(3),
            kitty_denominator: Some(0),
            ..style()
        };
        assert_eq!(TextSizing::from_style(&s).metadata(), "n=3:d=0");
    }

    #[test]
    fn test_has_text_sizing() {
        assert!(!has_text_sizing(&style()));
        assert!(has_text_sizing(&StylePrimitive {
            kitty_halign: Some(0),
            ..style()
        }));
    }

    #[test]
    fn test_extra_rows() {
        let scaled = |scale| StylePrimitive {
            kitty_scale: Some(scale),
            ..style()
        };
        assert_eq!(extra_rows(&style()), 0);
        assert_eq!(extra_rows(&scaled(1)), 0);
        assert_eq!(extra_rows(&scaled(3)), 2);
        assert_eq!(extra_rows(&scaled(9)), 0);
    }

    #[test]
    fn test_styles_wrap_the_escape() {
        let s = StylePrimitive {
            color: Some("#ff0000".to_string()),
            bold: Some(true),
            faint: Some(true),
            kitty_scale: Some(2),
            ..style()
        };
        assert_eq!(
            encode_scaled(ColorProfile::TrueColor, &s, "Big"),
            "\x1b[38;2;255;0;0;1;2m\x1b]66;s=2;Big\x07\x1b[0m"
        );
    }

    #[test]
    fn test_unstyled_without_metadata_is_plain() {
        assert_eq!(encode_scaled(ColorProfile::TrueColor, &style(), "x"), "x");
        assert_eq!(build_osc66("w=2", " "), "\x1b]66;w=2; \x07");
    }

    #[test]
    fn test_marker_round_trip() {
        let payload = "\x1b]66;s=2:w=1;a:b;c\x07\x00\x1b[0m";
        let text = format!("before {} after", wrap_marker(payload.as_bytes()));
        assert!(!text.contains('\x1b'));
        assert_eq!(decode_markers(&text), format!("before {} after", payload));
    }

    #[test]
    fn test_multiple_markers() {
        let text = format!("{}|{}", wrap_marker(b"one"), wrap_marker(b"two"));
        assert_eq!(decode_markers(&text), "one|two");
    }

    #[test]
    fn test_decoded_payload_is_not_rescanned() {
        let inner = wrap_marker(b"x");
        let text = wrap_marker(inner.as_bytes());
        assert_eq!(decode_markers(&text), inner);
    }

    #[test]
    fn test_bad_base64_is_dropped() {
        let text = format!("a{}!!!{}b", MARKER_START, MARKER_END);
        assert_eq!(decode_markers(&text), "ab");
    }

    #[test]
    fn test_unterminated_marker_is_removed() {
        let text = format!("a{}QUJD tail", MARKER_START);
        assert_eq!(decode_markers(&text), "aQUJD tail");
    }

    #[test]
    #[serial]
    fn test_global_flag() {
        set_text_sizing_enabled(true);
        assert!(is_text_sizing_enabled());
        set_text_sizing_enabled(false);
        assert!(!is_text_sizing_enabled());
    }

    #[test]
    #[serial]
    fn test_is_kitty_terminal() {
        let saved = std::env::var("TERM").ok();
        std::env::remove_var("TERM_PROGRAM");
        std::env::remove_var("KITTY_PID");
        std::env::set_var("TERM", "xterm-kitty");
        assert!(is_kitty_terminal());

        std::env::set_var("TERM", "xterm-256color");
        assert!(!is_kitty_terminal());

        std::env::set_var("KITTY_PID", "1234");
        assert!(is_kitty_terminal());
        std::env::remove_var("KITTY_PID");

        match saved {
            Some(term) => std::env::set_var("TERM", term),
            None => std::env::remove_var("TERM"),
        }
    }
}
