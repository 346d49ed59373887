use serde::{Deserialize, Serialize};

/// Per-run style attributes.
///
/// Every `Option` field distinguishes "inherit" (`None`) from an explicit
/// override, so `Some(false)` or `Some(String::new())` are real values.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StylePrimitive {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub block_prefix: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub block_suffix: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub prefix: String,
    /// Color used for block prefixes of child elements (list bullets etc.)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prefix_color: Option<String>,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub suffix: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background_color: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub underline: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bold: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub upper: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lower: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub italic: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub crossed_out: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub faint: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub conceal: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub overlined: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inverse: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub blink: Option<bool>,

    /// Token template, e.g. `Image: {{.text}} →`
    #[serde(skip_serializing_if = "String::is_empty")]
    pub format: String,

    /// Text sizing scale `s`, 1-7 (text drawn in s×s cell blocks)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kitty_scale: Option<u32>,
    /// Text sizing width `w`, 0-7 (0 = automatic)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kitty_width: Option<u32>,
    /// Fractional scale numerator `n`, 0-15
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kitty_numerator: Option<u32>,
    /// Fractional scale denominator `d`, 0-15, must exceed `n`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kitty_denominator: Option<u32>,
    /// Vertical alignment `v`: 0 top, 1 bottom, 2 centered
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kitty_valign: Option<u32>,
    /// Horizontal alignment `h`: 0 left, 1 right, 2 centered
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kitty_halign: Option<u32>,
}

/// Style settings for block elements
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StyleBlock {
    #[serde(flatten)]
    pub primitive: StylePrimitive,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub indent: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub indent_token: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub margin: Option<u32>,
}

/// Style settings for lists
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StyleList {
    #[serde(flatten)]
    pub block: StyleBlock,
    /// Indent applied to lists nested inside another list
    pub level_indent: u32,
}

/// Style settings for task list markers
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StyleTask {
    #[serde(flatten)]
    pub primitive: StylePrimitive,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub ticked: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub unticked: String,
}

/// Complete theme: one style per markdown element kind
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StyleConfig {
    pub document: StyleBlock,
    pub block_quote: StyleBlock,
    pub paragraph: StyleBlock,
    pub list: StyleList,

    pub heading: StyleBlock,
    pub h1: StyleBlock,
    pub h2: StyleBlock,
    pub h3: StyleBlock,
    pub h4: StyleBlock,
    pub h5: StyleBlock,
    pub h6: StyleBlock,

    pub text: StylePrimitive,
    pub strikethrough: StylePrimitive,
    pub emph: StylePrimitive,
    pub strong: StylePrimitive,
    #[serde(rename = "hr")]
    pub horizontal_rule: StylePrimitive,

    pub item: StylePrimitive,
    pub enumeration: StylePrimitive,
    pub task: StyleTask,

    pub link: StylePrimitive,
    pub link_text: StylePrimitive,

    pub image: StylePrimitive,
    pub image_text: StylePrimitive,

    pub code: StyleBlock,
    pub code_block: StyleBlock,

    pub html_block: StyleBlock,
    pub html_span: StyleBlock,
}

impl StyleConfig {
    /// Level-specific heading override; levels outside 1-6 have none
    pub fn heading_level(&self, level: u8) -> Option<&StyleBlock> {
        match level {
            1 => Some(&self.h1),
            2 => Some(&self.h2),
            3 => Some(&self.h3),
            4 => Some(&self.h4),
            5 => Some(&self.h5),
            6 => Some(&self.h6),
            _ => None,
        }
    }
}
