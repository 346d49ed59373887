//! Built-in themes

use super::types::{StyleBlock, StyleConfig, StyleList, StylePrimitive, StyleTask};

fn s(v: &str) -> String {
    v.to_string()
}

fn color(v: &str) -> Option<String> {
    Some(v.to_string())
}

fn heading(prefix: &str) -> StyleBlock {
    StyleBlock {
        primitive: StylePrimitive {
            prefix: s(prefix),
            ..Default::default()
        },
        ..Default::default()
    }
}

/// Dark theme; h1 is drawn at double size when text sizing is enabled
pub fn dark() -> StyleConfig {
    StyleConfig {
        document: StyleBlock {
            primitive: StylePrimitive {
                block_prefix: s("\n"),
                block_suffix: s("\n"),
                color: color("252"),
                ..Default::default()
            },
            margin: Some(2),
            ..Default::default()
        },
        block_quote: StyleBlock {
            indent: Some(1),
            indent_token: Some(s("│ ")),
            ..Default::default()
        },
        list: StyleList {
            level_indent: 2,
            ..Default::default()
        },
        heading: StyleBlock {
            primitive: StylePrimitive {
                block_suffix: s("\n"),
                color: color("39"),
                bold: Some(true),
                ..Default::default()
            },
            ..Default::default()
        },
        h1: StyleBlock {
            primitive: StylePrimitive {
                prefix: s(" "),
                suffix: s(" "),
                color: color("228"),
                background_color: color("63"),
                bold: Some(true),
                kitty_scale: Some(2),
                ..Default::default()
            },
            ..Default::default()
        },
        h2: heading("## "),
        h3: heading("### "),
        h4: heading("#### "),
        h5: heading("##### "),
        h6: StyleBlock {
            primitive: StylePrimitive {
                prefix: s("###### "),
                color: color("35"),
                bold: Some(false),
                ..Default::default()
            },
            ..Default::default()
        },
        strikethrough: StylePrimitive {
            crossed_out: Some(true),
            ..Default::default()
        },
        emph: StylePrimitive {
            italic: Some(true),
            ..Default::default()
        },
        strong: StylePrimitive {
            bold: Some(true),
            ..Default::default()
        },
        horizontal_rule: StylePrimitive {
            color: color("240"),
            format: s("\n--------\n"),
            ..Default::default()
        },
        item: StylePrimitive {
            block_prefix: s("• "),
            ..Default::default()
        },
        enumeration: StylePrimitive {
            block_prefix: s(". "),
            ..Default::default()
        },
        task: StyleTask {
            ticked: s("[✓] "),
            unticked: s("[ ] "),
            ..Default::default()
        },
        link: StylePrimitive {
            color: color("30"),
            underline: Some(true),
            ..Default::default()
        },
        link_text: StylePrimitive {
            color: color("35"),
            bold: Some(true),
            ..Default::default()
        },
        image: StylePrimitive {
            color: color("212"),
            underline: Some(true),
            ..Default::default()
        },
        image_text: StylePrimitive {
            color: color("243"),
            format: s("Image: {{.text}} →"),
            ..Default::default()
        },
        code: StyleBlock {
            primitive: StylePrimitive {
                prefix: s(" "),
                suffix: s(" "),
                color: color("203"),
                background_color: color("236"),
                ..Default::default()
            },
            ..Default::default()
        },
        code_block: StyleBlock {
            primitive: StylePrimitive {
                color: color("244"),
                ..Default::default()
            },
            margin: Some(2),
            ..Default::default()
        },
        ..Default::default()
    }
}

/// Plain theme without colors or decorations
pub fn ascii() -> StyleConfig {
    StyleConfig {
        document: StyleBlock {
            primitive: StylePrimitive {
                block_prefix: s("\n"),
                block_suffix: s("\n"),
                ..Default::default()
            },
            margin: Some(2),
            ..Default::default()
        },
        block_quote: StyleBlock {
            indent: Some(1),
            indent_token: Some(s("| ")),
            ..Default::default()
        },
        list: StyleList {
            level_indent: 4,
            ..Default::default()
        },
        heading: StyleBlock {
            primitive: StylePrimitive {
                block_suffix: s("\n"),
                ..Default::default()
            },
            ..Default::default()
        },
        h1: heading("# "),
        h2: heading("## "),
        h3: heading("### "),
        h4: heading("#### "),
        h5: heading("##### "),
        h6: heading("###### "),
        strikethrough: StylePrimitive {
            block_prefix: s("~~"),
            block_suffix: s("~~"),
            ..Default::default()
        },
        emph: StylePrimitive {
            block_prefix: s("*"),
            block_suffix: s("*"),
            ..Default::default()
        },
        strong: StylePrimitive {
            block_prefix: s("**"),
            block_suffix: s("**"),
            ..Default::default()
        },
        horizontal_rule: StylePrimitive {
            format: s("\n--------\n"),
            ..Default::default()
        },
        item: StylePrimitive {
            block_prefix: s("• "),
            ..Default::default()
        },
        enumeration: StylePrimitive {
            block_prefix: s(". "),
            ..Default::default()
        },
        task: StyleTask {
            ticked: s("[x] "),
            unticked: s("[ ] "),
            ..Default::default()
        },
        image_text: StylePrimitive {
            format: s("Image: {{.text}} →"),
            ..Default::default()
        },
        code: StyleBlock {
            primitive: StylePrimitive {
                prefix: s("`"),
                suffix: s("`"),
                ..Default::default()
            },
            ..Default::default()
        },
        code_block: StyleBlock {
            margin: Some(2),
            ..Default::default()
        },
        ..Default::default()
    }
}
