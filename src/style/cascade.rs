//! Style cascade
//!
//! Resolves a descendant style against its ancestor. Decorations, colors,
//! case transforms and text sizing parameters inherit unless the child sets
//! them. Framing text (block prefix/suffix, prefix/suffix) only inherits when
//! cascading into a block (`to_block`), so inline elements never repeat an
//! ancestor's framing.

use super::types::{StyleBlock, StylePrimitive};

/// Merge `child` onto `parent`
pub fn cascade_primitive(
    parent: &StylePrimitive,
    child: &StylePrimitive,
    to_block: bool,
) -> StylePrimitive {
    let mut s = child.clone();

    s.color = child.color.clone().or_else(|| parent.color.clone());
    s.background_color = child
        .background_color
        .clone()
        .or_else(|| parent.background_color.clone());
    s.underline = child.underline.or(parent.underline);
    s.bold = child.bold.or(parent.bold);
    s.upper = child.upper.or(parent.upper);
    s.lower = child.lower.or(parent.lower);
    s.title = child.title.or(parent.title);
    s.italic = child.italic.or(parent.italic);
    s.crossed_out = child.crossed_out.or(parent.crossed_out);
    s.faint = child.faint.or(parent.faint);
    s.conceal = child.conceal.or(parent.conceal);
    s.overlined = child.overlined.or(parent.overlined);
    s.inverse = child.inverse.or(parent.inverse);
    s.blink = child.blink.or(parent.blink);

    s.kitty_scale = child.kitty_scale.or(parent.kitty_scale);
    s.kitty_width = child.kitty_width.or(parent.kitty_width);
    s.kitty_numerator = child.kitty_numerator.or(parent.kitty_numerator);
    s.kitty_denominator = child.kitty_denominator.or(parent.kitty_denominator);
    s.kitty_valign = child.kitty_valign.or(parent.kitty_valign);
    s.kitty_halign = child.kitty_halign.or(parent.kitty_halign);

    if to_block {
        s.block_prefix = inherit_text(&child.block_prefix, &parent.block_prefix);
        s.block_suffix = inherit_text(&child.block_suffix, &parent.block_suffix);
        s.prefix = inherit_text(&child.prefix, &parent.prefix);
        s.suffix = inherit_text(&child.suffix, &parent.suffix);
    }

    s
}

/// Merge a block style; indent and margin follow the same `to_block` rule
pub fn cascade_block(parent: &StyleBlock, child: &StyleBlock, to_block: bool) -> StyleBlock {
    let mut s = child.clone();
    s.primitive = cascade_primitive(&parent.primitive, &child.primitive, to_block);

    if to_block {
        s.margin = child.margin.or(parent.margin);
        s.indent = child.indent.or(parent.indent);
    }

    s
}

/// Fold block styles left to right, starting from an empty style
pub fn cascade_blocks(styles: &[&StyleBlock]) -> StyleBlock {
    styles
        .iter()
        .fold(StyleBlock::default(), |acc, s| cascade_block(&acc, s, true))
}

/// Fold primitive styles left to right, starting from an empty style
pub fn cascade_primitives(styles: &[&StylePrimitive]) -> StylePrimitive {
    styles
        .iter()
        .fold(StylePrimitive::default(), |acc, s| cascade_primitive(&acc, s, true))
}

fn inherit_text(child: &str, parent: &str) -> String {
    if child.is_empty() {
        parent.to_string()
    } else {
        child.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parent() -> StylePrimitive {
        StylePrimitive {
            block_prefix: "\n".to_string(),
            block_suffix: "\n".to_string(),
            prefix: "> ".to_string(),
            suffix: " <".to_string(),
            prefix_color: Some("99".to_string()),
            color: Some("252".to_string()),
            background_color: Some("#101010".to_string()),
            bold: Some(true),
            italic: Some(true),
            upper: Some(true),
            kitty_scale: Some(2),
            kitty_halign: Some(2),
            ..Default::default()
        }
    }

    fn child() -> StylePrimitive {
        StylePrimitive {
            color: Some("39".to_string()),
            bold: Some(false),
            suffix: "!".to_string(),
            format: "[{{.text}}]".to_string(),
            kitty_scale: Some(3),
            ..Default::default()
        }
    }

    #[test]
    fn test_child_overrides_win() {
        let s = cascade_primitive(&parent(), &child(), false);
        assert_eq!(s.color.as_deref(), Some("39"));
        assert_eq!(s.bold, Some(false));
        assert_eq!(s.kitty_scale, Some(3));
    }

    #[test]
    fn test_unset_child_inherits() {
        let s = cascade_primitive(&parent(), &child(), false);
        assert_eq!(s.background_color.as_deref(), Some("#101010"));
        assert_eq!(s.italic, Some(true));
        assert_eq!(s.upper, Some(true));
        assert_eq!(s.kitty_halign, Some(2));
        assert_eq!(s.underline, None);
    }

    #[test]
    fn test_explicit_false_is_not_unset() {
        let p = StylePrimitive {
            underline: Some(true),
            ..Default::default()
        };
        let c = StylePrimitive {
            underline: Some(false),
            ..Default::default()
        };
        assert_eq!(cascade_primitive(&p, &c, true).underline, Some(false));
    }

    #[test]
    fn test_framing_inherits_only_into_blocks() {
        let block = cascade_primitive(&parent(), &child(), true);
        assert_eq!(block.block_prefix, "\n");
        assert_eq!(block.block_suffix, "\n");
        assert_eq!(block.prefix, "> ");
        assert_eq!(block.suffix, "!");

        let inline = cascade_primitive(&parent(), &child(), false);
        assert_eq!(inline.block_prefix, "");
        assert_eq!(inline.block_suffix, "");
        assert_eq!(inline.prefix, "");
        assert_eq!(inline.suffix, "!");
    }

    #[test]
    fn test_prefix_color_and_format_are_not_inherited() {
        let s = cascade_primitive(&parent(), &StylePrimitive::default(), true);
        assert_eq!(s.prefix_color, None);
        assert_eq!(s.format, "");

        let s = cascade_primitive(&parent(), &child(), true);
        assert_eq!(s.format, "[{{.text}}]");
    }

    /// Parent with every attribute set, so nothing is trivially `None`
    fn full_parent() -> StylePrimitive {
        StylePrimitive {
            underline: Some(true),
            lower: Some(true),
            title: Some(true),
            crossed_out: Some(true),
            faint: Some(true),
            conceal: Some(true),
            overlined: Some(true),
            inverse: Some(true),
            blink: Some(true),
            kitty_width: Some(4),
            kitty_numerator: Some(1),
            kitty_denominator: Some(2),
            kitty_valign: Some(1),
            ..parent()
        }
    }

    fn without_framing(style: StylePrimitive) -> StylePrimitive {
        StylePrimitive {
            block_prefix: String::new(),
            block_suffix: String::new(),
            prefix: String::new(),
            suffix: String::new(),
            ..style
        }
    }

    #[test]
    fn test_cascade_is_idempotent() {
        let child = StylePrimitive {
            faint: Some(false),
            blink: Some(false),
            kitty_valign: Some(2),
            ..child()
        };

        for to_block in [true, false] {
            let once = cascade_primitive(&full_parent(), &child, to_block);
            let twice = cascade_primitive(&once, &child, to_block);
            assert_eq!(without_framing(once.clone()), without_framing(twice));

            // every attribute survives or is overridden, none is dropped
            assert_eq!(once.underline, Some(true));
            assert_eq!(once.faint, Some(false));
            assert_eq!(once.blink, Some(false));
            assert_eq!(once.conceal, Some(true));
            assert_eq!(once.kitty_width, Some(4));
            assert_eq!(once.kitty_valign, Some(2));
            assert_eq!(once.kitty_denominator, Some(2));
        }
    }

    #[test]
    fn test_cascade_block_indent_and_margin() {
        let p = StyleBlock {
            indent: Some(2),
            margin: Some(1),
            ..Default::default()
        };
        let c = StyleBlock::default();

        let block = cascade_block(&p, &c, true);
        assert_eq!(block.indent, Some(2));
        assert_eq!(block.margin, Some(1));

        let inline = cascade_block(&p, &c, false);
        assert_eq!(inline.indent, None);
        assert_eq!(inline.margin, None);

        let c = StyleBlock {
            indent: Some(4),
            margin: Some(0),
            ..Default::default()
        };
        let block = cascade_block(&p, &c, true);
        assert_eq!(block.indent, Some(4));
        assert_eq!(block.margin, Some(0));
        assert_eq!(cascade_block(&p, &c, false).indent, Some(4));
    }

    #[test]
    fn test_cascade_blocks_folds_in_order() {
        let heading = StyleBlock {
            primitive: StylePrimitive {
                color: Some("39".to_string()),
                bold: Some(true),
                block_suffix: "\n".to_string(),
                ..Default::default()
            },
            ..Default::default()
        };
        let h2 = StyleBlock {
            primitive: StylePrimitive {
                prefix: "## ".to_string(),
                kitty_scale: Some(2),
                ..Default::default()
            },
            ..Default::default()
        };

        let s = cascade_blocks(&[&heading, &h2]);
        assert_eq!(s.primitive.color.as_deref(), Some("39"));
        assert_eq!(s.primitive.prefix, "## ");
        assert_eq!(s.primitive.block_suffix, "\n");
        assert_eq!(s.primitive.kitty_scale, Some(2));
    }

    #[test]
    fn test_cascade_primitives_empty_list() {
        assert_eq!(cascade_primitives(&[]), StylePrimitive::default());
    }
}
