//! Headings
//!
//! A heading buffers its inline content in its own scope. On finish it is
//! either drawn scaled through the text sizing protocol or wrapped and
//! written through the margin writer like any other block.

use log::trace;
use std::io::Write;

use super::context::RenderContext;
use super::margin::{word_wrap, MarginWriter};
use super::stack::{BlockElement, Target};
use super::text::{render_text, strip_ansi};
use crate::error::{Result, TermarkError};
use crate::kitty::text_sizing::{encode_scaled, extra_rows, has_text_sizing, wrap_marker, TextSizing};
use crate::style::{cascade_block, cascade_blocks, StyleBlock, StyleConfig, StylePrimitive};

#[derive(Debug, Clone, Copy)]
pub struct HeadingElement {
    pub level: u8,
    /// First block among its siblings
    pub first: bool,
}

impl HeadingElement {
    pub fn new(level: u8, first: bool) -> Self {
        Self { level, first }
    }

    /// Generic heading style with the level override applied
    pub fn rules(&self, styles: &StyleConfig) -> StyleBlock {
        match styles.heading_level(self.level) {
            Some(level) => cascade_blocks(&[&styles.heading, level]),
            None => styles.heading.clone(),
        }
    }

    pub fn render(&self, ctx: &mut RenderContext) -> Result<()> {
        let rules = self.rules(ctx.styles());

        if !self.first {
            let current = ctx.stack.current().style.primitive.clone();
            ctx.write_text(Target::Current, &current, "\n");
        }

        let style = cascade_block(&ctx.stack.current().style, &rules, false);
        ctx.stack.push(BlockElement::new(style));

        let parent = ctx.stack.parent().style.primitive.clone();
        ctx.write_text(Target::Parent, &parent, &rules.primitive.block_prefix);
        let current = ctx.stack.current().style.primitive.clone();
        ctx.write_text(Target::Current, &current, &rules.primitive.prefix);

        Ok(())
    }

    pub fn finish(&self, ctx: &mut RenderContext) -> Result<()> {
        let width = ctx.width();
        // popping first keeps the stack balanced on every exit path below
        let element = ctx.stack.pop().ok_or_else(|| {
            TermarkError::Renderer(format!("heading level {} has no open block", self.level))
        })?;
        let rules = element.style;
        let content = String::from_utf8(element.block)?;
        let parent = ctx.stack.current().style.primitive.clone();

        if ctx.text_sizing() && has_text_sizing(&rules.primitive) {
            finish_scaled(ctx, &rules, &content, &parent);
            Ok(())
        } else {
            finish_standard(ctx, &rules, &content, width, &parent)
        }
    }
}

fn finish_scaled(ctx: &mut RenderContext, rules: &StyleBlock, content: &str, parent: &StylePrimitive) {
    // the suffix is drawn at the same scale so trailing padding keeps its height
    let text = format!("{}{}", strip_ansi(content), rules.primitive.suffix);
    trace!(
        "scaled heading: scale={:?} metadata={:?} text={:?}",
        rules.primitive.kitty_scale,
        TextSizing::from_style(&rules.primitive).metadata(),
        text
    );

    let marker = wrap_marker(encode_scaled(ctx.profile(), &rules.primitive, &text).as_bytes());
    ctx.write(Target::Current, marker.as_bytes());
    ctx.write_text(Target::Current, parent, &rules.primitive.block_suffix);

    for _ in 0..extra_rows(&rules.primitive) {
        ctx.write(Target::Current, b"\n");
    }
}

fn finish_standard(
    ctx: &mut RenderContext,
    rules: &StyleBlock,
    content: &str,
    width: usize,
    parent: &StylePrimitive,
) -> Result<()> {
    let profile = ctx.profile();
    let wrapped = word_wrap(content, width);

    let mut out = Vec::new();
    MarginWriter::new(&mut out, profile, rules, width, parent).write_all(wrapped.as_bytes())?;
    render_text(&mut out, profile, &rules.primitive, &rules.primitive.suffix)?;
    render_text(&mut out, profile, parent, &rules.primitive.block_suffix)?;

    ctx.write(Target::Current, &out);
    Ok(())
}
