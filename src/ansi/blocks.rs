//! Block-level elements

use std::io::Write;

use super::context::RenderContext;
use super::element::BaseElement;
use super::margin::{word_wrap, MarginWriter};
use super::stack::{BlockElement, Target};
use super::text::{render_text, styled};
use crate::error::{Result, TermarkError};
use crate::style::{cascade_block, StyleBlock};

/// A container whose content is indented through the margin writer
/// (document, block quote, list)
#[derive(Debug, Clone)]
pub struct MarginBlock {
    pub style: StyleBlock,
    /// Terminate the content with a newline
    pub newline: bool,
}

impl MarginBlock {
    pub fn document(ctx: &RenderContext) -> Self {
        Self {
            style: cascade_block(&ctx.stack.current().style, &ctx.styles().document, false),
            newline: false,
        }
    }

    pub fn block_quote(ctx: &RenderContext) -> Self {
        Self {
            style: cascade_block(&ctx.stack.current().style, &ctx.styles().block_quote, false),
            newline: true,
        }
    }

    /// Lists inside other lists use the level indent
    pub fn list(ctx: &RenderContext, nested: bool) -> Self {
        let list = &ctx.styles().list;
        let mut style = list.block.clone();
        if nested {
            style.indent = Some(list.level_indent);
        } else if style.indent.is_none() {
            style.indent = Some(0);
        }

        Self {
            style: cascade_block(&ctx.stack.current().style, &style, false),
            newline: true,
        }
    }

    pub fn render(&self, ctx: &mut RenderContext) -> Result<()> {
        ctx.stack.push(BlockElement::new(self.style.clone()));

        let parent = ctx.stack.parent().style.primitive.clone();
        ctx.write_text(Target::Parent, &parent, &self.style.primitive.block_prefix);
        let current = ctx.stack.current().style.primitive.clone();
        ctx.write_text(Target::Current, &current, &self.style.primitive.prefix);
        Ok(())
    }

    pub fn finish(&self, ctx: &mut RenderContext) -> Result<()> {
        let width = ctx.width();
        let element = pop(ctx, "block")?;
        let parent = ctx.stack.current().style.primitive.clone();
        let profile = ctx.profile();

        let mut out = Vec::new();
        {
            let mut mw = MarginWriter::new(&mut out, profile, &element.style, width, &parent);
            mw.write_all(&element.block)?;
            if self.newline {
                mw.write_all(b"\n")?;
            }
        }
        render_text(&mut out, profile, &element.style.primitive, &self.style.primitive.suffix)?;
        render_text(&mut out, profile, &parent, &self.style.primitive.block_suffix)?;

        ctx.write(Target::Current, &out);
        Ok(())
    }
}

/// Paragraphs are wrapped to the available width
#[derive(Debug, Clone, Copy)]
pub struct ParagraphElement {
    pub first: bool,
}

impl ParagraphElement {
    pub fn render(&self, ctx: &mut RenderContext) -> Result<()> {
        let rules = &ctx.styles().paragraph;

        if !self.first {
            ctx.write(Target::Current, b"\n");
        }
        let current = ctx.stack.current().style.clone();
        ctx.write_text(Target::Current, &current.primitive, &rules.primitive.block_prefix);
        ctx.stack
            .push(BlockElement::new(cascade_block(&current, rules, false)));
        Ok(())
    }

    pub fn finish(&self, ctx: &mut RenderContext) -> Result<()> {
        let width = ctx.width();
        let element = pop(ctx, "paragraph")?;
        let rules = element.style;
        let parent = ctx.stack.current().style.primitive.clone();
        let profile = ctx.profile();
        let content = String::from_utf8(element.block)?;

        let mut out = Vec::new();
        if !content.trim().is_empty() {
            let mut mw = MarginWriter::new(&mut out, profile, &rules, width, &parent);
            mw.write_all(word_wrap(&content, width).as_bytes())?;
            mw.write_all(b"\n")?;
        }
        render_text(&mut out, profile, &rules.primitive, &rules.primitive.suffix)?;
        render_text(&mut out, profile, &parent, &rules.primitive.block_suffix)?;

        ctx.write(Target::Current, &out);
        Ok(())
    }
}

/// List item marker: bullet, number or task box
#[derive(Debug, Clone, Copy)]
pub struct ItemElement {
    /// Number shown for ordered lists
    pub enumeration: Option<u64>,
    pub task: Option<bool>,
    /// Terminate the item with a newline
    pub newline: bool,
}

impl ItemElement {
    pub fn render(&self, ctx: &mut RenderContext) -> Result<()> {
        let styles = ctx.styles();
        let el = match (self.task, self.enumeration) {
            (Some(true), _) => {
                BaseElement::new("", &styles.task.primitive).with_prefix(&styles.task.ticked)
            }
            (Some(false), _) => {
                BaseElement::new("", &styles.task.primitive).with_prefix(&styles.task.unticked)
            }
            (None, Some(n)) => BaseElement::new("", &styles.enumeration).with_prefix(n.to_string()),
            (None, None) => BaseElement::new("", &styles.item),
        };
        el.render(ctx, Target::Current)
    }

    pub fn finish(&self, ctx: &mut RenderContext) -> Result<()> {
        if self.newline {
            ctx.write(Target::Current, b"\n");
        }
        Ok(())
    }
}

/// Code blocks are written line by line, indented and without wrapping
pub fn render_code_block(ctx: &mut RenderContext, code: &str) -> Result<()> {
    let rules = &ctx.styles().code_block;
    let profile = ctx.profile();
    let current = ctx.stack.current().style.primitive.clone();
    let style = ctx.stack.with(&rules.primitive);

    let count = rules.indent.unwrap_or(0) + rules.margin.unwrap_or(0);
    let indent = styled(profile, &current, " ").repeat(count as usize);

    let mut out = b"\n".to_vec();
    for line in code.lines() {
        out.extend_from_slice(indent.as_bytes());
        render_text(&mut out, profile, &style, line)?;
        out.push(b'\n');
    }

    ctx.write(Target::Current, &out);
    Ok(())
}

pub fn render_rule(ctx: &mut RenderContext) -> Result<()> {
    BaseElement::new("", &ctx.styles().horizontal_rule).render(ctx, Target::Current)
}

fn pop(ctx: &mut RenderContext, kind: &str) -> Result<BlockElement> {
    ctx.stack
        .pop()
        .ok_or_else(|| TermarkError::Renderer(format!("{} has no open block", kind)))
}
