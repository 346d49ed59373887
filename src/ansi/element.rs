//! Styled token rendering

use std::borrow::Cow;
use std::io::{self, Write};

use super::color::ColorProfile;
use super::context::RenderContext;
use super::stack::Target;
use super::text::{format_token, render_text, unescape};
use crate::error::Result;
use crate::style::{cascade_primitive, StylePrimitive};

/// Writer wrapper that emits a styled suffix when it goes out of scope
pub struct SuffixGuard<'w, W: Write + ?Sized> {
    inner: &'w mut W,
    profile: ColorProfile,
    style: StylePrimitive,
    suffix: String,
}

impl<'w, W: Write + ?Sized> SuffixGuard<'w, W> {
    pub fn new(inner: &'w mut W, profile: ColorProfile, style: StylePrimitive, suffix: &str) -> Self {
        Self {
            inner,
            profile,
            style,
            suffix: suffix.to_string(),
        }
    }
}

impl<W: Write + ?Sized> Write for SuffixGuard<'_, W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.inner.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.inner.flush()
    }
}

impl<W: Write + ?Sized> Drop for SuffixGuard<'_, W> {
    fn drop(&mut self) {
        let _ = render_text(&mut *self.inner, self.profile, &self.style, &self.suffix);
    }
}

/// A token rendered with an element style
#[derive(Debug, Clone, Default)]
pub struct BaseElement {
    pub token: String,
    pub prefix: String,
    pub style: StylePrimitive,
    /// Skip backslash unescaping of the token
    pub raw: bool,
}

impl BaseElement {
    pub fn new(token: impl Into<String>, style: &StylePrimitive) -> Self {
        Self {
            token: token.into(),
            prefix: String::new(),
            style: style.clone(),
            raw: false,
        }
    }

    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    pub fn raw(mut self) -> Self {
        self.raw = true;
        self
    }

    pub fn render(&self, ctx: &mut RenderContext, target: Target) -> Result<()> {
        let parent = ctx.stack.current().style.primitive.clone();
        let style = ctx.stack.with(&self.style);
        self.emit(ctx, target, &parent, &style)
    }

    /// Render with an inline override cascaded onto both the parent and the
    /// element style
    pub fn render_override(
        &self,
        ctx: &mut RenderContext,
        target: Target,
        rules: &StylePrimitive,
    ) -> Result<()> {
        let parent = cascade_primitive(&ctx.stack.current().style.primitive, rules, false);
        let style = cascade_primitive(&ctx.stack.with(&self.style), rules, false);
        self.emit(ctx, target, &parent, &style)
    }

    fn emit(
        &self,
        ctx: &mut RenderContext,
        target: Target,
        parent: &StylePrimitive,
        style: &StylePrimitive,
    ) -> Result<()> {
        let mut out = Vec::new();
        let result = self.write_styled(&mut out, ctx.profile(), parent, style);
        // whatever was produced, suffixes included, reaches the buffer
        ctx.write(target, &out);
        result
    }

    /// Write prefix, framing and token; suffixes are written on every exit
    pub fn write_styled<W: Write + ?Sized>(
        &self,
        w: &mut W,
        profile: ColorProfile,
        parent: &StylePrimitive,
        style: &StylePrimitive,
    ) -> Result<()> {
        // prefixes borrow the parent's accent color
        let prefix_style = StylePrimitive {
            color: parent.prefix_color.clone(),
            ..parent.clone()
        };
        render_text(w, profile, &prefix_style, &self.prefix)?;
        render_text(w, profile, &prefix_style, &style.block_prefix)?;

        let mut block = SuffixGuard::new(w, profile, prefix_style, &style.block_suffix);
        render_text(&mut block, profile, style, &style.prefix)?;

        let mut inner = SuffixGuard::new(&mut block, profile, style.clone(), &style.suffix);
        let token = if style.format.is_empty() {
            Cow::Borrowed(self.token.as_str())
        } else {
            Cow::Owned(format_token(&style.format, &self.token)?)
        };
        if self.raw {
            render_text(&mut inner, profile, style, &token)?;
        } else {
            render_text(&mut inner, profile, style, &unescape(&token))?;
        }

        Ok(())
    }
}
