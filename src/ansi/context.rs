//! Render options and per-render state

use log::debug;
use std::ops::{Deref, DerefMut};

use super::color::ColorProfile;
use super::stack::{BlockStack, Target};
use super::text::render_text;
use crate::kitty::image::ImageOptions;
use crate::kitty::text_sizing::is_text_sizing_enabled;
use crate::style::{cascade_primitive, StyleConfig, StylePrimitive};

/// Everything a render call needs besides the document
pub struct RenderOptions {
    pub styles: StyleConfig,
    pub word_wrap: usize,
    pub color_profile: ColorProfile,
    pub base_url: Option<String>,
    pub link_numbers: bool,
    /// Overrides the process-wide text sizing flag when set
    pub text_sizing: Option<bool>,
    pub images: ImageOptions,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            styles: crate::style::dark(),
            word_wrap: 80,
            color_profile: ColorProfile::default(),
            base_url: None,
            link_numbers: false,
            text_sizing: None,
            images: ImageOptions::default(),
        }
    }
}

/// State of a single render call
pub struct RenderContext<'a> {
    pub(crate) options: &'a RenderOptions,
    pub(crate) stack: BlockStack,
    text_sizing: bool,
    link_count: usize,
    inline: Vec<StylePrimitive>,
}

impl<'a> RenderContext<'a> {
    pub fn new(options: &'a RenderOptions) -> Self {
        Self {
            options,
            stack: BlockStack::new(),
            text_sizing: options.text_sizing.unwrap_or_else(is_text_sizing_enabled),
            link_count: 0,
            inline: Vec::new(),
        }
    }

    pub fn profile(&self) -> ColorProfile {
        self.options.color_profile
    }

    pub fn styles(&self) -> &'a StyleConfig {
        &self.options.styles
    }

    /// Whether scaled headings are emitted in this render
    pub fn text_sizing(&self) -> bool {
        self.text_sizing
    }

    pub fn stack(&self) -> &BlockStack {
        &self.stack
    }

    /// Width available to the current scope
    pub fn width(&self) -> usize {
        self.stack.width(self.options.word_wrap)
    }

    pub(crate) fn write(&mut self, target: Target, bytes: &[u8]) {
        self.stack.get_mut(target).block.extend_from_slice(bytes);
    }

    pub(crate) fn write_text(&mut self, target: Target, rules: &StylePrimitive, s: &str) {
        let mut out = Vec::new();
        // writes into a Vec cannot fail
        let _ = render_text(&mut out, self.profile(), rules, s);
        self.write(target, &out);
    }

    pub(crate) fn next_link_number(&mut self) -> usize {
        self.link_count += 1;
        self.link_count
    }

    /// Enter an emphasis-like span; nested spans cascade onto the outer one
    pub(crate) fn push_inline(&mut self, style: &StylePrimitive) {
        let resolved = match self.inline.last() {
            Some(outer) => cascade_primitive(outer, style, false),
            None => style.clone(),
        };
        self.inline.push(resolved);
    }

    pub(crate) fn pop_inline(&mut self) {
        self.inline.pop();
    }

    pub(crate) fn inline_override(&self) -> Option<&StylePrimitive> {
        self.inline.last()
    }

    /// Guard that restores the current stack depth when dropped, so a
    /// block whose children fail still leaves the stack balanced
    pub fn scope(&mut self) -> ScopeGuard<'_, 'a> {
        let depth = self.stack.len();
        ScopeGuard { ctx: self, depth }
    }

    pub fn into_output(self) -> Vec<u8> {
        self.stack.into_output()
    }
}

/// Borrow of a [`RenderContext`] that pops any scope left open on drop
pub struct ScopeGuard<'c, 'a> {
    ctx: &'c mut RenderContext<'a>,
    depth: usize,
}

impl<'a> Deref for ScopeGuard<'_, 'a> {
    type Target = RenderContext<'a>;

    fn deref(&self) -> &Self::Target {
        self.ctx
    }
}

impl DerefMut for ScopeGuard<'_, '_> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.ctx
    }
}

impl Drop for ScopeGuard<'_, '_> {
    fn drop(&mut self) {
        if self.ctx.stack.len() > self.depth {
            debug!(
                "closing {} unfinished block scope(s)",
                self.ctx.stack.len() - self.depth
            );
            self.ctx.stack.truncate(self.depth);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_explicit_text_sizing_wins() {
        let options = RenderOptions {
            text_sizing: Some(true),
            ..Default::default()
        };
        assert!(RenderContext::new(&options).text_sizing());

        let options = RenderOptions {
            text_sizing: Some(false),
            ..Default::default()
        };
        assert!(!RenderContext::new(&options).text_sizing());
    }

    #[test]
    fn test_scope_closes_unfinished_blocks() {
        use super::super::stack::BlockElement;

        let options = RenderOptions::default();
        let mut ctx = RenderContext::new(&options);
        {
            let mut scope = ctx.scope();
            scope.stack.push(BlockElement::default());
            scope.stack.push(BlockElement::default());
            assert_eq!(scope.stack().len(), 3);
        }
        assert_eq!(ctx.stack().len(), 1);

        ctx.stack.push(BlockElement::default());
        {
            let mut scope = ctx.scope();
            scope.stack.pop();
        }
        assert_eq!(ctx.stack().len(), 1);
    }

    #[test]
    fn test_link_numbers_count_up() {
        let options = RenderOptions::default();
        let mut ctx = RenderContext::new(&options);
        assert_eq!(ctx.next_link_number(), 1);
        assert_eq!(ctx.next_link_number(), 2);
    }

    #[test]
    fn test_inline_overrides_nest() {
        let options = RenderOptions::default();
        let mut ctx = RenderContext::new(&options);
        ctx.push_inline(&StylePrimitive {
            italic: Some(true),
            block_prefix: "*".to_string(),
            ..Default::default()
        });
        ctx.push_inline(&StylePrimitive {
            bold: Some(true),
            ..Default::default()
        });

        let style = ctx.inline_override().unwrap();
        assert_eq!(style.italic, Some(true));
        assert_eq!(style.bold, Some(true));
        assert_eq!(style.block_prefix, "");

        ctx.pop_inline();
        ctx.pop_inline();
        assert!(ctx.inline_override().is_none());
    }
}
