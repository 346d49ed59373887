//! Inline elements
//!
//! Text inside emphasis, strong and strikethrough spans is drawn with the
//! active inline override cascaded onto its own style. Code spans, links and
//! images keep their own styles there.

use log::debug;
use url::Url;

use super::context::RenderContext;
use super::element::BaseElement;
use super::stack::Target;
use super::text::unescape;
use crate::error::Result;
use crate::kitty::image::marker;
use crate::style::StylePrimitive;

/// Plain text, drawn with the active inline override if any
pub fn render_text_node(ctx: &mut RenderContext, text: &str) -> Result<()> {
    let el = BaseElement::new(text, &ctx.styles().text);
    match ctx.inline_override().cloned() {
        Some(rules) => el.render_override(ctx, Target::Current, &rules),
        None => el.render(ctx, Target::Current),
    }
}

/// Code spans are drawn verbatim
pub fn render_code_span(ctx: &mut RenderContext, code: &str) -> Result<()> {
    BaseElement::new(code, &ctx.styles().code.primitive)
        .raw()
        .render(ctx, Target::Current)
}

pub fn render_html(ctx: &mut RenderContext, html: &str, block: bool) -> Result<()> {
    let styles = ctx.styles();
    let rules = if block {
        &styles.html_block.primitive
    } else {
        &styles.html_span.primitive
    };
    BaseElement::new(html, rules).raw().render(ctx, Target::Current)
}

/// Resolve `target` against `base`. Absolute targets and renders without a
/// base are returned unchanged.
pub fn resolve_relative_url(base: Option<&str>, target: &str) -> String {
    if Url::parse(target).is_ok() {
        return target.to_string();
    }

    let Some(base) = base.filter(|b| !b.is_empty()) else {
        return target.to_string();
    };

    match Url::parse(base).and_then(|b| b.join(target.trim_start_matches('/'))) {
        Ok(resolved) => resolved.to_string(),
        Err(e) => {
            debug!("cannot resolve '{}' against '{}': {}", target, base, e);
            target.to_string()
        }
    }
}

/// Hyperlink drawn as an OSC 8 sequence around its text
#[derive(Debug, Clone)]
pub struct LinkElement {
    pub url: String,
    /// Plain text of the link's children
    pub text: String,
}

impl LinkElement {
    pub fn render(&self, ctx: &mut RenderContext) -> Result<()> {
        let styles = ctx.styles();
        let text = unescape(&self.text);

        // in-document anchors have nowhere to go in a terminal
        if self.url.starts_with('#') {
            return BaseElement::new(text, &styles.link_text)
                .raw()
                .render(ctx, Target::Current);
        }

        let numbered = ctx.options.link_numbers;
        if numbered {
            let token = format!("[{}]", ctx.next_link_number());
            BaseElement::new(token, &styles.link_text).render(ctx, Target::Current)?;
        }

        let url = resolve_relative_url(ctx.options.base_url.as_deref(), &self.url);
        let token = format!("\x1b]8;;{}\x1b\\{}\x1b]8;;\x1b\\", url, text);

        let el = if numbered {
            BaseElement::new(token, &styles.link).with_prefix(" ")
        } else {
            let style = StylePrimitive {
                block_prefix: String::new(),
                block_suffix: String::new(),
                ..styles.link.clone()
            };
            BaseElement::new(token, &style)
        };
        el.raw().render(ctx, Target::Current)
    }
}

/// Image reference; known images become placeholder markers
#[derive(Debug, Clone)]
pub struct ImageElement {
    pub url: String,
    pub alt: String,
}

impl ImageElement {
    pub fn render(&self, ctx: &mut RenderContext) -> Result<()> {
        if let Some(placement) = ctx.options.images.placement(&self.url) {
            debug!("image '{}' placed as id {}", self.url, placement.id);
            ctx.write(Target::Current, marker(&placement).as_bytes());
            return Ok(());
        }
        self.render_fallback(ctx)
    }

    /// Alt text and URL, as drawn when placeholders are off
    pub fn render_fallback(&self, ctx: &mut RenderContext) -> Result<()> {
        let styles = ctx.styles();

        if !self.alt.is_empty() {
            BaseElement::new(self.alt.as_str(), &styles.image_text)
                .render(ctx, Target::Current)?;
        }
        if !self.url.is_empty() {
            let url = resolve_relative_url(ctx.options.base_url.as_deref(), &self.url);
            BaseElement::new(url, &styles.image)
                .with_prefix(" ")
                .raw()
                .render(ctx, Target::Current)?;
        }
        Ok(())
    }
}
