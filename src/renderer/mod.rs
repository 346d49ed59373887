//! Markdown renderer module
//!
//! Walks the parsed document and dispatches every node to its element
//! renderer. Text sizing and image markers are expanded once the whole
//! document has been drawn, after wrapping can no longer split them.

use log::trace;

use crate::ansi::{
    render_code_block, render_code_span, render_html, render_rule, render_text_node,
    HeadingElement, ImageElement, ItemElement, LinkElement, MarginBlock, ParagraphElement,
    RenderContext, RenderOptions, Target,
};
use crate::error::Result;
use crate::kitty::image::expand_markers;
use crate::kitty::text_sizing::decode_markers;
use crate::markdown::{self, Node};
use crate::style::StylePrimitive;

/// Terminal renderer for markdown documents
pub struct Renderer<'a> {
    options: &'a RenderOptions,
}

impl<'a> Renderer<'a> {
    pub fn new(options: &'a RenderOptions) -> Self {
        Self { options }
    }

    /// Render markdown source to styled terminal text
    pub fn render(&self, source: &str) -> Result<String> {
        self.render_document(&markdown::parse(source))
    }

    /// Render an already parsed document
    pub fn render_document(&self, document: &Node) -> Result<String> {
        let mut ctx = RenderContext::new(self.options);
        self.render_node(&mut ctx, document, true)?;

        let output = String::from_utf8(ctx.into_output())?;
        Ok(expand_markers(&decode_markers(&output)))
    }

    fn render_children(&self, ctx: &mut RenderContext, children: &[Node]) -> Result<()> {
        for (i, child) in children.iter().enumerate() {
            self.render_node(ctx, child, i == 0)?;
        }
        Ok(())
    }

    /// `first` is set for the first node among its siblings
    fn render_node(&self, ctx: &mut RenderContext, node: &Node, first: bool) -> Result<()> {
        match node {
            Node::Document(children) => {
                let ctx = &mut ctx.scope();
                let doc = MarginBlock::document(ctx);
                doc.render(ctx)?;
                self.render_children(ctx, children)?;
                doc.finish(ctx)
            }
            Node::Heading { level, children } => {
                let ctx = &mut ctx.scope();
                let heading = HeadingElement::new(*level, first);
                heading.render(ctx)?;
                self.render_children(ctx, children)?;
                heading.finish(ctx)
            }
            Node::Paragraph(children) => {
                let ctx = &mut ctx.scope();
                let paragraph = ParagraphElement { first };
                paragraph.render(ctx)?;
                self.render_children(ctx, children)?;
                paragraph.finish(ctx)
            }
            Node::BlockQuote(children) => {
                let ctx = &mut ctx.scope();
                let quote = MarginBlock::block_quote(ctx);
                quote.render(ctx)?;
                self.render_children(ctx, children)?;
                quote.finish(ctx)
            }
            Node::List { nested, items, .. } => {
                if *nested {
                    ctx.write(Target::Current, b"\n");
                }
                let ctx = &mut ctx.scope();
                let list = MarginBlock::list(ctx, *nested);
                list.render(ctx)?;
                for (i, item) in items.iter().enumerate() {
                    let last = i + 1 == items.len();
                    self.render_item(ctx, item, last)?;
                }
                list.finish(ctx)
            }
            Node::Item { .. } => self.render_item(ctx, node, true),
            Node::CodeBlock { language, code } => {
                trace!("code block ({})", language.as_deref().unwrap_or("plain"));
                render_code_block(ctx, code)
            }
            Node::Rule => render_rule(ctx),
            Node::Text(text) => render_text_node(ctx, text),
            Node::Code(code) => render_code_span(ctx, code),
            Node::SoftBreak => {
                ctx.write(Target::Current, b" ");
                Ok(())
            }
            Node::HardBreak => {
                ctx.write(Target::Current, b"\n");
                Ok(())
            }
            Node::Emphasis(children) => {
                let styles = ctx.styles();
                self.render_span(ctx, &styles.emph, children)
            }
            Node::Strong(children) => {
                let styles = ctx.styles();
                self.render_span(ctx, &styles.strong, children)
            }
            Node::Strikethrough(children) => {
                let styles = ctx.styles();
                self.render_span(ctx, &styles.strikethrough, children)
            }
            Node::Link { url, .. } => LinkElement {
                url: url.clone(),
                text: node.plain_text(),
            }
            .render(ctx),
            Node::Image { url, alt } => ImageElement {
                url: url.clone(),
                alt: alt.clone(),
            }
            .render(ctx),
            Node::Html { html, block } => render_html(ctx, html, *block),
        }
    }

    /// Items end with a newline unless they are last or end in a sublist,
    /// which brings its own
    fn render_item(&self, ctx: &mut RenderContext, node: &Node, last: bool) -> Result<()> {
        let Node::Item {
            enumeration,
            task,
            children,
        } = node
        else {
            return self.render_node(ctx, node, false);
        };

        let ctx = &mut ctx.scope();
        let ends_in_list = matches!(children.last(), Some(Node::List { .. }));
        let item = ItemElement {
            enumeration: *enumeration,
            task: *task,
            newline: !last && !ends_in_list,
        };
        item.render(ctx)?;
        self.render_children(ctx, children)?;
        item.finish(ctx)
    }

    fn render_span(
        &self,
        ctx: &mut RenderContext,
        style: &StylePrimitive,
        children: &[Node],
    ) -> Result<()> {
        ctx.push_inline(style);
        let result = self.render_children(ctx, children);
        ctx.pop_inline();
        result
    }
}
