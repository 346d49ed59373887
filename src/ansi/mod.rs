//! ANSI rendering engine
//!
//! Elements render into a stack of block buffers. Each block construct
//! pushes a scope on entry and drains it into its parent when it finishes,
//! so the root buffer holds the complete output once the tree is walked.

mod blocks;
mod color;
mod context;
mod element;
mod heading;
mod inline;
mod margin;
mod stack;
pub(crate) mod text;

pub use blocks::{render_code_block, render_rule, ItemElement, MarginBlock, ParagraphElement};
pub use color::ColorProfile;
pub use context::{RenderContext, RenderOptions};
pub use element::{BaseElement, SuffixGuard};
pub use heading::HeadingElement;
pub use inline::{
    render_code_span, render_html, render_text_node, resolve_relative_url, ImageElement, LinkElement,
};
pub use margin::{word_wrap, MarginWriter};
pub use stack::{BlockElement, BlockStack, Target};
