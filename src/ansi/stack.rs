//! Block stack
//!
//! Every block-level construct pushes a scope that owns an output buffer and
//! its resolved style. A root scope always sits at the bottom and collects
//! the final document output.

use crate::style::{cascade_primitive, StyleBlock, StylePrimitive};

/// One active rendering scope
#[derive(Debug, Clone, Default)]
pub struct BlockElement {
    pub block: Vec<u8>,
    pub style: StyleBlock,
}

impl BlockElement {
    pub fn new(style: StyleBlock) -> Self {
        Self {
            block: Vec::new(),
            style,
        }
    }
}

/// Which buffer a renderer writes to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    Current,
    Parent,
}

#[derive(Debug, Clone)]
pub struct BlockStack {
    entries: Vec<BlockElement>,
}

impl Default for BlockStack {
    fn default() -> Self {
        Self::new()
    }
}

impl BlockStack {
    /// Stack holding only the root scope
    pub fn new() -> Self {
        Self {
            entries: vec![BlockElement::default()],
        }
    }

    pub fn push(&mut self, element: BlockElement) {
        self.entries.push(element);
    }

    /// Remove the top scope; the root scope is never removed
    pub fn pop(&mut self) -> Option<BlockElement> {
        if self.entries.len() > 1 {
            self.entries.pop()
        } else {
            None
        }
    }

    /// Drop every scope above the first `len`; the root scope always stays
    pub fn truncate(&mut self, len: usize) {
        self.entries.truncate(len.max(1));
    }

    /// Number of scopes, root included
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Always false: the root scope cannot be popped
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn current(&self) -> &BlockElement {
        &self.entries[self.entries.len() - 1]
    }

    pub fn current_mut(&mut self) -> &mut BlockElement {
        let top = self.entries.len() - 1;
        &mut self.entries[top]
    }

    /// Scope below the top; the root scope is its own parent
    pub fn parent(&self) -> &BlockElement {
        &self.entries[self.parent_index()]
    }

    pub fn parent_mut(&mut self) -> &mut BlockElement {
        let index = self.parent_index();
        &mut self.entries[index]
    }

    pub fn get_mut(&mut self, target: Target) -> &mut BlockElement {
        match target {
            Target::Current => self.current_mut(),
            Target::Parent => self.parent_mut(),
        }
    }

    fn parent_index(&self) -> usize {
        self.entries.len().saturating_sub(2)
    }

    pub fn indent(&self) -> usize {
        self.entries
            .iter()
            .filter_map(|e| e.style.indent)
            .map(|i| i as usize)
            .sum()
    }

    pub fn margin(&self) -> usize {
        self.entries
            .iter()
            .filter_map(|e| e.style.margin)
            .map(|m| m as usize)
            .sum()
    }

    /// Columns left for content once every scope's indent and margins are taken
    pub fn width(&self, word_wrap: usize) -> usize {
        word_wrap.saturating_sub(self.indent() + self.margin() * 2)
    }

    /// Resolve an inline style against the current scope
    pub fn with(&self, child: &StylePrimitive) -> StylePrimitive {
        cascade_primitive(&self.current().style.primitive, child, false)
    }

    /// Consume the stack, returning everything written to the root scope
    pub fn into_output(mut self) -> Vec<u8> {
        self.entries.truncate(1);
        self.entries
            .pop()
            .map(|root| root.block)
            .unwrap_or_default()
    }
}
