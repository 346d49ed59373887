//! Markdown front end
//!
//! Builds the [`Node`] tree the renderer walks from `pulldown-cmark` events.
//! Containers the renderer has no element for (tables, footnotes, metadata)
//! are flattened into their parent.
//!
//! The parser resolves backslash escapes itself, while the element pipeline
//! unescapes every text token. Text is therefore handed over with its
//! backslashes doubled so that unescaping restores it exactly.

use pulldown_cmark::{CodeBlockKind, Event, Options, Parser, Tag};

/// Markdown element tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Document(Vec<Node>),
    Heading {
        level: u8,
        children: Vec<Node>,
    },
    Paragraph(Vec<Node>),
    BlockQuote(Vec<Node>),
    List {
        start: Option<u64>,
        /// Directly inside a list item
        nested: bool,
        items: Vec<Node>,
    },
    Item {
        /// Number shown for ordered list items
        enumeration: Option<u64>,
        /// Task list state, ticked or not
        task: Option<bool>,
        children: Vec<Node>,
    },
    CodeBlock {
        language: Option<String>,
        code: String,
    },
    Rule,
    Text(String),
    Code(String),
    SoftBreak,
    HardBreak,
    Emphasis(Vec<Node>),
    Strong(Vec<Node>),
    Strikethrough(Vec<Node>),
    Link {
        url: String,
        children: Vec<Node>,
    },
    Image {
        url: String,
        alt: String,
    },
    Html {
        html: String,
        block: bool,
    },
}

impl Node {
    /// Concatenated text of the node and its descendants, in escaped form
    pub fn plain_text(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    fn collect_text(&self, out: &mut String) {
        match self {
            Node::Text(text) => out.push_str(text),
            Node::Code(code) => out.push_str(&escape(code)),
            Node::Image { alt, .. } => out.push_str(alt),
            Node::SoftBreak | Node::HardBreak => out.push(' '),
            Node::Document(children)
            | Node::Heading { children, .. }
            | Node::Paragraph(children)
            | Node::BlockQuote(children)
            | Node::List { items: children, .. }
            | Node::Item { children, .. }
            | Node::Emphasis(children)
            | Node::Strong(children)
            | Node::Strikethrough(children)
            | Node::Link { children, .. } => {
                for child in children {
                    child.collect_text(out);
                }
            }
            Node::CodeBlock { .. } | Node::Rule | Node::Html { .. } => {}
        }
    }
}

fn escape(text: &str) -> String {
    text.replace('\\', "\\\\")
}

/// Open container while events are consumed
enum Open {
    Document,
    Heading(u8),
    Paragraph,
    BlockQuote,
    List(Option<u64>),
    Item(Option<bool>),
    CodeBlock(Option<String>),
    HtmlBlock,
    Emphasis,
    Strong,
    Strikethrough,
    Link(String),
    Image(String),
    Flatten,
}

struct Frame {
    open: Open,
    children: Vec<Node>,
}

impl Frame {
    fn new(open: Open) -> Self {
        Self {
            open,
            children: Vec::new(),
        }
    }

    /// Adjacent text is merged so wrapping sees whole runs
    fn push(&mut self, node: Node) {
        if let (Some(Node::Text(last)), Node::Text(text)) = (self.children.last_mut(), &node) {
            last.push_str(text);
            return;
        }
        self.children.push(node);
    }

    /// Code and HTML blocks keep their text as written
    fn is_literal(&self) -> bool {
        matches!(self.open, Open::CodeBlock(_) | Open::HtmlBlock)
    }
}

fn open_tag(tag: Tag) -> Open {
    match tag {
        Tag::Paragraph => Open::Paragraph,
        Tag::Heading { level, .. } => Open::Heading(level as u8),
        Tag::BlockQuote => Open::BlockQuote,
        Tag::CodeBlock(CodeBlockKind::Fenced(info)) => {
            let language = info.split_whitespace().next().map(str::to_string);
            Open::CodeBlock(language)
        }
        Tag::CodeBlock(CodeBlockKind::Indented) => Open::CodeBlock(None),
        Tag::HtmlBlock => Open::HtmlBlock,
        Tag::List(start) => Open::List(start),
        Tag::Item => Open::Item(None),
        Tag::Emphasis => Open::Emphasis,
        Tag::Strong => Open::Strong,
        Tag::Strikethrough => Open::Strikethrough,
        Tag::Link { dest_url, .. } => Open::Link(dest_url.into_string()),
        Tag::Image { dest_url, .. } => Open::Image(dest_url.into_string()),
        _ => Open::Flatten,
    }
}

fn literal(children: Vec<Node>) -> String {
    children
        .into_iter()
        .filter_map(|node| match node {
            Node::Text(text) => Some(text),
            _ => None,
        })
        .collect()
}

/// Close `frame` into zero or more nodes for its parent
fn close(frame: Frame, parent: Option<&Frame>) -> Vec<Node> {
    let children = frame.children;
    let node = match frame.open {
        Open::Document => Node::Document(children),
        Open::Heading(level) => Node::Heading { level, children },
        Open::Paragraph => Node::Paragraph(children),
        Open::BlockQuote => Node::BlockQuote(children),
        Open::List(start) => {
            let items = children
                .into_iter()
                .enumerate()
                .map(|(i, item)| match item {
                    Node::Item { task, children, .. } => Node::Item {
                        enumeration: start.map(|s| s + i as u64),
                        task,
                        children,
                    },
                    other => other,
                })
                .collect();
            Node::List {
                start,
                nested: matches!(parent, Some(Frame { open: Open::Item(_), .. })),
                items,
            }
        }
        Open::Item(task) => Node::Item {
            enumeration: None,
            task,
            children,
        },
        Open::CodeBlock(language) => Node::CodeBlock {
            language,
            code: literal(children),
        },
        Open::HtmlBlock => Node::Html {
            html: literal(children),
            block: true,
        },
        Open::Emphasis => Node::Emphasis(children),
        Open::Strong => Node::Strong(children),
        Open::Strikethrough => Node::Strikethrough(children),
        Open::Link(url) => Node::Link { url, children },
        Open::Image(url) => {
            let alt = children.iter().map(Node::plain_text).collect();
            Node::Image { url, alt }
        }
        Open::Flatten => return children,
    };
    vec![node]
}

/// Parse markdown into a [`Node::Document`]
pub fn parse(markdown: &str) -> Node {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_STRIKETHROUGH);
    options.insert(Options::ENABLE_TASKLISTS);

    let mut stack = vec![Frame::new(Open::Document)];

    for event in Parser::new_ext(markdown, options) {
        match event {
            Event::Start(tag) => stack.push(Frame::new(open_tag(tag))),
            Event::End(_) => {
                // the document frame is never closed by an event
                if stack.len() > 1 {
                    if let Some(frame) = stack.pop() {
                        let nodes = close(frame, stack.last());
                        if let Some(parent) = stack.last_mut() {
                            parent.children.extend(nodes);
                        }
                    }
                }
            }
            Event::TaskListMarker(checked) => {
                let item = stack
                    .iter_mut()
                    .rev()
                    .find(|frame| matches!(frame.open, Open::Item(_)));
                if let Some(frame) = item {
                    frame.open = Open::Item(Some(checked));
                }
            }
            other => {
                let Some(frame) = stack.last_mut() else {
                    continue;
                };
                let node = match other {
                    Event::Text(text) if frame.is_literal() => Node::Text(text.into_string()),
                    Event::Text(text) => Node::Text(escape(&text)),
                    Event::Code(code) => Node::Code(code.into_string()),
                    Event::Html(html) if frame.is_literal() => Node::Text(html.into_string()),
                    Event::Html(html) => Node::Html {
                        html: html.into_string(),
                        block: true,
                    },
                    Event::InlineHtml(html) => Node::Html {
                        html: html.into_string(),
                        block: false,
                    },
                    Event::FootnoteReference(label) => Node::Text(escape(&format!("[^{}]", label))),
                    Event::SoftBreak => Node::SoftBreak,
                    Event::HardBreak => Node::HardBreak,
                    Event::Rule => Node::Rule,
                    _ => continue,
                };
                frame.push(node);
            }
        }
    }

    // unbalanced input cannot come out of the parser, but fold anything left
    while stack.len() > 1 {
        if let Some(frame) = stack.pop() {
            let nodes = close(frame, stack.last());
            if let Some(parent) = stack.last_mut() {
                parent.children.extend(nodes);
            }
        }
    }

    match stack.pop() {
        Some(frame) => Node::Document(frame.children),
        None => Node::Document(Vec::new()),
    }
}
