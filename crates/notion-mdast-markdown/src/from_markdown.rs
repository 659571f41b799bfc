use notion_mdast_engine::mdast::{BlockContent, ListItem, PhrasingContent, Root};
use pulldown_cmark::{CodeBlockKind, Event, HeadingLevel, Options, Parser, Tag};

use crate::extension::FromMarkdown;

/// Parse markdown into an mdast root.
///
/// Only node types the transformation produces are built; constructs without
/// a counterpart (links, html, rules, ...) are reduced to their text or dropped.
pub fn parse(markdown: &str, extension: &FromMarkdown) -> Root {
    let mut options = Options::empty();
    if extension.task_list_items {
        options.insert(Options::ENABLE_TASKLISTS);
    }
    if extension.strikethrough {
        options.insert(Options::ENABLE_STRIKETHROUGH);
    }

    let mut state = ParseState::new();
    for event in Parser::new_ext(markdown, options) {
        state.process(event);
    }
    state.finish()
}

#[derive(Debug, Clone, Copy)]
enum InlineKind {
    Paragraph,
    Heading(u8),
    Strong,
    Emphasis,
    Delete,
    /// Links: children are spliced into the parent.
    Transparent,
}

#[derive(Debug)]
enum Frame {
    /// Root or blockquote.
    Blocks { children: Vec<BlockContent> },
    List {
        ordered: bool,
        items: Vec<ListItem>,
    },
    Item {
        checked: Option<bool>,
        children: Vec<BlockContent>,
        /// Text of a tight item, not wrapped in a paragraph event.
        pending: Vec<PhrasingContent>,
    },
    Inline {
        kind: InlineKind,
        children: Vec<PhrasingContent>,
        /// Images seen in this frame; their alt text is also in `children`.
        images: Vec<BlockContent>,
    },
    Code {
        lang: Option<String>,
        value: String,
    },
    Image {
        url: String,
        alt: String,
    },
    /// Any construct we do not model; its content is discarded.
    Other,
}

struct ParseState {
    stack: Vec<Frame>,
}

impl ParseState {
    fn new() -> Self {
        Self {
            stack: vec![Frame::Blocks { children: vec![] }],
        }
    }

    fn finish(mut self) -> Root {
        // Close anything left open by malformed event streams.
        while self.stack.len() > 1 {
            self.close();
        }
        match self.stack.pop() {
            Some(Frame::Blocks { children }) => Root::new(children),
            _ => Root::default(),
        }
    }

    fn process(&mut self, event: Event<'_>) {
        match event {
            Event::Start(tag) => self.open(tag),
            Event::End(_) => self.close(),
            Event::Text(text) => self.push_text(&text),
            Event::Code(code) => match self.stack.last_mut() {
                Some(Frame::Image { alt, .. }) => alt.push_str(&code),
                _ => self.push_inline(PhrasingContent::inline_code(code.to_string())),
            },
            Event::SoftBreak | Event::HardBreak => self.push_text("\n"),
            Event::Html(html) | Event::InlineHtml(html) => self.push_text(&html),
            Event::InlineMath(math) | Event::DisplayMath(math) => self.push_text(&math),
            Event::TaskListMarker(checked) => {
                let item = self.stack.iter_mut().rev().find_map(|frame| match frame {
                    Frame::Item { checked: slot, .. } => Some(slot),
                    _ => None,
                });
                if let Some(slot) = item {
                    *slot = Some(checked);
                }
            }
            _ => {}
        }
    }

    fn open(&mut self, tag: Tag<'_>) {
        let frame = match tag {
            Tag::Paragraph => {
                self.flush_item_text();
                inline_frame(InlineKind::Paragraph)
            }
            Tag::Heading { level, .. } => {
                self.flush_item_text();
                inline_frame(InlineKind::Heading(heading_depth(level)))
            }
            Tag::BlockQuote(_) => {
                self.flush_item_text();
                Frame::Blocks { children: vec![] }
            }
            Tag::CodeBlock(kind) => {
                self.flush_item_text();
                let lang = match kind {
                    CodeBlockKind::Fenced(info) => {
                        Some(info.trim().to_string()).filter(|lang| !lang.is_empty())
                    }
                    CodeBlockKind::Indented => None,
                };
                Frame::Code {
                    lang,
                    value: String::new(),
                }
            }
            Tag::List(first_number) => {
                self.flush_item_text();
                Frame::List {
                    ordered: first_number.is_some(),
                    items: vec![],
                }
            }
            Tag::Item => Frame::Item {
                checked: None,
                children: vec![],
                pending: vec![],
            },
            Tag::Strong => inline_frame(InlineKind::Strong),
            Tag::Emphasis => inline_frame(InlineKind::Emphasis),
            Tag::Strikethrough => inline_frame(InlineKind::Delete),
            Tag::Link { .. } => inline_frame(InlineKind::Transparent),
            Tag::Image { dest_url, .. } => Frame::Image {
                url: dest_url.into_string(),
                alt: String::new(),
            },
            _ => {
                self.flush_item_text();
                Frame::Other
            }
        };
        self.stack.push(frame);
    }

    fn close(&mut self) {
        // The document root is only taken apart by `finish`.
        if self.stack.len() <= 1 {
            log::debug!("ignoring unbalanced end event");
            return;
        }
        let Some(frame) = self.stack.pop() else {
            return;
        };
        match frame {
            Frame::Blocks { mut children } => {
                if children.is_empty() {
                    children.push(BlockContent::paragraph(vec![]));
                }
                self.push_block(BlockContent::Blockquote { children })
            }
            Frame::List { ordered, items } => self.push_block(BlockContent::list(ordered, items)),
            Frame::Item {
                checked,
                mut children,
                pending,
            } => {
                if !pending.is_empty() {
                    children.push(BlockContent::paragraph(merge_text(pending)));
                }
                // Items always open with their own text, even when it is empty.
                if !matches!(children.first(), Some(BlockContent::Paragraph { .. })) {
                    children.insert(0, BlockContent::paragraph(vec![]));
                }
                if let Some(Frame::List { items, .. }) = self.stack.last_mut() {
                    items.push(ListItem { checked, children });
                }
            }
            Frame::Inline {
                kind,
                children,
                mut images,
            } => match kind {
                InlineKind::Paragraph if children.len() == 1 && images.len() == 1 => {
                    self.push_block(images.remove(0));
                }
                InlineKind::Paragraph => self.push_block(BlockContent::paragraph(merge_text(children))),
                InlineKind::Heading(depth) => {
                    self.push_block(BlockContent::heading(depth, merge_text(children)))
                }
                InlineKind::Strong => self.push_inline(PhrasingContent::Strong {
                    children: merge_text(children),
                }),
                InlineKind::Emphasis => self.push_inline(PhrasingContent::Emphasis {
                    children: merge_text(children),
                }),
                InlineKind::Delete => self.push_inline(PhrasingContent::Delete {
                    children: merge_text(children),
                }),
                InlineKind::Transparent => {
                    for child in children {
                        self.push_inline(child);
                    }
                }
            },
            Frame::Code { lang, mut value } => {
                if value.ends_with('\n') {
                    value.pop();
                }
                self.push_block(BlockContent::Code { lang, value });
            }
            Frame::Image { url, alt } => match self.stack.last_mut() {
                Some(Frame::Inline {
                    children, images, ..
                }) => {
                    let image = BlockContent::Image {
                        url,
                        alt: alt.clone(),
                    };
                    images.push(image);
                    children.push(PhrasingContent::text(alt));
                }
                _ => self.push_block(BlockContent::Image { url, alt }),
            },
            Frame::Other => {}
        }
    }

    fn push_text(&mut self, text: &str) {
        match self.stack.last_mut() {
            Some(Frame::Code { value, .. }) => value.push_str(text),
            Some(Frame::Image { alt, .. }) => alt.push_str(text),
            _ => self.push_inline(PhrasingContent::text(text)),
        }
    }

    fn push_inline(&mut self, node: PhrasingContent) {
        match self.stack.last_mut() {
            Some(Frame::Inline { children, .. }) => children.push(node),
            Some(Frame::Item { pending, .. }) => pending.push(node),
            Some(Frame::Image { alt, .. }) => alt.push_str(&plain_text(&node)),
            _ => log::debug!("dropping inline content outside a paragraph"),
        }
    }

    fn push_block(&mut self, node: BlockContent) {
        self.flush_item_text();
        match self.stack.last_mut() {
            Some(Frame::Blocks { children }) | Some(Frame::Item { children, .. }) => {
                children.push(node)
            }
            _ => log::debug!("dropping {} outside a block container", node.node_type()),
        }
    }

    /// Wraps a tight item's loose text in a paragraph before block content follows.
    fn flush_item_text(&mut self) {
        if let Some(Frame::Item {
            children, pending, ..
        }) = self.stack.last_mut()
        {
            if !pending.is_empty() {
                let text = std::mem::take(pending);
                children.push(BlockContent::paragraph(merge_text(text)));
            }
        }
    }
}

fn inline_frame(kind: InlineKind) -> Frame {
    Frame::Inline {
        kind,
        children: vec![],
        images: vec![],
    }
}

fn heading_depth(level: HeadingLevel) -> u8 {
    match level {
        HeadingLevel::H1 => 1,
        HeadingLevel::H2 => 2,
        HeadingLevel::H3 => 3,
        HeadingLevel::H4 => 4,
        HeadingLevel::H5 => 5,
        HeadingLevel::H6 => 6,
    }
}

/// Joins adjacent text nodes; the parser splits text at escapes and entities.
fn merge_text(nodes: Vec<PhrasingContent>) -> Vec<PhrasingContent> {
    let mut out: Vec<PhrasingContent> = Vec::with_capacity(nodes.len());
    for node in nodes {
        if let PhrasingContent::Text { value } = &node {
            if let Some(PhrasingContent::Text { value: prev }) = out.last_mut() {
                prev.push_str(value);
                continue;
            }
        }
        out.push(node);
    }
    out
}

fn plain_text(node: &PhrasingContent) -> String {
    match node {
        PhrasingContent::Text { value } | PhrasingContent::InlineCode { value } => value.clone(),
        PhrasingContent::Strong { children }
        | PhrasingContent::Emphasis { children }
        | PhrasingContent::Delete { children } => children.iter().map(plain_text).collect(),
    }
}
