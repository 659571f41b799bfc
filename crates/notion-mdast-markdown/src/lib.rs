//! # notion-mdast-markdown
//!
//! Markdown parsing and serialization for the mdast trees built by
//! `notion-mdast-engine`, driven by registered [`Extension`]s.
//!
//! ## Modules
//!
//! - [`extension`] - the from/to-markdown feature pairs and their merge rules
//! - [`from_markdown`] - markdown text to mdast, via pulldown-cmark events
//! - [`to_markdown`] - mdast to markdown text
//!
//! ## Key Invariants
//!
//! - Task list syntax is only read or written when an extension enables it
//! - A tree stringified and parsed back with [`notion_extension`] is unchanged,
//!   except that empty paragraphs are only written as an item's first child
//!   and edge whitespace of emphasis moves outside the node
//! - Every parsed list item starts with a paragraph; an empty blockquote
//!   holds one empty paragraph

pub mod extension;
pub mod from_markdown;
pub mod to_markdown;

pub use extension::{Extension, FromMarkdown, ToMarkdown, gfm_extension, notion_extension};

use notion_mdast_engine::Root;

/// A markdown processor with a fixed set of extensions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Processor {
    from_markdown: FromMarkdown,
    to_markdown: ToMarkdown,
}

impl Processor {
    /// Build a processor with the union of `extensions` registered.
    pub fn new(extensions: &[Extension]) -> Self {
        let merged = extensions
            .iter()
            .fold(Extension::default(), |acc, ext| acc.merge(*ext));
        log::debug!("markdown processor extensions: {merged:?}");
        Self {
            from_markdown: merged.from_markdown,
            to_markdown: merged.to_markdown,
        }
    }

    pub fn parse(&self, markdown: &str) -> Root {
        from_markdown::parse(markdown, &self.from_markdown)
    }

    pub fn stringify(&self, root: &Root) -> String {
        to_markdown::stringify(root, &self.to_markdown)
    }
}
