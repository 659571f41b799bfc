//! # mdast
//!
//! The subset of the [mdast](https://github.com/syntax-tree/mdast) markdown
//! syntax tree produced by the transformation, plus the GFM `checked` field on
//! list items.
//!
//! Every node serializes to the standard mdast JSON shape
//! (`{"type": "listItem", "checked": true, "children": [...]}`); optional
//! fields are omitted when unset.

use serde::{Deserialize, Serialize};

/// Document root.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "type", rename = "root")]
pub struct Root {
    pub children: Vec<BlockContent>,
}

impl Root {
    pub fn new(children: Vec<BlockContent>) -> Self {
        Self { children }
    }
}

/// Block-level (flow) content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum BlockContent {
    Paragraph {
        children: Vec<PhrasingContent>,
    },
    Heading {
        /// 1–6; Notion blocks only produce 1–3.
        depth: u8,
        children: Vec<PhrasingContent>,
    },
    List {
        ordered: bool,
        children: Vec<ListItem>,
    },
    Blockquote {
        children: Vec<BlockContent>,
    },
    Code {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        lang: Option<String>,
        value: String,
    },
    Image {
        url: String,
        alt: String,
    },
}

impl BlockContent {
    pub fn paragraph(children: Vec<PhrasingContent>) -> Self {
        BlockContent::Paragraph { children }
    }

    pub fn heading(depth: u8, children: Vec<PhrasingContent>) -> Self {
        BlockContent::Heading { depth, children }
    }

    pub fn list(ordered: bool, children: Vec<ListItem>) -> Self {
        BlockContent::List { ordered, children }
    }

    /// The mdast `type` of this node.
    pub fn node_type(&self) -> &'static str {
        match self {
            BlockContent::Paragraph { .. } => "paragraph",
            BlockContent::Heading { .. } => "heading",
            BlockContent::List { .. } => "list",
            BlockContent::Blockquote { .. } => "blockquote",
            BlockContent::Code { .. } => "code",
            BlockContent::Image { .. } => "image",
        }
    }
}

/// A list item. `checked` is only set for GFM task list items.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "type", rename = "listItem")]
pub struct ListItem {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub checked: Option<bool>,
    pub children: Vec<BlockContent>,
}

/// Inline (phrasing) content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum PhrasingContent {
    Text { value: String },
    Strong { children: Vec<PhrasingContent> },
    Emphasis { children: Vec<PhrasingContent> },
    Delete { children: Vec<PhrasingContent> },
    InlineCode { value: String },
}

impl PhrasingContent {
    pub fn text(value: impl Into<String>) -> Self {
        PhrasingContent::Text {
            value: value.into(),
        }
    }

    pub fn inline_code(value: impl Into<String>) -> Self {
        PhrasingContent::InlineCode {
            value: value.into(),
        }
    }
}
