use serde::de::{Error as _, Unexpected};
use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

use super::rich_text::{ApiColor, Link, PartialUser, RichText, UserObject};

/// Object literal tag for blocks (`"object": "block"`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BlockObject {
    #[default]
    Block,
}

/// Where a block lives in the workspace hierarchy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Parent {
    DatabaseId { database_id: Uuid },
    PageId { page_id: Uuid },
    BlockId { block_id: Uuid },
    Workspace {
        #[serde(deserialize_with = "literal_true")]
        workspace: bool,
    },
}

/// Accepts only `true`; the API never sends `"workspace": false`.
fn literal_true<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
    if bool::deserialize(deserializer)? {
        Ok(true)
    } else {
        Err(D::Error::invalid_value(Unexpected::Bool(false), &"true"))
    }
}

/// A single node of the Notion block tree.
///
/// The common fields are shared by every block; the kind-specific payload
/// lives in [`BlockKind`], flattened next to them exactly as the API returns
/// it (`{"type": "paragraph", "paragraph": {...}, "id": ..., ...}`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Block {
    pub object: BlockObject,
    pub id: Uuid,
    pub parent: Parent,
    pub created_time: String,
    pub created_by: PartialUser,
    pub last_edited_time: String,
    pub last_edited_by: PartialUser,
    pub has_children: bool,
    pub archived: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub in_trash: Option<bool>,
    #[serde(flatten)]
    pub kind: BlockKind,
}

impl Block {
    /// Creates a block with placeholder metadata around `kind`.
    ///
    /// `has_children` is derived from the payload's nested children.
    pub fn new(kind: BlockKind) -> Self {
        let nobody = PartialUser {
            object: UserObject::User,
            id: Uuid::nil(),
        };
        let has_children = !kind.children().is_empty();
        Self {
            object: BlockObject::Block,
            id: Uuid::nil(),
            parent: Parent::Workspace { workspace: true },
            created_time: String::new(),
            created_by: nobody.clone(),
            last_edited_time: String::new(),
            last_edited_by: nobody,
            has_children,
            archived: false,
            in_trash: None,
            kind,
        }
    }

    /// The API discriminant of this block, e.g. `"bulleted_list_item"`.
    pub fn type_name(&self) -> &'static str {
        self.kind.type_name()
    }

    pub fn list_kind(&self) -> Option<ListKind> {
        self.kind.list_kind()
    }

    /// Borrowed view of a listable block, or `None` for any other kind.
    pub fn as_list_item(&self) -> Option<ListItemRef<'_>> {
        let (kind, content, checked) = match &self.kind {
            BlockKind::BulletedListItem { bulleted_list_item } => {
                (ListKind::Bulleted, bulleted_list_item, None)
            }
            BlockKind::NumberedListItem { numbered_list_item } => {
                (ListKind::Numbered, numbered_list_item, None)
            }
            BlockKind::ToDo { to_do } => {
                return Some(ListItemRef {
                    kind: ListKind::ToDo,
                    rich_text: &to_do.rich_text,
                    checked: Some(to_do.checked),
                    children: to_do.children.as_deref().unwrap_or_default(),
                });
            }
            _ => return None,
        };
        Some(ListItemRef {
            kind,
            rich_text: &content.rich_text,
            checked,
            children: content.children.as_deref().unwrap_or_default(),
        })
    }
}

/// The three block kinds that are grouped into lists.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListKind {
    Bulleted,
    Numbered,
    ToDo,
}

impl ListKind {
    pub fn is_ordered(self) -> bool {
        matches!(self, ListKind::Numbered)
    }

    pub fn is_task_list(self) -> bool {
        matches!(self, ListKind::ToDo)
    }
}

/// A listable block reduced to what list grouping needs.
#[derive(Debug, Clone, Copy)]
pub struct ListItemRef<'a> {
    pub kind: ListKind,
    pub rich_text: &'a [RichText],
    /// Only to-do items carry a checked flag.
    pub checked: Option<bool>,
    pub children: &'a [Block],
}

/// Payload shared by text blocks that may nest children
/// (paragraph, list items, toggle, quote).
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TextBlock {
    pub rich_text: Vec<RichText>,
    pub color: ApiColor,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<Block>>,
}

impl TextBlock {
    pub fn new(rich_text: Vec<RichText>) -> Self {
        Self {
            rich_text,
            ..Self::default()
        }
    }

    pub fn with_children(rich_text: Vec<RichText>, children: Vec<Block>) -> Self {
        Self {
            rich_text,
            color: ApiColor::Default,
            children: Some(children),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct HeadingBlock {
    pub rich_text: Vec<RichText>,
    pub color: ApiColor,
    pub is_toggleable: bool,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ToDoBlock {
    pub rich_text: Vec<RichText>,
    pub checked: bool,
    pub color: ApiColor,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<Block>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Icon {
    Emoji { emoji: String },
    External { external: Link },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalloutBlock {
    pub rich_text: Vec<RichText>,
    pub icon: Option<Icon>,
    pub color: ApiColor,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<Block>>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CodeBlock {
    pub rich_text: Vec<RichText>,
    pub caption: Vec<RichText>,
    pub language: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Empty {}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TableOfContentsBlock {
    pub color: ApiColor,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FileKind {
    External,
    File,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HostedFile {
    pub url: String,
    pub expiry_time: String,
}

/// A file reference: either Notion-hosted (`file`) or an external URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileObject {
    #[serde(rename = "type")]
    pub kind: FileKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub external: Option<Link>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file: Option<HostedFile>,
}

impl FileObject {
    pub fn external(url: impl Into<String>) -> Self {
        Self {
            kind: FileKind::External,
            external: Some(Link { url: url.into() }),
            file: None,
        }
    }

    /// Hosted url if present and non-empty, else the external url.
    pub fn url(&self) -> Option<&str> {
        let hosted = self.file.as_ref().map(|f| f.url.as_str());
        let external = self.external.as_ref().map(|l| l.url.as_str());
        hosted
            .filter(|u| !u.is_empty())
            .or(external.filter(|u| !u.is_empty()))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageBlock {
    #[serde(flatten)]
    pub source: FileObject,
    pub caption: Vec<RichText>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookmarkBlock {
    pub url: String,
    pub caption: Vec<RichText>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmbedBlock {
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileBlock {
    #[serde(flatten)]
    pub source: FileObject,
    pub caption: Vec<RichText>,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TitleBlock {
    pub title: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableBlock {
    pub table_width: u32,
    pub has_column_header: bool,
    pub has_row_header: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableRowBlock {
    pub cells: Vec<Vec<RichText>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EquationBlock {
    pub expression: String,
}

/// Kind-specific block payload, discriminated by the `type` field.
///
/// The set is closed: a payload with any other `type` fails validation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum BlockKind {
    Paragraph {
        paragraph: TextBlock,
    },
    #[serde(rename = "heading_1")]
    Heading1 {
        heading_1: HeadingBlock,
    },
    #[serde(rename = "heading_2")]
    Heading2 {
        heading_2: HeadingBlock,
    },
    #[serde(rename = "heading_3")]
    Heading3 {
        heading_3: HeadingBlock,
    },
    BulletedListItem {
        bulleted_list_item: TextBlock,
    },
    NumberedListItem {
        numbered_list_item: TextBlock,
    },
    ToDo {
        to_do: ToDoBlock,
    },
    Toggle {
        toggle: TextBlock,
    },
    Quote {
        quote: TextBlock,
    },
    Callout {
        callout: CalloutBlock,
    },
    Code {
        code: CodeBlock,
    },
    Divider {
        divider: Empty,
    },
    Breadcrumb {
        breadcrumb: Empty,
    },
    TableOfContents {
        table_of_contents: TableOfContentsBlock,
    },
    Image {
        image: ImageBlock,
    },
    Bookmark {
        bookmark: BookmarkBlock,
    },
    Embed {
        embed: EmbedBlock,
    },
    File {
        file: FileBlock,
    },
    ChildPage {
        child_page: TitleBlock,
    },
    ChildDatabase {
        child_database: TitleBlock,
    },
    Table {
        table: TableBlock,
    },
    TableRow {
        table_row: TableRowBlock,
    },
    Equation {
        equation: EquationBlock,
    },
    Unsupported {
        unsupported: Empty,
    },
}

impl BlockKind {
    pub fn type_name(&self) -> &'static str {
        match self {
            BlockKind::Paragraph { .. } => "paragraph",
            BlockKind::Heading1 { .. } => "heading_1",
            BlockKind::Heading2 { .. } => "heading_2",
            BlockKind::Heading3 { .. } => "heading_3",
            BlockKind::BulletedListItem { .. } => "bulleted_list_item",
            BlockKind::NumberedListItem { .. } => "numbered_list_item",
            BlockKind::ToDo { .. } => "to_do",
            BlockKind::Toggle { .. } => "toggle",
            BlockKind::Quote { .. } => "quote",
            BlockKind::Callout { .. } => "callout",
            BlockKind::Code { .. } => "code",
            BlockKind::Divider { .. } => "divider",
            BlockKind::Breadcrumb { .. } => "breadcrumb",
            BlockKind::TableOfContents { .. } => "table_of_contents",
            BlockKind::Image { .. } => "image",
            BlockKind::Bookmark { .. } => "bookmark",
            BlockKind::Embed { .. } => "embed",
            BlockKind::File { .. } => "file",
            BlockKind::ChildPage { .. } => "child_page",
            BlockKind::ChildDatabase { .. } => "child_database",
            BlockKind::Table { .. } => "table",
            BlockKind::TableRow { .. } => "table_row",
            BlockKind::Equation { .. } => "equation",
            BlockKind::Unsupported { .. } => "unsupported",
        }
    }

    pub fn list_kind(&self) -> Option<ListKind> {
        match self {
            BlockKind::BulletedListItem { .. } => Some(ListKind::Bulleted),
            BlockKind::NumberedListItem { .. } => Some(ListKind::Numbered),
            BlockKind::ToDo { .. } => Some(ListKind::ToDo),
            _ => None,
        }
    }

    /// Nested children carried in the payload; empty for kinds that cannot nest.
    pub fn children(&self) -> &[Block] {
        let children = match self {
            BlockKind::Paragraph { paragraph: b }
            | BlockKind::BulletedListItem {
                bulleted_list_item: b,
            }
            | BlockKind::NumberedListItem {
                numbered_list_item: b,
            }
            | BlockKind::Toggle { toggle: b }
            | BlockKind::Quote { quote: b } => &b.children,
            BlockKind::ToDo { to_do } => &to_do.children,
            BlockKind::Callout { callout } => &callout.children,
            _ => return &[],
        };
        children.as_deref().unwrap_or_default()
    }
}

/// Envelope returned by the "retrieve block children" endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlockChildrenResponse {
    pub object: ListObject,
    #[serde(rename = "type")]
    pub kind: ResponseKind,
    pub block: Empty,
    pub next_cursor: Option<String>,
    pub has_more: bool,
    pub results: Vec<Block>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ListObject {
    List,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResponseKind {
    Block,
}
