use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The closed set of colors Notion attaches to text and blocks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApiColor {
    #[default]
    Default,
    Gray,
    Brown,
    Orange,
    Yellow,
    Green,
    Blue,
    Purple,
    Pink,
    Red,
    GrayBackground,
    BrownBackground,
    OrangeBackground,
    YellowBackground,
    GreenBackground,
    BlueBackground,
    PurpleBackground,
    PinkBackground,
    RedBackground,
}

/// Style flags on a rich text run. Each flag is independent on input.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Annotations {
    pub bold: bool,
    pub italic: bool,
    pub strikethrough: bool,
    pub underline: bool,
    pub code: bool,
    pub color: ApiColor,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Link {
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextContent {
    pub content: String,
    pub link: Option<Link>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EquationContent {
    pub expression: String,
}

/// Object literal tag for user references (`"object": "user"`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserObject {
    User,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartialUser {
    pub object: UserObject,
    pub id: Uuid,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateMention {
    pub start: String,
    pub end: Option<String>,
    pub time_zone: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObjectRef {
    pub id: Uuid,
}

/// What an `@`-mention points at.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Mention {
    User { user: PartialUser },
    Date { date: DateMention },
    Page { page: ObjectRef },
    Database { database: ObjectRef },
    LinkPreview { link_preview: Link },
}

/// One annotated span of text, the atomic unit of inline content.
///
/// Every variant carries `plain_text`, the display string Notion renders
/// when the variant's own payload is not interpreted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RichText {
    Text {
        text: TextContent,
        annotations: Annotations,
        plain_text: String,
        href: Option<String>,
    },
    Equation {
        equation: EquationContent,
        annotations: Annotations,
        plain_text: String,
        href: Option<String>,
    },
    Mention {
        mention: Mention,
        annotations: Annotations,
        plain_text: String,
        href: Option<String>,
    },
}

impl RichText {
    /// Builds an unannotated `text` run whose content and display string match.
    pub fn plain(content: impl Into<String>) -> Self {
        Self::styled(content, Annotations::default())
    }

    pub fn styled(content: impl Into<String>, annotations: Annotations) -> Self {
        let content = content.into();
        RichText::Text {
            text: TextContent {
                content: content.clone(),
                link: None,
            },
            annotations,
            plain_text: content,
            href: None,
        }
    }

    /// Fallback display string.
    pub fn plain_text(&self) -> &str {
        match self {
            RichText::Text { plain_text, .. }
            | RichText::Equation { plain_text, .. }
            | RichText::Mention { plain_text, .. } => plain_text,
        }
    }

    pub fn annotations(&self) -> &Annotations {
        match self {
            RichText::Text { annotations, .. }
            | RichText::Equation { annotations, .. }
            | RichText::Mention { annotations, .. } => annotations,
        }
    }
}

/// Concatenates the display strings of `runs` without a separator.
pub fn concat_plain_text(runs: &[RichText]) -> String {
    runs.iter().map(RichText::plain_text).collect()
}
