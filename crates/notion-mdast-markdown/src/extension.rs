/// Syntax recognized when parsing markdown.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FromMarkdown {
    /// `- [x] item` becomes a list item with `checked: Some(true)`.
    pub task_list_items: bool,
    /// `~~text~~` becomes a `delete` node.
    pub strikethrough: bool,
}

impl FromMarkdown {
    /// Union of both feature sets. Merging never disables a feature.
    pub fn merge(self, other: Self) -> Self {
        Self {
            task_list_items: self.task_list_items || other.task_list_items,
            strikethrough: self.strikethrough || other.strikethrough,
        }
    }
}

/// Syntax written when serializing markdown.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ToMarkdown {
    /// Write `[x]`/`[ ]` for list items whose `checked` is set.
    pub task_list_items: bool,
    /// Write `delete` nodes as `~~text~~` instead of their bare text.
    pub strikethrough: bool,
}

impl ToMarkdown {
    pub fn merge(self, other: Self) -> Self {
        Self {
            task_list_items: self.task_list_items || other.task_list_items,
            strikethrough: self.strikethrough || other.strikethrough,
        }
    }
}

/// A parse/serialize pair registered together on a [`Processor`](crate::Processor).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Extension {
    pub from_markdown: FromMarkdown,
    pub to_markdown: ToMarkdown,
}

impl Extension {
    pub fn merge(self, other: Self) -> Self {
        Self {
            from_markdown: self.from_markdown.merge(other.from_markdown),
            to_markdown: self.to_markdown.merge(other.to_markdown),
        }
    }
}

/// GitHub-flavored list items and strikethrough.
pub fn gfm_extension() -> Extension {
    Extension {
        from_markdown: FromMarkdown {
            task_list_items: true,
            strikethrough: true,
        },
        to_markdown: ToMarkdown {
            task_list_items: true,
            strikethrough: true,
        },
    }
}

/// The extension for trees produced from Notion blocks.
///
/// Notion's to-do blocks map onto GFM task list items, so this is the GFM
/// pair merged into an empty extension with nothing added on top.
pub fn notion_extension() -> Extension {
    Extension::default().merge(gfm_extension())
}
