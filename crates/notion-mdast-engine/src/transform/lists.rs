use crate::mdast::{BlockContent, ListItem};
use crate::notion::{Block, BlockKind, ListItemRef};

use super::inline::map_rich_text;

/// Builds one list node from a run of listable blocks.
///
/// Returns `None` only when `items` is empty. Each item's children start with
/// a paragraph of its own rich text; nested listable children follow as one
/// nested list, then nested paragraphs. `checked` is set on every item of a
/// task list and on no item of any other list.
pub fn group_list(items: &[ListItemRef<'_>], ordered: bool, task_list: bool) -> Option<BlockContent> {
    if items.is_empty() {
        return None;
    }

    let children = items
        .iter()
        .map(|item| build_item(item, task_list))
        .collect();

    Some(BlockContent::list(ordered, children))
}

fn build_item(item: &ListItemRef<'_>, task_list: bool) -> ListItem {
    let mut children = vec![BlockContent::paragraph(map_rich_text(item.rich_text))];

    if !item.children.is_empty() {
        append_nested(&mut children, item.children);
    }

    ListItem {
        checked: task_list.then(|| item.checked.unwrap_or(false)),
        children,
    }
}

/// Appends an item's nested content: all listable children as a single
/// nested list (kind taken from the first of them), then paragraph children.
fn append_nested(out: &mut Vec<BlockContent>, nested: &[Block]) {
    let listable: Vec<ListItemRef<'_>> = nested.iter().filter_map(Block::as_list_item).collect();

    if let Some(first) = listable.first() {
        let kind = first.kind;
        out.extend(group_list(&listable, kind.is_ordered(), kind.is_task_list()));
    }

    for child in nested.iter().filter(|b| b.list_kind().is_none()) {
        match &child.kind {
            BlockKind::Paragraph { paragraph } => {
                out.push(BlockContent::paragraph(map_rich_text(&paragraph.rich_text)));
            }
            _ => log::debug!(
                "dropping nested {} block {} inside list item",
                child.type_name(),
                child.id
            ),
        }
    }
}
