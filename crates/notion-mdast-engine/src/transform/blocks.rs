use crate::mdast::{BlockContent, Root};
use crate::notion::{Block, BlockKind, ListItemRef, ListKind, concat_plain_text};

use super::inline::map_rich_text;
use super::lists::group_list;

/// Transforms a sequence of sibling blocks into an mdast root.
///
/// Maximal runs of same-kind list blocks become one list each. Block kinds
/// without an mdast counterpart are skipped. Output order follows input order.
pub fn transform(blocks: &[Block]) -> Root {
    Root::new(transform_siblings(blocks))
}

fn transform_siblings(blocks: &[Block]) -> Vec<BlockContent> {
    let mut out = Vec::new();
    let mut rest = blocks;

    while let Some((block, tail)) = rest.split_first() {
        if let Some(kind) = block.list_kind() {
            let (run, remainder) = take_run(rest, kind);
            let items: Vec<ListItemRef<'_>> = run.iter().filter_map(Block::as_list_item).collect();
            out.extend(group_list(&items, kind.is_ordered(), kind.is_task_list()));
            rest = remainder;
            continue;
        }

        match render_block(block) {
            Some(node) => out.push(node),
            None => log::trace!("skipping {} block {}", block.type_name(), block.id),
        }
        rest = tail;
    }

    out
}

/// Splits off the maximal prefix of `blocks` whose list kind is exactly `kind`.
fn take_run(blocks: &[Block], kind: ListKind) -> (&[Block], &[Block]) {
    let len = blocks
        .iter()
        .take_while(|b| b.list_kind() == Some(kind))
        .count();
    blocks.split_at(len)
}

/// Renders a single non-list block, or `None` when the kind is not rendered.
fn render_block(block: &Block) -> Option<BlockContent> {
    let node = match &block.kind {
        BlockKind::Paragraph { paragraph } => {
            BlockContent::paragraph(map_rich_text(&paragraph.rich_text))
        }
        BlockKind::Heading1 { heading_1: h } => BlockContent::heading(1, map_rich_text(&h.rich_text)),
        BlockKind::Heading2 { heading_2: h } => BlockContent::heading(2, map_rich_text(&h.rich_text)),
        BlockKind::Heading3 { heading_3: h } => BlockContent::heading(3, map_rich_text(&h.rich_text)),
        BlockKind::Quote { quote } => BlockContent::Blockquote {
            children: vec![BlockContent::paragraph(map_rich_text(&quote.rich_text))],
        },
        BlockKind::Code { code } => BlockContent::Code {
            lang: Some(code.language.clone()).filter(|l| !l.is_empty()),
            value: concat_plain_text(&code.rich_text),
        },
        BlockKind::Image { image } => BlockContent::Image {
            url: image.source.url().unwrap_or_default().to_string(),
            alt: concat_plain_text(&image.caption),
        },
        // Grouped by the caller.
        BlockKind::BulletedListItem { .. }
        | BlockKind::NumberedListItem { .. }
        | BlockKind::ToDo { .. } => return None,
        BlockKind::Toggle { .. }
        | BlockKind::Callout { .. }
        | BlockKind::Divider { .. }
        | BlockKind::Breadcrumb { .. }
        | BlockKind::TableOfContents { .. }
        | BlockKind::Bookmark { .. }
        | BlockKind::Embed { .. }
        | BlockKind::File { .. }
        | BlockKind::ChildPage { .. }
        | BlockKind::ChildDatabase { .. }
        | BlockKind::Table { .. }
        | BlockKind::TableRow { .. }
        | BlockKind::Equation { .. }
        | BlockKind::Unsupported { .. } => return None,
    };
    Some(node)
}
