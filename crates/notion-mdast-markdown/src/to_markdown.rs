use notion_mdast_engine::mdast::{BlockContent, ListItem, PhrasingContent, Root};

use crate::extension::ToMarkdown;

/// Serialize an mdast root to markdown text.
///
/// The output ends with a single newline unless the document is empty.
pub fn stringify(root: &Root, extension: &ToMarkdown) -> String {
    let mut out = write_flow(&root.children, extension);
    if !out.is_empty() {
        out.push('\n');
    }
    out
}

/// Marker choice for a list; flipped between adjacent sibling lists so the
/// parser does not merge them back into one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct ListStyle {
    ordered: bool,
    alternate: bool,
}

impl ListStyle {
    fn marker(self, index: usize) -> String {
        match (self.ordered, self.alternate) {
            (false, false) => "-".to_string(),
            (false, true) => "*".to_string(),
            (true, false) => format!("{}.", index + 1),
            (true, true) => format!("{})", index + 1),
        }
    }
}

fn write_flow(blocks: &[BlockContent], ext: &ToMarkdown) -> String {
    let mut parts = Vec::with_capacity(blocks.len());
    let mut previous: Option<ListStyle> = None;

    // Markdown has no syntax for a paragraph without text.
    for block in blocks.iter().filter(|b| !is_empty_paragraph(b)) {
        let style = match block {
            BlockContent::List { ordered, .. } => {
                let alternate = matches!(previous, Some(p) if p.ordered == *ordered && !p.alternate);
                Some(ListStyle {
                    ordered: *ordered,
                    alternate,
                })
            }
            _ => None,
        };
        parts.push(write_block(block, style, ext));
        previous = style;
    }

    parts.join("\n\n")
}

fn write_block(block: &BlockContent, style: Option<ListStyle>, ext: &ToMarkdown) -> String {
    match block {
        BlockContent::Paragraph { children } => escape_lines(&write_phrasing(children, ext)),
        BlockContent::Heading { depth, children } => {
            let text = escape_lines(&write_phrasing(children, ext).replace('\n', " "));
            format!("{} {}", "#".repeat(usize::from((*depth).clamp(1, 6))), text)
        }
        BlockContent::List { ordered, children } => {
            let style = style.unwrap_or(ListStyle {
                ordered: *ordered,
                alternate: false,
            });
            write_list(children, style, ext)
        }
        BlockContent::Blockquote { children } => {
            prefix_lines(&write_flow(children, ext), "> ", "> ")
        }
        BlockContent::Code { lang, value } => {
            let info = lang.as_deref().unwrap_or("").replace('\n', " ");
            // Backtick fences cannot carry an info string containing backticks.
            let marker = if info.contains('`') { '~' } else { '`' };
            let fence = marker.to_string().repeat(longest_run(value, marker).max(2) + 1);
            format!("{fence}{info}\n{value}\n{fence}")
        }
        BlockContent::Image { url, alt } => format!("![{}]({})", escape_text(alt), write_url(url)),
    }
}

fn write_list(items: &[ListItem], style: ListStyle, ext: &ToMarkdown) -> String {
    items
        .iter()
        .enumerate()
        .map(|(index, item)| write_item(item, &style.marker(index), ext))
        .collect::<Vec<_>>()
        .join("\n")
}

fn write_item(item: &ListItem, marker: &str, ext: &ToMarkdown) -> String {
    let mut body = String::new();
    for (i, child) in item.children.iter().enumerate() {
        if i > 0 {
            if is_empty_paragraph(child) {
                continue;
            }
            // A nested list directly under the item text keeps the list tight.
            // After an empty first line a blank line would end the item.
            body.push_str(if matches!(child, BlockContent::List { .. }) || body.is_empty() {
                "\n"
            } else {
                "\n\n"
            });
        }
        body.push_str(&write_block(child, None, ext));
    }

    let checkbox = match item.checked {
        Some(true) if ext.task_list_items => "[x] ",
        Some(false) if ext.task_list_items => "[ ] ",
        _ => "",
    };
    let first = format!("{marker} {checkbox}");
    let rest = " ".repeat(marker.len() + 1);
    prefix_lines(&body, &first, &rest).trim_end().to_string()
}

fn write_phrasing(nodes: &[PhrasingContent], ext: &ToMarkdown) -> String {
    nodes.iter().map(|node| write_inline(node, ext)).collect()
}

fn write_inline(node: &PhrasingContent, ext: &ToMarkdown) -> String {
    match node {
        PhrasingContent::Text { value } => escape_text(value),
        PhrasingContent::Strong { children } => wrap("**", &write_phrasing(children, ext)),
        PhrasingContent::Emphasis { children } => wrap("*", &write_phrasing(children, ext)),
        PhrasingContent::Delete { children } if ext.strikethrough => {
            wrap("~~", &write_phrasing(children, ext))
        }
        PhrasingContent::Delete { children } => write_phrasing(children, ext),
        PhrasingContent::InlineCode { value } => {
            let fence = "`".repeat(longest_run(value, '`') + 1);
            let pad = if value.starts_with('`') || value.ends_with('`') {
                " "
            } else {
                ""
            };
            format!("{fence}{pad}{value}{pad}{fence}")
        }
    }
}

/// Wraps `inner` in `delim`, moving surrounding whitespace outside the
/// delimiters so they stay left/right flanking.
fn wrap(delim: &str, inner: &str) -> String {
    let trimmed = inner.trim();
    if trimmed.is_empty() {
        return inner.to_string();
    }
    let lead = &inner[..inner.len() - inner.trim_start().len()];
    let trail = &inner[inner.trim_end().len()..];
    format!("{lead}{delim}{trimmed}{delim}{trail}")
}

fn escape_text(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        if matches!(c, '\\' | '`' | '*' | '_' | '[' | ']' | '<' | '>' | '#' | '~' | '&') {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

/// Escapes each line of already-escaped inline text so it stays paragraph
/// content: block openers at the start are backslashed, and edge whitespace,
/// which the parser strips, is written as character references.
fn escape_lines(text: &str) -> String {
    text.split('\n').map(escape_line).collect::<Vec<_>>().join("\n")
}

fn escape_line(line: &str) -> String {
    let content = line.trim_start_matches([' ', '\t']);
    let body = content.trim_end_matches([' ', '\t']);
    let indent = &line[..line.len() - content.len()];
    let trail = &content[body.len()..];

    let mut out = encode_whitespace(indent);
    let digits = body.chars().take_while(char::is_ascii_digit).count();
    if body.starts_with(['-', '+', '=']) {
        out.push('\\');
        out.push_str(body);
    } else if digits > 0 && body[digits..].starts_with(['.', ')']) {
        out.push_str(&body[..digits]);
        out.push('\\');
        out.push_str(&body[digits..]);
    } else {
        out.push_str(body);
    }
    out.push_str(&encode_whitespace(trail));
    out
}

fn encode_whitespace(ws: &str) -> String {
    ws.chars()
        .map(|c| if c == '\t' { "&#x9;" } else { "&#x20;" })
        .collect()
}

fn is_empty_paragraph(block: &BlockContent) -> bool {
    matches!(block, BlockContent::Paragraph { children } if children.is_empty())
}

fn write_url(url: &str) -> String {
    if url.is_empty() || url.contains([' ', '(', ')']) {
        format!("<{url}>")
    } else {
        url.to_string()
    }
}

/// Prefixes the first line with `first` and every other non-empty line with `rest`.
fn prefix_lines(text: &str, first: &str, rest: &str) -> String {
    text.split('\n')
        .enumerate()
        .map(|(i, line)| {
            let prefix = if i == 0 { first } else { rest };
            if line.is_empty() {
                prefix.trim_end().to_string()
            } else {
                format!("{prefix}{line}")
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn longest_run(value: &str, needle: char) -> usize {
    let mut longest = 0;
    let mut current = 0;
    for c in value.chars() {
        if c == needle {
            current += 1;
            longest = longest.max(current);
        } else {
            current = 0;
        }
    }
    longest
}
