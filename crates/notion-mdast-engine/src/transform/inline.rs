use crate::mdast::PhrasingContent;
use crate::notion::RichText;

/// Maps rich text runs onto phrasing nodes, one node per run.
///
/// Only `text` runs are annotation-aware, and only the highest-priority
/// annotation is applied: code, then bold, italic, strikethrough. `underline`
/// is never rendered. Equation and mention runs, and text runs without any of
/// those annotations, become plain text with the run's `plain_text`.
pub fn map_rich_text(runs: &[RichText]) -> Vec<PhrasingContent> {
    runs.iter().map(map_run).collect()
}

fn map_run(run: &RichText) -> PhrasingContent {
    if let RichText::Text {
        text, annotations, ..
    } = run
    {
        let content = &text.content;
        // Code spans are raw: no other annotation is looked at.
        if annotations.code {
            return PhrasingContent::inline_code(content.as_str());
        }
        if annotations.bold {
            return PhrasingContent::Strong {
                children: vec![PhrasingContent::text(content.as_str())],
            };
        }
        if annotations.italic {
            return PhrasingContent::Emphasis {
                children: vec![PhrasingContent::text(content.as_str())],
            };
        }
        if annotations.strikethrough {
            return PhrasingContent::Delete {
                children: vec![PhrasingContent::text(content.as_str())],
            };
        }
    }
    PhrasingContent::text(run.plain_text())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notion::rich_text::{EquationContent, Mention, ObjectRef};
    use crate::notion::Annotations;
    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use uuid::Uuid;

    fn annotated(bold: bool, italic: bool, strikethrough: bool, code: bool) -> RichText {
        RichText::styled(
            "styled",
            Annotations {
                bold,
                italic,
                strikethrough,
                code,
                ..Annotations::default()
            },
        )
    }

    fn wrapped(kind: &str) -> PhrasingContent {
        let children = vec![PhrasingContent::text("styled")];
        match kind {
            "strong" => PhrasingContent::Strong { children },
            "emphasis" => PhrasingContent::Emphasis { children },
            "delete" => PhrasingContent::Delete { children },
            "inlineCode" => PhrasingContent::inline_code("styled"),
            _ => PhrasingContent::text("styled"),
        }
    }

    #[rstest]
    #[case::plain(false, false, false, false, "text")]
    #[case::bold(true, false, false, false, "strong")]
    #[case::italic(false, true, false, false, "emphasis")]
    #[case::strikethrough(false, false, true, false, "delete")]
    #[case::code(false, false, false, true, "inlineCode")]
    #[case::bold_and_italic(true, true, false, false, "strong")]
    #[case::italic_and_strikethrough(false, true, true, false, "emphasis")]
    #[case::code_overrides_all(true, true, true, true, "inlineCode")]
    fn annotation_priority(
        #[case] bold: bool,
        #[case] italic: bool,
        #[case] strikethrough: bool,
        #[case] code: bool,
        #[case] expected: &str,
    ) {
        let nodes = map_rich_text(&[annotated(bold, italic, strikethrough, code)]);
        assert_eq!(nodes, vec![wrapped(expected)]);
    }

    #[test]
    fn underline_is_dropped() {
        let run = RichText::styled(
            "under",
            Annotations {
                underline: true,
                ..Annotations::default()
            },
        );
        assert_eq!(map_rich_text(&[run]), vec![PhrasingContent::text("under")]);
    }

    #[test]
    fn styled_runs_use_raw_content_and_plain_runs_use_display_string() {
        let mut bold = RichText::styled(
            "raw",
            Annotations {
                bold: true,
                ..Annotations::default()
            },
        );
        let mut plain = RichText::plain("raw");
        for run in [&mut bold, &mut plain] {
            if let RichText::Text { plain_text, .. } = run {
                *plain_text = "display".to_string();
            }
        }

        assert_eq!(
            map_rich_text(&[bold, plain]),
            vec![
                PhrasingContent::Strong {
                    children: vec![PhrasingContent::text("raw")]
                },
                PhrasingContent::text("display"),
            ]
        );
    }

    #[test]
    fn equation_and_mention_render_as_plain_text() {
        let shouty = Annotations {
            bold: true,
            code: true,
            ..Annotations::default()
        };
        let runs = vec![
            RichText::Equation {
                equation: EquationContent {
                    expression: "x^2".to_string(),
                },
                annotations: shouty.clone(),
                plain_text: "x^2".to_string(),
                href: None,
            },
            RichText::Mention {
                mention: Mention::Page {
                    page: ObjectRef { id: Uuid::nil() },
                },
                annotations: shouty,
                plain_text: "Untitled".to_string(),
                href: None,
            },
        ];

        assert_eq!(
            map_rich_text(&runs),
            vec![PhrasingContent::text("x^2"), PhrasingContent::text("Untitled")]
        );
    }

    #[test]
    fn preserves_length_and_order() {
        let runs = vec![
            RichText::plain("a"),
            annotated(true, false, false, false),
            RichText::plain("c"),
        ];
        let nodes = map_rich_text(&runs);
        assert_eq!(nodes.len(), 3);
        assert_eq!(nodes[0], PhrasingContent::text("a"));
        assert_eq!(nodes[2], PhrasingContent::text("c"));
    }

    #[test]
    fn empty_runs_map_to_nothing() {
        assert!(map_rich_text(&[]).is_empty());
    }
}
