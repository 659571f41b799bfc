use notion_mdast_engine::{
    BlockContent, ListItem, PhrasingContent, Root, ValidationError, ValidationOptions,
    parse_notion, parse_notion_with,
};
use pretty_assertions::assert_eq;
use serde_json::{Value, json};

fn rich_text(content: &str, bold: bool, code: bool) -> Value {
    json!({
        "type": "text",
        "text": { "content": content, "link": null },
        "annotations": {
            "bold": bold, "italic": false, "strikethrough": false,
            "underline": false, "code": code, "color": "default"
        },
        "plain_text": content,
        "href": null
    })
}

fn block(kind: &str, payload: Value) -> Value {
    let has_children = payload.get("children").is_some();
    let mut value = json!({
        "object": "block",
        "id": "9bc30ad4-9373-46a5-84ab-0a7845ee52e6",
        "parent": { "type": "page_id", "page_id": "b55c9c91-384d-452b-81db-d1ef79372b75" },
        "created_time": "2023-01-01T00:00:00.000Z",
        "created_by": { "object": "user", "id": "1f0b3b5c-4b4e-4b7a-9a0c-6e2f5f8d9a11" },
        "last_edited_time": "2023-01-01T00:00:00.000Z",
        "last_edited_by": { "object": "user", "id": "1f0b3b5c-4b4e-4b7a-9a0c-6e2f5f8d9a11" },
        "has_children": has_children,
        "archived": false,
        "type": kind
    });
    value[kind] = payload;
    value
}

fn text_payload(text: &str, children: Option<Vec<Value>>) -> Value {
    let mut payload = json!({ "rich_text": [rich_text(text, false, false)], "color": "default" });
    if let Some(children) = children {
        payload["children"] = Value::Array(children);
    }
    payload
}

fn to_do(text: &str, checked: bool, children: Option<Vec<Value>>) -> Value {
    let mut payload = text_payload(text, children);
    payload["checked"] = json!(checked);
    block("to_do", payload)
}

fn response(results: Vec<Value>) -> Value {
    json!({
        "object": "list",
        "type": "block",
        "block": {},
        "next_cursor": null,
        "has_more": false,
        "results": results
    })
}

fn paragraph_of(text: &str) -> BlockContent {
    BlockContent::paragraph(vec![PhrasingContent::text(text)])
}

#[test]
fn empty_results_give_empty_root() {
    let root = parse_notion(&response(vec![])).unwrap();
    assert_eq!(root, Root::default());
    insta::assert_json_snapshot!(root, @r#"
    {
      "type": "root",
      "children": []
    }
    "#);
}

#[test]
fn single_task_serializes_as_gfm_list_item() {
    let root = parse_notion(&response(vec![to_do("Ship it", true, None)])).unwrap();

    insta::assert_json_snapshot!(root, @r#"
    {
      "type": "root",
      "children": [
        {
          "type": "list",
          "ordered": false,
          "children": [
            {
              "type": "listItem",
              "checked": true,
              "children": [
                {
                  "type": "paragraph",
                  "children": [
                    {
                      "type": "text",
                      "value": "Ship it"
                    }
                  ]
                }
              ]
            }
          ]
        }
      ]
    }
    "#);
}

#[test]
fn page_with_headings_lists_and_code() {
    let raw = response(vec![
        block(
            "heading_1",
            json!({
                "rich_text": [rich_text("Release notes", false, false)],
                "color": "default",
                "is_toggleable": false
            }),
        ),
        block(
            "paragraph",
            json!({
                "rich_text": [
                    rich_text("Run ", false, false),
                    rich_text("cargo test", false, true),
                    rich_text(" first.", true, false)
                ],
                "color": "default"
            }),
        ),
        block(
            "numbered_list_item",
            text_payload(
                "Build",
                Some(vec![
                    block("bulleted_list_item", text_payload("debug", None)),
                    block("bulleted_list_item", text_payload("release", None)),
                    block("paragraph", text_payload("Both profiles.", None)),
                ]),
            ),
        ),
        block("numbered_list_item", text_payload("Publish", None)),
        block("divider", json!({})),
        block(
            "code",
            json!({
                "rich_text": [rich_text("cargo publish", false, false)],
                "caption": [],
                "language": "shell"
            }),
        ),
    ]);

    let root = parse_notion(&raw).unwrap();

    let expected = Root::new(vec![
        BlockContent::heading(1, vec![PhrasingContent::text("Release notes")]),
        BlockContent::paragraph(vec![
            PhrasingContent::text("Run "),
            PhrasingContent::inline_code("cargo test"),
            PhrasingContent::Strong {
                children: vec![PhrasingContent::text(" first.")],
            },
        ]),
        BlockContent::list(
            true,
            vec![
                ListItem {
                    checked: None,
                    children: vec![
                        paragraph_of("Build"),
                        BlockContent::list(
                            false,
                            vec![
                                ListItem {
                                    checked: None,
                                    children: vec![paragraph_of("debug")],
                                },
                                ListItem {
                                    checked: None,
                                    children: vec![paragraph_of("release")],
                                },
                            ],
                        ),
                        paragraph_of("Both profiles."),
                    ],
                },
                ListItem {
                    checked: None,
                    children: vec![paragraph_of("Publish")],
                },
            ],
        ),
        BlockContent::Code {
            lang: Some("shell".to_string()),
            value: "cargo publish".to_string(),
        },
    ]);

    assert_eq!(root, expected);
}

#[test]
fn nested_to_do_example() {
    let raw = response(vec![
        to_do("Parent", false, Some(vec![to_do("Child", true, None)])),
        to_do("Sibling", true, None),
    ]);

    let root = parse_notion(&raw).unwrap();
    assert_eq!(root.children.len(), 1);

    let BlockContent::List { ordered, children } = &root.children[0] else {
        panic!("expected a list");
    };
    assert!(!ordered);
    assert_eq!(children.len(), 2);
    assert_eq!(children[0].checked, Some(false));
    assert_eq!(children[0].children.len(), 2);
    assert_eq!(children[1].checked, Some(true));
    assert_eq!(children[1].children, vec![paragraph_of("Sibling")]);
}

#[test]
fn invalid_payload_is_reported() {
    let raw = response(vec![json!({ "type": "paragraph" })]);
    let err = parse_notion(&raw).unwrap_err();
    assert!(matches!(err, ValidationError::Schema(_)));
    assert!(err.to_string().starts_with("Invalid data: "));
}

#[test]
fn depth_guard_rejects_deep_nesting() {
    let raw = response(vec![to_do(
        "1",
        false,
        Some(vec![to_do("2", false, Some(vec![to_do("3", false, None)]))]),
    )]);

    let options = ValidationOptions { max_depth: Some(2) };
    assert!(matches!(
        parse_notion_with(&raw, &options),
        Err(ValidationError::TooDeep { limit: 2, .. })
    ));

    let options = ValidationOptions { max_depth: Some(3) };
    assert!(parse_notion_with(&raw, &options).is_ok());
}
