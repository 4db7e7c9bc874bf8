//! Integration tests for template parsing.

use serde_json::json;
use xmsg::parser::{
    AnchorKind, Index, MAX_NESTING_DEPTH, Node, ParseError, Style, parse_template,
};

fn text(value: &str) -> Node {
    Node::Text {
        value: value.into(),
    }
}

fn style(key: &str, items: Vec<Node>) -> Style {
    Style {
        key: key.into(),
        items,
    }
}

// =============================================================================
// Literal text
// =============================================================================

#[test]
fn test_pure_literal() {
    let t = parse_template("Hello World").unwrap();
    assert_eq!(t.nodes, vec![text("Hello World")]);
    assert!(t.is_plain_text());
}

#[test]
fn test_empty_string() {
    let t = parse_template("").unwrap();
    assert_eq!(t.nodes, vec![]);
}

#[test]
fn test_pipe_and_hash_are_literal_at_top_level() {
    let t = parse_template("a|b #c").unwrap();
    assert_eq!(t.nodes, vec![text("a|b #c")]);
}

#[test]
fn test_multiline_literal() {
    let t = parse_template("Line 1\nLine 2").unwrap();
    assert_eq!(t.nodes, vec![text("Line 1\nLine 2")]);
}

// =============================================================================
// Plain and number tokens
// =============================================================================

#[test]
fn test_positional_param() {
    let t = parse_template("{0} members").unwrap();
    assert_eq!(
        t.nodes,
        vec![
            Node::Param {
                index: Index::Position(0)
            },
            text(" members"),
        ]
    );
    assert!(!t.is_plain_text());
}

#[test]
fn test_named_param() {
    let t = parse_template("Hi {:user_name1}!").unwrap();
    assert_eq!(
        t.nodes,
        vec![
            text("Hi "),
            Node::Param {
                index: Index::Named("user_name1".into())
            },
            text("!"),
        ]
    );
}

#[test]
fn test_multi_digit_index() {
    let t = parse_template("{12}").unwrap();
    assert_eq!(
        t.nodes,
        vec![Node::Param {
            index: Index::Position(12)
        }]
    );
}

#[test]
fn test_number_with_and_without_format() {
    let t = parse_template("{0,number} {:numViews,number,integer}").unwrap();
    assert_eq!(
        t.nodes,
        vec![
            Node::Number {
                index: Index::Position(0),
                format: None,
            },
            text(" "),
            Node::Number {
                index: Index::Named("numViews".into()),
                format: Some("integer".into()),
            },
        ]
    );
}

#[test]
fn test_whitespace_around_index_type_and_keys() {
    let t = parse_template("{ 0 , choice , singular#a | plural#b }").unwrap();
    assert_eq!(
        t.nodes,
        vec![Node::Choice {
            index: Index::Position(0),
            styles: vec![
                style("singular", vec![text("a ")]),
                style("plural", vec![text("b ")]),
            ],
        }]
    );
}

// =============================================================================
// Dispatch tokens
// =============================================================================

#[test]
fn test_choice_tree() {
    let t = parse_template("{0} {0,choice,singular#member|plural#members}").unwrap();
    assert_eq!(
        t.nodes,
        vec![
            Node::Param {
                index: Index::Position(0)
            },
            text(" "),
            Node::Choice {
                index: Index::Position(0),
                styles: vec![
                    style("singular", vec![text("member")]),
                    style("plural", vec![text("members")]),
                ],
            },
        ]
    );
}

#[test]
fn test_map_with_hash_in_items() {
    let t = parse_template("{0,map,a#x#y|b#}").unwrap();
    assert_eq!(
        t.nodes,
        vec![Node::Map {
            index: Index::Position(0),
            styles: vec![style("a", vec![text("x#y")]), style("b", vec![])],
        }]
    );
}

#[test]
fn test_style_keys_accept_any_text_before_hash() {
    let t = parse_template("{0,map,фото#photo|New York#NY| c++ #cpp|a@b.com#mail}").unwrap();
    let keys: Vec<&str> = t.nodes[0].styles().iter().map(|s| s.key.as_str()).collect();
    assert_eq!(keys, vec!["фото", "New York", "c++", "a@b.com"]);
}

#[test]
fn test_style_key_cannot_contain_delimiters() {
    let err = parse_template("{0,map,a{b#x}").unwrap_err();
    assert_eq!(
        err,
        ParseError::MalformedStyle {
            line: 1,
            column: 9,
            message: "expected '#' after style key 'a'".into(),
        }
    );
}

#[test]
fn test_anchor_and_link_keep_their_keyword() {
    let t = parse_template("{0,anchor,text#a}{:link,link,text#b}").unwrap();
    match (&t.nodes[0], &t.nodes[1]) {
        (Node::Anchor { kind: first, .. }, Node::Anchor { kind: second, index, .. }) => {
            assert_eq!(*first, AnchorKind::Anchor);
            assert_eq!(*second, AnchorKind::Link);
            assert_eq!(first.keyword(), "anchor");
            assert_eq!(second.keyword(), "link");
            assert_eq!(*index, Index::Named("link".into()));
        }
        other => panic!("expected two anchors, got {other:?}"),
    }
}

#[test]
fn test_anchor_without_styles() {
    let t = parse_template("{0,anchor}").unwrap();
    assert_eq!(
        t.nodes,
        vec![Node::Anchor {
            index: Index::Position(0),
            kind: AnchorKind::Anchor,
            styles: vec![],
        }]
    );
}

#[test]
fn test_nested_anchor_tree() {
    let t = parse_template(
        "You have {0,choice,singular#{2,anchor,text#{0,number} new {1,map,conn#connection|inv#invite}}\
         |plural#{2,anchor,text#{0,number} new {1,map,conn#connections|inv#invites}}}.",
    )
    .unwrap();

    let anchor = |one: &str, two: &str| Node::Anchor {
        index: Index::Position(2),
        kind: AnchorKind::Anchor,
        styles: vec![style(
            "text",
            vec![
                Node::Number {
                    index: Index::Position(0),
                    format: None,
                },
                text(" new "),
                Node::Map {
                    index: Index::Position(1),
                    styles: vec![
                        style("conn", vec![text(one)]),
                        style("inv", vec![text(two)]),
                    ],
                },
            ],
        )],
    };

    assert_eq!(
        t.nodes,
        vec![
            text("You have "),
            Node::Choice {
                index: Index::Position(0),
                styles: vec![
                    style("singular", vec![anchor("connection", "invite")]),
                    style("plural", vec![anchor("connections", "invites")]),
                ],
            },
            text("."),
        ]
    );
}

#[test]
fn test_deep_nesting() {
    let t = parse_template("{0,choice,a#{1,choice,b#{2,map,c#{3,map,d#deep}}}}").unwrap();
    let mut depth = 0;
    let mut nodes = &t.nodes;
    while let Some(node) = nodes.first() {
        match node.styles().first() {
            Some(style) => {
                depth += 1;
                nodes = &style.items;
            }
            None => {
                assert_eq!(*node, text("deep"));
                break;
            }
        }
    }
    assert_eq!(depth, 4);
}

#[test]
fn test_parse_is_deterministic() {
    let source = "{0} tagged himself/herself in {1,number} \
                  {2,map,photo#{1,choice,singular#photo|plural#photos}|video#{1,choice,singular#video|plural#videos}}.";
    assert_eq!(parse_template(source).unwrap(), parse_template(source).unwrap());
}

#[test]
fn test_tree_serializes_as_tagged_nodes() {
    let t = parse_template("{:numViews,number,integer} {0,choice,singular#view}").unwrap();
    let value = serde_json::to_value(&t).unwrap();
    assert_eq!(
        value,
        json!([
            {"type": "number", "index": ":numViews", "format": "integer"},
            {"type": "text", "value": " "},
            {"type": "choice", "index": "0", "styles": [
                {"key": "singular", "items": [{"type": "text", "value": "view"}]}
            ]}
        ])
    );
}

// =============================================================================
// Errors
// =============================================================================

#[test]
fn test_unterminated_token() {
    let err = parse_template("{0").unwrap_err();
    assert_eq!(err, ParseError::UnterminatedToken { line: 1, column: 1 });
}

#[test]
fn test_unterminated_style_list_reports_token_start() {
    let err = parse_template("Hello {0,choice,singular#a").unwrap_err();
    assert_eq!(err, ParseError::UnterminatedToken { line: 1, column: 7 });
}

#[test]
fn test_unterminated_nested_token() {
    let err = parse_template("{0,map,a#{1}").unwrap_err();
    assert_eq!(err, ParseError::UnterminatedToken { line: 1, column: 1 });
}

#[test]
fn test_error_position_on_second_line() {
    let err = parse_template("line one\n{0,map,a#b").unwrap_err();
    assert_eq!(err.position(), (2, 1));
}

#[test]
fn test_missing_index() {
    assert_eq!(
        parse_template("{name}").unwrap_err(),
        ParseError::MissingIndex { line: 1, column: 2 }
    );
    assert_eq!(
        parse_template("{}").unwrap_err(),
        ParseError::MissingIndex { line: 1, column: 2 }
    );
    assert_eq!(
        parse_template("{:}").unwrap_err(),
        ParseError::MissingIndex { line: 1, column: 2 }
    );
}

#[test]
fn test_unknown_token_type_with_suggestion() {
    let err = parse_template("{0,chioce,a#b}").unwrap_err();
    assert_eq!(
        err,
        ParseError::UnknownTokenType {
            line: 1,
            column: 4,
            name: "chioce".into(),
            suggestions: vec!["choice".into()],
        }
    );
}

#[test]
fn test_unknown_token_type_without_suggestion() {
    let err = parse_template("{0,date}").unwrap_err();
    match err {
        ParseError::UnknownTokenType {
            name, suggestions, ..
        } => {
            assert_eq!(name, "date");
            assert!(suggestions.is_empty());
        }
        other => panic!("expected unknown token type, got {other:?}"),
    }
}

#[test]
fn test_choice_requires_styles() {
    let err = parse_template("{0,choice}").unwrap_err();
    assert!(matches!(
        err,
        ParseError::MalformedStyle {
            line: 1,
            column: 4,
            ..
        }
    ));
}

#[test]
fn test_style_without_hash() {
    let err = parse_template("{0,choice,singular}").unwrap_err();
    assert_eq!(
        err,
        ParseError::MalformedStyle {
            line: 1,
            column: 19,
            message: "expected '#' after style key 'singular'".into(),
        }
    );
}

#[test]
fn test_empty_style_key() {
    let err = parse_template("{0,map,#a}").unwrap_err();
    assert_eq!(
        err,
        ParseError::MalformedStyle {
            line: 1,
            column: 8,
            message: "empty style key".into(),
        }
    );
}

#[test]
fn test_number_format_errors() {
    assert!(matches!(
        parse_template("{0,number,}").unwrap_err(),
        ParseError::MalformedStyle { .. }
    ));
    assert!(matches!(
        parse_template("{0,number,integer x}").unwrap_err(),
        ParseError::MalformedStyle { .. }
    ));
}

#[test]
fn test_unbalanced_closing_brace() {
    assert_eq!(
        parse_template("a } b").unwrap_err(),
        ParseError::UnbalancedDelimiter { line: 1, column: 3 }
    );
}

#[test]
fn test_unexpected_character_after_index() {
    assert_eq!(
        parse_template("{0 x}").unwrap_err(),
        ParseError::UnexpectedCharacter {
            line: 1,
            column: 4,
            found: 'x',
        }
    );
}

#[test]
fn test_literal_open_brace_is_not_escaped() {
    assert!(parse_template("a { b").is_err());
    assert!(parse_template("{{0}}").is_err());
}

fn nested_maps(levels: usize) -> String {
    format!("{}x{}", "{0,map,a#".repeat(levels), "}".repeat(levels))
}

#[test]
fn test_nesting_up_to_the_limit_parses() {
    let t = parse_template(&nested_maps(MAX_NESTING_DEPTH)).unwrap();
    assert_eq!(t.nodes.len(), 1);
}

#[test]
fn test_nesting_beyond_the_limit_is_an_error() {
    let err = parse_template(&nested_maps(MAX_NESTING_DEPTH + 1)).unwrap_err();
    assert_eq!(
        err,
        ParseError::NestingTooDeep {
            line: 1,
            column: MAX_NESTING_DEPTH * "{0,map,a#".len() + 1,
            limit: MAX_NESTING_DEPTH,
        }
    );
}

#[test]
fn test_very_deep_nesting_fails_without_overflowing() {
    let err = parse_template(&nested_maps(20_000)).unwrap_err();
    assert!(matches!(err, ParseError::NestingTooDeep { .. }));
}
