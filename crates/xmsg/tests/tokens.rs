//! Tests for token metadata extraction.

use serde_json::json;
use xmsg::{ContextKey, Index, derive_tokens, parse};

fn names(source: &str) -> Vec<String> {
    derive_tokens(&parse(source).unwrap())
        .into_iter()
        .map(|token| token.full_name)
        .collect()
}

#[test]
fn plain_text_has_no_tokens() {
    assert!(derive_tokens(&parse("Hello World").unwrap()).is_empty());
}

#[test]
fn single_param() {
    let tokens = derive_tokens(&parse("{0} members").unwrap());
    assert_eq!(tokens.len(), 1);
    assert_eq!(tokens[0].full_name, "{0}");
    assert_eq!(tokens[0].index, Index::Position(0));
    assert!(tokens[0].context_keys.is_empty());
    assert!(tokens[0].rule_keys.is_empty());
    assert!(tokens[0].params.is_empty());
}

#[test]
fn named_tokens_keep_their_colon() {
    assert_eq!(
        names("{:numViews,number,integer} {:numViews,choice,singular#view|plural#views} {:link,link,text#x}"),
        vec!["{:numViews}", "{:link}"]
    );
}

#[test]
fn four_distinct_indices_in_first_occurrence_order() {
    let template =
        parse("{0} {1,number} {2,map,a#{3,choice,singular#x|plural#y}|b#{1,choice,one#z}}").unwrap();
    let tokens = derive_tokens(&template);

    assert_eq!(tokens.len(), 4);
    let names: Vec<&str> = tokens.iter().map(|t| t.full_name.as_str()).collect();
    assert_eq!(names, vec!["{0}", "{1}", "{2}", "{3}"]);

    // {1} is first seen as a number token, so the later choice adds nothing.
    assert_eq!(tokens[1].context_keys, vec![ContextKey::Number]);
    assert!(tokens[1].rule_keys.is_empty());

    assert_eq!(tokens[2].params, vec!["a", "b"]);
    assert_eq!(tokens[3].rule_keys, vec!["singular", "plural"]);
    assert_eq!(tokens[3].context_keys, vec![ContextKey::Number]);
}

#[test]
fn dispatch_node_is_recorded_before_its_children() {
    let template = parse(
        "You have {0,choice,singular#{2,anchor,text#{0,number} new {1,map,conn#connection|inv#invite}}\
         |plural#{2,anchor,text#{0,number} new {1,map,conn#connections|inv#invites}}}.",
    )
    .unwrap();
    let tokens = derive_tokens(&template);

    let names: Vec<&str> = tokens.iter().map(|t| t.full_name.as_str()).collect();
    assert_eq!(names, vec!["{0}", "{2}", "{1}"]);

    let first = &tokens[0];
    assert_eq!(first.context_keys, vec![ContextKey::Number]);
    assert_eq!(first.rule_keys, vec!["singular", "plural"]);

    let last = &tokens[2];
    assert_eq!(last.params, vec!["conn", "inv"]);
    assert!(last.rule_keys.is_empty());
}

#[test]
fn gender_choice_context_keys() {
    let tokens = derive_tokens(&parse("{0,choice,male#He|female#She|other#They}").unwrap());
    assert_eq!(tokens[0].context_keys, vec![ContextKey::Gender]);

    let tokens = derive_tokens(&parse("{0,choice,male#he|plural#they}").unwrap());
    assert_eq!(
        tokens[0].context_keys,
        vec![ContextKey::Number, ContextKey::Gender]
    );

    let tokens = derive_tokens(&parse("{0,choice,other#x}").unwrap());
    assert_eq!(tokens[0].context_keys, vec![ContextKey::Number]);
}

#[test]
fn token_serializes_for_tooling() {
    let tokens = derive_tokens(&parse("{0,choice,singular#a|plural#b}").unwrap());
    assert_eq!(
        serde_json::to_value(&tokens).unwrap(),
        json!([{
            "full_name": "{0}",
            "index": "0",
            "context_keys": ["number"],
            "rule_keys": ["singular", "plural"],
            "params": []
        }])
    );
}
