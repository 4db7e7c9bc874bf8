//! Tests for error types and error message formatting.

use xmsg::parser::compute_suggestions;
use xmsg::{FormatError, ParseError, SubstitutionError, parse};

#[test]
fn compute_suggestions_finds_close_keywords() {
    let keywords = ["number", "choice", "map", "anchor", "link"];

    assert_eq!(compute_suggestions("choise", &keywords), vec!["choice"]);
    assert_eq!(compute_suggestions("mop", &keywords), vec!["map"]);
    assert_eq!(compute_suggestions("lnk", &keywords), vec!["link"]);
    assert!(compute_suggestions("date", &keywords).is_empty());
}

#[test]
fn compute_suggestions_limits_to_three() {
    let keywords = ["item1", "item2", "item3", "item4", "item5"];
    assert_eq!(compute_suggestions("item", &keywords).len(), 3);
}

#[test]
fn parse_error_messages() {
    insta::assert_snapshot!(
        parse("{0,chioce,a#b}").unwrap_err().to_string(),
        @"unknown token type 'chioce' at 1:4, did you mean: choice?"
    );
    insta::assert_snapshot!(
        parse("{0,date}").unwrap_err().to_string(),
        @"unknown token type 'date' at 1:4"
    );
    insta::assert_snapshot!(
        parse("ab {0").unwrap_err().to_string(),
        @"unterminated token starting at 1:4"
    );
    insta::assert_snapshot!(
        parse("x }").unwrap_err().to_string(),
        @"unbalanced '}' at 1:3"
    );
    insta::assert_snapshot!(
        parse("{0,map,a}").unwrap_err().to_string(),
        @"malformed style at 1:9: expected '#' after style key 'a'"
    );
}

#[test]
fn nesting_error_message() {
    let err = ParseError::NestingTooDeep {
        line: 2,
        column: 5,
        limit: 128,
    };
    assert_eq!(err.position(), (2, 5));
    insta::assert_snapshot!(err.to_string(), @"tokens nested more than 128 levels deep at 2:5");
}

#[test]
fn parse_error_position() {
    let err = ParseError::MissingIndex { line: 3, column: 7 };
    assert_eq!(err.position(), (3, 7));
    assert_eq!(err.to_string(), "missing token index at 3:7");
}

#[test]
fn substitution_error_messages() {
    let err = SubstitutionError::MissingValue {
        token: "{1}".into(),
    };
    assert_eq!(err.to_string(), "no value supplied for token '{1}'");

    let err = SubstitutionError::WrongSourceKind {
        token: "{:link}".into(),
    };
    assert!(err.to_string().contains("{:link}"));
    assert!(err.to_string().contains("positional"));
}

#[test]
fn format_error_is_transparent() {
    let err = FormatError::from(ParseError::UnbalancedDelimiter { line: 1, column: 2 });
    assert_eq!(err.to_string(), "unbalanced '}' at 1:2");

    let err = FormatError::from(SubstitutionError::NoBranch {
        token: "{0}".into(),
        rule_key: "few".into(),
    });
    assert_eq!(
        err.to_string(),
        "choice token '{0}' has no branch for rule key 'few'"
    );
}
