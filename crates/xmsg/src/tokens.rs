//! Token metadata extraction for translation tooling.
//!
//! [`derive_tokens`] describes which runtime values a template reads and
//! which dispatch keys a translation of it has to cover. It is a read-only
//! pass over the tree and is independent of substitution.

use serde::Serialize;

use crate::parser::ast::{Index, Node, Style, Template};

/// Style keys that mark a choice token as gender dispatch.
const GENDER_KEYS: &[&str] = &["male", "female", "neutral", "unknown"];

/// Style keys that mark a choice token as plural dispatch.
const NUMBER_KEYS: &[&str] = &["singular", "plural", "zero", "one", "two", "few", "many"];

/// A rule vocabulary referenced by a token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ContextKey {
    Number,
    Gender,
}

impl ContextKey {
    pub fn as_str(self) -> &'static str {
        match self {
            ContextKey::Number => "number",
            ContextKey::Gender => "gender",
        }
    }
}

/// Metadata for one distinct index in a template.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Token {
    /// The token as written, e.g. `{0}` or `{:link}`.
    pub full_name: String,
    pub index: Index,
    /// Rule vocabularies the first node for this index dispatches on.
    pub context_keys: Vec<ContextKey>,
    /// Style keys of the first node, when it is a choice token.
    pub rule_keys: Vec<String>,
    /// Style keys of the first node, when it is a map token.
    pub params: Vec<String>,
}

impl Token {
    fn from_node(index: &Index, node: &Node) -> Self {
        let mut token = Token {
            full_name: index.full_name(),
            index: index.clone(),
            context_keys: Vec::new(),
            rule_keys: Vec::new(),
            params: Vec::new(),
        };
        match node {
            Node::Choice { styles, .. } => {
                token.rule_keys = style_keys(styles);
                token.context_keys = choice_context_keys(&token.rule_keys);
            }
            Node::Map { styles, .. } => token.params = style_keys(styles),
            Node::Number { .. } => token.context_keys = vec![ContextKey::Number],
            Node::Text { .. } | Node::Param { .. } | Node::Anchor { .. } => {}
        }
        token
    }
}

/// Derive one [`Token`] per distinct index, in order of first occurrence.
///
/// The walk covers nested style items. A dispatch node is visited before its
/// children, and only the first node seen for an index contributes metadata.
/// The result therefore has one entry per distinct index, not per token
/// occurrence: `{0} {0,choice,...}` yields a single `{0}` token.
///
/// # Example
///
/// ```
/// use xmsg::{derive_tokens, parse};
///
/// let template = parse("{0} {0,choice,singular#member|plural#members}").unwrap();
/// let tokens = derive_tokens(&template);
/// assert_eq!(tokens.len(), 1);
/// assert_eq!(tokens[0].full_name, "{0}");
/// assert!(tokens[0].rule_keys.is_empty());
/// ```
pub fn derive_tokens(template: &Template) -> Vec<Token> {
    let mut tokens = Vec::new();
    collect(&template.nodes, &mut tokens);
    tokens
}

fn collect(nodes: &[Node], tokens: &mut Vec<Token>) {
    for node in nodes {
        if let Some(index) = node.index()
            && !tokens.iter().any(|token| &token.index == index)
        {
            tokens.push(Token::from_node(index, node));
        }
        for style in node.styles() {
            collect(&style.items, tokens);
        }
    }
}

fn style_keys(styles: &[Style]) -> Vec<String> {
    styles.iter().map(|style| style.key.clone()).collect()
}

fn choice_context_keys(rule_keys: &[String]) -> Vec<ContextKey> {
    let mentions = |vocabulary: &[&str]| rule_keys.iter().any(|key| vocabulary.contains(&key.as_str()));
    let gender = mentions(GENDER_KEYS);
    let mut keys = Vec::new();
    if mentions(NUMBER_KEYS) || !gender {
        keys.push(ContextKey::Number);
    }
    if gender {
        keys.push(ContextKey::Gender);
    }
    keys
}
