//! Public node types for parsed message templates.
//!
//! These types are public so that tooling (token extraction, linters,
//! translation editors) can walk a template without re-parsing it.

use std::fmt::{Display, Formatter, Result as FmtResult};

use serde::{Serialize, Serializer};

/// A parsed template: an ordered list of nodes.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Template {
    pub nodes: Vec<Node>,
}

impl Template {
    /// Returns true if the template contains no tokens, only literal text.
    pub fn is_plain_text(&self) -> bool {
        self.nodes.iter().all(|node| matches!(node, Node::Text { .. }))
    }
}

/// A single node in a template tree.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Node {
    /// Literal text, copied verbatim.
    Text { value: String },
    /// `{0}` or `{:name}`
    Param { index: Index },
    /// `{0,number}` or `{0,number,integer}`
    Number {
        index: Index,
        #[serde(skip_serializing_if = "Option::is_none")]
        format: Option<String>,
    },
    /// `{0,choice,singular#...|plural#...}`
    Choice { index: Index, styles: Vec<Style> },
    /// `{0,map,photo#...|video#...}`
    Map { index: Index, styles: Vec<Style> },
    /// `{0,anchor,text#...}` or `{0,link,text#...}`
    Anchor {
        index: Index,
        kind: AnchorKind,
        styles: Vec<Style>,
    },
}

impl Node {
    /// The parameter index this node reads, if any.
    pub fn index(&self) -> Option<&Index> {
        match self {
            Node::Text { .. } => None,
            Node::Param { index }
            | Node::Number { index, .. }
            | Node::Choice { index, .. }
            | Node::Map { index, .. }
            | Node::Anchor { index, .. } => Some(index),
        }
    }

    /// The style entries of a dispatch or anchor node; empty for other nodes.
    pub fn styles(&self) -> &[Style] {
        match self {
            Node::Choice { styles, .. } | Node::Map { styles, .. } | Node::Anchor { styles, .. } => {
                styles
            }
            Node::Text { .. } | Node::Param { .. } | Node::Number { .. } => &[],
        }
    }
}

/// A keyed branch of a choice, map, or anchor node.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Style {
    pub key: String,
    pub items: Vec<Node>,
}

/// Finds the first style with the given key, preserving declaration order.
pub fn find_style<'a>(styles: &'a [Style], key: &str) -> Option<&'a Style> {
    styles.iter().find(|style| style.key == key)
}

/// Which keyword introduced an anchor node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AnchorKind {
    Anchor,
    Link,
}

impl AnchorKind {
    pub fn keyword(self) -> &'static str {
        match self {
            AnchorKind::Anchor => "anchor",
            AnchorKind::Link => "link",
        }
    }
}

/// A reference to a runtime parameter.
///
/// Decimal indices address a positional parameter list; `:name` indices
/// address a named parameter map.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Index {
    Position(usize),
    Named(String),
}

impl Index {
    /// The token name as written in a template, e.g. `{0}` or `{:link}`.
    pub fn full_name(&self) -> String {
        format!("{{{self}}}")
    }
}

impl Display for Index {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            Index::Position(n) => write!(f, "{n}"),
            Index::Named(name) => write!(f, ":{name}"),
        }
    }
}

impl Serialize for Index {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}
