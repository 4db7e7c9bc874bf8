//! Template string parser using winnow.
//!
//! Parses message templates into a node tree. Handles:
//! - Literal text runs
//! - Plain parameter tokens: `{0}`, `{:name}`
//! - Number tokens: `{0,number}`, `{0,number,integer}`
//! - Dispatch tokens with nested style lists: `{0,choice,singular#a|plural#b}`,
//!   `{0,map,photo#a|video#b}`
//! - Anchor tokens: `{0,anchor,text#...}`, `{:link,link,text#...}`
//!
//! Style items are themselves templates parsed recursively. Nesting is
//! capped at [`MAX_NESTING_DEPTH`] token levels so that hostile input fails
//! with a `ParseError` instead of exhausting the stack.
//! There is no escape syntax: `{` and `}` are always delimiters.

use std::cell::Cell;

use tracing::trace;
use winnow::prelude::*;
use winnow::token::{take_till, take_while};

use super::ast::{AnchorKind, Index, Node, Style, Template};
use super::error::{ParseError, compute_suggestions};

/// Deepest level of tokens nested inside style items.
pub const MAX_NESTING_DEPTH: usize = 128;

/// Token type keywords accepted after the index.
const TOKEN_TYPES: &[&str] = &["number", "choice", "map", "anchor", "link"];

/// Parse a template string into a node tree.
pub fn parse_template(input: &str) -> Result<Template, ParseError> {
    let parser = TemplateParser {
        source: input,
        depth: Cell::new(0),
    };
    let mut remaining = input;
    let nodes = parser.nodes(&mut remaining, Level::TopLevel)?;
    trace!(template = input, nodes = nodes.len(), "parsed template");
    Ok(Template { nodes })
}

/// Calculate line and column from original input and remaining input.
fn calculate_position(original: &str, remaining: &str) -> (usize, usize) {
    let consumed = original.len() - remaining.len();
    let consumed_str = &original[..consumed];
    let line = consumed_str.chars().filter(|&c| c == '\n').count() + 1;
    let column = match consumed_str.rfind('\n') {
        Some(pos) => consumed_str[pos + 1..].chars().count() + 1,
        None => consumed_str.chars().count() + 1,
    };
    (line, column)
}

/// Where a node list is being parsed. Nested lists (style items) also end at
/// `|`, which separates style entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Level {
    TopLevel,
    Nested,
}

impl Level {
    fn ends_text(self, c: char) -> bool {
        match self {
            Level::TopLevel => matches!(c, '{' | '}'),
            Level::Nested => matches!(c, '{' | '}' | '|'),
        }
    }
}

/// The type keyword of a token, resolved from its source text.
#[derive(Debug, Clone, Copy)]
enum TokenType {
    Number,
    Choice,
    Map,
    Anchor(AnchorKind),
}

impl TokenType {
    fn from_keyword(keyword: &str) -> Option<Self> {
        match keyword {
            "number" => Some(TokenType::Number),
            "choice" => Some(TokenType::Choice),
            "map" => Some(TokenType::Map),
            "anchor" => Some(TokenType::Anchor(AnchorKind::Anchor)),
            "link" => Some(TokenType::Anchor(AnchorKind::Link)),
            _ => None,
        }
    }
}

struct TemplateParser<'s> {
    /// The complete template, used to report error positions.
    source: &'s str,
    /// Number of style item lists currently open.
    depth: Cell<usize>,
}

impl<'s> TemplateParser<'s> {
    fn position(&self, remaining: &str) -> (usize, usize) {
        calculate_position(self.source, remaining)
    }

    fn unterminated(&self, token_start: &str) -> ParseError {
        let (line, column) = self.position(token_start);
        ParseError::UnterminatedToken { line, column }
    }

    fn malformed_style(&self, at: &str, message: impl Into<String>) -> ParseError {
        let (line, column) = self.position(at);
        ParseError::MalformedStyle {
            line,
            column,
            message: message.into(),
        }
    }

    /// Parse a node list until end of input, or for nested lists until the
    /// `|` or `}` that ends the enclosing style entry.
    fn nodes(&self, input: &mut &'s str, level: Level) -> Result<Vec<Node>, ParseError> {
        let mut nodes = Vec::new();
        loop {
            let text = text_run(input, level).unwrap_or_default();
            if !text.is_empty() {
                nodes.push(Node::Text {
                    value: text.to_string(),
                });
            }

            match input.chars().next() {
                None => return Ok(nodes),
                Some('{') => nodes.push(self.token(input)?),
                Some('}') if level == Level::TopLevel => {
                    let (line, column) = self.position(input);
                    return Err(ParseError::UnbalancedDelimiter { line, column });
                }
                Some(_) => return Ok(nodes),
            }
        }
    }

    /// Parse one `{...}` token. The input starts at the opening brace.
    fn token(&self, input: &mut &'s str) -> Result<Node, ParseError> {
        let start = *input;
        *input = &input[1..];
        ws(input);

        let index = self.index(input, start)?;
        ws(input);

        match input.chars().next() {
            None => Err(self.unterminated(start)),
            Some('}') => {
                *input = &input[1..];
                Ok(Node::Param { index })
            }
            Some(',') => {
                *input = &input[1..];
                self.typed_token(input, start, index)
            }
            Some(found) => {
                let (line, column) = self.position(input);
                Err(ParseError::UnexpectedCharacter {
                    line,
                    column,
                    found,
                })
            }
        }
    }

    /// Parse an index: a run of digits or `:` followed by an identifier.
    fn index(&self, input: &mut &'s str, token_start: &'s str) -> Result<Index, ParseError> {
        let at = *input;
        if let Ok(digits) = position_digits(input) {
            return digits
                .parse::<usize>()
                .map(Index::Position)
                .map_err(|_| self.missing_index(at));
        }
        if let Ok(name) = named_index(input) {
            return Ok(Index::Named(name.to_string()));
        }
        *input = at;
        if input.is_empty() {
            Err(self.unterminated(token_start))
        } else {
            Err(self.missing_index(at))
        }
    }

    fn missing_index(&self, at: &str) -> ParseError {
        let (line, column) = self.position(at);
        ParseError::MissingIndex { line, column }
    }

    /// Parse the remainder of a token after `index,`.
    fn typed_token(
        &self,
        input: &mut &'s str,
        token_start: &'s str,
        index: Index,
    ) -> Result<Node, ParseError> {
        ws(input);
        let keyword_at = *input;
        let keyword = type_keyword(input).unwrap_or_default().trim_end();
        if input.is_empty() {
            return Err(self.unterminated(token_start));
        }
        let Some(token_type) = TokenType::from_keyword(keyword) else {
            let (line, column) = self.position(keyword_at);
            return Err(ParseError::UnknownTokenType {
                line,
                column,
                name: keyword.to_string(),
                suggestions: compute_suggestions(keyword, TOKEN_TYPES),
            });
        };

        // `type_keyword` stops at ',' or '}', and input is not empty.
        let has_tail = input.starts_with(',');
        *input = &input[1..];

        if !has_tail {
            return match token_type {
                TokenType::Number => Ok(Node::Number {
                    index,
                    format: None,
                }),
                TokenType::Anchor(kind) => Ok(Node::Anchor {
                    index,
                    kind,
                    styles: Vec::new(),
                }),
                TokenType::Choice | TokenType::Map => Err(self.malformed_style(
                    keyword_at,
                    format!("'{keyword}' requires at least one style"),
                )),
            };
        }

        match token_type {
            TokenType::Number => {
                let format = self.number_format(input, token_start)?;
                Ok(Node::Number {
                    index,
                    format: Some(format),
                })
            }
            TokenType::Choice => {
                let styles = self.styles(input, token_start)?;
                Ok(Node::Choice { index, styles })
            }
            TokenType::Map => {
                let styles = self.styles(input, token_start)?;
                Ok(Node::Map { index, styles })
            }
            TokenType::Anchor(kind) => {
                let styles = self.styles(input, token_start)?;
                Ok(Node::Anchor {
                    index,
                    kind,
                    styles,
                })
            }
        }
    }

    /// Parse `format}` after `index,number,`.
    fn number_format(&self, input: &mut &'s str, token_start: &'s str) -> Result<String, ParseError> {
        ws(input);
        let at = *input;
        let format = identifier(input).unwrap_or_default();
        ws(input);
        match input.chars().next() {
            None => Err(self.unterminated(token_start)),
            Some('}') if !format.is_empty() => {
                *input = &input[1..];
                Ok(format.to_string())
            }
            Some('}') => Err(self.malformed_style(at, "expected a number format name")),
            Some(found) => Err(self.malformed_style(
                input,
                format!("unexpected '{found}' after number format"),
            )),
        }
    }

    /// Parse the items of one style entry, one nesting level down.
    fn nested_nodes(
        &self,
        input: &mut &'s str,
        token_start: &'s str,
    ) -> Result<Vec<Node>, ParseError> {
        let depth = self.depth.get() + 1;
        if depth > MAX_NESTING_DEPTH {
            let (line, column) = self.position(token_start);
            return Err(ParseError::NestingTooDeep {
                line,
                column,
                limit: MAX_NESTING_DEPTH,
            });
        }
        self.depth.set(depth);
        let items = self.nodes(input, Level::Nested);
        self.depth.set(depth - 1);
        items
    }

    /// Parse `key#items|key#items...}` including the closing brace.
    fn styles(&self, input: &mut &'s str, token_start: &'s str) -> Result<Vec<Style>, ParseError> {
        let mut styles = Vec::new();
        loop {
            ws(input);
            let key_at = *input;
            let key = style_key(input).unwrap_or_default();
            ws(input);

            match input.chars().next() {
                None => return Err(self.unterminated(token_start)),
                Some('#') if key.is_empty() => {
                    return Err(self.malformed_style(key_at, "empty style key"));
                }
                Some('#') => *input = &input[1..],
                Some(_) if key.is_empty() => {
                    return Err(self.malformed_style(key_at, "expected a style entry 'key#items'"));
                }
                Some(_) => {
                    return Err(self.malformed_style(
                        input,
                        format!("expected '#' after style key '{key}'"),
                    ));
                }
            }

            let items = self.nested_nodes(input, token_start)?;
            styles.push(Style {
                key: key.to_string(),
                items,
            });

            match input.chars().next() {
                Some('|') => *input = &input[1..],
                Some('}') => {
                    *input = &input[1..];
                    return Ok(styles);
                }
                _ => return Err(self.unterminated(token_start)),
            }
        }
    }
}

/// Parse a run of literal text up to the next delimiter for this level.
fn text_run<'i>(input: &mut &'i str, level: Level) -> ModalResult<&'i str> {
    take_till(0.., |c: char| level.ends_text(c)).parse_next(input)
}

/// Skip optional whitespace.
fn ws(input: &mut &str) {
    let _: ModalResult<&str> = take_while(0.., |c: char| c.is_ascii_whitespace()).parse_next(input);
}

/// Parse the digits of a positional index.
fn position_digits<'i>(input: &mut &'i str) -> ModalResult<&'i str> {
    take_while(1.., |c: char| c.is_ascii_digit()).parse_next(input)
}

/// Parse a `:name` index, returning the name without the colon.
fn named_index<'i>(input: &mut &'i str) -> ModalResult<&'i str> {
    (':', identifier).map(|(_, name)| name).parse_next(input)
}

/// Parse an identifier (alphanumeric with underscores).
fn identifier<'i>(input: &mut &'i str) -> ModalResult<&'i str> {
    take_while(1.., is_ident_char).parse_next(input)
}

/// Parse everything up to the `,` or `}` that ends a type keyword.
fn type_keyword<'i>(input: &mut &'i str) -> ModalResult<&'i str> {
    take_till(0.., [',', '}']).parse_next(input)
}

/// Parse a style key: any text up to the `#` that starts its items.
///
/// Map keys are compared with runtime values, so spaces, punctuation and
/// non-ASCII letters are allowed. Only trailing whitespace is dropped.
fn style_key<'i>(input: &mut &'i str) -> ModalResult<&'i str> {
    take_till(1.., ['#', '|', '{', '}'])
        .map(str::trim_end)
        .parse_next(input)
}

fn is_ident_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}
