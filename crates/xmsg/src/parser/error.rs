//! Parse error types for message templates.

use thiserror::Error;

/// An error that occurred while parsing a template.
///
/// Every variant carries the 1-based line and column where the problem was
/// detected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// End of input reached inside a token. The position is that of the
    /// token's opening brace.
    #[error("unterminated token starting at {line}:{column}")]
    UnterminatedToken { line: usize, column: usize },

    /// A token does not begin with a decimal index or a `:name` index.
    #[error("missing token index at {line}:{column}")]
    MissingIndex { line: usize, column: usize },

    /// The token type keyword is not one of the known types.
    #[error("unknown token type '{name}' at {line}:{column}{}", format_suggestions(suggestions))]
    UnknownTokenType {
        line: usize,
        column: usize,
        name: String,
        suggestions: Vec<String>,
    },

    /// A style list is empty or an entry is not of the form `key#items`.
    #[error("malformed style at {line}:{column}: {message}")]
    MalformedStyle {
        line: usize,
        column: usize,
        message: String,
    },

    /// A character that cannot follow a token index.
    #[error("unexpected character '{found}' at {line}:{column}")]
    UnexpectedCharacter {
        line: usize,
        column: usize,
        found: char,
    },

    /// A closing brace with no matching opening brace.
    #[error("unbalanced '}}' at {line}:{column}")]
    UnbalancedDelimiter { line: usize, column: usize },

    /// Tokens nested inside style items beyond the supported depth. The
    /// position is that of the token that crosses the limit.
    #[error("tokens nested more than {limit} levels deep at {line}:{column}")]
    NestingTooDeep {
        line: usize,
        column: usize,
        limit: usize,
    },
}

impl ParseError {
    /// The (line, column) where the error was detected.
    pub fn position(&self) -> (usize, usize) {
        match self {
            ParseError::UnterminatedToken { line, column }
            | ParseError::MissingIndex { line, column }
            | ParseError::UnknownTokenType { line, column, .. }
            | ParseError::MalformedStyle { line, column, .. }
            | ParseError::UnexpectedCharacter { line, column, .. }
            | ParseError::UnbalancedDelimiter { line, column }
            | ParseError::NestingTooDeep { line, column, .. } => (*line, *column),
        }
    }
}

fn format_suggestions(suggestions: &[String]) -> String {
    if suggestions.is_empty() {
        String::new()
    } else {
        format!(", did you mean: {}?", suggestions.join(", "))
    }
}

/// Computes "did you mean" suggestions for a misspelled keyword.
///
/// Returns up to three candidates within an edit distance of 1 (for short
/// words) or 2, closest first.
pub fn compute_suggestions(target: &str, available: &[&str]) -> Vec<String> {
    let max_distance = if target.len() <= 3 { 1 } else { 2 };
    let mut scored: Vec<(usize, &str)> = available
        .iter()
        .map(|candidate| (strsim::levenshtein(target, candidate), *candidate))
        .filter(|(distance, _)| *distance <= max_distance)
        .collect();
    scored.sort_by_key(|(distance, _)| *distance);
    scored
        .into_iter()
        .take(3)
        .map(|(_, candidate)| candidate.to_string())
        .collect()
}
