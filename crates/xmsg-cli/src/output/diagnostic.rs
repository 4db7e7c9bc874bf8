//! Miette diagnostic wrapper for template parse errors.
//!
//! Note: This module has an exception for `unused_assignments` because miette
//! derive macros read struct fields in generated code that rustc cannot track.
#![allow(unused_assignments)]

use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;
use xmsg::ParseError;

/// A miette-compatible diagnostic for template parse errors.
///
/// Note: Fields are read by miette derive macros, not directly by code.
#[derive(Debug, Error, Diagnostic)]
#[error("{message}")]
#[diagnostic(code(xmsg::syntax))]
pub struct TemplateDiagnostic {
    #[source_code]
    src: NamedSource<String>,

    #[label("error here")]
    span: SourceSpan,

    message: String,

    #[help]
    help: Option<String>,
}

impl TemplateDiagnostic {
    /// Create a diagnostic from a ParseError with source context.
    pub fn from_parse_error(name: &str, content: &str, err: &ParseError) -> Self {
        let (line, column) = err.position();

        // Columns count characters; miette wants a byte offset.
        let line_start: usize = content
            .split('\n')
            .take(line.saturating_sub(1))
            .map(|l| l.len() + 1)
            .sum();
        let line_text = content
            .get(line_start..)
            .and_then(|rest| rest.split('\n').next())
            .unwrap_or("");
        let column_offset = line_text
            .char_indices()
            .nth(column.saturating_sub(1))
            .map_or(line_text.len(), |(offset, _)| offset);

        // Clamp offset to content length to avoid miette panic on out-of-bounds
        let offset = (line_start + column_offset).min(content.len());

        let help = match err {
            ParseError::UnknownTokenType { suggestions, .. } if !suggestions.is_empty() => {
                Some(format!("did you mean: {}?", suggestions.join(", ")))
            }
            ParseError::UnknownTokenType { .. } => {
                Some("token types are: number, choice, map, anchor, link".to_string())
            }
            ParseError::UnbalancedDelimiter { .. } | ParseError::UnterminatedToken { .. } => {
                Some("'{' and '}' always delimit tokens and cannot be escaped".to_string())
            }
            _ => None,
        };

        TemplateDiagnostic {
            src: NamedSource::new(name, content.to_string()),
            span: (offset, 1).into(),
            message: err.to_string(),
            help,
        }
    }
}
