//! Error types for template substitution.

use thiserror::Error;

use crate::parser::ParseError;

/// An error that occurred while substituting parameters into a template.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubstitutionError {
    /// No value was supplied for a token that requires one.
    #[error("no value supplied for token '{token}'")]
    MissingValue { token: String },

    /// A named index (`{:name}`) was read from a positional parameter list.
    #[error("token '{token}' is named but the parameters are positional")]
    WrongSourceKind { token: String },

    /// A choice token has no style to fall back to.
    #[error("choice token '{token}' has no branch for rule key '{rule_key}'")]
    NoBranch { token: String, rule_key: String },
}

/// An error from parsing and rendering a template in one step.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormatError {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Substitution(#[from] SubstitutionError),
}
