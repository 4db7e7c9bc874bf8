//! Substitution engine for parsed templates.
//!
//! This module renders a template tree against a parameter source. It
//! resolves token values, selects choice and map branches, formats numbers,
//! and wraps anchor content in markup.

mod context;
mod decoration;
mod error;
mod evaluator;
mod plural;

pub use context::{EvalContext, MissingValuePolicy};
pub use decoration::Decoration;
pub use error::{FormatError, SubstitutionError};
pub use evaluator::{substitute, substitute_with};
pub use plural::{CldrPlurals, PluralRuleResolver, SingularPlural, plural_category};
