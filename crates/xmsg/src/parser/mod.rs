//! Message template parser.
//!
//! This module turns template strings into a node tree. The tree is plain
//! data and is shared by the substitution engine and the token registry.

pub mod ast;
pub mod error;
mod template;

pub use ast::*;
pub use error::{ParseError, compute_suggestions};
pub use template::{MAX_NESTING_DEPTH, parse_template};
